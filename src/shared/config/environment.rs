/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境変数取得エラー
#[derive(Debug, Clone)]
pub struct EnvVarError {
    /// 変数名
    pub var_name: String,
    /// エラーメッセージ
    pub message: String,
}

impl std::fmt::Display for EnvVarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "環境変数 {} が見つかりません: {}",
            self.var_name, self.message
        )
    }
}

impl std::error::Error for EnvVarError {}

/// 環境変数を取得する（優先順位: 起動時 > コンパイル時 > エラー）
///
/// # 取得順序
/// 1. 起動時の環境変数（`std::env::var`）
/// 2. コンパイル時の環境変数（`option_env!`マクロ、build.rsで埋め込み）
/// 3. どちらも見つからない場合はエラー
#[macro_export]
macro_rules! get_env_var {
    ($var_name:expr) => {{
        // 1. 起動時の環境変数を確認
        if let Ok(value) = std::env::var($var_name) {
            log::debug!("環境変数 {} を起動時の環境変数から取得しました", $var_name);
            Ok(value)
        }
        // 2. コンパイル時の環境変数を確認
        else if let Some(value) = option_env!($var_name) {
            log::debug!("環境変数 {} をコンパイル時の環境変数から取得しました", $var_name);
            Ok(value.to_string())
        }
        // 3. どちらも見つからない場合はエラー
        else {
            Err($crate::shared::config::environment::EnvVarError {
                var_name: $var_name.to_string(),
                message: format!(
                    "起動時の環境変数 {} もコンパイル時の環境変数も見つかりませんでした",
                    $var_name
                ),
            })
        }
    }};
}

/// 環境変数を取得する（オプション版）
#[macro_export]
macro_rules! get_env_var_optional {
    ($var_name:expr) => {{
        $crate::get_env_var!($var_name).ok()
    }};
}

/// 環境変数を取得する（デフォルト値付き）
///
/// # 引数
/// * `var_name` - 環境変数名
/// * `default_value` - デフォルト値
#[macro_export]
macro_rules! get_env_var_or_default {
    ($var_name:expr, $default_value:expr) => {{
        $crate::get_env_var!($var_name).unwrap_or_else(|_| {
            log::debug!(
                "環境変数 {} が見つからないため、デフォルト値を使用します: {}",
                $var_name,
                $default_value
            );
            $default_value.to_string()
        })
    }};
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: String,
    /// ログレベル
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        let environment = get_environment();
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| match environment {
            Environment::Development => "debug".to_string(),
            Environment::Production => "info".to_string(),
        });

        Self {
            environment: format!("{environment:?}").to_lowercase(),
            log_level,
        }
    }

    /// プロダクション環境かどうかを判定
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// ログレベル文字列をフィルターに変換する（不明な値はInfo）
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

/// 現在の実行環境を判定する
///
/// # 判定ロジック
/// 1. 起動時の環境変数 ENVIRONMENT を確認
/// 2. ビルド時の環境変数 ENVIRONMENT を確認
/// 3. デバッグビルドの場合は Development
/// 4. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Some(env_var) = crate::get_env_var_optional!("ENVIRONMENT") {
        let env = parse_environment(&env_var);
        log::debug!("環境判定: 環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    // フォールバック: ビルド設定に基づく判定
    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

fn parse_environment(value: &str) -> Environment {
    match value {
        "production" => Environment::Production,
        _ => Environment::Development,
    }
}

/// 環境に応じたデータベースファイル名を取得する
///
/// # ファイル名の規則
/// - 開発環境: "dev_expenses.db"
/// - プロダクション環境: "expenses.db"
pub fn get_database_filename(env: Environment) -> &'static str {
    match env {
        Environment::Development => "dev_expenses.db",
        Environment::Production => "expenses.db",
    }
}

/// 環境に応じた.envファイルを読み込む
pub fn load_environment_variables() {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    let env_file = match environment.as_str() {
        "production" => ".env.production",
        _ => ".env",
    };

    log::info!("環境: {environment}, 読み込み対象: {env_file}");

    match dotenv::from_filename(env_file) {
        Ok(_) => {
            log::info!("{env_file}ファイルを読み込みました");
        }
        Err(_) => {
            // 環境固有のファイルがない場合は、デフォルトの.envを試行
            if env_file != ".env" && dotenv::dotenv().is_ok() {
                log::warn!("{env_file}が見つからないため、デフォルトの.envファイルを読み込みました");
            } else {
                log::warn!(".envファイルが見つかりません。コンパイル時埋め込み値または直接設定された環境変数を使用します。");
            }
        }
    }
}

/// ログシステムを初期化する
///
/// 二度目以降の呼び出しは何もしない（テストから複数回呼ばれるため）
pub fn initialize_logging_system() {
    let env_config = EnvironmentConfig::from_env();

    let initialized = env_logger::Builder::from_default_env()
        .filter_level(env_config.level_filter())
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .is_ok();

    if initialized {
        log::info!(
            "ログシステムを初期化しました: level={}, environment={}",
            env_config.log_level,
            env_config.environment
        );
    }
}

/// 同期先（MockAPI）の設定を管理する構造体
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// 既定の同期先URL（画面で未入力の場合に使用）
    pub default_api_url: Option<String>,
    /// 同期先として許可するホストのドメイン
    pub allowed_domain: String,
    /// コレクションのリソース名（URLの最後のパスセグメント）
    pub resource_name: String,
    /// リクエストのタイムアウト（秒）。未設定の場合はHTTPクライアントの既定値
    pub timeout_seconds: Option<u64>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_api_url: None,
            allowed_domain: "mockapi.io".to_string(),
            resource_name: "expenses".to_string(),
            timeout_seconds: None,
        }
    }
}

impl SyncConfig {
    /// 環境変数から同期設定を読み込む
    pub fn from_env() -> Self {
        log::debug!("SyncConfig::from_env() - 環境変数の読み込みを開始");

        let defaults = Self::default();

        let default_api_url = crate::get_env_var_optional!("SYNC_API_URL")
            .filter(|url: &String| !url.trim().is_empty());

        let allowed_domain =
            crate::get_env_var_or_default!("SYNC_ALLOWED_DOMAIN", defaults.allowed_domain);

        let resource_name =
            crate::get_env_var_or_default!("SYNC_RESOURCE_NAME", defaults.resource_name);

        let timeout_seconds = crate::get_env_var_optional!("SYNC_TIMEOUT_SECONDS").and_then(
            |value: String| match value.parse::<u64>() {
                Ok(seconds) => Some(seconds),
                Err(_) => {
                    log::warn!(
                        "SYNC_TIMEOUT_SECONDSのパースに失敗しました。HTTPクライアントの既定値を使用します: {value}"
                    );
                    None
                }
            },
        );

        log::info!(
            "同期設定: domain={allowed_domain}, resource={resource_name}, timeout={timeout_seconds:?}"
        );

        Self {
            default_api_url,
            allowed_domain,
            resource_name,
            timeout_seconds,
        }
    }

    /// 許可ドメインを差し替えた設定を返す
    pub fn with_allowed_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.allowed_domain = domain.into();
        self
    }

    /// 既定の同期先URLを差し替えた設定を返す
    pub fn with_default_api_url<S: Into<String>>(mut self, url: S) -> Self {
        self.default_api_url = Some(url.into());
        self
    }

    /// 設定を検証する
    ///
    /// # 戻り値
    /// 設定が有効な場合はOk(())、無効な場合はErr
    pub fn validate(&self) -> Result<(), String> {
        if self.allowed_domain.trim().is_empty() {
            return Err("同期先の許可ドメインが設定されていません".to_string());
        }

        if self.resource_name.trim().is_empty() || self.resource_name.contains('/') {
            return Err("同期先のリソース名が不正です".to_string());
        }

        if self.timeout_seconds == Some(0) {
            return Err("同期タイムアウトは0より大きい値である必要があります".to_string());
        }

        Ok(())
    }
}

/// 同期設定を検証し、実行環境に応じて採用する設定を決める
///
/// プロダクション環境では不正な設定をエラーとする。開発環境では警告を出し、
/// 既定URL以外を既定値に戻して続行する。
pub fn resolve_sync_config(
    config: SyncConfig,
    env_config: &EnvironmentConfig,
) -> Result<SyncConfig, String> {
    match config.validate() {
        Ok(()) => Ok(config),
        Err(e) if env_config.is_production() => Err(e),
        Err(e) => {
            log::warn!("開発環境のため、同期設定エラーを無視して既定値で続行します: {e}");
            Ok(SyncConfig {
                default_api_url: config.default_api_url,
                ..SyncConfig::default()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_database_filename() {
        assert_eq!(
            get_database_filename(Environment::Development),
            "dev_expenses.db"
        );
        assert_eq!(
            get_database_filename(Environment::Production),
            "expenses.db"
        );
    }

    #[test]
    fn test_get_environment() {
        // 実際の値はビルド設定に依存
        let env = get_environment();
        assert!(matches!(
            env,
            Environment::Development | Environment::Production
        ));
    }

    fn env_config(environment: &str) -> EnvironmentConfig {
        EnvironmentConfig {
            environment: environment.to_string(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_parse_environment() {
        assert_eq!(parse_environment("production"), Environment::Production);
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn test_resolve_sync_config() {
        let invalid = SyncConfig {
            resource_name: String::new(),
            ..SyncConfig::default().with_default_api_url("https://x.mockapi.io/expenses")
        };

        // プロダクション環境では不正な設定はエラー
        assert!(resolve_sync_config(invalid.clone(), &env_config("production")).is_err());

        // 開発環境では既定値に戻して続行（既定URLは維持）
        let resolved = resolve_sync_config(invalid, &env_config("development")).unwrap();
        assert_eq!(resolved.resource_name, "expenses");
        assert_eq!(
            resolved.default_api_url.as_deref(),
            Some("https://x.mockapi.io/expenses")
        );

        // 正しい設定はそのまま採用
        let valid = SyncConfig::default().with_allowed_domain("127.0.0.1");
        let resolved = resolve_sync_config(valid, &env_config("production")).unwrap();
        assert_eq!(resolved.allowed_domain, "127.0.0.1");
    }

    #[test]
    fn test_level_filter() {
        let mut config = EnvironmentConfig {
            environment: "development".to_string(),
            log_level: "WARN".to_string(),
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Warn);

        config.log_level = "unknown".to_string();
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_sync_config_default() {
        let config = SyncConfig::default();

        assert_eq!(config.allowed_domain, "mockapi.io");
        assert_eq!(config.resource_name, "expenses");
        assert!(config.default_api_url.is_none());
        assert!(config.timeout_seconds.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sync_config_validate() {
        let config = SyncConfig::default().with_allowed_domain("  ");
        assert!(config.validate().is_err());

        let config = SyncConfig {
            resource_name: "expenses/extra".to_string(),
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SyncConfig {
            timeout_seconds: Some(0),
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_environment_variables() {
        // パニックしないことを確認
        load_environment_variables();
    }

    #[test]
    fn test_initialize_logging_system_twice() {
        // 複数回呼び出してもパニックしないことを確認
        initialize_logging_system();
        initialize_logging_system();
    }
}
