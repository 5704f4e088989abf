use super::environment::{get_database_filename, get_environment, Environment};
use crate::shared::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// アプリケーションデータディレクトリ名
const APP_DIR_NAME: &str = "expense-tracker";

/// アプリケーション初期化の結果を表す構造体
#[derive(Debug)]
pub struct InitializationResult {
    /// 初回起動かどうか
    pub is_first_run: bool,
    /// アプリケーションデータディレクトリのパス
    pub app_data_dir: PathBuf,
    /// データベースファイルのパス
    pub database_path: PathBuf,
    /// 実行環境
    pub environment: Environment,
}

/// 既定のアプリケーションデータディレクトリを取得する
///
/// # 戻り値
/// `APP_DATA_DIR` が設定されていればそのパス、なければOSのデータディレクトリ配下
pub fn default_app_data_dir() -> AppResult<PathBuf> {
    if let Some(dir) = crate::get_env_var_optional!("APP_DATA_DIR") {
        log::debug!("APP_DATA_DIR を使用します: {dir}");
        return Ok(PathBuf::from(dir));
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::configuration("アプリデータディレクトリの取得に失敗しました"))
}

/// アプリケーションの初期化を実行する
///
/// # 引数
/// * `app_data_dir` - アプリケーションデータディレクトリ
///
/// # 戻り値
/// 初期化結果、または失敗時はエラー
///
/// # 処理内容
/// 1. アプリケーションデータディレクトリの作成
/// 2. 環境に応じたデータベースファイルパスの決定
/// 3. 初回起動の判定
pub fn initialize_application(app_data_dir: &Path) -> AppResult<InitializationResult> {
    let environment = get_environment();

    ensure_app_data_directory(app_data_dir)?;

    let db_filename = get_database_filename(environment.clone());
    let database_path = app_data_dir.join(db_filename);

    // 初回起動かどうかを判定（データベースファイルの存在で判定）
    let is_first_run = !database_path.exists();

    if is_first_run {
        log_first_run_initialization(&environment, app_data_dir, &database_path);
    }

    Ok(InitializationResult {
        is_first_run,
        app_data_dir: app_data_dir.to_path_buf(),
        database_path,
        environment,
    })
}

/// アプリケーションデータディレクトリを確実に作成する
fn ensure_app_data_directory(app_data_dir: &Path) -> AppResult<()> {
    if !app_data_dir.exists() {
        fs::create_dir_all(app_data_dir)?;

        log::info!("アプリケーションデータディレクトリを作成しました: {app_data_dir:?}");
    }

    Ok(())
}

/// 初回起動時の初期化ログを出力する
fn log_first_run_initialization(
    environment: &Environment,
    app_data_dir: &Path,
    database_path: &Path,
) {
    log::info!("=== アプリケーション初回起動 ===");
    log::info!("実行環境: {environment:?}");
    log::info!("アプリデータディレクトリ: {app_data_dir:?}");
    log::info!("データベースファイル: {database_path:?}");
}

/// 初期化完了ログを出力する
pub fn log_initialization_complete(result: &InitializationResult) {
    if result.is_first_run {
        log::info!("初回起動の初期化が正常に完了しました");
    } else {
        log::info!("アプリケーション起動完了（既存データベースを使用）");
    }
    log::info!(
        "環境: {:?}, データベース: {:?}",
        result.environment,
        result.database_path
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_application_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let app_dir = temp_dir.path().join("nested").join("app");

        let result = initialize_application(&app_dir).unwrap();

        // ディレクトリが作成され、初回起動と判定されることを確認
        assert!(app_dir.exists());
        assert!(result.is_first_run);
        assert!(result.database_path.starts_with(&app_dir));
        assert!(result
            .database_path
            .to_string_lossy()
            .ends_with("expenses.db"));
    }

    #[test]
    fn test_initialize_application_detects_existing_database() {
        let temp_dir = TempDir::new().unwrap();

        let first = initialize_application(temp_dir.path()).unwrap();
        std::fs::write(&first.database_path, b"").unwrap();

        let second = initialize_application(temp_dir.path()).unwrap();
        assert!(!second.is_first_run);
        assert_eq!(first.database_path, second.database_path);
    }

    #[test]
    fn test_initialize_application_fails_when_path_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        // ファイルの下にディレクトリは作成できない
        let error = initialize_application(&blocker.join("app")).unwrap_err();
        assert!(matches!(error, AppError::Io(_)));
    }

    #[test]
    fn test_log_initialization_complete() {
        let result = InitializationResult {
            is_first_run: true,
            app_data_dir: PathBuf::from("/tmp/test"),
            database_path: PathBuf::from("/tmp/test/expenses.db"),
            environment: Environment::Production,
        };

        // パニックしないことを確認
        log_initialization_complete(&result);
        assert_eq!(result.environment, Environment::Production);
    }
}
