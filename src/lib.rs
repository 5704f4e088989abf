pub mod features;
pub mod shared;

use log::{info, warn};
use rusqlite::Connection;
use shared::config::{
    default_app_data_dir, initialize_application, initialize_logging_system,
    load_environment_variables, log_initialization_complete, resolve_sync_config,
    EnvironmentConfig, SyncConfig,
};
use shared::database::{open_database, open_in_memory_database};
use shared::errors::{AppError, AppResult};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// アプリケーション状態（データベース接続と同期設定を保持）
///
/// プロセス全体で共有するグローバル変数は使わず、起動時に一度だけ作成して
/// 各コマンドに参照で渡す。
pub struct AppState {
    pub db: Mutex<Connection>,
    pub sync_config: SyncConfig,
    sync_in_progress: AtomicBool,
}

impl AppState {
    /// 既に開いている接続から状態を作成する
    pub fn new(conn: Connection, sync_config: SyncConfig) -> Self {
        Self {
            db: Mutex::new(conn),
            sync_config,
            sync_in_progress: AtomicBool::new(false),
        }
    }

    /// 指定パスのデータベースを開いて状態を作成する
    pub fn open(database_path: &Path, sync_config: SyncConfig) -> AppResult<Self> {
        let conn = open_database(database_path)?;
        Ok(Self::new(conn, sync_config))
    }

    /// メモリ上のデータベースで状態を作成する
    pub fn in_memory(sync_config: SyncConfig) -> AppResult<Self> {
        let conn = open_in_memory_database()?;
        Ok(Self::new(conn, sync_config))
    }

    /// 環境変数・ログ・データディレクトリを含めてアプリケーションを初期化する
    ///
    /// # 処理内容
    /// 1. .envファイルの読み込み
    /// 2. ログシステムの初期化
    /// 3. 同期設定の読み込みと検証
    /// 4. データディレクトリとデータベースの初期化
    pub fn initialize() -> AppResult<Self> {
        load_environment_variables();
        initialize_logging_system();

        info!("アプリケーション初期化を開始します...");

        let env_config = EnvironmentConfig::from_env();
        let sync_config = resolve_sync_config(SyncConfig::from_env(), &env_config)
            .map_err(AppError::configuration)?;
        if sync_config.default_api_url.is_none() {
            warn!("SYNC_API_URLが設定されていません。同期時にURLの入力が必要です");
        }

        let app_data_dir = default_app_data_dir()?;
        let init_result = initialize_application(&app_data_dir)?;

        let state = Self::open(&init_result.database_path, sync_config)?;

        log_initialization_complete(&init_result);
        info!("アプリケーション初期化が完了しました");

        Ok(state)
    }

    /// データベース接続をロックして処理を実行する
    pub fn with_connection<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = self
            .db
            .lock()
            .map_err(|e| AppError::concurrency(format!("データベースロック取得失敗: {e}")))?;
        f(&conn)
    }

    /// 同期処理の開始を試みる
    ///
    /// # 戻り値
    /// 他の同期が実行中でなければガード、実行中ならNone
    pub(crate) fn try_begin_sync(&self) -> Option<SyncGuard<'_>> {
        self.sync_in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SyncGuard {
                flag: &self.sync_in_progress,
            })
    }

    /// 同期処理が実行中かどうか
    pub fn is_syncing(&self) -> bool {
        self.sync_in_progress.load(Ordering::Acquire)
    }
}

/// 同期中フラグのガード（破棄時にフラグを下ろす）
pub(crate) struct SyncGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sync_guard_is_exclusive() {
        let state = AppState::in_memory(SyncConfig::default()).unwrap();

        let guard = state.try_begin_sync();
        assert!(guard.is_some());
        assert!(state.is_syncing());

        // 実行中は二つ目のガードを取得できない
        assert!(state.try_begin_sync().is_none());

        drop(guard);
        assert!(!state.is_syncing());
        assert!(state.try_begin_sync().is_some());
    }

    #[test]
    fn test_isolated_states() {
        let first = AppState::in_memory(SyncConfig::default()).unwrap();
        let second = AppState::in_memory(SyncConfig::default()).unwrap();

        first
            .with_connection(|conn| {
                features::expenses::repository::create(
                    conn,
                    "A",
                    1.0,
                    features::expenses::ExpenseType::Income,
                )
            })
            .unwrap();

        let count = second
            .with_connection(features::expenses::list_active)
            .unwrap()
            .len();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_open_persists_between_states() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("expenses.db");

        {
            let state = AppState::open(&db_path, SyncConfig::default()).unwrap();
            state
                .with_connection(|conn| {
                    features::expenses::repository::create(
                        conn,
                        "保存テスト",
                        1000.0,
                        features::expenses::ExpenseType::Expense,
                    )
                })
                .unwrap();
        }

        let reopened = AppState::open(&db_path, SyncConfig::default()).unwrap();
        let active = reopened
            .with_connection(features::expenses::list_active)
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "保存テスト");
    }
}
