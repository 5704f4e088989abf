use crate::shared::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

/// データベース接続を開き、テーブル作成とマイグレーションを実行する
///
/// # 引数
/// * `database_path` - データベースファイルのパス
///
/// # 戻り値
/// データベース接続、または失敗時はエラー
pub fn open_database(database_path: &Path) -> AppResult<Connection> {
    let conn = Connection::open(database_path)?;

    create_tables(&conn)?;

    log::info!("データベースを初期化しました: {database_path:?}");

    Ok(conn)
}

/// メモリ上のデータベースを開く（テストや一時利用向け）
pub fn open_in_memory_database() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

/// 収支テーブルを作成する
///
/// アプリ起動のたびに呼び出してよい。`isDeleted` カラムを持たない旧スキーマの
/// テーブルには既定値0でカラムを追加する。
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            amount REAL NOT NULL,
            createdAt TEXT NOT NULL,
            type TEXT NOT NULL CHECK(type IN ('income', 'expense')),
            isDeleted INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    migrate_existing_tables(conn)?;

    Ok(())
}

/// 既存テーブルのマイグレーションを実行する
fn migrate_existing_tables(conn: &Connection) -> AppResult<()> {
    if check_column_exists(conn, "expenses", "isDeleted") {
        return Ok(());
    }

    log::info!("isDeletedカラムを追加します...");

    match conn.execute(
        "ALTER TABLE expenses ADD COLUMN isDeleted INTEGER NOT NULL DEFAULT 0",
        [],
    ) {
        Ok(_) => {
            log::info!("isDeletedカラムの追加が完了しました");
            Ok(())
        }
        // 既にカラムが存在する場合のエラーは無視する
        Err(e) if is_duplicate_column_error(&e) => {
            log::debug!("isDeletedカラムは既に存在します: {e}");
            Ok(())
        }
        Err(e) => Err(AppError::from(e)),
    }
}

/// カラム重複エラーかどうかを判定する
fn is_duplicate_column_error(error: &rusqlite::Error) -> bool {
    error.to_string().contains("duplicate column name")
}

/// テーブルに指定されたカラムが存在するかチェックする
///
/// # 引数
/// * `conn` - データベース接続
/// * `table_name` - テーブル名
/// * `column_name` - カラム名
///
/// # 戻り値
/// カラムが存在する場合はtrue、存在しないかエラーの場合はfalse
pub fn check_column_exists(conn: &Connection, table_name: &str, column_name: &str) -> bool {
    let query = format!("PRAGMA table_info({table_name})");

    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };

    let Ok(rows) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };

    let exists = rows.flatten().any(|name| name == column_name);
    exists
}
