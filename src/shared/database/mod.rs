/// データベース接続とスキーマ管理
pub mod connection;

pub use connection::{check_column_exists, create_tables, open_database, open_in_memory_database};
