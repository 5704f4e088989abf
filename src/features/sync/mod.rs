/// 同期機能モジュール
///
/// ローカルの有効な収支で同期先コレクション（MockAPI）の内容を丸ごと置き換える。
/// 差分同期や競合解決は行わない。
pub mod api_client;
pub mod commands;
pub mod endpoint;
pub mod models;
pub mod service;


pub use commands::sync_expenses;
pub use endpoint::validate_endpoint;
pub use models::{RemoteExpense, RemoteId, SyncPayload, SyncResult};
pub use service::sync_to_remote;
