/// 収支機能モジュール
///
/// このモジュールは収支管理に関連するすべての機能を提供します：
/// - 収支の作成、取得、更新（CRUD操作）
/// - ゴミ箱への移動と復元（論理削除）
/// - タイトルによる部分一致検索と種別での絞り込み
/// - 入力値のバリデーション
pub mod commands;
pub mod models;
pub mod queries;
pub mod repository;

// モデル
pub use models::{CreateExpenseDto, EntryState, Expense, ExpenseType, UpdateExpenseDto};

// コマンド（画面から呼び出される処理）
pub use commands::{
    create_expense, delete_expense, get_deleted_expenses, get_expense, get_expenses,
    initialize_database, restore_expense, update_expense,
};

// 問い合わせ（論理削除の表示ルールを適用済み）
pub use queries::{
    browse_active, browse_trashed, list_active, list_trashed, restore, search_active,
    search_trashed, soft_delete,
};
