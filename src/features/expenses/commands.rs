use crate::features::expenses::models::{CreateExpenseDto, Expense, ExpenseType, UpdateExpenseDto};
use crate::features::expenses::{queries, repository};
use crate::shared::database::create_tables;
use crate::shared::errors::{log_and_convert, AppError};
use crate::shared::utils::{validate_amount, validate_title};
use crate::AppState;

/// テーブルを初期化する（起動のたびに呼び出してよい）
pub async fn initialize_database(state: &AppState) -> Result<(), String> {
    state
        .with_connection(create_tables)
        .map_err(|e| log_and_convert("データベースの初期化", e))
}

/// 収支を作成する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `dto` - 収支作成用DTO
///
/// # 戻り値
/// 作成された収支、または失敗時はエラーメッセージ
pub async fn create_expense(state: &AppState, dto: CreateExpenseDto) -> Result<Expense, String> {
    validate_expense_input(&dto.title, dto.amount)?;

    state
        .with_connection(|conn| {
            let id = repository::create(conn, &dto.title, dto.amount, dto.expense_type)?;
            repository::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("収支"))
        })
        .map_err(|e| log_and_convert("収支の作成", e))
}

/// IDで収支を取得する（ゴミ箱内の収支も含む）
pub async fn get_expense(state: &AppState, id: i64) -> Result<Expense, String> {
    state
        .with_connection(|conn| {
            repository::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("収支"))
        })
        .map_err(|e| log_and_convert("収支の取得", e))
}

/// 収支を更新する
///
/// 編集画面は対象を読み込んでから保存するため、存在しないIDは
/// ここで未発見エラーとして返す。
pub async fn update_expense(
    state: &AppState,
    id: i64,
    dto: UpdateExpenseDto,
) -> Result<Expense, String> {
    validate_expense_input(&dto.title, dto.amount)?;

    state
        .with_connection(|conn| {
            let affected_rows =
                repository::update(conn, id, &dto.title, dto.amount, dto.expense_type)?;
            if affected_rows == 0 {
                return Err(AppError::not_found("収支"));
            }
            repository::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("収支"))
        })
        .map_err(|e| log_and_convert("収支の更新", e))
}

/// 有効な収支一覧を取得する（検索文字列・種別で絞り込み可能）
pub async fn get_expenses(
    state: &AppState,
    search: Option<String>,
    type_filter: Option<ExpenseType>,
) -> Result<Vec<Expense>, String> {
    let search = search.unwrap_or_default();

    state
        .with_connection(|conn| queries::browse_active(conn, &search, type_filter))
        .map_err(|e| log_and_convert("収支一覧の取得", e))
}

/// ゴミ箱の収支一覧を取得する（検索文字列で絞り込み可能）
pub async fn get_deleted_expenses(
    state: &AppState,
    search: Option<String>,
) -> Result<Vec<Expense>, String> {
    let search = search.unwrap_or_default();

    state
        .with_connection(|conn| queries::browse_trashed(conn, &search))
        .map_err(|e| log_and_convert("ゴミ箱一覧の取得", e))
}

/// 収支をゴミ箱に移動する
pub async fn delete_expense(state: &AppState, id: i64) -> Result<(), String> {
    state
        .with_connection(|conn| queries::soft_delete(conn, id))
        .map_err(|e| log_and_convert("収支の削除", e))
}

/// ゴミ箱の収支を元に戻す
pub async fn restore_expense(state: &AppState, id: i64) -> Result<(), String> {
    state
        .with_connection(|conn| queries::restore(conn, id))
        .map_err(|e| log_and_convert("収支の復元", e))
}

/// 入力値のバリデーション
fn validate_expense_input(title: &str, amount: f64) -> Result<(), String> {
    validate_title(title).map_err(String::from)?;
    validate_amount(amount).map_err(String::from)?;
    Ok(())
}
