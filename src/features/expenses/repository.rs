use crate::features::expenses::models::{EntryState, Expense, ExpenseType};
use crate::shared::errors::AppResult;
use crate::shared::utils::today_display_date;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_COLUMNS: &str = "SELECT id, title, amount, createdAt, type, isDeleted FROM expenses";

/// 行を収支モデルに変換する
fn map_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        created_at: row.get(3)?,
        expense_type: row.get(4)?,
        is_deleted: row.get::<_, i64>(5)? != 0,
    })
}

/// 収支を作成する
///
/// 作成日は現在日付（日/月/年）、削除フラグは0で登録する。
/// タイトル・金額の検証は呼び出し側の責務で、ここでは行わない。
///
/// # 引数
/// * `conn` - データベース接続
/// * `title` - タイトル
/// * `amount` - 金額
/// * `expense_type` - 収支種別
///
/// # 戻り値
/// 採番されたID、または失敗時はエラー
pub fn create(
    conn: &Connection,
    title: &str,
    amount: f64,
    expense_type: ExpenseType,
) -> AppResult<i64> {
    insert_with_created_at(conn, title, amount, expense_type, &today_display_date())
}

/// 作成日を指定して収支を登録する
pub(crate) fn insert_with_created_at(
    conn: &Connection,
    title: &str,
    amount: f64,
    expense_type: ExpenseType,
    created_at: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO expenses (title, amount, createdAt, type, isDeleted)
         VALUES (?1, ?2, ?3, ?4, 0)",
        params![title, amount, created_at, expense_type],
    )?;

    let id = conn.last_insert_rowid();
    log::debug!("収支を作成しました: id={id}, type={expense_type}");

    Ok(id)
}

/// IDで収支を取得する（削除状態は問わない）
///
/// # 戻り値
/// 収支、存在しない場合はNone
pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<Expense>> {
    let expense = conn
        .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], map_row)
        .optional()?;

    Ok(expense)
}

/// 収支を更新する（タイトル・金額・種別のみ）
///
/// ID・作成日・削除フラグには触れない。存在しないIDの場合も成功扱いで、
/// 影響行数0を返す。
///
/// # 戻り値
/// 影響を受けた行数
pub fn update(
    conn: &Connection,
    id: i64,
    title: &str,
    amount: f64,
    expense_type: ExpenseType,
) -> AppResult<usize> {
    let affected_rows = conn.execute(
        "UPDATE expenses SET title = ?1, amount = ?2, type = ?3 WHERE id = ?4",
        params![title, amount, expense_type, id],
    )?;

    Ok(affected_rows)
}

/// 削除フラグを設定する
///
/// # 引数
/// * `conn` - データベース接続
/// * `id` - 収支ID
/// * `state` - 設定後の状態
///
/// # 戻り値
/// 影響を受けた行数（存在しないIDの場合は0）
pub fn set_state(conn: &Connection, id: i64, state: EntryState) -> AppResult<usize> {
    let affected_rows = conn.execute(
        "UPDATE expenses SET isDeleted = ?1 WHERE id = ?2",
        params![state.is_deleted_flag(), id],
    )?;

    Ok(affected_rows)
}

/// 指定した状態の収支一覧を取得する（ID降順）
pub fn find_by_state(conn: &Connection, state: EntryState) -> AppResult<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} WHERE isDeleted = ?1 ORDER BY id DESC"
    ))?;

    let expenses = stmt
        .query_map(params![state.is_deleted_flag()], map_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(expenses)
}

/// 指定した状態の収支をタイトルで検索する（ID降順）
///
/// 大文字・小文字を区別する部分一致。検索文字列はパターンとして解釈せず、
/// `%` や `_` もそのままの文字として扱う。空文字列は全件に一致する。
pub fn search_by_state(
    conn: &Connection,
    state: EntryState,
    text: &str,
) -> AppResult<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} WHERE isDeleted = ?1 AND instr(title, ?2) > 0 ORDER BY id DESC"
    ))?;

    let expenses = stmt
        .query_map(params![state.is_deleted_flag(), text], map_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(expenses)
}
