//! 画面が必要とする問い合わせ（削除状態による表示ルールをここに集約する）

use crate::features::expenses::models::{EntryState, Expense, ExpenseType};
use crate::features::expenses::repository;
use crate::shared::errors::AppResult;
use rusqlite::Connection;

/// 有効な収支一覧を取得する（新しい順）
pub fn list_active(conn: &Connection) -> AppResult<Vec<Expense>> {
    repository::find_by_state(conn, EntryState::Active)
}

/// ゴミ箱の収支一覧を取得する（新しい順）
pub fn list_trashed(conn: &Connection) -> AppResult<Vec<Expense>> {
    repository::find_by_state(conn, EntryState::Trashed)
}

/// 有効な収支をタイトルの部分一致で検索する
pub fn search_active(conn: &Connection, text: &str) -> AppResult<Vec<Expense>> {
    repository::search_by_state(conn, EntryState::Active, text)
}

/// ゴミ箱の収支をタイトルの部分一致で検索する
pub fn search_trashed(conn: &Connection, text: &str) -> AppResult<Vec<Expense>> {
    repository::search_by_state(conn, EntryState::Trashed, text)
}

/// 収支をゴミ箱に移動する（何度呼んでも同じ結果）
///
/// 存在しないIDでもエラーにはしない
pub fn soft_delete(conn: &Connection, id: i64) -> AppResult<()> {
    change_state(conn, id, EntryState::Trashed)
}

/// ゴミ箱の収支を元に戻す（何度呼んでも同じ結果）
pub fn restore(conn: &Connection, id: i64) -> AppResult<()> {
    change_state(conn, id, EntryState::Active)
}

fn change_state(conn: &Connection, id: i64, state: EntryState) -> AppResult<()> {
    let affected_rows = repository::set_state(conn, id, state)?;

    if affected_rows == 0 {
        log::debug!("状態変更の対象が存在しません: id={id}, state={state:?}");
    } else {
        log::info!("収支の状態を変更しました: id={id}, state={state:?}");
    }

    Ok(())
}

/// ホーム画面向けの一覧取得
///
/// 検索文字列が空白のみなら全件、そうでなければ検索文字列（前後の空白を
/// 含めてそのまま）で部分一致検索し、種別が指定されていれば更に絞り込む。
pub fn browse_active(
    conn: &Connection,
    search: &str,
    type_filter: Option<ExpenseType>,
) -> AppResult<Vec<Expense>> {
    let expenses = if search.trim().is_empty() {
        list_active(conn)?
    } else {
        search_active(conn, search)?
    };

    Ok(match type_filter {
        Some(expense_type) => expenses
            .into_iter()
            .filter(|e| e.expense_type == expense_type)
            .collect(),
        None => expenses,
    })
}

/// ゴミ箱画面向けの一覧取得
pub fn browse_trashed(conn: &Connection, search: &str) -> AppResult<Vec<Expense>> {
    if search.trim().is_empty() {
        list_trashed(conn)
    } else {
        search_trashed(conn, search)
    }
}
