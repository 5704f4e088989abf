use crate::features::expenses::{list_active, Expense, ExpenseType};
use crate::features::statistics::models::{MonthlySummary, OverallTotals};
use crate::shared::errors::AppResult;
use crate::shared::utils::parse_display_date;
use chrono::Datelike;
use rusqlite::Connection;
use std::collections::BTreeMap;

/// 有効な収支を作成月ごとに集計する
///
/// ゴミ箱内の収支は含めない。作成日を解釈できない収支は警告を出して除外する。
///
/// # 戻り値
/// 月別集計（新しい月が先頭）
pub fn monthly_summaries(conn: &Connection) -> AppResult<Vec<MonthlySummary>> {
    let expenses = list_active(conn)?;
    Ok(group_by_month(&expenses))
}

/// 指定した年月の集計を取得する
///
/// # 引数
/// * `conn` - データベース接続
/// * `year` - 年
/// * `month` - 月（1〜12）
///
/// # 戻り値
/// 集計結果（該当する収支がない場合はすべて0）
pub fn monthly_summary(conn: &Connection, year: i32, month: u32) -> AppResult<MonthlySummary> {
    let summary = monthly_summaries(conn)?
        .into_iter()
        .find(|s| s.year == year && s.month == month)
        .unwrap_or_else(|| MonthlySummary::empty(year, month));

    Ok(summary)
}

/// 有効な収支全体の合計を取得する
pub fn overall_totals(conn: &Connection) -> AppResult<OverallTotals> {
    let expenses = list_active(conn)?;

    let totals = expenses.iter().fold(OverallTotals::default(), |mut acc, e| {
        match e.expense_type {
            ExpenseType::Income => acc.total_income += e.amount,
            ExpenseType::Expense => acc.total_expense += e.amount,
        }
        acc.entry_count += 1;
        acc
    });

    Ok(OverallTotals {
        balance: totals.total_income - totals.total_expense,
        ..totals
    })
}

fn group_by_month(expenses: &[Expense]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u32), MonthlySummary> = BTreeMap::new();

    for expense in expenses {
        let Some(date) = parse_display_date(&expense.created_at) else {
            log::warn!(
                "作成日を解釈できないため集計から除外します: id={}, createdAt={}",
                expense.id,
                expense.created_at
            );
            continue;
        };

        months
            .entry((date.year(), date.month()))
            .or_insert_with(|| MonthlySummary::empty(date.year(), date.month()))
            .add(expense.amount, expense.expense_type);
    }

    months.into_values().rev().collect()
}
