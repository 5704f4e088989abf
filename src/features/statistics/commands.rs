use crate::features::statistics::models::{MonthlySummary, OverallTotals};
use crate::features::statistics::service;
use crate::shared::errors::{log_and_convert, AppError};
use crate::AppState;

/// 月別集計の一覧を取得する
pub async fn get_monthly_summaries(state: &AppState) -> Result<Vec<MonthlySummary>, String> {
    state
        .with_connection(service::monthly_summaries)
        .map_err(|e| log_and_convert("月別集計の取得", e))
}

/// 指定した年月の集計を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `year` - 年
/// * `month` - 月（1〜12）
pub async fn get_monthly_summary(
    state: &AppState,
    year: i32,
    month: u32,
) -> Result<MonthlySummary, String> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation("月は1〜12の範囲で指定してください").into());
    }

    state
        .with_connection(|conn| service::monthly_summary(conn, year, month))
        .map_err(|e| log_and_convert("月別集計の取得", e))
}

/// 全期間の合計を取得する
pub async fn get_overall_totals(state: &AppState) -> Result<OverallTotals, String> {
    state
        .with_connection(service::overall_totals)
        .map_err(|e| log_and_convert("合計の取得", e))
}
