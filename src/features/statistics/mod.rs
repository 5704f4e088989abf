/// 統計機能モジュール
///
/// 有効な収支を作成月ごとに集計する。
pub mod commands;
pub mod models;
pub mod service;

pub use commands::{get_monthly_summaries, get_monthly_summary, get_overall_totals};
pub use models::{MonthlySummary, OverallTotals};
pub use service::{monthly_summaries, monthly_summary, overall_totals};
