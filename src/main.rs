use expense_tracker_lib::features::{expenses, statistics, sync};
use expense_tracker_lib::AppState;
use log::{error, info};
use std::process::ExitCode;

/// 起動時の処理（初期化後、引数に`sync`が指定されていれば同期を実行する）
///
/// 使い方: `expense-tracker [sync [URL]]`
#[tokio::main]
async fn main() -> ExitCode {
    let state = match AppState::initialize() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e.user_message());
            error!("アプリケーション初期化に失敗しました: {}", e.details());
            return ExitCode::FAILURE;
        }
    };

    if let Err(message) = expenses::initialize_database(&state).await {
        eprintln!("{message}");
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("sync") => {
            let result = sync::sync_expenses(&state, args.get(1).cloned()).await;
            println!("{}", result.message);
            if result.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        _ => match statistics::get_overall_totals(&state).await {
            Ok(totals) => {
                info!("有効な収支: {}件", totals.entry_count);
                println!(
                    "収入: {} / 支出: {} / 残高: {}",
                    totals.total_income, totals.total_expense, totals.balance
                );
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("{message}");
                ExitCode::FAILURE
            }
        },
    }
}
