use crate::features::expenses::list_active;
use crate::features::sync::api_client::CollectionClient;
use crate::features::sync::endpoint::validate_endpoint;
use crate::features::sync::models::{SyncPayload, SyncResult};
use crate::shared::errors::{AppError, AppResult};
use crate::AppState;
use futures::future::join_all;
use log::{info, warn};
use std::future::Future;

/// ローカルの有効な収支で同期先コレクションの内容を置き換える
///
/// # 処理内容
/// 1. 同期先URLの検証（無効な場合は通信せずに失敗を返す）
/// 2. 同期先の全要素を取得
/// 3. 同期先の全要素を並行して削除
/// 4. ローカルの有効な収支を取得（空の場合はここで成功を返す）
/// 5. 有効な収支を並行して作成
///
/// 3と5は全リクエストの完了を待ってから結果を判定する。一部が失敗した場合は
/// 同期全体を失敗として報告し、既に成功したリクエストは取り消さない。
///
/// # 戻り値
/// 同期結果（エラーは返さず、失敗も結果として報告する）
pub async fn sync_to_remote(state: &AppState, endpoint: &str) -> SyncResult {
    let url = match validate_endpoint(endpoint, &state.sync_config) {
        Ok(url) => url,
        Err(e) => {
            warn!("同期先URLの検証に失敗しました: {}", e.details());
            return SyncResult::failed(e.user_message());
        }
    };

    match replace_remote(state, url).await {
        Ok(0) => {
            info!("同期するローカルデータがありません");
            SyncResult::succeeded("同期するローカルデータがありません", 0)
        }
        Ok(count) => {
            info!("同期が完了しました: count={count}");
            SyncResult::succeeded(format!("{count}件の収支を同期しました"), count)
        }
        Err(e) => {
            log::error!("同期に失敗しました: {}", e.details());
            SyncResult::failed(format!("同期に失敗しました: {}", failure_reason(&e)))
        }
    }
}

async fn replace_remote(state: &AppState, url: url::Url) -> AppResult<usize> {
    let client = CollectionClient::new(url, state.sync_config.timeout_seconds)?;
    info!("同期を開始します: url={}", client.endpoint());

    let remote_items = client.list_items().await?;
    let deleted = run_batch(
        "削除",
        remote_items.iter().map(|item| client.delete_item(&item.id)),
    )
    .await?;
    info!("同期先の要素を削除しました: count={deleted}");

    let local_expenses = state.with_connection(list_active)?;
    if local_expenses.is_empty() {
        return Ok(0);
    }

    let payloads: Vec<SyncPayload> = local_expenses.iter().map(SyncPayload::from).collect();
    run_batch(
        "作成",
        payloads.iter().map(|payload| client.create_item(payload)),
    )
    .await
}

/// リクエストを並行して実行し、すべての完了を待つ
///
/// # 戻り値
/// 成功した件数、または一件でも失敗した場合は最初のエラー
async fn run_batch<I, F>(phase: &str, requests: I) -> AppResult<usize>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = AppResult<()>>,
{
    let results = join_all(requests).await;
    let total = results.len();

    let mut errors = results.into_iter().filter_map(Result::err);
    match errors.next() {
        None => Ok(total),
        Some(first) => {
            let failed = 1 + errors.count();
            warn!("{phase}リクエストの一部が失敗しました: failed={failed}/{total}");
            Err(first)
        }
    }
}

fn failure_reason(error: &AppError) -> String {
    match error {
        AppError::ExternalService(message) => message.clone(),
        other => other.user_message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::SyncConfig;

    #[tokio::test]
    async fn test_invalid_endpoint_fails_immediately() {
        let state = AppState::in_memory(SyncConfig::default()).unwrap();

        let result = sync_to_remote(&state, "https://x.mockapi.io/notes").await;
        assert!(!result.success);
        assert_eq!(result.synced_count, 0);
        assert!(result.message.contains("/expenses"));
    }

    #[tokio::test]
    async fn test_run_batch_reports_first_error_after_all_complete() {
        let results = vec![
            Ok(()),
            Err(AppError::ExternalService("一件目".to_string())),
            Err(AppError::ExternalService("二件目".to_string())),
        ];

        let error = run_batch("テスト", results.into_iter().map(std::future::ready))
            .await
            .unwrap_err();
        assert_eq!(failure_reason(&error), "一件目");
    }

    #[tokio::test]
    async fn test_run_batch_counts_successes() {
        let results: Vec<AppResult<()>> = vec![Ok(()), Ok(())];
        let count = run_batch("テスト", results.into_iter().map(std::future::ready))
            .await
            .unwrap();
        assert_eq!(count, 2);

        let empty: Vec<AppResult<()>> = Vec::new();
        let count = run_batch("テスト", empty.into_iter().map(std::future::ready))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
