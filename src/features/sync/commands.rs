use crate::features::sync::models::SyncResult;
use crate::features::sync::service;
use crate::AppState;

/// 同期先へ有効な収支を同期する
///
/// URLが未入力（空白のみを含む）の場合は設定の既定URLを使用する。
/// 同期中に再度呼び出された場合は通信せずに失敗を返す。
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `url` - 同期先URL
///
/// # 戻り値
/// 同期結果
pub async fn sync_expenses(state: &AppState, url: Option<String>) -> SyncResult {
    let endpoint = match url.filter(|u| !u.trim().is_empty()) {
        Some(url) => url,
        None => match &state.sync_config.default_api_url {
            Some(default_url) => default_url.clone(),
            None => {
                log::warn!("同期先URLが指定されていません");
                return SyncResult::failed("同期先URLを入力してください");
            }
        },
    };

    let Some(_guard) = state.try_begin_sync() else {
        log::warn!("同期処理が既に実行中です");
        return SyncResult::failed("同期処理は既に実行中です");
    };

    service::sync_to_remote(state, &endpoint).await
}
