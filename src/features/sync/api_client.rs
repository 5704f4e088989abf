//! 同期先コレクションAPIのクライアント
//!
//! GET（一覧）、DELETE（1件削除）、POST（1件作成）のみを扱う。
//! 自動リトライは行わない。

use crate::features::sync::models::{RemoteExpense, RemoteId, SyncPayload};
use crate::shared::errors::{AppError, AppResult};
use log::{debug, info, warn};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// 同期先コレクションAPIクライアント
pub struct CollectionClient {
    client: Client,
    endpoint: Url,
}

impl CollectionClient {
    /// 新しいクライアントを作成
    ///
    /// # 引数
    /// * `endpoint` - 検証済みのコレクションURL
    /// * `timeout_seconds` - タイムアウト（秒）。Noneの場合はHTTPクライアントの既定値
    pub fn new(endpoint: Url, timeout_seconds: Option<u64>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// コレクションURL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// コレクションの全要素を取得する
    pub async fn list_items(&self) -> AppResult<Vec<RemoteExpense>> {
        info!("GETリクエスト送信: url={}", self.endpoint);

        let response = self.client.get(self.endpoint.clone()).send().await?;
        let response = Self::ensure_success(response, "GET").await?;

        let body = response.text().await?;
        let items: Vec<RemoteExpense> = serde_json::from_str(&body)?;

        debug!("同期先の要素数: {}", items.len());
        Ok(items)
    }

    /// 要素を1件削除する
    ///
    /// # 引数
    /// * `id` - 同期先が採番したID
    pub async fn delete_item(&self, id: &RemoteId) -> AppResult<()> {
        let url = self.item_url(id);
        debug!("DELETEリクエスト送信: url={url}");

        let response = self.client.delete(&url).send().await?;
        Self::ensure_success(response, "DELETE").await?;

        Ok(())
    }

    /// 要素を1件作成する（レスポンスボディは使用しない）
    pub async fn create_item(&self, payload: &SyncPayload) -> AppResult<()> {
        debug!("POSTリクエスト送信: localId={}", payload.local_id);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        Self::ensure_success(response, "POST").await?;

        Ok(())
    }

    fn item_url(&self, id: &RemoteId) -> String {
        format!(
            "{}/{}",
            self.endpoint.as_str(),
            urlencoding::encode(&id.to_string())
        )
    }

    /// 成功ステータス以外をエラーに変換する
    async fn ensure_success(response: Response, method: &str) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        Err(Self::handle_error_response(response, method).await)
    }

    /// エラーレスポンスを処理し、詳細なエラー情報を提供
    async fn handle_error_response(response: Response, method: &str) -> AppError {
        let status_code = response.status().as_u16();

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        let user_message = match status_code {
            400 => "リクエストの形式が正しくありません",
            401 | 403 => "同期先へのアクセスが拒否されました",
            404 => "指定されたリソースが見つかりません",
            413 => "データサイズが制限を超えています",
            429 => "リクエストが多すぎます。しばらく待ってから再試行してください",
            500 => "サーバー内部エラーが発生しました",
            502 => "同期先との通信でエラーが発生しました",
            503 => "同期先が一時的に利用できません",
            504 => "同期先からの応答がタイムアウトしました",
            _ => "不明なエラーが発生しました",
        };

        warn!("{method}リクエスト失敗: status={status_code}, body={response_text}");

        AppError::external_service(
            format!("{method}リクエスト"),
            format!("HTTP {status_code} - {user_message}"),
        )
    }
}
