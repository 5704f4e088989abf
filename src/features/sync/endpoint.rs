use crate::shared::config::SyncConfig;
use crate::shared::errors::{AppError, AppResult};
use url::Url;

/// 同期先URLを検証する
///
/// ホストが許可ドメイン（またはそのサブドメイン）であり、最後のパスセグメントが
/// リソース名と一致する場合のみ受け付ける。末尾にスラッシュが付いたURLは
/// 最後のセグメントが空になるため受け付けない。
///
/// # 引数
/// * `endpoint` - 同期先URL
/// * `config` - 同期設定
///
/// # 戻り値
/// 解析済みのURL、または無効な場合は検証エラー
pub fn validate_endpoint(endpoint: &str, config: &SyncConfig) -> AppResult<Url> {
    let url = Url::parse(endpoint.trim()).map_err(|_| invalid_endpoint(config))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_endpoint(config));
    }

    let host_matches = url.host_str().is_some_and(|host| {
        let host = host.to_ascii_lowercase();
        let domain = config.allowed_domain.to_ascii_lowercase();
        host == domain || host.ends_with(&format!(".{domain}"))
    });
    if !host_matches {
        return Err(invalid_endpoint(config));
    }

    let last_segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back());
    if last_segment != Some(config.resource_name.as_str()) {
        return Err(invalid_endpoint(config));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid_endpoint(config));
    }

    Ok(url)
}

fn invalid_endpoint(config: &SyncConfig) -> AppError {
    AppError::validation(format!(
        "同期先URLが不正です。{}の.../{}形式のURLを指定してください",
        config.allowed_domain, config.resource_name
    ))
}
