//! Shared HTTP Plumbing
//!
//! Every binding issues one fire-and-forget authenticated request through
//! these helpers. No retries, no caching, no deduplication at this layer.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

use super::error::{ApiError, ApiResult};
use crate::context::ApiConfig;

const USER_AGENT: &str = concat!("pesquera-admin-ui/", env!("CARGO_PKG_VERSION"));

pub(crate) fn url(cfg: &ApiConfig, path: &str) -> String {
    format!(
        "{}/{}",
        cfg.base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub(crate) fn authed(builder: RequestBuilder, cfg: &ApiConfig) -> RequestBuilder {
    builder
        .header("Accept", "application/json")
        .header("User-Agent", USER_AGENT)
        .header("Authorization", &format!("Bearer {}", cfg.token))
}

pub(crate) fn get(cfg: &ApiConfig, path: &str) -> RequestBuilder {
    authed(Request::get(&url(cfg, path)), cfg)
}

pub(crate) fn post(cfg: &ApiConfig, path: &str) -> RequestBuilder {
    authed(Request::post(&url(cfg, path)), cfg)
}

pub(crate) fn put(cfg: &ApiConfig, path: &str) -> RequestBuilder {
    authed(Request::put(&url(cfg, path)), cfg)
}

pub(crate) fn delete(cfg: &ApiConfig, path: &str) -> RequestBuilder {
    authed(Request::delete(&url(cfg, path)), cfg)
}

async fn read(response: Response) -> (u16, Value) {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Send a bodiless request and collect `(status, parsed body)`.
pub(crate) async fn dispatch(builder: RequestBuilder) -> ApiResult<(u16, Value)> {
    let response = builder.send().await.map_err(ApiError::network)?;
    Ok(read(response).await)
}

/// Send a request with a JSON body and collect `(status, parsed body)`.
pub(crate) async fn dispatch_json<B: Serialize + ?Sized>(
    builder: RequestBuilder,
    body: &B,
) -> ApiResult<(u16, Value)> {
    let request = builder.json(body).map_err(ApiError::network)?;
    let response = request.send().await.map_err(ApiError::network)?;
    Ok(read(response).await)
}
