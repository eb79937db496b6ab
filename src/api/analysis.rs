//! Time Sheet Analysis Bindings
//!
//! Scanned time-sheet PDFs are analyzed server side. Submission answers with
//! an operation location which is then polled on a fixed interval until a
//! terminal status, bounded by an attempt budget and the caller's cancel
//! token.

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;
use serde_json::Value;

use super::http::{authed, url};
use super::{decode_record, ApiError, ApiResult};
use crate::cancel::CancelToken;
use crate::context::ApiConfig;
use crate::models::PunchRow;

const SUBMIT_FALLBACK: &str = "Error al enviar el parte de horas";
const POLL_FALLBACK: &str = "Error al analizar el parte de horas";

pub const POLL_INTERVAL_MS: u32 = 2_000;
/// 150 attempts at 2 s is a five minute deadline.
pub const MAX_POLL_ATTEMPTS: u32 = 150;

#[derive(Debug, Clone, Deserialize)]
struct OperationLocation {
    location: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OperationState {
    status: String,
    #[serde(default)]
    punches: Vec<PunchRow>,
    #[serde(default)]
    message: Option<String>,
}

/// Upload a time-sheet PDF; answers the operation location to poll.
pub async fn submit(cfg: &ApiConfig, file: &web_sys::File) -> ApiResult<String> {
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::Network("no se pudo preparar el formulario".to_string()))?;
    form.append_with_blob("file", file)
        .map_err(|_| ApiError::Network("no se pudo adjuntar el archivo".to_string()))?;

    let request = authed(Request::post(&url(cfg, "analysis/punch-sheets")), cfg)
        .body(form)
        .map_err(ApiError::network)?;
    let response = request.send().await.map_err(ApiError::network)?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    decode_record::<OperationLocation>(status, body, SUBMIT_FALLBACK).map(|op| op.location)
}

/// Poll the operation until it succeeds, fails, is cancelled, or the attempt
/// budget runs out.
pub async fn poll(
    cfg: &ApiConfig,
    location: &str,
    cancel: &CancelToken,
) -> ApiResult<Vec<PunchRow>> {
    for attempt in 0..MAX_POLL_ATTEMPTS {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        if attempt > 0 {
            TimeoutFuture::new(POLL_INTERVAL_MS).await;
            if cancel.is_cancelled() {
                return Err(ApiError::Cancelled);
            }
        }

        let response = authed(Request::get(&url(cfg, location)), cfg)
            .send()
            .await
            .map_err(ApiError::network)?;
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let op: OperationState = decode_record(status, body, POLL_FALLBACK)?;

        match op.status.as_str() {
            "succeeded" => return Ok(op.punches),
            "failed" => {
                return Err(ApiError::Server {
                    status,
                    message: op.message.unwrap_or_else(|| POLL_FALLBACK.to_string()),
                })
            }
            _ => {}
        }
    }
    Err(ApiError::Timeout)
}
