//! Employee Punch Bindings

use chrono::NaiveDate;
use serde::Serialize;

use super::http::{dispatch, dispatch_json, get, post};
use super::{decode_bulk, decode_list};
use super::{ApiResult, BulkReport, Paged};
use crate::context::ApiConfig;
use crate::models::{Punch, PunchRow, WorkerStats};

const LIST_FALLBACK: &str = "Error al obtener los fichajes";
const BULK_FALLBACK: &str = "Error al registrar los fichajes";
const STATS_FALLBACK: &str = "Error al obtener estadísticas de trabajadores";

#[derive(Serialize)]
struct BulkBody<'a> {
    punches: &'a [PunchRow],
}

pub async fn list(cfg: &ApiConfig, from: NaiveDate, to: NaiveDate) -> ApiResult<Paged<Punch>> {
    let path = format!("punches?from={}&to={}", from, to);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_list(status, body, LIST_FALLBACK)
}

/// Upload a batch of punches. The server applies the whole batch or rolls it
/// back; the report distinguishes both from a full validation failure.
pub async fn bulk_create(cfg: &ApiConfig, rows: &[PunchRow]) -> ApiResult<BulkReport> {
    let (status, body) = dispatch_json(post(cfg, "punches/bulk"), &BulkBody { punches: rows }).await?;
    decode_bulk(status, body, BULK_FALLBACK)
}

pub async fn worker_stats(
    cfg: &ApiConfig,
    from: NaiveDate,
    to: NaiveDate,
) -> ApiResult<Vec<WorkerStats>> {
    let path = format!("punches/stats?from={}&to={}", from, to);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_list(status, body, STATS_FALLBACK).map(|page| page.items)
}
