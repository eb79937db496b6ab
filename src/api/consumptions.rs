//! Output Consumption Bindings
//!
//! Consumptions of an upstream production's output. Besides row-level CRUD
//! the backend may expose a bulk `sync` endpoint describing the desired end
//! state; callers fall back to row-level calls when it answers 404.

use serde::Serialize;

use super::http::{delete, dispatch, dispatch_json, get, post, put};
use super::{decode_list, decode_record, decode_unit};
use super::{ApiResult, Paged};
use crate::context::ApiConfig;
use crate::models::{ConsumptionRow, OutputConsumption};

const LIST_FALLBACK: &str = "Error al obtener los consumos";
const CREATE_FALLBACK: &str = "Error al registrar el consumo";
const UPDATE_FALLBACK: &str = "Error al actualizar el consumo";
const DELETE_FALLBACK: &str = "Error al eliminar el consumo";
const SYNC_FALLBACK: &str = "Error al sincronizar los consumos";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionPayload {
    #[serde(rename = "productId")]
    pub product_id: u32,
    #[serde(rename = "weightKg")]
    pub weight_kg: f64,
    pub boxes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ConsumptionPayload {
    /// Rows reach this constructor already validated; a missing product id
    /// would be a caller bug, mapped to 0 so the server rejects it loudly.
    pub fn from_row(row: &ConsumptionRow) -> Self {
        Self {
            product_id: row.product_id.unwrap_or(0),
            weight_kg: row.weight_kg,
            boxes: row.boxes,
            lot: row.lot.clone(),
            notes: row.notes.clone(),
        }
    }
}

/// One line of the desired end state sent to the sync endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(flatten)]
    pub payload: ConsumptionPayload,
}

impl SyncRow {
    pub fn from_row(row: &ConsumptionRow) -> Self {
        Self {
            id: row.row_id.saved_id(),
            payload: ConsumptionPayload::from_row(row),
        }
    }
}

#[derive(Serialize)]
struct SyncBody<'a> {
    consumptions: &'a [SyncRow],
}

pub async fn list(cfg: &ApiConfig, production_id: u32) -> ApiResult<Paged<OutputConsumption>> {
    let path = format!("productions/{}/consumptions", production_id);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_list(status, body, LIST_FALLBACK)
}

pub async fn create(
    cfg: &ApiConfig,
    production_id: u32,
    payload: &ConsumptionPayload,
) -> ApiResult<OutputConsumption> {
    let path = format!("productions/{}/consumptions", production_id);
    let (status, body) = dispatch_json(post(cfg, &path), payload).await?;
    decode_record(status, body, CREATE_FALLBACK)
}

pub async fn update(
    cfg: &ApiConfig,
    production_id: u32,
    consumption_id: u32,
    payload: &ConsumptionPayload,
) -> ApiResult<OutputConsumption> {
    let path = format!("productions/{}/consumptions/{}", production_id, consumption_id);
    let (status, body) = dispatch_json(put(cfg, &path), payload).await?;
    decode_record(status, body, UPDATE_FALLBACK)
}

pub async fn remove(cfg: &ApiConfig, production_id: u32, consumption_id: u32) -> ApiResult<()> {
    let path = format!("productions/{}/consumptions/{}", production_id, consumption_id);
    let (status, body) = dispatch(delete(cfg, &path)).await?;
    decode_unit(status, body, DELETE_FALLBACK)
}

/// Describe the desired end state in one call. Answers 404 on backends that
/// predate the endpoint.
pub async fn sync(cfg: &ApiConfig, production_id: u32, rows: &[SyncRow]) -> ApiResult<()> {
    let path = format!("productions/{}/consumptions/sync", production_id);
    let (status, body) = dispatch_json(post(cfg, &path), &SyncBody { consumptions: rows }).await?;
    decode_unit(status, body, SYNC_FALLBACK)
}
