//! Production Input Bindings

use serde::Serialize;

use super::http::{delete, dispatch, dispatch_json, get, post, put};
use super::{decode_bulk, decode_list, decode_record, decode_unit};
use super::{ApiResult, BulkReport, Paged};
use crate::context::ApiConfig;
use crate::models::{BoxRecord, ProductionInput};

const LIST_FALLBACK: &str = "Error al obtener las entradas de producción";
const CREATE_FALLBACK: &str = "Error al registrar la entrada";
const UPDATE_FALLBACK: &str = "Error al actualizar la entrada";
const DELETE_FALLBACK: &str = "Error al eliminar la entrada";
const BULK_CREATE_FALLBACK: &str = "Error al registrar las entradas";
const BULK_DELETE_FALLBACK: &str = "Error al vaciar las entradas";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInput {
    #[serde(rename = "palletId")]
    pub pallet_id: u32,
    #[serde(rename = "boxId")]
    pub box_id: u32,
    #[serde(rename = "productId")]
    pub product_id: u32,
    #[serde(rename = "weightKg")]
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewInput {
    pub fn from_box(chosen: &BoxRecord, notes: Option<String>) -> Self {
        Self {
            pallet_id: chosen.pallet_id,
            box_id: chosen.id,
            product_id: chosen.product_id,
            weight_kg: chosen.weight_kg,
            lot: chosen.lot.clone(),
            notes,
        }
    }

    pub fn from_saved(saved: &ProductionInput) -> Self {
        Self {
            pallet_id: saved.pallet_id,
            box_id: saved.box_id,
            product_id: saved.product_id,
            weight_kg: saved.weight_kg,
            lot: saved.lot.clone(),
            notes: saved.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateInput {
    #[serde(rename = "weightKg", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize)]
struct BulkBody<'a> {
    inputs: &'a [NewInput],
}

pub async fn list(cfg: &ApiConfig, production_id: u32) -> ApiResult<Paged<ProductionInput>> {
    let path = format!("productions/{}/inputs", production_id);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_list(status, body, LIST_FALLBACK)
}

pub async fn create(
    cfg: &ApiConfig,
    production_id: u32,
    payload: &NewInput,
) -> ApiResult<ProductionInput> {
    let path = format!("productions/{}/inputs", production_id);
    let (status, body) = dispatch_json(post(cfg, &path), payload).await?;
    decode_record(status, body, CREATE_FALLBACK)
}

pub async fn update(
    cfg: &ApiConfig,
    production_id: u32,
    input_id: u32,
    payload: &UpdateInput,
) -> ApiResult<ProductionInput> {
    let path = format!("productions/{}/inputs/{}", production_id, input_id);
    let (status, body) = dispatch_json(put(cfg, &path), payload).await?;
    decode_record(status, body, UPDATE_FALLBACK)
}

pub async fn remove(cfg: &ApiConfig, production_id: u32, input_id: u32) -> ApiResult<()> {
    let path = format!("productions/{}/inputs/{}", production_id, input_id);
    let (status, body) = dispatch(delete(cfg, &path)).await?;
    decode_unit(status, body, DELETE_FALLBACK)
}

pub async fn bulk_create(
    cfg: &ApiConfig,
    production_id: u32,
    items: &[NewInput],
) -> ApiResult<BulkReport> {
    let path = format!("productions/{}/inputs/bulk", production_id);
    let (status, body) = dispatch_json(post(cfg, &path), &BulkBody { inputs: items }).await?;
    decode_bulk(status, body, BULK_CREATE_FALLBACK)
}

/// Delete every input of the production record.
pub async fn bulk_delete(cfg: &ApiConfig, production_id: u32) -> ApiResult<()> {
    let path = format!("productions/{}/inputs", production_id);
    let (status, body) = dispatch(delete(cfg, &path)).await?;
    decode_unit(status, body, BULK_DELETE_FALLBACK)
}
