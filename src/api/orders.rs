//! Order Bindings

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use super::http::{delete, dispatch, dispatch_json, get, post, put};
use super::{decode_list, decode_record, decode_unit};
use super::{ApiResult, Paged};
use crate::context::ApiConfig;
use crate::models::{Order, PlannedDetail, ProductionDetail};

const LIST_FALLBACK: &str = "Error al obtener los pedidos";
const GET_FALLBACK: &str = "Error al obtener el pedido";
const PLANNED_FALLBACK: &str = "Error al obtener las líneas previstas";
const PRODUCED_FALLBACK: &str = "Error al obtener las líneas producidas";
const CREATE_FALLBACK: &str = "Error al crear la línea prevista";
const UPDATE_FALLBACK: &str = "Error al actualizar la línea prevista";
const DELETE_FALLBACK: &str = "Error al eliminar la línea prevista";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedPayload {
    #[serde(rename = "productId")]
    pub product_id: u32,
    #[serde(rename = "quantityKg")]
    pub quantity_kg: f64,
}

pub async fn list(cfg: &ApiConfig, page: u32, search: Option<&str>) -> ApiResult<Paged<Order>> {
    let mut path = format!("orders?page={}", page);
    if let Some(term) = search.filter(|t| !t.is_empty()) {
        path.push_str("&search=");
        path.push_str(&utf8_percent_encode(term, NON_ALPHANUMERIC).to_string());
    }
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_list(status, body, LIST_FALLBACK)
}

pub async fn fetch(cfg: &ApiConfig, order_id: u32) -> ApiResult<Order> {
    let path = format!("orders/{}", order_id);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_record(status, body, GET_FALLBACK)
}

pub async fn planned_details(cfg: &ApiConfig, order_id: u32) -> ApiResult<Paged<PlannedDetail>> {
    let path = format!("orders/{}/planned-details", order_id);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_list(status, body, PLANNED_FALLBACK)
}

pub async fn production_details(
    cfg: &ApiConfig,
    order_id: u32,
) -> ApiResult<Paged<ProductionDetail>> {
    let path = format!("orders/{}/production-details", order_id);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_list(status, body, PRODUCED_FALLBACK)
}

pub async fn create_planned(
    cfg: &ApiConfig,
    order_id: u32,
    payload: &PlannedPayload,
) -> ApiResult<PlannedDetail> {
    let path = format!("orders/{}/planned-details", order_id);
    let (status, body) = dispatch_json(post(cfg, &path), payload).await?;
    decode_record(status, body, CREATE_FALLBACK)
}

pub async fn update_planned(
    cfg: &ApiConfig,
    order_id: u32,
    detail_id: u32,
    payload: &PlannedPayload,
) -> ApiResult<PlannedDetail> {
    let path = format!("orders/{}/planned-details/{}", order_id, detail_id);
    let (status, body) = dispatch_json(put(cfg, &path), payload).await?;
    decode_record(status, body, UPDATE_FALLBACK)
}

pub async fn delete_planned(cfg: &ApiConfig, order_id: u32, detail_id: u32) -> ApiResult<()> {
    let path = format!("orders/{}/planned-details/{}", order_id, detail_id);
    let (status, body) = dispatch(delete(cfg, &path)).await?;
    decode_unit(status, body, DELETE_FALLBACK)
}
