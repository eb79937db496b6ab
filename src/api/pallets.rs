//! Pallet Bindings

use super::http::{dispatch, get};
use super::{decode_list, decode_record};
use super::{ApiResult, Paged};
use crate::context::ApiConfig;
use crate::models::Pallet;

const LIST_FALLBACK: &str = "Error al obtener los palets";
const GET_FALLBACK: &str = "Error al obtener el palet";

/// List pallets with their loaded boxes. With `only_available` the server
/// omits boxes already consumed elsewhere.
pub async fn list(cfg: &ApiConfig, only_available: bool) -> ApiResult<Paged<Pallet>> {
    let path = if only_available {
        "pallets?available=1"
    } else {
        "pallets"
    };
    let (status, body) = dispatch(get(cfg, path)).await?;
    decode_list(status, body, LIST_FALLBACK)
}

pub async fn fetch(cfg: &ApiConfig, pallet_id: u32) -> ApiResult<Pallet> {
    let path = format!("pallets/{}", pallet_id);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_record(status, body, GET_FALLBACK)
}
