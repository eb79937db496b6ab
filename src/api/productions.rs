//! Production Record Bindings

use super::http::{dispatch, get};
use super::{decode_list, decode_record};
use super::{ApiResult, Paged};
use crate::context::ApiConfig;
use crate::models::Production;

const LIST_FALLBACK: &str = "Error al obtener las producciones";
const GET_FALLBACK: &str = "Error al obtener la producción";

pub async fn list(cfg: &ApiConfig, page: u32) -> ApiResult<Paged<Production>> {
    let path = format!("productions?page={}", page);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_list(status, body, LIST_FALLBACK)
}

pub async fn fetch(cfg: &ApiConfig, production_id: u32) -> ApiResult<Production> {
    let path = format!("productions/{}", production_id);
    let (status, body) = dispatch(get(cfg, &path)).await?;
    decode_record(status, body, GET_FALLBACK)
}
