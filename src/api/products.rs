//! Product Catalog Bindings

use super::http::{dispatch, get};
use super::{decode_list, ApiResult, Paged};
use crate::context::ApiConfig;
use crate::models::Product;

const LIST_FALLBACK: &str = "Error al obtener los productos";

pub async fn list(cfg: &ApiConfig) -> ApiResult<Paged<Product>> {
    let (status, body) = dispatch(get(cfg, "products")).await?;
    decode_list(status, body, LIST_FALLBACK)
}
