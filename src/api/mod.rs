//! REST Client Wrappers
//!
//! Thin bindings to the backend API, organized by resource. Each function
//! issues one authenticated request and returns unwrapped data or a typed
//! `ApiError`.

mod error;
mod http;

pub mod analysis;
pub mod consumptions;
pub mod inputs;
pub mod orders;
pub mod pallets;
pub mod productions;
pub mod products;
pub mod punches;

pub use error::{ApiError, ApiResult};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

// ========================
// Response Envelopes
// ========================

/// Pagination metadata carried by list responses
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageMeta {
    #[serde(rename = "currentPage", default)]
    pub current_page: Option<u32>,
    #[serde(rename = "lastPage", default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        match (self.current_page, self.last_page) {
            (Some(current), Some(last)) => current < last,
            _ => false,
        }
    }
}

/// Unwrapped list response
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

fn check(status: u16, body: Value, fallback: &str) -> ApiResult<Value> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(error::from_status(status, &body, fallback))
    }
}

/// Unwrap `{ data: {...} }` into the record.
pub(crate) fn decode_record<T: DeserializeOwned>(
    status: u16,
    body: Value,
    fallback: &str,
) -> ApiResult<T> {
    let body = check(status, body, fallback)?;
    let data = match body {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Object(map)),
        other => other,
    };
    serde_json::from_value(data).map_err(|_| ApiError::Decode(fallback.to_string()))
}

/// Unwrap `{ data: [...], links, meta }` into items plus pagination.
pub(crate) fn decode_list<T: DeserializeOwned>(
    status: u16,
    body: Value,
    fallback: &str,
) -> ApiResult<Paged<T>> {
    let body = check(status, body, fallback)?;
    let items = body
        .get("data")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|_| ApiError::Decode(fallback.to_string()))?
        .unwrap_or_default();
    let meta = body
        .get("meta")
        .cloned()
        .and_then(|meta| serde_json::from_value(meta).ok())
        .unwrap_or_default();
    Ok(Paged { items, meta })
}

/// Discard the body of a delete confirmation.
pub(crate) fn decode_unit(status: u16, body: Value, fallback: &str) -> ApiResult<()> {
    check(status, body, fallback).map(|_| ())
}

// ========================
// Bulk Endpoints
// ========================

/// Per-item entry of a bulk response. The created record sits under a
/// resource-named key (`punch`, `input`), kept as raw JSON here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkRow {
    pub index: u32,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub record: serde_json::Map<String, Value>,
}

/// Summary returned by bulk create endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkReport {
    pub created: u32,
    pub failed: u32,
    #[serde(default)]
    pub results: Vec<BulkRow>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl BulkReport {
    pub fn all_created(&self) -> bool {
        self.failed == 0
    }

    /// Aggregate line for notifications, e.g. "3 de 5 líneas rechazadas".
    pub fn failure_summary(&self) -> Option<String> {
        if self.failed == 0 {
            return None;
        }
        Some(format!(
            "{} de {} líneas rechazadas",
            self.failed,
            self.created + self.failed
        ))
    }
}

/// Three-way bulk status mapping: 201 is full success, 200 without nested
/// counts is a server-side rollback, 422 is a full validation failure.
pub(crate) fn decode_bulk(status: u16, body: Value, fallback: &str) -> ApiResult<BulkReport> {
    match status {
        200 | 201 => {
            let data = body.get("data");
            let has_counts = data
                .map(|d| d.get("created").is_some() || d.get("failed").is_some())
                .unwrap_or(false);
            if status == 200 && !has_counts {
                return Err(ApiError::ServerRollback {
                    message: error::display_message(&body, fallback),
                });
            }
            let payload = data.cloned().unwrap_or(body);
            serde_json::from_value(payload).map_err(|_| ApiError::Decode(fallback.to_string()))
        }
        _ => Err(error::from_status(status, &body, fallback)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductionInput;
    use serde_json::json;

    fn input_json(id: u32) -> Value {
        json!({
            "id": id,
            "productionId": 4,
            "palletId": 9,
            "boxId": 2,
            "productId": 11,
            "productName": "Merluza",
            "weightKg": 18.4,
            "lot": "L1"
        })
    }

    #[test]
    fn test_decode_list_unwraps_data_and_meta() {
        let body = json!({
            "data": [input_json(1), input_json(2)],
            "links": { "next": null },
            "meta": { "currentPage": 1, "lastPage": 3, "total": 41 }
        });
        let page: Paged<ProductionInput> = decode_list(200, body, "fallback").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.meta.total, Some(41));
        assert!(page.meta.has_next());
    }

    #[test]
    fn test_decode_record_unwraps_data() {
        let body = json!({ "data": input_json(7) });
        let record: ProductionInput = decode_record(200, body, "fallback").unwrap();
        assert_eq!(record.id, 7);
    }

    #[test]
    fn test_decode_record_maps_error_status() {
        let body = json!({ "message": "no such production" });
        let result: ApiResult<ProductionInput> = decode_record(404, body, "fallback");
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }

    #[test]
    fn test_bulk_201_is_full_success() {
        let body = json!({
            "data": {
                "created": 2,
                "failed": 0,
                "results": [
                    { "index": 0, "success": true, "punch": { "id": 1 } },
                    { "index": 1, "success": true, "punch": { "id": 2 } }
                ],
                "errors": []
            }
        });
        let report = decode_bulk(201, body, "fallback").unwrap();
        assert!(report.all_created());
        assert_eq!(report.results.len(), 2);
        assert!(report.results[0].record.contains_key("punch"));
    }

    #[test]
    fn test_bulk_200_without_counts_is_rollback() {
        let body = json!({ "message": "Batch rejected, nothing was saved" });
        match decode_bulk(200, body, "fallback") {
            Err(ApiError::ServerRollback { message }) => {
                assert_eq!(message, "Batch rejected, nothing was saved");
            }
            other => panic!("expected rollback, got {:?}", other),
        }
    }

    #[test]
    fn test_bulk_200_with_counts_reports_partial_detail() {
        let body = json!({
            "data": {
                "created": 1,
                "failed": 1,
                "results": [
                    { "index": 0, "success": true, "punch": { "id": 1 } },
                    { "index": 1, "success": false, "error": "empleado desconocido" }
                ],
                "errors": ["empleado desconocido"]
            }
        });
        let report = decode_bulk(200, body, "fallback").unwrap();
        assert_eq!(report.failure_summary().as_deref(), Some("1 de 2 líneas rechazadas"));
        assert_eq!(report.results[1].error.as_deref(), Some("empleado desconocido"));
    }

    #[test]
    fn test_bulk_422_is_validation() {
        let body = json!({ "message": "Datos no válidos", "errors": ["fila 2: hora incompleta"] });
        assert!(matches!(
            decode_bulk(422, body, "fallback"),
            Err(ApiError::Validation { .. })
        ));
    }
}
