//! API Error Type
//!
//! One typed error produced at the HTTP boundary. Downstream code switches
//! on the variant, never on message substrings.

use std::fmt;

use serde_json::Value;

/// Result alias for all client bindings
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, abort)
    Network(String),
    /// The response arrived but its body did not match the expected shape
    Decode(String),
    NotFound { message: String },
    Validation { message: String, details: Vec<String> },
    /// 200 carrying a top-level message instead of per-item results: the
    /// server rolled the whole batch back
    ServerRollback { message: String },
    Server { status: u16, message: String },
    Cancelled,
    /// Polling gave up after the attempt budget
    Timeout,
}

impl ApiError {
    pub fn network(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Message suitable for direct display in a notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(msg) => format!("No se pudo contactar con el servidor: {}", msg),
            ApiError::Decode(msg) => msg.clone(),
            ApiError::NotFound { message }
            | ApiError::Validation { message, .. }
            | ApiError::ServerRollback { message }
            | ApiError::Server { message, .. } => message.clone(),
            ApiError::Cancelled => "Operación cancelada".to_string(),
            ApiError::Timeout => "El servidor tardó demasiado en responder".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
            ApiError::NotFound { message } => write!(f, "not found: {}", message),
            ApiError::Validation { message, details } => {
                write!(f, "validation failed: {}", message)?;
                for detail in details {
                    write!(f, "; {}", detail)?;
                }
                Ok(())
            }
            ApiError::ServerRollback { message } => write!(f, "batch rolled back: {}", message),
            ApiError::Server { status, message } => write!(f, "server error {}: {}", status, message),
            ApiError::Cancelled => write!(f, "cancelled"),
            ApiError::Timeout => write!(f, "timed out"),
        }
    }
}

impl std::error::Error for ApiError {}

fn string_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

/// Display message for an error response: server-provided `userMessage`
/// first, then `message`, then the per-operation fallback.
pub(crate) fn display_message(body: &Value, fallback: &str) -> String {
    string_field(body, "userMessage")
        .or_else(|| string_field(body, "message"))
        .unwrap_or(fallback)
        .to_string()
}

fn validation_details(body: &Value) -> Vec<String> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|e| match e.as_str() {
                    Some(s) => s.to_string(),
                    None => e.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Convert a non-success HTTP status into the typed error.
pub(crate) fn from_status(status: u16, body: &Value, fallback: &str) -> ApiError {
    let message = display_message(body, fallback);
    match status {
        404 => ApiError::NotFound { message },
        422 => ApiError::Validation {
            message,
            details: validation_details(body),
        },
        _ => ApiError::Server { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_prefers_server_user_facing_field() {
        let body = json!({ "message": "constraint violated", "userMessage": "El palet ya no existe" });
        let err = from_status(500, &body, "Error al guardar");
        assert_eq!(err.user_message(), "El palet ya no existe");
    }

    #[test]
    fn test_fallback_when_body_is_empty() {
        let err = from_status(500, &Value::Null, "Error al obtener estadísticas de trabajadores");
        assert_eq!(err.user_message(), "Error al obtener estadísticas de trabajadores");
    }

    #[test]
    fn test_404_maps_to_not_found_kind() {
        let err = from_status(404, &json!({ "message": "Not Found" }), "fallback");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_422_collects_detail_list() {
        let body = json!({
            "message": "Datos no válidos",
            "errors": ["peso obligatorio", { "field": "lot" }]
        });
        match from_status(422, &body, "fallback") {
            ApiError::Validation { message, details } => {
                assert_eq!(message, "Datos no válidos");
                assert_eq!(details.len(), 2);
                assert_eq!(details[0], "peso obligatorio");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
