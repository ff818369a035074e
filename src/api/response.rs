use serde::Serialize;
use serde_json::Value;
use axum::Json;
use axum::http::StatusCode;

/// Body of every error response. Only `error` is always present.
#[derive(Serialize, Debug)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code_from_external: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_api_response_body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            status_code_from_external: None,
            external_api_response_body: None,
            content_preview: None,
        }
    }
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn error(status: StatusCode, envelope: ErrorEnvelope) -> (StatusCode, Json<ErrorEnvelope>) {
    (status, Json(envelope))
}
