use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::response::{self, ErrorEnvelope};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing 'url' parameter in the query string.")]
    MissingUrl,

    #[error("Failed to connect to external API.")]
    UpstreamUnreachable { details: String },

    #[error("Request to external API timed out.")]
    UpstreamTimeout { details: String },

    #[error("Failed to fetch data from external API due to HTTP error.")]
    UpstreamStatus {
        details: String,
        status: u16,
        body: Value,
    },

    #[error("The external API did not return valid JSON.")]
    UpstreamMalformed { status: u16, preview: String },

    #[error("An unexpected error occurred while fetching data.")]
    UpstreamTransport { details: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingUrl => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnreachable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamStatus { .. } | AppError::UpstreamMalformed { .. } => {
                StatusCode::BAD_GATEWAY
            }
            AppError::UpstreamTransport { .. } | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn into_envelope(self) -> ErrorEnvelope {
        let mut envelope = ErrorEnvelope::new(self.to_string());
        match self {
            AppError::MissingUrl | AppError::Config(_) => {}
            AppError::UpstreamUnreachable { details }
            | AppError::UpstreamTimeout { details }
            | AppError::UpstreamTransport { details } => {
                envelope.details = Some(details);
            }
            AppError::UpstreamStatus { details, status, body } => {
                envelope.details = Some(details);
                envelope.status_code_from_external = Some(status);
                envelope.external_api_response_body = Some(body);
            }
            AppError::UpstreamMalformed { status, preview } => {
                envelope.status_code_from_external = Some(status);
                envelope.content_preview = Some(preview);
            }
        }
        envelope
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        response::error(status, self.into_envelope()).into_response()
    }
}

/// Transport failures only; HTTP status errors are classified from the response itself.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let details = err.to_string();
        // Connect timeouts count as connection failures, so check is_connect first.
        if err.is_connect() {
            AppError::UpstreamUnreachable { details }
        } else if err.is_timeout() {
            AppError::UpstreamTimeout { details }
        } else {
            AppError::UpstreamTransport { details }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
