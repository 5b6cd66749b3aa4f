use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::provider::ProviderError;

// Every failure is handled at the request boundary and rendered as a JSON
// { "error": ... } body. Unexpected failures are logged and surfaced as a
// generic 500 so internals never leak to the page.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Rate limit exceeded. Retry in {retry_after_secs}s.")]
    RateLimited { retry_after_secs: u64 },
    #[error("{0} not configured on server.")]
    MissingApiKey(&'static str),
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error("Internal Server Error")]
    Internal(#[source] ProviderError),
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Status { status, message } => ApiError::Upstream { status, message },
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::MissingApiKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Internal(source) => {
                tracing::error!(error = %source, "extract request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
