use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_TOTAL, UPSTREAM_ERRORS, UPSTREAM_LATENCY};
use crate::models::{ExtractRequest, ExtractResponse};
use crate::prompt;
use crate::rate_limit::Decision;
use crate::state::AppState;

// Rate-limiter identity: forwarded-for header first, then the transport
// peer address, then one shared bucket for everything unidentified.
fn client_identity(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }
    match peer {
        Some(addr) => addr.ip().to_string(),
        None => "global".to_string(),
    }
}

pub async fn extract_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    REQUEST_TOTAL.inc();

    let identity = client_identity(&headers, Some(peer));
    if let Decision::Reject { retry_after_secs } = state.limiter.check(&identity) {
        RATE_LIMITED_TOTAL.inc();
        return Err(ApiError::RateLimited { retry_after_secs });
    }

    // The credential is resolved per request, not at startup; a missing key
    // makes this request a server misconfiguration failure.
    let key_var = state.provider.kind().key_var();
    let api_key = std::env::var(key_var).map_err(|_| ApiError::MissingApiKey(key_var))?;

    let rendered = prompt::render(&payload);
    let started = Instant::now();
    let result = state.provider.complete(&api_key, &rendered).await;
    UPSTREAM_LATENCY.observe(started.elapsed().as_secs_f64());

    match result {
        Ok(text) => Ok(Json(ExtractResponse { text })),
        Err(e) => {
            UPSTREAM_ERRORS.inc();
            Err(e.into())
        }
    }
}

// Everything but POST on the extract route lands here
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method Not Allowed" })),
    )
}
