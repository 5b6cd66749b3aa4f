mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod prompt;
mod provider;
mod rate_limit;
mod state;

use axum::Router;
use axum::routing::{get, post};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use config::Args;
use handlers::{extract_handler, health_handler, method_not_allowed, metrics_handler};
use provider::CompletionClient;
use rate_limit::RateLimiter;
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/extract",
            post(extract_handler).fallback(method_not_allowed),
        )
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let state = Arc::new(AppState {
        limiter: RateLimiter::new(args.rate_limit, Duration::from_secs(args.rate_window)),
        provider: CompletionClient::new(args.provider, Duration::from_secs(args.upstream_timeout)),
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(port = args.port, provider = ?args.provider, "gateway listening");
    tracing::info!(
        rate_limit = args.rate_limit,
        rate_window_secs = args.rate_window,
        "rate limiter configured"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server failed");
}
