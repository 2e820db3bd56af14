//! REST API for the URL classifier.
//!
//! Routes:
//!
//! - `GET /` -- HTML form that submits to `/predict`
//! - `POST /predict` -- classify `{"url": "..."}`
//! - `GET /health` -- liveness, version and uptime
//! - `GET /api/predictions?limit=N` -- most recent prediction records

pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use urlguard_core::Classifier;
use urlguard_types::config::GatewayConfig;

/// Shared state accessible by all API handlers.
#[derive(Clone)]
pub struct ApiState {
    /// The classification pipeline.
    pub classifier: Arc<Classifier>,
    /// When this state was built; reported as uptime by `/health`.
    pub started: Instant,
}

impl ApiState {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
            started: Instant::now(),
        }
    }
}

/// Build the API router with all routes.
pub fn build_router(state: ApiState, gateway: &GatewayConfig) -> Router {
    let cors = if gateway.cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<_> = gateway
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let body_limit = match gateway.max_body_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    handlers::routes()
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `gateway.host:gateway.port` and serve until `shutdown` is cancelled.
pub async fn serve(
    state: ApiState,
    gateway: &GatewayConfig,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((gateway.host.as_str(), gateway.port)).await?;
    serve_on(listener, state, gateway, shutdown).await
}

/// Serve on an already-bound listener until `shutdown` is cancelled.
pub async fn serve_on(
    listener: tokio::net::TcpListener,
    state: ApiState,
    gateway: &GatewayConfig,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let app = build_router(state, gateway);
    info!(addr = %listener.local_addr()?, "urlguard listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
