//! HTTP surface of the exporter
//!
//! A single `/metrics` route serves the registry in the text exposition
//! format. Handler errors never leak internals: the scrape gets a generic
//! 500 with a JSON body and the detail goes to the log.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::gauges::GaugeSet;

/// Shared state behind the router
#[derive(Clone)]
pub struct AppState {
    pub gauges: Arc<GaugeSet>,
}

/// Builds the exporter's router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .layer(middleware::from_fn(log_latency))
        .with_state(state)
}

/// GET /metrics: the whole registry, rendered on demand.
async fn metrics(State(state): State<AppState>) -> Response {
    match state.gauges.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, state.gauges.format_type())],
            body,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(error = %error, "failed to render metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal server error" })),
            )
                .into_response()
        }
    }
}

/// Logs method, path, status and latency for every request.
async fn log_latency(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::debug!(
        %method,
        path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );

    response
}

/// Resolves when the process receives SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
