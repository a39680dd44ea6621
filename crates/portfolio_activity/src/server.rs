//! HTTP surface polled by the site's presenter.

use axum::debug_handler;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use crate::board::ActivityBoard;
use crate::error::{ServiceError, ServiceResult};
use crate::types::Snapshot;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:3000";

pub struct AppState {
    pub board: Arc<ActivityBoard>,
    pub metrics: Option<PrometheusHandle>,
}

#[debug_handler]
async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[debug_handler]
async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [("content-type", "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}

#[debug_handler]
async fn get_activity(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.board.snapshot().await)
}

#[debug_handler]
async fn refresh_activity(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.board.refresh().await)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/activity", get(get_activity))
        .route("/api/activity/refresh", post(refresh_activity))
        .with_state(state)
}

/// Parse the listen address, falling back to [`DEFAULT_ADDRESS`].
pub fn listen_addr(raw: Option<&str>) -> ServiceResult<SocketAddr> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_ADDRESS);
    raw.parse()
        .map_err(|_| ServiceError::Address(raw.to_string()))
}

/// Serve `app` on `addr` until ctrl-c.
pub async fn serve(addr: SocketAddr, app: Router) -> ServiceResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "starting HTTP server");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                error!("failed to install ctrl+c handler: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await?;
    Ok(())
}
