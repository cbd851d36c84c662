//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: String,
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Message store backend (`memory` or `postgres`).
    pub store: String,
    /// Whether the store answered the ping.
    pub store_reachable: bool,
    /// Whether an owner notifier is attached to the event bus.
    ///
    /// Informational only: notifications are best effort and never degrade
    /// the service.
    pub notifier_attached: bool,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, whether the message store is reachable and whether the notifier is attached.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Message store unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.admin_service.store();
    let reachable = match store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                backend = store.backend(),
                error = %e,
                "health check: store unreachable"
            );
            false
        }
    };

    let notifier_attached = state.event_bus.listeners() > 0;
    if !notifier_attached {
        tracing::debug!("health check: no notifier attached to the event bus");
    }

    let (code, status) = if reachable {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: store.backend().to_string(),
            store_reachable: reachable,
            notifier_attached,
        }),
    )
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
