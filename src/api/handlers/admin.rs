//! Admin handlers: message triage, dashboard stats, export.
//!
//! Every handler takes [`AdminAccess`] first, so the capability check runs
//! before any store access.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, put};
use axum::{Json, Router};

use crate::api::auth::AdminAccess;
use crate::api::dto::{ListMessagesParams, MessageListResponse, UpdateStatusParams};
use crate::app_state::AppState;
use crate::domain::{ContactMessage, DashboardStats, MessageExport, MessageId};
use crate::error::{ErrorResponse, PortfolioError};

/// `GET /admin/messages`: List messages with optional status filter.
///
/// # Errors
///
/// Returns [`PortfolioError::InvalidStatus`] for an unknown filter value.
#[utoipa::path(
    get,
    path = "/api/admin/messages",
    tag = "Admin",
    summary = "List messages",
    description = "Returns messages most recent first, optionally filtered by status (`all` = no filter) and windowed by `skip`/`limit`.",
    params(ListMessagesParams),
    responses(
        (status = 200, description = "Message list", body = MessageListResponse),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 401, description = "Admin authorization required", body = ErrorResponse),
    ),
    security(("admin_token" = []))
)]
pub async fn list_messages(
    _admin: AdminAccess,
    State(state): State<AppState>,
    params: Result<Query<ListMessagesParams>, QueryRejection>,
) -> Result<impl IntoResponse, PortfolioError> {
    let Query(params) = params.map_err(|e| PortfolioError::Validation(e.body_text()))?;
    let filter = params.filter()?;
    let pagination = params.pagination();

    let messages = state.admin_service.list(filter).await?;
    let (messages, total) = pagination.apply(messages);
    let showing = messages.len();

    Ok(Json(MessageListResponse {
        messages,
        total: u64::try_from(total).unwrap_or(u64::MAX),
        showing: u64::try_from(showing).unwrap_or(u64::MAX),
        skip: pagination.skip,
        limit: pagination.limit,
        has_more: (pagination.skip as usize).saturating_add(showing) < total,
    }))
}

/// `GET /admin/dashboard/stats`: Aggregate counts.
///
/// # Errors
///
/// Returns [`PortfolioError::Unavailable`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard/stats",
    tag = "Admin",
    summary = "Dashboard statistics",
    description = "Totals, per-status breakdown and the trailing 7-day count, computed from the store at request time.",
    responses(
        (status = 200, description = "Dashboard stats", body = DashboardStats),
        (status = 401, description = "Admin authorization required", body = ErrorResponse),
    ),
    security(("admin_token" = []))
)]
pub async fn dashboard_stats(
    _admin: AdminAccess,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PortfolioError> {
    let stats = state.admin_service.stats().await?;
    Ok(Json(stats))
}

/// `PUT /admin/messages/{id}/status`: Move a message to another status.
///
/// # Errors
///
/// Returns [`PortfolioError::MessageNotFound`], [`PortfolioError::InvalidStatus`],
/// [`PortfolioError::InvalidTransition`] or [`PortfolioError::VersionConflict`].
#[utoipa::path(
    put,
    path = "/api/admin/messages/{id}/status",
    tag = "Admin",
    summary = "Update message status",
    description = "Applies the status change under the configured transition policy. Pass `expected_version` to fail with 409 instead of overwriting a concurrent change.",
    params(
        ("id" = uuid::Uuid, Path, description = "Message UUID"),
        UpdateStatusParams,
    ),
    responses(
        (status = 200, description = "Updated message", body = ContactMessage),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 404, description = "Message not found", body = ErrorResponse),
        (status = 409, description = "Transition refused or stale version", body = ErrorResponse),
    ),
    security(("admin_token" = []))
)]
pub async fn update_status(
    _admin: AdminAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<UpdateStatusParams>, QueryRejection>,
) -> Result<impl IntoResponse, PortfolioError> {
    let id = parse_id(&id)?;
    let Query(params) = params.map_err(|e| PortfolioError::Validation(e.body_text()))?;
    let change = params.change()?;

    let message = state.admin_service.set_status(id, change).await?;
    Ok(Json(message))
}

/// `DELETE /admin/messages/{id}`: Permanently delete a message.
///
/// # Errors
///
/// Returns [`PortfolioError::MessageNotFound`] if the message does not exist.
#[utoipa::path(
    delete,
    path = "/api/admin/messages/{id}",
    tag = "Admin",
    summary = "Delete a message",
    description = "Removes the message permanently. There is no undo.",
    params(
        ("id" = uuid::Uuid, Path, description = "Message UUID"),
    ),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 404, description = "Message not found", body = ErrorResponse),
    ),
    security(("admin_token" = []))
)]
pub async fn delete_message(
    _admin: AdminAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, PortfolioError> {
    let id = parse_id(&id)?;
    state.admin_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /admin/messages/export`: Download every message as JSON.
///
/// # Errors
///
/// Returns [`PortfolioError::Unavailable`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/admin/messages/export",
    tag = "Admin",
    summary = "Export messages",
    description = "Returns the full, unfiltered message set as a JSON attachment named `portfolio-messages-<YYYY-MM-DD>.json`.",
    responses(
        (status = 200, description = "Export document", body = MessageExport),
        (status = 401, description = "Admin authorization required", body = ErrorResponse),
    ),
    security(("admin_token" = []))
)]
pub async fn export_messages(
    _admin: AdminAccess,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PortfolioError> {
    let export = state.admin_service.export().await?;
    let disposition = format!("attachment; filename=\"{}\"", export.file_name());
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export)))
}

/// Admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/messages", get(list_messages))
        .route("/admin/messages/export", get(export_messages))
        .route("/admin/messages/{id}", delete(delete_message))
        .route("/admin/messages/{id}/status", put(update_status))
        .route("/admin/dashboard/stats", get(dashboard_stats))
}

fn parse_id(raw: &str) -> Result<MessageId, PortfolioError> {
    raw.parse()
        .map_err(|_| PortfolioError::Validation(format!("'{raw}' is not a valid message id")))
}
