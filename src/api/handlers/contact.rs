//! Public contact handlers: form submission and contact metadata.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ApiResponse, ContactInfo, SubmissionData, SubmitMessageRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PortfolioError};

const SUBMITTED_MESSAGE: &str =
    "Your message has been sent successfully! I'll get back to you within 24 hours.";

/// `POST /contact/message`: Submit the contact form.
///
/// # Errors
///
/// Returns [`PortfolioError::Validation`] for missing or malformed fields
/// and [`PortfolioError::Unavailable`] when the store cannot be written.
#[utoipa::path(
    post,
    path = "/api/contact/message",
    tag = "Contact",
    summary = "Submit a contact message",
    description = "Validates the form and stores a new message in status `new`. Validation failures are not retryable; `retryable: true` in the error body means the store was unavailable.",
    request_body = SubmitMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = ApiResponse<SubmissionData>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn submit_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PortfolioError> {
    let Json(req) = payload.map_err(|e| PortfolioError::Validation(e.body_text()))?;
    let submission = req.into_submission(client_ip(&headers));

    let receipt = state.contact_service.submit(submission).await?;

    let body = ApiResponse::ok(
        SUBMITTED_MESSAGE,
        SubmissionData {
            message_id: receipt.message_id,
            submitted_at: receipt.submitted_at,
        },
    );
    Ok((StatusCode::CREATED, Json(body)))
}

/// `GET /contact/info`: Static contact metadata.
#[utoipa::path(
    get,
    path = "/api/contact/info",
    tag = "Contact",
    summary = "Contact metadata",
    description = "Returns the site owner's public contact details, availability and location.",
    responses(
        (status = 200, description = "Contact metadata", body = ContactInfo),
    )
)]
pub async fn contact_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.contact_info.as_ref().clone())
}

/// Public contact routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contact/message", post(submit_message))
        .route("/contact/info", get(contact_info))
}

/// Client address as forwarded by the reverse proxy.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };
    forwarded.or_else(real).map(ToString::to_string)
}
