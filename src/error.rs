//! Service error types with HTTP status code mapping.
//!
//! [`PortfolioError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{MessageId, MessageStatus};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "success": false,
///   "error": {
///     "code": 1001,
///     "message": "invalid submission: email must be a valid address",
///     "retryable": false
///   }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`; lets form clients branch on one field for every outcome.
    pub success: bool,
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`PortfolioError`]).
    pub code: u32,
    /// Human-readable error message, suitable for display.
    pub message: String,
    /// Whether repeating the same request unchanged may succeed.
    pub retryable: bool,
    /// Optional additional details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category           | HTTP Status                   |
/// |-----------|--------------------|-------------------------------|
/// | 1000–1999 | Validation         | 400 Bad Request               |
/// | 2000–2999 | State / Not Found  | 404 Not Found / 409 Conflict  |
/// | 3000–3999 | Server             | 500 / 503                     |
/// | 4000–4999 | Access             | 401 Unauthorized              |
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    /// Submission fields are missing or malformed.
    #[error("invalid submission: {0}")]
    Validation(String),

    /// A status value outside `new`, `read`, `responded`.
    #[error("invalid status '{0}': must be one of new, read, responded")]
    InvalidStatus(String),

    /// Message with the given ID was not found.
    #[error("message not found: {0}")]
    MessageNotFound(MessageId),

    /// Caller acted on a stale view of the message.
    #[error("message {id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        /// Message identifier.
        id: MessageId,
        /// Version the caller last saw.
        expected: i64,
        /// Version currently stored.
        actual: i64,
    },

    /// The transition policy forbids moving between these states.
    #[error("cannot move message from '{from}' to '{to}'")]
    InvalidTransition {
        /// Current status.
        from: MessageStatus,
        /// Requested status.
        to: MessageStatus,
    },

    /// Admin credentials missing or wrong.
    #[error("admin authorization required")]
    Unauthorized,

    /// Message store unreachable or failing.
    #[error("message store unavailable: {0}")]
    Unavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PortfolioError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::InvalidStatus(_) => 1002,
            Self::MessageNotFound(_) => 2001,
            Self::VersionConflict { .. } => 2002,
            Self::InvalidTransition { .. } => 2003,
            Self::Internal(_) => 3000,
            Self::Unavailable(_) => 3001,
            Self::Unauthorized => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            Self::MessageNotFound(_) => StatusCode::NOT_FOUND,
            Self::VersionConflict { .. } | Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` when the failure is transient and the same request
    /// may succeed if the user retries it.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Internal(_))
    }
}

impl From<sqlx::Error> for PortfolioError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                retryable: self.is_retryable(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
