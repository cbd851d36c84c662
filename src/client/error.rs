//! Client-side error classification.

use reqwest::StatusCode;

use crate::error::ErrorResponse;

/// Error codes reported by the server that a UI may want to branch on.
pub mod codes {
    /// `expected_version` no longer matches the stored message.
    pub const VERSION_CONFLICT: u32 = 2002;
    /// The message does not exist (any more).
    pub const MESSAGE_NOT_FOUND: u32 = 2001;
    /// Missing or wrong admin token.
    pub const UNAUTHORIZED: u32 = 4001;
}

/// Failure of a [`PortfolioClient`](super::PortfolioClient) call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an error status.
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Numeric error code from the body, `0` if the body was not a
        /// structured error.
        code: u32,
        /// Server-provided message.
        message: String,
        /// Whether the server marked the failure as retryable.
        retryable: bool,
    },
    /// The request never produced a response (connect, timeout, reset).
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The client could not be constructed.
    #[error("client setup failed: {0}")]
    Setup(String),
}

impl ClientError {
    /// Whether repeating the same call unchanged may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { retryable, .. } => *retryable,
            Self::Transport(_) => true,
            Self::Decode(_) | Self::Setup(_) => false,
        }
    }

    /// Numeric server error code, if the server sent one.
    #[must_use]
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::Api { code, .. } if *code != 0 => Some(*code),
            _ => None,
        }
    }

    /// Text suitable for showing to the person using the UI.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { code, .. } if *code == codes::VERSION_CONFLICT => {
                "This message was changed elsewhere. Reload and try again.".to_string()
            }
            Self::Api { message, .. } => message.clone(),
            Self::Transport(_) => {
                "Could not reach the server. Please check your connection and try again."
                    .to_string()
            }
            Self::Decode(_) | Self::Setup(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
        }
    }

    /// Builds an [`Api`](Self::Api) error from a status and an optional
    /// structured body.
    pub(crate) fn from_status(status: StatusCode, body: Option<ErrorResponse>) -> Self {
        match body {
            Some(body) => Self::Api {
                status: status.as_u16(),
                code: body.error.code,
                message: body.error.message,
                retryable: body.error.retryable,
            },
            None => Self::Api {
                status: status.as_u16(),
                code: 0,
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
                retryable: status.is_server_error() || status == StatusCode::REQUEST_TIMEOUT,
            },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if e.is_builder() {
            Self::Setup(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}
