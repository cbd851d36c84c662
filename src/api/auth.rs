//! Admin capability check.
//!
//! Every admin handler takes an [`AdminAccess`] argument, so no admin
//! operation runs unless the request first passes this check. With no
//! `ADMIN_TOKEN` configured the check admits every request and access control
//! is left to the reverse proxy in front of `/api/admin`.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::error::PortfolioError;

/// Proof that the request passed the admin check.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess(());

impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = PortfolioError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            return Ok(Self(()));
        };

        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);

        match presented {
            Some(token) if tokens_match(token.as_bytes(), expected.as_bytes()) => Ok(Self(())),
            _ => {
                tracing::warn!(path = %parts.uri.path(), "rejected admin request");
                Err(PortfolioError::Unauthorized)
            }
        }
    }
}

/// Compares without short-circuiting on the first differing byte.
fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_comparison() {
        assert!(tokens_match(b"s3cret", b"s3cret"));
        assert!(!tokens_match(b"s3cret", b"s3creT"));
        assert!(!tokens_match(b"s3cret", b"s3cret-longer"));
        assert!(!tokens_match(b"", b"s3cret"));
    }
}
