//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Largest page a list endpoint will return in one response.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Offset pagination. Without `limit`, list endpoints return everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    /// Number of items to skip.
    pub skip: u32,
    /// Maximum number of items to return.
    pub limit: Option<u32>,
}

impl Pagination {
    /// Clamps `limit` to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            skip: self.skip,
            limit: self.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE)),
        }
    }

    /// Applies the window to `items`, returning the page and the total.
    #[must_use]
    pub fn apply<T>(&self, items: Vec<T>) -> (Vec<T>, usize) {
        let total = items.len();
        let page = items
            .into_iter()
            .skip(self.skip as usize)
            .take(self.limit.map_or(usize::MAX, |l| l as usize))
            .collect();
        (page, total)
    }
}

/// Generic success envelope used by the public contact endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true` on success.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Endpoint-specific payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a successful envelope.
    #[must_use]
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}
