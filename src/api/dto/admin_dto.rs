//! Admin endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::Pagination;
use crate::domain::{ContactMessage, MessageStatus, StatusChange, StatusFilter};
use crate::error::PortfolioError;

/// Query parameters for `GET /admin/messages`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMessagesParams {
    /// `new`, `read`, `responded`, or `all` (default).
    #[serde(default)]
    pub status: Option<String>,
    /// Number of messages to skip.
    #[serde(default)]
    pub skip: Option<u32>,
    /// Maximum number of messages to return; omit for all.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListMessagesParams {
    /// Parses the status filter.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidStatus`] for unknown values.
    pub fn filter(&self) -> Result<StatusFilter, PortfolioError> {
        self.status
            .as_deref()
            .map_or(Ok(StatusFilter::All), str::parse)
    }

    /// Returns the clamped pagination window.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination {
            skip: self.skip.unwrap_or(0),
            limit: self.limit,
        }
        .clamped()
    }
}

/// Response body for `GET /admin/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageListResponse {
    /// The page of messages, most recent first.
    pub messages: Vec<ContactMessage>,
    /// Messages matching the filter, across all pages.
    pub total: u64,
    /// Messages in this page.
    pub showing: u64,
    /// Offset of this page.
    pub skip: u32,
    /// Requested page size, if any.
    pub limit: Option<u32>,
    /// Whether more messages follow this page.
    pub has_more: bool,
}

/// Query parameters for `PUT /admin/messages/{id}/status`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateStatusParams {
    /// Target status: `new`, `read` or `responded`.
    pub new_status: String,
    /// Version the caller last saw; omit for last-write-wins.
    #[serde(default)]
    pub expected_version: Option<i64>,
}

impl UpdateStatusParams {
    /// Parses into a store-level change request.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidStatus`] for unknown statuses.
    pub fn change(&self) -> Result<StatusChange, PortfolioError> {
        let status: MessageStatus = self.new_status.parse()?;
        Ok(StatusChange {
            status,
            expected_version: self.expected_version,
        })
    }
}
