//! Client library for front ends: typed HTTP calls plus the state the
//! contact form and admin dashboard keep between calls.
//!
//! [`ContactForm`] and [`AdminDashboard`] drive any [`ContactApi`] /
//! [`AdminApi`]; [`PortfolioClient`] is the HTTP implementation.

pub mod contact_form;
pub mod dashboard;
pub mod error;
pub mod http;

use async_trait::async_trait;

pub use contact_form::{ContactForm, FormState};
pub use dashboard::AdminDashboard;
pub use error::ClientError;
pub use http::PortfolioClient;

use crate::api::dto::{MessageListResponse, Pagination, SubmissionData, SubmitMessageRequest};
use crate::domain::{
    ContactMessage, DashboardStats, MessageExport, MessageId, StatusChange, StatusFilter,
};

/// A downloaded export with the file name the server suggested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDownload {
    /// Suggested file name, e.g. `portfolio-messages-2024-05-01.json`.
    pub file_name: String,
    /// The export document.
    pub export: MessageExport,
}

/// Public contact calls.
#[async_trait]
pub trait ContactApi: Send + Sync {
    /// Submits the contact form.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or an error status.
    async fn submit_message(
        &self,
        request: &SubmitMessageRequest,
    ) -> Result<SubmissionData, ClientError>;
}

/// Admin calls.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Lists messages matching `filter`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or an error status.
    async fn list_messages(
        &self,
        filter: StatusFilter,
        page: Pagination,
    ) -> Result<MessageListResponse, ClientError>;

    /// Fetches dashboard statistics.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or an error status.
    async fn stats(&self) -> Result<DashboardStats, ClientError>;

    /// Applies a status change.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or an error status.
    async fn set_status(
        &self,
        id: MessageId,
        change: StatusChange,
    ) -> Result<ContactMessage, ClientError>;

    /// Permanently deletes a message.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or an error status.
    async fn delete_message(&self, id: MessageId) -> Result<(), ClientError>;

    /// Downloads every message.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or an error status.
    async fn export_messages(&self) -> Result<ExportDownload, ClientError>;
}
