//! Database models and store result types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ContactMessage, MessageId, MessageStatus};
use crate::error::PortfolioError;

/// Outcome of [`super::MessageStore::update_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    /// The message after the change.
    pub message: ContactMessage,
    /// Status before the change.
    pub previous: MessageStatus,
    /// `false` when the request was a same-state no-op.
    pub changed: bool,
}

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRow {
    /// Primary key.
    pub id: Uuid,
    /// Sender's name.
    pub name: String,
    /// Sender's reply address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Meeting window as text, or NULL.
    pub availability_preference: Option<String>,
    /// Status as text.
    pub status: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
    /// Concurrency token.
    pub version: i64,
    /// Client address, or NULL.
    pub ip_address: Option<String>,
}

impl TryFrom<MessageRow> for ContactMessage {
    type Error = PortfolioError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            PortfolioError::Internal(format!("row {} has unknown status '{}'", row.id, row.status))
        })?;
        let availability_preference = row
            .availability_preference
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e| PortfolioError::Internal(format!("row {}: {e}", row.id)))?;

        Ok(Self {
            id: MessageId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            availability_preference,
            status,
            submitted_at: row.submitted_at,
            updated_at: row.updated_at,
            version: row.version,
            ip_address: row.ip_address,
        })
    }
}
