//! Domain events reflecting message state changes.
//!
//! Every mutation emits a [`MessageEvent`] through the [`super::EventBus`].
//! The notifier subscribes to forward new submissions to the site owner.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AvailabilityPreference, MessageId, MessageStatus};

/// Domain event emitted after every message mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MessageEvent {
    /// Emitted after a submission is stored.
    MessageSubmitted {
        /// Message identifier.
        message_id: MessageId,
        /// Sender's name.
        name: String,
        /// Sender's reply address.
        email: String,
        /// Subject line.
        subject: String,
        /// First 100 characters of the body.
        preview: String,
        /// Preferred meeting window.
        availability_preference: Option<AvailabilityPreference>,
        /// Submission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a status change that actually moved the message.
    StatusChanged {
        /// Message identifier.
        message_id: MessageId,
        /// Status before the change.
        from: MessageStatus,
        /// Status after the change.
        to: MessageStatus,
        /// New version token.
        version: i64,
        /// Change timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a message is deleted.
    MessageDeleted {
        /// Message identifier.
        message_id: MessageId,
        /// Deletion timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl MessageEvent {
    /// Returns the message ID associated with this event.
    #[must_use]
    pub const fn message_id(&self) -> MessageId {
        match self {
            Self::MessageSubmitted { message_id, .. }
            | Self::StatusChanged { message_id, .. }
            | Self::MessageDeleted { message_id, .. } => *message_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::MessageSubmitted { .. } => "message_submitted",
            Self::StatusChanged { .. } => "status_changed",
            Self::MessageDeleted { .. } => "message_deleted",
        }
    }
}

/// Truncates `body` to at most `max_chars` characters for log previews.
#[must_use]
pub fn preview(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", body.get(..cut).unwrap_or(body)),
        None => body.to_string(),
    }
}
