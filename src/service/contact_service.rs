//! Contact service: validates public form submissions and stores them.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::message_event::preview;
use crate::domain::{ContactMessage, EventBus, MessageEvent, MessageId, Submission, stored_now};
use crate::error::PortfolioError;
use crate::persistence::MessageStore;

/// Characters of the body carried in the submission event.
const PREVIEW_CHARS: usize = 100;

/// What the submitter gets back after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Identifier of the stored message.
    pub message_id: MessageId,
    /// Server-side submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

/// Accepts contact form submissions.
///
/// The only side effect beyond the store write is a
/// [`MessageEvent::MessageSubmitted`] on the event bus; nothing listening on
/// the bus can fail the submission.
#[derive(Debug, Clone)]
pub struct ContactService {
    store: Arc<dyn MessageStore>,
    event_bus: EventBus,
}

impl ContactService {
    /// Creates a new `ContactService`.
    #[must_use]
    pub fn new(store: Arc<dyn MessageStore>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Validates and stores a submission.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Validation`] if a required field is missing
    /// or malformed (nothing is stored), or [`PortfolioError::Unavailable`]
    /// if the store cannot be written.
    pub async fn submit(
        &self,
        submission: Submission,
    ) -> Result<SubmissionReceipt, PortfolioError> {
        let valid = submission.validate_into()?;
        let message = ContactMessage::from_submission(valid, stored_now());
        let receipt = SubmissionReceipt {
            message_id: message.id,
            submitted_at: message.submitted_at,
        };

        let event = MessageEvent::MessageSubmitted {
            message_id: message.id,
            name: message.name.clone(),
            email: message.email.clone(),
            subject: message.subject.clone(),
            preview: preview(&message.message, PREVIEW_CHARS),
            availability_preference: message.availability_preference,
            timestamp: message.submitted_at,
        };

        self.store.insert(message).await?;
        let _ = self.event_bus.publish(event);

        tracing::info!(message_id = %receipt.message_id, "contact message submitted");
        Ok(receipt)
    }
}
