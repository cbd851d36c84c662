//! Contact form state.

use super::{ClientError, ContactApi};
use crate::api::dto::{SubmissionData, SubmitMessageRequest};

/// Outcome of the last submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    /// Nothing submitted yet, or the draft was edited since.
    #[default]
    Idle,
    /// The last submission was stored.
    Sent(SubmissionData),
    /// The last submission failed; the draft is kept.
    Failed {
        /// Text to show next to the form.
        message: String,
        /// Whether resubmitting the same draft may succeed.
        retryable: bool,
    },
}

/// Contact form draft plus the outcome of the last submission.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    draft: SubmitMessageRequest,
    state: FormState,
}

impl ContactForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft.
    #[must_use]
    pub fn draft(&self) -> &SubmitMessageRequest {
        &self.draft
    }

    /// Mutable draft for field edits.
    ///
    /// Editing starts a new attempt, so the outcome of the previous one is
    /// cleared back to [`FormState::Idle`].
    pub fn draft_mut(&mut self) -> &mut SubmitMessageRequest {
        self.state = FormState::Idle;
        &mut self.draft
    }

    /// Outcome of the last submission.
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Whether resubmitting the unchanged draft makes sense.
    #[must_use]
    pub fn can_retry(&self) -> bool {
        matches!(self.state, FormState::Failed { retryable: true, .. })
    }

    /// Submits the draft. On success the draft is cleared; on failure it
    /// is kept and the failure is recorded in [`state`](Self::state).
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed call.
    pub async fn submit<A: ContactApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<SubmissionData, ClientError> {
        match api.submit_message(&self.draft).await {
            Ok(data) => {
                self.draft = SubmitMessageRequest::default();
                self.state = FormState::Sent(data);
                Ok(data)
            }
            Err(e) => {
                self.state = FormState::Failed {
                    message: e.user_message(),
                    retryable: e.is_retryable(),
                };
                Err(e)
            }
        }
    }
}
