//! The contact message aggregate.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::submission::ValidSubmission;
use super::{AvailabilityPreference, MessageId, MessageStatus, TransitionPolicy};
use crate::error::PortfolioError;

/// Current time truncated to whole microseconds.
///
/// PostgreSQL `TIMESTAMPTZ` keeps microseconds, so every timestamp the
/// service hands out is cut to that precision before it is stored.
#[must_use]
pub fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// One contact-form submission and its triage state.
///
/// Only `status`, `updated_at` and `version` ever change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactMessage {
    /// Unique message identifier (immutable after creation).
    pub id: MessageId,
    /// Sender's name.
    pub name: String,
    /// Sender's reply address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Preferred meeting window, if the sender picked one.
    #[serde(default)]
    pub availability_preference: Option<AvailabilityPreference>,
    /// Triage stage.
    pub status: MessageStatus,
    /// Submission timestamp (immutable after creation).
    pub submitted_at: DateTime<Utc>,
    /// Timestamp of the last status change.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency token; bumped on every status change.
    pub version: i64,
    /// Client address as reported by the reverse proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl ContactMessage {
    /// Builds a fresh `new` message from a validated submission.
    #[must_use]
    pub fn from_submission(submission: ValidSubmission, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            availability_preference: submission.availability_preference,
            status: MessageStatus::New,
            submitted_at,
            updated_at: submitted_at,
            version: 1,
            ip_address: submission.ip_address,
        }
    }

    /// Applies a status change in place.
    ///
    /// Returns `true` if the status actually changed. Same-state requests are
    /// accepted as no-ops and leave `version` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::VersionConflict`] if `change` carries a stale
    /// `expected_version`, or [`PortfolioError::InvalidTransition`] if `policy`
    /// forbids the move.
    pub fn apply_status(
        &mut self,
        change: &StatusChange,
        policy: TransitionPolicy,
        now: DateTime<Utc>,
    ) -> Result<bool, PortfolioError> {
        if let Some(expected) = change.expected_version
            && expected != self.version
        {
            return Err(PortfolioError::VersionConflict {
                id: self.id,
                expected,
                actual: self.version,
            });
        }
        policy.check(self.status, change.status)?;
        if self.status == change.status {
            return Ok(false);
        }
        self.status = change.status;
        self.updated_at = now;
        self.version = self.version.saturating_add(1);
        Ok(true)
    }
}

/// A requested status change, as handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Target status.
    pub status: MessageStatus,
    /// Version the caller last saw; `None` means last-write-wins.
    pub expected_version: Option<i64>,
}

impl StatusChange {
    /// Unconditional change to `status`.
    #[must_use]
    pub const fn to(status: MessageStatus) -> Self {
        Self {
            status,
            expected_version: None,
        }
    }

    /// Change guarded by the caller's last-seen version.
    #[must_use]
    pub const fn guarded(status: MessageStatus, expected_version: i64) -> Self {
        Self {
            status,
            expected_version: Some(expected_version),
        }
    }
}
