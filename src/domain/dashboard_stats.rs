//! Aggregate counts for the admin dashboard.
//!
//! Stats are never stored: [`DashboardStats::compute`] scans the current
//! message set on every request, so they always reflect the store at query
//! time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ContactMessage, MessageStatus};

/// Default width of the "recent messages" window.
pub const RECENT_WINDOW_DAYS: u32 = 7;

/// Widest configurable "recent messages" window (about ten years).
pub const MAX_RECENT_WINDOW_DAYS: u32 = 3_650;

/// Message count per status. Every status is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusBreakdown {
    /// Messages in `new`.
    pub new: u64,
    /// Messages in `read`.
    pub read: u64,
    /// Messages in `responded`.
    pub responded: u64,
}

impl StatusBreakdown {
    /// Returns the count for one status.
    #[must_use]
    pub const fn get(&self, status: MessageStatus) -> u64 {
        match status {
            MessageStatus::New => self.new,
            MessageStatus::Read => self.read,
            MessageStatus::Responded => self.responded,
        }
    }

    fn bump(&mut self, status: MessageStatus) {
        let slot = match status {
            MessageStatus::New => &mut self.new,
            MessageStatus::Read => &mut self.read,
            MessageStatus::Responded => &mut self.responded,
        };
        *slot = slot.saturating_add(1);
    }
}

/// Derived dashboard statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    /// Count of all messages.
    pub total_messages: u64,
    /// Count per status.
    pub status_breakdown: StatusBreakdown,
    /// Messages submitted within the trailing window ending at `last_updated`.
    pub recent_messages_7_days: u64,
    /// Instant the stats were computed.
    pub last_updated: DateTime<Utc>,
}

impl DashboardStats {
    /// Aggregates `messages` as of `now`.
    ///
    /// A message counts as recent when `submitted_at >= now - window_days`.
    /// A window reaching past the earliest representable instant counts
    /// every message.
    #[must_use]
    pub fn compute<'a, I>(messages: I, now: DateTime<Utc>, window_days: u32) -> Self
    where
        I: IntoIterator<Item = &'a ContactMessage>,
    {
        let cutoff = Duration::try_days(i64::from(window_days))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut total_messages = 0u64;
        let mut recent = 0u64;
        let mut status_breakdown = StatusBreakdown::default();

        for msg in messages {
            total_messages = total_messages.saturating_add(1);
            status_breakdown.bump(msg.status);
            if msg.submitted_at >= cutoff {
                recent = recent.saturating_add(1);
            }
        }

        Self {
            total_messages,
            status_breakdown,
            recent_messages_7_days: recent,
            last_updated: now,
        }
    }
}
