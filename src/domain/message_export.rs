//! Full message snapshot for offline download.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ContactMessage;

/// Every stored message at one instant, newest first.
///
/// Not paginated: the document grows with the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageExport {
    /// Instant the snapshot was taken.
    pub export_date: DateTime<Utc>,
    /// Number of messages in the snapshot.
    pub total_messages: u64,
    /// The messages.
    pub messages: Vec<ContactMessage>,
}

impl MessageExport {
    /// Wraps `messages` taken at `export_date`.
    #[must_use]
    pub fn new(messages: Vec<ContactMessage>, export_date: DateTime<Utc>) -> Self {
        Self {
            export_date,
            total_messages: u64::try_from(messages.len()).unwrap_or(u64::MAX),
            messages,
        }
    }

    /// Download file name: `portfolio-messages-<YYYY-MM-DD>.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "portfolio-messages-{}.json",
            self.export_date.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn file_name_uses_iso_date() {
        let at = Utc
            .with_ymd_and_hms(2025, 3, 9, 23, 59, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let export = MessageExport::new(Vec::new(), at);
        assert_eq!(export.file_name(), "portfolio-messages-2025-03-09.json");
        assert_eq!(export.total_messages, 0);
    }
}
