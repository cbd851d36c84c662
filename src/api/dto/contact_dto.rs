//! Public contact endpoint DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{MessageId, Submission};

/// Request body for `POST /contact/message`.
///
/// Missing fields deserialize as empty strings so that they surface as
/// validation failures rather than body rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SubmitMessageRequest {
    /// Sender's name.
    #[serde(default)]
    pub name: String,
    /// Sender's reply address.
    #[serde(default)]
    pub email: String,
    /// Subject line.
    #[serde(default)]
    pub subject: String,
    /// Message body.
    #[serde(default)]
    pub message: String,
    /// `morning`, `afternoon`, `flexible`, or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_preference: Option<String>,
}

impl SubmitMessageRequest {
    /// Converts into a domain submission tagged with the client address.
    #[must_use]
    pub fn into_submission(self, ip_address: Option<String>) -> Submission {
        Submission {
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            availability_preference: self.availability_preference,
            ip_address,
        }
    }
}

/// Payload of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionData {
    /// Identifier of the stored message.
    pub message_id: MessageId,
    /// Server-side submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

/// Static contact metadata for `GET /contact/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactInfo {
    /// Public contact address.
    pub email: String,
    /// LinkedIn profile URL.
    pub linkedin: String,
    /// Availability window text.
    pub availability: String,
    /// Location text.
    pub location: String,
    /// Call-to-action text.
    pub cta: String,
}
