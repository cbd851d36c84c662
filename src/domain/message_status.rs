//! Triage lifecycle of a contact message.
//!
//! A message starts as [`MessageStatus::New`] and moves forward through
//! `read` and `responded` as the site owner works through the inbox. Which
//! moves are accepted is decided by the configured [`TransitionPolicy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PortfolioError;

/// Triage stage of a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Submitted, not yet opened.
    New,
    /// Opened by the admin.
    Read,
    /// Answered.
    Responded,
}

impl MessageStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::New, Self::Read, Self::Responded];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Responded => "responded",
        }
    }

    /// Returns `true` if the forward-only table allows `self → next`.
    ///
    /// Allowed: `new→read`, `new→responded`, `read→responded`, plus
    /// same-state no-ops.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::New, _)
                | (Self::Read, Self::Read | Self::Responded)
                | (Self::Responded, Self::Responded)
        )
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "responded" => Ok(Self::Responded),
            other => Err(PortfolioError::InvalidStatus(other.to_string())),
        }
    }
}

/// Which status changes the admin service accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Only forward moves and same-state no-ops.
    #[default]
    ForwardOnly,
    /// Any status may overwrite any other, including backwards moves.
    Unrestricted,
}

impl TransitionPolicy {
    /// Checks a requested move against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidTransition`] if the policy forbids it.
    pub fn check(self, from: MessageStatus, to: MessageStatus) -> Result<(), PortfolioError> {
        match self {
            Self::Unrestricted => Ok(()),
            Self::ForwardOnly if from.can_advance_to(to) => Ok(()),
            Self::ForwardOnly => Err(PortfolioError::InvalidTransition { from, to }),
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward_only" | "forward-only" => Ok(Self::ForwardOnly),
            "unrestricted" => Ok(Self::Unrestricted),
            other => Err(format!("unknown transition policy: {other}")),
        }
    }
}

/// Status filter for list queries. `all` is the "no filter" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every message.
    #[default]
    All,
    /// Only messages in the given status.
    Only(MessageStatus),
}

impl StatusFilter {
    /// Returns `true` if a message in `status` passes the filter.
    #[must_use]
    pub fn matches(self, status: MessageStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    /// Returns the concrete status, or `None` for [`StatusFilter::All`].
    #[must_use]
    pub const fn status(self) -> Option<MessageStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl From<MessageStatus> for StatusFilter {
    fn from(status: MessageStatus) -> Self {
        Self::Only(status)
    }
}

/// Sender's preferred meeting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityPreference {
    /// 8am to 12pm.
    Morning,
    /// 12pm to 5pm.
    Afternoon,
    /// Any time.
    Flexible,
}

impl AvailabilityPreference {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Flexible => "flexible",
        }
    }
}

impl fmt::Display for AvailabilityPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityPreference {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "flexible" => Ok(Self::Flexible),
            other => Err(PortfolioError::Validation(format!(
                "availability_preference '{other}' must be morning, afternoon or flexible"
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn forward_table() {
        use MessageStatus::{New, Read, Responded};
        let allowed = [
            (New, New),
            (New, Read),
            (New, Responded),
            (Read, Read),
            (Read, Responded),
            (Responded, Responded),
        ];
        for from in MessageStatus::ALL {
            for to in MessageStatus::ALL {
                assert_eq!(
                    from.can_advance_to(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn forward_only_rejects_backwards() {
        let result =
            TransitionPolicy::ForwardOnly.check(MessageStatus::Responded, MessageStatus::New);
        assert!(matches!(
            result,
            Err(PortfolioError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn unrestricted_allows_backwards() {
        assert!(
            TransitionPolicy::Unrestricted
                .check(MessageStatus::Responded, MessageStatus::New)
                .is_ok()
        );
    }

    #[test]
    fn status_parse_rejects_unknown() {
        let Err(PortfolioError::InvalidStatus(value)) = "archived".parse::<MessageStatus>() else {
            panic!("expected InvalidStatus");
        };
        assert_eq!(value, "archived");
    }

    #[test]
    fn filter_all_sentinel() {
        assert_eq!("all".parse::<StatusFilter>().ok(), Some(StatusFilter::All));
        assert_eq!(
            "read".parse::<StatusFilter>().ok(),
            Some(StatusFilter::Only(MessageStatus::Read))
        );
        assert!(StatusFilter::All.matches(MessageStatus::Responded));
        assert!(!StatusFilter::Only(MessageStatus::New).matches(MessageStatus::Read));
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!(
            "forward_only".parse::<TransitionPolicy>().ok(),
            Some(TransitionPolicy::ForwardOnly)
        );
        assert_eq!(
            "UNRESTRICTED".parse::<TransitionPolicy>().ok(),
            Some(TransitionPolicy::Unrestricted)
        );
        assert!("sideways".parse::<TransitionPolicy>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let Ok(json) = serde_json::to_string(&MessageStatus::Responded) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"responded\"");
    }
}
