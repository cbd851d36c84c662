//! Domain layer: message model, lifecycle rules, stats and events.
//!
//! This module contains the server-side domain model: message identity,
//! the triage status machine and its transition policy, submission
//! validation, derived dashboard statistics, and the event bus that
//! broadcasts every mutation.

pub mod contact_message;
pub mod dashboard_stats;
pub mod event_bus;
pub mod message_event;
pub mod message_export;
pub mod message_id;
pub mod message_status;
pub mod submission;

pub use contact_message::{ContactMessage, StatusChange, stored_now};
pub use dashboard_stats::{DashboardStats, StatusBreakdown};
pub use event_bus::EventBus;
pub use message_event::MessageEvent;
pub use message_export::MessageExport;
pub use message_id::MessageId;
pub use message_status::{AvailabilityPreference, MessageStatus, StatusFilter, TransitionPolicy};
pub use submission::{Submission, ValidSubmission};
