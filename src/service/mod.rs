//! Service layer: business logic orchestration.
//!
//! [`ContactService`] accepts public submissions, [`AdminService`] runs the
//! triage workflow, and [`Notifier`] forwards new submissions to the owner
//! by listening on the [`super::domain::EventBus`].

pub mod admin_service;
pub mod contact_service;
pub mod notifier;

pub use admin_service::AdminService;
pub use contact_service::{ContactService, SubmissionReceipt};
pub use notifier::{Notification, Notifier};
