//! Persistence layer: the contact message store.
//!
//! [`MessageStore`] is the seam between the services and storage. Two
//! implementations ship: [`InMemoryMessageStore`] for development and tests,
//! and [`PostgresMessageStore`] backed by `sqlx::PgPool`.
//!
//! Every mutating call is atomic with respect to other calls on the same
//! store: no caller ever observes a half-applied status change.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt::Debug;

use async_trait::async_trait;

pub use memory::InMemoryMessageStore;
pub use models::StatusUpdate;
pub use postgres::PostgresMessageStore;

use crate::domain::{ContactMessage, MessageId, StatusChange, StatusFilter, TransitionPolicy};
use crate::error::PortfolioError;

/// Durable storage for contact messages.
#[async_trait]
pub trait MessageStore: Send + Sync + Debug {
    /// Stores a new message.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Unavailable`] on storage failure, or
    /// [`PortfolioError::Internal`] if the ID is already taken.
    async fn insert(&self, message: ContactMessage) -> Result<(), PortfolioError>;

    /// Fetches one message.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::MessageNotFound`] if absent.
    async fn get(&self, id: MessageId) -> Result<ContactMessage, PortfolioError>;

    /// Returns messages matching `filter`, most recently submitted first.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Unavailable`] on storage failure.
    async fn list(&self, filter: StatusFilter) -> Result<Vec<ContactMessage>, PortfolioError>;

    /// Applies `change` under `policy` as one atomic read-check-write.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::MessageNotFound`],
    /// [`PortfolioError::VersionConflict`] or
    /// [`PortfolioError::InvalidTransition`] when the change is refused.
    async fn update_status(
        &self,
        id: MessageId,
        change: StatusChange,
        policy: TransitionPolicy,
    ) -> Result<StatusUpdate, PortfolioError>;

    /// Permanently removes a message, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::MessageNotFound`] if absent.
    async fn remove(&self, id: MessageId) -> Result<ContactMessage, PortfolioError>;

    /// Returns the number of stored messages.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Unavailable`] on storage failure.
    async fn count(&self) -> Result<u64, PortfolioError>;

    /// Round-trips the backend for health checks.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Unavailable`] if the backend is unreachable.
    async fn ping(&self) -> Result<(), PortfolioError>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
