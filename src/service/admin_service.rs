//! Admin service: message triage, dashboard stats and export.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    ContactMessage, DashboardStats, EventBus, MessageEvent, MessageExport, MessageId,
    StatusChange, StatusFilter, TransitionPolicy,
};
use crate::error::PortfolioError;
use crate::persistence::MessageStore;

/// Orchestration layer for every admin operation.
///
/// Stateless coordinator over the [`MessageStore`]: mutations go through the
/// store's atomic primitives, then emit events. Stats are recomputed from
/// the store on every call.
#[derive(Debug, Clone)]
pub struct AdminService {
    store: Arc<dyn MessageStore>,
    event_bus: EventBus,
    policy: TransitionPolicy,
    recent_window_days: u32,
}

impl AdminService {
    /// Creates a new `AdminService`.
    #[must_use]
    pub fn new(
        store: Arc<dyn MessageStore>,
        event_bus: EventBus,
        policy: TransitionPolicy,
        recent_window_days: u32,
    ) -> Self {
        Self {
            store,
            event_bus,
            policy,
            recent_window_days,
        }
    }

    /// Returns the transition policy in force.
    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn MessageStore> {
        &self.store
    }

    /// Lists messages matching `filter`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Unavailable`] on storage failure.
    pub async fn list(&self, filter: StatusFilter) -> Result<Vec<ContactMessage>, PortfolioError> {
        self.store.list(filter).await
    }

    /// Computes dashboard stats as of now.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Unavailable`] on storage failure.
    pub async fn stats(&self) -> Result<DashboardStats, PortfolioError> {
        self.stats_at(Utc::now()).await
    }

    /// Computes dashboard stats as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Unavailable`] on storage failure.
    pub async fn stats_at(&self, now: DateTime<Utc>) -> Result<DashboardStats, PortfolioError> {
        let messages = self.store.list(StatusFilter::All).await?;
        Ok(DashboardStats::compute(&messages, now, self.recent_window_days))
    }

    /// Changes a message's status under the configured policy.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::MessageNotFound`] if `id` is unknown,
    /// [`PortfolioError::VersionConflict`] on a stale `expected_version`, or
    /// [`PortfolioError::InvalidTransition`] if the policy refuses the move.
    pub async fn set_status(
        &self,
        id: MessageId,
        change: StatusChange,
    ) -> Result<ContactMessage, PortfolioError> {
        let update = self.store.update_status(id, change, self.policy).await?;

        if update.changed {
            let _ = self.event_bus.publish(MessageEvent::StatusChanged {
                message_id: id,
                from: update.previous,
                to: update.message.status,
                version: update.message.version,
                timestamp: update.message.updated_at,
            });
            tracing::info!(
                message_id = %id,
                from = %update.previous,
                to = %update.message.status,
                version = update.message.version,
                "message status updated"
            );
        }

        Ok(update.message)
    }

    /// Permanently deletes a message.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::MessageNotFound`] if `id` is unknown.
    pub async fn delete(&self, id: MessageId) -> Result<(), PortfolioError> {
        let _removed = self.store.remove(id).await?;

        let _ = self.event_bus.publish(MessageEvent::MessageDeleted {
            message_id: id,
            timestamp: Utc::now(),
        });

        tracing::info!(message_id = %id, "message deleted");
        Ok(())
    }

    /// Snapshots every message for download.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Unavailable`] on storage failure.
    pub async fn export(&self) -> Result<MessageExport, PortfolioError> {
        let messages = self.store.list(StatusFilter::All).await?;
        let export = MessageExport::new(messages, Utc::now());
        tracing::info!(total = export.total_messages, "messages exported");
        Ok(export)
    }
}
