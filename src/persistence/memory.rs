//! In-process message store.
//!
//! [`InMemoryMessageStore`] keeps every message in a `HashMap` behind a
//! single [`tokio::sync::RwLock`]. Reads run concurrently; each write holds
//! the lock for its whole read-check-write, which is what makes status
//! changes and deletions atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MessageStore, StatusUpdate};
use crate::domain::{
    ContactMessage, MessageId, StatusChange, StatusFilter, TransitionPolicy, stored_now,
};
use crate::error::PortfolioError;

/// Message store that lives for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<HashMap<MessageId, ContactMessage>>,
}

impl InMemoryMessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: ContactMessage) -> Result<(), PortfolioError> {
        let mut map = self.messages.write().await;
        if map.contains_key(&message.id) {
            return Err(PortfolioError::Internal(format!(
                "message {} already exists",
                message.id
            )));
        }
        map.insert(message.id, message);
        Ok(())
    }

    async fn get(&self, id: MessageId) -> Result<ContactMessage, PortfolioError> {
        let map = self.messages.read().await;
        map.get(&id)
            .cloned()
            .ok_or(PortfolioError::MessageNotFound(id))
    }

    async fn list(&self, filter: StatusFilter) -> Result<Vec<ContactMessage>, PortfolioError> {
        let map = self.messages.read().await;
        let mut messages: Vec<ContactMessage> = map
            .values()
            .filter(|m| filter.matches(m.status))
            .cloned()
            .collect();
        drop(map);
        messages.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(messages)
    }

    async fn update_status(
        &self,
        id: MessageId,
        change: StatusChange,
        policy: TransitionPolicy,
    ) -> Result<StatusUpdate, PortfolioError> {
        let mut map = self.messages.write().await;
        let stored = map.get_mut(&id).ok_or(PortfolioError::MessageNotFound(id))?;

        // Work on a copy so a refused change leaves the stored record untouched.
        let mut updated = stored.clone();
        let previous = updated.status;
        let changed = updated.apply_status(&change, policy, stored_now())?;
        if changed {
            *stored = updated.clone();
        }

        Ok(StatusUpdate {
            message: updated,
            previous,
            changed,
        })
    }

    async fn remove(&self, id: MessageId) -> Result<ContactMessage, PortfolioError> {
        let mut map = self.messages.write().await;
        map.remove(&id).ok_or(PortfolioError::MessageNotFound(id))
    }

    async fn count(&self) -> Result<u64, PortfolioError> {
        let len = self.messages.read().await.len();
        Ok(u64::try_from(len).unwrap_or(u64::MAX))
    }

    async fn ping(&self) -> Result<(), PortfolioError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
