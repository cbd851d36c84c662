//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::api::dto::ContactInfo;
use crate::config::AppConfig;
use crate::domain::EventBus;
use crate::persistence::{InMemoryMessageStore, MessageStore};
use crate::service::{AdminService, ContactService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Public submission pipeline.
    pub contact_service: Arc<ContactService>,
    /// Admin triage workflow.
    pub admin_service: Arc<AdminService>,
    /// Event bus for notification subscribers.
    pub event_bus: EventBus,
    /// Static contact metadata.
    pub contact_info: Arc<ContactInfo>,
    /// Bearer token guarding the admin routes; `None` admits everyone.
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    /// Wires services over `store` according to `config`.
    #[must_use]
    pub fn new(config: &AppConfig, store: Arc<dyn MessageStore>) -> Self {
        let event_bus = EventBus::new(config.event_bus_capacity);
        let contact_service = Arc::new(ContactService::new(Arc::clone(&store), event_bus.clone()));
        let admin_service = Arc::new(AdminService::new(
            store,
            event_bus.clone(),
            config.transition_policy,
            config.recent_window_days,
        ));

        Self {
            contact_service,
            admin_service,
            event_bus,
            contact_info: Arc::new(config.contact_info.clone()),
            admin_token: config.admin_token.as_deref().map(Arc::from),
        }
    }

    /// State over a fresh [`InMemoryMessageStore`].
    #[must_use]
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(config, Arc::new(InMemoryMessageStore::new()))
    }
}
