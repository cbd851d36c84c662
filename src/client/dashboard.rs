//! Admin dashboard state.
//!
//! Holds the last good snapshot of the message list and stats. Every action
//! either commits a complete new snapshot or leaves the previous one in
//! place and records the failure in [`AdminDashboard::last_error`]. Nothing
//! is retried automatically.

use std::collections::HashSet;

use super::{AdminApi, ClientError, ExportDownload};
use crate::api::dto::Pagination;
use crate::domain::{
    ContactMessage, DashboardStats, MessageId, MessageStatus, StatusChange, StatusFilter,
};

/// Admin dashboard view model.
#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    messages: Vec<ContactMessage>,
    total: u64,
    stats: Option<DashboardStats>,
    filter: StatusFilter,
    busy: HashSet<MessageId>,
    last_error: Option<String>,
}

impl AdminDashboard {
    /// Empty dashboard showing every status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in the current view, most recent first.
    #[must_use]
    pub fn messages(&self) -> &[ContactMessage] {
        &self.messages
    }

    /// Messages matching the filter on the server at the last load.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Last fetched statistics.
    #[must_use]
    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    /// Active status filter.
    #[must_use]
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Whether an action on `id` is in flight.
    #[must_use]
    pub fn is_busy(&self, id: MessageId) -> bool {
        self.busy.contains(&id)
    }

    /// Message of the last failed action, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetches the list for the active filter and the stats. Both must
    /// succeed for the snapshot to change.
    ///
    /// # Errors
    ///
    /// Returns the first failing call's [`ClientError`].
    pub async fn load<A: AdminApi + ?Sized>(&mut self, api: &A) -> Result<(), ClientError> {
        // A reload supersedes any action whose future was dropped mid-flight.
        self.busy.clear();
        let filter = self.filter;
        let fetched = async {
            let list = api.list_messages(filter, Pagination::default()).await?;
            let stats = api.stats().await?;
            Ok::<_, ClientError>((list, stats))
        }
        .await;

        match fetched {
            Ok((list, stats)) => {
                self.messages = list.messages;
                self.total = list.total;
                self.stats = Some(stats);
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.record(e)),
        }
    }

    /// Re-runs [`load`](Self::load) after a failure.
    ///
    /// # Errors
    ///
    /// Returns the first failing call's [`ClientError`].
    pub async fn retry<A: AdminApi + ?Sized>(&mut self, api: &A) -> Result<(), ClientError> {
        self.load(api).await
    }

    /// Switches the filter and reloads. On failure the previous filter stays
    /// active.
    ///
    /// # Errors
    ///
    /// Returns the first failing call's [`ClientError`].
    pub async fn set_filter<A: AdminApi + ?Sized>(
        &mut self,
        api: &A,
        filter: StatusFilter,
    ) -> Result<(), ClientError> {
        let previous = std::mem::replace(&mut self.filter, filter);
        let result = self.load(api).await;
        if result.is_err() {
            self.filter = previous;
        }
        result
    }

    /// Moves `id` to `status`, guarded by the version in the current view.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the status call. A failed stats
    /// refresh afterwards is only recorded in
    /// [`last_error`](Self::last_error).
    pub async fn update_status<A: AdminApi + ?Sized>(
        &mut self,
        api: &A,
        id: MessageId,
        status: MessageStatus,
    ) -> Result<ContactMessage, ClientError> {
        let change = self
            .messages
            .iter()
            .find(|m| m.id == id)
            .map_or(StatusChange::to(status), |m| {
                StatusChange::guarded(status, m.version)
            });

        self.busy.insert(id);
        let result = api.set_status(id, change).await;
        self.busy.remove(&id);

        let updated = result.map_err(|e| self.record(e))?;
        let position = self.messages.iter().position(|m| m.id == id);
        match position {
            Some(i) if self.filter.matches(updated.status) => {
                if let Some(slot) = self.messages.get_mut(i) {
                    *slot = updated.clone();
                }
            }
            Some(i) => {
                self.messages.remove(i);
                self.total = self.total.saturating_sub(1);
            }
            None => {}
        }
        self.last_error = None;
        self.refresh_stats(api).await;
        Ok(updated)
    }

    /// Deletes `id`.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the delete call.
    pub async fn delete<A: AdminApi + ?Sized>(
        &mut self,
        api: &A,
        id: MessageId,
    ) -> Result<(), ClientError> {
        self.busy.insert(id);
        let result = api.delete_message(id).await;
        self.busy.remove(&id);

        result.map_err(|e| self.record(e))?;
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        if self.messages.len() < before {
            self.total = self.total.saturating_sub(1);
        }
        self.last_error = None;
        self.refresh_stats(api).await;
        Ok(())
    }

    /// Downloads every message.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the export call.
    pub async fn export<A: AdminApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<ExportDownload, ClientError> {
        let download = api.export_messages().await.map_err(|e| self.record(e))?;
        self.last_error = None;
        Ok(download)
    }

    async fn refresh_stats<A: AdminApi + ?Sized>(&mut self, api: &A) {
        match api.stats().await {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => {
                self.record(e);
            }
        }
    }

    fn record(&mut self, e: ClientError) -> ClientError {
        tracing::debug!(error = %e, "dashboard action failed");
        self.last_error = Some(e.user_message());
        e
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use super::*;
    use crate::api::dto::MessageListResponse;
    use crate::client::error::codes;
    use crate::domain::dashboard_stats::RECENT_WINDOW_DAYS;
    use crate::domain::{EventBus, MessageExport, TransitionPolicy, ValidSubmission};
    use crate::error::PortfolioError;
    use crate::persistence::{InMemoryMessageStore, MessageStore};
    use crate::service::AdminService;

    /// Serves the admin calls straight from an [`AdminService`], with an
    /// optional injected failure for the next call.
    #[derive(Debug)]
    struct LocalAdmin {
        service: AdminService,
        fail_next: Mutex<Option<ClientError>>,
    }

    impl LocalAdmin {
        fn new() -> Self {
            let store: Arc<dyn MessageStore> = Arc::new(InMemoryMessageStore::new());
            Self {
                service: AdminService::new(
                    store,
                    EventBus::new(16),
                    TransitionPolicy::ForwardOnly,
                    RECENT_WINDOW_DAYS,
                ),
                fail_next: Mutex::new(None),
            }
        }

        async fn seed(&self, name: &str) -> MessageId {
            let message = ContactMessage::from_submission(
                ValidSubmission {
                    name: name.to_string(),
                    email: "someone@example.com".to_string(),
                    subject: "Hi".to_string(),
                    message: "Hello".to_string(),
                    availability_preference: None,
                    ip_address: None,
                },
                Utc::now(),
            );
            let id = message.id;
            let Ok(()) = self.service.store().insert(message).await else {
                panic!("seed insert failed");
            };
            id
        }

        async fn fail_next_with(&self, e: ClientError) {
            *self.fail_next.lock().await = Some(e);
        }

        async fn check(&self) -> Result<(), ClientError> {
            match self.fail_next.lock().await.take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    fn client_error(e: &PortfolioError) -> ClientError {
        ClientError::Api {
            status: e.status_code().as_u16(),
            code: e.error_code(),
            message: e.to_string(),
            retryable: e.is_retryable(),
        }
    }

    #[async_trait]
    impl AdminApi for LocalAdmin {
        async fn list_messages(
            &self,
            filter: StatusFilter,
            page: Pagination,
        ) -> Result<MessageListResponse, ClientError> {
            self.check().await?;
            let all = self.service.list(filter).await.map_err(|e| client_error(&e))?;
            let (messages, total) = page.apply(all);
            let showing = messages.len() as u64;
            Ok(MessageListResponse {
                messages,
                total: total as u64,
                showing,
                skip: page.skip,
                limit: page.limit,
                has_more: false,
            })
        }

        async fn stats(&self) -> Result<DashboardStats, ClientError> {
            self.check().await?;
            self.service.stats().await.map_err(|e| client_error(&e))
        }

        async fn set_status(
            &self,
            id: MessageId,
            change: StatusChange,
        ) -> Result<ContactMessage, ClientError> {
            self.check().await?;
            self.service
                .set_status(id, change)
                .await
                .map_err(|e| client_error(&e))
        }

        async fn delete_message(&self, id: MessageId) -> Result<(), ClientError> {
            self.check().await?;
            self.service.delete(id).await.map_err(|e| client_error(&e))
        }

        async fn export_messages(&self) -> Result<ExportDownload, ClientError> {
            self.check().await?;
            let export: MessageExport =
                self.service.export().await.map_err(|e| client_error(&e))?;
            Ok(ExportDownload {
                file_name: export.file_name(),
                export,
            })
        }
    }

    fn outage() -> ClientError {
        ClientError::Transport("connection refused".to_string())
    }

    #[tokio::test]
    async fn load_populates_list_and_stats() {
        let api = LocalAdmin::new();
        api.seed("A").await;
        api.seed("B").await;
        let mut dash = AdminDashboard::new();

        let Ok(()) = dash.load(&api).await else {
            panic!("load failed");
        };
        assert_eq!(dash.messages().len(), 2);
        assert_eq!(dash.total(), 2);
        let Some(stats) = dash.stats() else {
            panic!("stats missing");
        };
        assert_eq!(stats.status_breakdown.new, 2);
        assert!(dash.last_error().is_none());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_snapshot() {
        let api = LocalAdmin::new();
        api.seed("A").await;
        let mut dash = AdminDashboard::new();
        let Ok(()) = dash.load(&api).await else {
            panic!("load failed");
        };

        api.seed("B").await;
        api.fail_next_with(outage()).await;
        assert!(dash.load(&api).await.is_err());
        assert_eq!(dash.messages().len(), 1);
        assert!(dash.last_error().is_some());

        let Ok(()) = dash.retry(&api).await else {
            panic!("retry failed");
        };
        assert_eq!(dash.messages().len(), 2);
        assert!(dash.last_error().is_none());
    }

    #[tokio::test]
    async fn failed_filter_switch_keeps_old_filter() {
        let api = LocalAdmin::new();
        api.seed("A").await;
        let mut dash = AdminDashboard::new();
        let Ok(()) = dash.load(&api).await else {
            panic!("load failed");
        };

        api.fail_next_with(outage()).await;
        let read = StatusFilter::Only(MessageStatus::Read);
        assert!(dash.set_filter(&api, read).await.is_err());
        assert_eq!(dash.filter(), StatusFilter::All);
        assert_eq!(dash.messages().len(), 1);

        let Ok(()) = dash.set_filter(&api, read).await else {
            panic!("filter switch failed");
        };
        assert_eq!(dash.filter(), read);
        assert!(dash.messages().is_empty());
    }

    #[tokio::test]
    async fn status_update_leaves_filtered_view_and_refreshes_stats() {
        let api = LocalAdmin::new();
        let id = api.seed("A").await;
        let mut dash = AdminDashboard::new();
        let Ok(()) = dash
            .set_filter(&api, StatusFilter::Only(MessageStatus::New))
            .await
        else {
            panic!("load failed");
        };

        let Ok(updated) = dash.update_status(&api, id, MessageStatus::Read).await else {
            panic!("update failed");
        };
        assert_eq!(updated.status, MessageStatus::Read);
        assert_eq!(updated.version, 2);
        assert!(dash.messages().is_empty());
        assert!(!dash.is_busy(id));
        let Some(stats) = dash.stats() else {
            panic!("stats missing");
        };
        assert_eq!(stats.status_breakdown.read, 1);
        assert_eq!(stats.status_breakdown.new, 0);
    }

    #[tokio::test]
    async fn stale_view_reports_conflict() {
        let api = LocalAdmin::new();
        let id = api.seed("A").await;
        let mut dash = AdminDashboard::new();
        let Ok(()) = dash.load(&api).await else {
            panic!("load failed");
        };

        // Someone else marks it read first.
        let Ok(_) = api
            .service
            .set_status(id, StatusChange::to(MessageStatus::Read))
            .await
        else {
            panic!("concurrent update failed");
        };

        let Err(e) = dash.update_status(&api, id, MessageStatus::Responded).await else {
            panic!("stale update accepted");
        };
        assert_eq!(e.code(), Some(codes::VERSION_CONFLICT));
        assert!(!e.is_retryable());
        assert_eq!(dash.messages().first().map(|m| m.status), Some(MessageStatus::New));
        assert!(dash.last_error().is_some());
    }

    #[tokio::test]
    async fn delete_removes_row_and_updates_stats() {
        let api = LocalAdmin::new();
        let id = api.seed("A").await;
        api.seed("B").await;
        let mut dash = AdminDashboard::new();
        let Ok(()) = dash.load(&api).await else {
            panic!("load failed");
        };

        let Ok(()) = dash.delete(&api, id).await else {
            panic!("delete failed");
        };
        assert_eq!(dash.messages().len(), 1);
        assert_eq!(dash.total(), 1);
        assert_eq!(dash.stats().map(|s| s.total_messages), Some(1));

        let Err(_) = dash.delete(&api, id).await else {
            panic!("second delete succeeded");
        };
        assert_eq!(dash.messages().len(), 1);
    }

    #[tokio::test]
    async fn export_returns_everything() {
        let api = LocalAdmin::new();
        api.seed("A").await;
        api.seed("B").await;
        let mut dash = AdminDashboard::new();

        let Ok(download) = dash.export(&api).await else {
            panic!("export failed");
        };
        assert_eq!(download.export.total_messages, 2);
        assert!(download.file_name.starts_with("portfolio-messages-"));
    }
}
