//! New-submission notifications for the site owner.
//!
//! The notifier subscribes to the [`EventBus`] and turns every
//! [`MessageEvent::MessageSubmitted`] into a [`Notification`]. Delivery is
//! log-only: the rendered notification is written through `tracing`, and
//! an outbound mail relay can tail those records. Failures here never reach
//! the submitter.

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::domain::{EventBus, MessageEvent};

/// A rendered owner notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Renders and delivers owner notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    recipient: String,
}

impl Notifier {
    /// Creates a notifier addressing `recipient`.
    #[must_use]
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    /// Renders the notification for `event`, or `None` for events the owner
    /// is not notified about.
    #[must_use]
    pub fn render(&self, event: &MessageEvent) -> Option<Notification> {
        let MessageEvent::MessageSubmitted {
            message_id,
            name,
            email,
            subject,
            preview,
            availability_preference,
            timestamp,
        } = event
        else {
            return None;
        };

        let availability = availability_preference.map_or("no preference", |a| a.as_str());
        let body = format!(
            "New portfolio contact submission\n\n\
             Name: {name}\n\
             Email: {email}\n\
             Subject: {subject}\n\
             Availability: {availability}\n\n\
             {preview}\n\n\
             Submitted: {}\n\
             Message ID: {message_id}\n\
             Reply directly to: {email}\n",
            timestamp.to_rfc3339()
        );

        Some(Notification {
            to: self.recipient.clone(),
            subject: format!("New Portfolio Contact: {subject}"),
            body,
        })
    }

    /// Spawns the delivery loop on the current runtime.
    ///
    /// The task ends when every [`EventBus`] sender is dropped.
    #[must_use]
    pub fn spawn(self, event_bus: &EventBus) -> JoinHandle<()> {
        let mut rx = event_bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if let Some(notification) = self.render(&event) {
                            deliver(&notification);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "notifier lagged; notifications dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            tracing::debug!("notifier stopped");
        })
    }
}

fn deliver(notification: &Notification) {
    tracing::info!(
        to = %notification.to,
        subject = %notification.subject,
        body = %notification.body,
        "owner notification"
    );
}
