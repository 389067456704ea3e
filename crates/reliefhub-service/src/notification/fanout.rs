//! Notification fan-out consumer.
//!
//! Consumes [`DisasterEvent`]s from the lifecycle channel, resolves the
//! recipient set, persists one notification row per recipient, and pushes
//! a realtime copy to each recipient's live connections. Per-recipient
//! failures are logged and isolated: they never fail the other recipients,
//! and the triggering operation has already returned by the time the
//! fan-out runs.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use reliefhub_core::events::DisasterEvent;
use reliefhub_database::store::{NotificationStore, UserStore};
use reliefhub_entity::notification::{NewNotification, NotificationKind};
use reliefhub_entity::user::UserRole;
use reliefhub_realtime::hub::ConnectionHub;
use reliefhub_realtime::message::OutboundMessage;

/// Resolves recipients and delivers notifications for lifecycle events.
#[derive(Clone)]
pub struct NotificationFanout {
    users: Arc<dyn UserStore>,
    notifications: Arc<dyn NotificationStore>,
    hub: Arc<ConnectionHub>,
}

impl NotificationFanout {
    /// Creates a new fan-out component.
    pub fn new(
        users: Arc<dyn UserStore>,
        notifications: Arc<dyn NotificationStore>,
        hub: Arc<ConnectionHub>,
    ) -> Self {
        Self {
            users,
            notifications,
            hub,
        }
    }

    /// Spawns the consumer task draining the event channel.
    pub fn spawn(self: Arc<Self>, mut rx: mpsc::UnboundedReceiver<DisasterEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                self.handle_event(&event).await;
            }
            info!("Notification fan-out channel closed");
        })
    }

    /// Processes one lifecycle event.
    ///
    /// Exposed so tests can drain events deterministically without the
    /// spawned task.
    pub async fn handle_event(&self, event: &DisasterEvent) {
        match event {
            DisasterEvent::Created {
                disaster_id,
                title,
                disaster_type,
                ..
            } => {
                let recipients = match self
                    .users
                    .find_active_by_roles(&[UserRole::Volunteer, UserRole::Admin])
                    .await
                {
                    Ok(users) => users,
                    Err(e) => {
                        error!(disaster_id = %disaster_id, error = %e, "Failed to resolve fan-out recipients");
                        return;
                    }
                };

                let message =
                    format!("A new {disaster_type} disaster has been reported: {title}");
                for recipient in recipients {
                    self.deliver(NewNotification::for_disaster(
                        recipient.id,
                        NotificationKind::DisasterAlert,
                        "New Disaster Reported",
                        message.clone(),
                        *disaster_id,
                    ))
                    .await;
                }
            }
            DisasterEvent::StatusChanged {
                disaster_id,
                title,
                status,
                reported_by,
                ..
            } => {
                let message =
                    format!("Your disaster \"{title}\" status has been updated to {status}");
                self.deliver(NewNotification::for_disaster(
                    *reported_by,
                    NotificationKind::StatusUpdate,
                    "Disaster Status Updated",
                    message,
                    *disaster_id,
                ))
                .await;
            }
        }
    }

    /// Persist one notification row and push the realtime copy.
    async fn deliver(&self, data: NewNotification) {
        let recipient = data.recipient_id;
        match self.notifications.create(&data).await {
            Ok(notification) => {
                self.hub.push_to_user(
                    recipient,
                    &OutboundMessage::Notification {
                        title: notification.title.clone(),
                        message: notification.message.clone(),
                        kind: notification.kind,
                        related_disaster_id: notification.related_disaster_id,
                    },
                );
            }
            Err(e) => {
                // Isolated per recipient: the remaining fan-out continues.
                error!(recipient = %recipient, error = %e, "Failed to persist notification");
            }
        }
    }
}
