//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;
use super::priority::NotificationPriority;

/// A fan-out message targeted at exactly one recipient.
///
/// Fan-out never merges recipients: one row exists per (event, recipient)
/// pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub recipient_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// Delivery priority.
    pub priority: NotificationPriority,
    /// Optional deep-link for the client.
    pub action_url: Option<String>,
    /// Optional structured metadata.
    pub metadata: Option<serde_json::Value>,
    /// The disaster this notification references, if any.
    pub related_disaster_id: Option<Uuid>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub recipient_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Delivery priority.
    pub priority: NotificationPriority,
    /// Optional deep-link for the client.
    pub action_url: Option<String>,
    /// Optional structured metadata.
    pub metadata: Option<serde_json::Value>,
    /// The disaster this notification references, if any.
    pub related_disaster_id: Option<Uuid>,
}

impl NewNotification {
    /// Create a disaster-referencing notification with default priority.
    pub fn for_disaster(
        recipient_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        disaster_id: Uuid,
    ) -> Self {
        Self {
            recipient_id,
            title: title.into(),
            message: message.into(),
            kind,
            priority: NotificationPriority::default(),
            action_url: None,
            metadata: None,
            related_disaster_id: Some(disaster_id),
        }
    }
}
