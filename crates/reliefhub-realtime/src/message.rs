//! Typed outbound WebSocket messages.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reliefhub_entity::notification::NotificationKind;

/// A message pushed to a connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// A notification destined for the connected user.
    #[serde(rename_all = "camelCase")]
    Notification {
        /// Notification title.
        title: String,
        /// Notification body text.
        message: String,
        /// Notification kind.
        kind: NotificationKind,
        /// The disaster the notification references, if any.
        related_disaster_id: Option<Uuid>,
    },
}

impl OutboundMessage {
    /// Serialize for the wire. Infallible for the message shapes above.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
