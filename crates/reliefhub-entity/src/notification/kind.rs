//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// Category of a notification, used by clients for grouping and icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new disaster was reported (fan-out to responders).
    DisasterAlert,
    /// The status of a report changed (directed at the reporter).
    StatusUpdate,
    /// A report was assigned to a volunteer.
    Assignment,
    /// System-level message.
    System,
    /// Emergency broadcast.
    Emergency,
}

impl NotificationKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DisasterAlert => "disaster_alert",
            Self::StatusUpdate => "status_update",
            Self::Assignment => "assignment",
            Self::System => "system",
            Self::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
