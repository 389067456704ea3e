//! Disaster status enumeration and transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a disaster report.
///
/// All four states are reachable directly from `Pending`. The other three
/// states are terminal for the status-update operation: a declined or
/// resolved report is not re-opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "disaster_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DisasterStatus {
    /// Newly reported, waiting for a volunteer.
    Pending,
    /// Accepted by a volunteer (assignment recorded).
    Accepted,
    /// Declined.
    Declined,
    /// Resolved.
    Resolved,
}

impl DisasterStatus {
    /// Whether no further status transitions are permitted from this state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether a transition from `self` to `next` is permitted.
    pub fn can_transition_to(&self, next: DisasterStatus) -> bool {
        // The `next` value itself is unconstrained; only the current state
        // gates the transition.
        let _ = next;
        matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for DisasterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DisasterStatus {
    type Err = reliefhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "resolved" => Ok(Self::Resolved),
            _ => Err(reliefhub_core::AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: pending, accepted, declined, resolved"
            ))),
        }
    }
}
