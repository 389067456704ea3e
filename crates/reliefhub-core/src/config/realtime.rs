//! Real-time WebSocket configuration.

use serde::{Deserialize, Serialize};

/// Real-time push channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Whether the WebSocket endpoint is mounted. When disabled,
    /// notifications are still persisted; only the push channel is off.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
