//! Image storage configuration.

use serde::{Deserialize, Serialize};

/// File storage configuration for disaster report images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded images.
    #[serde(default = "default_root")]
    pub root: String,
    /// Maximum request body size in bytes (covers a full multipart upload).
    #[serde(default = "default_max_body")]
    pub max_body_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_body_bytes: default_max_body(),
        }
    }
}

fn default_root() -> String {
    "./uploads".to_string()
}

fn default_max_body() -> usize {
    // 5 images at 5 MiB each, plus form-field overhead.
    30 * 1024 * 1024
}
