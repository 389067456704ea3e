//! Upload policy and name generation for disaster report images.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use reliefhub_core::error::AppError;
use reliefhub_core::result::AppResult;
use reliefhub_core::traits::storage::StorageProvider;

/// Maximum size of a single uploaded image.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Maximum number of images per disaster report.
pub const MAX_IMAGES_PER_REPORT: usize = 5;

/// Stores report images on a provider after enforcing the upload policy.
#[derive(Debug, Clone)]
pub struct ImageStore {
    provider: Arc<dyn StorageProvider>,
}

impl ImageStore {
    /// Create an image store over the given provider.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Validate and store one uploaded image, returning its stored path.
    pub async fn save(
        &self,
        original_name: Option<&str>,
        content_type: Option<&str>,
        data: Bytes,
    ) -> AppResult<String> {
        validate_upload(content_type, data.len())?;

        let path = generate_name(original_name);
        self.provider.write(&path, data).await?;

        info!(path, "Stored report image");
        Ok(path)
    }

    /// Delete a stored image (best-effort; missing files are not an error).
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.provider.delete(path).await
    }
}

/// Check one upload against the policy without touching storage, so a
/// batch can be rejected before any file is written.
pub fn validate_upload(content_type: Option<&str>, len: usize) -> AppResult<()> {
    let is_image = content_type
        .map(|ct| ct.starts_with("image/"))
        .unwrap_or(false);
    if !is_image {
        return Err(AppError::validation("Only image files are allowed"));
    }

    if len > MAX_IMAGE_BYTES {
        return Err(AppError::validation("File too large. Maximum size is 5MB"));
    }
    Ok(())
}

/// Generate a collision-resistant stored name, keeping the original
/// extension when present.
fn generate_name(original_name: Option<&str>) -> String {
    let ext = original_name
        .and_then(|name| name.rsplit_once('.').map(|(_, e)| e))
        .filter(|e| !e.is_empty() && e.len() <= 8)
        .unwrap_or("jpg");

    format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        rand::random::<u32>(),
        ext
    )
}
