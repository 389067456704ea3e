//! # reliefhub-storage
//!
//! Image storage for disaster reports: a local filesystem
//! [`reliefhub_core::traits::StorageProvider`] implementation plus the
//! [`ImageStore`] that enforces the upload policy (image content types
//! only, at most 5 files of 5 MiB each per report).

pub mod images;
pub mod local;

pub use images::{ImageStore, MAX_IMAGES_PER_REPORT, MAX_IMAGE_BYTES, validate_upload};
pub use local::LocalStorageProvider;
