//! # reliefhub-core
//!
//! Core crate for ReliefHub. Contains configuration schemas, domain events,
//! pagination types, the storage-provider trait, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other ReliefHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
