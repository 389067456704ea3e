//! # reliefhub-api
//!
//! HTTP API layer for ReliefHub built on Axum.
//!
//! Provides all REST endpoints, the WebSocket upgrade, middleware (request
//! logging, CORS), extractors, and DTOs. Error-to-HTTP mapping lives on
//! [`reliefhub_core::error::AppError`] itself.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
