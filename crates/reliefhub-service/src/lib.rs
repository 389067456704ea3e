//! # reliefhub-service
//!
//! Business logic service layer for ReliefHub. Each service orchestrates
//! the store interfaces, credentials, and the realtime hub to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references to capability traits, never
//! to a concrete persistence technology.

pub mod auth;
pub mod context;
pub mod disaster;
pub mod notification;

pub use auth::AuthService;
pub use context::RequestContext;
pub use disaster::DisasterService;
pub use notification::{NotificationFanout, NotificationService};
