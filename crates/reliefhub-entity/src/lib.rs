//! # reliefhub-entity
//!
//! Domain entity models for ReliefHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! Pure domain logic that must be independently testable also lives here:
//! the disaster status state machine, the role-dependent visibility
//! predicate, and the geographic bounding-box approximation.

pub mod disaster;
pub mod notification;
pub mod user;
