//! # reliefhub-auth
//!
//! Authentication and authorization for ReliefHub.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing
//! - `policy` — the (action, role, relation) authorization matrix

pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use policy::{DisasterAction, Relation};
