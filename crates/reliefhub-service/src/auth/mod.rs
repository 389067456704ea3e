//! Registration, login, profile, and admin account management.

pub mod service;

pub use service::{AuthService, Registration};
