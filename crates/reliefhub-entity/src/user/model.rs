//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user in the ReliefHub system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address (globally unique, case-insensitive).
    pub email: String,
    /// Argon2id password hash. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role (drives visibility and lifecycle permissions).
    pub role: UserRole,
    /// Free-text location.
    pub location: String,
    /// Contact phone number.
    pub phone: String,
    /// Skill tags. Meaningful only for volunteers; empty otherwise.
    #[sqlx(json)]
    pub skills: Vec<String>,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Stored path of the profile image, if any.
    pub profile_image: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Free-text location.
    pub location: String,
    /// Contact phone number.
    pub phone: String,
    /// Skill tags (volunteers only).
    pub skills: Vec<String>,
}

/// Partial update of a user's own profile. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New skill tags.
    pub skills: Option<Vec<String>>,
}
