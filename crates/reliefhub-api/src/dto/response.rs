//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use reliefhub_entity::disaster::Disaster;
use reliefhub_entity::notification::Notification;
use reliefhub_entity::user::User;

/// Public profile of a user — everything except the credential hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: String,
    /// Free-text location.
    pub location: String,
    /// Contact phone number.
    pub phone: String,
    /// Skill tags.
    pub skills: Vec<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Last successful login.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Profile image path.
    pub profile_image: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            location: user.location,
            phone: user.phone,
            skills: user.skills,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            profile_image: user.profile_image,
            created_at: user.created_at,
        }
    }
}

/// Registration and login response.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Signed bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: UserDto,
}

/// Single-user response.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The user.
    pub user: UserDto,
}

/// User listing response.
#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Number of users returned.
    pub count: usize,
    /// The users.
    pub users: Vec<UserDto>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Build a success message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Single-disaster response.
#[derive(Debug, Clone, Serialize)]
pub struct DisasterResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The disaster record.
    pub disaster: Disaster,
}

/// Paginated disaster listing response.
#[derive(Debug, Clone, Serialize)]
pub struct DisasterListResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Number of records on this page.
    pub count: usize,
    /// Total records matching the query.
    pub total: u64,
    /// Current page (1-based).
    pub page: u64,
    /// Total pages.
    pub pages: u64,
    /// The records.
    pub disasters: Vec<Disaster>,
}

/// Nearby disaster listing response (not paginated).
#[derive(Debug, Clone, Serialize)]
pub struct NearbyResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Number of records returned.
    pub count: usize,
    /// The records.
    pub disasters: Vec<Disaster>,
}

/// Notification listing response.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationsResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Number of notifications returned.
    pub count: usize,
    /// The notifications, newest first.
    pub notifications: Vec<Notification>,
}

/// Single-notification response.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The notification.
    pub notification: Notification,
}

/// Unread-count response.
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Number of unread notifications.
    pub count: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
