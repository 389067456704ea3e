//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

use reliefhub_entity::disaster::{
    DamageTier, DisasterStatus, DisasterType, EmergencyContact, Severity,
};
use reliefhub_entity::user::UserRole;

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Requested role; admin accounts cannot be self-registered.
    pub role: UserRole,
    /// Free-text location.
    #[serde(default)]
    pub location: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Skill tags (volunteers only).
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Own-profile update request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New skill tags (volunteers only; ignored otherwise).
    pub skills: Option<Vec<String>>,
}

/// Password rotation request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

/// Coordinates of a disaster report.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CoordinatesPayload {
    /// Latitude in degrees.
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,
    /// Longitude in degrees.
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub lng: f64,
}

/// Location of a disaster report.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationPayload {
    /// Street address.
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    /// Geographic coordinates.
    #[validate(nested)]
    pub coordinates: CoordinatesPayload,
}

/// Disaster creation request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisasterRequest {
    /// Short title.
    #[validate(length(min = 5, max = 100, message = "Title must be between 5 and 100 characters"))]
    pub title: String,
    /// Full description.
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description must be between 10 and 1000 characters"
    ))]
    pub description: String,
    /// Categorical disaster type.
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    /// Severity grade.
    pub severity: Severity,
    /// Incident location.
    #[validate(nested)]
    pub location: LocationPayload,
    /// Estimated number of casualties.
    #[serde(default)]
    pub estimated_casualties: Option<i32>,
    /// Estimated damage tier.
    #[serde(default)]
    pub estimated_damage: Option<DamageTier>,
    /// Emergency contacts.
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
}

/// Status transition request.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    /// The target status.
    pub status: DisasterStatus,
    /// A note appended alongside the transition.
    pub notes: Option<String>,
}

/// Disaster details update request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDisasterRequest {
    /// New title.
    #[validate(length(min = 5, max = 100, message = "Title must be between 5 and 100 characters"))]
    pub title: Option<String>,
    /// New description.
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description must be between 10 and 1000 characters"
    ))]
    pub description: Option<String>,
    /// New severity.
    pub severity: Option<Severity>,
}

/// Query parameters for the disaster listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisasterListQuery {
    /// Match this status only.
    pub status: Option<DisasterStatus>,
    /// Match this disaster type only.
    #[serde(rename = "type")]
    pub disaster_type: Option<DisasterType>,
    /// Match this severity only.
    pub severity: Option<Severity>,
    /// Page number (1-based, default 1).
    pub page: Option<u64>,
    /// Items per page (default 10, max 50).
    pub limit: Option<u64>,
}

/// Query parameters for the nearby listing.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NearbyQuery {
    /// Latitude of the query point.
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,
    /// Longitude of the query point.
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub lng: f64,
    /// Radius in meters (default 10000, clamped to [1000, 50000]).
    pub distance: Option<f64>,
}
