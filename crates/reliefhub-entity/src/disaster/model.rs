//! Disaster entity model and the value objects carried on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::DisasterType;
use super::severity::{DamageTier, Severity};
use super::status::DisasterStatus;

/// A free-form note appended to a disaster report.
///
/// Notes are append-only; existing entries are never edited or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// The note text.
    pub text: String,
    /// The user who added the note.
    pub author_id: Uuid,
    /// When the note was added.
    pub added_at: DateTime<Utc>,
}

/// An emergency contact attached to a disaster report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    /// Contact name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
}

/// A single incident report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Disaster {
    /// Unique disaster identifier.
    pub id: Uuid,
    /// Short title (5-100 characters).
    pub title: String,
    /// Full description (10-1000 characters).
    pub description: String,
    /// Categorical disaster type.
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    /// Severity grade.
    pub severity: Severity,
    /// Street address of the incident.
    pub address: String,
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude: f64,
    /// Lifecycle status.
    pub status: DisasterStatus,
    /// Stored paths of uploaded images.
    #[sqlx(json)]
    pub images: Vec<String>,
    /// Estimated number of casualties, if reported.
    pub estimated_casualties: Option<i32>,
    /// Estimated damage tier, if reported.
    pub estimated_damage: Option<DamageTier>,
    /// Emergency contacts for the incident.
    #[sqlx(json)]
    pub emergency_contacts: Vec<EmergencyContact>,
    /// Append-only, order-preserving notes.
    #[sqlx(json)]
    pub notes: Vec<Note>,
    /// The reporting user.
    pub reported_by: Uuid,
    /// The accepting volunteer, set only on acceptance.
    pub assigned_to: Option<Uuid>,
    /// When the report was resolved.
    pub resolved_at: Option<DateTime<Utc>>,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// When the report was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new disaster report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDisaster {
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Categorical disaster type.
    pub disaster_type: DisasterType,
    /// Severity grade.
    pub severity: Severity,
    /// Street address.
    pub address: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Stored paths of images uploaded with the report.
    pub images: Vec<String>,
    /// Estimated number of casualties.
    pub estimated_casualties: Option<i32>,
    /// Estimated damage tier.
    pub estimated_damage: Option<DamageTier>,
    /// Emergency contacts.
    pub emergency_contacts: Vec<EmergencyContact>,
    /// The reporting user.
    pub reported_by: Uuid,
}

/// Partial update of a disaster's editable details. `None` fields are left
/// untouched. Status, reporter, and assignment are deliberately absent;
/// they move only through their own operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisasterUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New severity.
    pub severity: Option<Severity>,
}

/// A status transition to apply atomically to a pending record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    /// The target status.
    pub status: DisasterStatus,
    /// Volunteer assignment recorded with an acceptance.
    pub assigned_to: Option<Uuid>,
    /// Resolution timestamp recorded with a resolution.
    pub resolved_at: Option<DateTime<Utc>>,
    /// A note appended alongside the transition.
    pub note: Option<Note>,
}

/// Caller-supplied filters for the disaster listing. All present fields
/// must match (conjunctive), on top of the role visibility predicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisasterFilter {
    /// Match this status only.
    pub status: Option<DisasterStatus>,
    /// Match this disaster type only.
    pub disaster_type: Option<DisasterType>,
    /// Match this severity only.
    pub severity: Option<Severity>,
}

impl DisasterFilter {
    /// Whether the given record satisfies every present filter field.
    pub fn matches(&self, disaster: &Disaster) -> bool {
        self.status.is_none_or(|s| disaster.status == s)
            && self.disaster_type.is_none_or(|t| disaster.disaster_type == t)
            && self.severity.is_none_or(|s| disaster.severity == s)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_disaster(reported_by: Uuid) -> Disaster {
        Disaster {
            id: Uuid::new_v4(),
            title: "River flooding downtown".to_string(),
            description: "Water level rising fast near the old bridge".to_string(),
            disaster_type: DisasterType::Flood,
            severity: Severity::High,
            address: "12 Bridge St".to_string(),
            latitude: 48.2,
            longitude: 16.37,
            status: DisasterStatus::Pending,
            images: vec![],
            estimated_casualties: None,
            estimated_damage: None,
            emergency_contacts: vec![],
            notes: vec![],
            reported_by,
            assigned_to: None,
            resolved_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_type_field_serializes_as_type() {
        let disaster = sample_disaster(Uuid::new_v4());
        let json = serde_json::to_value(&disaster).unwrap();
        assert_eq!(json["type"], "flood");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["status"], "pending");
        assert!(json.get("reportedBy").is_some());
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let disaster = sample_disaster(Uuid::new_v4());

        let empty = DisasterFilter::default();
        assert!(empty.matches(&disaster));

        let matching = DisasterFilter {
            status: Some(DisasterStatus::Pending),
            disaster_type: Some(DisasterType::Flood),
            severity: None,
        };
        assert!(matching.matches(&disaster));

        let wrong_severity = DisasterFilter {
            status: Some(DisasterStatus::Pending),
            disaster_type: Some(DisasterType::Flood),
            severity: Some(Severity::Low),
        };
        assert!(!wrong_severity.matches(&disaster));
    }
}
