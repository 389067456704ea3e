//! Role-dependent visibility predicate for disaster listings.
//!
//! The predicate is computed once per request from the caller's role and
//! composes conjunctively with caller-supplied filters. The PostgreSQL
//! store translates it into SQL; the in-memory store and the unit tests
//! evaluate it directly via [`Visibility::matches`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserRole;

use super::model::Disaster;
use super::status::DisasterStatus;

/// Which disaster records a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// No restriction (admins).
    All,
    /// Records the caller reported (reporters).
    ReportedBy(Uuid),
    /// The pending pool plus records assigned to the caller (volunteers).
    PoolOrAssigned(Uuid),
}

impl Visibility {
    /// Compute the visibility predicate for a caller.
    pub fn for_caller(role: UserRole, caller_id: Uuid) -> Self {
        match role {
            UserRole::Admin => Self::All,
            UserRole::Volunteer => Self::PoolOrAssigned(caller_id),
            UserRole::User => Self::ReportedBy(caller_id),
        }
    }

    /// Whether the given record is visible under this predicate.
    pub fn matches(&self, disaster: &Disaster) -> bool {
        match self {
            Self::All => true,
            Self::ReportedBy(caller) => disaster.reported_by == *caller,
            Self::PoolOrAssigned(caller) => {
                disaster.status == DisasterStatus::Pending
                    || disaster.assigned_to == Some(*caller)
            }
        }
    }
}
