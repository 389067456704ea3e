//! Authorization policy for disaster lifecycle operations.
//!
//! Permission checks are dispatched through a single matrix keyed by
//! (action, role, relation-to-record) so the full authorization surface is
//! auditable in one place and testable independently of the lifecycle
//! logic.

use reliefhub_core::error::AppError;
use reliefhub_entity::user::UserRole;

/// A mutating operation on a disaster record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisasterAction {
    /// Transition the record's status.
    UpdateStatus,
    /// Edit title/description/severity.
    EditDetails,
    /// Remove the record.
    Delete,
}

/// The caller's relation to the record being acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The caller reported the record.
    Reporter,
    /// The caller has no ownership relation to the record.
    None,
}

impl Relation {
    /// Compute the caller's relation from the record's reporter.
    pub fn of(caller_id: uuid::Uuid, reported_by: uuid::Uuid) -> Self {
        if caller_id == reported_by {
            Self::Reporter
        } else {
            Self::None
        }
    }
}

/// Whether `role` with `relation` to the record may perform `action`.
pub fn is_allowed(action: DisasterAction, role: UserRole, relation: Relation) -> bool {
    use DisasterAction::*;
    use UserRole::*;

    match (action, role) {
        // Admins and volunteers transition any record; reporters only their own.
        (UpdateStatus, Admin | Volunteer) => true,
        (UpdateStatus, User) => relation == Relation::Reporter,

        // Details are edited by admins or the reporter, regardless of role.
        (EditDetails, Admin) => true,
        (EditDetails, User | Volunteer) => relation == Relation::Reporter,

        (Delete, Admin) => true,
        (Delete, User | Volunteer) => false,
    }
}

/// Check the matrix, failing with `Forbidden` when the action is denied.
pub fn authorize_disaster(
    action: DisasterAction,
    role: UserRole,
    relation: Relation,
) -> Result<(), AppError> {
    if is_allowed(action, role, relation) {
        Ok(())
    } else {
        Err(AppError::forbidden(match action {
            DisasterAction::UpdateStatus | DisasterAction::EditDetails => {
                "Not authorized to update this disaster"
            }
            DisasterAction::Delete => "Not authorized to delete this disaster",
        }))
    }
}

/// Check that the caller holds the required role exactly.
pub fn require_role(actual: UserRole, required: UserRole) -> Result<(), AppError> {
    if actual == required {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Requires the '{required}' role"
        )))
    }
}
