//! Domain events emitted by the disaster lifecycle.
//!
//! Lifecycle operations emit events onto an in-process channel; the
//! notification fan-out consumer owns delivery. Keeping the boundary
//! explicit decouples "did the report get created" from "did every
//! notification get delivered".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to the disaster record lifecycle.
///
/// Fields are denormalized copies of the record at emission time so the
/// consumer never re-reads a row that may have changed since.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DisasterEvent {
    /// A new disaster report was created.
    Created {
        /// The disaster ID.
        disaster_id: Uuid,
        /// The report title.
        title: String,
        /// The categorical disaster type (e.g. "flood").
        disaster_type: String,
        /// The reporting user.
        reported_by: Uuid,
    },
    /// A disaster's status was transitioned.
    StatusChanged {
        /// The disaster ID.
        disaster_id: Uuid,
        /// The report title.
        title: String,
        /// The new status (e.g. "accepted").
        status: String,
        /// The reporting user (the notification target).
        reported_by: Uuid,
        /// The user who performed the transition.
        changed_by: Uuid,
    },
}
