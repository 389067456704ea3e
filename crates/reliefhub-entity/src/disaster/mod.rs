//! Disaster entity, enumerations, and the domain logic attached to them.

pub mod category;
pub mod geo;
pub mod model;
pub mod severity;
pub mod status;
pub mod visibility;

pub use category::DisasterType;
pub use geo::BoundingBox;
pub use model::{
    Disaster, DisasterFilter, DisasterUpdate, EmergencyContact, NewDisaster, Note, StatusChange,
};
pub use severity::{DamageTier, Severity};
pub use status::DisasterStatus;
pub use visibility::Visibility;
