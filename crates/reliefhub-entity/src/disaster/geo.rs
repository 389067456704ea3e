//! Geographic bounding-box approximation for the nearby query.

use serde::{Deserialize, Serialize};

/// Meters per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_000.0;

/// A rectangular (degree-based) stand-in for a circular radius query.
///
/// The box spans `±(distance_m / 111km)` degrees on each axis around the
/// query point. This flat-earth approximation is accurate at the system's
/// intended radius (a few tens of kilometers) but degrades near the poles
/// and the date line; it is a documented approximation, not a defect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge in degrees.
    pub min_lat: f64,
    /// Northern edge in degrees.
    pub max_lat: f64,
    /// Western edge in degrees.
    pub min_lng: f64,
    /// Eastern edge in degrees.
    pub max_lng: f64,
}

impl BoundingBox {
    /// Build the box around a query point with the given radius in meters.
    pub fn around(lat: f64, lng: f64, distance_m: f64) -> Self {
        let deg = distance_m / METERS_PER_DEGREE;
        Self {
            min_lat: lat - deg,
            max_lat: lat + deg,
            min_lng: lng - deg,
            max_lng: lng + deg,
        }
    }

    /// Whether a coordinate pair falls within the box (edges inclusive).
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}
