//! Geographic coordinates.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Base URL for map links built from coordinates.
pub const MAPS_QUERY_URL: &str = "https://maps.google.com/?q=";

/// Errors that can occur when constructing [`Coordinates`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinatesError {
    /// Latitude is NaN, infinite, or outside [-90, 90].
    #[error("latitude must be between -90 and 90 (got {0})")]
    Latitude(f64),
    /// Longitude is NaN, infinite, or outside [-180, 180].
    #[error("longitude must be between -180 and 180 (got {0})")]
    Longitude(f64),
}

/// A latitude/longitude pair in decimal degrees.
///
/// ## Constraints
///
/// - `latitude` is finite and within [-90, 90]
/// - `longitude` is finite and within [-180, 180]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create validated coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is non-finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build coordinates from two optional stored columns.
    ///
    /// Returns `None` unless both are present and valid.
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Self::new(latitude?, longitude?).ok()
    }

    /// Map link in the query-parameter shape, e.g.
    /// `https://maps.google.com/?q=-4.0098,119.6231`.
    #[must_use]
    pub fn maps_url(&self) -> String {
        format!("{MAPS_QUERY_URL}{self}")
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
