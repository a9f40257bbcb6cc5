//! Geospatial utilities for Tourmap.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Radius selection sorted by distance (the "nearby" view)
//! - Optional parallel distance computation
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use tourmap_geo::{distance_km, Coordinate};
//!
//! let manila = Coordinate::new(14.5995, 120.9842);
//! let cebu = Coordinate::new(10.3157, 123.8854);
//!
//! let km = distance_km(&manila, &cebu);
//! assert!((km - 571.0).abs() < 10.0);
//! ```

mod error;
mod haversine;
pub mod proximity;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{distance_km, distance_m, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use proximity::{within_radius, ProximityResult, DEFAULT_RADIUS_KM};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both components are finite and within WGS84 range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Checks range, returning a descriptive error.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "({}, {}) is outside [-90, 90] x [-180, 180]",
                self.latitude, self.longitude
            )))
        }
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Anything that sits at a point on the map.
pub trait Located {
    /// Position of the item.
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

/// The most recent reading of the viewer's own position.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferencePoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Reported accuracy radius in meters
    pub accuracy: f64,
}

impl ReferencePoint {
    /// Creates a reference point. Negative or non-finite accuracy is clamped to zero.
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        let accuracy = if accuracy.is_finite() { accuracy.max(0.0) } else { 0.0 };
        Self {
            latitude,
            longitude,
            accuracy,
        }
    }
}

impl Located for ReferencePoint {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
