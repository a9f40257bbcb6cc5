//! Haversine distance calculation.
//!
//! Distances are computed on a spherical Earth. Inputs are not range
//! checked here; destinations are validated when they are created.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in kilometers.
///
/// Symmetric, never negative, and exactly `0.0` for identical points.
///
/// # Example
/// ```
/// use tourmap_geo::{distance_km, Coordinate};
///
/// let manila = Coordinate::new(14.5995, 120.9842);
/// let cebu = Coordinate::new(10.3157, 123.8854);
///
/// let d = distance_km(&manila, &cebu);
/// assert!((d - 571.0).abs() < 10.0);
/// ```
#[inline]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Great-circle distance between two coordinates in meters.
#[inline]
pub fn distance_m(from: &Coordinate, to: &Coordinate) -> f64 {
    distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1.0 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * radius * h.sqrt().atan2((1.0 - h).sqrt())
}
