//! Radius selection around a reference point.
//!
//! Every call recomputes from scratch. Results are sorted by distance with
//! a stable sort, so equidistant items keep their collection order.

use crate::{distance_km, Located, ReferencePoint};
use serde::{Deserialize, Serialize};

/// Radius used by the nearby view when none is configured.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// An item annotated with its distance from the reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityResult<T> {
    /// The located item
    #[serde(flatten)]
    pub item: T,
    /// Distance from the reference point in kilometers
    pub distance: f64,
}

/// Items within `radius_km` of `reference`, closest first.
///
/// Returns an empty list when there is no reference point; no estimated
/// or partial results are produced.
///
/// # Example
/// ```
/// use tourmap_geo::{within_radius, Coordinate, ReferencePoint};
///
/// let me = ReferencePoint::new(14.5995, 120.9842, 10.0);
/// let spots = vec![Coordinate::new(14.60, 120.99), Coordinate::new(10.3157, 123.8854)];
///
/// let nearby = within_radius(Some(&me), &spots, 50.0);
/// assert_eq!(nearby.len(), 1);
/// assert!(within_radius(None, &spots, 50.0).is_empty());
/// ```
pub fn within_radius<T>(
    reference: Option<&ReferencePoint>,
    entities: &[T],
    radius_km: f64,
) -> Vec<ProximityResult<T>>
where
    T: Located + Clone + Send + Sync,
{
    let Some(reference) = reference else {
        return Vec::new();
    };

    let distances = distances_from(reference, entities);

    let mut results: Vec<ProximityResult<T>> = entities
        .iter()
        .zip(distances)
        .filter(|(_, distance)| *distance <= radius_km)
        .map(|(item, distance)| ProximityResult {
            item: item.clone(),
            distance,
        })
        .collect();

    // `sort_by` is stable; NaN distances never pass the radius filter above.
    results.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    results
}

/// Distance from `reference` to every entity, in collection order.
pub fn distances_from<T>(reference: &ReferencePoint, entities: &[T]) -> Vec<f64>
where
    T: Located + Sync,
{
    let origin = reference.coordinate();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        entities
            .par_iter()
            .map(|entity| distance_km(&origin, &entity.coordinate()))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        entities
            .iter()
            .map(|entity| distance_km(&origin, &entity.coordinate()))
            .collect()
    }
}
