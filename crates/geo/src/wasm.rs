//! WASM bindings for the geo crate.
//!
//! Lets the map page compute distances and the nearby list in the browser
//! with the same code the native dashboard uses.

use crate::{distance_km, within_radius, Coordinate, GeoError, Located, ReferencePoint};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Minimal located record accepted from JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapPoint {
    id: serde_json::Value,
    latitude: f64,
    longitude: f64,
}

impl Located for MapPoint {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

fn to_js(err: GeoError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Distance in kilometers between two points.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    distance_km(&Coordinate::new(lat1, lng1), &Coordinate::new(lat2, lng2))
}

/// Points within `radius_km` of the reference, closest first.
///
/// `points_json` is an array of `{id, latitude, longitude}`; the result is the
/// same objects with an added `distance` field.
#[wasm_bindgen]
pub fn nearby(
    ref_lat: f64,
    ref_lng: f64,
    accuracy: f64,
    points_json: &str,
    radius_km: f64,
) -> Result<String, JsValue> {
    let points: Vec<MapPoint> = serde_json::from_str(points_json)
        .map_err(GeoError::from)
        .map_err(to_js)?;

    let reference = ReferencePoint::new(ref_lat, ref_lng, accuracy);
    let results = within_radius(Some(&reference), &points, radius_km);

    serde_json::to_string(&results)
        .map_err(GeoError::from)
        .map_err(to_js)
}
