//! Backend records and their conversion into the dashboard's model
//!
//! The backend is loose about types: ids arrive as numbers or strings,
//! coordinates as numbers or numeric strings, and the category as an object,
//! a bare string or a bare id. The raw types below accept all of those
//! shapes; the `normalize_*` functions fill defaults and produce
//! [`Destination`] and [`Category`] values.
//!
//! Records are decoded one at a time, and a field of an unexpected shape
//! decodes as absent. A single odd record never fails the whole collection.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tourmap_core::model::{Category, Destination, DEFAULT_CATEGORY_ICON};

/// Collection response, either `{ "data": [...] }` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Collection {
    /// Wrapped in a `data` envelope
    Wrapped {
        /// Records
        data: Vec<Value>,
    },
    /// Bare array
    Bare(Vec<Value>),
}

impl Collection {
    /// Decode each record, skipping the ones that are not records at all.
    pub fn into_records<T: DeserializeOwned>(self) -> Vec<T> {
        let values = match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        };

        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(index, error = %err, "malformed record skipped");
                    None
                }
            })
            .collect()
    }
}

/// Decode a field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Identifier that may be numeric or textual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Integer id
    Int(i64),
    /// Integral float id such as `7.0`
    Float(f64),
    /// String id
    Text(String),
}

impl RawId {
    fn into_string(self) -> Option<String> {
        match self {
            Self::Int(n) => Some(n.to_string()),
            Self::Float(n) if n.is_finite() && n.fract() == 0.0 => Some(format!("{n:.0}")),
            Self::Float(_) => None,
            Self::Text(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

/// Number that may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    /// JSON number
    Number(f64),
    /// Numeric text
    Text(String),
}

impl LenientNumber {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
        .filter(|n: &f64| n.is_finite())
    }
}

/// Category object as sent by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCategory {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub icon: Option<String>,
}

/// Category field of a destination: an object or a bare string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCategoryField {
    /// `{ id, name, icon }`
    Object(RawCategory),
    /// A name or an id as text
    Text(String),
    /// A bare numeric category id
    Id(i64),
}

/// Address field of a destination: structured or a preformatted line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAddressField {
    /// `{ street, barangay, city, province }`
    Parts {
        #[serde(default)]
        street: Option<String>,
        #[serde(default)]
        barangay: Option<String>,
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        province: Option<String>,
    },
    /// Single line
    Line(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCoordinates {
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<LenientNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<LenientNumber>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStats {
    #[serde(default, deserialize_with = "lenient")]
    pub total_visits: Option<LenientNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_reviews: Option<LenientNumber>,
}

/// Destination record as sent by `GET destinations`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDestination {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<RawCategoryField>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<RawAddressField>,
    #[serde(default, deserialize_with = "lenient")]
    pub coordinates: Option<RawCoordinates>,
    /// Flat latitude, used when `coordinates` is absent
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<LenientNumber>,
    /// Flat longitude, used when `coordinates` is absent
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<LenientNumber>,
    #[serde(default, alias = "qrCode", deserialize_with = "lenient")]
    pub qr_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stats: Option<RawStats>,
    #[serde(default, alias = "points", deserialize_with = "lenient")]
    pub points_reward: Option<LenientNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn count(value: Option<&LenientNumber>) -> u64 {
    value
        .and_then(LenientNumber::value)
        .filter(|n| *n >= 0.0)
        .map_or(0, |n| n as u64)
}

/// Convert a backend destination record.
///
/// Returns `None` for records without an id, which cannot be tracked across
/// refreshes or saved. Everything else is default-filled: icon `📍`,
/// coordinates 0, counters 0.
pub fn normalize_destination(raw: RawDestination) -> Option<Destination> {
    let id = raw.id.and_then(RawId::into_string)?;

    let coords = raw.coordinates.unwrap_or_default();
    let latitude = coords
        .latitude
        .as_ref()
        .or(raw.latitude.as_ref())
        .and_then(LenientNumber::value)
        .unwrap_or(0.0);
    let longitude = coords
        .longitude
        .as_ref()
        .or(raw.longitude.as_ref())
        .and_then(LenientNumber::value)
        .unwrap_or(0.0);

    let mut destination = Destination::new(id, non_blank(raw.name).unwrap_or_default(), latitude, longitude);

    match raw.category {
        Some(RawCategoryField::Object(category)) => {
            destination.category_id = category.id.and_then(RawId::into_string);
            destination.category_name = non_blank(category.name);
            destination.category_icon = non_blank(category.icon).unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string());
        }
        Some(RawCategoryField::Text(raw_category)) => {
            destination.category_raw = non_blank(Some(raw_category));
        }
        Some(RawCategoryField::Id(id)) => {
            destination.category_id = Some(id.to_string());
        }
        None => {}
    }

    match raw.address {
        Some(RawAddressField::Parts { street, barangay, city, province }) => {
            destination = destination.with_address(
                street.as_deref(),
                barangay.as_deref(),
                city.as_deref(),
                province.as_deref(),
            );
        }
        Some(RawAddressField::Line(line)) => destination.address = line.trim().to_string(),
        None => {}
    }

    let stats = raw.stats.unwrap_or_default();
    destination.visits = count(stats.total_visits.as_ref());
    destination.reviews = count(stats.total_reviews.as_ref());
    destination.points = raw
        .points_reward
        .as_ref()
        .and_then(LenientNumber::value)
        .map_or(0, |n| n as i64);
    destination.qr_code = non_blank(raw.qr_code);
    destination.description = non_blank(raw.description);

    Some(destination)
}

/// Convert a backend category record. Records without an id are dropped.
pub fn normalize_category(raw: RawCategory) -> Option<Category> {
    let id = raw.id.and_then(RawId::into_string)?;
    Some(Category {
        name: non_blank(raw.name).unwrap_or_else(|| id.clone()),
        icon: non_blank(raw.icon).unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawDestination {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_full_record() {
        let raw = parse(
            r#"{
                "id": 12,
                "name": "Kawasan Falls",
                "category": {"id": 3, "name": "Waterfalls", "icon": "💧"},
                "address": {"street": null, "barangay": "Matutinao", "city": "Badian", "province": "Cebu"},
                "coordinates": {"latitude": 9.8016, "longitude": "123.3747"},
                "qr_code": "QR-12",
                "stats": {"total_visits": 340, "total_reviews": 25},
                "points_reward": 50,
                "description": "Turquoise cascades"
            }"#,
        );

        let d = normalize_destination(raw).unwrap();
        assert_eq!(d.id, "12");
        assert_eq!(d.category_id.as_deref(), Some("3"));
        assert_eq!(d.category_name.as_deref(), Some("Waterfalls"));
        assert_eq!(d.category_icon, "💧");
        assert!((d.longitude - 123.3747).abs() < 1e-9);
        assert_eq!(d.address, "Matutinao, Badian, Cebu");
        assert_eq!(d.visits, 340);
        assert_eq!(d.reviews, 25);
        assert_eq!(d.points, 50);
        assert_eq!(d.qr_code.as_deref(), Some("QR-12"));
    }

    #[test]
    fn test_defaults_are_filled() {
        let d = normalize_destination(parse(r#"{"id": "a1", "name": "Bare"}"#)).unwrap();
        assert_eq!(d.category_icon, DEFAULT_CATEGORY_ICON);
        assert_eq!(d.latitude, 0.0);
        assert_eq!(d.longitude, 0.0);
        assert_eq!(d.visits, 0);
        assert_eq!(d.points, 0);
        assert_eq!(d.address, "");
    }

    #[test]
    fn test_missing_icon_in_category_object() {
        let d = normalize_destination(parse(r#"{"id": 1, "category": {"id": 2, "name": "Park"}}"#)).unwrap();
        assert_eq!(d.category_icon, DEFAULT_CATEGORY_ICON);
    }

    #[test]
    fn test_category_as_string() {
        let d = normalize_destination(parse(r#"{"id": 1, "category": "Heritage"}"#)).unwrap();
        assert_eq!(d.category_raw.as_deref(), Some("Heritage"));
        assert_eq!(d.category_id, None);
        assert_eq!(d.category_label(), "Heritage");
    }

    #[test]
    fn test_unparseable_coordinates_default_to_zero() {
        let d = normalize_destination(parse(
            r#"{"id": 1, "coordinates": {"latitude": "north-ish", "longitude": null}}"#,
        ))
        .unwrap();
        assert_eq!((d.latitude, d.longitude), (0.0, 0.0));
    }

    #[test]
    fn test_flat_coordinates_fallback() {
        let d = normalize_destination(parse(r#"{"id": 1, "latitude": "10.5", "longitude": 124}"#)).unwrap();
        assert_eq!((d.latitude, d.longitude), (10.5, 124.0));
    }

    #[test]
    fn test_address_line() {
        let d = normalize_destination(parse(r#"{"id": 1, "address": " Osmeña Blvd, Cebu City "}"#)).unwrap();
        assert_eq!(d.address, "Osmeña Blvd, Cebu City");
        assert_eq!(d.city, None);
    }

    #[test]
    fn test_record_without_id_is_dropped() {
        assert!(normalize_destination(parse(r#"{"name": "Ghost"}"#)).is_none());
        assert!(normalize_destination(parse(r#"{"id": "  ", "name": "Ghost"}"#)).is_none());
    }

    #[test]
    fn test_negative_counters_clamp_to_zero() {
        let d = normalize_destination(parse(r#"{"id": 1, "stats": {"total_visits": -4}}"#)).unwrap();
        assert_eq!(d.visits, 0);
    }

    #[test]
    fn test_collection_shapes() {
        let wrapped: Collection = serde_json::from_str(r#"{"data": [{"id": 1, "name": "Beach"}]}"#).unwrap();
        assert_eq!(wrapped.into_records::<RawCategory>().len(), 1);

        let bare: Collection = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(bare.into_records::<RawCategory>().len(), 2);
    }

    #[test]
    fn test_odd_record_does_not_sink_the_collection() {
        let collection: Collection = serde_json::from_str(
            r#"{"data": [
                {"id": 1, "name": "Good"},
                {"id": 2, "category": 3},
                {"id": 7.0, "name": "Float id"},
                {"id": 4, "points_reward": true, "stats": {"total_visits": "many"}},
                "not a record",
                {"id": 5, "name": ["Listed"], "coordinates": {"latitude": 9.5, "longitude": false}}
            ]}"#,
        )
        .unwrap();

        let destinations: Vec<Destination> = collection
            .into_records::<RawDestination>()
            .into_iter()
            .filter_map(normalize_destination)
            .collect();

        let ids: Vec<&str> = destinations.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "7", "4", "5"]);

        assert_eq!(destinations[0].name, "Good");
        assert_eq!(destinations[1].category_id.as_deref(), Some("3"));
        assert_eq!(destinations[2].name, "Float id");
        assert_eq!(destinations[3].points, 0);
        assert_eq!(destinations[3].visits, 0);
        assert_eq!(destinations[4].name, "");
        assert_eq!((destinations[4].latitude, destinations[4].longitude), (9.5, 0.0));
    }

    #[test]
    fn test_fractional_float_id_is_dropped() {
        assert!(normalize_destination(parse(r#"{"id": 7.5, "name": "Half"}"#)).is_none());
    }

    #[test]
    fn test_normalize_category() {
        let c = normalize_category(RawCategory {
            id: Some(RawId::Int(4)),
            name: None,
            icon: Some("🏖️".into()),
        })
        .unwrap();
        assert_eq!(c.id, "4");
        assert_eq!(c.name, "4");
        assert_eq!(c.icon, "🏖️");
        assert!(normalize_category(RawCategory::default()).is_none());
    }
}
