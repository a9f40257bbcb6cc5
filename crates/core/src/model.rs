//! Destination and category records in their normalized shape

use serde::{Deserialize, Serialize};
use tourmap_geo::{Coordinate, Located};
use tourmap_search::{Categorized, Filterable};

/// Glyph shown for a destination whose category carries no icon.
pub const DEFAULT_CATEGORY_ICON: &str = "📍";

/// A tourist destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// Identifier, unique within one snapshot
    pub id: String,
    /// Display name
    pub name: String,
    /// Category id when the category arrived as an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Category name when the category arrived as an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Emoji or image reference
    #[serde(default = "default_icon")]
    pub category_icon: String,
    /// Category when it arrived as a bare string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_raw: Option<String>,
    /// WGS84 latitude in degrees
    pub latitude: f64,
    /// WGS84 longitude in degrees
    pub longitude: f64,
    /// Single-line address assembled from the parts below
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barangay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// Total recorded visits
    #[serde(default)]
    pub visits: u64,
    /// Total reviews
    #[serde(default)]
    pub reviews: u64,
    /// Reward points granted on check-in
    #[serde(default)]
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_icon() -> String {
    DEFAULT_CATEGORY_ICON.to_string()
}

impl Destination {
    /// A destination with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category_id: None,
            category_name: None,
            category_icon: default_icon(),
            category_raw: None,
            latitude,
            longitude,
            address: String::new(),
            street: None,
            barangay: None,
            city: None,
            province: None,
            visits: 0,
            reviews: 0,
            points: 0,
            qr_code: None,
            description: None,
        }
    }

    /// Set the category from an id/name pair.
    #[must_use]
    pub fn with_category(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.category_id = Some(id.into());
        self.category_name = Some(name.into());
        self
    }

    /// Set the address parts and rebuild the single-line address.
    #[must_use]
    pub fn with_address(
        mut self,
        street: Option<&str>,
        barangay: Option<&str>,
        city: Option<&str>,
        province: Option<&str>,
    ) -> Self {
        let own = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        self.street = own(street);
        self.barangay = own(barangay);
        self.city = own(city);
        self.province = own(province);
        self.address = compose_address([street, barangay, city, province]);
        self
    }

    /// Display label for the category.
    pub fn category_label(&self) -> String {
        tourmap_search::resolve_category_key(self)
            .label()
            .unwrap_or("Uncategorized")
            .to_string()
    }
}

/// Join the non-blank address parts with `", "`.
pub fn compose_address<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Located for Destination {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl Categorized for Destination {
    fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    fn category_raw(&self) -> Option<&str> {
        self.category_raw.as_deref()
    }
}

impl Filterable for Destination {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.address.as_str()];
        fields.extend(
            [
                self.category_name.as_deref(),
                self.category_raw.as_deref(),
                self.description.as_deref(),
                self.barangay.as_deref(),
                self.city.as_deref(),
            ]
            .into_iter()
            .flatten(),
        );
        fields
    }
}

/// A destination category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}
