//! What the dashboard renders for one destination

use serde::Serialize;
use tourmap_core::config::MapConfig;
use tourmap_core::Destination;
use tourmap_geo::{distance_km, Coordinate, Located, ProximityResult, ReferencePoint};
use tourmap_search::{Categorized, Filterable};

/// Marker glyphs for the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcons {
    pub default_icon: String,
    pub user_icon: String,
}

impl Default for MarkerIcons {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

impl From<&MapConfig> for MarkerIcons {
    fn from(config: &MapConfig) -> Self {
        Self {
            default_icon: config.default_marker_icon.clone(),
            user_icon: config.user_marker_icon.clone(),
        }
    }
}

impl MarkerIcons {
    /// The category icon, or the default marker when it is blank.
    pub fn icon_for<'a>(&'a self, destination: &'a Destination) -> &'a str {
        let icon = destination.category_icon.trim();
        if icon.is_empty() { &self.default_icon } else { icon }
    }
}

/// A destination ready to render: marker, distance and saved state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    #[serde(flatten)]
    pub destination: Destination,
    /// Kilometers from the reference point, when one is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub icon: String,
    pub saved: bool,
}

impl DisplayItem {
    pub fn new(destination: &Destination, distance_km: Option<f64>, icons: &MarkerIcons, saved: bool) -> Self {
        Self {
            icon: icons.icon_for(destination).to_string(),
            destination: destination.clone(),
            distance_km,
            saved,
        }
    }

    /// Item with its distance measured from `reference`, if any.
    pub fn measured(
        destination: &Destination,
        reference: Option<&ReferencePoint>,
        icons: &MarkerIcons,
        saved: bool,
    ) -> Self {
        let distance = reference.map(|r| distance_km(&r.coordinate(), &destination.coordinate()));
        Self::new(destination, distance, icons, saved)
    }

    pub fn from_proximity(result: &ProximityResult<Destination>, icons: &MarkerIcons, saved: bool) -> Self {
        Self::new(&result.item, Some(result.distance), icons, saved)
    }

    pub fn id(&self) -> &str {
        &self.destination.id
    }

    /// Distance rendered with one decimal, e.g. `12.3 km`
    pub fn distance_label(&self) -> Option<String> {
        self.distance_km.map(|km| format!("{km:.1} km"))
    }
}

impl Located for DisplayItem {
    fn coordinate(&self) -> Coordinate {
        self.destination.coordinate()
    }
}

impl Categorized for DisplayItem {
    fn category_id(&self) -> Option<&str> {
        self.destination.category_id()
    }

    fn category_name(&self) -> Option<&str> {
        self.destination.category_name()
    }

    fn category_raw(&self) -> Option<&str> {
        self.destination.category_raw()
    }
}

impl Filterable for DisplayItem {
    fn search_fields(&self) -> Vec<&str> {
        self.destination.search_fields()
    }
}
