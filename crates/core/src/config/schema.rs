//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub proximity: ProximityConfig,

    #[serde(default)]
    pub geolocation: GeolocationConfig,

    #[serde(default)]
    pub geocoding: GeocodingConfig,

    #[serde(default)]
    pub map: MapConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Local cache settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Freshness window for destinations, in milliseconds
    #[serde(default = "default_destinations_ttl_ms")]
    pub destinations_ttl_ms: i64,

    /// Freshness window for categories, in milliseconds
    #[serde(default = "default_categories_ttl_ms")]
    pub categories_ttl_ms: i64,

    /// Storage directory; the platform data directory when unset
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            destinations_ttl_ms: default_destinations_ttl_ms(),
            categories_ttl_ms: default_categories_ttl_ms(),
            storage_dir: None,
        }
    }
}

fn default_destinations_ttl_ms() -> i64 {
    crate::cache::DESTINATIONS_TTL_MS
}

fn default_categories_ttl_ms() -> i64 {
    crate::cache::CATEGORIES_TTL_MS
}

/// Nearby view settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProximityConfig {
    /// Radius of the nearby view in kilometers
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
        }
    }
}

fn default_radius_km() -> f64 {
    tourmap_geo::DEFAULT_RADIUS_KM
}

/// Location stream settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeolocationConfig {
    #[serde(default = "default_true")]
    pub high_accuracy: bool,

    /// Give up on a single reading after this long
    #[serde(default = "default_geo_timeout_ms")]
    pub timeout_ms: u64,

    /// Oldest acceptable cached fix; 0 always asks for a new one
    #[serde(default)]
    pub maximum_age_ms: u64,

    /// Interval between readings of the watch loop
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: default_geo_timeout_ms(),
            maximum_age_ms: 0,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_geo_timeout_ms() -> u64 {
    5_000
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

/// Reverse geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodingConfig {
    /// Nominatim-compatible endpoint
    #[serde(default = "default_geocoder_url")]
    pub endpoint: String,

    /// Zoom of the detailed lookup
    #[serde(default = "default_fine_zoom")]
    pub fine_zoom: u8,

    /// Zoom of the locality-level lookup
    #[serde(default = "default_coarse_zoom")]
    pub coarse_zoom: u8,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_geocoder_url(),
            fine_zoom: default_fine_zoom(),
            coarse_zoom: default_coarse_zoom(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org/".to_string()
}

fn default_fine_zoom() -> u8 {
    18
}

fn default_coarse_zoom() -> u8 {
    14
}

fn default_user_agent() -> String {
    concat!("tourmap/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Map presentation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapConfig {
    /// Marker glyph for destinations without a category icon
    #[serde(default = "default_marker_icon")]
    pub default_marker_icon: String,

    /// Marker glyph for the current position
    #[serde(default = "default_user_marker_icon")]
    pub user_marker_icon: String,

    #[serde(default = "default_tile_url")]
    pub tile_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_marker_icon: default_marker_icon(),
            user_marker_icon: default_user_marker_icon(),
            tile_url: default_tile_url(),
        }
    }
}

fn default_marker_icon() -> String {
    crate::model::DEFAULT_CATEGORY_ICON.to_string()
}

fn default_user_marker_icon() -> String {
    "🔵".to_string()
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}
