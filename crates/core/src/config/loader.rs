//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use crate::validation::Validator;
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path, a standard location, or defaults.
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the standard locations is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(Path::new(".")),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the rest of the system cannot work with.
    pub fn validate(&self) -> Result<()> {
        let s = &self.schema;
        Validator::new()
            .http_url("api.base_url", &s.api.base_url)
            .http_url("geocoding.endpoint", &s.geocoding.endpoint)
            .positive("proximity.radius_km", s.proximity.radius_km)
            .non_negative("cache.destinations_ttl_ms", s.cache.destinations_ttl_ms)
            .non_negative("cache.categories_ttl_ms", s.cache.categories_ttl_ms)
            .required("map.default_marker_icon", &s.map.default_marker_icon)
            .ensure(
                "geocoding.coarse_zoom",
                s.geocoding.coarse_zoom <= s.geocoding.fine_zoom,
                "must not exceed geocoding.fine_zoom",
            )
            .validate()
            .into_result()
            .map_err(|e| Error::config_invalid(e.message))
    }
}

/// Find configuration file in standard locations under `root`.
fn find_config_file(root: &Path) -> Option<PathBuf> {
    let candidates = ["tourmap.toml", ".tourmap.toml", ".config/tourmap.toml"];

    candidates
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Reading {}", path.display()))?;
    let schema = toml::from_str(&content).map_err(Error::from)?;
    Ok(schema)
}
