//! Shared setup for commands: configuration, storage, client and view

use crate::OutputFormat;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tourmap_api_client::{ClientConfig, TourmapClient};
use tourmap_core::config::{Config, ConfigSchema};
use tourmap_core::storage::{default_data_dir, FileStore};
use tourmap_dashboard::{MapView, Resource, ViewEvent, ViewSettings};
use tourmap_geo::{Coordinate, ReferencePoint};

pub type Store = Arc<FileStore>;
pub type View = MapView<Store, TourmapClient>;

/// Global options every command needs
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub format: OutputFormat,
}

impl Settings {
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn load_config(&self) -> Result<ConfigSchema> {
        let config = Config::load(self.config.as_deref()).context("Failed to load configuration")?;
        if let Some(path) = &config.path {
            tracing::debug!(path = %path.display(), "configuration loaded");
        }
        Ok(config.schema)
    }

    /// `--data-dir`, then the configured storage directory, then the platform default.
    pub fn open_store(&self, schema: &ConfigSchema) -> Result<Store> {
        let dir = self
            .data_dir
            .clone()
            .or_else(|| schema.cache.storage_dir.clone())
            .unwrap_or_else(default_data_dir);
        let store = FileStore::open(&dir).with_context(|| format!("Failed to open data directory {}", dir.display()))?;
        Ok(Arc::new(store))
    }

    pub fn client(&self, schema: &ConfigSchema) -> Result<TourmapClient> {
        let config = ClientConfig::from_settings(&schema.api, &schema.geocoding);
        config.validate()?;
        Ok(TourmapClient::with_config(config)?)
    }

    /// View over the local store, not yet mounted.
    pub fn view(&self, schema: &ConfigSchema, radius_km: Option<f64>) -> Result<View> {
        let mut view_settings = ViewSettings::from(schema);
        if let Some(radius) = radius_km {
            if !(radius.is_finite() && radius > 0.0) {
                bail!("Radius must be a positive number of kilometers, got {radius}");
            }
            view_settings.radius_km = radius;
        }

        Ok(MapView::new(self.open_store(schema)?, self.client(schema)?, view_settings))
    }

    /// View loaded from the cache, with the resources that need a refetch.
    pub fn mount(&self, schema: &ConfigSchema, radius_km: Option<f64>) -> Result<(View, Vec<Resource>)> {
        let mut view = self.view(schema, radius_km)?;
        let stale = view.mount();
        Ok((view, stale))
    }

    /// Refetch `stale` resources unless `offline`. Returns whether new
    /// destinations were applied.
    pub async fn refresh_stale(&self, view: &mut View, stale: &[Resource], offline: bool) -> bool {
        if offline {
            tracing::debug!(?stale, "offline, skipping refresh");
            return false;
        }

        let mut destinations_changed = false;
        for &resource in stale {
            let event = view.refresh(resource).await;
            destinations_changed |= matches!(event, ViewEvent::Refreshed(Resource::Destinations));
        }
        destinations_changed
    }

    /// Mounted view with stale collections already refetched.
    ///
    /// Used by commands that need current data before they can act, such as
    /// `save`. The list command renders the cached view first instead.
    pub async fn mounted_view(&self, schema: &ConfigSchema, radius_km: Option<f64>, offline: bool) -> Result<View> {
        let (mut view, stale) = self.mount(schema, radius_km)?;
        self.refresh_stale(&mut view, &stale, offline).await;
        Ok(view)
    }
}

/// Parse `LAT,LON` or `LAT,LON,ACCURACY`.
pub fn parse_point(value: &str) -> Result<ReferencePoint, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|_| format!("'{}' is not a number", part.trim())))
        .collect::<Result<Vec<_>, _>>()?;

    let (latitude, longitude, accuracy) = match parts.as_slice() {
        [lat, lon] => (*lat, *lon, 0.0),
        [lat, lon, acc] => (*lat, *lon, *acc),
        _ => return Err("expected LAT,LON".to_string()),
    };

    Coordinate::new(latitude, longitude).validate().map_err(|e| e.to_string())?;
    Ok(ReferencePoint::new(latitude, longitude, accuracy))
}
