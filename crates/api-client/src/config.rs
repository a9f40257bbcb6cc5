//! Configuration for the Tourmap API client
//!
//! Values come from the `[api]` and `[geocoding]` sections of the
//! configuration file, then environment variables override them.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tourmap_core::config::{ApiConfig, GeocodingConfig};
use tourmap_core::retry::RetryConfig;

/// Backend used when nothing is configured
const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

/// Public Nominatim instance
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local backend
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from `TOURMAP_ENV`
    pub fn from_env() -> Self {
        Self::parse(&env::var("TOURMAP_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }

    /// Retry preset for this environment
    pub fn retry_config(self) -> RetryConfig {
        match self {
            Self::Development => RetryConfig::quick(),
            Self::Staging => RetryConfig::default(),
            Self::Production => RetryConfig::patient(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST backend
    pub base_url: String,
    /// Nominatim-compatible reverse geocoder
    pub geocoder_url: String,
    /// Zooms of the detailed and the locality-level reverse lookups
    pub geocoder_zooms: (u8, u8),
    /// Sent as `User-Agent`; public geocoders require one
    pub user_agent: String,
    /// Request timeout
    #[serde(with = "secs")]
    pub timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

mod secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            geocoder_zooms: (18, 14),
            user_agent: concat!("tourmap-api-client/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `TOURMAP_API_URL`: Base URL of the backend
    /// - `TOURMAP_GEOCODER_URL`: Reverse geocoder URL
    /// - `TOURMAP_ENV`: Environment (development/staging/production)
    /// - `TOURMAP_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();
        let config = Self {
            retry: environment.retry_config(),
            environment,
            ..Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Configuration from file settings, with environment overrides applied.
    pub fn from_settings(api: &ApiConfig, geocoding: &GeocodingConfig) -> Self {
        let environment = Environment::from_env();
        Self {
            base_url: api.base_url.clone(),
            geocoder_url: geocoding.endpoint.clone(),
            geocoder_zooms: (geocoding.fine_zoom, geocoding.coarse_zoom),
            user_agent: geocoding.user_agent.clone(),
            timeout: Duration::from_secs(api.timeout_secs),
            retry: environment.retry_config(),
            environment,
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("TOURMAP_API_URL") {
            self.base_url = url;
        }
        if let Ok(url) = env::var("TOURMAP_GEOCODER_URL") {
            self.geocoder_url = url;
        }
        if let Some(timeout) = env::var("TOURMAP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
        {
            self.timeout = timeout;
        }
        self
    }

    /// Create development configuration (local backend)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: "http://localhost:8000/api/".to_string(),
            timeout: Duration::from_secs(10),
            retry: RetryConfig::quick(),
            environment: Environment::Development,
            ..Self::default()
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the geocoder URL
    #[must_use]
    pub fn with_geocoder_url(mut self, url: impl Into<String>) -> Self {
        self.geocoder_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        for (name, url) in [("base_url", &self.base_url), ("geocoder_url", &self.geocoder_url)] {
            if url.is_empty() {
                return Err(ApiError::config(format!("{name} cannot be empty")));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::config(format!("{name} must start with http:// or https://")));
            }
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(ApiError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.contains("localhost"));
        assert!(config.geocoder_url.contains("nominatim"));
        assert_eq!(config.geocoder_zooms, (18, 14));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("dev"), Environment::Development);
        assert_eq!(Environment::parse("STAGE"), Environment::Staging);
        assert_eq!(Environment::parse(""), Environment::Production);
        assert_eq!(Environment::Development.retry_config(), RetryConfig::quick());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://api.tourmap.app/v1/")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://api.tourmap.app/v1/");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default().with_geocoder_url("ftp://x").validate().is_err());
        assert!(ClientConfig::default().with_timeout(Duration::ZERO).validate().is_err());
    }

    #[test]
    fn test_serde_timeout_in_seconds() {
        let json = serde_json::to_value(ClientConfig::default()).unwrap();
        assert_eq!(json["timeout"], 30);
        assert_eq!(json["environment"], "production");
    }
}
