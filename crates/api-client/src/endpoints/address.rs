//! Address lookup for a coordinate
//!
//! The backend's `address/from-gps` route is tried first. When it fails or
//! has nothing, the public reverse geocoder is asked instead. Neither
//! answering is not an error: the form fields are left for manual entry.

use crate::client::TourmapClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use tourmap_core::model::compose_address;
use tracing::{debug, warn};

/// Where an address came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressSource {
    /// `address/from-gps`
    Backend,
    /// Third-party reverse geocoder
    Geocoder,
}

/// Address parts for a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressLookup {
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub source: AddressSource,
}

impl AddressLookup {
    /// True when no locality field is known.
    pub fn is_empty(&self) -> bool {
        self.barangay.is_none() && self.city.is_none() && self.province.is_none()
    }

    /// Single-line rendering.
    pub fn line(&self) -> String {
        compose_address([
            self.street.as_deref(),
            self.barangay.as_deref(),
            self.city.as_deref(),
            self.province.as_deref(),
        ])
    }
}

#[derive(Debug, Serialize)]
struct FromGpsRequest {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct FromGpsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<FromGpsData>,
}

#[derive(Debug, Default, Deserialize)]
struct FromGpsData {
    #[serde(default)]
    postal_code: Option<String>,
    #[serde(default)]
    barangay: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    province: Option<String>,
    #[serde(default)]
    region: Option<String>,
}

impl FromGpsResponse {
    fn into_lookup(self) -> Option<AddressLookup> {
        if !self.success {
            return None;
        }
        let data = self.data?;
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let lookup = AddressLookup {
            street: None,
            barangay: clean(data.barangay),
            city: clean(data.city),
            province: clean(data.province),
            region: clean(data.region),
            postal_code: clean(data.postal_code),
            source: AddressSource::Backend,
        };
        (!lookup.is_empty()).then_some(lookup)
    }
}

/// Address API interface
#[derive(Clone)]
pub struct AddressApi {
    client: TourmapClient,
}

impl AddressApi {
    /// Create a new address API interface
    pub(crate) fn new(client: TourmapClient) -> Self {
        Self { client }
    }

    /// POST /address/from-gps
    pub async fn from_gps(&self, latitude: f64, longitude: f64) -> ApiResult<Option<AddressLookup>> {
        let response: FromGpsResponse = self
            .client
            .post("address/from-gps", &FromGpsRequest { latitude, longitude })
            .await?;
        Ok(response.into_lookup())
    }

    /// Backend first, reverse geocoder second.
    ///
    /// `Ok(None)` means neither source knows the address.
    pub async fn resolve(&self, latitude: f64, longitude: f64) -> ApiResult<Option<AddressLookup>> {
        match self.from_gps(latitude, longitude).await {
            Ok(Some(lookup)) => return Ok(Some(lookup)),
            Ok(None) => debug!(latitude, longitude, "backend has no address, trying geocoder"),
            Err(e) => warn!(error = %e, "address/from-gps failed, trying geocoder"),
        }

        self.client.geocoder().lookup(latitude, longitude).await
    }
}
