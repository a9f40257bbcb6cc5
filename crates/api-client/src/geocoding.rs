//! Reverse geocoding against a Nominatim-compatible service
//!
//! A coordinate is looked up twice: once at a street-level zoom and once at
//! a locality-level zoom. The two answers are combined by an
//! [`AddressMerge`] policy. The default, [`VillageFallbackMerge`], is tuned
//! for Philippine addresses where the detailed lookup often misses the
//! barangay (reported as `village`) that the coarser lookup has.

use crate::client::{join_url, TourmapClient};
use crate::endpoints::address::{AddressLookup, AddressSource};
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Address block of a reverse geocoding response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub hamlet: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub neighbourhood: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

impl GeocodedAddress {
    fn has_locality(&self) -> bool {
        [
            &self.village,
            &self.hamlet,
            &self.suburb,
            &self.neighbourhood,
            &self.municipality,
            &self.town,
            &self.city,
        ]
        .iter()
        .any(|f| f.is_some())
    }

    /// Map onto the dashboard's address parts.
    pub fn into_lookup(self) -> AddressLookup {
        AddressLookup {
            street: self.road,
            barangay: self.village.or(self.hamlet).or(self.suburb).or(self.neighbourhood),
            city: self.city.or(self.town).or(self.municipality),
            province: self.province.or_else(|| self.state.clone()),
            region: self.region.or(self.state),
            postal_code: self.postcode,
            source: AddressSource::Geocoder,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<GeocodedAddress>,
    #[serde(default)]
    error: Option<String>,
}

/// Policy combining the detailed and the locality-level lookups
pub trait AddressMerge: Send + Sync {
    /// Combine `fine` (high zoom) and `coarse` (low zoom) results.
    fn merge(&self, fine: Option<GeocodedAddress>, coarse: Option<GeocodedAddress>) -> Option<GeocodedAddress>;
}

/// Use the coarse lookup's locality fields when the fine lookup has no village.
#[derive(Debug, Clone, Copy, Default)]
pub struct VillageFallbackMerge;

impl AddressMerge for VillageFallbackMerge {
    fn merge(&self, fine: Option<GeocodedAddress>, coarse: Option<GeocodedAddress>) -> Option<GeocodedAddress> {
        match (fine, coarse) {
            (None, coarse) => coarse,
            (Some(fine), None) => Some(fine),
            (Some(fine), Some(_)) if fine.village.is_some() => Some(fine),
            (Some(fine), Some(coarse)) if !coarse.has_locality() => Some(fine),
            (Some(fine), Some(coarse)) => Some(GeocodedAddress {
                road: fine.road.or(coarse.road),
                village: coarse.village,
                hamlet: coarse.hamlet,
                suburb: coarse.suburb,
                neighbourhood: coarse.neighbourhood,
                municipality: coarse.municipality,
                town: coarse.town,
                city: coarse.city,
                state: fine.state.or(coarse.state),
                province: fine.province.or(coarse.province),
                region: fine.region.or(coarse.region),
                postcode: fine.postcode.or(coarse.postcode),
            }),
        }
    }
}

/// Prefer the detailed lookup entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct FineOnlyMerge;

impl AddressMerge for FineOnlyMerge {
    fn merge(&self, fine: Option<GeocodedAddress>, coarse: Option<GeocodedAddress>) -> Option<GeocodedAddress> {
        fine.or(coarse)
    }
}

/// Reverse geocoder client
#[derive(Clone)]
pub struct ReverseGeocoder {
    client: TourmapClient,
    merge: Arc<dyn AddressMerge>,
}

impl ReverseGeocoder {
    pub(crate) fn new(client: TourmapClient) -> Self {
        Self {
            client,
            merge: Arc::new(VillageFallbackMerge),
        }
    }

    /// Replace the merge policy
    #[must_use]
    pub fn with_merge(mut self, merge: impl AddressMerge + 'static) -> Self {
        self.merge = Arc::new(merge);
        self
    }

    /// Single lookup at `zoom`. `Ok(None)` when the service has no address.
    #[instrument(skip(self))]
    pub async fn reverse(&self, latitude: f64, longitude: f64, zoom: u8) -> ApiResult<Option<GeocodedAddress>> {
        let url = join_url(
            &self.client.config().geocoder_url,
            &format!("reverse?format=json&lat={latitude}&lon={longitude}&zoom={zoom}&addressdetails=1"),
        );
        let response: ReverseResponse = self.client.get_url(&url).await?;

        if let Some(error) = response.error {
            debug!(%error, zoom, "geocoder returned no address");
            return Ok(None);
        }
        Ok(response.address)
    }

    /// Address for a coordinate, merged from both zoom levels.
    ///
    /// Fails only when both lookups fail; a lookup that fails while the
    /// other succeeds counts as "no result".
    pub async fn lookup(&self, latitude: f64, longitude: f64) -> ApiResult<Option<AddressLookup>> {
        let (fine_zoom, coarse_zoom) = self.client.config().geocoder_zooms;
        let (fine, coarse) = tokio::join!(
            self.reverse(latitude, longitude, fine_zoom),
            self.reverse(latitude, longitude, coarse_zoom),
        );

        let (fine, coarse) = match (fine, coarse) {
            (Err(e), Err(_)) => return Err(e),
            (fine, coarse) => (fine.ok().flatten(), coarse.ok().flatten()),
        };

        Ok(self
            .merge
            .merge(fine, coarse)
            .map(GeocodedAddress::into_lookup)
            .filter(|lookup| !lookup.is_empty()))
    }
}
