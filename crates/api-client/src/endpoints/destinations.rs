//! Destination endpoints

use crate::client::TourmapClient;
use crate::error::ApiResult;
use crate::normalize::{normalize_destination, Collection, RawDestination};
use tourmap_core::Destination;

/// Route of the destination collection
pub const DESTINATIONS_PATH: &str = "destinations";

/// Destinations API interface
#[derive(Clone)]
pub struct DestinationsApi {
    client: TourmapClient,
}

impl DestinationsApi {
    /// Create a new destinations API interface
    pub(crate) fn new(client: TourmapClient) -> Self {
        Self { client }
    }

    /// Backend records as delivered
    ///
    /// GET /destinations
    pub async fn list_raw(&self) -> ApiResult<Vec<RawDestination>> {
        let collection: Collection = self.client.get(DESTINATIONS_PATH).await?;
        Ok(collection.into_records())
    }

    /// Normalized destinations; records without an id are skipped
    pub async fn list(&self) -> ApiResult<Vec<Destination>> {
        let records = self.list_raw().await?;
        let total = records.len();
        let destinations: Vec<Destination> = records.into_iter().filter_map(normalize_destination).collect();

        if destinations.len() < total {
            tracing::warn!(skipped = total - destinations.len(), "destinations without id skipped");
        }
        Ok(destinations)
    }
}
