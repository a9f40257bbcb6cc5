//! Category endpoints

use crate::client::TourmapClient;
use crate::error::ApiResult;
use crate::normalize::{normalize_category, Collection, RawCategory};
use tourmap_core::Category;

/// Route of the category collection
pub const CATEGORIES_PATH: &str = "categories";

/// Categories API interface
#[derive(Clone)]
pub struct CategoriesApi {
    client: TourmapClient,
}

impl CategoriesApi {
    /// Create a new categories API interface
    pub(crate) fn new(client: TourmapClient) -> Self {
        Self { client }
    }

    /// GET /categories
    pub async fn list_raw(&self) -> ApiResult<Vec<RawCategory>> {
        let collection: Collection = self.client.get(CATEGORIES_PATH).await?;
        Ok(collection.into_records())
    }

    /// Normalized categories
    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        Ok(self.list_raw().await?.into_iter().filter_map(normalize_category).collect())
    }
}
