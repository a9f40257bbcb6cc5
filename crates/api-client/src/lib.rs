//! HTTP client for the Tourmap backend and the reverse geocoder
//!
//! # Features
//!
//! - **Environment-based configuration**: URLs and timeouts from the config file and environment
//! - **Retry with exponential backoff**: Automatic retry for transient failures
//! - **Request correlation**: Every request carries a unique `X-Request-ID`
//! - **Normalization**: Lenient backend records become typed destinations and categories
//! - **Reverse geocoding**: Two-zoom lookups with a replaceable merge policy
//!
//! # Example
//!
//! ```rust,no_run
//! use tourmap_api_client::TourmapClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TourmapClient::new()?;
//!
//!     let destinations = client.destinations().list().await?;
//!     println!("Got {} destinations", destinations.len());
//!
//!     if let Some(address) = client.address().resolve(10.3157, 123.8854).await? {
//!         println!("Cebu: {}", address.line());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod geocoding;
pub mod normalize;

pub use client::TourmapClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::TourmapClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{AddressApi, AddressLookup, CategoriesApi, DestinationsApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::geocoding::{AddressMerge, ReverseGeocoder, VillageFallbackMerge};
    pub use crate::normalize::{normalize_category, normalize_destination, RawCategory, RawDestination};
}
