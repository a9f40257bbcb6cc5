//! The nearby-destination dashboard
//!
//! Ties the pieces together:
//!
//! - [`fetcher`]: refreshes remote collections; the last-issued request wins
//! - [`geolocation`]: a cancellable stream of position readings
//! - [`controller`]: [`MapView`], the single owner of view state
//! - [`display`]: rendered list items and marker icons
//! - [`notice`]: non-fatal problems shown to the user
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tourmap_api_client::TourmapClient;
//! use tourmap_core::storage::MemoryStore;
//! use tourmap_dashboard::{FixedPosition, LocationWatch, MapView, PositionOptions, ViewSettings};
//! use tourmap_geo::ReferencePoint;
//! use tourmap_search::ViewMode;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let mut view = MapView::new(store, TourmapClient::new()?, ViewSettings::default());
//!
//!     let stale = view.mount();
//!     view.set_view_mode(ViewMode::Nearby);
//!
//!     let here = FixedPosition(ReferencePoint::new(10.3157, 123.8854, 15.0));
//!     let watch = LocationWatch::spawn(here, PositionOptions::default());
//!     view.run(watch, &stale, tokio::time::sleep(std::time::Duration::from_secs(3))).await;
//!
//!     for item in view.display() {
//!         println!("{} {}", item.icon, item.destination.name);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod controller;
pub mod display;
pub mod fetcher;
pub mod geolocation;
pub mod notice;

pub use controller::{CollectionSource, MapView, Refreshed, ViewEvent, ViewSettings};
pub use display::{DisplayItem, MarkerIcons};
pub use fetcher::{FetchOutcome, Fetcher, RequestSequence, Resource};
pub use geolocation::{
    FixedPosition, GeolocationError, LocationUpdate, LocationWatch, PositionOptions, PositionSource, ReplayPositions,
    WatchHandle,
};
pub use notice::Notice;
