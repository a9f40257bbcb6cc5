//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a specific set of backend endpoints.
//!
//! | Module | Backend route | Description |
//! |--------|---------------|-------------|
//! | `destinations` | `GET destinations` | Destination collection |
//! | `categories` | `GET categories` | Category collection |
//! | `address` | `POST address/from-gps` | Address for a coordinate, geocoder fallback |

pub mod address;
pub mod categories;
pub mod destinations;

pub use address::{AddressApi, AddressLookup};
pub use categories::CategoriesApi;
pub use destinations::DestinationsApi;
