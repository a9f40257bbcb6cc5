//! Configuration loading and schema definitions
//!
//! One TOML file covers the backend, cache, nearby view, location stream,
//! reverse geocoder and map presentation. Every key has a default, so an
//! empty or missing file is a valid configuration.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
