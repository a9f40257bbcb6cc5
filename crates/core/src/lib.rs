//! Core of the Tourmap destination dashboard
//!
//! This crate holds the state the dashboard keeps between runs and the
//! records it works with:
//!
//! - **Storage**: a minimal key-value abstraction with memory and file backends
//! - **Cache**: timestamped collections with TTL-based freshness
//! - **Saved set**: a write-through bookmark list of destinations
//! - **Model**: normalized destination and category records
//! - **Configuration**: TOML-based configuration with validation
//! - **Error handling**: errors with codes, context, and recovery suggestions
//!
//! # Example
//!
//! ```rust
//! use tourmap_core::{cache::CacheStore, saved::SavedSet, storage::MemoryStore, Destination};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let cache = CacheStore::new(Arc::clone(&store));
//! let mut saved = SavedSet::load(store);
//!
//! let fort = Destination::new("1", "Fort San Pedro", 10.2925, 123.9056);
//! cache.write("cache:destinations", &vec![fort.clone()]);
//! saved.toggle(&fort).unwrap();
//!
//! assert!(saved.is_saved("1"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod retry;
pub mod saved;
pub mod storage;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};
pub use model::{Category, Destination};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{CacheEntry, CacheStore};
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::model::{Category, Destination};
    pub use crate::retry::RetryConfig;
    pub use crate::saved::SavedSet;
    pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
    pub use crate::validation::{DestinationDraft, ValidationResult, Validator};
}
