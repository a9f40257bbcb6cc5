//! Destination list filtering for Tourmap.
//!
//! This crate provides:
//! - View modes (all, nearby, saved) and base-set selection
//! - Case-insensitive category matching over id or name
//! - Free-text search OR-ed across descriptive fields
//!
//! Filters are selective only: output order is always the order of the
//! base set, so a nearby list keeps its distance ordering.

mod category;
mod error;
mod filter;

pub use category::{resolve_category_key, Categorized, CategoryKey};
pub use error::{Result, SearchError};
pub use filter::{apply, matches_search, select_base, CategorySelector, FilterCriteria, Filterable, ViewMode};
