//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while building filter criteria.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Unknown view mode name
    #[error("Invalid view mode '{0}' (expected all, nearby or saved)")]
    InvalidViewMode(String),
}
