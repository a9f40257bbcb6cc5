//! Non-fatal problems reported to the user
//!
//! Failures at the dashboard boundary never abort the view. They fall back
//! to whatever data is already shown and leave a notice behind.

use crate::fetcher::Resource;
use crate::geolocation::GeolocationError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A refresh failed; cached data, if any, is still shown
    FetchFailed { resource: Resource, message: String },
    /// A location reading failed; the nearby list is empty until the next fix
    Geolocation { code: u16, message: String, suggestion: String },
    /// A bookmark change could not be stored and was undone
    SaveFailed { id: String, message: String },
}

impl Notice {
    pub fn fetch_failed(resource: Resource, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            resource,
            message: message.into(),
        }
    }

    pub fn geolocation(err: GeolocationError) -> Self {
        Self::Geolocation {
            code: err.code(),
            message: err.user_message().to_string(),
            suggestion: err.suggestion().to_string(),
        }
    }

    pub fn save_failed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SaveFailed {
            id: id.into(),
            message: message.into(),
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::FetchFailed { .. } => Some("Showing the last cached data. Try refreshing later."),
            Self::Geolocation { suggestion, .. } => Some(suggestion),
            Self::SaveFailed { .. } => Some("Free some space or check the storage directory permissions."),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed { resource, message } => write!(f, "Could not refresh {resource}: {message}"),
            Self::Geolocation { message, .. } => f.write_str(message),
            Self::SaveFailed { id, message } => write!(f, "Could not update saved destination {id}: {message}"),
        }
    }
}
