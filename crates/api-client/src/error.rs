//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Response decoded but did not have the expected shape
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            // Retry on connection errors, timeouts
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            // Retry on 5xx errors and 429 (rate limited)
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Config(_) | Self::Json(_) | Self::RetriesExhausted { .. } | Self::UnexpectedPayload(_) => false,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }

    /// Short message suitable for a dashboard notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            Self::Request(_) | Self::RetriesExhausted { .. } => "Could not reach the server".to_string(),
            Self::ApiResponse { status, .. } if *status >= 500 => {
                format!("The server is having trouble ({status})")
            }
            Self::ApiResponse { status, .. } => format!("The server rejected the request ({status})"),
            Self::Json(_) | Self::UnexpectedPayload(_) => "The server sent data we could not read".to_string(),
            Self::Config(msg) => format!("Client misconfigured: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::api_response(503, "down").is_retryable());
        assert!(ApiError::api_response(429, "slow down").is_retryable());
        assert!(!ApiError::api_response(404, "missing").is_retryable());
        assert!(!ApiError::config("bad").is_retryable());
    }

    #[test]
    fn test_status_classes() {
        let not_found = ApiError::api_response(404, "missing");
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let bad_gateway = ApiError::api_response(502, "upstream");
        assert!(bad_gateway.is_server_error());
        assert!(!bad_gateway.is_client_error());
    }

    #[test]
    fn test_user_message() {
        assert!(ApiError::api_response(500, "boom").user_message().contains("500"));
        let json_err = serde_json::from_str::<u32>("x").unwrap_err();
        assert!(ApiError::from(json_err).user_message().contains("could not read"));
    }
}
