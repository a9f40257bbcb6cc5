//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AddressApi, CategoriesApi, DestinationsApi};
use crate::error::{ApiError, ApiResult};
use crate::geocoding::ReverseGeocoder;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Tourmap backend client
///
/// This client wraps `reqwest` and adds:
/// - Automatic retry with exponential backoff for transient failures
/// - Request correlation IDs for tracing
#[derive(Clone)]
pub struct TourmapClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl TourmapClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config("user_agent contains invalid header characters"))?;
        default_headers.insert(USER_AGENT, agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access destination endpoints
    #[must_use]
    pub fn destinations(&self) -> DestinationsApi {
        DestinationsApi::new(self.clone())
    }

    /// Access category endpoints
    #[must_use]
    pub fn categories(&self) -> CategoriesApi {
        CategoriesApi::new(self.clone())
    }

    /// Access address lookup, with reverse geocoding fallback
    #[must_use]
    pub fn address(&self) -> AddressApi {
        AddressApi::new(self.clone())
    }

    /// Access the third-party reverse geocoder
    #[must_use]
    pub fn geocoder(&self) -> ReverseGeocoder {
        ReverseGeocoder::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods with retry
    // -------------------------------------------------------------------------

    /// Perform a GET request relative to the base URL
    #[instrument(skip(self), fields(request_id))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url_for(path);
        self.request_url(Method::GET, &url, Option::<&()>::None).await
    }

    /// Perform a GET request to an absolute URL
    #[instrument(skip(self), fields(request_id))]
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.request_url(Method::GET, url, Option::<&()>::None).await
    }

    /// Perform a POST request relative to the base URL
    #[instrument(skip(self, body), fields(request_id))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.url_for(path);
        self.request_url(Method::POST, &url, Some(body)).await
    }

    /// Absolute URL for a backend path
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    /// Execute a request to an absolute URL with retry
    async fn request_url<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let retry_config = &self.config.retry;
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry_config.max_attempts {
            // Wait before retry (except first attempt)
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self
                .execute_single_request(&request_id, method.clone(), url, body)
                .await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && retry_config.allows_retry_after(attempt + 1) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Request failed, will retry"
                    );
                    last_error = Some(e);
                }
                Err(e) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Request failed, not retrying"
                    );
                    return Err(e);
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: retry_config.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Execute a single request without retry
    async fn execute_single_request<T: DeserializeOwned, B: Serialize>(
        &self,
        request_id: &str,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let mut request = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, request_id);

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        handle_response(response).await
    }
}

/// Handle HTTP response and deserialize
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::api_response(status.as_u16(), message))
    }
}

/// Join a base URL and a relative path with exactly one slash between them.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
