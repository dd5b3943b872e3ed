//! MBTA V3 API HTTP client.
//!
//! Provides async methods for querying stops, predictions, and shapes.
//! Handles authentication, rate limiting, and JSON:API envelope parsing.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::domain::StopId;

use super::error::MbtaError;
use super::types::{Document, PredictionResource, ShapeResource, StopResource};

/// Default base URL for the MBTA V3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default maximum concurrent requests.
///
/// The anonymous MBTA rate limit is 20 requests/minute; a small bound
/// keeps bursts from tripping it.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key for the `x-api-key` header. The API works without one
    /// at a much lower rate limit.
    pub api_key: Option<String>,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a new config with the given API key (or none).
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// MBTA V3 API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl MbtaClient {
    /// Create a new MBTA client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();

        if let Some(ref key) = config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| MbtaError::ApiError {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-api-key"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Perform a GET and parse the JSON:API envelope.
    async fn get_document<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, MbtaError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MbtaError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MbtaError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MbtaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let document: Document<T> = serde_json::from_str(&body).map_err(|e| MbtaError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        Ok(document.data)
    }

    /// Get the stops nearest to a coordinate, sorted by distance.
    ///
    /// `radius` is in degrees of latitude/longitude, matching the
    /// upstream `filter[radius]` parameter.
    pub async fn get_nearby_stops(
        &self,
        lat: f64,
        lng: f64,
        radius: f64,
        limit: u8,
    ) -> Result<Vec<StopResource>, MbtaError> {
        self.get_document(
            "/stops",
            &[
                ("filter[latitude]", lat.to_string()),
                ("filter[longitude]", lng.to_string()),
                ("filter[radius]", radius.to_string()),
                ("sort", "distance".to_string()),
                ("page[limit]", limit.to_string()),
            ],
        )
        .await
    }

    /// Get a page of parent stations for name search.
    ///
    /// The V3 API has no free-text stop search; callers fetch station
    /// records (`location_type=1`) and filter by name themselves.
    pub async fn get_stops_page(&self, limit: u16) -> Result<Vec<StopResource>, MbtaError> {
        self.get_document(
            "/stops",
            &[
                ("filter[location_type]", "1".to_string()),
                ("page[limit]", limit.to_string()),
            ],
        )
        .await
    }

    /// Get live predictions at a stop, sorted by departure time.
    pub async fn get_predictions(
        &self,
        stop: &StopId,
        limit: u8,
    ) -> Result<Vec<PredictionResource>, MbtaError> {
        self.get_document(
            "/predictions",
            &[
                ("filter[stop]", stop.as_str().to_string()),
                ("include", "route,trip".to_string()),
                ("sort", "departure_time".to_string()),
                ("page[limit]", limit.to_string()),
            ],
        )
        .await
    }

    /// Get shapes for a route.
    ///
    /// The route id must be canonical (e.g. `Red`, not `Red Line`); an
    /// unrecognized id yields an empty result set, not an error.
    pub async fn get_shapes(
        &self,
        route_id: &str,
        limit: u8,
    ) -> Result<Vec<ShapeResource>, MbtaError> {
        self.get_document(
            "/shapes",
            &[
                ("filter[route]", route_id.to_string()),
                ("page[limit]", limit.to_string()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = MbtaConfig::new(Some("test-key".to_string()))
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = MbtaConfig::new(None);

        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let config = MbtaConfig::new(None);
        assert!(MbtaClient::new(config).is_ok());

        let config = MbtaConfig::new(Some("test-key".to_string()));
        assert!(MbtaClient::new(config).is_ok());
    }

    // Integration tests would require a real API key and make actual
    // HTTP requests; they should be marked #[ignore] and run separately.
}
