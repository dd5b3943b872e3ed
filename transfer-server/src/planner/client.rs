//! Route-options planner HTTP client.

use super::error::PlannerError;
use super::types::{CandidateRoute, RouteOptionsPayload};

/// Default base URL for the planner upstream.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";

/// Configuration for the planner client.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Base URL for the planner service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlannerConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the route-options planner.
///
/// Trip planning is delegated entirely to this upstream; the client
/// just fetches pre-computed candidate routes between two stops.
#[derive(Debug, Clone)]
pub struct PlannerClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlannerClient {
    /// Create a new planner client.
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch candidate routes between two stops.
    pub async fn get_route_options(
        &self,
        origin: &str,
        dest: &str,
    ) -> Result<Vec<CandidateRoute>, PlannerError> {
        let url = format!("{}/route_options", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("origin", origin), ("dest", dest)])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let payload: RouteOptionsPayload =
            serde_json::from_str(&body).map_err(|e| PlannerError::Json {
                message: e.to_string(),
            })?;

        Ok(payload.into_candidates())
    }
}
