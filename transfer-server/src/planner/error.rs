//! Planner upstream error types.

/// Errors that can occur when interacting with the route-options planner.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("planner error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
