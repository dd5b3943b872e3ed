//! MBTA client error types.

use std::fmt;

/// Errors from the MBTA V3 API client.
#[derive(Debug)]
pub enum MbtaError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,
}

impl fmt::Display for MbtaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MbtaError::Http(e) => write!(f, "HTTP error: {e}"),
            MbtaError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            MbtaError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            MbtaError::RateLimited => write!(f, "rate limited by MBTA API"),
            MbtaError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
        }
    }
}

impl std::error::Error for MbtaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MbtaError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MbtaError {
    fn from(err: reqwest::Error) -> Self {
        MbtaError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MbtaError::RateLimited;
        assert_eq!(err.to_string(), "rate limited by MBTA API");

        let err = MbtaError::ApiError {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = MbtaError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected string"));
    }
}
