//! Domain error types.
//!
//! These errors represent caller contract violations in the domain
//! layer. They are distinct from API/IO errors.

/// Domain-level errors for validation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Missing required time data for an operation
    #[error("missing required time data: {0}")]
    MissingTime(String),

    /// A timestamp string could not be parsed as ISO-8601
    #[error("invalid timestamp {value:?}: {message}")]
    InvalidTimestamp { value: String, message: String },
}
