//! Stop identifier type.

use std::fmt;

/// Error returned when parsing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// An MBTA stop identifier (e.g. `place-sstat`, `70080`).
///
/// Stop ids are opaque upstream keys with no fixed grammar; this type
/// only guarantees the id is non-empty and free of surrounding
/// whitespace.
///
/// # Examples
///
/// ```
/// use transfer_server::domain::StopId;
///
/// let sstat = StopId::parse("place-sstat").unwrap();
/// assert_eq!(sstat.as_str(), "place-sstat");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id from a string, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        Ok(StopId(trimmed.to_string()))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert!(StopId::parse("place-sstat").is_ok());
        assert!(StopId::parse("70080").is_ok());
        assert!(StopId::parse("place-north").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StopId::parse("").is_err());
        assert!(StopId::parse("  ").is_err());
        assert!(StopId::parse("\t\n").is_err());
    }

    #[test]
    fn trims_whitespace() {
        let id = StopId::parse("  place-sstat ").unwrap();
        assert_eq!(id.as_str(), "place-sstat");
    }

    #[test]
    fn display() {
        let id = StopId::parse("place-harsq").unwrap();
        assert_eq!(format!("{id}"), "place-harsq");
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StopId::parse("place-sstat").unwrap());
        assert!(set.contains(&StopId::parse("place-sstat").unwrap()));
        assert!(!set.contains(&StopId::parse("place-north").unwrap()));
    }
}
