//! Transfer feasibility classification.
//!
//! Given the predicted arrival of one vehicle and the predicted departure
//! of a connecting vehicle at the same stop, classify how likely the
//! transfer is to succeed after accounting for walking time.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Prediction;
use super::error::DomainError;

/// Default walking time allowance at a transfer stop, in minutes.
pub const DEFAULT_WALK_MINS: f64 = 3.0;

/// Buffers strictly above this many minutes are classified `Likely`.
pub const LIKELY_THRESHOLD_MINS: f64 = 5.0;

/// Buffers at or above this many minutes (and at or below the likely
/// threshold) are classified `Risky`. A buffer of exactly zero counts
/// as feasible-but-risky, not unlikely.
pub const RISKY_THRESHOLD_MINS: f64 = 0.0;

/// How likely a transfer is to succeed.
///
/// Serialized as the upper-case badge strings the presentation layer
/// renders (`"LIKELY"` / `"RISKY"` / `"UNLIKELY"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    /// Comfortable buffer; the connection should be made.
    Likely,
    /// Tight buffer; the connection may be missed.
    Risky,
    /// Negative buffer; the connecting vehicle leaves before the
    /// passenger can reach it.
    Unlikely,
}

impl TransferStatus {
    /// The wire/badge string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Likely => "LIKELY",
            TransferStatus::Risky => "RISKY",
            TransferStatus::Unlikely => "UNLIKELY",
        }
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minutes available to make the transfer, net of walking time.
///
/// Computed in fractional minutes; real predictions carry seconds and a
/// 30-second difference can move a transfer across a threshold.
pub fn buffer_minutes(arrival: DateTime<Utc>, departure: DateTime<Utc>, walk_mins: f64) -> f64 {
    let gap_secs = (departure - arrival).num_seconds() as f64;
    gap_secs / 60.0 - walk_mins
}

/// Classify a transfer from predicted arrival and departure times.
///
/// Pure and deterministic: the same inputs always produce the same
/// status. The departure may precede the arrival; that simply yields a
/// negative buffer and an `Unlikely` verdict.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use transfer_server::domain::{TransferStatus, classify};
///
/// let arrival = Utc::now();
/// let departure = arrival + Duration::minutes(9);
/// assert_eq!(classify(arrival, departure, 3.0), TransferStatus::Likely);
/// ```
pub fn classify(
    arrival: DateTime<Utc>,
    departure: DateTime<Utc>,
    walk_mins: f64,
) -> TransferStatus {
    let buffer = buffer_minutes(arrival, departure, walk_mins);

    if buffer > LIKELY_THRESHOLD_MINS {
        TransferStatus::Likely
    } else if buffer >= RISKY_THRESHOLD_MINS {
        TransferStatus::Risky
    } else {
        TransferStatus::Unlikely
    }
}

/// Classify a transfer between two live predictions.
///
/// The incoming prediction must carry an arrival time and the connecting
/// prediction a departure time; a missing time is a caller contract
/// violation surfaced as [`DomainError::MissingTime`] rather than
/// silently defaulted.
pub fn classify_predictions(
    incoming: &Prediction,
    connecting: &Prediction,
    walk_mins: f64,
) -> Result<TransferStatus, DomainError> {
    let arrival = incoming
        .arrival_time
        .ok_or_else(|| DomainError::MissingTime("arrival".into()))?;
    let departure = connecting
        .departure_time
        .ok_or_else(|| DomainError::MissingTime("departure".into()))?;

    Ok(classify(arrival, departure, walk_mins))
}
