//! Live prediction type.

use chrono::{DateTime, Utc};

use super::StopId;

/// A real-time estimated arrival/departure for a vehicle at a stop.
///
/// Either time may be absent: a terminal stop has no departure and an
/// originating stop has no arrival. A prediction never fabricates a
/// time; callers that need a specific time must check for it (or go
/// through [`crate::domain::classify_predictions`], which rejects
/// missing times).
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The stop this prediction is for.
    pub stop: StopId,

    /// Upstream route id (already canonical in the predictions feed).
    pub route: String,

    /// Upstream trip id, when the feed provides one.
    pub trip: Option<String>,

    /// Predicted arrival time.
    pub arrival_time: Option<DateTime<Utc>>,

    /// Predicted departure time.
    pub departure_time: Option<DateTime<Utc>>,
}

impl Prediction {
    /// The best available instant for ordering predictions: departure
    /// when present, otherwise arrival.
    pub fn effective_time(&self) -> Option<DateTime<Utc>> {
        self.departure_time.or(self.arrival_time)
    }

    /// True when the prediction carries no time at all and is unusable.
    pub fn is_empty(&self) -> bool {
        self.arrival_time.is_none() && self.departure_time.is_none()
    }
}
