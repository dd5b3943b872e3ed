//! Transfer assessment logic.
//!
//! This module contains the core logic for assessing a transfer between
//! two legs of a candidate route: pair up the incoming leg's arrival
//! prediction with the connecting leg's next departure at the transfer
//! stop, then classify the buffer.

use chrono::{DateTime, Utc};

use crate::domain::{Prediction, TransferStatus, buffer_minutes, classify};

/// The outcome of assessing one transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferAssessment {
    /// The feasibility verdict.
    pub status: TransferStatus,

    /// Minutes available net of walking time (may be fractional or
    /// negative).
    pub buffer_minutes: f64,

    /// Predicted arrival of the incoming vehicle.
    pub arrival_time: DateTime<Utc>,

    /// Predicted departure of the connecting vehicle.
    pub departure_time: DateTime<Utc>,
}

/// Assess a transfer from live predictions at the transfer stop.
///
/// Given the stop's predictions and the canonical route ids of the two
/// legs, picks the earliest arrival on the incoming route and the
/// earliest connecting departure at or after that arrival, then
/// classifies the buffer.
///
/// Returns `None` when either side has no usable prediction — an
/// absent verdict, not an error: live data simply does not cover every
/// candidate.
pub fn assess_transfer(
    predictions: &[Prediction],
    incoming_route: &str,
    connecting_route: &str,
    walk_mins: f64,
) -> Option<TransferAssessment> {
    let arrival = predictions
        .iter()
        .filter(|p| p.route == incoming_route)
        .filter_map(|p| p.arrival_time)
        .min()?;

    // The connecting vehicle must leave at or after the arrival; an
    // earlier departure is a train already gone.
    let departure = predictions
        .iter()
        .filter(|p| p.route == connecting_route)
        .filter_map(|p| p.departure_time)
        .filter(|d| *d >= arrival)
        .min()?;

    Some(TransferAssessment {
        status: classify(arrival, departure, walk_mins),
        buffer_minutes: buffer_minutes(arrival, departure, walk_mins),
        arrival_time: arrival,
        departure_time: departure,
    })
}
