//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Prediction, TransferStatus};
use crate::mbta::StopResource;
use crate::polyline::LatLng;

/// Request for stops near a coordinate.
#[derive(Debug, Deserialize)]
pub struct NearbyStopsRequest {
    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lng: f64,

    /// Search radius in degrees (defaults to 0.01, roughly 1 km)
    pub radius: Option<f64>,

    /// Maximum number of stops to return
    pub limit: Option<u8>,
}

/// Request to search stops by name.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Query string; queries shorter than 2 characters match nothing
    pub q: String,

    /// Maximum number of stops to return
    pub limit: Option<usize>,
}

/// A stop in a stops response.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Upstream stop id (e.g. "place-sstat")
    pub id: String,

    /// Display name
    pub name: String,

    /// Latitude, when the upstream provides one
    pub latitude: Option<f64>,

    /// Longitude, when the upstream provides one
    pub longitude: Option<f64>,

    /// Municipality (e.g. "Boston")
    pub municipality: Option<String>,
}

impl StopResult {
    /// Build from an upstream stop resource.
    pub fn from_resource(stop: &StopResource) -> Self {
        Self {
            id: stop.id.clone(),
            name: stop.attributes.name.clone(),
            latitude: stop.attributes.latitude,
            longitude: stop.attributes.longitude,
            municipality: stop.attributes.municipality.clone(),
        }
    }
}

/// Response for stop listings.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<StopResult>,
}

/// Request for predictions at a stop.
#[derive(Debug, Deserialize)]
pub struct PredictionsRequest {
    /// Stop id to fetch predictions for
    pub stop: String,

    /// Maximum number of predictions to return
    pub limit: Option<u8>,
}

/// A prediction in a predictions response. Times are ISO-8601 UTC;
/// either may be null (terminal stops have no departure, origins no
/// arrival).
#[derive(Debug, Serialize)]
pub struct PredictionResult {
    pub stop: String,
    pub route: String,
    pub trip: Option<String>,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
}

impl PredictionResult {
    /// Build from a domain prediction.
    pub fn from_prediction(p: &Prediction) -> Self {
        Self {
            stop: p.stop.as_str().to_string(),
            route: p.route.clone(),
            trip: p.trip.clone(),
            arrival_time: p.arrival_time.map(|t| t.to_rfc3339()),
            departure_time: p.departure_time.map(|t| t.to_rfc3339()),
        }
    }
}

/// Response for predictions at a stop.
#[derive(Debug, Serialize)]
pub struct PredictionsResponse {
    pub predictions: Vec<PredictionResult>,
}

/// Request for a route shape.
#[derive(Debug, Deserialize)]
pub struct ShapeRequest {
    /// Route id or display name; normalized before the upstream lookup
    pub route: String,
}

/// Response for a route shape.
///
/// `polyline: null` means the (normalized) route id has no shape
/// upstream — "no polyline available", not an error.
#[derive(Debug, Serialize)]
pub struct ShapeResponse {
    /// The canonical route id the lookup used
    pub route_id: String,

    /// Raw encoded polyline, when available
    pub polyline: Option<String>,

    /// Decoded coordinates of the polyline
    pub points: Vec<LatLng>,
}

/// Request to classify a transfer directly from two timestamps.
#[derive(Debug, Deserialize)]
pub struct TransferStatusRequest {
    /// ISO-8601 predicted arrival of the incoming vehicle
    pub arrival: String,

    /// ISO-8601 predicted departure of the connecting vehicle
    pub departure: String,

    /// Walking time allowance in minutes (defaults to 3)
    pub walk: Option<f64>,
}

/// Response for a transfer classification.
#[derive(Debug, Serialize)]
pub struct TransferStatusResponse {
    pub status: TransferStatus,
    pub buffer_minutes: f64,
}

/// Request for route options between two stops.
#[derive(Debug, Deserialize)]
pub struct RouteOptionsRequest {
    /// Origin stop id
    pub origin: String,

    /// Destination stop id
    pub dest: String,
}

/// A leg of a route option.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Canonical route id, usable against the shapes endpoint
    pub route_id: String,

    /// Display name for the leg
    pub name: String,
}

/// One candidate route, enriched with normalized route ids and (where
/// live data allows) a transfer feasibility verdict.
#[derive(Debug, Serialize)]
pub struct RouteOptionResult {
    pub legs: Vec<LegResult>,

    /// Transfer stop name, for multi-leg candidates
    pub transfer_stop: Option<String>,

    /// Total travel time in minutes, as reported by the planner
    pub total_time: Option<f64>,

    /// Feasibility verdict; absent when no usable prediction pair exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransferStatus>,

    /// Buffer behind the verdict, in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_minutes: Option<f64>,
}

/// Response for route options.
#[derive(Debug, Serialize)]
pub struct RouteOptionsResponse {
    pub routes: Vec<RouteOptionResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
