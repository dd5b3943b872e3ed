//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

use crate::domain::{DEFAULT_WALK_MINS, StopId, buffer_minutes, classify, normalize_route_id};
use crate::planner::CandidateRoute;
use crate::polyline::decode_polyline;
use crate::transfers::{TransferAssessment, assess_transfer};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mbta/stops", get(nearby_stops))
        .route("/mbta/stops_search", get(search_stops))
        .route("/mbta/predictions", get(predictions))
        .route("/mbta/shapes", get(shapes))
        .route("/transfer_status", get(transfer_status))
        .route("/route_options", get(route_options))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Stops nearest to a coordinate, sorted by distance.
async fn nearby_stops(
    State(state): State<AppState>,
    Query(req): Query<NearbyStopsRequest>,
) -> Result<Json<StopsResponse>, AppError> {
    let radius = req.radius.unwrap_or(0.01);
    let limit = req.limit.unwrap_or(5).min(25);

    let stops = state
        .mbta
        .get_nearby_stops(req.lat, req.lng, radius, limit)
        .await?;

    Ok(Json(StopsResponse {
        stops: stops.iter().map(StopResult::from_resource).collect(),
    }))
}

/// Search stations by name.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Result<Json<StopsResponse>, AppError> {
    let limit = req.limit.unwrap_or(5).min(25);

    let stops = state.mbta.search_stops(&req.q, limit).await?;

    Ok(Json(StopsResponse {
        stops: stops.iter().map(StopResult::from_resource).collect(),
    }))
}

/// Live predictions at a stop.
async fn predictions(
    State(state): State<AppState>,
    Query(req): Query<PredictionsRequest>,
) -> Result<Json<PredictionsResponse>, AppError> {
    let stop = StopId::parse(&req.stop).map_err(|_| AppError::BadRequest {
        message: format!("Invalid stop id: {:?}", req.stop),
    })?;
    let limit = req.limit.unwrap_or(20).min(50);

    let predictions = state.mbta.get_predictions(&stop, limit).await?;

    Ok(Json(PredictionsResponse {
        predictions: predictions
            .iter()
            .map(PredictionResult::from_prediction)
            .collect(),
    }))
}

/// Map shape for a route.
///
/// The route parameter may be a display name; it is normalized to a
/// canonical id before the upstream lookup. An unrecognized id yields
/// `polyline: null`, not an error.
async fn shapes(
    State(state): State<AppState>,
    Query(req): Query<ShapeRequest>,
) -> Result<Json<ShapeResponse>, AppError> {
    let route_id = normalize_route_id(&req.route);

    let polyline = state.mbta.get_shape_polyline(&route_id).await?;

    let points = match polyline.as_deref() {
        Some(encoded) => match decode_polyline(encoded) {
            Ok(points) => points,
            Err(e) => {
                tracing::warn!(route = %route_id, error = %e, "undecodable shape polyline");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    Ok(Json(ShapeResponse {
        route_id,
        polyline: (*polyline).clone(),
        points,
    }))
}

/// Parse an ISO-8601 query parameter, normalizing to UTC.
fn parse_instant(raw: &str, field: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid {field} timestamp {raw:?}: {e}"),
        })
}

/// Classify a transfer directly from two timestamps.
async fn transfer_status(
    Query(req): Query<TransferStatusRequest>,
) -> Result<Json<TransferStatusResponse>, AppError> {
    let arrival = parse_instant(&req.arrival, "arrival")?;
    let departure = parse_instant(&req.departure, "departure")?;
    let walk = req.walk.unwrap_or(DEFAULT_WALK_MINS);

    Ok(Json(TransferStatusResponse {
        status: classify(arrival, departure, walk),
        buffer_minutes: buffer_minutes(arrival, departure, walk),
    }))
}

/// Candidate routes between two stops, enriched with canonical route
/// ids and live transfer verdicts.
async fn route_options(
    State(state): State<AppState>,
    Query(req): Query<RouteOptionsRequest>,
) -> Result<Json<RouteOptionsResponse>, AppError> {
    let candidates = state
        .planner
        .get_route_options(&req.origin, &req.dest)
        .await?;

    let routes = futures::future::join_all(
        candidates
            .iter()
            .map(|candidate| enrich_candidate(&state, candidate)),
    )
    .await;

    Ok(Json(RouteOptionsResponse { routes }))
}

/// Normalize a candidate's legs and, for two-leg candidates with a
/// known transfer stop, attach a live feasibility verdict.
async fn enrich_candidate(state: &AppState, candidate: &CandidateRoute) -> RouteOptionResult {
    let legs = resolve_legs(candidate);

    let assessment = assess_candidate(state, candidate, &legs).await;

    RouteOptionResult {
        transfer_stop: candidate
            .transfer_stop
            .as_ref()
            .and_then(|ts| ts.name())
            .map(str::to_string),
        total_time: candidate.total_time,
        status: assessment.as_ref().map(|a| a.status),
        buffer_minutes: assessment.as_ref().map(|a| a.buffer_minutes),
        legs,
    }
}

/// Resolve a candidate's legs to (canonical id, display name) pairs.
fn resolve_legs(candidate: &CandidateRoute) -> Vec<LegResult> {
    candidate
        .resolved_legs()
        .iter()
        .filter_map(|leg| {
            let label = leg.route_label()?;
            Some(LegResult {
                route_id: normalize_route_id(label),
                name: leg.display_name().unwrap_or(label).to_string(),
            })
        })
        .collect()
}

/// Fetch predictions at the transfer stop and assess the connection.
///
/// Degrades to `None` — no verdict — when the candidate is not a
/// two-leg transfer, the planner gave no transfer stop id, or the
/// predictions fetch fails.
async fn assess_candidate(
    state: &AppState,
    candidate: &CandidateRoute,
    legs: &[LegResult],
) -> Option<TransferAssessment> {
    let [incoming, connecting] = legs else {
        return None;
    };

    let stop_id = candidate.transfer_stop.as_ref()?.id()?;
    let stop = StopId::parse(stop_id).ok()?;

    let predictions = match state.mbta.get_predictions(&stop, 20).await {
        Ok(predictions) => predictions,
        Err(e) => {
            tracing::warn!(stop = %stop, error = %e, "prediction fetch failed; omitting verdict");
            return None;
        }
    };

    assess_transfer(
        &predictions,
        &incoming.route_id,
        &connecting.route_id,
        DEFAULT_WALK_MINS,
    )
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<crate::mbta::MbtaError> for AppError {
    fn from(e: crate::mbta::MbtaError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<crate::planner::PlannerError> for AppError {
    fn from(e: crate::planner::PlannerError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
