//! Wire types for the route-options planner upstream.
//!
//! The planner returns pre-computed candidate routes (trip planning
//! itself is delegated entirely to it). Two generations of the payload
//! are in the wild: the current shape carries a `legs` array, the
//! legacy shape separate `leg1`/`leg2` objects; `transferStop` may be a
//! bare string or an `{id, name}` record. These types tolerate both.

use serde::Deserialize;

/// Planner response: either a bare array of candidates or `{routes: […]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RouteOptionsPayload {
    List(Vec<CandidateRoute>),
    Wrapped { routes: Vec<CandidateRoute> },
}

impl RouteOptionsPayload {
    /// Unwrap to the candidate list.
    pub fn into_candidates(self) -> Vec<CandidateRoute> {
        match self {
            RouteOptionsPayload::List(candidates) => candidates,
            RouteOptionsPayload::Wrapped { routes } => routes,
        }
    }
}

/// One candidate route from the planner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateRoute {
    /// Current-shape legs.
    #[serde(default)]
    pub legs: Vec<LegRecord>,

    /// Legacy first leg.
    #[serde(default)]
    pub leg1: Option<LegRecord>,

    /// Legacy second leg.
    #[serde(default)]
    pub leg2: Option<LegRecord>,

    /// Where the transfer happens, for multi-leg candidates.
    #[serde(default, rename = "transferStop")]
    pub transfer_stop: Option<TransferStopRecord>,

    /// Total travel time in minutes.
    #[serde(default, rename = "totalTime")]
    pub total_time: Option<f64>,
}

impl CandidateRoute {
    /// The candidate's legs, reconciling the legacy `leg1`/`leg2` shape
    /// with the current `legs` array. An explicit `legs` array wins.
    pub fn resolved_legs(&self) -> Vec<LegRecord> {
        if !self.legs.is_empty() {
            return self.legs.clone();
        }

        let mut out = Vec::new();
        if let Some(leg) = &self.leg1 {
            out.push(leg.clone());
        }
        if let Some(leg) = &self.leg2 {
            out.push(leg.clone());
        }
        out
    }
}

/// A leg of a candidate route. Older planners populate `route` where
/// newer ones populate `routeId`; `routeName` is the display form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegRecord {
    #[serde(default, rename = "routeId")]
    pub route_id: Option<String>,

    #[serde(default)]
    pub route: Option<String>,

    #[serde(default, rename = "routeName")]
    pub route_name: Option<String>,
}

impl LegRecord {
    /// The label to normalize into a canonical route id: `routeId`
    /// first, then `route`, then `routeName`.
    pub fn route_label(&self) -> Option<&str> {
        self.route_id
            .as_deref()
            .or(self.route.as_deref())
            .or(self.route_name.as_deref())
    }

    /// The label to display: `routeName` first, then `route`, then
    /// `routeId`.
    pub fn display_name(&self) -> Option<&str> {
        self.route_name
            .as_deref()
            .or(self.route.as_deref())
            .or(self.route_id.as_deref())
    }
}

/// Transfer stop: a bare name string or an `{id, name}` record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransferStopRecord {
    Name(String),
    Record {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl TransferStopRecord {
    /// The stop id to key prediction lookups by, when the planner
    /// provides one.
    pub fn id(&self) -> Option<&str> {
        match self {
            TransferStopRecord::Name(_) => None,
            TransferStopRecord::Record { id, .. } => id.as_deref(),
        }
    }

    /// Human-readable name, falling back to the id.
    pub fn name(&self) -> Option<&str> {
        match self {
            TransferStopRecord::Name(name) => Some(name),
            TransferStopRecord::Record { id, name } => name.as_deref().or(id.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_current_shape() {
        let body = r#"[{
            "legs": [{"routeId": "Red"}, {"routeId": "66", "routeName": "Bus 66"}],
            "transferStop": {"id": "place-harsq", "name": "Harvard"},
            "totalTime": 34
        }]"#;

        let payload: RouteOptionsPayload = serde_json::from_str(body).unwrap();
        let candidates = payload.into_candidates();
        assert_eq!(candidates.len(), 1);

        let legs = candidates[0].resolved_legs();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].route_label(), Some("Red"));
        assert_eq!(legs[1].display_name(), Some("Bus 66"));

        let ts = candidates[0].transfer_stop.as_ref().unwrap();
        assert_eq!(ts.id(), Some("place-harsq"));
        assert_eq!(ts.name(), Some("Harvard"));
    }

    #[test]
    fn parse_legacy_shape() {
        let body = r#"{"routes": [{
            "leg1": {"route": "Red Line"},
            "leg2": {"route": "Bus 66"},
            "transferStop": "Harvard",
            "totalTime": 40
        }]}"#;

        let payload: RouteOptionsPayload = serde_json::from_str(body).unwrap();
        let candidates = payload.into_candidates();
        assert_eq!(candidates.len(), 1);

        let legs = candidates[0].resolved_legs();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].route_label(), Some("Red Line"));

        let ts = candidates[0].transfer_stop.as_ref().unwrap();
        assert_eq!(ts.id(), None);
        assert_eq!(ts.name(), Some("Harvard"));
    }

    #[test]
    fn explicit_legs_win_over_legacy() {
        let body = r#"[{
            "legs": [{"routeId": "Orange"}],
            "leg1": {"route": "Red Line"}
        }]"#;

        let payload: RouteOptionsPayload = serde_json::from_str(body).unwrap();
        let candidates = payload.into_candidates();
        let legs = candidates[0].resolved_legs();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].route_label(), Some("Orange"));
    }

    #[test]
    fn label_fallback_order() {
        let leg = LegRecord {
            route_id: None,
            route: Some("1".to_string()),
            route_name: Some("Bus 1".to_string()),
        };
        assert_eq!(leg.route_label(), Some("1"));
        assert_eq!(leg.display_name(), Some("Bus 1"));

        let empty = LegRecord::default();
        assert_eq!(empty.route_label(), None);
        assert_eq!(empty.display_name(), None);
    }

    #[test]
    fn transfer_stop_record_name_falls_back_to_id() {
        let ts = TransferStopRecord::Record {
            id: Some("place-harsq".to_string()),
            name: None,
        };
        assert_eq!(ts.name(), Some("place-harsq"));
    }
}
