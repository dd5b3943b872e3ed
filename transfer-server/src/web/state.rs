//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedMbtaClient;
use crate::planner::PlannerClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached MBTA API client
    pub mbta: Arc<CachedMbtaClient>,

    /// Route-options planner client
    pub planner: Arc<PlannerClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(mbta: CachedMbtaClient, planner: PlannerClient) -> Self {
        Self {
            mbta: Arc::new(mbta),
            planner: Arc::new(planner),
        }
    }
}
