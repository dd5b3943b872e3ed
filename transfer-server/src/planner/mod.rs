//! Route-options planner upstream.
//!
//! Trip planning is not done here: an external planner service returns
//! pre-computed candidate routes, and this module is the client for it.
//! The candidates come back in two wire generations (see `types`), both
//! of which are accepted.

mod client;
mod error;
mod types;

pub use client::{PlannerClient, PlannerConfig};
pub use error::PlannerError;
pub use types::{CandidateRoute, LegRecord, RouteOptionsPayload, TransferStopRecord};
