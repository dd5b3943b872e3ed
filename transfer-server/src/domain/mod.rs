//! Domain types and the core transfer/normalization logic.

mod error;
mod prediction;
mod route_id;
mod stop;
mod transfer;

pub use error::DomainError;
pub use prediction::Prediction;
pub use route_id::normalize_route_id;
pub use stop::{InvalidStopId, StopId};
pub use transfer::{
    DEFAULT_WALK_MINS, LIKELY_THRESHOLD_MINS, RISKY_THRESHOLD_MINS, TransferStatus, buffer_minutes,
    classify, classify_predictions,
};
