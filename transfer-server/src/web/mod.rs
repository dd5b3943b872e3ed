//! Web layer: axum router, handlers, DTOs, and shared state.
//!
//! All endpoints are JSON; the frontend is a separate application that
//! consumes this server as its backend.

pub mod dto;
mod routes;
mod state;

pub use routes::{AppError, create_router};
pub use state::AppState;
