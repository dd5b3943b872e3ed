//! MBTA V3 API client.
//!
//! This module provides an HTTP client for the MBTA's public V3 API,
//! which serves stop, live-prediction, and route-shape data.
//!
//! Key characteristics of the V3 API:
//! - Responses follow the JSON:API envelope (`data[].attributes`, with
//!   related resources under `relationships`)
//! - Prediction times are ISO-8601 with a fixed offset; either time may
//!   be null (terminal stops have no departure, origins no arrival)
//! - `/shapes` is keyed by **canonical route id** (`Red`, `SL1`, `66`);
//!   an unrecognized id returns an empty result set, not an error

mod client;
mod convert;
mod error;
mod types;

pub use client::{MbtaClient, MbtaConfig};
pub use convert::{convert_prediction, convert_predictions};
pub use error::MbtaError;
pub use types::{
    Document, PredictionAttributes, PredictionResource, Relationship, ShapeAttributes,
    ShapeResource, StopAttributes, StopResource,
};
