//! Transit transfer-feasibility server.
//!
//! A backend for a transfer-planning frontend: proxies the MBTA V3 API
//! (stops, live predictions, route shapes), fetches candidate routes
//! from an external planner, and answers the question the UI actually
//! asks: "will I make this connection?"

pub mod cache;
pub mod domain;
pub mod mbta;
pub mod planner;
pub mod polyline;
pub mod transfers;
pub mod web;
