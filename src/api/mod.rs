//! API module for HTTP endpoints
//!
//! This module provides the REST API used by the scraper and live-view clients.

pub mod http;
pub mod rest;
pub mod state;

pub use http::{create_router, serve};
pub use state::AppState;
