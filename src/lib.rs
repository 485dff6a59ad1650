//! Cricket Patterns
//!
//! Ingests 5Five cricket deliveries one ball at a time, persists them in
//! SQLite and detects repeated run patterns at three granularities: the
//! over, the first innings and the full match.
//!
//! # Features
//!
//! - **HTTP ingestion**: `POST /api/ingest/ball` with validation and
//!   idempotent redelivery
//! - **Pattern detection**: over, innings and match signatures with global
//!   prior-occurrence counts
//! - **Match lifecycle**: first innings, innings break, second innings,
//!   completed
//! - **Offline report**: CSV ball log to an annotated Excel workbook
//! - **Replay**: feed a scraped ball log into a running server
//!
//! # Modules
//!
//! - `types`: Ball events, cards, patterns and match status
//! - `store`: SQLite persistence for balls, patterns and counts
//! - `detector`: Signature computation and pattern recording
//! - `ingest`: Validation, lifecycle and detection triggers per ball
//! - `api`: Axum router and handlers
//! - `config`: Environment configuration
//! - `report`: Batch pattern report (CSV to xlsx)
//! - `replay`: Scraper output replay client
//! - `utils`: Timestamps
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cricket_patterns::{AppState, IngestConfig, Store};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(Store::open("data/cricket.sqlite").unwrap());
//!     let state = Arc::new(AppState::new(store, IngestConfig::default(), 30));
//!     cricket_patterns::api::serve(state, "0.0.0.0:5000").await.unwrap();
//! }
//! ```

pub mod api;
pub mod config;
pub mod detector;
pub mod ingest;
pub mod logging;
pub mod replay;
pub mod report;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use config::ServerConfig;
pub use detector::PatternDetector;
pub use ingest::{IngestConfig, IngestError, IngestOutcome, IngestService};
pub use store::{Store, StoreConfig, StoreError};
pub use types::{
    BallEvent, BallPayload, Card, Granularity, MatchPhase, MatchStatus, PatternCount,
    PatternMatch, StoredBall,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
