//! Store Module for ball events and patterns
//!
//! This module provides the persistence layer:
//! - `Store`: SQLite tables for balls, pattern occurrences and signature counts
//! - `StoreStats`: Row counts for monitoring
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌─────────┐    ┌──────────────┐    ┌──────────────────┐    ┌────────────────┐
//! │ Ingest  │───►│ ball_events  │───►│ detector window  │───►│ *_patterns +   │
//! │ Request │    │ (append)     │    │ read             │    │ pattern_counts │
//! └─────────┘    └──────────────┘    └──────────────────┘    └────────────────┘
//!
//! Read Path:
//! ┌───────────────┐    ┌──────────────────────────┐
//! │ Live query    │───►│ ball_events by id DESC   │
//! └───────────────┘    └──────────────────────────┘
//! ```

mod sqlite;
mod stats;

pub use sqlite::{BallWrite, Store, StoreConfig, StoreError, StoreResult, IN_MEMORY};
pub use stats::StoreStats;
