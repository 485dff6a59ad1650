//! Ball ingestion
//!
//! - `Triggers`: pure decision of which detections a ball requests
//! - `IngestService`: validate, persist, advance the lifecycle, detect

mod service;
mod triggers;

pub use service::{IngestConfig, IngestError, IngestOutcome, IngestResult, IngestService};
pub use triggers::Triggers;
