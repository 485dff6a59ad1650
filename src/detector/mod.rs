//! Pattern detection
//!
//! - `signature`: run sequence to `-`-joined string
//! - `PatternDetector`: over, innings and match detection over the store

mod engine;
mod signature;

pub use engine::PatternDetector;
pub use signature::{signature, SIGNATURE_SEPARATOR};
