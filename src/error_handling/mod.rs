//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, extraction, reputation)
//! - Processing statistics tracking (skipped tokens, degraded lookups)
//!
//! Failures fall into three classes:
//! - **Fatal to the run**: a missing input file
//! - **Fatal to the token**: an unresolvable domain or incomplete GeoIP data
//! - **Degraded**: a lookup that failed but leaves a sentinel in the row

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{DegradedType, ExtractError, InitializationError, ReputationError, SkipType};
