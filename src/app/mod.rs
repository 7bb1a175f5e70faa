//! User-facing output of the binary and the run summary.

pub mod banner;
pub mod statistics;

// Re-export public API
pub use banner::{banner_text, usage_guide};
pub use statistics::{print_processing_statistics, summary_line};
