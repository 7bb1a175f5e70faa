//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (database names, directories, sentinels)
//! - The library-level `Config` and its input source
//! - CLI option parsing (`Cli`) and conversion into `Config`

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::Cli;
pub use constants::*;
pub use types::{Config, InputSource, LogFormat, LogLevel};
