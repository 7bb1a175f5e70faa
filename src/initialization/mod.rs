//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - DNS resolver
//! - HTTP client for the reputation API

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
