//! Reputation lookups against the VirusTotal v3 API.
//!
//! A lookup yields two display strings: the certificate common name and the
//! registrar (for domains) or network owner (for addresses). Any failure
//! degrades both to "N/A".

mod client;
mod parse;

// Re-export public API
pub use client::ReputationClient;
pub use parse::{parse_report, QueryKind};

use crate::config::NOT_AVAILABLE;

/// Certificate and registrar strings for one lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReputationReport {
    /// Certificate CN, `(issuer) <CN>`, or the first alternative name
    pub certificate: String,
    /// Registrar URL for domains, `AS<n> (<owner>)` or `Network: <cidr>` for addresses
    pub registrar: String,
}

impl ReputationReport {
    /// Both fields set to "N/A".
    pub fn unavailable() -> Self {
        Self {
            certificate: NOT_AVAILABLE.to_string(),
            registrar: NOT_AVAILABLE.to_string(),
        }
    }
}

impl Default for ReputationReport {
    fn default() -> Self {
        Self::unavailable()
    }
}
