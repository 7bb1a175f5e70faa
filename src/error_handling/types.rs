//! Error type definitions.
//!
//! This module defines the error types used throughout the application and
//! the skip/degradation categories counted during a run.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while extracting tokens from an input source.
///
/// Only `NotFound` aborts a run; every other variant ends it with zero rows.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The input file does not exist.
    #[error("File {} not found", .0.display())]
    NotFound(PathBuf),

    /// The CSV file has no header and no data.
    #[error("The CSV file {} is empty", .0.display())]
    EmptyFile(PathBuf),

    /// The CSV file could not be parsed.
    #[error("Could not parse {} as a CSV file: {source}", .path.display())]
    Parse {
        /// CSV file path
        path: PathBuf,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// The requested CSV column does not exist.
    #[error("Column '{requested}' not found in the CSV file. Available columns: {}", .available.join(", "))]
    MissingColumn {
        /// Column asked for with `--column`
        requested: String,
        /// Columns present in the header
        available: Vec<String>,
    },

    /// Any other I/O failure while reading the input.
    #[error("Error reading {}: {source}", .path.display())]
    Io {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Builds an error from an I/O failure, mapping "not found" to `NotFound`.
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ExtractError::NotFound(path)
        } else {
            ExtractError::Io { path, source }
        }
    }

    /// Returns true if this error must abort the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExtractError::NotFound(_))
    }
}

/// Errors from the reputation API.
///
/// Never propagated past the reputation lookup: callers degrade to "N/A".
#[derive(Error, Debug)]
pub enum ReputationError {
    /// The API key environment variable is not set.
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),

    /// The API answered with a non-success status.
    #[error("HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The body was not the expected JSON document.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reasons a token produced no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum SkipType {
    /// A domain name did not resolve to an address
    UnresolvableDomain,
    /// At least one of the city/ASN/country lookups returned nothing
    IncompleteGeoData,
}

/// Lookups that failed but still let the row through with sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum DegradedType {
    /// No PTR record for the address
    ReverseDnsUnavailable,
    /// Reputation API failed or was not configured
    ReputationUnavailable,
}

impl SkipType {
    /// Returns a human-readable string representation of the skip reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipType::UnresolvableDomain => "Unresolvable domain",
            SkipType::IncompleteGeoData => "Incomplete GeoIP data",
        }
    }
}

impl DegradedType {
    /// Returns a human-readable string representation of the degraded lookup.
    pub fn as_str(&self) -> &'static str {
        match self {
            DegradedType::ReverseDnsUnavailable => "Reverse DNS unavailable",
            DegradedType::ReputationUnavailable => "Reputation lookup unavailable",
        }
    }
}
