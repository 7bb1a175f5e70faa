//! Configuration types.
//!
//! This module defines the enums and structs that make up a run's
//! configuration. They carry no CLI dependencies and can be constructed
//! programmatically.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::constants::{DEFAULT_DB_DIR, DEFAULT_RESULTS_DIR};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Where the candidate tokens come from.
///
/// The file-backed modes are mutually exclusive; `Stdin` is selected when no
/// file mode is given and standard input is not a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Apache access log: first IPv4 per line, paired with the trailing quoted user agent
    Apache(PathBuf),
    /// CSV file, optionally restricted to one column
    Csv {
        /// Path to the CSV file
        path: PathBuf,
        /// Column holding the addresses (all columns are scanned when `None`)
        column: Option<String>,
    },
    /// Plain list, one IP or domain per line, passed through unfiltered
    Check(PathBuf),
    /// Piped standard input with mixed IP/domain lines
    Stdin,
}

impl InputSource {
    /// Returns the input file path, or `None` for stdin.
    pub fn file(&self) -> Option<&Path> {
        match self {
            InputSource::Apache(path) | InputSource::Check(path) => Some(path),
            InputSource::Csv { path, .. } => Some(path),
            InputSource::Stdin => None,
        }
    }

    /// Short mode name used in log messages.
    pub fn mode_name(&self) -> &'static str {
        match self {
            InputSource::Apache(_) => "apache",
            InputSource::Csv { .. } => "csv",
            InputSource::Check(_) => "check",
            InputSource::Stdin => "stdin",
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// Logging is set up by the caller before a run starts.
///
/// # Examples
///
/// ```no_run
/// use holmes_geo::{Config, InputSource};
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: InputSource::Check(PathBuf::from("ips.txt")),
///     reverse_dns: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Token source
    pub input: InputSource,

    /// Query the reputation API for certificate and registrar data
    pub enable_reputation: bool,

    /// Perform reverse DNS lookups (adds the "Reverse DNS" column)
    pub reverse_dns: bool,

    /// Persist results as CSV + spreadsheet (console-only when false)
    pub file_output: bool,

    /// Local GeoIP database directory
    pub db_dir: PathBuf,

    /// Blocklist directory (defaults to `outsource_db` next to the city database)
    pub blocklist_dir: Option<PathBuf>,

    /// Directory receiving the result files
    pub results_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputSource::Stdin,
            enable_reputation: false,
            reverse_dns: true,
            file_output: true,
            db_dir: PathBuf::from(DEFAULT_DB_DIR),
            blocklist_dir: None,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_input_source_file() {
        let apache = InputSource::Apache(PathBuf::from("access.log"));
        assert_eq!(apache.file(), Some(Path::new("access.log")));

        let csv = InputSource::Csv {
            path: PathBuf::from("hits.csv"),
            column: Some("src".to_string()),
        };
        assert_eq!(csv.file(), Some(Path::new("hits.csv")));
        assert_eq!(csv.mode_name(), "csv");

        assert_eq!(InputSource::Stdin.file(), None);
        assert_eq!(InputSource::Stdin.mode_name(), "stdin");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.input, InputSource::Stdin);
        assert!(!config.enable_reputation);
        assert!(config.reverse_dns);
        assert!(config.file_output);
        assert_eq!(config.db_dir, PathBuf::from("db"));
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert!(config.blocklist_dir.is_none());
    }
}
