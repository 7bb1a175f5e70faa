//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting: plain text with colored
/// `[+]`/`[!]` markers, or one JSON object per line. Records go to stderr so
/// the CSV mirrored on stdout stays clean. Debug and trace records also show
/// the module they come from.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter overrides it.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=holmes_geo=debug holmes_geo --check ips.txt
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    // hickory logs every failed query at warn; the resolver already reports them
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Error);
    builder.filter_module("holmes_geo", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "level": record.level().as_str(),
                    "module": short_target(record.target()),
                    "message": record.args().to_string(),
                });
                writeln!(buf, "{line}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let (marker, message) = match level {
                    log::Level::Error => ("[!]".red().bold(), record.args().to_string().red()),
                    log::Level::Warn => ("[!]".yellow().bold(), record.args().to_string().yellow()),
                    log::Level::Info => ("[+]".green().bold(), record.args().to_string().normal()),
                    log::Level::Debug => ("[i]".blue(), record.args().to_string().dimmed()),
                    log::Level::Trace => ("[.]".purple(), record.args().to_string().dimmed()),
                };

                if level <= log::Level::Info {
                    writeln!(buf, "{marker} {message}")
                } else {
                    writeln!(
                        buf,
                        "{marker} {} {message}",
                        short_target(record.target()).cyan()
                    )
                }
            });
        }
    }

    // try_init so tests can call this more than once
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Module path without the crate prefix (`holmes_geo::dns` -> `dns`).
fn short_target(target: &str) -> &str {
    target
        .strip_prefix("holmes_geo::")
        .unwrap_or(target)
}
