//! Command-line options.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::config::constants::{DEFAULT_DB_DIR, DEFAULT_RESULTS_DIR};
use crate::config::types::{Config, InputSource, LogFormat, LogLevel};

/// Command-line interface of the `holmes_geo` binary.
///
/// Exactly one of `--apache`, `--csv` or `--check` selects a file input;
/// with none of them, piped standard input is used.
#[derive(Debug, Parser)]
#[command(
    name = "holmes_geo",
    version,
    about = "HolmesGeo - IP geolocation, ASN and reputation enrichment",
    group(ArgGroup::new("input").args(["apache", "csv", "check"]).multiple(false))
)]
pub struct Cli {
    /// Extract IPs (and user agents) from an Apache log file
    #[arg(long, value_name = "FILE")]
    pub apache: Option<PathBuf>,

    /// Extract IPs from a CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Check IPs or domains from a text file with one entry per line
    #[arg(long, value_name = "FILE")]
    pub check: Option<PathBuf>,

    /// Column name containing IP addresses in CSV mode
    #[arg(long, value_name = "NAME", requires = "csv")]
    pub column: Option<String>,

    /// Query VirusTotal for certificate CN and registrar (needs VT_API_KEY)
    #[arg(long)]
    pub virtot: bool,

    /// Skip reverse DNS lookups
    #[arg(long)]
    pub no_rdns: bool,

    /// Print results to the console only, without writing files
    #[arg(long)]
    pub no_output: bool,

    /// Directory holding the GeoLite2 databases
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DB_DIR)]
    pub db_dir: PathBuf,

    /// Directory holding blocklist files (one category per .txt file)
    #[arg(long, value_name = "DIR")]
    pub blocklist_dir: Option<PathBuf>,

    /// Directory receiving the result files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_RESULTS_DIR)]
    pub results_dir: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Determines the input source from the flags.
    ///
    /// File modes take precedence; stdin is chosen only when `stdin_piped`
    /// is true and no file mode was given. Returns `None` when there is no
    /// input method at all.
    pub fn input_source(&self, stdin_piped: bool) -> Option<InputSource> {
        if let Some(path) = &self.apache {
            Some(InputSource::Apache(path.clone()))
        } else if let Some(path) = &self.csv {
            Some(InputSource::Csv {
                path: path.clone(),
                column: self.column.clone(),
            })
        } else if let Some(path) = &self.check {
            Some(InputSource::Check(path.clone()))
        } else if stdin_piped {
            Some(InputSource::Stdin)
        } else {
            None
        }
    }

    /// Converts the parsed options into a library `Config`.
    ///
    /// Returns `None` when no input method is available.
    pub fn into_config(self, stdin_piped: bool) -> Option<Config> {
        let input = self.input_source(stdin_piped)?;
        Some(Config {
            input,
            enable_reputation: self.virtot,
            reverse_dns: !self.no_rdns,
            file_output: !self.no_output,
            db_dir: self.db_dir,
            blocklist_dir: self.blocklist_dir,
            results_dir: self.results_dir,
        })
    }
}
