//! holmes_geo library: IP and domain enrichment
//!
//! This library extracts IPv4 addresses and domain names from Apache logs,
//! CSV files, plain lists or piped text, and enriches every address with
//! GeoLite2 city, country and ASN data, reverse DNS, local blocklist
//! categories and (optionally) VirusTotal certificate and registrar details.
//! Results are written as CSV (mirrored to the console) and converted to a
//! styled spreadsheet.
//!
//! # Example
//!
//! ```no_run
//! use holmes_geo::{run_check, Config, InputSource};
//! use std::path::PathBuf;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: InputSource::Check(PathBuf::from("ips.txt")),
//!     reverse_dns: false,
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! println!("{} rows written to {:?}", report.rows_written, report.csv_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Tokens are processed strictly one
//! after another, so a current-thread runtime is enough.

#![warn(missing_docs)]

pub mod app;
pub mod blocklist;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod export;
pub mod extract;
pub mod geoip;
pub mod initialization;
pub mod pipeline;
pub mod reputation;

// Re-export public API
pub use config::{Config, InputSource, LogFormat, LogLevel};
pub use pipeline::{Pipeline, ResolvedHost, TokenOutcome};
pub use run::{process_extraction, run_check, run_check_with, CheckReport};

// Internal run module (contains the top-level check flow)
mod run {
    use std::io::Write;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use chrono::Local;
    use log::{error, info, warn};

    use crate::app::{print_processing_statistics, summary_line};
    use crate::blocklist::Blocklist;
    use crate::config::{Config, BLOCKLIST_SUBDIR};
    use crate::dns::HostResolver;
    use crate::error_handling::ProcessingStats;
    use crate::export::{convert_to_xlsx, output_file_name, ColumnFlags, ColumnSet, RowSink};
    use crate::extract::{extract_tokens, Extraction};
    use crate::geoip::{DatabasePaths, GeoDatabases, GeoSource};
    use crate::initialization::{init_client, init_resolver};
    use crate::pipeline::Pipeline;
    use crate::reputation::ReputationClient;

    /// Results of a check run.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CheckReport {
        /// Number of tokens extracted from the input
        pub total_tokens: usize,
        /// Number of rows written
        pub rows_written: usize,
        /// Number of tokens that produced no row
        pub skipped: usize,
        /// Path of the CSV results file (`None` with `--no-output` or no tokens)
        pub csv_path: Option<PathBuf>,
        /// Path of the spreadsheet, if conversion succeeded
        pub xlsx_path: Option<PathBuf>,
    }

    /// Runs a check with the provided configuration.
    ///
    /// Opens the GeoLite2 databases once, loads the blocklists, sets up DNS
    /// and (with reputation enabled) the HTTP client, then processes every
    /// token. Rows are mirrored to stdout.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file does not exist
    /// - The HTTP client cannot be initialized
    /// - The results file cannot be created or written
    ///
    /// Empty or malformed input is not an error: the run ends with zero rows.
    pub async fn run_check(config: Config) -> Result<CheckReport> {
        let resolver = init_resolver();

        let paths = DatabasePaths::discover(&config.db_dir);
        let geo = GeoDatabases::open(&paths);
        info!("Loaded {}/3 GeoLite2 databases", geo.loaded_count());

        let blocklist_dir = config
            .blocklist_dir
            .clone()
            .unwrap_or_else(|| paths.city_dir().join(BLOCKLIST_SUBDIR));
        let blocklist = Blocklist::load(&blocklist_dir);

        let reputation = if config.enable_reputation {
            let client = init_client().context("Failed to initialize HTTP client")?;
            let client = ReputationClient::from_env(client);
            if !client.has_api_key() {
                warn!("VT_API_KEY environment variable not set; reputation columns will be N/A");
            }
            Some(client)
        } else {
            None
        };

        let stats = ProcessingStats::new();
        let pipeline = Pipeline {
            resolver: &resolver,
            geo: &geo,
            blocklist: &blocklist,
            reputation: reputation.as_ref(),
            reverse_dns: config.reverse_dns,
            stats: &stats,
        };

        run_check_with(&config, &pipeline, Box::new(std::io::stdout())).await
    }

    /// Runs a check against already initialized resources.
    ///
    /// `console` receives the mirrored CSV rows.
    ///
    /// # Errors
    ///
    /// Same as [`run_check`], minus initialization failures.
    pub async fn run_check_with<R, G>(
        config: &Config,
        pipeline: &Pipeline<'_, R, G>,
        console: Box<dyn Write>,
    ) -> Result<CheckReport>
    where
        R: HostResolver,
        G: GeoSource + ?Sized,
    {
        let extraction = match extract_tokens(&config.input, pipeline.resolver).await {
            Ok(extraction) => extraction,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                error!("{e}");
                return Ok(CheckReport::default());
            }
        };

        process_extraction(config, pipeline, extraction, console).await
    }

    /// Processes tokens that were already extracted from `config.input`.
    ///
    /// Names that failed to resolve during extraction are reported and
    /// counted as skipped before any row is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the results file cannot be created or written.
    pub async fn process_extraction<R, G>(
        config: &Config,
        pipeline: &Pipeline<'_, R, G>,
        extraction: Extraction,
        console: Box<dyn Write>,
    ) -> Result<CheckReport>
    where
        R: HostResolver,
        G: GeoSource + ?Sized,
    {
        for name in &extraction.unresolved {
            pipeline.skip_unresolved(name);
        }
        let total_tokens = extraction.tokens.len() + extraction.unresolved.len();

        if extraction.is_empty() {
            match config.input.file() {
                Some(path) => warn!("No IP addresses found in {}", path.display()),
                None => error!("No valid IP addresses received from stdin."),
            }
            return Ok(CheckReport {
                total_tokens,
                skipped: pipeline.stats.total_skipped(),
                ..Default::default()
            });
        }
        info!(
            "Checking {} tokens from {} input",
            extraction.tokens.len(),
            config.input.mode_name()
        );

        let columns = ColumnSet::new(ColumnFlags {
            reverse_dns: config.reverse_dns,
            reputation: config.enable_reputation,
            user_agents: extraction.has_user_agents,
        });

        let mut sink = if config.file_output {
            std::fs::create_dir_all(&config.results_dir).with_context(|| {
                format!(
                    "Failed to create results directory {}",
                    config.results_dir.display()
                )
            })?;
            let target = config
                .results_dir
                .join(output_file_name(&config.input, Local::now()));
            RowSink::to_file(&target, columns, console)?
        } else {
            RowSink::console_only(columns, console)?
        };

        let rows_written = pipeline
            .process_tokens(&extraction.tokens, &mut sink)
            .await?;

        let csv_path = sink.finish()?;
        let xlsx_path = match csv_path.as_deref() {
            Some(path) => {
                info!("Result saved to: {}", path.display());
                match convert_to_xlsx(path) {
                    Ok(xlsx) => {
                        info!("Spreadsheet saved to: {}", xlsx.display());
                        Some(xlsx)
                    }
                    Err(e) => {
                        warn!("Failed to create spreadsheet: {e:#}");
                        None
                    }
                }
            }
            None => None,
        };

        let report = CheckReport {
            total_tokens,
            rows_written,
            skipped: pipeline.stats.total_skipped(),
            csv_path,
            xlsx_path,
        };
        print_processing_statistics(pipeline.stats);
        info!(
            "{}",
            summary_line(report.total_tokens, report.rows_written, report.skipped)
        );
        Ok(report)
    }
}
