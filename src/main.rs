//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `holmes_geo` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization and the startup banner
//! - Exit codes
//!
//! All core functionality is implemented in the library crate.

use std::io::IsTerminal;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use holmes_geo::app::{banner_text, usage_guide};
use holmes_geo::config::Cli;
use holmes_geo::initialization::init_logger_with;
use holmes_geo::run_check;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // VT_API_KEY may live in .env, either here or next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();
    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    eprintln!("{}", banner_text());

    let stdin_piped = !std::io::stdin().is_terminal();
    let Some(config) = cli.into_config(stdin_piped) else {
        log::error!("Please specify an input method (--apache, --csv, |, or --check).");
        eprintln!("{}", usage_guide());
        process::exit(1);
    };

    match run_check(config).await {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("{:#}", e);
            process::exit(1);
        }
    }
}
