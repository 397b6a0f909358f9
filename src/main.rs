//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `beacon_intel` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Mapping failures to exit codes
//!
//! All core functionality is implemented in the library crate.

use std::io;
use std::process;

use clap::Parser;
use log::error;

use beacon_intel::config::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
use beacon_intel::initialization::init_logger_with;
use beacon_intel::{exit_code_for, run_query, ApiError, Cli, Query};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables from .env file (if it exists)
    // This allows setting BEACON_INTEL_API_KEY in .env without exporting it manually
    // Try loading from current directory first, then from the executable's directory
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

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                EXIT_USAGE
            } else {
                EXIT_SUCCESS
            };
            // --help and --version go to stdout, usage errors to stderr
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = init_logger_with(cli.effective_log_level(), cli.log_format.clone(), cli.debug)
    {
        eprintln!("beacon_intel error: {}", e);
        process::exit(EXIT_FAILURE);
    }

    let config = cli.client_config();
    let query = Query::from(cli.command);

    match run_query(&config, &query, cli.json, io::stdout().lock()).await {
        Ok(_) => process::exit(EXIT_SUCCESS),
        Err(e) => {
            if e.downcast_ref::<ApiError>().is_some_and(ApiError::is_unauthorized) {
                error!("Not authorized! Check your API key.");
            }
            error!("{:#}", e);
            process::exit(exit_code_for(&e));
        }
    }
}
