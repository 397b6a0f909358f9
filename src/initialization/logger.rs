//! Logger initialization.
//!
//! This module provides the function to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it. HTTP client internals
/// (`reqwest`, `hyper`) are capped at `info` unless `debug_http` is set,
/// which is what `--debug` selects.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
/// * `debug_http` - Let `reqwest`/`hyper` log at `level` too
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if logger initialization fails.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging
/// RUST_LOG=debug beacon_intel cookie abc123
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=beacon_intel=debug,reqwest=info beacon_intel cookie abc123
/// ```
pub fn init_logger_with(
    level: LevelFilter,
    format: LogFormat,
    debug_http: bool,
) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    // CLI-provided level takes precedence over RUST_LOG
    builder.filter_level(level);
    let http_level = if debug_http {
        level
    } else {
        level.min(LevelFilter::Info)
    };
    builder.filter_module("reqwest", http_level);
    builder.filter_module("hyper", http_level);
    builder.filter_module("hyper_util", http_level);
    builder.filter_module("beacon_intel", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(buf, "[{}] {}", colored_level, record.args())
            });
        }
    }

    // try_init() so repeated initialization (tests) returns an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format_after_init_reports_error() {
        // env_logger can only be initialized once per process
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain, false);
        let result = init_logger_with(LevelFilter::Info, LogFormat::Json, false);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_second_init_reports_error() {
        let _ = init_logger_with(LevelFilter::Warn, LogFormat::Plain, false);
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Plain, true);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }
}
