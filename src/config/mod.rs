//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (API defaults, wire markers, exit codes)
//! - CLI option types and parsing
//! - The library-facing client configuration

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, ClientConfig, ConfigValidationError, LogFormat, LogLevel, QueryCommand};
