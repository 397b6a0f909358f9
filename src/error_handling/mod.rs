//! Error handling.
//!
//! This module provides:
//! - Error type definitions ([`ApiError`], [`ParsingError`], [`InitializationError`])
//! - Classification of API responses into payloads or typed failures
//! - The mapping from failures to process exit codes
//!
//! Failures are never retried: they propagate to the caller, are logged once
//! with their request URL, and end the run.

mod classify;
mod types;

// Re-export public API
pub use classify::{classify_response, ResponseOutcome};
pub use types::{ApiError, InitializationError, ParsingError};
