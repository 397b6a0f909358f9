//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON format)
//! - HTTP client (API key header, user agent, timeout)
//!
//! All initialization functions return [`InitializationError`](crate::error_handling::InitializationError)
//! on failure.

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
