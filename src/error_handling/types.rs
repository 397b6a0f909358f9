//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::header::InvalidHeaderValue;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::{EXIT_API_ERROR, EXIT_FAILURE, EXIT_PARSING_ERROR, EXIT_UNAUTHORIZED};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// API key or user agent cannot be sent as a header value.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    /// Base URL cannot be parsed or cannot carry path segments.
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// A response that does not have the structure the client expects.
#[derive(Error, Debug)]
pub enum ParsingError {
    /// `tstamp` does not match `YYYY-MM-DD HH:MM:SS`.
    #[error("Invalid timestamp '{value}': {source}")]
    Timestamp {
        /// Raw field value
        value: String,
        /// Underlying chrono error
        #[source]
        source: chrono::ParseError,
    },

    /// A location field does not match the `lat,lon` grammar.
    #[error("Invalid GeoLocation: {0}")]
    GeoLocation(String),

    /// A required field is absent.
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// A result line has a field of the wrong JSON type.
    #[error("Malformed result line: {0}")]
    InvalidLine(#[source] serde_json::Error),

    /// The response body is neither a JSON array nor newline-delimited JSON.
    #[error("Malformed response payload: {0}")]
    Payload(#[source] serde_json::Error),

    /// A payload element is not a JSON object.
    #[error("Expected a JSON object per result line, got: {0}")]
    NotAnObject(String),
}

/// Failures of a single API query.
///
/// The `Display` text always names the request URL when one was involved.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API key was rejected.
    #[error("Unauthorized while requesting \"{url}\"")]
    Unauthorized {
        /// Request URL
        url: String,
    },

    /// The account exceeded its request quota.
    ///
    /// Not produced by the response classifier yet.
    #[error("RequestExceedQuota while requesting \"{url}\"")]
    QuotaExceeded {
        /// Request URL
        url: String,
    },

    /// The endpoint needs a privileged account.
    ///
    /// Not produced by the response classifier yet.
    #[error("PrivilegedAccountRequired while requesting \"{url}\"")]
    PrivilegedAccountRequired {
        /// Request URL
        url: String,
    },

    /// Any other error answer from the API.
    #[error("Generic API error (HTTP {status}): {body} while requesting \"{url}\"")]
    Generic {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
        /// Request URL
        url: String,
    },

    /// The response could not be turned into beacon records.
    #[error("{source} while requesting \"{url}\"")]
    Parsing {
        /// What failed to parse
        #[source]
        source: ParsingError,
        /// Request URL
        url: String,
    },

    /// Connection failure, timeout, or body read error.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] ReqwestError),
}

impl ApiError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::Unauthorized { .. } => EXIT_UNAUTHORIZED,
            ApiError::QuotaExceeded { .. }
            | ApiError::PrivilegedAccountRequired { .. }
            | ApiError::Generic { .. } => EXIT_API_ERROR,
            ApiError::Parsing { .. } => EXIT_PARSING_ERROR,
            ApiError::Transport(_) => EXIT_FAILURE,
        }
    }

    /// Request URL the failure belongs to, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { url }
            | ApiError::QuotaExceeded { url }
            | ApiError::PrivilegedAccountRequired { url }
            | ApiError::Generic { url, .. }
            | ApiError::Parsing { url, .. } => Some(url),
            ApiError::Transport(e) => e.url().map(|u| u.as_str()),
        }
    }

    /// Whether the user should be told to check their API key.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
