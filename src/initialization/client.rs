//! HTTP client initialization.
//!
//! This module provides the function that builds the HTTP client used for
//! API requests.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::ClientBuilder;

use crate::config::{ClientConfig, API_KEY_HEADER};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client for API requests.
///
/// Creates a `reqwest::Client` configured with:
/// - `X-Api-Key` header from the config (marked sensitive)
/// - User-Agent header from the config
/// - Request timeout from the config, 5 seconds if none was given
///
/// # Arguments
///
/// * `config` - Client configuration containing API key, user-agent and timeout
///
/// # Errors
///
/// Returns `InitializationError::InvalidHeader` if the API key is not a valid
/// header value, or `InitializationError::HttpClientError` if client creation
/// fails.
pub fn init_client(config: &ClientConfig) -> Result<reqwest::Client, InitializationError> {
    let mut api_key = HeaderValue::from_str(&config.api_key)?;
    api_key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, api_key);

    let client = ClientBuilder::new()
        .default_headers(headers)
        .timeout(config.effective_timeout())
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
