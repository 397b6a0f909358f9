//! Response classification.
//!
//! Maps the HTTP status and body of one API response to either a payload or
//! one of the [`ApiError`] kinds.

use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::{NO_RESULTS_MESSAGE, UNAUTHORIZED_MESSAGE};
use crate::error_handling::ApiError;

/// A response that is not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum ResponseOutcome<'a> {
    /// The API reported an empty result set (400 + "No Results").
    NoResults,
    /// Body of a 200 response, unmodified.
    Payload(&'a str),
}

/// Error body shape: `{"message": "ERROR: ..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extracts the `message` field of an error body, if the body is JSON.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

fn generic(status: StatusCode, body: &str, url: &str) -> ApiError {
    ApiError::Generic {
        status: status.as_u16(),
        body: body.to_string(),
        url: url.to_string(),
    }
}

/// Classifies one API response.
///
/// | Status | Body `message` | Result |
/// |---|---|---|
/// | 400 | `ERROR: No Results` | `NoResults` |
/// | 400 | other | `ApiError::Generic` |
/// | 401 | `ERROR: Unauthorized` | `ApiError::Unauthorized` |
/// | 401 | other | `ApiError::Generic` |
/// | 200 | - | `Payload(body)` |
/// | other | - | `ApiError::Generic` |
///
/// # Errors
///
/// Returns the classified [`ApiError`] for every non-success outcome.
pub fn classify_response<'a>(
    status: StatusCode,
    body: &'a str,
    url: &str,
) -> Result<ResponseOutcome<'a>, ApiError> {
    match status {
        StatusCode::OK => Ok(ResponseOutcome::Payload(body)),
        StatusCode::BAD_REQUEST => {
            if error_message(body).as_deref() == Some(NO_RESULTS_MESSAGE) {
                debug!("No results for {}", url);
                Ok(ResponseOutcome::NoResults)
            } else {
                Err(generic(status, body, url))
            }
        }
        StatusCode::UNAUTHORIZED => {
            if error_message(body).as_deref() == Some(UNAUTHORIZED_MESSAGE) {
                Err(ApiError::Unauthorized {
                    url: url.to_string(),
                })
            } else {
                Err(generic(status, body, url))
            }
        }
        _ => Err(generic(status, body, url)),
    }
}
