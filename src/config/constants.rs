//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including API defaults, wire-format markers, and display limits.

use std::time::Duration;

/// Default API base URL. Overridable with `--base-url`.
pub const DEFAULT_BASE_URL: &str = "https://api.example-intel.test/v1";

/// Environment variable consulted when `--api-key` is not given.
///
/// The variable may also be set in a `.env` file in the working directory.
pub const API_KEY_ENV: &str = "BEACON_INTEL_API_KEY";

/// Request header carrying the API key (`X-Api-Key`, stored lowercase).
pub const API_KEY_HEADER: &str = "x-api-key";

/// Request timeout applied when the caller does not supply one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Path segment under the base URL shared by every lookup endpoint.
pub const C2_PATH_SEGMENT: &str = "c2";

// Wire-format markers
/// Sentinel the API sends in place of any optional scalar it has no value for.
pub const NOT_APPLICABLE: &str = "NA";
/// `message` of a 400 response that means "empty result set".
pub const NO_RESULTS_MESSAGE: &str = "ERROR: No Results";
/// `message` of a 401 response caused by a missing or wrong API key.
pub const UNAUTHORIZED_MESSAGE: &str = "ERROR: Unauthorized";

// Timestamp formats
/// Format of the `tstamp` field and of timestamps in JSON output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date-only format used in the summary table.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Summary output
/// Number of distinct user agents listed before the list is truncated.
pub const MAX_DISPLAYED_USER_AGENTS: usize = 5;
/// Width in characters of the tallest histogram bar.
pub const HISTOGRAM_WIDTH: usize = 80 - 10;
/// Placeholder for absent values in the summary table.
pub const ABSENT_PLACEHOLDER: &str = "-";

// Process exit codes
/// Query completed (empty results included).
pub const EXIT_SUCCESS: i32 = 0;
/// Transport, initialization or otherwise unclassified failure.
pub const EXIT_FAILURE: i32 = 1;
/// The API rejected the API key.
pub const EXIT_UNAUTHORIZED: i32 = 2;
/// The API answered with an error (generic, quota, privileged account).
pub const EXIT_API_ERROR: i32 = 3;
/// A response line could not be parsed.
pub const EXIT_PARSING_ERROR: i32 = 4;
/// Invalid command-line usage (sysexits `EX_USAGE`).
pub const EXIT_USAGE: i32 = 64;

/// Builds the default `User-Agent` header value.
///
/// Identifies the client, its version and the host platform, e.g.
/// `BeaconIntelClient/0.1.0 (reqwest) linux (x86_64)`.
pub fn default_user_agent() -> String {
    format!(
        "BeaconIntelClient/{} (reqwest) {} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
