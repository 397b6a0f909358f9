//! beacon_intel library: C2 beacon lookups correlated with tracking cookies
//!
//! This library queries a threat-intelligence lookup API for command-and-control
//! beacon sightings, by cookie identifier or by any other dimension of a beacon
//! (C2 address, actor network, user agent, tag...). Every answer is normalized
//! into typed [`BeaconRecord`] values: sentinel `"NA"` strings become absent
//! values, timestamps are parsed, and location strings become fixed-point
//! [`GeoLocation`] values.
//!
//! # Example
//!
//! ```no_run
//! use beacon_intel::{ClientConfig, CookieId, QueryClient, Summary};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig {
//!     api_key: "my-api-key".to_string(),
//!     ..Default::default()
//! };
//!
//! let client = QueryClient::new(&config)?;
//! let records = client.by_cookie_id(&CookieId::new("3c2b9e7f")).await?;
//! let summary = Summary::from_records(&records);
//! println!("{} beacons, last seen {:?}", summary.total_records, summary.last_active);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod beacon;
pub mod client;
pub mod config;
pub mod error_handling;
pub mod geo;
pub mod initialization;
pub mod models;
pub mod normalize;
pub mod output;
pub mod reduce;

// Re-export public API
pub use beacon::BeaconRecord;
pub use client::{extract_asn, Query, QueryClient, QueryKind};
pub use config::{Cli, ClientConfig, ConfigValidationError, LogFormat, LogLevel, QueryCommand};
pub use error_handling::{ApiError, InitializationError, ParsingError};
pub use geo::GeoLocation;
pub use models::{CookieId, CountryCode, Tag, Timezone};
pub use reduce::{Reducer, Summary};
pub use run::{exit_code_for, run_query, QueryReport};

// Internal run module (one query from configuration to rendered output)
mod run {
    use std::io::Write;

    use anyhow::Result;
    use log::{debug, info};

    use crate::client::{Query, QueryClient, QueryKind};
    use crate::config::{ClientConfig, ConfigValidationError, EXIT_FAILURE, EXIT_USAGE};
    use crate::error_handling::{ApiError, InitializationError};
    use crate::output::render;

    /// Outcome of a completed query.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct QueryReport {
        /// Lookup dimension that was queried
        pub kind: QueryKind,
        /// Number of records the API returned
        pub records: usize,
    }

    /// Runs one query and renders its result to `writer`.
    ///
    /// Validates `config`, builds a [`QueryClient`], executes `query`, then
    /// writes either JSON lines (`json == true`) or the reduced summary.
    ///
    /// # Errors
    ///
    /// The returned error wraps one of [`ConfigValidationError`],
    /// [`InitializationError`] or [`ApiError`]; [`exit_code_for`] maps it to a
    /// process exit code.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use beacon_intel::{run_query, ClientConfig, Query, Tag};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ClientConfig {
    ///     api_key: "my-api-key".to_string(),
    ///     ..Default::default()
    /// };
    /// let query = Query::Tag(Tag::new("apt-demo"));
    /// let report = run_query(&config, &query, true, std::io::stdout()).await?;
    /// eprintln!("{} records", report.records);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_query<W: Write>(
        config: &ClientConfig,
        query: &Query,
        json: bool,
        writer: W,
    ) -> Result<QueryReport> {
        config.validate()?;
        let client = QueryClient::new(config)?;

        let kind = query.kind();
        info!("Querying {} for '{}'", kind, query.argument());
        let records = client.execute(query).await?;
        if records.is_empty() {
            info!("No results for '{}'", query.argument());
        }

        render(writer, &records, json)?;
        debug!("Rendered {} records", records.len());

        Ok(QueryReport {
            kind,
            records: records.len(),
        })
    }

    /// Process exit code for an error returned by [`run_query`].
    pub fn exit_code_for(error: &anyhow::Error) -> i32 {
        if let Some(api_error) = error.downcast_ref::<ApiError>() {
            return api_error.exit_code();
        }
        if error.downcast_ref::<ConfigValidationError>().is_some() {
            return EXIT_USAGE;
        }
        match error.downcast_ref::<InitializationError>() {
            Some(InitializationError::InvalidBaseUrl(_)) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

}
