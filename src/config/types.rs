//! Configuration types and CLI options.
//!
//! This module defines the enums and structs used for command-line argument
//! parsing, plus the library-facing [`ClientConfig`].

use std::net::IpAddr;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::client::extract_asn;
use crate::config::constants::{
    default_user_agent, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT,
};
use crate::models::{CookieId, CountryCode, Tag};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Beacons of one tracked cookie, as a summary table
/// beacon_intel cookie 3c2b9e7f
///
/// # Everything seen from an actor network, one JSON object per line
/// beacon_intel --json actor-asn "AS64500 Example Transit"
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "beacon_intel",
    version,
    about = "Looks up C2 beacon sightings correlated with tracking-cookie identities."
)]
pub struct Cli {
    /// Enable debug logging, including HTTP client internals
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print every record as one JSON object per line instead of a summary
    #[arg(long, global = true)]
    pub json: bool,

    /// API key sent in the X-Api-Key header
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP User-Agent header value
    #[arg(long, global = true, default_value_t = default_user_agent())]
    pub user_agent: String,

    /// Request timeout in seconds (default: 5)
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Query to run
    #[command(subcommand)]
    pub command: QueryCommand,
}

impl Cli {
    /// Effective log level: `--debug` wins over `--log-level`.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            self.log_level.clone().into()
        }
    }

    /// Library configuration for the query client.
    ///
    /// A missing API key becomes an empty string, which
    /// [`ClientConfig::validate`] rejects.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone().unwrap_or_default(),
            user_agent: self.user_agent.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout_seconds.map(Duration::from_secs),
        }
    }
}

/// One lookup dimension and its argument.
#[derive(Debug, Clone, Subcommand)]
pub enum QueryCommand {
    /// List C2 beacons of the specified cookie ID
    Cookie {
        /// Tracking cookie identifier
        cookie_id: CookieId,
    },
    /// List beacons towards a C2 IP address
    #[command(name = "c2-ip")]
    C2Ip {
        /// C2 IP address
        ip: IpAddr,
    },
    /// List beacons towards a C2 URL or identifier
    C2 {
        /// C2 URL or identifier
        c2: String,
    },
    /// List beacons towards C2s located in a city
    #[command(name = "c2-city")]
    C2City {
        /// City name
        city: String,
    },
    /// List beacons towards C2s located in a country
    #[command(name = "c2-country")]
    C2Country {
        /// ISO country code
        country_code: CountryCode,
    },
    /// List beacons towards C2s announced by an ASN
    #[command(name = "c2-asn")]
    C2Asn {
        /// ASN, or any text containing it (e.g. "AS64500 Example Transit")
        #[arg(value_parser = parse_asn)]
        asn: u32,
    },
    /// List beacons from an actor IP address
    #[command(name = "actor-ip")]
    ActorIp {
        /// Actor IP address
        ip: IpAddr,
    },
    /// List beacons from an actor hostname
    #[command(name = "actor-hostname")]
    ActorHostname {
        /// Actor hostname
        hostname: String,
    },
    /// List beacons from actors located in a city
    #[command(name = "actor-city")]
    ActorCity {
        /// City name
        city: String,
    },
    /// List beacons from actors located in a country
    #[command(name = "actor-country")]
    ActorCountry {
        /// ISO country code
        country_code: CountryCode,
    },
    /// List beacons from actors announced by an ASN
    #[command(name = "actor-asn")]
    ActorAsn {
        /// ASN, or any text containing it (e.g. "AS64500 Example Transit")
        #[arg(value_parser = parse_asn)]
        asn: u32,
    },
    /// List beacons sent with a user agent
    #[command(name = "user-agent")]
    UserAgent {
        /// Raw User-Agent string
        user_agent: String,
    },
    /// List beacons carrying a classification tag
    Tag {
        /// Tag name
        tag: Tag,
    },
}

/// Value parser for ASN arguments.
///
/// Rejects text without a 2-8 digit run so that no request is sent with a
/// malformed ASN.
fn parse_asn(s: &str) -> Result<u32, String> {
    extract_asn(s).ok_or_else(|| format!("no ASN (2-8 digit number) found in '{}'", s))
}

/// Query client configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use beacon_intel::ClientConfig;
///
/// let config = ClientConfig {
///     api_key: "secret".to_string(),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent in the `X-Api-Key` header
    pub api_key: String,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// API base URL, e.g. `https://api.example-intel.test/v1`
    pub base_url: String,

    /// Explicit request timeout. `None` means [`DEFAULT_REQUEST_TIMEOUT`].
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            user_agent: default_user_agent(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// A configuration field with an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ClientConfig {
    /// Timeout actually applied to requests.
    pub fn effective_timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Checks that the configuration can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field: an empty API key, a base URL that is
    /// not an absolute `http`/`https` URL, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "api_key",
                message: format!(
                    "no API key given; pass --api-key or set the {} environment variable",
                    API_KEY_ENV
                ),
            });
        }

        match url::Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigValidationError {
                    field: "base_url",
                    message: format!("unsupported scheme '{}', expected http or https", url.scheme()),
                })
            }
            Err(e) => {
                return Err(ConfigValidationError {
                    field: "base_url",
                    message: format!("'{}' is not a valid URL ({})", self.base_url, e),
                })
            }
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigValidationError {
                field: "timeout",
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        Ok(())
    }
}
