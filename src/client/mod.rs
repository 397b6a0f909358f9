//! Lookup API client.
//!
//! [`QueryClient`] issues exactly one `GET {base_url}/c2/{endpoint}/{argument}`
//! per query, classifies the response, and converts every result row into a
//! [`BeaconRecord`]. Records are returned in the order the API sent them.
//!
//! There is no retry: a timeout is reported like any other transport error.

mod asn;
mod query;

use std::net::IpAddr;
use std::time::Duration;

use log::debug;
use url::Url;

use crate::beacon::{parse_payload, BeaconRecord};
use crate::config::{ClientConfig, C2_PATH_SEGMENT};
use crate::error_handling::{
    classify_response, ApiError, InitializationError, ParsingError, ResponseOutcome,
};
use crate::initialization::init_client;
use crate::models::{CookieId, CountryCode, Tag};

pub use asn::extract_asn;
pub use query::{Query, QueryKind};

/// Client for the beacon lookup API.
///
/// Safe to reuse for sequential queries.
#[derive(Debug, Clone)]
pub struct QueryClient {
    base_url: Url,
    http: reqwest::Client,
    timeout: Duration,
}

impl QueryClient {
    /// Creates a client from `config`.
    ///
    /// The API key and user agent are sent on every request. The request
    /// timeout is `config.timeout`, or 5 seconds if none was given.
    ///
    /// # Errors
    ///
    /// Returns an [`InitializationError`] if the base URL cannot carry a
    /// path, a header value is invalid, or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, InitializationError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| InitializationError::InvalidBaseUrl(config.base_url.clone()))?;
        let timeout = config.effective_timeout();
        let http = init_client(config)?;

        debug!("Using User-Agent string: {}", config.user_agent);
        debug!("Request timeout: {:?}", timeout);

        Ok(Self {
            base_url,
            http,
            timeout,
        })
    }

    /// Base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Timeout applied to every request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the request URL for `kind` with a percent-encoded argument.
    pub fn endpoint_url(&self, kind: QueryKind, argument: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can always carry path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(C2_PATH_SEGMENT)
                .push(kind.endpoint())
                .push(argument);
        }
        url
    }

    /// Runs any query.
    pub async fn execute(&self, query: &Query) -> Result<Vec<BeaconRecord>, ApiError> {
        match query {
            Query::CookieId(id) => self.by_cookie_id(id).await,
            Query::C2Ip(ip) => self.by_c2_ip(*ip).await,
            Query::C2(c2) => self.by_c2(c2).await,
            Query::C2City(city) => self.by_c2_city(city).await,
            Query::C2Country(cc) => self.by_c2_country(cc).await,
            Query::C2Asn(asn) => self.by_c2_asn(*asn).await,
            Query::ActorIp(ip) => self.by_actor_ip(*ip).await,
            Query::ActorHostname(hostname) => self.by_actor_hostname(hostname).await,
            Query::ActorCity(city) => self.by_actor_city(city).await,
            Query::ActorCountry(cc) => self.by_actor_country(cc).await,
            Query::ActorAsn(asn) => self.by_actor_asn(*asn).await,
            Query::UserAgent(ua) => self.by_user_agent(ua).await,
            Query::Tag(tag) => self.by_tag(tag).await,
        }
    }

    /// Beacons correlated with a tracking cookie.
    pub async fn by_cookie_id(&self, cookie_id: &CookieId) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::CookieId, cookie_id.value()).await
    }

    /// Beacons towards a C2 IP address.
    pub async fn by_c2_ip(&self, ip: IpAddr) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::C2Ip, &ip.to_string()).await
    }

    /// Beacons towards a C2 URL or identifier.
    pub async fn by_c2(&self, c2: &str) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::C2, c2).await
    }

    /// Beacons towards C2s in a city.
    pub async fn by_c2_city(&self, city: &str) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::C2City, city).await
    }

    /// Beacons towards C2s in a country.
    pub async fn by_c2_country(
        &self,
        country_code: &CountryCode,
    ) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::C2Country, country_code.value()).await
    }

    /// Beacons towards C2s announced by an ASN.
    ///
    /// Use [`extract_asn`] to get the number out of an organization string.
    pub async fn by_c2_asn(&self, asn: u32) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::C2Asn, &asn.to_string()).await
    }

    /// Beacons from an actor IP address.
    pub async fn by_actor_ip(&self, ip: IpAddr) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::ActorIp, &ip.to_string()).await
    }

    /// Beacons from an actor hostname.
    pub async fn by_actor_hostname(&self, hostname: &str) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::ActorHostname, hostname).await
    }

    /// Beacons from actors in a city.
    pub async fn by_actor_city(&self, city: &str) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::ActorCity, city).await
    }

    /// Beacons from actors in a country.
    pub async fn by_actor_country(
        &self,
        country_code: &CountryCode,
    ) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::ActorCountry, country_code.value()).await
    }

    /// Beacons from actors announced by an ASN.
    pub async fn by_actor_asn(&self, asn: u32) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::ActorAsn, &asn.to_string()).await
    }

    /// Beacons sent with a raw User-Agent string.
    pub async fn by_user_agent(&self, user_agent: &str) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::UserAgent, user_agent).await
    }

    /// Beacons carrying a classification tag.
    pub async fn by_tag(&self, tag: &Tag) -> Result<Vec<BeaconRecord>, ApiError> {
        self.fetch(QueryKind::Tag, tag.value()).await
    }

    /// Sends one GET and converts the response.
    async fn fetch(&self, kind: QueryKind, argument: &str) -> Result<Vec<BeaconRecord>, ApiError> {
        let url = self.endpoint_url(kind, argument);
        debug!("GET {}", url);

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} answered {} ({} bytes)", url, status, body.len());

        let payload = match classify_response(status, &body, url.as_str())? {
            ResponseOutcome::NoResults => return Ok(Vec::new()),
            ResponseOutcome::Payload(payload) => payload,
        };

        let records = parse_records(payload).map_err(|source| ApiError::Parsing {
            source,
            url: url.to_string(),
        })?;
        debug!("Received {} records from {}", records.len(), url);
        Ok(records)
    }
}

/// Converts a whole payload; the first bad row fails all of it.
fn parse_records(payload: &str) -> Result<Vec<BeaconRecord>, ParsingError> {
    parse_payload(payload)?
        .iter()
        .map(BeaconRecord::from_response_line)
        .collect()
}
