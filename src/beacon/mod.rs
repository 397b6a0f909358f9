//! Beacon records.
//!
//! This module turns the result rows of the lookup API into [`BeaconRecord`]s:
//! - [`parse_payload`] splits a response body into JSON objects
//! - [`BeaconRecord::from_response_line`] normalizes one object into a record
//!
//! Any row that fails to convert fails the whole response; rows are never
//! skipped.

mod timestamp;

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error_handling::ParsingError;
use crate::geo::GeoLocation;
use crate::models::{CookieId, CountryCode, Tag, Timezone};
use crate::normalize::normalize;

pub use timestamp::{format_date, format_timestamp, parse_timestamp};

/// One result row as sent by the API, before normalization.
///
/// Missing keys and `null` both deserialize to `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBeaconLine {
    tstamp: Option<String>,
    actorasnorg: Option<String>,
    actorcity: Option<String>,
    actorcountrycode: Option<String>,
    actorhostname: Option<String>,
    actorip: Option<String>,
    actorloc: Option<String>,
    actorregion: Option<String>,
    actortimezone: Option<String>,
    c2: Option<String>,
    c2asnorg: Option<String>,
    c2city: Option<String>,
    c2countrycode: Option<String>,
    c2domain: Option<String>,
    c2domainresolved: Option<String>,
    c2hostname: Option<String>,
    c2loc: Option<String>,
    c2region: Option<String>,
    c2timezone: Option<String>,
    cookie_id: Option<String>,
    useragent: Option<String>,
    tags: Option<String>,
}

/// One observed beacon between an infected actor host and a C2 endpoint.
///
/// Serializes to the flat JSON object used by `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeaconRecord {
    /// When the beacon was observed (source time, no zone conversion)
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    /// Actor network operator
    pub actor_asn_organization: Option<String>,
    /// Actor city
    pub actor_city: Option<String>,
    /// Actor country
    pub actor_country_code: Option<CountryCode>,
    /// Actor reverse hostname
    pub actor_hostname: Option<String>,
    /// Actor IP address
    pub actor_ip: Option<String>,
    /// Actor coordinates
    pub actor_location: Option<GeoLocation>,
    /// Actor region
    pub actor_region: Option<String>,
    /// Actor time zone
    pub actor_timezone: Option<Timezone>,
    /// C2 URL or identifier
    pub c2: Option<String>,
    /// C2 network operator
    pub c2_asn_org: Option<String>,
    /// C2 city
    pub c2_city: Option<String>,
    /// C2 country
    pub c2_country_code: Option<CountryCode>,
    /// C2 domain
    pub c2_domain: Option<String>,
    /// Address the C2 domain resolved to
    pub c2_domain_resolved: Option<String>,
    /// C2 hostname
    pub c2_hostname: Option<String>,
    /// C2 coordinates
    pub c2_location: Option<GeoLocation>,
    /// C2 region
    pub c2_region: Option<String>,
    /// C2 time zone
    pub c2_timezone: Option<Timezone>,
    /// Tracking cookie the beacon was correlated with
    pub cookie_id: CookieId,
    /// Raw User-Agent of the actor
    pub user_agent: Option<String>,
    /// Zero or one classification tag
    pub tags: Vec<Tag>,
}

fn parse_location(raw: Option<String>) -> Result<Option<GeoLocation>, ParsingError> {
    normalize(raw).map(|s| s.parse()).transpose()
}

impl TryFrom<RawBeaconLine> for BeaconRecord {
    type Error = ParsingError;

    fn try_from(raw: RawBeaconLine) -> Result<Self, Self::Error> {
        let tstamp = raw.tstamp.ok_or(ParsingError::MissingField("tstamp"))?;
        let cookie_id = raw.cookie_id.ok_or(ParsingError::MissingField("cookie_id"))?;

        Ok(BeaconRecord {
            timestamp: parse_timestamp(&tstamp)?,
            actor_asn_organization: normalize(raw.actorasnorg),
            actor_city: normalize(raw.actorcity),
            actor_country_code: normalize(raw.actorcountrycode).map(CountryCode::from),
            actor_hostname: normalize(raw.actorhostname),
            actor_ip: normalize(raw.actorip),
            actor_location: parse_location(raw.actorloc)?,
            actor_region: normalize(raw.actorregion),
            actor_timezone: normalize(raw.actortimezone).map(Timezone::from),
            c2: normalize(raw.c2),
            c2_asn_org: normalize(raw.c2asnorg),
            c2_city: normalize(raw.c2city),
            c2_country_code: normalize(raw.c2countrycode).map(CountryCode::from),
            c2_domain: normalize(raw.c2domain),
            c2_domain_resolved: normalize(raw.c2domainresolved),
            c2_hostname: normalize(raw.c2hostname),
            c2_location: parse_location(raw.c2loc)?,
            c2_region: normalize(raw.c2region),
            c2_timezone: normalize(raw.c2timezone).map(Timezone::from),
            cookie_id: CookieId::from(cookie_id),
            user_agent: normalize(raw.useragent),
            tags: normalize(raw.tags).map(Tag::from).into_iter().collect(),
        })
    }
}

impl BeaconRecord {
    /// Builds a record from one decoded API result row.
    ///
    /// # Errors
    ///
    /// Returns a [`ParsingError`] if the row is not an object, a field has a
    /// non-string value, `tstamp` or `cookie_id` is missing, the timestamp is
    /// malformed, or a present location does not parse.
    pub fn from_response_line(line: &Value) -> Result<Self, ParsingError> {
        if !line.is_object() {
            return Err(ParsingError::NotAnObject(line.to_string()));
        }
        let raw = RawBeaconLine::deserialize(line).map_err(ParsingError::InvalidLine)?;
        Self::try_from(raw)
    }
}

impl fmt::Display for BeaconRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<BeaconRecord {} {} {} {} {}>",
            format_timestamp(&self.timestamp),
            self.actor_ip.as_deref().unwrap_or("None"),
            self.c2.as_deref().unwrap_or("None"),
            self.cookie_id,
            self.user_agent.as_deref().unwrap_or("None"),
        )
    }
}

/// Splits a 200 response body into result rows.
///
/// Accepts a JSON array of objects, newline-delimited JSON objects, or a mix
/// of both. Whitespace-only bodies yield no rows.
///
/// # Errors
///
/// Returns [`ParsingError::Payload`] for malformed JSON and
/// [`ParsingError::NotAnObject`] for elements that are not objects.
pub fn parse_payload(body: &str) -> Result<Vec<Value>, ParsingError> {
    let mut lines = Vec::new();
    for value in serde_json::Deserializer::from_str(body).into_iter::<Value>() {
        match value.map_err(ParsingError::Payload)? {
            Value::Array(items) => {
                for item in items {
                    if !item.is_object() {
                        return Err(ParsingError::NotAnObject(item.to_string()));
                    }
                    lines.push(item);
                }
            }
            obj @ Value::Object(_) => lines.push(obj),
            other => return Err(ParsingError::NotAnObject(other.to_string())),
        }
    }
    Ok(lines)
}
