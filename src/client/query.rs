//! Query dimensions.

use std::fmt;
use std::net::IpAddr;

use strum_macros::{EnumIter, IntoStaticStr};

use crate::config::QueryCommand;
use crate::models::{CookieId, CountryCode, Tag};

/// Endpoint selector, one per lookup dimension.
///
/// The string form is the endpoint path segment under `/c2/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum QueryKind {
    /// Beacons of one tracking cookie
    #[strum(serialize = "cookie_id")]
    CookieId,
    /// Beacons towards a C2 IP
    #[strum(serialize = "c2ip")]
    C2Ip,
    /// Beacons towards a C2 URL/identifier
    #[strum(serialize = "c2")]
    C2,
    /// Beacons towards C2s in a city
    #[strum(serialize = "c2city")]
    C2City,
    /// Beacons towards C2s in a country
    #[strum(serialize = "c2countrycode")]
    C2Country,
    /// Beacons towards C2s in an ASN
    #[strum(serialize = "c2asn")]
    C2Asn,
    /// Beacons from an actor IP
    #[strum(serialize = "actorip")]
    ActorIp,
    /// Beacons from an actor hostname
    #[strum(serialize = "actorhostname")]
    ActorHostname,
    /// Beacons from actors in a city
    #[strum(serialize = "actorcity")]
    ActorCity,
    /// Beacons from actors in a country
    #[strum(serialize = "actorcountrycode")]
    ActorCountry,
    /// Beacons from actors in an ASN
    #[strum(serialize = "actorasn")]
    ActorAsn,
    /// Beacons sent with a User-Agent
    #[strum(serialize = "useragent")]
    UserAgent,
    /// Beacons carrying a tag
    #[strum(serialize = "tags")]
    Tag,
}

impl QueryKind {
    /// Endpoint path segment, e.g. `cookie_id`.
    pub fn endpoint(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// A lookup with its single typed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// By tracking cookie
    CookieId(CookieId),
    /// By C2 IP address
    C2Ip(IpAddr),
    /// By C2 URL or identifier
    C2(String),
    /// By C2 city
    C2City(String),
    /// By C2 country
    C2Country(CountryCode),
    /// By C2 ASN
    C2Asn(u32),
    /// By actor IP address
    ActorIp(IpAddr),
    /// By actor hostname
    ActorHostname(String),
    /// By actor city
    ActorCity(String),
    /// By actor country
    ActorCountry(CountryCode),
    /// By actor ASN
    ActorAsn(u32),
    /// By raw User-Agent
    UserAgent(String),
    /// By classification tag
    Tag(Tag),
}

impl Query {
    /// Which endpoint the query is sent to.
    pub fn kind(&self) -> QueryKind {
        match self {
            Query::CookieId(_) => QueryKind::CookieId,
            Query::C2Ip(_) => QueryKind::C2Ip,
            Query::C2(_) => QueryKind::C2,
            Query::C2City(_) => QueryKind::C2City,
            Query::C2Country(_) => QueryKind::C2Country,
            Query::C2Asn(_) => QueryKind::C2Asn,
            Query::ActorIp(_) => QueryKind::ActorIp,
            Query::ActorHostname(_) => QueryKind::ActorHostname,
            Query::ActorCity(_) => QueryKind::ActorCity,
            Query::ActorCountry(_) => QueryKind::ActorCountry,
            Query::ActorAsn(_) => QueryKind::ActorAsn,
            Query::UserAgent(_) => QueryKind::UserAgent,
            Query::Tag(_) => QueryKind::Tag,
        }
    }

    /// The argument as sent in the URL path, before percent-encoding.
    pub fn argument(&self) -> String {
        match self {
            Query::CookieId(id) => id.to_string(),
            Query::C2Ip(ip) | Query::ActorIp(ip) => ip.to_string(),
            Query::C2Country(cc) | Query::ActorCountry(cc) => cc.to_string(),
            Query::C2Asn(asn) | Query::ActorAsn(asn) => asn.to_string(),
            Query::Tag(tag) => tag.to_string(),
            Query::C2(s)
            | Query::C2City(s)
            | Query::ActorHostname(s)
            | Query::ActorCity(s)
            | Query::UserAgent(s) => s.clone(),
        }
    }
}

impl From<QueryCommand> for Query {
    fn from(command: QueryCommand) -> Self {
        match command {
            QueryCommand::Cookie { cookie_id } => Query::CookieId(cookie_id),
            QueryCommand::C2Ip { ip } => Query::C2Ip(ip),
            QueryCommand::C2 { c2 } => Query::C2(c2),
            QueryCommand::C2City { city } => Query::C2City(city),
            QueryCommand::C2Country { country_code } => Query::C2Country(country_code),
            QueryCommand::C2Asn { asn } => Query::C2Asn(asn),
            QueryCommand::ActorIp { ip } => Query::ActorIp(ip),
            QueryCommand::ActorHostname { hostname } => Query::ActorHostname(hostname),
            QueryCommand::ActorCity { city } => Query::ActorCity(city),
            QueryCommand::ActorCountry { country_code } => Query::ActorCountry(country_code),
            QueryCommand::ActorAsn { asn } => Query::ActorAsn(asn),
            QueryCommand::UserAgent { user_agent } => Query::UserAgent(user_agent),
            QueryCommand::Tag { tag } => Query::Tag(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_endpoints_are_distinct() {
        let endpoints: HashSet<_> = QueryKind::iter().map(QueryKind::endpoint).collect();
        assert_eq!(endpoints.len(), QueryKind::iter().count());
        assert_eq!(endpoints.len(), 13);
    }

    #[test]
    fn test_endpoint_names() {
        assert_eq!(QueryKind::CookieId.endpoint(), "cookie_id");
        assert_eq!(QueryKind::C2Country.endpoint(), "c2countrycode");
        assert_eq!(QueryKind::UserAgent.to_string(), "useragent");
        assert_eq!(QueryKind::Tag.endpoint(), "tags");
    }

    #[test]
    fn test_argument_rendering() {
        assert_eq!(Query::C2Asn(64500).argument(), "64500");
        assert_eq!(
            Query::ActorIp("2001:db8::1".parse().unwrap()).argument(),
            "2001:db8::1"
        );
        assert_eq!(Query::Tag(Tag::new("malware")).argument(), "malware");
        assert_eq!(Query::C2("http://evil.example/a b".into()).argument(), "http://evil.example/a b");
    }

    #[test]
    fn test_from_command() {
        let query = Query::from(QueryCommand::ActorAsn { asn: 64500 });
        assert_eq!(query, Query::ActorAsn(64500));
        assert_eq!(query.kind(), QueryKind::ActorAsn);

        let query = Query::from(QueryCommand::Cookie {
            cookie_id: CookieId::new("abc123"),
        });
        assert_eq!(query.kind(), QueryKind::CookieId);
    }
}
