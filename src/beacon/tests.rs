// Beacon module tests.

use super::*;
use chrono::Timelike;
use serde_json::json;

fn full_line() -> Value {
    json!({
        "tstamp": "2023-01-15 08:00:00",
        "actorasnorg": "Example Broadband AS64500",
        "actorcity": "Springfield",
        "actorcountrycode": "US",
        "actorhostname": "host-198-51-100-7.example.net",
        "actorip": "198.51.100.7",
        "actorloc": "39.7817,-89.6501",
        "actorregion": "Illinois",
        "actortimezone": "America/Chicago",
        "c2": "http://evil.example/gate.php",
        "c2asnorg": "Bulletproof Hosting AS64511",
        "c2city": "Amsterdam",
        "c2countrycode": "NL",
        "c2domain": "evil.example",
        "c2domainresolved": "203.0.113.9",
        "c2hostname": "evil.example",
        "c2loc": "52.3740,4.8897",
        "c2region": "North Holland",
        "c2timezone": "Europe/Amsterdam",
        "cookie_id": "abc123",
        "useragent": "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
        "tags": "malware"
    })
}

fn sparse_line() -> Value {
    json!({
        "tstamp": "2023-01-15 08:00:00",
        "actorasnorg": "NA",
        "actorcity": "NA",
        "actorcountrycode": "NA",
        "actorhostname": "NA",
        "actorip": "NA",
        "actorloc": "NA",
        "actorregion": "NA",
        "actortimezone": "NA",
        "c2": "evil.example",
        "c2asnorg": "NA",
        "c2city": "NA",
        "c2countrycode": "NA",
        "c2domain": "NA",
        "c2domainresolved": "NA",
        "c2hostname": "NA",
        "c2loc": "40.7128,-74.0060",
        "c2region": "NA",
        "c2timezone": "NA",
        "cookie_id": "abc123",
        "useragent": "NA",
        "tags": "malware"
    })
}

#[test]
fn test_sentinel_fields_become_none() {
    let record = BeaconRecord::from_response_line(&sparse_line()).unwrap();
    assert_eq!(record.actor_ip, None);
    assert_eq!(record.actor_location, None);
    assert_eq!(record.actor_country_code, None);
    assert_eq!(record.actor_timezone, None);
    assert_eq!(record.c2_domain_resolved, None);
    assert_eq!(record.user_agent, None);
    assert_eq!(record.c2.as_deref(), Some("evil.example"));
    assert_eq!(record.c2_location, Some(GeoLocation::new(407128, -740060)));
    assert_eq!(record.cookie_id.value(), "abc123");
    assert_eq!(record.tags, vec![Tag::new("malware")]);
    assert_eq!(record.timestamp.hour(), 8);
}

#[test]
fn test_full_line_maps_every_field() {
    let record = BeaconRecord::from_response_line(&full_line()).unwrap();
    assert_eq!(format_timestamp(&record.timestamp), "2023-01-15 08:00:00");
    assert_eq!(
        record.actor_asn_organization.as_deref(),
        Some("Example Broadband AS64500")
    );
    assert_eq!(record.actor_city.as_deref(), Some("Springfield"));
    assert_eq!(record.actor_country_code, Some(CountryCode::new("US")));
    assert_eq!(
        record.actor_hostname.as_deref(),
        Some("host-198-51-100-7.example.net")
    );
    assert_eq!(record.actor_ip.as_deref(), Some("198.51.100.7"));
    assert_eq!(record.actor_location, Some(GeoLocation::new(397817, -896501)));
    assert_eq!(record.actor_region.as_deref(), Some("Illinois"));
    assert_eq!(record.actor_timezone, Some(Timezone::new("America/Chicago")));
    assert_eq!(record.c2.as_deref(), Some("http://evil.example/gate.php"));
    assert_eq!(record.c2_asn_org.as_deref(), Some("Bulletproof Hosting AS64511"));
    assert_eq!(record.c2_city.as_deref(), Some("Amsterdam"));
    assert_eq!(record.c2_country_code, Some(CountryCode::new("NL")));
    assert_eq!(record.c2_domain.as_deref(), Some("evil.example"));
    assert_eq!(record.c2_domain_resolved.as_deref(), Some("203.0.113.9"));
    assert_eq!(record.c2_hostname.as_deref(), Some("evil.example"));
    assert_eq!(record.c2_location, Some(GeoLocation::new(523740, 48897)));
    assert_eq!(record.c2_region.as_deref(), Some("North Holland"));
    assert_eq!(record.c2_timezone, Some(Timezone::new("Europe/Amsterdam")));
    assert_eq!(record.cookie_id, CookieId::new("abc123"));
    assert_eq!(
        record.user_agent.as_deref(),
        Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64)")
    );
    assert_eq!(record.tags, vec![Tag::new("malware")]);
}

#[test]
fn test_sentinel_tags_give_empty_list() {
    let mut line = sparse_line();
    line["tags"] = json!("NA");
    let record = BeaconRecord::from_response_line(&line).unwrap();
    assert!(record.tags.is_empty());
}

#[test]
fn test_missing_optional_fields_are_none() {
    let line = json!({"tstamp": "2023-01-15 08:00:00", "cookie_id": "abc123"});
    let record = BeaconRecord::from_response_line(&line).unwrap();
    assert_eq!(record.c2, None);
    assert_eq!(record.c2_location, None);
    assert!(record.tags.is_empty());
}

#[test]
fn test_null_fields_are_none() {
    let mut line = full_line();
    line["actorip"] = Value::Null;
    line["c2loc"] = Value::Null;
    let record = BeaconRecord::from_response_line(&line).unwrap();
    assert_eq!(record.actor_ip, None);
    assert_eq!(record.c2_location, None);
}

#[test]
fn test_empty_string_is_kept() {
    let mut line = full_line();
    line["actorhostname"] = json!("");
    let record = BeaconRecord::from_response_line(&line).unwrap();
    assert_eq!(record.actor_hostname.as_deref(), Some(""));
}

#[test]
fn test_cookie_id_is_never_normalized() {
    let mut line = full_line();
    line["cookie_id"] = json!("NA");
    let record = BeaconRecord::from_response_line(&line).unwrap();
    assert_eq!(record.cookie_id.value(), "NA");
}

#[test]
fn test_missing_required_fields_fail() {
    let mut line = full_line();
    line.as_object_mut().unwrap().remove("cookie_id");
    assert!(matches!(
        BeaconRecord::from_response_line(&line),
        Err(ParsingError::MissingField("cookie_id"))
    ));

    let mut line = full_line();
    line.as_object_mut().unwrap().remove("tstamp");
    assert!(matches!(
        BeaconRecord::from_response_line(&line),
        Err(ParsingError::MissingField("tstamp"))
    ));
}

#[test]
fn test_malformed_timestamp_fails_line() {
    let mut line = full_line();
    line["tstamp"] = json!("2023-01-15T08:00:00Z");
    assert!(matches!(
        BeaconRecord::from_response_line(&line),
        Err(ParsingError::Timestamp { .. })
    ));
}

#[test]
fn test_malformed_location_fails_line() {
    let mut line = full_line();
    line["actorloc"] = json!("39.78,-89.65");
    assert!(matches!(
        BeaconRecord::from_response_line(&line),
        Err(ParsingError::GeoLocation(_))
    ));
}

#[test]
fn test_non_string_field_fails_line() {
    let mut line = full_line();
    line["actorip"] = json!(3325256711u32);
    assert!(matches!(
        BeaconRecord::from_response_line(&line),
        Err(ParsingError::InvalidLine(_))
    ));
}

#[test]
fn test_non_object_line_fails() {
    assert!(matches!(
        BeaconRecord::from_response_line(&json!("abc")),
        Err(ParsingError::NotAnObject(_))
    ));
}

#[test]
fn test_json_output_shape() {
    let record = BeaconRecord::from_response_line(&sparse_line()).unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["timestamp"], "2023-01-15 08:00:00");
    assert_eq!(json["actor_ip"], Value::Null);
    assert_eq!(json["c2"], "evil.example");
    assert_eq!(
        json["c2_location"],
        json!({"latitude": 407128, "longitude": -740060})
    );
    assert_eq!(json["cookie_id"], "abc123");
    assert_eq!(json["tags"], json!(["malware"]));
    assert_eq!(json.as_object().unwrap().len(), 22);
}

#[test]
fn test_display_is_compact() {
    let record = BeaconRecord::from_response_line(&sparse_line()).unwrap();
    assert_eq!(
        record.to_string(),
        "<BeaconRecord 2023-01-15 08:00:00 None evil.example abc123 None>"
    );
}

#[test]
fn test_parse_payload_array() {
    let body = r#"[{"tstamp": "2023-01-15 08:00:00", "cookie_id": "a"},
                   {"tstamp": "2023-01-15 09:00:00", "cookie_id": "b"}]"#;
    let lines = parse_payload(body).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["cookie_id"], "b");
}

#[test]
fn test_parse_payload_newline_delimited() {
    let body = "{\"tstamp\": \"2023-01-15 08:00:00\", \"cookie_id\": \"a\"}\n\
                {\"tstamp\": \"2023-01-15 09:00:00\", \"cookie_id\": \"b\"}\n";
    let lines = parse_payload(body).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["cookie_id"], "a");
}

#[test]
fn test_parse_payload_empty() {
    assert!(parse_payload("").unwrap().is_empty());
    assert!(parse_payload("  \n").unwrap().is_empty());
    assert!(parse_payload("[]").unwrap().is_empty());
}

#[test]
fn test_parse_payload_rejects_garbage() {
    assert!(matches!(
        parse_payload("{\"tstamp\": "),
        Err(ParsingError::Payload(_))
    ));
    assert!(matches!(
        parse_payload("[1, 2]"),
        Err(ParsingError::NotAnObject(_))
    ));
    assert!(matches!(
        parse_payload("\"NA\""),
        Err(ParsingError::NotAnObject(_))
    ));
}
