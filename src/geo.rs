//! Compact geolocation codec.
//!
//! The API reports locations as `"lat,lon"` strings with four fractional
//! digits. [`GeoLocation`] keeps both coordinates as integers scaled by
//! 10,000 so no floating-point drift is introduced between parsing and
//! output.
//!
//! Parsing strips the decimal point and reads the remaining digits as one
//! integer, so `"52.5200"` is `525200`. A coordinate without a fractional
//! part is taken as already scaled: `"52"` is `52`, which formats as
//! `"0.0052"`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error_handling::ParsingError;

/// Coordinate scale: four decimal digits.
pub const GEO_SCALE: i32 = 10_000;

/// `lat,lon`, each an optionally signed integer with either no fractional
/// part or exactly four fractional digits.
const GEO_LOCATION_PATTERN: &str = r"^(-?\d+(?:\.\d{4})?),\s*(-?\d+(?:\.\d{4})?)$";

static GEO_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(GEO_LOCATION_PATTERN).expect("GEO_LOCATION_PATTERN is a valid regex")
});

/// A latitude/longitude pair in fixed-point form.
///
/// Serializes as `{"latitude": <i32>, "longitude": <i32>}` with the raw
/// scaled integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GeoLocation {
    /// Latitude in 1/10,000 degrees
    pub latitude: i32,
    /// Longitude in 1/10,000 degrees
    pub longitude: i32,
}

impl GeoLocation {
    /// Builds a location from already scaled coordinates.
    pub fn new(latitude: i32, longitude: i32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Parses one coordinate already validated by [`GEO_LOCATION_RE`].
///
/// `"12.3456"` becomes `123456`; `"12"` stays `12`.
fn parse_coordinate(raw: &str) -> Option<i32> {
    raw.replace('.', "").parse().ok()
}

fn format_coordinate(value: i32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let scale = GEO_SCALE.unsigned_abs();
    write!(f, "{}{}.{:04}", sign, abs / scale, abs % scale)
}

impl FromStr for GeoLocation {
    type Err = ParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsingError::GeoLocation(s.to_string());
        let caps = GEO_LOCATION_RE.captures(s).ok_or_else(invalid)?;
        let latitude = parse_coordinate(&caps[1]).ok_or_else(invalid)?;
        let longitude = parse_coordinate(&caps[2]).ok_or_else(invalid)?;
        Ok(Self::new(latitude, longitude))
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_coordinate(self.latitude, f)?;
        f.write_str(",")?;
        format_coordinate(self.longitude, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_four_digit_coordinates() {
        let loc: GeoLocation = "40.7128,-74.0060".parse().unwrap();
        assert_eq!(loc, GeoLocation::new(407128, -740060));

        let loc: GeoLocation = "12.3456,0.0001".parse().unwrap();
        assert_eq!(loc.latitude, 123456);
        assert_eq!(loc.longitude, 1);
    }

    #[test]
    fn test_parse_allows_whitespace_after_comma() {
        let loc: GeoLocation = "52.5200, 13.4050".parse().unwrap();
        assert_eq!(loc, GeoLocation::new(525200, 134050));
        let loc: GeoLocation = "52.5200,\t13.4050".parse().unwrap();
        assert_eq!(loc, GeoLocation::new(525200, 134050));
    }

    #[test]
    fn test_parse_integer_coordinates_are_taken_as_scaled() {
        let loc: GeoLocation = "52,-13".parse().unwrap();
        assert_eq!(loc, GeoLocation::new(52, -13));
        assert_ne!(loc, "52.0000,-13.0000".parse().unwrap());
    }

    #[test]
    fn test_parse_negative_fraction_below_one() {
        let loc: GeoLocation = "-0.5000,-0.0001".parse().unwrap();
        assert_eq!(loc, GeoLocation::new(-5000, -1));
        assert_eq!(loc.to_string(), "-0.5000,-0.0001");
    }

    #[test]
    fn test_parse_rejects_wrong_digit_count() {
        for s in ["40.712,-74.0060", "40.71280,-74.0060", "40.7128,-74.006", "40.,-74.0060"] {
            assert!(
                matches!(s.parse::<GeoLocation>(), Err(ParsingError::GeoLocation(ref v)) if v == s),
                "{} should be rejected",
                s
            );
        }
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for s in [
            "",
            "40.7128",
            "40.7128;-74.0060",
            "40.7128 -74.0060",
            " 40.7128,-74.0060",
            "40.7128 ,-74.0060",
            "40.7128,-74.0060 ",
            "north,east",
            "+40.7128,-74.0060",
            "NA",
        ] {
            assert!(s.parse::<GeoLocation>().is_err(), "{:?} should be rejected", s);
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!("99999999999.0000,1.0000".parse::<GeoLocation>().is_err());
        assert!("99999999999,1".parse::<GeoLocation>().is_err());
        assert!("1.0000,-2147483649".parse::<GeoLocation>().is_err());
    }

    #[test]
    fn test_display_uses_four_decimals() {
        assert_eq!(GeoLocation::new(525000, 134050).to_string(), "52.5000,13.4050");
        assert_eq!(GeoLocation::new(407128, -740060).to_string(), "40.7128,-74.0060");
        assert_eq!(GeoLocation::new(0, 0).to_string(), "0.0000,0.0000");
    }

    #[test]
    fn test_parse_then_display_normalizes_precision() {
        let loc: GeoLocation = "52,-13".parse().unwrap();
        assert_eq!(loc.to_string(), "0.0052,-0.0013");
        let loc: GeoLocation = "52.5000, 13.4050".parse().unwrap();
        assert_eq!(loc.to_string(), "52.5000,13.4050");
    }

    proptest! {
        #[test]
        fn test_four_digit_coordinates_parse_exactly(
            lat in "-?[0-9]{1,3}\\.[0-9]{4}",
            lon in "-?[0-9]{1,3}\\.[0-9]{4}",
            spaced in any::<bool>(),
        ) {
            let sep = if spaced { ", " } else { "," };
            let loc: GeoLocation = format!("{}{}{}", lat, sep, lon).parse().unwrap();
            prop_assert_eq!(loc.latitude, lat.replace('.', "").parse::<i32>().unwrap());
            prop_assert_eq!(loc.longitude, lon.replace('.', "").parse::<i32>().unwrap());
            prop_assert_eq!(loc.to_string().parse::<GeoLocation>().unwrap(), loc);
        }

        #[test]
        fn test_canonical_text_round_trips(
            lat in "-?[1-9][0-9]{0,2}\\.[0-9]{4}",
            lon in "-?[1-9][0-9]{0,2}\\.[0-9]{4}",
        ) {
            let text = format!("{},{}", lat, lon);
            prop_assert_eq!(text.parse::<GeoLocation>().unwrap().to_string(), text);
        }

        #[test]
        fn test_wrong_fraction_width_is_rejected(
            lat in "-?[0-9]{1,3}\\.([0-9]{1,3}|[0-9]{5,8})",
            lon in "-?[0-9]{1,3}\\.[0-9]{4}",
            swap in any::<bool>(),
        ) {
            let text = if swap {
                format!("{},{}", lon, lat)
            } else {
                format!("{},{}", lat, lon)
            };
            let rejected = matches!(
                text.parse::<GeoLocation>(),
                Err(ParsingError::GeoLocation(ref v)) if *v == text
            );
            prop_assert!(rejected, "{} should be rejected", text);
        }
    }

    #[test]
    fn test_serializes_raw_integers() {
        let json = serde_json::to_value(GeoLocation::new(407128, -740060)).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 407128, "longitude": -740060}));
    }
}
