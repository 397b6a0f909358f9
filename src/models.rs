//! Distinguished string types.
//!
//! Each type wraps one string so that values from different fields cannot be
//! mixed up. They compare by content and serialize as bare JSON strings.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a value verbatim.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// The wrapped value.
            pub fn value(&self) -> &str {
                &self.0
            }

            /// Unwraps the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_type!(
    /// Opaque tracking identifier correlating beacons of one browser/session.
    CookieId
);
string_type!(
    /// ISO 3166 country code as reported by the API.
    CountryCode
);
string_type!(
    /// Time zone name, e.g. `Europe/Berlin`.
    Timezone
);
string_type!(
    /// Classification tag attached to a beacon.
    Tag
);
