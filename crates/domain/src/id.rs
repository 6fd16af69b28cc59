//! Typed identifiers for monitoring objects.
//!
//! Zabbix identifiers are decimal numbers carried as JSON strings. Wrapping
//! them keeps host ids from being mixed up with trigger or group ids and
//! rejects anything that is not a plain number before it reaches the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $kind:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// How the id is named in error messages.
            pub const KIND: &'static str = $kind;

            /// Validate and wrap a numeric identifier.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyId`] for an empty string and
            /// [`ValidationError::InvalidId`] when any character is not an
            /// ASCII digit.
            pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
                let raw = raw.into();
                if raw.is_empty() {
                    return Err(ValidationError::EmptyId(Self::KIND));
                }
                if !raw.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ValidationError::InvalidId {
                        kind: Self::KIND,
                        value: raw,
                    });
                }
                Ok(Self(raw))
            }

            /// Borrow the identifier as it appears on the wire.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_id!(
    /// Identifier of a monitored [`Device`](crate::device::Device) (Zabbix `hostid`).
    HostId,
    "host id"
);

define_id!(
    /// Identifier of a [`Trigger`](crate::trigger::Trigger) (Zabbix `triggerid`).
    TriggerId,
    "trigger id"
);
