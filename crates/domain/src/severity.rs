//! Trigger severity and the icon fill colour derived from it.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Ordinal priority of a monitoring trigger.
///
/// Zabbix uses `0` (not classified) through `5` (disaster) and sends the
/// value as a JSON string. Higher is worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Severity(u8);

impl Severity {
    /// Not classified: also the severity of a host with no triggers at all.
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Human-readable Zabbix name for the level.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "not classified",
            1 => "information",
            2 => "warning",
            3 => "average",
            4 => "high",
            _ => "disaster",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeverityVisitor;

        impl Visitor<'_> for SeverityVisitor {
            type Value = Severity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a severity level as a number or numeric string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Severity, E> {
                u8::try_from(v)
                    .map(Severity)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Severity, E> {
                u8::try_from(v)
                    .map(Severity)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Severity, E> {
                v.trim()
                    .parse::<u8>()
                    .map(Severity)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(SeverityVisitor)
    }
}

/// Icon background colour for a device, chosen by its worst trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillColor {
    /// No problem (severity 0).
    Green,
    /// Minor problem (severity 1 to 3).
    Amber,
    /// Serious problem (severity above 3).
    Red,
}

impl FillColor {
    #[must_use]
    pub fn for_severity(severity: Severity) -> Self {
        match severity.level() {
            0 => Self::Green,
            1..=3 => Self::Amber,
            _ => Self::Red,
        }
    }

    /// CSS hex colour written into the icon's `fill`.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Green => "#00b050",
            Self::Amber => "#fee599",
            Self::Red => "#c05046",
        }
    }
}

impl fmt::Display for FillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}
