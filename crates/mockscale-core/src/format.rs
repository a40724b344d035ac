//! Payload dialects for weight readings.
//!
//! WiFi scales in the field disagree on the JSON shape of a reading. The
//! emulator can speak any of the three dialects below so consumers can test
//! their parsing against each one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ConfigError;
use crate::types::Reading;

/// JSON dialect used to render `GET /api/weight`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// `{"weight", "unit", "stable", "tare", "timestamp"}`
    #[default]
    #[serde(alias = "ad")]
    Standard,
    /// `{"data": {"value", "unit", "stable": 0|1}, "tare", "timestamp"}`
    Nested,
    /// `{"w", "u", "s", "t", "ts"}`
    Compact,
}

impl WireFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireFormat::Standard => "standard",
            WireFormat::Nested => "nested",
            WireFormat::Compact => "compact",
        }
    }

    /// Render a reading in this dialect.
    pub fn render(&self, reading: &Reading) -> Value {
        let timestamp = reading.timestamp.to_rfc3339();
        match self {
            WireFormat::Standard => json!({
                "weight": reading.weight,
                "unit": reading.unit,
                "stable": reading.stable,
                "tare": reading.tare,
                "timestamp": timestamp,
            }),
            WireFormat::Nested => json!({
                "data": {
                    "value": reading.weight,
                    "unit": reading.unit,
                    "stable": u8::from(reading.stable),
                },
                "tare": reading.tare,
                "timestamp": timestamp,
            }),
            WireFormat::Compact => json!({
                "w": reading.weight,
                "u": reading.unit,
                "s": reading.stable,
                "t": reading.tare,
                "ts": timestamp,
            }),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "ad" => Ok(WireFormat::Standard),
            "nested" => Ok(WireFormat::Nested),
            "compact" => Ok(WireFormat::Compact),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}
