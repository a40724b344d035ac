//! Payload types exchanged over the scale HTTP surface.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Unit reported by the emulator. Readings are always in kilograms.
pub const UNIT_KG: &str = "kg";

/// Message returned by a successful tare command.
pub const TARE_MESSAGE: &str = "tare succeeded";

/// Round a weight to the 0.01 kg display precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One weight reading as returned by `GET /api/weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Net weight (raw minus tare), rounded to two decimals. May be negative.
    pub weight: f64,
    pub unit: String,
    pub stable: bool,
    /// Current tare offset, rounded to two decimals.
    pub tare: f64,
    pub timestamp: DateTime<Local>,
}

impl Reading {
    /// Build a reading from unrounded net weight and tare, stamped now.
    pub fn new(net_weight: f64, stable: bool, tare: f64) -> Self {
        Self {
            weight: round2(net_weight),
            unit: UNIT_KG.to_string(),
            stable,
            tare: round2(tare),
            timestamp: Local::now(),
        }
    }
}

/// Response body of `POST /api/tare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TareResult {
    pub success: bool,
    pub message: String,
    pub tare: f64,
}

impl TareResult {
    pub fn succeeded(tare: f64) -> Self {
        Self {
            success: true,
            message: TARE_MESSAGE.to_string(),
            tare: round2(tare),
        }
    }
}
