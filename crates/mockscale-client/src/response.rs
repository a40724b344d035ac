//! Tolerant parsing of weight payloads.
//!
//! Accepts the three shapes seen in the field:
//!
//! - `{"weight": 12.5, "unit": "kg", "stable": true}`
//! - `{"data": {"value": 12.5, "unit": "kg", "stable": 1}}`
//! - `{"w": 12.5, "u": "kg", "s": true}`

use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Stability flag sent either as a boolean or as `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    pub fn as_bool(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(n) => n != 0,
        }
    }
}

/// Nested `data` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeightData {
    pub value: Option<f64>,
    pub v: Option<f64>,
    pub unit: Option<String>,
    pub u: Option<String>,
    pub stable: Option<Flag>,
    pub s: Option<Flag>,
}

/// Union of every known weight payload field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeightResponse {
    pub weight: Option<f64>,
    pub w: Option<f64>,
    pub unit: Option<String>,
    pub u: Option<String>,
    pub stable: Option<Flag>,
    pub s: Option<Flag>,
    pub data: Option<WeightData>,
}

/// A decoded reading, normalized to grams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSample {
    pub grams: f64,
    /// Stability as reported by the scale itself.
    pub stable: bool,
}

impl WeightResponse {
    pub fn from_slice(bytes: &[u8]) -> ClientResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// `weight` > `w` > `data.value` > `data.v`.
    pub fn actual_weight(&self) -> Option<f64> {
        self.weight
            .or(self.w)
            .or_else(|| self.data.as_ref().and_then(|d| d.value.or(d.v)))
    }

    /// `unit` > `u` > `data.unit` > `data.u`.
    pub fn actual_unit(&self) -> Option<&str> {
        self.unit
            .as_deref()
            .or(self.u.as_deref())
            .or_else(|| {
                self.data
                    .as_ref()
                    .and_then(|d| d.unit.as_deref().or(d.u.as_deref()))
            })
    }

    /// `stable` > `s` > `data.stable` > `data.s`; stable when absent.
    pub fn actual_stable(&self) -> bool {
        self.stable
            .or(self.s)
            .or_else(|| self.data.as_ref().and_then(|d| d.stable.or(d.s)))
            .map(Flag::as_bool)
            .unwrap_or(true)
    }

    /// Normalize to grams. Kilograms are converted; any other or missing
    /// unit is taken as grams.
    pub fn to_sample(&self) -> ClientResult<WeightSample> {
        let weight = self.actual_weight().ok_or(ClientError::MissingWeight)?;
        let grams = match self.actual_unit() {
            Some(unit) if unit.eq_ignore_ascii_case("kg") => weight * 1000.0,
            _ => weight,
        };
        Ok(WeightSample {
            grams,
            stable: self.actual_stable(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(json: &str) -> ClientResult<WeightSample> {
        WeightResponse::from_slice(json.as_bytes())?.to_sample()
    }

    #[test]
    fn parses_standard_dialect() {
        let s = sample(r#"{"weight": 12.5, "unit": "kg", "stable": false, "tare": 0.0,
                          "timestamp": "2026-01-01T00:00:00+08:00"}"#)
            .unwrap();
        assert_eq!(s.grams, 12500.0);
        assert!(!s.stable);
    }

    #[test]
    fn parses_nested_dialect_with_numeric_flag() {
        let s = sample(r#"{"data": {"value": 1.25, "unit": "KG", "stable": 0}}"#).unwrap();
        assert_eq!(s.grams, 1250.0);
        assert!(!s.stable);

        let s = sample(r#"{"data": {"v": 3.0, "u": "kg", "s": 1}}"#).unwrap();
        assert_eq!(s.grams, 3000.0);
        assert!(s.stable);
    }

    #[test]
    fn parses_compact_dialect() {
        let s = sample(r#"{"w": 0.5, "u": "kg", "s": true, "t": 0.0}"#).unwrap();
        assert_eq!(s.grams, 500.0);
        assert!(s.stable);
    }

    #[test]
    fn grams_pass_through() {
        let s = sample(r#"{"weight": 250.0, "unit": "g"}"#).unwrap();
        assert_eq!(s.grams, 250.0);
        let s = sample(r#"{"weight": 42.0}"#).unwrap();
        assert_eq!(s.grams, 42.0);
    }

    #[test]
    fn missing_stability_defaults_to_stable() {
        let s = sample(r#"{"w": 1.0, "u": "kg"}"#).unwrap();
        assert!(s.stable);
    }

    #[test]
    fn top_level_fields_win_over_nested() {
        let s = sample(r#"{"weight": 2.0, "unit": "kg", "data": {"value": 9.0, "unit": "g"}}"#)
            .unwrap();
        assert_eq!(s.grams, 2000.0);
    }

    #[test]
    fn negative_net_weight_survives() {
        let s = sample(r#"{"weight": -0.4, "unit": "kg", "stable": true}"#).unwrap();
        assert_eq!(s.grams, -400.0);
    }

    #[test]
    fn missing_weight_is_an_error() {
        assert!(matches!(
            sample(r#"{"unit": "kg", "stable": true}"#),
            Err(ClientError::MissingWeight)
        ));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(sample("not json"), Err(ClientError::Decode(_))));
    }
}
