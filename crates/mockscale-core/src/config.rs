//! mockscale.toml configuration parser.
//!
//! Every key is optional; missing keys fall back to the defaults of a
//! 20 kg scale on `0.0.0.0:8080` that is stable 90% of the time.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::format::WireFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub server: ServerConfig,
    pub instrument: InstrumentConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub format: WireFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            format: WireFormat::Standard,
        }
    }
}

/// Simulation parameters of the emulated instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentConfig {
    /// Maximum capacity in kg; raw weight is clamped to `[0, capacity]`.
    pub capacity: f64,
    /// Lower bound of the power-on load (kg).
    pub initial_min: f64,
    /// Upper bound of the power-on load (kg).
    pub initial_max: f64,
    /// Random-walk step bound per read (kg).
    pub drift: f64,
    /// Probability that a reading is flagged stable.
    pub stable_probability: f64,
    /// Fixed RNG seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            capacity: 20.0,
            initial_min: 5.0,
            initial_max: 15.0,
            drift: 0.2,
            stable_probability: 0.9,
            seed: None,
        }
    }
}

/// Settings for the reference client (`mockscaled watch` / `tare`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scale address as `host:port`.
    pub address: String,
    pub weight_path: String,
    pub tare_path: String,
    pub read_interval_ms: u64,
    /// How long an unstable weight must hold still before it counts as stable.
    pub stable_threshold_ms: u64,
    /// Weight tolerance (grams) for software stability detection.
    pub stable_tolerance_g: f64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8080".to_string(),
            weight_path: "/api/weight".to_string(),
            tare_path: "/api/tare".to_string(),
            read_interval_ms: 500,
            stable_threshold_ms: 1000,
            stable_tolerance_g: 0.5,
            connect_timeout_ms: 5000,
            request_timeout_ms: 3000,
        }
    }
}

impl ScaleConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: ScaleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject settings the emulator cannot honor.
    pub fn validate(&self) -> ConfigResult<()> {
        self.instrument.validate()?;
        self.client.validate()?;
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidServer("host must not be empty".into()));
        }
        Ok(())
    }
}

impl ClientConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |msg: String| Err(ConfigError::InvalidClient(msg));

        if self.address.trim().is_empty() {
            return invalid("address must not be empty".into());
        }
        for (name, path) in [("weight_path", &self.weight_path), ("tare_path", &self.tare_path)] {
            if !path.starts_with('/') {
                return invalid(format!("{name} must start with '/', got {path:?}"));
            }
        }
        for (name, ms) in [
            ("read_interval_ms", self.read_interval_ms),
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("request_timeout_ms", self.request_timeout_ms),
        ] {
            if ms == 0 {
                return invalid(format!("{name} must be positive"));
            }
        }
        if !(self.stable_tolerance_g.is_finite() && self.stable_tolerance_g >= 0.0) {
            return invalid(format!(
                "stable_tolerance_g must be non-negative, got {}",
                self.stable_tolerance_g
            ));
        }
        Ok(())
    }
}

impl InstrumentConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |msg: String| Err(ConfigError::InvalidModel(msg));

        if !(self.capacity.is_finite() && self.capacity > 0.0) {
            return invalid(format!("capacity must be positive, got {}", self.capacity));
        }
        if !(self.initial_min >= 0.0
            && self.initial_min <= self.initial_max
            && self.initial_max <= self.capacity)
        {
            return invalid(format!(
                "initial range [{}, {}] must lie within [0, {}]",
                self.initial_min, self.initial_max, self.capacity
            ));
        }
        if !(self.drift.is_finite() && self.drift >= 0.0) {
            return invalid(format!("drift must be non-negative, got {}", self.drift));
        }
        if !(0.0..=1.0).contains(&self.stable_probability) {
            return invalid(format!(
                "stable_probability must be within [0, 1], got {}",
                self.stable_probability
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScaleConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.instrument.capacity, 20.0);
        assert_eq!(config.instrument.stable_probability, 0.9);
        assert_eq!(config.client.weight_path, "/api/weight");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial() {
        let toml_str = r#"
[server]
port = 9090
format = "compact"

[instrument]
stable_probability = 1.0
seed = 42
"#;
        let config = ScaleConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.format, WireFormat::Compact);
        assert_eq!(config.instrument.seed, Some(42));
        assert_eq!(config.instrument.drift, 0.2);
    }

    #[test]
    fn test_parse_empty() {
        let config = ScaleConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScaleConfig::default());
    }

    #[test]
    fn test_render_roundtrip() {
        let config = ScaleConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[instrument]"));
        assert!(toml_str.contains("stable_probability"));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let toml_str = "[instrument]\nstable_probability = 1.5\n";
        let err = ScaleConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidModel(_)));
    }

    #[test]
    fn test_rejects_seed_range_beyond_capacity() {
        let toml_str = "[instrument]\ncapacity = 10.0\n";
        let err = ScaleConfig::from_toml_str(toml_str).unwrap_err();
        assert!(err.to_string().contains("initial range"));
    }

    #[test]
    fn test_rejects_zero_client_interval_and_timeouts() {
        for key in ["read_interval_ms", "connect_timeout_ms", "request_timeout_ms"] {
            let toml_str = format!("[client]\n{key} = 0\n");
            let err = ScaleConfig::from_toml_str(&toml_str).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidClient(_)), "{key}");
            assert!(err.to_string().contains(key));
        }
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let toml_str = "[client]\nstable_tolerance_g = -5.0\n";
        let err = ScaleConfig::from_toml_str(toml_str).unwrap_err();
        assert!(err.to_string().contains("stable_tolerance_g"));

        let config = ClientConfig {
            stable_tolerance_g: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_client_address_and_paths() {
        let toml_str = "[client]\naddress = \"  \"\n";
        assert!(matches!(
            ScaleConfig::from_toml_str(toml_str),
            Err(ConfigError::InvalidClient(_))
        ));

        let toml_str = "[client]\ntare_path = \"api/tare\"\n";
        let err = ScaleConfig::from_toml_str(toml_str).unwrap_err();
        assert!(err.to_string().contains("tare_path"));
    }

    #[test]
    fn test_format_alias_in_toml() {
        let config = ScaleConfig::from_toml_str("[server]\nformat = \"ad\"\n").unwrap();
        assert_eq!(config.server.format, WireFormat::Standard);
    }

    #[test]
    fn test_rejects_unknown_format() {
        let toml_str = "[server]\nformat = \"xml\"\n";
        assert!(matches!(
            ScaleConfig::from_toml_str(toml_str),
            Err(ConfigError::Parse(_))
        ));
    }
}
