//! Simulation parameters.

use mockscale_core::ConfigResult;
use mockscale_core::config::InstrumentConfig;

/// Shape of the synthetic signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentModel {
    /// Maximum capacity (kg). Raw weight is clamped to `[0, capacity]`.
    pub capacity: f64,
    /// Power-on load is drawn from `[initial_min, initial_max]`.
    pub initial_min: f64,
    pub initial_max: f64,
    /// Each read moves the raw weight by a draw from `[-drift, drift]`.
    pub drift: f64,
    /// Probability that a reading is flagged stable.
    pub stable_probability: f64,
}

impl Default for InstrumentModel {
    fn default() -> Self {
        Self {
            capacity: 20.0,
            initial_min: 5.0,
            initial_max: 15.0,
            drift: 0.2,
            stable_probability: 0.9,
        }
    }
}

impl InstrumentModel {
    /// Build a model from the `[instrument]` config section, rejecting
    /// parameters that would break the clamp or seeding invariants.
    pub fn from_config(config: &InstrumentConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            capacity: config.capacity,
            initial_min: config.initial_min,
            initial_max: config.initial_max,
            drift: config.drift,
            stable_probability: config.stable_probability,
        })
    }

    /// Same model with a different stability probability.
    pub fn with_stable_probability(mut self, p: f64) -> Self {
        self.stable_probability = p;
        self
    }
}
