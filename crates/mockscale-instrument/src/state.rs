//! The instrument's mutable state and its two transitions.

use crate::model::InstrumentModel;
use crate::random::RandomSource;

/// Seeding phase of the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No read has happened yet; raw weight is still 0.
    Unseeded,
    /// The power-on load has been drawn; reads now random-walk.
    Seeded,
}

/// Raw weight, tare offset, and seeding flag of one emulated scale.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InstrumentState {
    /// Gross weight on the platform (kg), always within `[0, capacity]`.
    pub raw_weight: f64,
    /// Raw weight captured at the last tare (kg).
    pub tare_offset: f64,
    /// Set by the first read, never cleared.
    pub initialized: bool,
    /// Number of reads applied.
    pub reads: u64,
}

impl InstrumentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.initialized {
            Phase::Seeded
        } else {
            Phase::Unseeded
        }
    }

    /// Raw weight minus tare. Negative when the platform was unloaded
    /// after taring.
    pub fn net_weight(&self) -> f64 {
        self.raw_weight - self.tare_offset
    }

    /// Move the raw weight for one read.
    ///
    /// The first call seeds it from the model's power-on range; later
    /// calls add a bounded perturbation and clamp to capacity.
    pub fn advance(&mut self, model: &InstrumentModel, rng: &mut dyn RandomSource) {
        if self.initialized {
            let step = rng.uniform(-model.drift, model.drift);
            self.raw_weight = (self.raw_weight + step).clamp(0.0, model.capacity);
        } else {
            self.raw_weight = rng
                .uniform(model.initial_min, model.initial_max)
                .clamp(0.0, model.capacity);
            self.initialized = true;
        }
        self.reads += 1;
    }

    /// Capture the current raw weight as the zero reference.
    pub fn capture_tare(&mut self) {
        self.tare_offset = self.raw_weight;
    }
}
