//! Shared handle to the simulated instrument.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mockscale_core::{ConfigResult, Reading, TareResult};
use mockscale_core::config::InstrumentConfig;
use tracing::debug;

use crate::model::InstrumentModel;
use crate::random::{RandomSource, StdRandom};
use crate::state::{InstrumentState, Phase};

struct Inner {
    state: InstrumentState,
    model: InstrumentModel,
    rng: Box<dyn RandomSource>,
}

/// Thread-safe handle to one emulated scale.
///
/// Cloning is cheap and every clone refers to the same instrument. Each
/// operation runs under a single mutex and never awaits, so lock hold
/// times are bounded by a few arithmetic steps.
#[derive(Clone)]
pub struct Instrument {
    inner: Arc<Mutex<Inner>>,
}

impl Instrument {
    /// Create an unseeded instrument with an explicit random source.
    pub fn new(model: InstrumentModel, rng: Box<dyn RandomSource>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: InstrumentState::new(),
                model,
                rng,
            })),
        }
    }

    /// Create an instrument from the `[instrument]` config section. A
    /// configured seed makes the signal reproducible.
    pub fn from_config(config: &InstrumentConfig) -> ConfigResult<Self> {
        let model = InstrumentModel::from_config(config)?;
        let rng = match config.seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::from_entropy(),
        };
        Ok(Self::new(model, Box::new(rng)))
    }

    /// Poisoning is ignored: every mutation leaves the state valid.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance the simulated weight and take a reading.
    pub fn read_weight(&self) -> Reading {
        let mut guard = self.lock();
        let Inner { state, model, rng } = &mut *guard;

        let seeding = state.phase() == Phase::Unseeded;
        state.advance(model, &mut **rng);
        let stable = rng.chance(model.stable_probability);
        let reading = Reading::new(state.net_weight(), stable, state.tare_offset);

        if seeding {
            debug!(raw_weight = state.raw_weight, "instrument seeded");
        }
        reading
    }

    /// Zero the scale at its current raw weight.
    pub fn tare(&self) -> TareResult {
        let mut guard = self.lock();
        guard.state.capture_tare();
        TareResult::succeeded(guard.state.tare_offset)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> InstrumentState {
        self.lock().state
    }

    /// Simulation parameters this instrument was built with.
    pub fn model(&self) -> InstrumentModel {
        self.lock().model
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self::new(InstrumentModel::default(), Box::new(StdRandom::from_entropy()))
    }
}
