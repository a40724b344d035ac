//! mockscale-instrument — the simulated weighing instrument.
//!
//! Owns the raw weight, tare offset, and seeding flag of one emulated
//! scale and advances them on each read with a bounded random walk.
//!
//! # Architecture
//!
//! ```text
//! Instrument (Clone, Arc<Mutex<..>>)
//!   ├── InstrumentState  raw_weight, tare_offset, initialized, reads
//!   ├── InstrumentModel  capacity, seed range, drift, stable_probability
//!   └── Box<dyn RandomSource>
//!         ├── StdRandom       (rand::StdRng, entropy or fixed seed)
//!         └── ScriptedRandom  (replayed values for tests)
//! ```
//!
//! Each operation holds the lock for its whole read-modify-write, so
//! concurrent requests observe some serial order of reads and tares.

pub mod instrument;
pub mod model;
pub mod random;
pub mod state;

pub use instrument::Instrument;
pub use model::InstrumentModel;
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use state::{InstrumentState, Phase};
