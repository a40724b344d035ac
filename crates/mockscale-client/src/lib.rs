//! mockscale-client — consumer side of the WiFi scale HTTP contract.
//!
//! Talks to the emulator (or a real WiFi scale) over plain HTTP/1,
//! tolerates the payload dialects scales emit, and layers software
//! stability detection on top of the hardware flag.
//!
//! # Architecture
//!
//! ```text
//! Poller
//!   ├── ScaleClient
//!   │   ├── probe()        GET /            (200 or 404 = reachable)
//!   │   ├── fetch_weight() GET /api/weight → WeightResponse → WeightSample
//!   │   └── tare()         POST /api/tare
//!   └── StabilityTracker   hardware flag + tolerance/hold-time promotion
//! ```
//!
//! Weights are reported in grams; `kg` payloads are converted.

pub mod client;
pub mod error;
pub mod poller;
pub mod response;
pub mod stability;

pub use client::ScaleClient;
pub use error::{ClientError, ClientResult};
pub use poller::{Poller, WeightEvent};
pub use response::{WeightResponse, WeightSample};
pub use stability::StabilityTracker;
