//! mockscale-core — types shared by the emulator, its HTTP front, and the
//! reference client.

pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::ScaleConfig;
pub use error::{ConfigError, ConfigResult};
pub use format::WireFormat;
pub use types::*;
