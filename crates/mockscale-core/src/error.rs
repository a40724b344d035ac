//! Configuration errors.

use thiserror::Error;

/// Result type alias for configuration loading and validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating `mockscale.toml` or CLI overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid instrument model: {0}")]
    InvalidModel(String),

    #[error("invalid server settings: {0}")]
    InvalidServer(String),

    #[error("invalid client settings: {0}")]
    InvalidClient(String),

    #[error("unknown wire format `{0}` (expected standard, nested, or compact)")]
    UnknownFormat(String),
}
