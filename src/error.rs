use thiserror::Error;

/// Errors raised when a sample fails boundary validation.
///
/// The recorder never sees these: samples are checked by the input adapter
/// before they reach the capture session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("Sample coordinate is not finite: ({x}, {y})")]
    NonFiniteCoordinate { x: f32, y: f32 },

    #[error("Sample pressure is not finite: {0}")]
    NonFinitePressure(f32),
}

/// Errors that can occur while loading a capture configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
