//! Error types for the scene crate

use thiserror::Error;

/// Result type alias for configuration checks
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Rejected generator configuration
///
/// Generation itself cannot fail; every check happens up front in
/// [`crate::GeneratorConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Range with `min > max` (or a non-finite bound)
    #[error("invalid range for {name}: {min} > {max}")]
    InvalidRange { name: String, min: f64, max: f64 },

    /// Probability outside `[0, 1]`
    #[error("probability {name} = {value} is outside [0, 1]")]
    InvalidProbability { name: String, value: f64 },

    /// Shape weight table that does not sum to one
    #[error("shape weights sum to {0}, expected 1.0")]
    WeightSum(f64),

    #[error("shape weight table is empty")]
    EmptyWeights,

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}
