//! Error types raised while configuring and starting an animation.

use thiserror::Error;

/// An animation option that cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("font size must be greater than zero")]
    ZeroFontSize,
    #[error("character set must not be empty")]
    EmptyCharSet,
    #[error("{name} range [{min}, {max}] is invalid: {reason}")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
        reason: &'static str,
    },
    #[error("initial density {0} is outside [0, 1]")]
    DensityOutOfRange(f64),
}

/// Why an animation could not start. Setup failures are terminal for
/// that setup call; nothing is drawn.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("surface with id \"{id}\" not found")]
    SurfaceNotFound { id: String },
    #[error("unable to get 2D context for surface \"{id}\"")]
    ContextUnavailable { id: String },
    #[error("invalid animation options: {0}")]
    InvalidConfig(#[from] ConfigError),
}
