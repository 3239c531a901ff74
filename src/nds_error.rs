// Error types shared by the launcher form and the bundled engine

use thiserror::Error;

/// Failures raised while validating or constructing a game
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Field size must have at least one dimension")]
    EmptyField,
    #[error("Axis {axis} has zero extent")]
    ZeroExtent { axis: usize },
    #[error("Neighborhood radius must be at least 1")]
    ZeroRadius,
    #[error("Field of {volume} cells exceeds the limit of {limit} cells")]
    FieldTooLarge { volume: u64, limit: u64 },
    #[error("{mines} mines do not fit in a field of {volume} cells")]
    TooManyMines { mines: u64, volume: u64 },
}

/// Failures raised by the configuration form itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Axis {index} does not exist ({len} axes)")]
    AxisOutOfRange { index: usize, len: usize },
    #[error("Unknown {kind} label \"{label}\"")]
    UnknownLabel { kind: &'static str, label: String },
    #[error("Radius \"{0}\" is not a valid integer")]
    InvalidRadius(String),
    #[error("Game was already launched from this form")]
    AlreadyLaunched,
    #[error(transparent)]
    Engine(#[from] EngineError),
}
