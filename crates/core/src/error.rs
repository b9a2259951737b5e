//! Error types for the wavy core.

use thiserror::Error;

/// Errors produced by grid, engine and rendering operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A domain or canvas had zero, negative or non-finite dimensions.
    #[error("invalid dimensions: width and height must be positive and finite")]
    InvalidDimensions,

    /// A 1D cell index was outside `[0, len)`.
    #[error("index {index} is out of the allowed range [0, {len})")]
    IndexOutOfRange { index: i128, len: usize },

    /// A 2D cell coordinate was outside `[0, side)` on either axis.
    #[error("coordinate ({x}, {y}) is out of range of a grid of size [{side}, {side}]")]
    CoordinateOutOfRange { x: i128, y: i128, side: usize },

    /// An argument had an unusable shape or value (e.g. a zero-sized grid).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration parameter failed validation.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// An operation required an initialized simulation.
    #[error("simulation has not been initialized")]
    NotInitialized,

    /// `initialize` was called on a simulation that is already running.
    #[error("simulation is already initialized")]
    AlreadyInitialized,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// No engine is registered under the requested name.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// Writing an output artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl EngineError {
    /// True for the grid addressing errors (index or coordinate out of range).
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            EngineError::IndexOutOfRange { .. } | EngineError::CoordinateOutOfRange { .. }
        )
    }
}
