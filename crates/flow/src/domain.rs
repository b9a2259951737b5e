//! The rectangular region points move in.

use wavy_core::error::EngineError;

/// Smallest accepted side: respawn needs a non-empty `(1, side - 1)` interval.
const MIN_SIDE: f64 = 2.0;

/// Width and height of the continuous coordinate space, origin at the
/// top-left corner with y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    width: f64,
    height: f64,
}

impl Domain {
    /// Returns `EngineError::InvalidDimensions` unless both sides are finite
    /// and greater than 2.
    pub fn new(width: f64, height: f64) -> Result<Self, EngineError> {
        let valid = |side: f64| side.is_finite() && side > MIN_SIDE;
        if !valid(width) || !valid(height) {
            return Err(EngineError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}
