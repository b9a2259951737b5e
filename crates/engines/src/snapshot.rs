//! PNG output of a [`Canvas`].
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! raw buffer from [`crate::pixel`] don't pull in the `image` crate.

use std::path::Path;
use wavy_core::canvas::Canvas;
use wavy_core::error::EngineError;

use crate::pixel::canvas_to_rgba;

/// Writes the canvas as a PNG image.
///
/// Returns `EngineError::InvalidDimensions` if the canvas dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), EngineError> {
    let rgba = canvas_to_rgba(canvas);
    let w = u32::try_from(canvas.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
    log::debug!("wrote {}x{} snapshot to {}", w, h, path.display());
    Ok(())
}
