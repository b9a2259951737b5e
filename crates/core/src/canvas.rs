//! CPU raster canvas and the draw commands engines emit each frame.
//!
//! A frame is rendered in two passes: [`Canvas::fade`] blends the previous
//! frame toward the background (low alphas leave trails), then
//! [`Canvas::draw`] fills one circle per [`DrawCommand`] with source-over
//! alpha blending. Pixels are stored as sRGB in row-major order.

use crate::color::{Color, Srgb, CHANNEL_MAX};
use crate::error::EngineError;
use glam::DVec2;

/// A filled circle to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Center in canvas units (pixels).
    pub position: DVec2,
    pub color: Color,
    /// Dot size in pixels. Drawn as the circle's diameter, so the default of
    /// 1 marks about one pixel.
    pub radius: f64,
}

/// An opaque raster surface with a background color.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: Srgb,
    pixels: Vec<Srgb>,
}

impl Canvas {
    /// Creates a canvas cleared to `background`.
    ///
    /// Returns `EngineError::InvalidDimensions` if width or height is zero,
    /// or if `width * height` would overflow `usize`.
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            background,
            pixels: vec![background; len],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color that `fade` blends toward.
    pub fn background(&self) -> Srgb {
        self.background
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Resets every pixel to the background color.
    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    /// Paints the background over the whole canvas with opacity
    /// `alpha / 255`. Alpha 255 clears, alpha 0 leaves the canvas untouched.
    pub fn fade(&mut self, alpha: f64) {
        let a = (alpha / CHANNEL_MAX).clamp(0.0, 1.0);
        if a == 0.0 {
            return;
        }
        let bg = self.background;
        self.pixels
            .iter_mut()
            .for_each(|p| *p = blend_over(*p, bg, a));
    }

    /// Draws every command in order, each as a circle of diameter
    /// `radius`.
    pub fn draw(&mut self, commands: &[DrawCommand]) {
        commands
            .iter()
            .for_each(|c| self.fill_circle(c.position, c.radius * 0.5, c.color));
    }

    /// Fills the pixels whose centers lie within `radius` of `center`.
    ///
    /// A circle smaller than a pixel still marks the pixel containing its
    /// center. Parts outside the canvas are clipped.
    pub fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        if !center.is_finite() || !radius.is_finite() || radius < 0.0 {
            return;
        }
        let a = color.opacity();
        if a == 0.0 {
            return;
        }
        let src = color.to_srgb();

        let x0 = (center.x - radius).floor().max(0.0);
        let y0 = (center.y - radius).floor().max(0.0);
        let x1 = (center.x + radius).ceil().min(self.width as f64 - 1.0);
        let y1 = (center.y + radius).ceil().min(self.height as f64 - 1.0);

        let mut covered = false;
        if x0 <= x1 && y0 <= y1 {
            let r2 = radius * radius;
            for py in y0 as usize..=y1 as usize {
                for px in x0 as usize..=x1 as usize {
                    let d = DVec2::new(px as f64 + 0.5, py as f64 + 0.5) - center;
                    if d.length_squared() <= r2 {
                        let idx = py * self.width + px;
                        self.pixels[idx] = blend_over(self.pixels[idx], src, a);
                        covered = true;
                    }
                }
            }
        }

        if !covered && center.x >= 0.0 && center.y >= 0.0 {
            let (px, py) = (center.x as usize, center.y as usize);
            if px < self.width && py < self.height {
                let idx = py * self.width + px;
                self.pixels[idx] = blend_over(self.pixels[idx], src, a);
            }
        }
    }
}

/// Source-over compositing of `src` with opacity `a` onto opaque `dst`.
fn blend_over(dst: Srgb, src: Srgb, a: f64) -> Srgb {
    Srgb {
        r: dst.r + (src.r - dst.r) * a,
        g: dst.g + (src.g - dst.g) * a,
        b: dst.b + (src.b - dst.b) * a,
    }
}
