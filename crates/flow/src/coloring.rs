//! Color rules for drawn points.

use crate::domain::Domain;
use glam::DVec2;
use wavy_core::color::{Color, CHANNEL_MAX};

/// HSB saturation used for angle colors.
const ANGLE_SATURATION: f64 = 100.0;
/// HSB brightness used for angle colors.
const ANGLE_BRIGHTNESS: f64 = 50.0;

/// Hue taken straight from the flow angle (the renderer wraps it).
pub fn angle_color(angle_degrees: f64, alpha: f64) -> Color {
    Color::hsb(angle_degrees, ANGLE_SATURATION, ANGLE_BRIGHTNESS, alpha)
}

/// Position gradient: red follows x, green follows inverted y, blue fades
/// from 255 at the left edge to 0 at the right edge.
///
/// Channels are not clamped here; positions just outside the domain give
/// out-of-range channels that the renderer clamps.
pub fn gradient_color(position: DVec2, domain: &Domain, alpha: f64) -> Color {
    let t = position.x / domain.width();
    Color::rgb(
        position.x,
        domain.height() - position.y,
        CHANNEL_MAX * (1.0 - t),
        alpha,
    )
}
