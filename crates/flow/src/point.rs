//! A single particle of the flow field.

use crate::coloring::gradient_color;
use crate::config::FlowConfig;
use crate::domain::Domain;
use glam::DVec2;
use wavy_core::color::Color;
use wavy_core::prng::RandomSource;

/// Respawned points land at least this far inside every domain edge.
const RESPAWN_MARGIN: f64 = 1.0;
/// Redraws allowed when a respawn coordinate lands exactly on the margin.
const RESPAWN_RETRIES: usize = 8;

/// A moving point: position, depth offset into the noise volume, and the
/// color cached at spawn time when colors are not re-evaluated every step.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    position: DVec2,
    depth_offset: f64,
    cached_color: Option<Color>,
    respawns: u32,
}

impl Point {
    /// A point at `position` with no cached color and no respawns.
    pub fn new(position: DVec2, depth_offset: f64) -> Self {
        Self {
            position,
            depth_offset,
            cached_color: None,
            respawns: 0,
        }
    }

    /// Sets the color reused every step while colors are cached.
    pub fn with_cached_color(mut self, color: Color) -> Self {
        self.cached_color = Some(color);
        self
    }

    /// Current position in domain units.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Offset along the noise depth axis.
    pub fn depth_offset(&self) -> f64 {
        self.depth_offset
    }

    /// Cached color, `None` when colors are evaluated every step.
    pub fn cached_color(&self) -> Option<Color> {
        self.cached_color
    }

    /// How many times this point has been respawned.
    pub fn respawns(&self) -> u32 {
        self.respawns
    }

    /// Moves `speed` units in direction `angle_degrees`. No bounds check.
    pub fn advance(&mut self, angle_degrees: f64, speed: f64) {
        self.position += DVec2::from_angle(angle_degrees.to_radians()) * speed;
    }

    /// True once the point has left the domain. Points exactly on an edge
    /// are still inside.
    pub fn is_out_of_domain(&self, domain: &Domain) -> bool {
        let p = self.position;
        p.x < 0.0 || p.y < 0.0 || p.x > domain.width() || p.y > domain.height()
    }

    /// Relocates the point to a random position strictly inside
    /// `(1, width - 1) × (1, height - 1)` and nudges its depth offset by up to
    /// `±2 · depth_influence`, clamped to `±depth_range`.
    ///
    /// When colors are cached (`always_evaluate_color` off) the cached color
    /// is recomputed for the new position.
    pub fn respawn<R>(&mut self, domain: &Domain, config: &FlowConfig, rng: &mut R)
    where
        R: RandomSource + ?Sized,
    {
        let x = open_interval(rng, RESPAWN_MARGIN, domain.width() - RESPAWN_MARGIN);
        let y = open_interval(rng, RESPAWN_MARGIN, domain.height() - RESPAWN_MARGIN);
        self.position = DVec2::new(x, y);

        let spread = 2.0 * config.depth_influence;
        let nudged = self.depth_offset + rng.random_range(-spread, spread);
        self.depth_offset = nudged.clamp(-config.depth_range, config.depth_range);

        if !config.always_evaluate_color {
            self.cached_color = Some(gradient_color(self.position, domain, config.ellipse_alpha));
        }
        self.respawns = self.respawns.saturating_add(1);
    }
}

/// Uniform draw from the open interval `(min, max)`.
///
/// `random_range` is half-open and may return `min` itself; such draws are
/// retried, and a source stuck on the boundary gets the midpoint.
fn open_interval<R>(rng: &mut R, min: f64, max: f64) -> f64
where
    R: RandomSource + ?Sized,
{
    for _ in 0..RESPAWN_RETRIES {
        let v = rng.random_range(min, max);
        if v > min && v < max {
            return v;
        }
    }
    log::warn!("random source kept returning boundary values for ({min}, {max})");
    min + (max - min) * 0.5
}
