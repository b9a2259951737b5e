//! Noise-derived direction field.

use crate::config::FlowConfig;
use glam::DVec2;
use wavy_core::noise::NoiseSource;
use wavy_core::prng::RandomSource;

/// Angles are spread over two full turns so neighbouring noise values curl.
pub const MAX_ANGLE_DEGREES: f64 = 720.0;
/// Upper bound of the uniform draw behind the depth jitter.
const DEPTH_JITTER_SPAN: f64 = 20.0;

/// Maps positions (plus a depth offset) to flow directions in degrees.
///
/// Holds only the sampling weights; noise and randomness are passed in on
/// every call and nothing is retained between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowField {
    angle_multiplier: f64,
    depth_randomness: f64,
    depth_influence: f64,
}

impl FlowField {
    /// Field with the given noise scale and depth weights.
    pub fn new(angle_multiplier: f64, depth_randomness: f64, depth_influence: f64) -> Self {
        Self {
            angle_multiplier,
            depth_randomness,
            depth_influence,
        }
    }

    /// Field using the sampling settings of `config`.
    pub fn from_config(config: &FlowConfig) -> Self {
        Self::new(
            config.angle_multiplier,
            config.depth_randomness,
            config.depth_influence,
        )
    }

    /// Direction in degrees, `noise(x·m, y·m, depth·influence + jitter) · 720`.
    ///
    /// `jitter` is a uniform draw from `[0, 20)` scaled by
    /// `m · depth_randomness`. Exactly one random value is drawn per call,
    /// even when the jitter weight is zero. With zero depth randomness and
    /// influence the field is plain 2D noise.
    pub fn angle_at<N, R>(&self, position: DVec2, depth_offset: f64, noise: &N, rng: &mut R) -> f64
    where
        N: NoiseSource + ?Sized,
        R: RandomSource + ?Sized,
    {
        let m = self.angle_multiplier;
        let jitter = rng.random_range(0.0, DEPTH_JITTER_SPAN) * m * self.depth_randomness;
        let z = depth_offset * self.depth_influence + jitter;
        noise.noise(position.x * m, position.y * m, z) * MAX_ANGLE_DEGREES
    }
}
