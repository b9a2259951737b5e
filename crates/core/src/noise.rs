//! Smoothed 3D noise sources.
//!
//! A [`NoiseSource`] returns a value in [0, 1) for any point in 3D space.
//! Engines sample it to derive directions; they never cache its output.
//! All implementations are deterministic: same inputs produce the same output.

use ::noise::{NoiseFn, Perlin};

/// Largest value a noise source may return (the range is half-open).
const UPPER_BOUND: f64 = 1.0 - f64::EPSILON;

/// A smoothed noise function over three real coordinates.
pub trait NoiseSource {
    /// Samples the noise at `(x, y, z)`. Returns a value in [0, 1).
    fn noise(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64, f64) -> f64,
{
    fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        self(x, y, z)
    }
}

/// Multi-octave Perlin noise normalized to [0, 1).
///
/// Octave `k` is sampled at frequency `2^k` with amplitude `falloff^k`; the
/// sum is divided by the total amplitude so the range does not depend on the
/// octave count.
pub struct PerlinNoise {
    noise: Perlin,
    octaves: u32,
    falloff: f64,
}

impl PerlinNoise {
    /// Single-octave Perlin noise.
    pub fn new(seed: u32) -> Self {
        Self::with_detail(seed, 1, 0.5)
    }

    /// Perlin noise with `octaves` layers (at least 1), each weighted by
    /// `falloff` relative to the previous one.
    pub fn with_detail(seed: u32, octaves: u32, falloff: f64) -> Self {
        Self {
            noise: Perlin::new(seed),
            octaves: octaves.max(1),
            falloff,
        }
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn falloff(&self) -> f64 {
        self.falloff
    }
}

impl NoiseSource for PerlinNoise {
    fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let (sum, total, _, _) =
            (0..self.octaves).fold((0.0, 0.0, 1.0, 1.0), |(sum, total, amp, freq), _| {
                let n = self.noise.get([x * freq, y * freq, z * freq]);
                (sum + n * amp, total + amp, amp * self.falloff, freq * 2.0)
            });
        if total <= 0.0 {
            return 0.5;
        }
        // Perlin output is roughly [-1, 1].
        (((sum / total) + 1.0) * 0.5).clamp(0.0, UPPER_BOUND)
    }
}
