//! Uniform random sources and the default Xorshift64 generator.
//!
//! Engines draw randomness through [`RandomSource`] so hosts (and tests) can
//! inject their own stream. [`Xorshift64`] is the default: fast, seedable, and
//! identical across platforms (pure integer arithmetic in the core algorithm).

/// A uniform random number generator over a caller-given range.
pub trait RandomSource {
    /// Returns a uniformly distributed f64 in `[min, max)`.
    ///
    /// When `min == max` the result is `min`.
    fn random_range(&mut self, min: f64, max: f64) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut(f64, f64) -> f64,
{
    fn random_range(&mut self, min: f64, max: f64) -> f64 {
        self(min, max)
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17) for good statistical
/// properties across the full 64-bit state space. Seed of 0 is automatically
/// replaced with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0, which is a fixed point
    /// of the xorshift algorithm.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    ///
    /// If `seed` is 0, uses `0x5EED_DEAD_BEEF_CAFE` as a fallback to avoid
    /// the xorshift all-zeros fixed point.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    ///
    /// Implements xorshift64 with shifts (13, 7, 17).
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

impl RandomSource for Xorshift64 {
    fn random_range(&mut self, min: f64, max: f64) -> f64 {
        self.next_range(min, max)
    }
}
