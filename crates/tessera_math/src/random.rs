//! Seedable pseudo-random number generation using the `SplitMix64`
//! algorithm.

/// Generates a pseudo-random `u64` from the given `u64` value.
#[inline]
pub fn random_u64_from_state(state: u64) -> u64 {
    mix(state.wrapping_add(GOLDEN_GAMMA))
}

const GOLDEN_GAMMA: u64 = 0x9E3779B97F4A7C15;

/// A deterministic pseudo-random number generator. Two generators created
/// with the same seed produce identical sequences.
///
/// Each draw advances a single `u64` state by a fixed odd increment and
/// scrambles the result, so the generator is cheap to copy and store inline.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Random {
    state: u64,
}

impl Random {
    /// Creates a new generator with the given seed.
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Returns the next pseudo-random `u64`.
    #[inline]
    pub fn random_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix(self.state)
    }

    /// Returns the next pseudo-random `u32`, taken from the high bits of the
    /// next `u64`.
    #[inline]
    pub fn random_u32(&mut self) -> u32 {
        (self.random_u64() >> 32) as u32
    }

    /// Returns the next pseudo-random float in `[0, 1)`. All 24 mantissa bits
    /// are random, so every representable multiple of `2^-24` in the range is
    /// equally likely.
    #[inline]
    pub fn random_float(&mut self) -> f32 {
        const SCALE: f32 = 1.0 / (1_u32 << 24) as f32;
        (self.random_u64() >> 40) as f32 * SCALE
    }

    /// Returns the next pseudo-random float in `[min, max]`. The upper bound
    /// is inclusive because the scaled draw can round up to `max`.
    #[inline]
    pub fn random_float_in_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.random_float()
    }
}

#[inline]
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
