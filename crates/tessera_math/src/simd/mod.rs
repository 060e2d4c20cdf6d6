//! Four-lane `f32` operations with a backend chosen at build time.
//!
//! All algebra in this crate is written against the [`F32x4`] alias and the
//! [`F32x4Ops`] trait. On x86 and x86_64 targets with SSE2 the alias refers
//! to [`sse::F32x4`], otherwise (or when the `scalar` feature is enabled) to
//! [`scalar::F32x4`]. Both backends evaluate every lane with the same
//! sequence of IEEE operations and never fuse multiply-add, so they produce
//! bit-identical results.

pub mod scalar;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
pub mod sse;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2",
    not(feature = "scalar")
))]
pub use sse::F32x4;

#[cfg(not(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2",
    not(feature = "scalar")
)))]
pub use scalar::F32x4;

/// The name of the backend that [`F32x4`] refers to.
pub const BACKEND_NAME: &str = <F32x4 as F32x4Ops>::NAME;

/// The operation set of a four-lane `f32` value.
///
/// Lanes are referred to as `x`, `y`, `z` and `w` in memory order. Shuffle
/// methods are named after the source lane placed in each output lane, so
/// `yzxw` produces `(y, z, x, w)`.
pub trait F32x4Ops: Copy + Sized {
    /// Human-readable name of the backend.
    const NAME: &'static str;

    fn new(x: f32, y: f32, z: f32, w: f32) -> Self;

    fn splat(value: f32) -> Self;

    fn from_array(array: [f32; 4]) -> Self;

    fn to_array(self) -> [f32; 4];

    #[inline]
    fn zero() -> Self {
        Self::splat(0.0)
    }

    #[inline]
    fn x(self) -> f32 {
        self.to_array()[0]
    }

    #[inline]
    fn y(self) -> f32 {
        self.to_array()[1]
    }

    #[inline]
    fn z(self) -> f32 {
        self.to_array()[2]
    }

    #[inline]
    fn w(self) -> f32 {
        self.to_array()[3]
    }

    fn add(self, other: Self) -> Self;

    fn sub(self, other: Self) -> Self;

    fn mul(self, other: Self) -> Self;

    fn div(self, other: Self) -> Self;

    fn neg(self) -> Self;

    /// Lane-wise `if self < other { self } else { other }`.
    fn min(self, other: Self) -> Self;

    /// Lane-wise `if self > other { self } else { other }`.
    fn max(self, other: Self) -> Self;

    /// Clears the sign bit of every lane.
    fn abs(self) -> Self;

    fn sqrt(self) -> Self;

    /// Dot product of all four lanes, summed as `(x + z) + (y + w)`.
    fn dot(self, other: Self) -> f32;

    /// Whether every lane compares equal under IEEE equality.
    fn eq_all(self, other: Self) -> bool;

    fn splat_x(self) -> Self;

    fn splat_y(self) -> Self;

    fn splat_z(self) -> Self;

    fn splat_w(self) -> Self;

    fn yzxw(self) -> Self;

    fn zxyw(self) -> Self;

    fn wzyx(self) -> Self;

    fn zwxy(self) -> Self;

    fn yxwz(self) -> Self;

    /// Transposes the 4x4 matrix whose rows (or columns) are the given values.
    fn transpose4(rows: [Self; 4]) -> [Self; 4];
}
