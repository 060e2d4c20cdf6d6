//! SSE2 four-lane backend operating on an `__m128` register.
//!
//! # Safety
//!
//! This module is only compiled when the target enables SSE2, so every SSE2
//! intrinsic is available. Apart from the load in `from_array`, the
//! intrinsics used here operate on registers only and read or write no
//! memory, so the `unsafe` blocks that wrap them have no further
//! preconditions.

use super::F32x4Ops;
use bytemuck::{Pod, Zeroable};
use std::fmt;

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Four `f32` lanes in a 128-bit SSE register.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct F32x4(__m128);

// SAFETY: `__m128` is 16 bytes of plain `f32` data with no padding, and every
// bit pattern is valid
unsafe impl Zeroable for F32x4 {}
unsafe impl Pod for F32x4 {}

const fn shuffle_mask(x: i32, y: i32, z: i32, w: i32) -> i32 {
    (w << 6) | (z << 4) | (y << 2) | x
}

const SIGN_MASK: f32 = -0.0;

impl F32x4 {
    #[inline]
    fn shuffled<const MASK: i32>(self) -> Self {
        // SAFETY: Register-only SSE2 intrinsic, see module docs
        Self(unsafe { _mm_shuffle_ps::<MASK>(self.0, self.0) })
    }
}

impl F32x4Ops for F32x4 {
    const NAME: &'static str = "sse2";

    #[inline]
    fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        // `_mm_set_ps` takes the lanes from highest to lowest
        Self(unsafe { _mm_set_ps(w, z, y, x) })
    }

    #[inline]
    fn splat(value: f32) -> Self {
        Self(unsafe { _mm_set1_ps(value) })
    }

    #[inline]
    fn from_array(array: [f32; 4]) -> Self {
        // SAFETY: The array holds four readable `f32`s, and the unaligned
        // load has no alignment requirement
        Self(unsafe { _mm_loadu_ps(array.as_ptr()) })
    }

    #[inline]
    fn to_array(self) -> [f32; 4] {
        bytemuck::cast(self)
    }

    #[inline]
    fn x(self) -> f32 {
        unsafe { _mm_cvtss_f32(self.0) }
    }

    #[inline]
    fn y(self) -> f32 {
        self.splat_y().x()
    }

    #[inline]
    fn z(self) -> f32 {
        self.splat_z().x()
    }

    #[inline]
    fn w(self) -> f32 {
        self.splat_w().x()
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        Self(unsafe { _mm_add_ps(self.0, other.0) })
    }

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self(unsafe { _mm_sub_ps(self.0, other.0) })
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self(unsafe { _mm_mul_ps(self.0, other.0) })
    }

    #[inline]
    fn div(self, other: Self) -> Self {
        Self(unsafe { _mm_div_ps(self.0, other.0) })
    }

    #[inline]
    fn neg(self) -> Self {
        Self(unsafe { _mm_xor_ps(self.0, _mm_set1_ps(SIGN_MASK)) })
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        Self(unsafe { _mm_min_ps(self.0, other.0) })
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        Self(unsafe { _mm_max_ps(self.0, other.0) })
    }

    #[inline]
    fn abs(self) -> Self {
        Self(unsafe { _mm_andnot_ps(_mm_set1_ps(SIGN_MASK), self.0) })
    }

    #[inline]
    fn sqrt(self) -> Self {
        Self(unsafe { _mm_sqrt_ps(self.0) })
    }

    #[inline]
    fn dot(self, other: Self) -> f32 {
        unsafe {
            let products = _mm_mul_ps(self.0, other.0);
            // (x + z, y + w, z + z, w + w)
            let pair_sums = _mm_add_ps(products, _mm_movehl_ps(products, products));
            let y_plus_w = _mm_shuffle_ps::<{ shuffle_mask(1, 1, 1, 1) }>(pair_sums, pair_sums);
            _mm_cvtss_f32(_mm_add_ss(pair_sums, y_plus_w))
        }
    }

    #[inline]
    fn eq_all(self, other: Self) -> bool {
        unsafe { _mm_movemask_ps(_mm_cmpeq_ps(self.0, other.0)) == 0b1111 }
    }

    #[inline]
    fn splat_x(self) -> Self {
        self.shuffled::<{ shuffle_mask(0, 0, 0, 0) }>()
    }

    #[inline]
    fn splat_y(self) -> Self {
        self.shuffled::<{ shuffle_mask(1, 1, 1, 1) }>()
    }

    #[inline]
    fn splat_z(self) -> Self {
        self.shuffled::<{ shuffle_mask(2, 2, 2, 2) }>()
    }

    #[inline]
    fn splat_w(self) -> Self {
        self.shuffled::<{ shuffle_mask(3, 3, 3, 3) }>()
    }

    #[inline]
    fn yzxw(self) -> Self {
        self.shuffled::<{ shuffle_mask(1, 2, 0, 3) }>()
    }

    #[inline]
    fn zxyw(self) -> Self {
        self.shuffled::<{ shuffle_mask(2, 0, 1, 3) }>()
    }

    #[inline]
    fn wzyx(self) -> Self {
        self.shuffled::<{ shuffle_mask(3, 2, 1, 0) }>()
    }

    #[inline]
    fn zwxy(self) -> Self {
        self.shuffled::<{ shuffle_mask(2, 3, 0, 1) }>()
    }

    #[inline]
    fn yxwz(self) -> Self {
        self.shuffled::<{ shuffle_mask(1, 0, 3, 2) }>()
    }

    #[inline]
    fn transpose4([r0, r1, r2, r3]: [Self; 4]) -> [Self; 4] {
        unsafe {
            let xy_01 = _mm_unpacklo_ps(r0.0, r1.0);
            let xy_23 = _mm_unpacklo_ps(r2.0, r3.0);
            let zw_01 = _mm_unpackhi_ps(r0.0, r1.0);
            let zw_23 = _mm_unpackhi_ps(r2.0, r3.0);
            [
                Self(_mm_movelh_ps(xy_01, xy_23)),
                Self(_mm_movehl_ps(xy_23, xy_01)),
                Self(_mm_movelh_ps(zw_01, zw_23)),
                Self(_mm_movehl_ps(zw_23, zw_01)),
            ]
        }
    }
}

impl Default for F32x4 {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for F32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F32x4").field(&self.to_array()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::scalar;
    use super::*;
    use proptest::prelude::*;

    fn lanes() -> impl Strategy<Value = [f32; 4]> {
        prop::array::uniform4(-1e6_f32..1e6)
    }

    fn to_bits(v: [f32; 4]) -> [u32; 4] {
        v.map(f32::to_bits)
    }

    fn both(a: [f32; 4]) -> (F32x4, scalar::F32x4) {
        (F32x4::from_array(a), scalar::F32x4::from_array(a))
    }

    macro_rules! assert_same_lanes {
        ($sse:expr, $scalar:expr) => {
            prop_assert_eq!(to_bits($sse.to_array()), to_bits($scalar.to_array()))
        };
    }

    #[test]
    fn creating_sse_lanes_preserves_order() {
        let v = F32x4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));
    }

    proptest! {
        #[test]
        fn sse_arithmetic_matches_scalar_backend(a in lanes(), b in lanes()) {
            let (sa, ca) = both(a);
            let (sb, cb) = both(b);
            assert_same_lanes!(sa.add(sb), ca.add(cb));
            assert_same_lanes!(sa.sub(sb), ca.sub(cb));
            assert_same_lanes!(sa.mul(sb), ca.mul(cb));
            assert_same_lanes!(sa.div(sb), ca.div(cb));
            assert_same_lanes!(sa.neg(), ca.neg());
            assert_same_lanes!(sa.min(sb), ca.min(cb));
            assert_same_lanes!(sa.max(sb), ca.max(cb));
            assert_same_lanes!(sa.abs(), ca.abs());
            assert_same_lanes!(sa.abs().sqrt(), ca.abs().sqrt());
            prop_assert_eq!(sa.dot(sb).to_bits(), ca.dot(cb).to_bits());
            prop_assert_eq!(sa.eq_all(sb), ca.eq_all(cb));
            prop_assert!(sa.eq_all(sa));
        }

        #[test]
        fn sse_shuffles_match_scalar_backend(a in lanes()) {
            let (s, c) = both(a);
            assert_same_lanes!(s.splat_x(), c.splat_x());
            assert_same_lanes!(s.splat_y(), c.splat_y());
            assert_same_lanes!(s.splat_z(), c.splat_z());
            assert_same_lanes!(s.splat_w(), c.splat_w());
            assert_same_lanes!(s.yzxw(), c.yzxw());
            assert_same_lanes!(s.zxyw(), c.zxyw());
            assert_same_lanes!(s.wzyx(), c.wzyx());
            assert_same_lanes!(s.zwxy(), c.zwxy());
            assert_same_lanes!(s.yxwz(), c.yxwz());
        }

        #[test]
        fn sse_transpose_matches_scalar_backend(
            r0 in lanes(), r1 in lanes(), r2 in lanes(), r3 in lanes()
        ) {
            let sse = F32x4::transpose4([r0, r1, r2, r3].map(F32x4::from_array));
            let scalar = scalar::F32x4::transpose4([r0, r1, r2, r3].map(scalar::F32x4::from_array));
            for (s, c) in sse.into_iter().zip(scalar) {
                assert_same_lanes!(s, c);
            }
        }
    }
}
