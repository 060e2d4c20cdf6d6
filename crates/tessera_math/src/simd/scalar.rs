//! Portable four-lane backend operating on a plain array.

use super::F32x4Ops;
use bytemuck::{Pod, Zeroable};

/// Four `f32` lanes in a 16-byte aligned array.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, Default)]
pub struct F32x4([f32; 4]);

// SAFETY: The type is a 16-byte array of `f32` with 16-byte alignment, so it
// has no padding and every bit pattern is valid
unsafe impl Zeroable for F32x4 {}
unsafe impl Pod for F32x4 {}

impl F32x4 {
    #[inline]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        let [x, y, z, w] = self.0;
        Self([f(x), f(y), f(z), f(w)])
    }

    #[inline]
    fn zip(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let [ax, ay, az, aw] = self.0;
        let [bx, by, bz, bw] = other.0;
        Self([f(ax, bx), f(ay, by), f(az, bz), f(aw, bw)])
    }

    #[inline]
    fn shuffled<const X: usize, const Y: usize, const Z: usize, const W: usize>(self) -> Self {
        Self([self.0[X], self.0[Y], self.0[Z], self.0[W]])
    }
}

impl F32x4Ops for F32x4 {
    const NAME: &'static str = "scalar";

    #[inline]
    fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    #[inline]
    fn splat(value: f32) -> Self {
        Self([value; 4])
    }

    #[inline]
    fn from_array(array: [f32; 4]) -> Self {
        Self(array)
    }

    #[inline]
    fn to_array(self) -> [f32; 4] {
        self.0
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        self.zip(other, |a, b| a + b)
    }

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.zip(other, |a, b| a - b)
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        self.zip(other, |a, b| a * b)
    }

    #[inline]
    fn div(self, other: Self) -> Self {
        self.zip(other, |a, b| a / b)
    }

    #[inline]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        self.zip(other, |a, b| if a < b { a } else { b })
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        self.zip(other, |a, b| if a > b { a } else { b })
    }

    #[inline]
    fn abs(self) -> Self {
        self.map(f32::abs)
    }

    #[inline]
    fn sqrt(self) -> Self {
        self.map(f32::sqrt)
    }

    #[inline]
    fn dot(self, other: Self) -> f32 {
        let [x, y, z, w] = self.mul(other).0;
        (x + z) + (y + w)
    }

    #[inline]
    fn eq_all(self, other: Self) -> bool {
        self.0 == other.0
    }

    #[inline]
    fn splat_x(self) -> Self {
        Self::splat(self.0[0])
    }

    #[inline]
    fn splat_y(self) -> Self {
        Self::splat(self.0[1])
    }

    #[inline]
    fn splat_z(self) -> Self {
        Self::splat(self.0[2])
    }

    #[inline]
    fn splat_w(self) -> Self {
        Self::splat(self.0[3])
    }

    #[inline]
    fn yzxw(self) -> Self {
        self.shuffled::<1, 2, 0, 3>()
    }

    #[inline]
    fn zxyw(self) -> Self {
        self.shuffled::<2, 0, 1, 3>()
    }

    #[inline]
    fn wzyx(self) -> Self {
        self.shuffled::<3, 2, 1, 0>()
    }

    #[inline]
    fn zwxy(self) -> Self {
        self.shuffled::<2, 3, 0, 1>()
    }

    #[inline]
    fn yxwz(self) -> Self {
        self.shuffled::<1, 0, 3, 2>()
    }

    #[inline]
    fn transpose4([r0, r1, r2, r3]: [Self; 4]) -> [Self; 4] {
        let (r0, r1, r2, r3) = (r0.0, r1.0, r2.0, r3.0);
        [
            Self([r0[0], r1[0], r2[0], r3[0]]),
            Self([r0[1], r1[1], r2[1], r3[1]]),
            Self([r0[2], r1[2], r2[2], r3[2]]),
            Self([r0[3], r1[3], r2[3], r3[3]]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_and_max_pick_second_operand_on_ties_and_nan() {
        let a = F32x4::new(1.0, f32::NAN, 0.0, 2.0);
        let b = F32x4::new(1.0, 3.0, -0.0, f32::NAN);

        let min = a.min(b).to_array();
        assert_eq!(min[1], 3.0);
        assert!(min[2].is_sign_negative());
        assert!(min[3].is_nan());

        let max = a.max(b).to_array();
        assert_eq!(max[1], 3.0);
        assert!(max[2].is_sign_negative());
        assert!(max[3].is_nan());
    }

    #[test]
    fn shuffles_place_named_lanes() {
        let v = F32x4::new(0.0, 1.0, 2.0, 3.0);
        assert_eq!(v.yzxw().to_array(), [1.0, 2.0, 0.0, 3.0]);
        assert_eq!(v.zxyw().to_array(), [2.0, 0.0, 1.0, 3.0]);
        assert_eq!(v.wzyx().to_array(), [3.0, 2.0, 1.0, 0.0]);
        assert_eq!(v.zwxy().to_array(), [2.0, 3.0, 0.0, 1.0]);
        assert_eq!(v.yxwz().to_array(), [1.0, 0.0, 3.0, 2.0]);
        assert_eq!(v.splat_z().to_array(), [2.0; 4]);
    }

    #[test]
    fn transposing_twice_gives_original() {
        let rows = [
            F32x4::new(0.0, 1.0, 2.0, 3.0),
            F32x4::new(4.0, 5.0, 6.0, 7.0),
            F32x4::new(8.0, 9.0, 10.0, 11.0),
            F32x4::new(12.0, 13.0, 14.0, 15.0),
        ];
        let transposed = F32x4::transpose4(rows);
        assert_eq!(transposed[1].to_array(), [1.0, 5.0, 9.0, 13.0]);

        let restored = F32x4::transpose4(transposed);
        for (restored, original) in restored.iter().zip(rows) {
            assert!(restored.eq_all(original));
        }
    }

    #[test]
    fn eq_all_uses_ieee_equality() {
        assert!(F32x4::splat(0.0).eq_all(F32x4::splat(-0.0)));
        assert!(!F32x4::splat(f32::NAN).eq_all(F32x4::splat(f32::NAN)));
    }
}
