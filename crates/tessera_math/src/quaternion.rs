//! Quaternions.

use crate::{
    matrix::Matrix4,
    simd::{F32x4, F32x4Ops},
    vector::Vector3,
};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A quaternion `x i + y j + z k + w`, where `w` is the real part.
///
/// Quaternions representing rotations are expected to have unit norm, but
/// the arithmetic operations do not enforce this. The components are stored
/// in a 128-bit SIMD register in the order `(x, y, z, w)`.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "[f32; 4]", from = "[f32; 4]")
)]
#[derive(Clone, Copy, Default, Zeroable, Pod)]
pub struct Quaternion {
    inner: F32x4,
}

impl Quaternion {
    /// Creates a quaternion with the given imaginary components `x`, `y`, `z`
    /// and real component `w`.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::wrap(F32x4::new(x, y, z, w))
    }

    /// Creates a quaternion from the given real and imaginary parts.
    #[inline]
    pub fn from_parts(real: f32, imag: &Vector3) -> Self {
        Self::new(imag.x(), imag.y(), imag.z(), real)
    }

    /// Creates the quaternion representing no rotation.
    #[inline]
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Creates the unit quaternion rotating by `angle` radians about the
    /// given unit axis, following the right-hand rule.
    #[inline]
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let (sin, cos) = (0.5 * angle).sin_cos();
        Self::from_parts(cos, &(axis * sin))
    }

    /// Creates the unit quaternion corresponding to the rotation in the
    /// upper-left 3x3 block of the given matrix.
    ///
    /// The component with the largest magnitude is computed from the square
    /// root of a trace-like sum and the others are derived from it, which
    /// keeps the division well conditioned for every rotation.
    pub fn from_rotation_matrix(m: &Matrix4) -> Self {
        let (m00, m11, m22) = (m.element(0, 0), m.element(1, 1), m.element(2, 2));
        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(
                (m.element(2, 1) - m.element(1, 2)) / s,
                (m.element(0, 2) - m.element(2, 0)) / s,
                (m.element(1, 0) - m.element(0, 1)) / s,
                0.25 * s,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::new(
                0.25 * s,
                (m.element(0, 1) + m.element(1, 0)) / s,
                (m.element(0, 2) + m.element(2, 0)) / s,
                (m.element(2, 1) - m.element(1, 2)) / s,
            )
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::new(
                (m.element(0, 1) + m.element(1, 0)) / s,
                0.25 * s,
                (m.element(1, 2) + m.element(2, 1)) / s,
                (m.element(0, 2) - m.element(2, 0)) / s,
            )
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::new(
                (m.element(0, 2) + m.element(2, 0)) / s,
                (m.element(1, 2) + m.element(2, 1)) / s,
                0.25 * s,
                (m.element(1, 0) - m.element(0, 1)) / s,
            )
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.inner.x()
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.inner.y()
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.inner.z()
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.inner.w()
    }

    /// The real part (`w`).
    #[inline]
    pub fn real(&self) -> f32 {
        self.w()
    }

    /// The imaginary part (`x`, `y`, `z`) as a vector.
    #[inline]
    pub fn imag(&self) -> Vector3 {
        let [x, y, z, _] = self.to_array();
        Vector3::new(x, y, z)
    }

    /// Returns the components as an array in the order `(x, y, z, w)`.
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        self.inner.to_array()
    }

    /// Returns the quaternion with negated imaginary part. For a unit
    /// quaternion this is the inverse rotation.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::wrap(self.inner.mul(F32x4::new(-1.0, -1.0, -1.0, 1.0)))
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.inner.dot(other.inner)
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Computes the normalized version of the quaternion. A zero quaternion
    /// gives non-finite components.
    #[inline]
    pub fn normalized(&self) -> Self {
        self * (1.0 / self.norm())
    }

    /// Computes the normalized version of the quaternion, or returns [`None`]
    /// if the norm is zero or not finite.
    #[inline]
    pub fn try_normalized(&self) -> Option<Self> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            None
        } else {
            Some(self * (1.0 / norm))
        }
    }

    /// Returns the rotation angle in radians and the unit rotation axis of
    /// this unit quaternion. For a rotation too small to define an axis, the
    /// angle is (close to) zero and the axis is the x-axis.
    pub fn to_angle_axis(&self) -> (f32, Vector3) {
        let w = self.w().clamp(-1.0, 1.0);
        let angle = 2.0 * w.acos();

        let sin_half_angle = (1.0 - w * w).sqrt();
        let axis = if sin_half_angle < 1e-6 {
            Vector3::unit_x()
        } else {
            self.imag() / sin_half_angle
        };

        (angle, axis)
    }

    /// Returns the rotation matrix corresponding to this unit quaternion.
    #[inline]
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::from_quaternion(self)
    }

    /// Rotates the given vector by this unit quaternion.
    #[inline]
    pub fn rotate_vector(&self, vector: &Vector3) -> Vector3 {
        let imag = self.imag();
        let t = 2.0 * imag.cross(vector);
        vector + self.w() * t + imag.cross(&t)
    }

    #[inline]
    const fn wrap(inner: F32x4) -> Self {
        Self { inner }
    }
}

impl From<[f32; 4]> for Quaternion {
    #[inline]
    fn from(array: [f32; 4]) -> Self {
        Self::wrap(F32x4::from_array(array))
    }
}

impl From<Quaternion> for [f32; 4] {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.to_array()
    }
}

impl PartialEq for Quaternion {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_all(other.inner)
    }
}

impl_binop!(Add, add, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion::wrap(a.inner.add(b.inner))
});

impl_binop!(Sub, sub, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion::wrap(a.inner.sub(b.inner))
});

// Hamilton product, accumulated one component of `a` at a time
impl_binop!(Mul, mul, Quaternion, Quaternion, Quaternion, |a, b| {
    let (a, b) = (a.inner, b.inner);

    let from_w = a.splat_w().mul(b);
    let from_x = a
        .splat_x()
        .mul(b.wzyx().mul(F32x4::new(1.0, -1.0, 1.0, -1.0)));
    let from_y = a
        .splat_y()
        .mul(b.zwxy().mul(F32x4::new(1.0, 1.0, -1.0, -1.0)));
    let from_z = a
        .splat_z()
        .mul(b.yxwz().mul(F32x4::new(-1.0, 1.0, 1.0, -1.0)));

    Quaternion::wrap(from_w.add(from_x).add(from_y).add(from_z))
});

impl_binop!(Mul, mul, Quaternion, f32, Quaternion, |a, b| {
    Quaternion::wrap(a.inner.mul(F32x4::splat(*b)))
});

impl_binop!(Mul, mul, f32, Quaternion, Quaternion, |a, b| { b * *a });

impl_binop_assign!(AddAssign, add_assign, Quaternion, Quaternion, |a, b| {
    *a = *a + b;
});

impl_binop_assign!(SubAssign, sub_assign, Quaternion, Quaternion, |a, b| {
    *a = *a - b;
});

impl_binop_assign!(MulAssign, mul_assign, Quaternion, Quaternion, |a, b| {
    *a = *a * b;
});

impl_binop_assign!(MulAssign, mul_assign, Quaternion, f32, |a, b| {
    *a = *a * b;
});

impl_unary_op!(Neg, neg, Quaternion, Quaternion, |val| {
    Quaternion::wrap(val.inner.neg())
});

impl_abs_diff_eq!(Quaternion, |a, b, epsilon| {
    a.to_array()
        .iter()
        .zip(&b.to_array())
        .all(|(a, b)| a.abs_diff_eq(b, epsilon))
});

impl_relative_eq!(Quaternion, |a, b, epsilon, max_relative| {
    a.to_array()
        .iter()
        .zip(&b.to_array())
        .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
});

impl fmt::Debug for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.to_array();
        f.debug_struct("Quaternion")
            .field("x", &x)
            .field("y", &y)
            .field("z", &z)
            .field("w", &w)
            .finish()
    }
}
