//! Vectors.

use crate::simd::{F32x4, F32x4Ops};
use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A 2-dimensional vector.
#[repr(C)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "[f32; 2]", from = "[f32; 2]")
)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector2 {
    x: f32,
    y: f32,
}

/// A 3-dimensional vector.
///
/// The components are tightly packed, so the vector occupies 12 bytes with
/// 4-byte alignment. Convert to a [`Vector4`] with [`Self::extended`] for
/// SIMD computation.
#[repr(C)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "[f32; 3]", from = "[f32; 3]")
)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector3 {
    x: f32,
    y: f32,
    z: f32,
}

/// A 4-dimensional vector.
///
/// The components are stored in a 128-bit SIMD register (or an equivalently
/// aligned array for the scalar backend), giving the vector a size and
/// alignment of 16 bytes.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "[f32; 4]", from = "[f32; 4]")
)]
#[derive(Clone, Copy, Default, Zeroable, Pod)]
pub struct Vector4 {
    inner: F32x4,
}

impl Vector2 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::same(0.0)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub const fn same(value: f32) -> Self {
        Self::new(value, value)
    }

    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0)
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// A mutable reference to the x-component.
    #[inline]
    pub const fn x_mut(&mut self) -> &mut f32 {
        &mut self.x
    }

    /// A mutable reference to the y-component.
    #[inline]
    pub const fn y_mut(&mut self) -> &mut f32 {
        &mut self.y
    }

    /// Converts the vector to 3D by appending the given z-component.
    #[inline]
    pub const fn extended(&self, z: f32) -> Vector3 {
        Vector3::new(self.x, self.y, z)
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the norm (length) of the vector.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Computes the square of the norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Computes the normalized version of the vector. A zero vector gives
    /// non-finite components.
    #[inline]
    pub fn normalized(&self) -> Self {
        self / self.norm()
    }

    /// Computes the normalized version of the vector, or returns [`None`] if
    /// the norm is zero or not finite.
    #[inline]
    pub fn try_normalized(&self) -> Option<Self> {
        normalization_factor(self.norm()).map(|factor| self * factor)
    }

    /// Computes the normalized version of the vector, or returns the zero
    /// vector if the norm is zero or not finite.
    #[inline]
    pub fn normalized_or_zero(&self) -> Self {
        self.try_normalized().unwrap_or_else(Self::zeros)
    }

    /// Computes the distance between this point and another.
    #[inline]
    pub fn distance(&self, other: &Self) -> f32 {
        (self - other).norm()
    }

    #[inline]
    pub fn component_abs(&self) -> Self {
        self.map_with(f32::abs)
    }

    #[inline]
    pub fn component_min(&self, other: &Self) -> Self {
        self.zip_with(other, lane_min)
    }

    #[inline]
    pub fn component_max(&self, other: &Self) -> Self {
        self.zip_with(other, lane_max)
    }

    #[inline]
    pub fn min_component(&self) -> f32 {
        self.x.min(self.y)
    }

    #[inline]
    pub fn max_component(&self) -> f32 {
        self.x.max(self.y)
    }

    /// Returns a vector with the given closure applied to each component.
    #[inline]
    pub fn mapped(&self, f: impl Fn(f32) -> f32) -> Self {
        self.map_with(f)
    }

    #[inline]
    fn map_with(&self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.x), f(self.y))
    }

    #[inline]
    fn zip_with(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(f(self.x, other.x), f(self.y, other.y))
    }
}

impl From<[f32; 2]> for Vector2 {
    #[inline]
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2> for [f32; 2] {
    #[inline]
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

impl_componentwise_ops!(Vector2);

impl Index<usize> for Vector2 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("index out of bounds"),
        }
    }
}

impl IndexMut<usize> for Vector2 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("index out of bounds"),
        }
    }
}

impl_abs_diff_eq!(Vector2, |a, b, epsilon| {
    a.x.abs_diff_eq(&b.x, epsilon) && a.y.abs_diff_eq(&b.y, epsilon)
});

impl_relative_eq!(Vector2, |a, b, epsilon, max_relative| {
    a.x.relative_eq(&b.x, epsilon, max_relative) && a.y.relative_eq(&b.y, epsilon, max_relative)
});

impl fmt::Debug for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector2")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl Vector3 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::same(0.0)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub const fn same(value: f32) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// The z-component.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// A mutable reference to the x-component.
    #[inline]
    pub const fn x_mut(&mut self) -> &mut f32 {
        &mut self.x
    }

    /// A mutable reference to the y-component.
    #[inline]
    pub const fn y_mut(&mut self) -> &mut f32 {
        &mut self.y
    }

    /// A mutable reference to the z-component.
    #[inline]
    pub const fn z_mut(&mut self) -> &mut f32 {
        &mut self.z
    }

    /// The x- and y-components as a new vector.
    #[inline]
    pub const fn xy(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Converts the vector to 4D by appending the given w-component.
    #[inline]
    pub fn extended(&self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of this vector with another.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Computes the norm (length) of the vector.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Computes the square of the norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Computes the normalized version of the vector. A zero vector gives
    /// non-finite components.
    #[inline]
    pub fn normalized(&self) -> Self {
        self / self.norm()
    }

    /// Computes the normalized version of the vector, or returns [`None`] if
    /// the norm is zero or not finite.
    #[inline]
    pub fn try_normalized(&self) -> Option<Self> {
        normalization_factor(self.norm()).map(|factor| self * factor)
    }

    /// Computes the normalized version of the vector, or returns the zero
    /// vector if the norm is zero or not finite.
    #[inline]
    pub fn normalized_or_zero(&self) -> Self {
        self.try_normalized().unwrap_or_else(Self::zeros)
    }

    /// Computes the distance between this point and another.
    #[inline]
    pub fn distance(&self, other: &Self) -> f32 {
        (self - other).norm()
    }

    /// Rotates the vector by `angle` radians about the x-axis, following the
    /// right-hand rule.
    #[inline]
    pub fn rotated_about_x(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x,
            cos * self.y - sin * self.z,
            sin * self.y + cos * self.z,
        )
    }

    /// Rotates the vector by `angle` radians about the y-axis, following the
    /// right-hand rule.
    #[inline]
    pub fn rotated_about_y(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            cos * self.x + sin * self.z,
            self.y,
            cos * self.z - sin * self.x,
        )
    }

    /// Rotates the vector by `angle` radians about the z-axis, following the
    /// right-hand rule.
    #[inline]
    pub fn rotated_about_z(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            cos * self.x - sin * self.y,
            sin * self.x + cos * self.y,
            self.z,
        )
    }

    #[inline]
    pub fn component_abs(&self) -> Self {
        self.map_with(f32::abs)
    }

    #[inline]
    pub fn component_min(&self, other: &Self) -> Self {
        self.zip_with(other, lane_min)
    }

    #[inline]
    pub fn component_max(&self, other: &Self) -> Self {
        self.zip_with(other, lane_max)
    }

    #[inline]
    pub fn min_component(&self) -> f32 {
        self.x.min(self.y).min(self.z)
    }

    #[inline]
    pub fn max_component(&self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    /// Returns a vector with the given closure applied to each component.
    #[inline]
    pub fn mapped(&self, f: impl Fn(f32) -> f32) -> Self {
        self.map_with(f)
    }

    #[inline]
    fn map_with(&self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    #[inline]
    fn zip_with(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(f(self.x, other.x), f(self.y, other.y), f(self.z, other.z))
    }
}

impl From<[f32; 3]> for Vector3 {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f32; 3] {
    #[inline]
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl_componentwise_ops!(Vector3);

impl Index<usize> for Vector3 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index out of bounds"),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("index out of bounds"),
        }
    }
}

impl_abs_diff_eq!(Vector3, |a, b, epsilon| {
    a.x.abs_diff_eq(&b.x, epsilon)
        && a.y.abs_diff_eq(&b.y, epsilon)
        && a.z.abs_diff_eq(&b.z, epsilon)
});

impl_relative_eq!(Vector3, |a, b, epsilon, max_relative| {
    a.x.relative_eq(&b.x, epsilon, max_relative)
        && a.y.relative_eq(&b.y, epsilon, max_relative)
        && a.z.relative_eq(&b.z, epsilon, max_relative)
});

impl fmt::Debug for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector3")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}

impl Vector4 {
    /// Creates a new vector with the given components.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::wrap(F32x4::new(x, y, z, w))
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self::wrap(F32x4::zero())
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub fn same(value: f32) -> Self {
        Self::wrap(F32x4::splat(value))
    }

    #[inline]
    pub fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    pub fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    #[inline]
    pub fn unit_w() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Creates a new vector from the given 3D vector and w-component.
    #[inline]
    pub fn from_xyz_w(xyz: &Vector3, w: f32) -> Self {
        xyz.extended(w)
    }

    /// The x-component.
    #[inline]
    pub fn x(&self) -> f32 {
        self.inner.x()
    }

    /// The y-component.
    #[inline]
    pub fn y(&self) -> f32 {
        self.inner.y()
    }

    /// The z-component.
    #[inline]
    pub fn z(&self) -> f32 {
        self.inner.z()
    }

    /// The w-component.
    #[inline]
    pub fn w(&self) -> f32 {
        self.inner.w()
    }

    /// A mutable reference to the x-component.
    #[inline]
    pub fn x_mut(&mut self) -> &mut f32 {
        &mut self.lanes_mut()[0]
    }

    /// A mutable reference to the y-component.
    #[inline]
    pub fn y_mut(&mut self) -> &mut f32 {
        &mut self.lanes_mut()[1]
    }

    /// A mutable reference to the z-component.
    #[inline]
    pub fn z_mut(&mut self) -> &mut f32 {
        &mut self.lanes_mut()[2]
    }

    /// A mutable reference to the w-component.
    #[inline]
    pub fn w_mut(&mut self) -> &mut f32 {
        &mut self.lanes_mut()[3]
    }

    /// The x-, y- and z-components as a new vector.
    #[inline]
    pub fn xyz(&self) -> Vector3 {
        let [x, y, z, _] = self.to_array();
        Vector3::new(x, y, z)
    }

    /// Returns the components as an array.
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        self.inner.to_array()
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.inner.dot(other.inner)
    }

    /// Computes the norm (length) of the vector.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Computes the square of the norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Computes the normalized version of the vector. A zero vector gives
    /// non-finite components.
    #[inline]
    pub fn normalized(&self) -> Self {
        self / self.norm()
    }

    /// Computes the normalized version of the vector, or returns [`None`] if
    /// the norm is zero or not finite.
    #[inline]
    pub fn try_normalized(&self) -> Option<Self> {
        normalization_factor(self.norm()).map(|factor| self * factor)
    }

    /// Computes the normalized version of the vector, or returns the zero
    /// vector if the norm is zero or not finite.
    #[inline]
    pub fn normalized_or_zero(&self) -> Self {
        self.try_normalized().unwrap_or_else(Self::zeros)
    }

    /// Computes the distance between this point and another.
    #[inline]
    pub fn distance(&self, other: &Self) -> f32 {
        (self - other).norm()
    }

    #[inline]
    pub fn component_abs(&self) -> Self {
        Self::wrap(self.inner.abs())
    }

    #[inline]
    pub fn component_min(&self, other: &Self) -> Self {
        Self::wrap(self.inner.min(other.inner))
    }

    #[inline]
    pub fn component_max(&self, other: &Self) -> Self {
        Self::wrap(self.inner.max(other.inner))
    }

    #[inline]
    pub fn min_component(&self) -> f32 {
        let [x, y, z, w] = self.to_array();
        x.min(y).min(z).min(w)
    }

    #[inline]
    pub fn max_component(&self) -> f32 {
        let [x, y, z, w] = self.to_array();
        x.max(y).max(z).max(w)
    }

    /// Returns a vector with the given closure applied to each component.
    #[inline]
    pub fn mapped(&self, f: impl Fn(f32) -> f32) -> Self {
        Self::from(self.to_array().map(f))
    }

    #[inline]
    pub(crate) const fn wrap(inner: F32x4) -> Self {
        Self { inner }
    }

    #[inline]
    pub(crate) const fn unwrap(self) -> F32x4 {
        self.inner
    }

    #[inline]
    fn lanes(&self) -> &[f32; 4] {
        bytemuck::cast_ref(&self.inner)
    }

    #[inline]
    fn lanes_mut(&mut self) -> &mut [f32; 4] {
        bytemuck::cast_mut(&mut self.inner)
    }
}

impl From<[f32; 4]> for Vector4 {
    #[inline]
    fn from(array: [f32; 4]) -> Self {
        Self::wrap(F32x4::from_array(array))
    }
}

impl From<Vector4> for [f32; 4] {
    #[inline]
    fn from(v: Vector4) -> Self {
        v.to_array()
    }
}

impl PartialEq for Vector4 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_all(other.inner)
    }
}

impl_binop!(Add, add, Vector4, Vector4, Vector4, |a, b| {
    Vector4::wrap(a.inner.add(b.inner))
});

impl_binop!(Sub, sub, Vector4, Vector4, Vector4, |a, b| {
    Vector4::wrap(a.inner.sub(b.inner))
});

impl_binop!(Mul, mul, Vector4, Vector4, Vector4, |a, b| {
    Vector4::wrap(a.inner.mul(b.inner))
});

impl_binop!(Div, div, Vector4, Vector4, Vector4, |a, b| {
    Vector4::wrap(a.inner.div(b.inner))
});

impl_binop!(Mul, mul, Vector4, f32, Vector4, |a, b| {
    Vector4::wrap(a.inner.mul(F32x4::splat(*b)))
});

impl_binop!(Mul, mul, f32, Vector4, Vector4, |a, b| { b * *a });

impl_binop!(Div, div, Vector4, f32, Vector4, |a, b| {
    Vector4::wrap(a.inner.div(F32x4::splat(*b)))
});

impl_binop_assign!(AddAssign, add_assign, Vector4, Vector4, |a, b| {
    *a = *a + b;
});

impl_binop_assign!(SubAssign, sub_assign, Vector4, Vector4, |a, b| {
    *a = *a - b;
});

impl_binop_assign!(MulAssign, mul_assign, Vector4, Vector4, |a, b| {
    *a = *a * b;
});

impl_binop_assign!(DivAssign, div_assign, Vector4, Vector4, |a, b| {
    *a = *a / b;
});

impl_binop_assign!(MulAssign, mul_assign, Vector4, f32, |a, b| {
    *a = *a * b;
});

impl_binop_assign!(DivAssign, div_assign, Vector4, f32, |a, b| {
    *a = *a / b;
});

impl_unary_op!(Neg, neg, Vector4, Vector4, |val| {
    Vector4::wrap(val.inner.neg())
});

impl Index<usize> for Vector4 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.lanes()[index]
    }
}

impl IndexMut<usize> for Vector4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.lanes_mut()[index]
    }
}

impl_abs_diff_eq!(Vector4, |a, b, epsilon| {
    a.lanes()
        .iter()
        .zip(b.lanes())
        .all(|(a, b)| a.abs_diff_eq(b, epsilon))
});

impl_relative_eq!(Vector4, |a, b, epsilon, max_relative| {
    a.lanes()
        .iter()
        .zip(b.lanes())
        .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
});

impl fmt::Debug for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.to_array();
        f.debug_struct("Vector4")
            .field("x", &x)
            .field("y", &y)
            .field("z", &z)
            .field("w", &w)
            .finish()
    }
}

/// Returns the factor that normalizes a vector with the given norm, or
/// [`None`] if the norm is zero or not finite.
#[inline]
fn normalization_factor(norm: f32) -> Option<f32> {
    if norm == 0.0 || !norm.is_finite() {
        None
    } else {
        Some(1.0 / norm)
    }
}

/// Lane minimum with the same operand rule as [`F32x4Ops::min`]: `b` is
/// returned when the operands compare equal or either is NaN.
#[inline]
fn lane_min(a: f32, b: f32) -> f32 {
    if a < b { a } else { b }
}

/// Lane maximum, see [`lane_min`].
#[inline]
fn lane_max(a: f32, b: f32) -> f32 {
    if a > b { a } else { b }
}
