//! Matrices.

use crate::{
    angle::Angle,
    quaternion::Quaternion,
    simd::{F32x4, F32x4Ops},
    vector::{Vector3, Vector4},
};
use bytemuck::{Pod, Zeroable};

/// A 4x4 matrix stored as four column vectors.
///
/// Products compose right to left, so `a * b` applied to a vector applies `b`
/// first. Each column is stored in a 128-bit SIMD register, giving the matrix
/// a size of 64 bytes and an alignment of 16 bytes.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "[f32; 16]", from = "[f32; 16]")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct Matrix4 {
    columns: [Vector4; 4],
}

impl Matrix4 {
    /// Creates the identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self::from_scalar_diagonal(1.0)
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self::from_columns(
            Vector4::zeros(),
            Vector4::zeros(),
            Vector4::zeros(),
            Vector4::zeros(),
        )
    }

    /// Creates a diagonal matrix with the given vector as the diagonal.
    #[inline]
    pub fn from_diagonal(diagonal: &Vector4) -> Self {
        Self::from_columns(
            Vector4::new(diagonal.x(), 0.0, 0.0, 0.0),
            Vector4::new(0.0, diagonal.y(), 0.0, 0.0),
            Vector4::new(0.0, 0.0, diagonal.z(), 0.0),
            Vector4::new(0.0, 0.0, 0.0, diagonal.w()),
        )
    }

    /// Creates a diagonal matrix with the given value for every diagonal
    /// element.
    #[inline]
    pub fn from_scalar_diagonal(value: f32) -> Self {
        Self::from_diagonal(&Vector4::same(value))
    }

    /// Creates a matrix with the given columns.
    #[inline]
    pub const fn from_columns(
        column_0: Vector4,
        column_1: Vector4,
        column_2: Vector4,
        column_3: Vector4,
    ) -> Self {
        Self {
            columns: [column_0, column_1, column_2, column_3],
        }
    }

    /// Creates a matrix rotating by `angle` radians about the given unit
    /// axis, following the right-hand rule.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let one_minus_cos = 1.0 - cos;

        let (x, y, z) = (axis.x(), axis.y(), axis.z());
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (x_sin, y_sin, z_sin) = (x * sin, y * sin, z * sin);

        Self::from_columns(
            Vector4::new(
                xx * one_minus_cos + cos,
                xy * one_minus_cos + z_sin,
                xz * one_minus_cos - y_sin,
                0.0,
            ),
            Vector4::new(
                xy * one_minus_cos - z_sin,
                yy * one_minus_cos + cos,
                yz * one_minus_cos + x_sin,
                0.0,
            ),
            Vector4::new(
                xz * one_minus_cos + y_sin,
                yz * one_minus_cos - x_sin,
                zz * one_minus_cos + cos,
                0.0,
            ),
            Vector4::unit_w(),
        )
    }

    /// Creates a matrix rotating by `angle` radians about the x-axis.
    pub fn rotation_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_columns(
            Vector4::unit_x(),
            Vector4::new(0.0, cos, sin, 0.0),
            Vector4::new(0.0, -sin, cos, 0.0),
            Vector4::unit_w(),
        )
    }

    /// Creates a matrix rotating by `angle` radians about the y-axis.
    pub fn rotation_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_columns(
            Vector4::new(cos, 0.0, -sin, 0.0),
            Vector4::unit_y(),
            Vector4::new(sin, 0.0, cos, 0.0),
            Vector4::unit_w(),
        )
    }

    /// Creates a matrix rotating by `angle` radians about the z-axis.
    pub fn rotation_z(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_columns(
            Vector4::new(cos, sin, 0.0, 0.0),
            Vector4::new(-sin, cos, 0.0, 0.0),
            Vector4::unit_z(),
            Vector4::unit_w(),
        )
    }

    /// Creates a homogeneous transform translating by the given vector.
    #[inline]
    pub fn from_translation(translation: &Vector3) -> Self {
        let mut m = Self::identity();
        m.columns[3] = translation.extended(1.0);
        m
    }

    /// Creates a homogeneous transform scaling each axis by the corresponding
    /// component of the given vector.
    #[inline]
    pub fn from_scaling(scaling: &Vector3) -> Self {
        Self::from_diagonal(&scaling.extended(1.0))
    }

    /// Creates a homogeneous transform scaling all axes by the given factor.
    #[inline]
    pub fn from_uniform_scaling(scaling: f32) -> Self {
        Self::from_scaling(&Vector3::same(scaling))
    }

    /// Creates the rotation matrix corresponding to the given unit
    /// quaternion.
    pub fn from_quaternion(quaternion: &Quaternion) -> Self {
        let (x, y, z, w) = (quaternion.x(), quaternion.y(), quaternion.z(), quaternion.w());
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Self::from_columns(
            Vector4::new(
                1.0 - 2.0 * (yy + zz),
                2.0 * (xy + wz),
                2.0 * (xz - wy),
                0.0,
            ),
            Vector4::new(
                2.0 * (xy - wz),
                1.0 - 2.0 * (xx + zz),
                2.0 * (yz + wx),
                0.0,
            ),
            Vector4::new(
                2.0 * (xz + wy),
                2.0 * (yz - wx),
                1.0 - 2.0 * (xx + yy),
                0.0,
            ),
            Vector4::unit_w(),
        )
    }

    /// Creates a right-handed view transform for a camera at `eye` looking
    /// towards `target`, with `up` giving the approximate upward direction.
    /// The camera looks down its negative z-axis.
    pub fn look_at_rh(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let forward = (target - eye).normalized();
        let right = forward.cross(up).normalized();
        let camera_up = right.cross(&forward);

        Self::from_columns(
            Vector4::new(right.x(), camera_up.x(), -forward.x(), 0.0),
            Vector4::new(right.y(), camera_up.y(), -forward.y(), 0.0),
            Vector4::new(right.z(), camera_up.z(), -forward.z(), 0.0),
            Vector4::new(
                -right.dot(eye),
                -camera_up.dot(eye),
                forward.dot(eye),
                1.0,
            ),
        )
    }

    /// Creates a right-handed perspective projection with the given vertical
    /// field of view, aspect ratio (width over height) and distances to the
    /// near and far clipping planes.
    ///
    /// View-space depths between `-near` and `-far` map to clip-space depths
    /// between 0 and 1 after the perspective divide.
    pub fn perspective_fov_rh(
        vertical_field_of_view: impl Angle,
        aspect_ratio: f32,
        near_distance: f32,
        far_distance: f32,
    ) -> Self {
        let (sin, cos) = (0.5 * vertical_field_of_view.radians()).sin_cos();
        let y_scale = cos / sin;
        let x_scale = y_scale / aspect_ratio;
        let depth_scale = far_distance / (near_distance - far_distance);

        Self::from_columns(
            Vector4::new(x_scale, 0.0, 0.0, 0.0),
            Vector4::new(0.0, y_scale, 0.0, 0.0),
            Vector4::new(0.0, 0.0, depth_scale, -1.0),
            Vector4::new(0.0, 0.0, depth_scale * near_distance, 0.0),
        )
    }

    /// Creates the smallest rotation taking the unit vector `from` onto the
    /// unit vector `to`. When the vectors point in opposite directions, the
    /// result rotates by pi about an axis perpendicular to `from`.
    pub fn from_to_rotation(from: &Vector3, to: &Vector3) -> Self {
        let cos_angle = from.dot(to);

        if cos_angle < -0.9 {
            return Self::from_to_rotation_by_reflections(from, to);
        }

        let axis = from.cross(to);
        let h = 1.0 / (1.0 + cos_angle);
        let (x, y, z) = (axis.x(), axis.y(), axis.z());
        let (hxy, hxz, hyz) = (h * x * y, h * x * z, h * y * z);

        Self::from_columns(
            Vector4::new(cos_angle + h * x * x, hxy + z, hxz - y, 0.0),
            Vector4::new(hxy - z, cos_angle + h * y * y, hyz + x, 0.0),
            Vector4::new(hxz + y, hyz - x, cos_angle + h * z * z, 0.0),
            Vector4::unit_w(),
        )
    }

    /// Builds the rotation from `from` to `to` as the product of two
    /// reflections through a cardinal axis that is far from parallel to
    /// either vector. Stays accurate when the vectors are (nearly)
    /// antiparallel.
    fn from_to_rotation_by_reflections(from: &Vector3, to: &Vector3) -> Self {
        let axis = least_aligned_cardinal_axis(from);
        let u = axis - from;
        let v = axis - to;

        let uu = u.norm_squared();
        let vv = v.norm_squared();
        let uv = u.dot(&v);

        let c_u = 2.0 / uu;
        let c_v = 2.0 / vv;
        let c_vu = 4.0 * uv / (uu * vv);

        let mut m = Self::identity();
        for i in 0..3 {
            for j in 0..3 {
                *m.element_mut(i, j) -= c_u * u[i] * u[j] + c_v * v[i] * v[j] - c_vu * v[i] * u[j];
            }
        }
        m
    }

    /// Returns a reference to column `j`.
    ///
    /// # Panics
    /// If `j` is outside the matrix.
    #[inline]
    pub fn column(&self, j: usize) -> &Vector4 {
        &self.columns[j]
    }

    /// Replaces column `j` with the given vector.
    ///
    /// # Panics
    /// If `j` is outside the matrix.
    #[inline]
    pub fn set_column(&mut self, j: usize, column: Vector4) {
        self.columns[j] = column;
    }

    /// Returns the element at row `i` and column `j`.
    ///
    /// # Panics
    /// If the indices are outside the matrix.
    #[inline]
    pub fn element(&self, i: usize, j: usize) -> f32 {
        self.columns[j][i]
    }

    /// Returns a mutable reference to the element at row `i` and column `j`.
    ///
    /// # Panics
    /// If the indices are outside the matrix.
    #[inline]
    pub fn element_mut(&mut self, i: usize, j: usize) -> &mut f32 {
        &mut self.columns[j][i]
    }

    /// Returns the diagonal of this matrix as a vector.
    #[inline]
    pub fn diagonal(&self) -> Vector4 {
        Vector4::new(
            self.element(0, 0),
            self.element(1, 1),
            self.element(2, 2),
            self.element(3, 3),
        )
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transposed(&self) -> Self {
        let [c0, c1, c2, c3] = F32x4::transpose4(self.columns.map(Vector4::unwrap));
        Self::from_columns(
            Vector4::wrap(c0),
            Vector4::wrap(c1),
            Vector4::wrap(c2),
            Vector4::wrap(c3),
        )
    }

    /// Computes the determinant of this matrix by cofactor expansion along
    /// the first column.
    pub fn determinant(&self) -> f32 {
        let [
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ] = self.to_column_arrays();

        // Two-by-two minors of the last two columns
        let a2323 = m22 * m33 - m23 * m32;
        let a1323 = m21 * m33 - m23 * m31;
        let a1223 = m21 * m32 - m22 * m31;
        let a0323 = m20 * m33 - m23 * m30;
        let a0223 = m20 * m32 - m22 * m30;
        let a0123 = m20 * m31 - m21 * m30;

        m00 * (m11 * a2323 - m12 * a1323 + m13 * a1223)
            - m01 * (m10 * a2323 - m12 * a0323 + m13 * a0223)
            + m02 * (m10 * a1323 - m11 * a0323 + m13 * a0123)
            - m03 * (m10 * a1223 - m11 * a0223 + m12 * a0123)
    }

    /// Returns the inverse of this matrix. If the matrix is not invertible, the
    /// result will be non-finite.
    #[inline]
    pub fn inverted(&self) -> Self {
        let (adjugate, determinant) = self.adjugate_and_determinant();
        adjugate * (1.0 / determinant)
    }

    /// Returns the inverse of this matrix, or [`None`] if the determinant is
    /// zero or not finite.
    #[inline]
    pub fn try_inverted(&self) -> Option<Self> {
        let (adjugate, determinant) = self.adjugate_and_determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            None
        } else {
            Some(adjugate * (1.0 / determinant))
        }
    }

    /// Computes the adjugate (transposed cofactor matrix) together with the
    /// determinant, which is the dot product of the first row of the matrix
    /// with the first column of the adjugate.
    fn adjugate_and_determinant(&self) -> (Self, f32) {
        let [
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ] = self.to_column_arrays();

        let coef00 = m22 * m33 - m32 * m23;
        let coef02 = m12 * m33 - m32 * m13;
        let coef03 = m12 * m23 - m22 * m13;

        let coef04 = m21 * m33 - m31 * m23;
        let coef06 = m11 * m33 - m31 * m13;
        let coef07 = m11 * m23 - m21 * m13;

        let coef08 = m21 * m32 - m31 * m22;
        let coef10 = m11 * m32 - m31 * m12;
        let coef11 = m11 * m22 - m21 * m12;

        let coef12 = m20 * m33 - m30 * m23;
        let coef14 = m10 * m33 - m30 * m13;
        let coef15 = m10 * m23 - m20 * m13;

        let coef16 = m20 * m32 - m30 * m22;
        let coef18 = m10 * m32 - m30 * m12;
        let coef19 = m10 * m22 - m20 * m12;

        let coef20 = m20 * m31 - m30 * m21;
        let coef22 = m10 * m31 - m30 * m11;
        let coef23 = m10 * m21 - m20 * m11;

        let fac0 = F32x4::new(coef00, coef00, coef02, coef03);
        let fac1 = F32x4::new(coef04, coef04, coef06, coef07);
        let fac2 = F32x4::new(coef08, coef08, coef10, coef11);
        let fac3 = F32x4::new(coef12, coef12, coef14, coef15);
        let fac4 = F32x4::new(coef16, coef16, coef18, coef19);
        let fac5 = F32x4::new(coef20, coef20, coef22, coef23);

        let vec0 = F32x4::new(m10, m00, m00, m00);
        let vec1 = F32x4::new(m11, m01, m01, m01);
        let vec2 = F32x4::new(m12, m02, m02, m02);
        let vec3 = F32x4::new(m13, m03, m03, m03);

        let inv0 = vec1.mul(fac0).sub(vec2.mul(fac1)).add(vec3.mul(fac2));
        let inv1 = vec0.mul(fac0).sub(vec2.mul(fac3)).add(vec3.mul(fac4));
        let inv2 = vec0.mul(fac1).sub(vec1.mul(fac3)).add(vec3.mul(fac5));
        let inv3 = vec0.mul(fac2).sub(vec1.mul(fac4)).add(vec2.mul(fac5));

        let sign_a = F32x4::new(1.0, -1.0, 1.0, -1.0);
        let sign_b = F32x4::new(-1.0, 1.0, -1.0, 1.0);

        let adjugate = Self::from_columns(
            Vector4::wrap(inv0.mul(sign_a)),
            Vector4::wrap(inv1.mul(sign_b)),
            Vector4::wrap(inv2.mul(sign_a)),
            Vector4::wrap(inv3.mul(sign_b)),
        );

        let adjugate_column_0 = Vector4::new(
            adjugate.element(0, 0),
            adjugate.element(0, 1),
            adjugate.element(0, 2),
            adjugate.element(0, 3),
        );
        let determinant = self.columns[0].dot(&adjugate_column_0);

        (adjugate, determinant)
    }

    /// Returns a matrix with the given closure applied to each element.
    #[inline]
    pub fn mapped(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            columns: self.columns.map(|column| column.mapped(&f)),
        }
    }

    /// Returns the largest absolute difference between corresponding
    /// elements of this and another matrix.
    pub fn max_abs_difference(&self, other: &Self) -> f32 {
        self.columns
            .iter()
            .zip(&other.columns)
            .map(|(a, b)| (a - b).component_abs().max_component())
            .fold(0.0, f32::max)
    }

    /// Transforms the given point, treating it as having a w-component of 1
    /// and discarding the resulting w-component.
    #[inline]
    pub fn transform_point(&self, point: &Vector3) -> Vector3 {
        (self * point.extended(1.0)).xyz()
    }

    /// Transforms the given direction vector, treating it as having a
    /// w-component of 0 so that translation does not apply.
    #[inline]
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        (self * vector.extended(0.0)).xyz()
    }

    /// Transforms the given point with a w-component of 1 and performs the
    /// perspective divide.
    #[inline]
    pub fn project_point(&self, point: &Vector3) -> Vector3 {
        let projected = self * point.extended(1.0);
        projected.xyz() / projected.w()
    }

    /// Returns the elements as an array of columns.
    #[inline]
    pub fn to_column_arrays(&self) -> [[f32; 4]; 4] {
        self.columns.map(|column| column.to_array())
    }

    #[inline]
    fn transform(&self, vector: F32x4) -> F32x4 {
        let [c0, c1, c2, c3] = self.columns.map(Vector4::unwrap);
        c0.mul(vector.splat_x())
            .add(c1.mul(vector.splat_y()))
            .add(c2.mul(vector.splat_z()))
            .add(c3.mul(vector.splat_w()))
    }
}

fn least_aligned_cardinal_axis(vector: &Vector3) -> Vector3 {
    let abs = vector.component_abs();
    if abs.x() <= abs.y() && abs.x() <= abs.z() {
        Vector3::unit_x()
    } else if abs.y() <= abs.z() {
        Vector3::unit_y()
    } else {
        Vector3::unit_z()
    }
}

impl From<[f32; 16]> for Matrix4 {
    #[inline]
    fn from(elements: [f32; 16]) -> Self {
        bytemuck::cast(elements)
    }
}

impl From<Matrix4> for [f32; 16] {
    #[inline]
    fn from(m: Matrix4) -> Self {
        bytemuck::cast(m)
    }
}

impl_binop!(Mul, mul, Matrix4, Matrix4, Matrix4, |a, b| {
    Matrix4 {
        columns: b
            .columns
            .map(|column| Vector4::wrap(a.transform(column.unwrap()))),
    }
});

impl_binop!(Mul, mul, Matrix4, Vector4, Vector4, |a, b| {
    Vector4::wrap(a.transform(b.unwrap()))
});

impl_binop!(Mul, mul, Matrix4, f32, Matrix4, |a, b| {
    Matrix4 {
        columns: a.columns.map(|column| column * *b),
    }
});

impl_binop!(Mul, mul, f32, Matrix4, Matrix4, |a, b| { b * *a });

impl_binop!(Add, add, Matrix4, Matrix4, Matrix4, |a, b| {
    let mut sum = *a;
    sum += b;
    sum
});

impl_binop!(Sub, sub, Matrix4, Matrix4, Matrix4, |a, b| {
    let mut difference = *a;
    difference -= b;
    difference
});

impl_binop_assign!(AddAssign, add_assign, Matrix4, Matrix4, |a, b| {
    for (a, b) in a.columns.iter_mut().zip(&b.columns) {
        *a += b;
    }
});

impl_binop_assign!(SubAssign, sub_assign, Matrix4, Matrix4, |a, b| {
    for (a, b) in a.columns.iter_mut().zip(&b.columns) {
        *a -= b;
    }
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4, Matrix4, |a, b| {
    *a = *a * b;
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4, f32, |a, b| {
    *a = *a * b;
});

impl_unary_op!(Neg, neg, Matrix4, Matrix4, |val| {
    Matrix4 {
        columns: val.columns.map(|column| -column),
    }
});

impl_abs_diff_eq!(Matrix4, |a, b, epsilon| {
    a.columns
        .iter()
        .zip(&b.columns)
        .all(|(a, b)| a.abs_diff_eq(b, epsilon))
});

impl_relative_eq!(Matrix4, |a, b, epsilon, max_relative| {
    a.columns
        .iter()
        .zip(&b.columns)
        .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
});

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use crate::{
        angle::{Degrees, Radians},
        random::Random,
    };
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-6;

    fn unit_vector3() -> impl Strategy<Value = Vector3> {
        prop::array::uniform3(-1.0_f32..1.0)
            .prop_filter("vector too short to normalize", |v| {
                Vector3::from(*v).norm() > 1e-2
            })
            .prop_map(|v| Vector3::from(v).normalized())
    }

    fn well_conditioned_matrix() -> impl Strategy<Value = Matrix4> {
        (prop::array::uniform16(-1.0_f32..1.0), 2.0_f32..4.0).prop_map(|(elements, diagonal)| {
            Matrix4::from(elements) + Matrix4::from_scalar_diagonal(diagonal)
        })
    }

    fn random_matrix(seed: u64) -> Matrix4 {
        let mut rng = Random::new(seed);
        let mut m = Matrix4::zeros();
        for idx in 0..16 {
            *m.element_mut(idx & 3, idx / 4) = rng.random_float();
        }
        m
    }

    fn to_nalgebra(m: &Matrix4) -> nalgebra::Matrix4<f32> {
        nalgebra::Matrix4::from_column_slice(&<[f32; 16]>::from(*m))
    }

    #[test]
    fn creating_identity_gives_identity_matrix() {
        let identity = Matrix4::identity();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(identity.element(i, j), if i == j { 1.0 } else { 0.0 });
            }
        }
        assert_eq!(identity.diagonal(), Vector4::same(1.0));
    }

    #[test]
    fn matrix_has_simd_layout() {
        assert_eq!(std::mem::size_of::<Matrix4>(), 64);
        assert_eq!(std::mem::align_of::<Matrix4>(), 16);
    }

    #[test]
    fn matrix_elements_are_column_major() {
        let elements: [f32; 16] = std::array::from_fn(|idx| idx as f32);
        let m = Matrix4::from(elements);
        assert_eq!(m.element(1, 0), 1.0);
        assert_eq!(m.element(0, 1), 4.0);
        assert_eq!(m.column(2), &Vector4::new(8.0, 9.0, 10.0, 11.0));
        assert_eq!(<[f32; 16]>::from(m), elements);
    }

    #[test]
    fn setting_columns_and_elements_works() {
        let mut m = Matrix4::zeros();
        m.set_column(1, Vector4::new(1.0, 2.0, 3.0, 4.0));
        *m.element_mut(3, 2) = 5.0;
        assert_eq!(m.element(2, 1), 3.0);
        assert_eq!(m.column(2).w(), 5.0);
    }

    #[test]
    fn transposing_matrix_swaps_rows_and_columns() {
        let m = Matrix4::from(std::array::from_fn(|idx| idx as f32));
        let transposed = m.transposed();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(transposed.element(i, j), m.element(j, i));
            }
        }
        assert_eq!(transposed.transposed(), m);
    }

    #[test]
    fn multiplying_by_identity_gives_same_matrix() {
        let m = random_matrix(3);
        assert_eq!(m * Matrix4::identity(), m);
        assert_eq!(Matrix4::identity() * m, m);
    }

    #[test]
    fn matrix_arithmetic_operations_work() {
        let m = random_matrix(5);
        assert_eq!(&m + &m, 2.0 * &m);
        assert_eq!(&m - &m, Matrix4::zeros());
        assert_eq!(-&m + &m, Matrix4::zeros());
        assert_eq!(&m * 2.0, m.mapped(|x| x * 2.0));

        let mut product = m;
        product *= Matrix4::identity();
        product *= 3.0;
        assert_eq!(product, m * 3.0);
    }

    #[test]
    fn projecting_point_through_camera_gives_expected_clip_coordinates() {
        let projection =
            Matrix4::perspective_fov_rh(Degrees(60.0), 640.0 / 480.0, 0.01, 10000.0);
        let view = Matrix4::look_at_rh(
            &Vector3::new(0.0, 0.0, 200.0),
            &Vector3::zeros(),
            &Vector3::unit_y(),
        );
        let world = Matrix4::identity();

        let point = Vector4::new(-43.9114, -39.4834, 0.0, 1.0);

        let mut v1 = projection * (view * world) * point;
        v1 *= 1.0 / v1.w();
        let mut v2 = projection * view * world * point;
        v2 = v2 * (1.0 / v2.w());

        assert!(v1.distance(&v2) < 1e-6);

        let expected = Vector4::new(-0.285213, -0.341936, 0.999951, 1.0);
        assert!(expected.distance(&v1) < 1e-5);

        assert_abs_diff_eq!(
            (projection * view).project_point(&point.xyz()),
            v1.xyz(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn view_and_projection_matrices_match_glam() {
        let eye = Vector3::new(1.0, -2.0, 3.0);
        let target = Vector3::new(-4.0, 0.5, 0.0);
        let up = Vector3::new(0.1, 1.0, 0.2);

        let view = Matrix4::look_at_rh(&eye, &target, &up);
        let glam_view = glam::Mat4::look_at_rh(
            glam::Vec3::from(<[f32; 3]>::from(eye)),
            glam::Vec3::from(<[f32; 3]>::from(target)),
            glam::Vec3::from(<[f32; 3]>::from(up)),
        );
        assert_abs_diff_eq!(
            view,
            Matrix4::from(glam_view.to_cols_array()),
            epsilon = 1e-5
        );

        let projection = Matrix4::perspective_fov_rh(Radians(1.2), 1.5, 0.1, 100.0);
        let glam_projection = glam::Mat4::perspective_rh(1.2, 1.5, 0.1, 100.0);
        assert_abs_diff_eq!(
            projection,
            Matrix4::from(glam_projection.to_cols_array()),
            epsilon = 1e-5
        );
    }

    #[test]
    fn from_to_rotation_maps_x_onto_y_and_z() {
        let v0 = Vector4::unit_x();

        let v1 = Vector4::unit_y();
        let rotated = Matrix4::from_to_rotation(&v0.xyz(), &v1.xyz()) * v0;
        assert!(v1.distance(&rotated) < 1e-5);

        let v1 = Vector4::unit_z();
        let rotated = Matrix4::from_to_rotation(&v0.xyz(), &v1.xyz()) * v0;
        assert!(v1.distance(&rotated) < 1e-5);
    }

    #[test]
    fn from_to_rotation_handles_antiparallel_vectors() {
        let from = Vector3::new(1.0, 2.0, 3.0).normalized();
        let to = -from;
        let rotation = Matrix4::from_to_rotation(&from, &to);

        assert!(rotation.transform_vector(&from).distance(&to) < 1e-5);
        assert_abs_diff_eq!(rotation.determinant(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(
            rotation * rotation.transposed(),
            Matrix4::identity(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn from_to_rotation_of_same_vector_gives_identity() {
        let v = Vector3::new(0.0, 0.6, 0.8);
        assert_abs_diff_eq!(
            Matrix4::from_to_rotation(&v, &v),
            Matrix4::identity(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn determinant_of_seeded_random_matrix_matches_reference() {
        let m = random_matrix(1234);
        assert_abs_diff_eq!(m.determinant(), -0.093_612_998_7, epsilon = 1e-12);
        assert_abs_diff_eq!(m.determinant(), to_nalgebra(&m).determinant(), epsilon = 1e-6);
    }

    #[test]
    fn determinant_of_simple_matrices_works() {
        assert_eq!(Matrix4::identity().determinant(), 1.0);
        assert_eq!(Matrix4::zeros().determinant(), 0.0);
        assert_eq!(
            Matrix4::from_diagonal(&Vector4::new(1.0, 2.0, 3.0, 4.0)).determinant(),
            24.0
        );
    }

    #[test]
    fn inverting_rigid_transform_works() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_to_rotation(
                &Vector3::new(1.0, 2.0, 3.0).normalized(),
                &Vector3::new(4.0, 1.0, 3.0).normalized(),
            );
        let inverse = m.inverted();

        assert_abs_diff_eq!(inverse * m, Matrix4::identity(), epsilon = 1e-5);
        assert_abs_diff_eq!(m * inverse, Matrix4::identity(), epsilon = 1e-5);
        assert_abs_diff_eq!(m.try_inverted().unwrap(), inverse);
    }

    #[test]
    fn inverting_seeded_random_matrix_matches_nalgebra() {
        let m = random_matrix(1234);
        let expected = to_nalgebra(&m).try_inverse().unwrap();
        let inverse = m.inverted();
        assert_abs_diff_eq!(
            inverse,
            Matrix4::from(<[f32; 16]>::try_from(expected.as_slice()).unwrap()),
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(inverse * m, Matrix4::identity(), epsilon = 1e-4);
    }

    #[test]
    fn inverting_singular_matrix_gives_non_finite_result() {
        let singular = Matrix4::from_scaling(&Vector3::new(1.0, 0.0, 1.0));
        assert!(singular.try_inverted().is_none());
        assert!(
            singular
                .inverted()
                .to_column_arrays()
                .as_flattened()
                .iter()
                .any(|x| !x.is_finite())
        );
        assert!(Matrix4::zeros().try_inverted().is_none());
    }

    #[test]
    fn cardinal_rotations_match_axis_angle_rotations() {
        let angle = Degrees(80.0).radians();
        let pairs = [
            (Matrix4::from_axis_angle(&Vector3::unit_x(), angle), Matrix4::rotation_x(angle)),
            (Matrix4::from_axis_angle(&Vector3::unit_y(), angle), Matrix4::rotation_y(angle)),
            (Matrix4::from_axis_angle(&Vector3::unit_z(), angle), Matrix4::rotation_z(angle)),
        ];
        for (axis_angle, cardinal) in pairs {
            assert!(axis_angle.max_abs_difference(&cardinal) < 1e-3);
        }
    }

    #[test]
    fn rotating_vector_matches_rotation_matrix() {
        let angle = Degrees(45.0).radians();
        let v = Vector4::new(10.0, 10.0, 0.0, 0.0);

        let r1 = v.xyz().rotated_about_z(angle);
        let r2 = (Matrix4::rotation_z(angle) * v).xyz();
        assert!((r1 - r2).norm() < 1e-5);

        let r1 = v.xyz().rotated_about_x(angle);
        let r2 = (Matrix4::rotation_x(angle) * v).xyz();
        assert!((r1 - r2).norm() < 1e-5);

        let r1 = v.xyz().rotated_about_y(angle);
        let r2 = (Matrix4::rotation_y(angle) * v).xyz();
        assert!((r1 - r2).norm() < 1e-5);
    }

    #[test]
    fn transforming_points_and_vectors_works() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_uniform_scaling(2.0);
        let v = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(m.transform_point(&v), Vector3::new(3.0, 4.0, 5.0));
        assert_eq!(m.transform_vector(&v), Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(m.project_point(&v), m.transform_point(&v));
    }

    #[test]
    fn max_abs_difference_finds_largest_deviation() {
        let mut m = Matrix4::identity();
        *m.element_mut(2, 3) = -0.5;
        *m.element_mut(1, 1) = 1.25;
        assert_eq!(m.max_abs_difference(&Matrix4::identity()), 0.5);
        assert_eq!(m.max_abs_difference(&m), 0.0);
    }

    proptest! {
        #[test]
        fn from_to_rotation_maps_from_onto_to(from in unit_vector3(), to in unit_vector3()) {
            let rotation = Matrix4::from_to_rotation(&from, &to);
            prop_assert!(rotation.transform_vector(&from).distance(&to) < 1e-5);
            prop_assert!(abs_diff_eq!(rotation.determinant(), 1.0, epsilon = 1e-4));
        }

        #[test]
        fn from_to_rotation_maps_vector_onto_its_negation(from in unit_vector3()) {
            let rotation = Matrix4::from_to_rotation(&from, &-from);
            prop_assert!(rotation.transform_vector(&from).distance(&-from) < 1e-5);
        }

        #[test]
        fn matrix_product_is_associative(
            a in well_conditioned_matrix(),
            b in well_conditioned_matrix(),
            c in well_conditioned_matrix(),
        ) {
            prop_assert!(abs_diff_eq!((a * b) * c, a * (b * c), epsilon = 1e-3));
        }

        #[test]
        fn inverse_times_matrix_gives_identity(m in well_conditioned_matrix()) {
            prop_assert!(abs_diff_eq!(m.inverted() * m, Matrix4::identity(), epsilon = 1e-4));
        }

        #[test]
        fn determinant_matches_nalgebra(m in well_conditioned_matrix()) {
            let expected = to_nalgebra(&m).determinant();
            prop_assert!(abs_diff_eq!(m.determinant(), expected, epsilon = 1e-3 * expected.abs().max(1.0)));
        }

        #[test]
        fn axis_angle_rotation_preserves_lengths(axis in unit_vector3(), angle in -10.0_f32..10.0) {
            let rotation = Matrix4::from_axis_angle(&axis, angle);
            let v = Vector3::new(1.0, -2.0, 0.5);
            prop_assert!(abs_diff_eq!(rotation.transform_vector(&v).norm(), v.norm(), epsilon = 1e-5));
            prop_assert!(rotation.transform_vector(&axis).distance(&axis) < 1e-5);
        }
    }
}
