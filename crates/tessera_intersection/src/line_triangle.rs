//! Segment-triangle intersection.

use tessera_math::vector::Vector3;

/// The segment is taken to be parallel to the plane of the triangle when the
/// determinant is at most this fraction of `|edge_1| |edge_2| |d|`, its
/// largest possible magnitude. Being relative, the test does not depend on
/// the scale of the triangle or the length of the segment.
const RELATIVE_PARALLEL_EPSILON: f32 = 1e-6;

/// Finds where the segment from `o` to `o + d` crosses the triangle with
/// vertices `v0`, `v1` and `v2`, using the Möller-Trumbore algorithm.
///
/// Returns the segment parameter `t` in `[0, 1]` of the crossing point, or
/// [`None`] if the segment is parallel to the plane of the triangle, passes
/// outside the triangle or ends before reaching it. Both windings of the
/// triangle are hit.
pub fn intersect_line_triangle(
    o: &Vector3,
    d: &Vector3,
    v0: &Vector3,
    v1: &Vector3,
    v2: &Vector3,
) -> Option<f32> {
    let edge_1 = v1 - v0;
    let edge_2 = v2 - v0;

    let p = d.cross(&edge_2);
    let determinant = edge_1.dot(&p);

    let max_determinant = edge_1.norm() * edge_2.norm() * d.norm();
    if !determinant.is_finite() || determinant.abs() <= RELATIVE_PARALLEL_EPSILON * max_determinant
    {
        return None;
    }
    let inverse_determinant = 1.0 / determinant;

    let s = o - v0;
    let u = s.dot(&p) * inverse_determinant;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge_1);
    let v = d.dot(&q) * inverse_determinant;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge_2.dot(&q) * inverse_determinant;
    if (0.0..=1.0).contains(&t) {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;

    fn unit_triangle() -> [Vector3; 3] {
        [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ]
    }

    fn intersect_unit_triangle(o: Vector3, d: Vector3) -> Option<f32> {
        let [v0, v1, v2] = unit_triangle();
        intersect_line_triangle(&o, &d, &v0, &v1, &v2)
    }

    #[test]
    fn segment_through_triangle_interior_hits() {
        let t = intersect_unit_triangle(
            Vector3::new(0.25, 0.25, 1.0),
            Vector3::new(0.0, 0.0, -2.0),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 0.5);
    }

    #[test]
    fn segment_hits_triangle_from_both_sides() {
        let from_above = intersect_unit_triangle(
            Vector3::new(0.2, 0.2, 1.0),
            Vector3::new(0.0, 0.0, -4.0),
        );
        let from_below = intersect_unit_triangle(
            Vector3::new(0.2, 0.2, -1.0),
            Vector3::new(0.0, 0.0, 4.0),
        );
        assert_abs_diff_eq!(from_above.unwrap(), 0.25);
        assert_abs_diff_eq!(from_below.unwrap(), 0.25);
    }

    #[test]
    fn segment_passing_outside_triangle_misses() {
        assert!(
            intersect_unit_triangle(
                Vector3::new(0.8, 0.8, 1.0),
                Vector3::new(0.0, 0.0, -2.0)
            )
            .is_none()
        );
        assert!(
            intersect_unit_triangle(
                Vector3::new(-0.1, 0.5, 1.0),
                Vector3::new(0.0, 0.0, -2.0)
            )
            .is_none()
        );
    }

    #[test]
    fn segment_parallel_to_triangle_plane_misses() {
        assert!(
            intersect_unit_triangle(
                Vector3::new(-1.0, 0.25, 0.0),
                Vector3::new(3.0, 0.0, 0.0)
            )
            .is_none()
        );
        assert!(
            intersect_unit_triangle(
                Vector3::new(-1.0, 0.25, 1.0),
                Vector3::new(3.0, 0.0, 0.0)
            )
            .is_none()
        );
    }

    #[test]
    fn segment_ending_before_triangle_misses() {
        assert!(
            intersect_unit_triangle(
                Vector3::new(0.25, 0.25, 2.0),
                Vector3::new(0.0, 0.0, -1.0)
            )
            .is_none()
        );
    }

    #[test]
    fn segment_starting_beyond_triangle_misses() {
        assert!(
            intersect_unit_triangle(
                Vector3::new(0.25, 0.25, -1.0),
                Vector3::new(0.0, 0.0, -1.0)
            )
            .is_none()
        );
    }

    #[test]
    fn segment_ending_exactly_on_triangle_hits_at_end() {
        let t = intersect_unit_triangle(
            Vector3::new(0.25, 0.25, 1.0),
            Vector3::new(0.0, 0.0, -1.0),
        );
        assert_eq!(t, Some(1.0));
    }

    #[test]
    fn segment_through_triangle_vertex_hits() {
        let t = intersect_unit_triangle(Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, -2.0));
        assert_abs_diff_eq!(t.unwrap(), 0.5);
    }

    #[test]
    fn short_segment_through_small_triangle_hits() {
        let v0 = Vector3::new(0.0, 0.0, 0.0);
        let v1 = Vector3::new(0.01, 0.0, 0.0);
        let v2 = Vector3::new(0.0, 0.01, 0.0);
        let t = intersect_line_triangle(
            &Vector3::new(0.002, 0.002, 0.0002),
            &Vector3::new(0.0, 0.0, -0.0005),
            &v0,
            &v1,
            &v2,
        );
        assert_abs_diff_eq!(t.unwrap(), 0.4, epsilon = 1e-5);
    }

    #[test]
    fn zero_length_segment_misses() {
        assert!(intersect_unit_triangle(Vector3::new(0.25, 0.25, 0.0), Vector3::zeros()).is_none());
    }

    #[test]
    fn segment_nearly_in_triangle_plane_is_parallel_at_any_scale() {
        for scale in [1e-3_f32, 1.0, 1e3] {
            let [v0, v1, v2] = unit_triangle().map(|v| v * scale);
            let o = Vector3::new(-1.0, 0.25, 1e-8) * scale;
            let d = Vector3::new(3.0, 0.0, -1e-8) * scale;
            assert!(intersect_line_triangle(&o, &d, &v0, &v1, &v2).is_none());
        }
    }

    proptest! {
        #[test]
        fn intersection_point_lies_in_triangle_plane_and_interior(
            u in 0.05_f32..0.95,
            v_fraction in 0.05_f32..0.95,
            height in 0.1_f32..10.0,
            depth in 0.1_f32..10.0,
            tilt in prop::array::uniform2(-1.0_f32..1.0),
        ) {
            let v = v_fraction * (1.0 - u);
            let target = Vector3::new(u, v, 0.0);
            let o = target + Vector3::new(tilt[0], tilt[1], height);
            let end = target - Vector3::new(tilt[0], tilt[1], height) * (depth / height);
            let d = end - o;

            let t = intersect_unit_triangle(o, d).unwrap();
            let expected_t = height / (height + depth);
            prop_assert!(abs_diff_eq!(t, expected_t, epsilon = 1e-4));

            let hit = o + d * t;
            prop_assert!(abs_diff_eq!(hit, target, epsilon = 1e-3));
        }

        #[test]
        fn segment_on_one_side_of_plane_misses(
            start in prop::array::uniform3(-2.0_f32..2.0),
            end in prop::array::uniform3(-2.0_f32..2.0),
        ) {
            let o = Vector3::new(start[0], start[1], start[2].abs() + 0.01);
            let end = Vector3::new(end[0], end[1], end[2].abs() + 0.01);
            prop_assert!(intersect_unit_triangle(o, end - o).is_none());
        }
    }
}
