//! Segment-box intersection.

use tessera_math::vector::Vector3;

/// A line segment prepared for repeated intersection tests against
/// axis-aligned boxes.
///
/// Construction computes the reciprocal of each displacement component and
/// its sign once, so each subsequent [`Self::intersects_box`] call only
/// needs multiplications and comparisons. The segment cannot be modified
/// after construction and may be shared between threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineBoxSegment {
    origin: Vector3,
    displacement: Vector3,
    inverse_displacement: Vector3,
    signs: [usize; 3],
}

impl LineBoxSegment {
    /// Prepares the segment from `origin` to `origin + displacement`.
    ///
    /// A zero displacement component gives an infinite reciprocal with the
    /// sign of the zero, which the slab test handles without special cases.
    pub fn new(origin: Vector3, displacement: Vector3) -> Self {
        let inverse_displacement = displacement.mapped(f32::recip);
        let signs = [0, 1, 2].map(|axis| usize::from(inverse_displacement[axis] < 0.0));
        Self {
            origin,
            displacement,
            inverse_displacement,
            signs,
        }
    }

    /// The start point of the segment.
    #[inline]
    pub fn origin(&self) -> &Vector3 {
        &self.origin
    }

    /// The vector from the start point to the end point of the segment.
    #[inline]
    pub fn displacement(&self) -> &Vector3 {
        &self.displacement
    }

    /// The componentwise reciprocal of the displacement.
    #[inline]
    pub fn inverse_displacement(&self) -> &Vector3 {
        &self.inverse_displacement
    }

    /// For each axis, 1 if the displacement along the axis is negative and
    /// 0 otherwise. Used to index the near corner of a box.
    #[inline]
    pub fn signs(&self) -> [usize; 3] {
        self.signs
    }

    /// Whether the segment touches the axis-aligned box with the given lower
    /// and upper corners, using the slab method of Williams, Barrus, Morley
    /// and Shirley.
    ///
    /// The parametric interval in which the segment lies between the two
    /// planes of each axis is intersected with `[0, 1]`, and the segment hits
    /// the box if the result is non-empty. Touching a face counts as a hit.
    pub fn intersects_box(&self, corners: &[Vector3; 2]) -> bool {
        let mut t_min: f32 = 0.0;
        let mut t_max: f32 = 1.0;

        for axis in 0..3 {
            let sign = self.signs[axis];
            let origin = self.origin[axis];
            let inverse = self.inverse_displacement[axis];

            let t_near = (corners[sign][axis] - origin) * inverse;
            let t_far = (corners[1 - sign][axis] - origin) * inverse;

            if t_near > t_max || t_far < t_min {
                return false;
            }

            // A NaN (origin on a face plane with zero displacement along the
            // axis) leaves the interval unchanged
            t_min = t_min.max(t_near);
            t_max = t_max.min(t_far);
        }

        true
    }
}

/// Whether the segment from `o` to `o + d` touches the axis-aligned box
/// spanning `box_min` to `box_max`.
///
/// See [`LineBoxSegment`] for testing the same segment against many boxes.
pub fn intersect_line_box(o: &Vector3, d: &Vector3, box_min: &Vector3, box_max: &Vector3) -> bool {
    LineBoxSegment::new(*o, *d).intersects_box(&[*box_min, *box_max])
}
