//! Intersection tests between line segments and triangles or axis-aligned
//! boxes.
//!
//! A segment is given by its start point `o` and the displacement `d` from
//! the start point to the end point, so the parameter `t` in `o + t * d`
//! runs from 0 to 1 along the segment.

mod line_box;
mod line_triangle;

#[cfg(feature = "benchmark")]
pub mod benchmark;

pub use line_box::{LineBoxSegment, intersect_line_box};
pub use line_triangle::intersect_line_triangle;
