//! Benchmarks.

use crate::{LineBoxSegment, intersect_line_box, intersect_line_triangle};
use std::hint::black_box;
use tessera_math::vector::Vector3;
use tessera_profiling::benchmark::Benchmarker;

pub fn intersect_segment_with_box(benchmarker: impl Benchmarker) {
    let (o, d) = create_segment();
    let [box_min, box_max] = create_box();
    benchmarker.benchmark(&mut || intersect_line_box(&black_box(o), &d, &box_min, &box_max));
}

pub fn intersect_prepared_segment_with_box(benchmarker: impl Benchmarker) {
    let (o, d) = create_segment();
    let segment = LineBoxSegment::new(o, d);
    let corners = create_box();
    benchmarker.benchmark(&mut || black_box(segment).intersects_box(&corners));
}

pub fn intersect_segment_with_triangle(benchmarker: impl Benchmarker) {
    let (o, d) = create_segment();
    let [v0, v1, v2] = black_box([
        Vector3::new(0.0, 0.0, 0.5),
        Vector3::new(1.0, 0.0, 0.5),
        Vector3::new(0.0, 1.0, 0.5),
    ]);
    benchmarker.benchmark(&mut || intersect_line_triangle(&black_box(o), &d, &v0, &v1, &v2));
}

fn create_segment() -> (Vector3, Vector3) {
    black_box((Vector3::new(-1.0, -0.5, -1.0), Vector3::new(2.0, 1.5, 3.0)))
}

fn create_box() -> [Vector3; 2] {
    black_box([Vector3::zeros(), Vector3::same(1.0)])
}
