use crate::vector::{Vector3, Vector4};
use std::hint::black_box;
use tessera_profiling::benchmark::Benchmarker;

pub fn add_scaled_vector4(benchmarker: impl Benchmarker) {
    let mut a = create_vector4();
    let b = create_vector4();
    let scale = black_box(0.5);
    benchmarker.benchmark(&mut || {
        a += scale * b;
        a
    });
}

pub fn dot_vector4(benchmarker: impl Benchmarker) {
    let a = create_vector4();
    let b = create_vector4();
    benchmarker.benchmark(&mut || black_box(a).dot(&b));
}

pub fn normalize_vector3(benchmarker: impl Benchmarker) {
    let a = black_box(Vector3::new(1.0, -2.0, 3.0));
    benchmarker.benchmark(&mut || black_box(a).normalized());
}

fn create_vector4() -> Vector4 {
    black_box(Vector4::new(1.0, 2.0, 3.0, 4.0))
}
