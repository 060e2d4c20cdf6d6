use crate::{quaternion::Quaternion, vector::Vector3};
use std::hint::black_box;
use tessera_profiling::benchmark::Benchmarker;

pub fn mul_quaternion(benchmarker: impl Benchmarker) {
    let a = create_quaternion(&Vector3::unit_x());
    let b = create_quaternion(&Vector3::unit_y());
    benchmarker.benchmark(&mut || black_box(a) * b);
}

pub fn convert_quaternion_to_matrix(benchmarker: impl Benchmarker) {
    let a = create_quaternion(&Vector3::unit_z());
    benchmarker.benchmark(&mut || black_box(a).to_matrix());
}

pub fn rotate_vector3(benchmarker: impl Benchmarker) {
    let a = create_quaternion(&Vector3::unit_y());
    let v = black_box(Vector3::new(1.0, 2.0, 3.0));
    benchmarker.benchmark(&mut || black_box(a).rotate_vector(&v));
}

fn create_quaternion(axis: &Vector3) -> Quaternion {
    black_box(Quaternion::from_axis_angle(axis, 1.2))
}
