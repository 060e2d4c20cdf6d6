use crate::{
    matrix::Matrix4,
    random::Random,
    vector::{Vector3, Vector4},
};
use std::hint::black_box;
use tessera_profiling::benchmark::Benchmarker;

pub fn mul_matrix4_chain(benchmarker: impl Benchmarker) {
    let a = create_matrix4(0);
    let b = create_matrix4(1);
    let c = create_matrix4(2);
    benchmarker.benchmark(&mut || black_box(a) * b * c);
}

pub fn invert_matrix4(benchmarker: impl Benchmarker) {
    let a = create_rigid_transform();
    benchmarker.benchmark(&mut || black_box(a).inverted());
}

pub fn transform_vector4(benchmarker: impl Benchmarker) {
    let a = create_matrix4(3);
    let v = black_box(Vector4::new(1.0, 2.0, 3.0, 1.0));
    benchmarker.benchmark(&mut || black_box(a) * v);
}

fn create_matrix4(seed: u64) -> Matrix4 {
    let mut rng = Random::new(seed);
    let mut m = Matrix4::zeros();
    for idx in 0..16 {
        *m.element_mut(idx & 3, idx / 4) = rng.random_float();
    }
    black_box(m)
}

fn create_rigid_transform() -> Matrix4 {
    black_box(
        Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_to_rotation(
                &Vector3::new(1.0, 2.0, 3.0).normalized(),
                &Vector3::new(4.0, 1.0, 3.0).normalized(),
            ),
    )
}
