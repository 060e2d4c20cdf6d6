pub mod benchmarks;

tessera_profiling::define_target_enum! {
    Target,
    crate::benchmark::benchmarks,
    vector => {
        add_scaled_vector4,
        dot_vector4,
        normalize_vector3,
    },
    matrix => {
        mul_matrix4_chain,
        invert_matrix4,
        transform_vector4,
    },
    quaternion => {
        mul_quaternion,
        convert_quaternion_to_matrix,
        rotate_vector3,
    },
    containers => {
        push_to_aligned_vec,
    }
}

pub fn benchmark(target: Target, duration: f64, delay: f64) {
    tessera_profiling::benchmark::benchmark(
        |benchmarker| target.execute(benchmarker),
        duration,
        delay,
    );
}
