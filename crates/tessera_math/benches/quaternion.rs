use tessera_math::benchmark::benchmarks::quaternion;
use tessera_profiling::{benchmark::criterion, define_criterion_target};

define_criterion_target!(quaternion, mul_quaternion);
define_criterion_target!(quaternion, convert_quaternion_to_matrix);
define_criterion_target!(quaternion, rotate_vector3);

criterion::criterion_group!(
    name = benches;
    config = criterion::config();
    targets =
        mul_quaternion,
        convert_quaternion_to_matrix,
        rotate_vector3,
);
criterion::criterion_main!(benches);
