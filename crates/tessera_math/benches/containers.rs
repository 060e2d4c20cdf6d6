use tessera_math::benchmark::benchmarks::containers;
use tessera_profiling::{benchmark::criterion, define_criterion_target};

define_criterion_target!(containers, push_to_aligned_vec, 50);

criterion::criterion_group!(
    name = benches;
    config = criterion::config();
    targets = push_to_aligned_vec,
);
criterion::criterion_main!(benches);
