use tessera_intersection::benchmark;
use tessera_profiling::{benchmark::criterion, define_criterion_target};

define_criterion_target!(benchmark, intersect_segment_with_box);
define_criterion_target!(benchmark, intersect_prepared_segment_with_box);
define_criterion_target!(benchmark, intersect_segment_with_triangle);

criterion::criterion_group!(
    name = benches;
    config = criterion::config();
    targets =
        intersect_segment_with_box,
        intersect_prepared_segment_with_box,
        intersect_segment_with_triangle,
);
criterion::criterion_main!(benches);
