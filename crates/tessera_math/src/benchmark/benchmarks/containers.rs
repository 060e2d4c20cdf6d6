use crate::vector::Vector4;
use tessera_containers::AlignedVec;
use tessera_profiling::benchmark::Benchmarker;

/// Pushes a fixed number of vectors into a fresh 16-byte aligned vector,
/// including all reallocations on the way.
pub fn push_to_aligned_vec(benchmarker: impl Benchmarker) {
    benchmarker.benchmark(&mut || {
        let mut values = AlignedVec::new();
        for idx in 0..1024 {
            values.push(Vector4::same(idx as f32));
        }
        values
    });
}
