//! SIMD-aware linear algebra: vectors, matrices and quaternions written once
//! against a four-lane float type whose implementation is chosen at build
//! time, plus angles, a seedable random generator and Gaussian kernels.

#[macro_use]
mod macros;

pub mod angle;
pub mod cpu;
pub mod gaussian;
pub mod matrix;
pub mod quaternion;
pub mod random;
pub mod simd;
pub mod vector;

#[cfg(feature = "benchmark")]
pub mod benchmark;
