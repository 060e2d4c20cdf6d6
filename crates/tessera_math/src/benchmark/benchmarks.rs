//! Benchmarks.

pub mod containers;
pub mod matrix;
pub mod quaternion;
pub mod vector;
