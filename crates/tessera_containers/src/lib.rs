//! Containers and data structures.

mod aligned_vec;
mod alignment;

pub use aligned_vec::{AlignedVec, AllocationError};
pub use alignment::Alignment;

pub use allocator_api2::alloc::{AllocError, Allocator, Global};
