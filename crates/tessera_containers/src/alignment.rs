//! Memory alignment.

use anyhow::{Result, bail};
use std::{alloc::Layout, mem};

/// A valid pointer address alignment, guaranteed to be non-zero
/// and a power of two.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alignment(usize);

impl Alignment {
    pub const ONE: Self = Self(1);
    pub const TWO: Self = Self(2);
    pub const FOUR: Self = Self(4);
    pub const EIGHT: Self = Self(8);
    pub const SIXTEEN: Self = Self(16);
    pub const THIRTY_TWO: Self = Self(32);

    /// The alignment required by 128-bit SIMD registers holding four `f32`s.
    pub const SIMD: Self = Self::SIXTEEN;

    /// Wraps the given alignment in an [`Alignment`].
    ///
    /// # Errors
    /// Returns an error if `alignment` is zero or not a power of two.
    pub fn try_new(alignment: usize) -> Result<Self> {
        if !alignment.is_power_of_two() {
            bail!("`Alignment` created with invalid alignment: {}", alignment)
        } else {
            Ok(Self(alignment))
        }
    }

    /// Wraps the given alignment in an [`Alignment`].
    ///
    /// # Panics
    /// If `alignment` is zero or not a power of two.
    pub fn new(alignment: usize) -> Self {
        Self::try_new(alignment).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Creates a new [`Alignment`] corresponding to the alignment of
    /// type `T`.
    pub const fn of<T>() -> Self {
        Self(mem::align_of::<T>())
    }

    /// Returns the alignment as a [`usize`].
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Whether the given number is a multiple of this alignment.
    pub const fn is_aligned(&self, number: usize) -> bool {
        number & (self.0 - 1) == 0
    }

    /// Whether the given pointer's address is a multiple of this alignment.
    pub fn is_aligned_ptr<T>(&self, ptr: *const T) -> bool {
        self.is_aligned(ptr.addr())
    }

    /// Returns the larger of the two alignments.
    pub const fn max(self, other: Self) -> Self {
        if self.0 >= other.0 { self } else { other }
    }

    /// Rounds the given size up to the nearest multiple of this alignment, or
    /// returns [`None`] on overflow.
    pub const fn round_up(&self, size: usize) -> Option<usize> {
        match size.checked_add(self.0 - 1) {
            Some(padded) => Some(padded & !(self.0 - 1)),
            None => None,
        }
    }

    pub(crate) fn of_layout(layout: Layout) -> Self {
        Self(layout.align())
    }
}

impl From<Alignment> for usize {
    fn from(alignment: Alignment) -> Self {
        alignment.0
    }
}

impl TryFrom<usize> for Alignment {
    type Error = anyhow::Error;

    fn try_from(alignment: usize) -> Result<Self> {
        Self::try_new(alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn creating_alignment_with_zero_alignment_fails() {
        Alignment::new(0);
    }

    #[test]
    #[should_panic]
    fn creating_alignment_with_non_power_of_two_alignment_fails() {
        Alignment::new(3);
    }

    #[test]
    fn trying_to_create_invalid_alignment_gives_error() {
        assert!(Alignment::try_new(0).is_err());
        assert!(Alignment::try_new(12).is_err());
        assert!(Alignment::try_from(24).is_err());
    }

    #[test]
    fn creating_alignment_of_type_works() {
        assert_eq!(Alignment::of::<u8>(), Alignment::ONE);
        assert_eq!(Alignment::of::<f32>(), Alignment::FOUR);
        assert_eq!(Alignment::of::<u64>().get(), std::mem::align_of::<u64>());
    }

    #[test]
    fn checking_alignment_of_numbers_works() {
        assert!(Alignment::SIXTEEN.is_aligned(0));
        assert!(Alignment::SIXTEEN.is_aligned(32));
        assert!(!Alignment::SIXTEEN.is_aligned(8));
        assert!(Alignment::ONE.is_aligned(7));
    }

    #[test]
    fn taking_max_of_alignments_works() {
        assert_eq!(Alignment::FOUR.max(Alignment::SIXTEEN), Alignment::SIXTEEN);
        assert_eq!(Alignment::SIXTEEN.max(Alignment::FOUR), Alignment::SIXTEEN);
    }

    #[test]
    fn rounding_up_to_alignment_works() {
        assert_eq!(Alignment::SIXTEEN.round_up(0), Some(0));
        assert_eq!(Alignment::SIXTEEN.round_up(1), Some(16));
        assert_eq!(Alignment::SIXTEEN.round_up(16), Some(16));
        assert_eq!(Alignment::SIXTEEN.round_up(17), Some(32));
        assert_eq!(Alignment::SIXTEEN.round_up(usize::MAX), None);
    }
}
