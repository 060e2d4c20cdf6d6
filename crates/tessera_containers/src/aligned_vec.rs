//! A typed vector whose buffer honors a specified alignment.

use crate::Alignment;
use allocator_api2::alloc::{AllocError, Allocator, Global};
use std::{
    alloc::{self, Layout},
    cmp, fmt, mem,
    ops::{Deref, DerefMut},
    ptr::{self, NonNull},
    slice,
};
use thiserror::Error;

/// A container with similar functionality to [`Vec<T>`], but that guarantees
/// that the underlying memory block is aligned to a specified boundary that
/// may exceed the alignment of `T`.
///
/// The primary use is storing SIMD-eligible values contiguously with the
/// 16-byte alignment that 128-bit registers require, independent of what the
/// allocator would pick by default. All memory is obtained from the
/// [`Allocator`] `A` with an explicit [`Layout`].
///
/// The buffer address is aligned at all times, including when nothing has
/// been allocated. Growing the vector relocates the elements to a new buffer,
/// so references and pointers into the vector do not survive mutation.
pub struct AlignedVec<T: Copy, A: Allocator = Global> {
    layout: Layout,
    ptr: NonNull<T>,
    len: usize,
    alloc: A,
}

/// The reason an [`AlignedVec`] could not obtain the memory it needed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Required capacity of aligned vector exceeds `isize::MAX` bytes")]
    CapacityOverflow,

    #[error(
        "Allocator could not provide {} bytes with alignment {}",
        .layout.size(),
        .layout.align()
    )]
    AllocatorFailure { layout: Layout },
}

const MIN_NON_ZERO_CAPACITY: usize = 4;

impl<T: Copy> AlignedVec<T> {
    /// Constructs a new, empty [`AlignedVec`] whose buffer will be aligned to
    /// [`Alignment::SIMD`] or the alignment of `T`, whichever is largest.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Constructs a new, empty [`AlignedVec`] whose buffer will be aligned to
    /// the given alignment or the alignment of `T`, whichever is largest.
    pub fn with_alignment(alignment: Alignment) -> Self {
        Self::with_alignment_in(alignment, Global)
    }

    /// Constructs a new, empty [`AlignedVec`] with [`Alignment::SIMD`] and
    /// room for at least `capacity` elements.
    ///
    /// # Panics
    /// If the required number of bytes exceeds `isize::MAX`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut vec = Self::new();
        vec.reserve(capacity);
        vec
    }
}

impl<T: Copy, A: Allocator> AlignedVec<T, A> {
    /// Constructs a new, empty [`AlignedVec`] using the given allocator, with
    /// [`Alignment::SIMD`] or the alignment of `T`, whichever is largest.
    pub fn new_in(alloc: A) -> Self {
        Self::with_alignment_in(Alignment::SIMD, alloc)
    }

    /// Constructs a new, empty [`AlignedVec`] using the given allocator, with
    /// the given alignment or the alignment of `T`, whichever is largest.
    pub fn with_alignment_in(alignment: Alignment, alloc: A) -> Self {
        let alignment = alignment.max(Alignment::of::<T>());
        Self {
            // SAFETY:
            // - `Alignment` is guaranteed to hold a valid alignment.
            // - The passed size of zero never overflows `isize`.
            layout: unsafe { Layout::from_size_align_unchecked(0, alignment.get()) },
            ptr: Self::dangling(alignment),
            len: 0,
            alloc,
        }
    }

    /// Constructs a new, empty [`AlignedVec`] using the given allocator and
    /// alignment, with room for at least `capacity` elements.
    ///
    /// # Errors
    /// See [`AllocationError`].
    pub fn try_with_capacity_in(
        alignment: Alignment,
        capacity: usize,
        alloc: A,
    ) -> Result<Self, AllocationError> {
        let mut vec = Self::with_alignment_in(alignment, alloc);
        vec.try_reserve(capacity)?;
        Ok(vec)
    }

    /// Returns the alignment of the block of memory containing the elements.
    pub fn alignment(&self) -> Alignment {
        Alignment::of_layout(self.layout)
    }

    /// Returns the number of elements the vector can hold without
    /// reallocating.
    pub fn capacity(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            self.layout.size() / mem::size_of::<T>()
        }
    }

    /// Returns the number of elements in the vector.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the underlying allocator.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Extracts a slice containing the entire vector.
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Extracts a mutable slice of the entire vector.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Returns a raw pointer to the vector's buffer. The pointer is aligned
    /// to [`Self::alignment`] even if the vector has not allocated.
    ///
    /// Modifying the vector may cause its buffer to be reallocated, which
    /// would make the pointer invalid.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a raw mutable pointer to the vector's buffer. The pointer is
    /// aligned to [`Self::alignment`] even if the vector has not allocated.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Panics
    /// If the required number of bytes exceeds `isize::MAX`. Allocation
    /// failure aborts through [`alloc::handle_alloc_error`].
    pub fn push(&mut self, value: T) {
        handle_allocation_result(self.try_push(value));
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Errors
    /// See [`AllocationError`]. The vector is left unchanged on failure.
    pub fn try_push(&mut self, value: T) -> Result<(), AllocationError> {
        self.try_reserve(1)?;
        unsafe {
            // SAFETY: We just reserved room for at least one more element
            self.ptr.as_ptr().add(self.len).write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes the last element from the vector and returns it, or [`None`]
    /// if it is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: The element at the old last index is initialized
            Some(unsafe { self.ptr.as_ptr().add(self.len).read() })
        }
    }

    /// Shortens the vector, keeping the first `len` elements. Has no effect
    /// if `len` is not smaller than the current length. The capacity is not
    /// affected.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// Removes all elements while keeping the capacity.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Resizes the vector in-place so that its length equals `new_len`,
    /// filling any new slots with `value`.
    ///
    /// # Panics
    /// See [`Self::push`].
    pub fn resize(&mut self, new_len: usize, value: T) {
        handle_allocation_result(self.try_resize(new_len, value));
    }

    /// Resizes the vector in-place so that its length equals `new_len`,
    /// filling any new slots with `value`.
    ///
    /// # Errors
    /// See [`AllocationError`]. The vector is left unchanged on failure.
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), AllocationError> {
        if new_len > self.len {
            let n_additional = new_len - self.len;
            self.try_reserve(n_additional)?;
            for idx in self.len..new_len {
                unsafe {
                    // SAFETY: `idx` is below the reserved capacity
                    self.ptr.as_ptr().add(idx).write(value);
                }
            }
            self.len = new_len;
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Resizes the vector in-place so that its length equals `new_len`,
    /// filling any new slots with the default value of `T`.
    ///
    /// # Panics
    /// See [`Self::push`].
    pub fn resize_with_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize(new_len, T::default());
    }

    /// Appends a copy of all the elements in the given slice.
    ///
    /// # Panics
    /// See [`Self::push`].
    pub fn extend_from_slice(&mut self, other: &[T]) {
        handle_allocation_result(self.try_extend_from_slice(other));
    }

    /// Appends a copy of all the elements in the given slice.
    ///
    /// # Errors
    /// See [`AllocationError`]. The vector is left unchanged on failure.
    pub fn try_extend_from_slice(&mut self, other: &[T]) -> Result<(), AllocationError> {
        if !other.is_empty() {
            self.try_reserve(other.len())?;
            unsafe {
                // SAFETY:
                // The memory blocks are guaranteed to be nonoverlapping since
                // `self` is borrowed mutably (so `other` is not from the same
                // memory), and we just reserved room for `other`
                ptr::copy_nonoverlapping(
                    other.as_ptr(),
                    self.ptr.as_ptr().add(self.len),
                    other.len(),
                );
            }
            self.len += other.len();
        }
        Ok(())
    }

    /// Ensures room for at least `n_additional` more elements.
    ///
    /// # Panics
    /// See [`Self::push`].
    pub fn reserve(&mut self, n_additional: usize) {
        handle_allocation_result(self.try_reserve(n_additional));
    }

    /// Ensures room for at least `n_additional` more elements. If the
    /// current capacity is insufficient, a new buffer of at least twice the
    /// current capacity is allocated and the elements are moved into it.
    ///
    /// # Errors
    /// See [`AllocationError`]. The vector is left unchanged on failure.
    pub fn try_reserve(&mut self, n_additional: usize) -> Result<(), AllocationError> {
        let required_capacity = self
            .len
            .checked_add(n_additional)
            .ok_or(AllocationError::CapacityOverflow)?;

        let old_capacity = self.capacity();

        if required_capacity <= old_capacity {
            return Ok(());
        }

        let new_minimum_capacity = cmp::max(
            cmp::max(required_capacity, MIN_NON_ZERO_CAPACITY),
            old_capacity.saturating_mul(2),
        );

        let new_layout = self.layout_for_capacity(new_minimum_capacity)?;

        let new_ptr = self
            .alloc
            .allocate(new_layout)
            .map_err(|AllocError| AllocationError::AllocatorFailure { layout: new_layout })?
            .cast::<T>();

        tessera_log::trace!(
            "Growing aligned vector from {} to {} bytes with alignment {}",
            self.layout.size(),
            new_layout.size(),
            new_layout.align()
        );

        if self.layout.size() != 0 {
            unsafe {
                // SAFETY:
                // - The new block is freshly allocated, so it cannot overlap
                //   the old one.
                // - The old block holds `len` initialized elements and was
                //   allocated by `self.alloc` with `self.layout`.
                ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
                self.alloc.deallocate(self.ptr.cast(), self.layout);
            }
        }

        self.layout = new_layout;
        self.ptr = new_ptr;

        Ok(())
    }

    fn layout_for_capacity(&self, capacity: usize) -> Result<Layout, AllocationError> {
        let alignment = self.alignment();

        let size = capacity
            .checked_mul(mem::size_of::<T>())
            .and_then(|size| alignment.round_up(size))
            .ok_or(AllocationError::CapacityOverflow)?;

        Layout::from_size_align(size, alignment.get())
            .map_err(|_layout_error| AllocationError::CapacityOverflow)
    }

    fn dangling(alignment: Alignment) -> NonNull<T> {
        // SAFETY: An `Alignment` is never zero
        unsafe { NonNull::new_unchecked(ptr::without_provenance_mut(alignment.get())) }
    }
}

fn handle_allocation_result(result: Result<(), AllocationError>) {
    match result {
        Ok(()) => {}
        Err(AllocationError::CapacityOverflow) => panic!("capacity overflow"),
        Err(AllocationError::AllocatorFailure { layout }) => alloc::handle_alloc_error(layout),
    }
}

// SAFETY: The buffer is uniquely owned, so sending or sharing the vector is
// as safe as sending or sharing the elements and the allocator
unsafe impl<T: Copy + Send, A: Allocator + Send> Send for AlignedVec<T, A> {}
unsafe impl<T: Copy + Sync, A: Allocator + Sync> Sync for AlignedVec<T, A> {}

impl<T: Copy, A: Allocator> Drop for AlignedVec<T, A> {
    fn drop(&mut self) {
        // If we have any allocated memory, we must deallocate it manually
        if self.layout.size() != 0 {
            unsafe {
                self.alloc.deallocate(self.ptr.cast(), self.layout);
            }
        }
    }
}

impl<T: Copy, A: Allocator> Deref for AlignedVec<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: `ptr` is non-null and aligned, and the first `len` elements
        // are initialized
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy, A: Allocator> DerefMut for AlignedVec<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy, A: Allocator + Clone> Clone for AlignedVec<T, A> {
    fn clone(&self) -> Self {
        let mut cloned = Self::with_alignment_in(self.alignment(), self.alloc.clone());
        cloned.extend_from_slice(self);
        cloned
    }
}

impl<T: Copy> Default for AlignedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + fmt::Debug, A: Allocator> fmt::Debug for AlignedVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Copy + PartialEq, A: Allocator> PartialEq for AlignedVec<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self[..] == other[..]
    }
}

impl<T: Copy + PartialEq, A: Allocator> PartialEq<[T]> for AlignedVec<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self[..] == *other
    }
}

impl<T: Copy, A: Allocator> Extend<T> for AlignedVec<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Copy> FromIterator<T> for AlignedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<'a, T: Copy, A: Allocator> IntoIterator for &'a AlignedVec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Copy, A: Allocator> IntoIterator for &'a mut AlignedVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
