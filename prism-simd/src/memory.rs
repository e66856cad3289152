// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Aligned memory for SIMD loads and stores.
//!
//! The aligned `*_load`/`*_store` operations require 16-byte aligned
//! addresses. `Vec<T>` only guarantees `align_of::<T>()`, so this module
//! provides an owned, zero-initialised buffer with an explicit alignment.
//!
//! # Usage
//!
//! ```rust
//! use prism_simd::memory::AlignedBuffer;
//! use prism_simd::simd::*;
//!
//! let mut buf = AlignedBuffer::<i32>::new(8).unwrap();
//! buf.copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
//!
//! // SAFETY: the buffer is 16-byte aligned and holds 8 elements
//! let v = unsafe { int32x4_load(buf.as_ptr().add(4)) };
//! assert_eq!(int32x4_to_array(v), [5, 6, 7, 8]);
//! ```

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use bytemuck::Pod;

use crate::{Error, Result};

/// Alignment of one 128-bit vector.
pub const DEFAULT_ALIGNMENT: usize = 16;

/// Owned, zero-initialised slice of `T` with a guaranteed start alignment.
pub struct AlignedBuffer<T: Pod> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
}

// SAFETY: the buffer owns its elements exclusively, like Vec<T>
unsafe impl<T: Pod + Send> Send for AlignedBuffer<T> {}
unsafe impl<T: Pod + Sync> Sync for AlignedBuffer<T> {}

impl<T: Pod> AlignedBuffer<T> {
    /// Allocate `len` zeroed elements aligned to [`DEFAULT_ALIGNMENT`].
    pub fn new(len: usize) -> Result<Self> {
        Self::with_alignment(len, DEFAULT_ALIGNMENT)
    }

    /// Allocate `len` zeroed elements aligned to `align` bytes.
    ///
    /// `align` must be a power of two. It is raised to `align_of::<T>()`
    /// when smaller.
    pub fn with_alignment(len: usize, align: usize) -> Result<Self> {
        if !align.is_power_of_two() {
            return Err(Error::InvalidAlignment(align));
        }
        let align = align.max(std::mem::align_of::<T>());

        let bytes = len
            .checked_mul(std::mem::size_of::<T>())
            .ok_or(Error::AllocationFailed { bytes: usize::MAX, align })?;

        // zero-sized allocations are not allowed; reserve one byte instead
        let layout = Layout::from_size_align(bytes.max(1), align)
            .map_err(|_| Error::AllocationFailed { bytes, align })?;

        // SAFETY: layout has a non-zero size
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw as *mut T).ok_or(Error::AllocationFailed { bytes, align })?;

        tracing::trace!(len, bytes, align, "allocated aligned buffer");

        Ok(Self { ptr, len, layout })
    }

    /// Allocate a buffer aligned to [`DEFAULT_ALIGNMENT`] holding a copy of `src`.
    pub fn from_slice(src: &[T]) -> Result<Self> {
        let mut buf = Self::new(src.len())?;
        buf.copy_from_slice(src);
        Ok(buf)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Alignment of the first element in bytes.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid for len initialised elements for the lifetime of self
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and &mut self guarantees exclusive access
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// View the elements as raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Mutable byte view of the elements.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(self.as_mut_slice())
    }
}

impl<T: Pod> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Pod> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Pod + fmt::Debug> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("align", &self.alignment())
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<T: Pod> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with this exact layout
        unsafe {
            dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_honoured() {
        for align in [16, 32, 64, 4096] {
            let buf = AlignedBuffer::<u8>::with_alignment(33, align).unwrap();
            assert_eq!(buf.as_ptr() as usize % align, 0, "align {}", align);
            assert_eq!(buf.alignment(), align);
        }
    }

    #[test]
    fn test_small_alignment_raised_to_element() {
        let buf = AlignedBuffer::<u64>::with_alignment(4, 1).unwrap();
        assert_eq!(buf.alignment(), std::mem::align_of::<u64>());
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(matches!(
            AlignedBuffer::<f32>::with_alignment(4, 24),
            Err(Error::InvalidAlignment(24))
        ));
        assert!(AlignedBuffer::<f32>::with_alignment(4, 0).is_err());
    }

    #[test]
    fn test_zeroed_and_writable() {
        let mut buf = AlignedBuffer::<f32>::new(64).unwrap();
        assert!(buf.iter().all(|&x| x == 0.0));

        buf[63] = 1.5;
        assert_eq!(buf.as_slice()[63], 1.5);
        assert_eq!(buf.as_bytes().len(), 64 * 4);
    }

    #[test]
    fn test_empty() {
        let buf = AlignedBuffer::<i32>::new(0).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.as_slice(), &[] as &[i32]);
    }

    #[test]
    fn test_overflow_is_error() {
        assert!(matches!(
            AlignedBuffer::<u64>::new(usize::MAX),
            Err(Error::AllocationFailed { .. })
        ));
    }

    #[test]
    fn test_from_slice() {
        let buf = AlignedBuffer::from_slice(&[1u8, 2, 3]).unwrap();
        assert_eq!(&buf[..], &[1, 2, 3]);
        assert_eq!(buf.as_ptr() as usize % DEFAULT_ALIGNMENT, 0);
    }
}
