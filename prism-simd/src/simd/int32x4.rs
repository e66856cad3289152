// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! 4 x i32 operations on the active backend.
//!
//! Every function forwards to [`Active`] and inlines to the native
//! instruction sequence. Integer arithmetic wraps; see [`Int32x4Ops`] for the
//! per-operation contracts shared by all backends.

use super::{Active, Float32x4, Int32x4Ops, SimdBackend};

/// 4 x i32 vector of the active backend.
pub type Int32x4 = <Active as SimdBackend>::Int32x4;

// ----------------------------------------------------------------------------
// conversion
// ----------------------------------------------------------------------------

/// Reinterpret float lanes as integer bits.
#[inline]
pub fn int32x4_cast(s: Float32x4) -> Int32x4 {
    Active::int32x4_cast(s)
}

/// Round to nearest with ties away from zero (2.5 -> 3, -2.5 -> -3).
///
/// Out-of-range lanes saturate to `i32::MIN`/`i32::MAX` and NaN becomes 0.
#[inline]
pub fn int32x4_convert(s: Float32x4) -> Int32x4 {
    Active::int32x4_convert(s)
}

/// Truncate toward zero, saturating like [`int32x4_convert`].
#[inline]
pub fn int32x4_truncate(s: Float32x4) -> Int32x4 {
    Active::int32x4_truncate(s)
}

// ----------------------------------------------------------------------------
// lanes
// ----------------------------------------------------------------------------

#[inline]
pub fn int32x4_set_x(a: Int32x4, x: i32) -> Int32x4 {
    Active::int32x4_set_x(a, x)
}

#[inline]
pub fn int32x4_set_y(a: Int32x4, y: i32) -> Int32x4 {
    Active::int32x4_set_y(a, y)
}

#[inline]
pub fn int32x4_set_z(a: Int32x4, z: i32) -> Int32x4 {
    Active::int32x4_set_z(a, z)
}

#[inline]
pub fn int32x4_set_w(a: Int32x4, w: i32) -> Int32x4 {
    Active::int32x4_set_w(a, w)
}

#[inline]
pub fn int32x4_get_x(a: Int32x4) -> i32 {
    Active::int32x4_get_x(a)
}

#[inline]
pub fn int32x4_get_y(a: Int32x4) -> i32 {
    Active::int32x4_get_y(a)
}

#[inline]
pub fn int32x4_get_z(a: Int32x4) -> i32 {
    Active::int32x4_get_z(a)
}

#[inline]
pub fn int32x4_get_w(a: Int32x4) -> i32 {
    Active::int32x4_get_w(a)
}

// ----------------------------------------------------------------------------
// memory
// ----------------------------------------------------------------------------

/// Load 4 lanes from 16-byte aligned memory.
///
/// Use [`AlignedBuffer`](crate::memory::AlignedBuffer) to obtain storage
/// that satisfies the alignment contract.
///
/// # Safety
///
/// `src` must be valid for reading 16 bytes and aligned to 16 bytes.
#[inline]
pub unsafe fn int32x4_load(src: *const i32) -> Int32x4 {
    unsafe { Active::int32x4_load(src) }
}

/// Load the first 4 elements of `src` from any address.
///
/// # Panics
///
/// Panics if `src.len() < 4`.
#[inline]
pub fn int32x4_uload(src: &[i32]) -> Int32x4 {
    Active::int32x4_uload(src)
}

/// Store 4 lanes to 16-byte aligned memory.
///
/// # Safety
///
/// `dest` must be valid for writing 16 bytes and aligned to 16 bytes.
#[inline]
pub unsafe fn int32x4_store(dest: *mut i32, a: Int32x4) {
    unsafe { Active::int32x4_store(dest, a) }
}

/// Store into the first 4 elements of `dest`.
///
/// # Panics
///
/// Panics if `dest.len() < 4`.
#[inline]
pub fn int32x4_ustore(dest: &mut [i32], a: Int32x4) {
    Active::int32x4_ustore(dest, a)
}

#[inline]
pub fn int32x4_from_array(v: [i32; 4]) -> Int32x4 {
    Active::int32x4_from_array(v)
}

#[inline]
pub fn int32x4_to_array(a: Int32x4) -> [i32; 4] {
    Active::int32x4_to_array(a)
}

// ----------------------------------------------------------------------------
// construction
// ----------------------------------------------------------------------------

#[inline]
pub fn int32x4_zero() -> Int32x4 {
    Active::int32x4_zero()
}

/// Broadcast `s` into every lane.
#[inline]
pub fn int32x4_set1(s: i32) -> Int32x4 {
    Active::int32x4_set1(s)
}

/// Build from lanes, `x` lowest.
#[inline]
pub fn int32x4_set4(x: i32, y: i32, z: i32, w: i32) -> Int32x4 {
    Active::int32x4_set4(x, y, z, w)
}

// ----------------------------------------------------------------------------
// arithmetic
// ----------------------------------------------------------------------------

#[inline]
pub fn int32x4_neg(a: Int32x4) -> Int32x4 {
    Active::int32x4_neg(a)
}

#[inline]
pub fn int32x4_add(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_add(a, b)
}

#[inline]
pub fn int32x4_sub(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_sub(a, b)
}

/// Low 32 bits of each lane product.
#[inline]
pub fn int32x4_mullo(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_mullo(a, b)
}

/// Wrapping absolute value.
#[inline]
pub fn int32x4_abs(a: Int32x4) -> Int32x4 {
    Active::int32x4_abs(a)
}

#[inline]
pub fn int32x4_min(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_min(a, b)
}

#[inline]
pub fn int32x4_max(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_max(a, b)
}

// ----------------------------------------------------------------------------
// logical
// ----------------------------------------------------------------------------

#[inline]
pub fn int32x4_and(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_and(a, b)
}

/// `b & !a`. Note the operand order: `a` is complemented.
#[inline]
pub fn int32x4_nand(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_nand(a, b)
}

#[inline]
pub fn int32x4_or(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_or(a, b)
}

#[inline]
pub fn int32x4_xor(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_xor(a, b)
}

#[inline]
pub fn int32x4_not(a: Int32x4) -> Int32x4 {
    Active::int32x4_not(a)
}

// ----------------------------------------------------------------------------
// shift
// ----------------------------------------------------------------------------

/// Logical left shift by the immediate `N` (`0..32`, checked at compile time).
#[inline]
pub fn int32x4_sll<const N: i32>(a: Int32x4) -> Int32x4 {
    const { assert!(N >= 0 && N < 32, "shift count must be in 0..32") };
    Active::int32x4_sll::<N>(a)
}

/// Logical right shift by the immediate `N` (`0..32`, checked at compile time).
#[inline]
pub fn int32x4_srl<const N: i32>(a: Int32x4) -> Int32x4 {
    const { assert!(N >= 0 && N < 32, "shift count must be in 0..32") };
    Active::int32x4_srl::<N>(a)
}

/// Arithmetic right shift by the immediate `N` (`0..32`, checked at compile time).
#[inline]
pub fn int32x4_sra<const N: i32>(a: Int32x4) -> Int32x4 {
    const { assert!(N >= 0 && N < 32, "shift count must be in 0..32") };
    Active::int32x4_sra::<N>(a)
}

/// Logical left shift by a runtime count. Counts of 32 or more yield zero.
#[inline]
pub fn int32x4_sll_var(a: Int32x4, count: u32) -> Int32x4 {
    Active::int32x4_sll_var(a, count)
}

/// Logical right shift by a runtime count. Counts of 32 or more yield zero.
#[inline]
pub fn int32x4_srl_var(a: Int32x4, count: u32) -> Int32x4 {
    Active::int32x4_srl_var(a, count)
}

/// Arithmetic right shift by a runtime count. Counts of 32 or more fill
/// every bit with the sign.
#[inline]
pub fn int32x4_sra_var(a: Int32x4, count: u32) -> Int32x4 {
    Active::int32x4_sra_var(a, count)
}

// ----------------------------------------------------------------------------
// compare
// ----------------------------------------------------------------------------

#[inline]
pub fn int32x4_compare_eq(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_compare_eq(a, b)
}

/// Strict `a > b`; equal lanes are false.
#[inline]
pub fn int32x4_compare_gt(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_compare_gt(a, b)
}

#[inline]
pub fn int32x4_compare_lt(a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_compare_lt(a, b)
}

/// Take bits of `a` where `mask` is set and bits of `b` elsewhere.
#[inline]
pub fn int32x4_select(mask: Int32x4, a: Int32x4, b: Int32x4) -> Int32x4 {
    Active::int32x4_select(mask, a, b)
}

/// Fold lanes into a 4-bit mask: `(x & 1) | (y & 2) | (z & 4) | (w & 8)`.
///
/// On comparison results this is bit i set iff lane i is true.
#[inline]
pub fn int32x4_get_mask(a: Int32x4) -> u32 {
    Active::int32x4_get_mask(a)
}

// ----------------------------------------------------------------------------
// pack
// ----------------------------------------------------------------------------

/// Clamp lanes to `0..=255` and pack them into bytes, `x` in the lowest byte.
#[inline]
pub fn int32x4_pack(s: Int32x4) -> u32 {
    Active::int32x4_pack(s)
}

/// Zero-extend the 4 bytes of `s` into lanes, lowest byte into `x`.
#[inline]
pub fn int32x4_unpack(s: u32) -> Int32x4 {
    Active::int32x4_unpack(s)
}
