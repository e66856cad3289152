// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! 4 x f32 operations on the active backend.
//!
//! Lane results are IEEE-754 single precision. `min`/`max` are defined as
//! selects (`a < b ? a : b`), so a NaN in either operand yields `b`.

use super::{Active, Float32x4Ops, Int32x4, SimdBackend};

/// 4 x f32 vector of the active backend.
pub type Float32x4 = <Active as SimdBackend>::Float32x4;

/// Reinterpret integer lanes as float bits.
#[inline]
pub fn float32x4_cast(s: Int32x4) -> Float32x4 {
    Active::float32x4_cast(s)
}

/// Convert each integer lane to the nearest float.
#[inline]
pub fn float32x4_convert(s: Int32x4) -> Float32x4 {
    Active::float32x4_convert(s)
}

#[inline]
pub fn float32x4_set_x(a: Float32x4, x: f32) -> Float32x4 {
    Active::float32x4_set_x(a, x)
}

#[inline]
pub fn float32x4_set_y(a: Float32x4, y: f32) -> Float32x4 {
    Active::float32x4_set_y(a, y)
}

#[inline]
pub fn float32x4_set_z(a: Float32x4, z: f32) -> Float32x4 {
    Active::float32x4_set_z(a, z)
}

#[inline]
pub fn float32x4_set_w(a: Float32x4, w: f32) -> Float32x4 {
    Active::float32x4_set_w(a, w)
}

#[inline]
pub fn float32x4_get_x(a: Float32x4) -> f32 {
    Active::float32x4_get_x(a)
}

#[inline]
pub fn float32x4_get_y(a: Float32x4) -> f32 {
    Active::float32x4_get_y(a)
}

#[inline]
pub fn float32x4_get_z(a: Float32x4) -> f32 {
    Active::float32x4_get_z(a)
}

#[inline]
pub fn float32x4_get_w(a: Float32x4) -> f32 {
    Active::float32x4_get_w(a)
}

/// Load 4 lanes from 16-byte aligned memory.
///
/// # Safety
///
/// `src` must be valid for reading 16 bytes and aligned to 16 bytes.
#[inline]
pub unsafe fn float32x4_load(src: *const f32) -> Float32x4 {
    unsafe { Active::float32x4_load(src) }
}

/// Load the first 4 elements of `src`. Panics if `src.len() < 4`.
#[inline]
pub fn float32x4_uload(src: &[f32]) -> Float32x4 {
    Active::float32x4_uload(src)
}

/// Store 4 lanes to 16-byte aligned memory.
///
/// # Safety
///
/// `dest` must be valid for writing 16 bytes and aligned to 16 bytes.
#[inline]
pub unsafe fn float32x4_store(dest: *mut f32, a: Float32x4) {
    unsafe { Active::float32x4_store(dest, a) }
}

/// Store into the first 4 elements of `dest`. Panics if `dest.len() < 4`.
#[inline]
pub fn float32x4_ustore(dest: &mut [f32], a: Float32x4) {
    Active::float32x4_ustore(dest, a)
}

#[inline]
pub fn float32x4_from_array(v: [f32; 4]) -> Float32x4 {
    Active::float32x4_from_array(v)
}

#[inline]
pub fn float32x4_to_array(a: Float32x4) -> [f32; 4] {
    Active::float32x4_to_array(a)
}

#[inline]
pub fn float32x4_zero() -> Float32x4 {
    Active::float32x4_zero()
}

#[inline]
pub fn float32x4_set1(s: f32) -> Float32x4 {
    Active::float32x4_set1(s)
}

#[inline]
pub fn float32x4_set4(x: f32, y: f32, z: f32, w: f32) -> Float32x4 {
    Active::float32x4_set4(x, y, z, w)
}

#[inline]
pub fn float32x4_neg(a: Float32x4) -> Float32x4 {
    Active::float32x4_neg(a)
}

#[inline]
pub fn float32x4_abs(a: Float32x4) -> Float32x4 {
    Active::float32x4_abs(a)
}

#[inline]
pub fn float32x4_add(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_add(a, b)
}

#[inline]
pub fn float32x4_sub(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_sub(a, b)
}

#[inline]
pub fn float32x4_mul(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_mul(a, b)
}

#[inline]
pub fn float32x4_div(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_div(a, b)
}

#[inline]
pub fn float32x4_sqrt(a: Float32x4) -> Float32x4 {
    Active::float32x4_sqrt(a)
}

/// `a + b * c` with two roundings.
#[inline]
pub fn float32x4_madd(a: Float32x4, b: Float32x4, c: Float32x4) -> Float32x4 {
    Active::float32x4_madd(a, b, c)
}

#[inline]
pub fn float32x4_min(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_min(a, b)
}

#[inline]
pub fn float32x4_max(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_max(a, b)
}

#[inline]
pub fn float32x4_and(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_and(a, b)
}

/// `b & !a` on the bit patterns.
#[inline]
pub fn float32x4_nand(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_nand(a, b)
}

#[inline]
pub fn float32x4_or(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_or(a, b)
}

#[inline]
pub fn float32x4_xor(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_xor(a, b)
}

#[inline]
pub fn float32x4_compare_eq(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_compare_eq(a, b)
}

/// True for unequal lanes and for any lane holding NaN.
#[inline]
pub fn float32x4_compare_neq(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_compare_neq(a, b)
}

#[inline]
pub fn float32x4_compare_lt(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_compare_lt(a, b)
}

#[inline]
pub fn float32x4_compare_le(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_compare_le(a, b)
}

#[inline]
pub fn float32x4_compare_gt(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_compare_gt(a, b)
}

#[inline]
pub fn float32x4_compare_ge(a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_compare_ge(a, b)
}

#[inline]
pub fn float32x4_select(mask: Float32x4, a: Float32x4, b: Float32x4) -> Float32x4 {
    Active::float32x4_select(mask, a, b)
}

/// Sign bit of each lane, lane i in bit i.
#[inline]
pub fn float32x4_get_mask(a: Float32x4) -> u32 {
    Active::float32x4_get_mask(a)
}
