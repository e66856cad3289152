// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Portable 128-bit SIMD vector math.
//!
//! This module provides one vector API over several instruction sets:
//! - **Int32x4**: 4 x i32 lanes (integer math, masks, pixel pack/unpack)
//! - **Float32x4**: 4 x f32 lanes
//! - **Uint8x16**: 16 x u8 lanes (byte-granular loads, saturating math)
//!
//! # Architecture
//!
//! Each backend is a zero-sized type implementing [`SimdBackend`] plus one
//! operation trait per vector family ([`Int32x4Ops`], [`Float32x4Ops`],
//! [`Uint8x16Ops`]). Algorithm code can be generic over the backend, which is
//! how the verification layer replays the same calls on two backends.
//!
//! Backends:
//! - [`scalar`]: portable lane arrays, always compiled, used as reference
//! - `neon`: aarch64 NEON (`core::arch::aarch64`)
//! - `sse2`: x86 / x86_64 SSE2 (`core::arch::x86_64`)
//!
//! # Selection
//!
//! `build.rs` emits exactly one `simd_backend` cfg per target and
//! [`Active`] aliases that backend. There is no runtime dispatch: the free
//! functions (`int32x4_add`, `float32x4_mul`, ...) forward to [`Active`] and
//! compile down to the native instruction.
//!
//! The native backend modules are private to the crate, so [`Active`] is
//! the only way to name them from outside:
//!
//! ```compile_fail
//! use prism_simd::simd::sse2::Sse2;
//! ```
//!
//! ```compile_fail
//! use prism_simd::simd::neon::Neon;
//! ```
//!
//! # Masks
//!
//! Comparisons return vectors of the compared family whose lanes are
//! all-ones (true) or all-zeros (false). Masks are meant to be consumed by
//! `select` and `get_mask`; their numeric value is not part of the API.

use std::fmt::Debug;

pub mod dispatch;
pub mod float32x4;
pub mod int32x4;
pub mod scalar;
pub mod uint8x16;

#[cfg(simd_backend = "neon")]
pub(crate) mod neon;

#[cfg(simd_backend = "sse2")]
pub(crate) mod sse2;

pub use dispatch::{active_backend, backend_info, BackendKind};
pub use float32x4::*;
pub use int32x4::*;
pub use uint8x16::*;

/// Backend compiled for this target.
#[cfg(simd_backend = "neon")]
pub type Active = neon::Neon;

/// Backend compiled for this target.
#[cfg(simd_backend = "sse2")]
pub type Active = sse2::Sse2;

/// Backend compiled for this target.
#[cfg(not(any(simd_backend = "neon", simd_backend = "sse2")))]
pub type Active = scalar::Scalar;

/// Reference backend used as ground truth by equivalence checks.
pub type Reference = scalar::Scalar;

/// Identity and vector types of a SIMD backend.
pub trait SimdBackend: Copy + Clone + Debug + Default + Send + Sync + 'static {
    /// Which instruction set this backend maps to.
    const KIND: BackendKind;

    /// 4 x i32 vector
    type Int32x4: Copy + Clone + Debug + Send + Sync;
    /// 4 x f32 vector
    type Float32x4: Copy + Clone + Debug + Send + Sync;
    /// 16 x u8 vector
    type Uint8x16: Copy + Clone + Debug + Send + Sync;
}

/// Operations on 4 x i32 vectors.
pub trait Int32x4Ops: SimdBackend {
    // conversion

    /// Reinterpret the bits of a float vector as integer lanes.
    fn int32x4_cast(s: Self::Float32x4) -> Self::Int32x4;
    /// Round to nearest, ties away from zero. Saturates, NaN becomes 0.
    fn int32x4_convert(s: Self::Float32x4) -> Self::Int32x4;
    /// Truncate toward zero. Saturates, NaN becomes 0.
    fn int32x4_truncate(s: Self::Float32x4) -> Self::Int32x4;

    // lanes

    fn int32x4_set_x(a: Self::Int32x4, x: i32) -> Self::Int32x4;
    fn int32x4_set_y(a: Self::Int32x4, y: i32) -> Self::Int32x4;
    fn int32x4_set_z(a: Self::Int32x4, z: i32) -> Self::Int32x4;
    fn int32x4_set_w(a: Self::Int32x4, w: i32) -> Self::Int32x4;
    fn int32x4_get_x(a: Self::Int32x4) -> i32;
    fn int32x4_get_y(a: Self::Int32x4) -> i32;
    fn int32x4_get_z(a: Self::Int32x4) -> i32;
    fn int32x4_get_w(a: Self::Int32x4) -> i32;

    // memory

    /// Load 4 lanes from 16-byte aligned memory.
    ///
    /// # Safety
    /// `src` must be valid for reading 16 bytes and aligned to 16 bytes.
    unsafe fn int32x4_load(src: *const i32) -> Self::Int32x4;
    /// Load the first 4 elements of `src`. Panics if `src.len() < 4`.
    fn int32x4_uload(src: &[i32]) -> Self::Int32x4;
    /// Store 4 lanes to 16-byte aligned memory.
    ///
    /// # Safety
    /// `dest` must be valid for writing 16 bytes and aligned to 16 bytes.
    unsafe fn int32x4_store(dest: *mut i32, a: Self::Int32x4);
    /// Store into the first 4 elements of `dest`. Panics if `dest.len() < 4`.
    fn int32x4_ustore(dest: &mut [i32], a: Self::Int32x4);
    fn int32x4_from_array(v: [i32; 4]) -> Self::Int32x4;
    fn int32x4_to_array(a: Self::Int32x4) -> [i32; 4];

    // construction

    fn int32x4_zero() -> Self::Int32x4;
    fn int32x4_set1(s: i32) -> Self::Int32x4;
    fn int32x4_set4(x: i32, y: i32, z: i32, w: i32) -> Self::Int32x4;

    // arithmetic (wrapping)

    fn int32x4_neg(a: Self::Int32x4) -> Self::Int32x4;
    fn int32x4_add(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    fn int32x4_sub(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    /// Low 32 bits of the lane products.
    fn int32x4_mullo(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    /// Wrapping absolute value: `i32::MIN` maps to itself.
    fn int32x4_abs(a: Self::Int32x4) -> Self::Int32x4;
    fn int32x4_min(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    fn int32x4_max(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;

    // logical

    fn int32x4_and(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    /// `b & !a`. The first operand is the complemented one.
    fn int32x4_nand(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    fn int32x4_or(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    fn int32x4_xor(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    fn int32x4_not(a: Self::Int32x4) -> Self::Int32x4;

    // shift

    /// Logical left shift by an immediate. Callers keep `N` in `0..32`.
    fn int32x4_sll<const N: i32>(a: Self::Int32x4) -> Self::Int32x4;
    /// Logical right shift by an immediate. Callers keep `N` in `0..32`.
    fn int32x4_srl<const N: i32>(a: Self::Int32x4) -> Self::Int32x4;
    /// Arithmetic right shift by an immediate. Callers keep `N` in `0..32`.
    fn int32x4_sra<const N: i32>(a: Self::Int32x4) -> Self::Int32x4;
    /// Logical left shift by a runtime count; counts >= 32 yield zero.
    fn int32x4_sll_var(a: Self::Int32x4, count: u32) -> Self::Int32x4;
    /// Logical right shift by a runtime count; counts >= 32 yield zero.
    fn int32x4_srl_var(a: Self::Int32x4, count: u32) -> Self::Int32x4;
    /// Arithmetic right shift by a runtime count; counts >= 32 fill with the sign.
    fn int32x4_sra_var(a: Self::Int32x4, count: u32) -> Self::Int32x4;

    // compare

    fn int32x4_compare_eq(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    /// Strict `a > b` per lane.
    fn int32x4_compare_gt(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    fn int32x4_compare_lt(a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    /// Bitwise select: `(mask & a) | (!mask & b)`.
    fn int32x4_select(mask: Self::Int32x4, a: Self::Int32x4, b: Self::Int32x4) -> Self::Int32x4;
    /// `(x & 1) | (y & 2) | (z & 4) | (w & 8)`.
    fn int32x4_get_mask(a: Self::Int32x4) -> u32;

    // pack

    /// Clamp each lane to `0..=255` and pack into one byte per lane, x lowest.
    fn int32x4_pack(s: Self::Int32x4) -> u32;
    /// Zero-extend each byte of `s` into a lane, lowest byte into x.
    fn int32x4_unpack(s: u32) -> Self::Int32x4;
}

/// Operations on 4 x f32 vectors.
pub trait Float32x4Ops: SimdBackend {
    // conversion

    /// Reinterpret the bits of an integer vector as float lanes.
    fn float32x4_cast(s: Self::Int32x4) -> Self::Float32x4;
    /// Convert integer lanes to the nearest float (ties to even).
    fn float32x4_convert(s: Self::Int32x4) -> Self::Float32x4;

    // lanes

    fn float32x4_set_x(a: Self::Float32x4, x: f32) -> Self::Float32x4;
    fn float32x4_set_y(a: Self::Float32x4, y: f32) -> Self::Float32x4;
    fn float32x4_set_z(a: Self::Float32x4, z: f32) -> Self::Float32x4;
    fn float32x4_set_w(a: Self::Float32x4, w: f32) -> Self::Float32x4;
    fn float32x4_get_x(a: Self::Float32x4) -> f32;
    fn float32x4_get_y(a: Self::Float32x4) -> f32;
    fn float32x4_get_z(a: Self::Float32x4) -> f32;
    fn float32x4_get_w(a: Self::Float32x4) -> f32;

    // memory

    /// # Safety
    /// `src` must be valid for reading 16 bytes and aligned to 16 bytes.
    unsafe fn float32x4_load(src: *const f32) -> Self::Float32x4;
    fn float32x4_uload(src: &[f32]) -> Self::Float32x4;
    /// # Safety
    /// `dest` must be valid for writing 16 bytes and aligned to 16 bytes.
    unsafe fn float32x4_store(dest: *mut f32, a: Self::Float32x4);
    fn float32x4_ustore(dest: &mut [f32], a: Self::Float32x4);
    fn float32x4_from_array(v: [f32; 4]) -> Self::Float32x4;
    fn float32x4_to_array(a: Self::Float32x4) -> [f32; 4];

    // construction

    fn float32x4_zero() -> Self::Float32x4;
    fn float32x4_set1(s: f32) -> Self::Float32x4;
    fn float32x4_set4(x: f32, y: f32, z: f32, w: f32) -> Self::Float32x4;

    // arithmetic

    /// Flip the sign bit.
    fn float32x4_neg(a: Self::Float32x4) -> Self::Float32x4;
    /// Clear the sign bit.
    fn float32x4_abs(a: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_add(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_sub(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_mul(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_div(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_sqrt(a: Self::Float32x4) -> Self::Float32x4;
    /// `a + b * c`, rounded twice on every backend.
    fn float32x4_madd(
        a: Self::Float32x4,
        b: Self::Float32x4,
        c: Self::Float32x4,
    ) -> Self::Float32x4;
    /// `a < b ? a : b` per lane.
    fn float32x4_min(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    /// `a > b ? a : b` per lane.
    fn float32x4_max(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;

    // logical

    fn float32x4_and(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    /// `b & !a` on the bit patterns.
    fn float32x4_nand(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_or(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_xor(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;

    // compare

    fn float32x4_compare_eq(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_compare_neq(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_compare_lt(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_compare_le(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_compare_gt(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_compare_ge(a: Self::Float32x4, b: Self::Float32x4) -> Self::Float32x4;
    fn float32x4_select(
        mask: Self::Float32x4,
        a: Self::Float32x4,
        b: Self::Float32x4,
    ) -> Self::Float32x4;
    /// Sign bit of lane i in bit i.
    fn float32x4_get_mask(a: Self::Float32x4) -> u32;
}

/// Operations on 16 x u8 vectors.
pub trait Uint8x16Ops: SimdBackend {
    // memory

    /// # Safety
    /// `src` must be valid for reading 16 bytes and aligned to 16 bytes.
    unsafe fn uint8x16_load(src: *const u8) -> Self::Uint8x16;
    /// Load the first 16 bytes of `src`, at any address. Panics if `src.len() < 16`.
    fn uint8x16_uload(src: &[u8]) -> Self::Uint8x16;
    /// # Safety
    /// `dest` must be valid for writing 16 bytes and aligned to 16 bytes.
    unsafe fn uint8x16_store(dest: *mut u8, a: Self::Uint8x16);
    fn uint8x16_ustore(dest: &mut [u8], a: Self::Uint8x16);
    fn uint8x16_from_array(v: [u8; 16]) -> Self::Uint8x16;
    fn uint8x16_to_array(a: Self::Uint8x16) -> [u8; 16];

    // construction

    fn uint8x16_zero() -> Self::Uint8x16;
    fn uint8x16_set1(s: u8) -> Self::Uint8x16;

    // arithmetic

    fn uint8x16_add(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    fn uint8x16_sub(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    fn uint8x16_adds(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    fn uint8x16_subs(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    /// Rounding average `(a + b + 1) >> 1`.
    fn uint8x16_avg(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    fn uint8x16_min(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    fn uint8x16_max(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;

    // logical

    fn uint8x16_and(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    /// `b & !a`.
    fn uint8x16_nand(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    fn uint8x16_or(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    fn uint8x16_xor(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;

    // compare

    fn uint8x16_compare_eq(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    /// Unsigned strict `a > b` per lane.
    fn uint8x16_compare_gt(a: Self::Uint8x16, b: Self::Uint8x16) -> Self::Uint8x16;
    fn uint8x16_select(
        mask: Self::Uint8x16,
        a: Self::Uint8x16,
        b: Self::Uint8x16,
    ) -> Self::Uint8x16;
    /// Most significant bit of lane i in bit i.
    fn uint8x16_get_mask(a: Self::Uint8x16) -> u32;
}

/// A backend implementing every vector family.
pub trait FullBackend: Int32x4Ops + Float32x4Ops + Uint8x16Ops {}

impl<B: Int32x4Ops + Float32x4Ops + Uint8x16Ops> FullBackend for B {}
