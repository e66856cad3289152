// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! aarch64 NEON backend.
//!
//! Every operation maps onto `core::arch::aarch64` intrinsics over the
//! 128-bit Q registers. NEON is mandatory on aarch64, so no runtime check is
//! needed once this module is compiled.
//!
//! # Notes
//!
//! - `vld1q`/`vst1q` only need element alignment, so the aligned and
//!   unaligned memory operations use the same instructions; the aligned
//!   variants keep the stricter contract for parity with SSE2.
//! - `vshrq_n` rejects a zero immediate, so right shifts go through
//!   `vshlq` with a negated count. The count is a splatted constant for the
//!   immediate variants and LLVM folds it back into `ushr`/`sshr`.
//! - `vshlq` only looks at the low byte of each count lane. Runtime counts
//!   are clamped to 32 before negation so large counts keep their meaning.

#[cfg(not(all(target_arch = "aarch64", target_feature = "neon")))]
compile_error!("the NEON backend needs aarch64 with NEON; build.rs selects it only there");

use core::arch::aarch64::*;
use std::fmt;

use super::{BackendKind, Float32x4Ops, Int32x4Ops, SimdBackend, Uint8x16Ops};

/// NEON backend (128-bit, ARM)
#[derive(Debug, Clone, Copy, Default)]
pub struct Neon;

/// 4 x i32 in a Q register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Int32x4(int32x4_t);

/// 4 x f32 in a Q register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Float32x4(float32x4_t);

/// 16 x u8 in a Q register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Uint8x16(uint8x16_t);

impl fmt::Debug for Int32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Int32x4").field(&Neon::int32x4_to_array(*self)).finish()
    }
}

impl fmt::Debug for Float32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Float32x4").field(&Neon::float32x4_to_array(*self)).finish()
    }
}

impl fmt::Debug for Uint8x16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Uint8x16").field(&Neon::uint8x16_to_array(*self)).finish()
    }
}

impl SimdBackend for Neon {
    const KIND: BackendKind = BackendKind::Neon;

    type Int32x4 = Int32x4;
    type Float32x4 = Float32x4;
    type Uint8x16 = Uint8x16;
}

// ============================================================================
// Bit-pattern helpers
// ============================================================================

#[inline(always)]
fn as_u32(a: Int32x4) -> uint32x4_t {
    unsafe { vreinterpretq_u32_s32(a.0) }
}

#[inline(always)]
fn from_u32(a: uint32x4_t) -> Int32x4 {
    unsafe { Int32x4(vreinterpretq_s32_u32(a)) }
}

#[inline(always)]
fn f32_bits(a: Float32x4) -> uint32x4_t {
    unsafe { vreinterpretq_u32_f32(a.0) }
}

#[inline(always)]
fn f32_from_bits(a: uint32x4_t) -> Float32x4 {
    unsafe { Float32x4(vreinterpretq_f32_u32(a)) }
}

/// Splat a shift count for `vshlq`; negative counts shift right.
#[inline(always)]
fn shift_count(count: i32) -> int32x4_t {
    unsafe { vdupq_n_s32(count) }
}

// ============================================================================
// int32x4
// ============================================================================

impl Int32x4Ops for Neon {
    #[inline]
    fn int32x4_cast(s: Float32x4) -> Int32x4 {
        unsafe { Int32x4(vreinterpretq_s32_f32(s.0)) }
    }

    #[inline]
    fn int32x4_convert(s: Float32x4) -> Int32x4 {
        unsafe {
            let sign_bit = vreinterpretq_u32_f32(vdupq_n_f32(-0.0));
            let sign = vandq_u32(vreinterpretq_u32_f32(s.0), sign_bit);
            let half = vreinterpretq_u32_f32(vdupq_n_f32(0.5));
            let bias = vreinterpretq_f32_u32(vorrq_u32(sign, half));
            Int32x4(vcvtq_s32_f32(vaddq_f32(s.0, bias)))
        }
    }

    #[inline]
    fn int32x4_truncate(s: Float32x4) -> Int32x4 {
        // FCVTZS already saturates and maps NaN to zero
        unsafe { Int32x4(vcvtq_s32_f32(s.0)) }
    }

    #[inline]
    fn int32x4_set_x(a: Int32x4, x: i32) -> Int32x4 {
        unsafe { Int32x4(vsetq_lane_s32::<0>(x, a.0)) }
    }

    #[inline]
    fn int32x4_set_y(a: Int32x4, y: i32) -> Int32x4 {
        unsafe { Int32x4(vsetq_lane_s32::<1>(y, a.0)) }
    }

    #[inline]
    fn int32x4_set_z(a: Int32x4, z: i32) -> Int32x4 {
        unsafe { Int32x4(vsetq_lane_s32::<2>(z, a.0)) }
    }

    #[inline]
    fn int32x4_set_w(a: Int32x4, w: i32) -> Int32x4 {
        unsafe { Int32x4(vsetq_lane_s32::<3>(w, a.0)) }
    }

    #[inline]
    fn int32x4_get_x(a: Int32x4) -> i32 {
        unsafe { vgetq_lane_s32::<0>(a.0) }
    }

    #[inline]
    fn int32x4_get_y(a: Int32x4) -> i32 {
        unsafe { vgetq_lane_s32::<1>(a.0) }
    }

    #[inline]
    fn int32x4_get_z(a: Int32x4) -> i32 {
        unsafe { vgetq_lane_s32::<2>(a.0) }
    }

    #[inline]
    fn int32x4_get_w(a: Int32x4) -> i32 {
        unsafe { vgetq_lane_s32::<3>(a.0) }
    }

    #[inline]
    unsafe fn int32x4_load(src: *const i32) -> Int32x4 {
        unsafe { Int32x4(vld1q_s32(src)) }
    }

    #[inline]
    fn int32x4_uload(src: &[i32]) -> Int32x4 {
        let src = &src[..4];
        unsafe { Int32x4(vld1q_s32(src.as_ptr())) }
    }

    #[inline]
    unsafe fn int32x4_store(dest: *mut i32, a: Int32x4) {
        unsafe { vst1q_s32(dest, a.0) }
    }

    #[inline]
    fn int32x4_ustore(dest: &mut [i32], a: Int32x4) {
        let dest = &mut dest[..4];
        unsafe { vst1q_s32(dest.as_mut_ptr(), a.0) }
    }

    #[inline]
    fn int32x4_from_array(v: [i32; 4]) -> Int32x4 {
        unsafe { Int32x4(vld1q_s32(v.as_ptr())) }
    }

    #[inline]
    fn int32x4_to_array(a: Int32x4) -> [i32; 4] {
        let mut out = [0i32; 4];
        unsafe { vst1q_s32(out.as_mut_ptr(), a.0) };
        out
    }

    #[inline]
    fn int32x4_zero() -> Int32x4 {
        unsafe { Int32x4(vdupq_n_s32(0)) }
    }

    #[inline]
    fn int32x4_set1(s: i32) -> Int32x4 {
        unsafe { Int32x4(vdupq_n_s32(s)) }
    }

    #[inline]
    fn int32x4_set4(x: i32, y: i32, z: i32, w: i32) -> Int32x4 {
        Self::int32x4_from_array([x, y, z, w])
    }

    #[inline]
    fn int32x4_neg(a: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vnegq_s32(a.0)) }
    }

    #[inline]
    fn int32x4_add(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vaddq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_sub(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vsubq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_mullo(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vmulq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_abs(a: Int32x4) -> Int32x4 {
        // ABS wraps: i32::MIN stays i32::MIN
        unsafe { Int32x4(vabsq_s32(a.0)) }
    }

    #[inline]
    fn int32x4_min(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vminq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_max(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vmaxq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_and(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vandq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_nand(a: Int32x4, b: Int32x4) -> Int32x4 {
        // BIC computes first & !second
        unsafe { Int32x4(vbicq_s32(b.0, a.0)) }
    }

    #[inline]
    fn int32x4_or(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vorrq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_xor(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(veorq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_not(a: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vmvnq_s32(a.0)) }
    }

    #[inline]
    fn int32x4_sll<const N: i32>(a: Int32x4) -> Int32x4 {
        unsafe { from_u32(vshlq_n_u32::<N>(as_u32(a))) }
    }

    #[inline]
    fn int32x4_srl<const N: i32>(a: Int32x4) -> Int32x4 {
        unsafe { from_u32(vshlq_u32(as_u32(a), shift_count(-N))) }
    }

    #[inline]
    fn int32x4_sra<const N: i32>(a: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vshlq_s32(a.0, shift_count(-N))) }
    }

    #[inline]
    fn int32x4_sll_var(a: Int32x4, count: u32) -> Int32x4 {
        let count = count.min(32) as i32;
        unsafe { from_u32(vshlq_u32(as_u32(a), shift_count(count))) }
    }

    #[inline]
    fn int32x4_srl_var(a: Int32x4, count: u32) -> Int32x4 {
        let count = count.min(32) as i32;
        unsafe { from_u32(vshlq_u32(as_u32(a), shift_count(-count))) }
    }

    #[inline]
    fn int32x4_sra_var(a: Int32x4, count: u32) -> Int32x4 {
        let count = count.min(32) as i32;
        unsafe { Int32x4(vshlq_s32(a.0, shift_count(-count))) }
    }

    #[inline]
    fn int32x4_compare_eq(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { from_u32(vceqq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_compare_gt(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { from_u32(vcgtq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_compare_lt(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { from_u32(vcltq_s32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_select(mask: Int32x4, a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(vbslq_s32(as_u32(mask), a.0, b.0)) }
    }

    #[inline]
    fn int32x4_get_mask(a: Int32x4) -> u32 {
        const WEIGHTS: [u32; 4] = [1, 2, 4, 8];
        unsafe {
            let masked = vandq_u32(as_u32(a), vld1q_u32(WEIGHTS.as_ptr()));
            // lane weights are disjoint bits, so the sum is the OR
            vaddvq_u32(masked)
        }
    }

    #[inline]
    fn int32x4_pack(s: Int32x4) -> u32 {
        unsafe {
            let a = vqmovun_s32(s.0);
            let b = vcombine_u16(a, a);
            let c = vqmovn_u16(b);
            vget_lane_u32::<0>(vreinterpret_u32_u8(c))
        }
    }

    #[inline]
    fn int32x4_unpack(s: u32) -> Int32x4 {
        unsafe {
            let bytes = vreinterpret_u8_u32(vdup_n_u32(s));
            let halves = vmovl_u8(bytes);
            let words = vmovl_u16(vget_low_u16(halves));
            from_u32(words)
        }
    }
}

// ============================================================================
// float32x4
// ============================================================================

impl Float32x4Ops for Neon {
    #[inline]
    fn float32x4_cast(s: Int32x4) -> Float32x4 {
        unsafe { Float32x4(vreinterpretq_f32_s32(s.0)) }
    }

    #[inline]
    fn float32x4_convert(s: Int32x4) -> Float32x4 {
        unsafe { Float32x4(vcvtq_f32_s32(s.0)) }
    }

    #[inline]
    fn float32x4_set_x(a: Float32x4, x: f32) -> Float32x4 {
        unsafe { Float32x4(vsetq_lane_f32::<0>(x, a.0)) }
    }

    #[inline]
    fn float32x4_set_y(a: Float32x4, y: f32) -> Float32x4 {
        unsafe { Float32x4(vsetq_lane_f32::<1>(y, a.0)) }
    }

    #[inline]
    fn float32x4_set_z(a: Float32x4, z: f32) -> Float32x4 {
        unsafe { Float32x4(vsetq_lane_f32::<2>(z, a.0)) }
    }

    #[inline]
    fn float32x4_set_w(a: Float32x4, w: f32) -> Float32x4 {
        unsafe { Float32x4(vsetq_lane_f32::<3>(w, a.0)) }
    }

    #[inline]
    fn float32x4_get_x(a: Float32x4) -> f32 {
        unsafe { vgetq_lane_f32::<0>(a.0) }
    }

    #[inline]
    fn float32x4_get_y(a: Float32x4) -> f32 {
        unsafe { vgetq_lane_f32::<1>(a.0) }
    }

    #[inline]
    fn float32x4_get_z(a: Float32x4) -> f32 {
        unsafe { vgetq_lane_f32::<2>(a.0) }
    }

    #[inline]
    fn float32x4_get_w(a: Float32x4) -> f32 {
        unsafe { vgetq_lane_f32::<3>(a.0) }
    }

    #[inline]
    unsafe fn float32x4_load(src: *const f32) -> Float32x4 {
        unsafe { Float32x4(vld1q_f32(src)) }
    }

    #[inline]
    fn float32x4_uload(src: &[f32]) -> Float32x4 {
        let src = &src[..4];
        unsafe { Float32x4(vld1q_f32(src.as_ptr())) }
    }

    #[inline]
    unsafe fn float32x4_store(dest: *mut f32, a: Float32x4) {
        unsafe { vst1q_f32(dest, a.0) }
    }

    #[inline]
    fn float32x4_ustore(dest: &mut [f32], a: Float32x4) {
        let dest = &mut dest[..4];
        unsafe { vst1q_f32(dest.as_mut_ptr(), a.0) }
    }

    #[inline]
    fn float32x4_from_array(v: [f32; 4]) -> Float32x4 {
        unsafe { Float32x4(vld1q_f32(v.as_ptr())) }
    }

    #[inline]
    fn float32x4_to_array(a: Float32x4) -> [f32; 4] {
        let mut out = [0f32; 4];
        unsafe { vst1q_f32(out.as_mut_ptr(), a.0) };
        out
    }

    #[inline]
    fn float32x4_zero() -> Float32x4 {
        unsafe { Float32x4(vdupq_n_f32(0.0)) }
    }

    #[inline]
    fn float32x4_set1(s: f32) -> Float32x4 {
        unsafe { Float32x4(vdupq_n_f32(s)) }
    }

    #[inline]
    fn float32x4_set4(x: f32, y: f32, z: f32, w: f32) -> Float32x4 {
        Self::float32x4_from_array([x, y, z, w])
    }

    #[inline]
    fn float32x4_neg(a: Float32x4) -> Float32x4 {
        unsafe { Float32x4(vnegq_f32(a.0)) }
    }

    #[inline]
    fn float32x4_abs(a: Float32x4) -> Float32x4 {
        unsafe { Float32x4(vabsq_f32(a.0)) }
    }

    #[inline]
    fn float32x4_add(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(vaddq_f32(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_sub(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(vsubq_f32(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_mul(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(vmulq_f32(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_div(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(vdivq_f32(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_sqrt(a: Float32x4) -> Float32x4 {
        unsafe { Float32x4(vsqrtq_f32(a.0)) }
    }

    #[inline]
    fn float32x4_madd(a: Float32x4, b: Float32x4, c: Float32x4) -> Float32x4 {
        // separate FMUL + FADD; FMLA would fuse and diverge from SSE2
        unsafe { Float32x4(vaddq_f32(a.0, vmulq_f32(b.0, c.0))) }
    }

    #[inline]
    fn float32x4_min(a: Float32x4, b: Float32x4) -> Float32x4 {
        // FMIN propagates NaN; select keeps the `a < b ? a : b` contract
        unsafe { Float32x4(vbslq_f32(vcltq_f32(a.0, b.0), a.0, b.0)) }
    }

    #[inline]
    fn float32x4_max(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(vbslq_f32(vcgtq_f32(a.0, b.0), a.0, b.0)) }
    }

    #[inline]
    fn float32x4_and(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(vandq_u32(f32_bits(a), f32_bits(b))) }
    }

    #[inline]
    fn float32x4_nand(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(vbicq_u32(f32_bits(b), f32_bits(a))) }
    }

    #[inline]
    fn float32x4_or(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(vorrq_u32(f32_bits(a), f32_bits(b))) }
    }

    #[inline]
    fn float32x4_xor(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(veorq_u32(f32_bits(a), f32_bits(b))) }
    }

    #[inline]
    fn float32x4_compare_eq(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(vceqq_f32(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_neq(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(vmvnq_u32(vceqq_f32(a.0, b.0))) }
    }

    #[inline]
    fn float32x4_compare_lt(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(vcltq_f32(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_le(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(vcleq_f32(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_gt(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(vcgtq_f32(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_ge(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { f32_from_bits(vcgeq_f32(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_select(mask: Float32x4, a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(vbslq_f32(f32_bits(mask), a.0, b.0)) }
    }

    #[inline]
    fn float32x4_get_mask(a: Float32x4) -> u32 {
        const LANE_SHIFT: [i32; 4] = [0, 1, 2, 3];
        unsafe {
            let sign = vshrq_n_u32::<31>(f32_bits(a));
            vaddvq_u32(vshlq_u32(sign, vld1q_s32(LANE_SHIFT.as_ptr())))
        }
    }
}

// ============================================================================
// uint8x16
// ============================================================================

impl Uint8x16Ops for Neon {
    #[inline]
    unsafe fn uint8x16_load(src: *const u8) -> Uint8x16 {
        unsafe { Uint8x16(vld1q_u8(src)) }
    }

    #[inline]
    fn uint8x16_uload(src: &[u8]) -> Uint8x16 {
        let src = &src[..16];
        unsafe { Uint8x16(vld1q_u8(src.as_ptr())) }
    }

    #[inline]
    unsafe fn uint8x16_store(dest: *mut u8, a: Uint8x16) {
        unsafe { vst1q_u8(dest, a.0) }
    }

    #[inline]
    fn uint8x16_ustore(dest: &mut [u8], a: Uint8x16) {
        let dest = &mut dest[..16];
        unsafe { vst1q_u8(dest.as_mut_ptr(), a.0) }
    }

    #[inline]
    fn uint8x16_from_array(v: [u8; 16]) -> Uint8x16 {
        unsafe { Uint8x16(vld1q_u8(v.as_ptr())) }
    }

    #[inline]
    fn uint8x16_to_array(a: Uint8x16) -> [u8; 16] {
        let mut out = [0u8; 16];
        unsafe { vst1q_u8(out.as_mut_ptr(), a.0) };
        out
    }

    #[inline]
    fn uint8x16_zero() -> Uint8x16 {
        unsafe { Uint8x16(vdupq_n_u8(0)) }
    }

    #[inline]
    fn uint8x16_set1(s: u8) -> Uint8x16 {
        unsafe { Uint8x16(vdupq_n_u8(s)) }
    }

    #[inline]
    fn uint8x16_add(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vaddq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_sub(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vsubq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_adds(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vqaddq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_subs(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vqsubq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_avg(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vrhaddq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_min(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vminq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_max(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vmaxq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_and(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vandq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_nand(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vbicq_u8(b.0, a.0)) }
    }

    #[inline]
    fn uint8x16_or(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vorrq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_xor(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(veorq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_compare_eq(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vceqq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_compare_gt(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vcgtq_u8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_select(mask: Uint8x16, a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(vbslq_u8(mask.0, a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_get_mask(a: Uint8x16) -> u32 {
        const WEIGHTS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];
        unsafe {
            // arithmetic shift spreads the top bit over the whole lane
            let top = vreinterpretq_u8_s8(vshrq_n_s8::<7>(vreinterpretq_s8_u8(a.0)));
            let bits = vandq_u8(top, vld1q_u8(WEIGHTS.as_ptr()));
            let lo = vaddv_u8(vget_low_u8(bits)) as u32;
            let hi = vaddv_u8(vget_high_u8(bits)) as u32;
            lo | (hi << 8)
        }
    }
}
