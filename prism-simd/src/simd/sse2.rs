// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! x86 / x86_64 SSE2 backend.
//!
//! SSE2 is part of the x86_64 baseline, so this backend needs no runtime
//! detection. Only SSE2 instructions are used; operations that later
//! extensions provide in one instruction (`pminsd`, `pmulld`, `pinsrd`,
//! `pabsd`) are composed from SSE2 sequences here.
//!
//! # Notes
//!
//! - `cvttps2dq` returns `0x8000_0000` for NaN and every out-of-range lane.
//!   The conversions patch those lanes so they saturate like the scalar
//!   reference (positive overflow to `i32::MAX`, NaN to zero).
//! - `movmskps`/`pmovmskb` test the sign bit, which is the contract of the
//!   float and byte masks. The int32x4 mask ANDs lanes with their weights and
//!   ORs them horizontally instead.

#[cfg(not(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2"))))]
compile_error!("the SSE2 backend needs an x86 target with SSE2; build.rs selects it only there");

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;
use std::fmt;

use super::{BackendKind, Float32x4Ops, Int32x4Ops, SimdBackend, Uint8x16Ops};

/// SSE2 backend (128-bit, x86)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sse2;

/// 4 x i32 in an XMM register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Int32x4(__m128i);

/// 4 x f32 in an XMM register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Float32x4(__m128);

/// 16 x u8 in an XMM register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Uint8x16(__m128i);

impl fmt::Debug for Int32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Int32x4").field(&Sse2::int32x4_to_array(*self)).finish()
    }
}

impl fmt::Debug for Float32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Float32x4").field(&Sse2::float32x4_to_array(*self)).finish()
    }
}

impl fmt::Debug for Uint8x16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Uint8x16").field(&Sse2::uint8x16_to_array(*self)).finish()
    }
}

impl SimdBackend for Sse2 {
    const KIND: BackendKind = BackendKind::Sse2;

    type Int32x4 = Int32x4;
    type Float32x4 = Float32x4;
    type Uint8x16 = Uint8x16;
}

// ============================================================================
// Helpers
// ============================================================================

/// Bitwise select: `(mask & a) | (!mask & b)`.
#[inline(always)]
unsafe fn blend_si128(mask: __m128i, a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_or_si128(_mm_and_si128(mask, a), _mm_andnot_si128(mask, b)) }
}

/// Truncating float to int conversion with the scalar saturation rules.
#[inline(always)]
unsafe fn cvtt_saturate(s: __m128) -> __m128i {
    unsafe {
        let t = _mm_cvttps_epi32(s);
        // lanes >= 2^31 (and +inf) hold 0x80000000; xor with all-ones gives i32::MAX
        let overflow = _mm_castps_si128(_mm_cmpge_ps(s, _mm_set1_ps(2_147_483_648.0)));
        let t = _mm_xor_si128(t, overflow);
        // NaN lanes become zero
        let ordered = _mm_castps_si128(_mm_cmpord_ps(s, s));
        _mm_and_si128(t, ordered)
    }
}

/// Shift count register for `psll`/`psrl`/`psra`.
#[inline(always)]
unsafe fn count_si128(count: u32) -> __m128i {
    unsafe { _mm_cvtsi32_si128(count.min(32) as i32) }
}

// ============================================================================
// int32x4
// ============================================================================

impl Int32x4Ops for Sse2 {
    #[inline]
    fn int32x4_cast(s: Float32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_castps_si128(s.0)) }
    }

    #[inline]
    fn int32x4_convert(s: Float32x4) -> Int32x4 {
        unsafe {
            let sign = _mm_and_ps(s.0, _mm_set1_ps(-0.0));
            let bias = _mm_or_ps(sign, _mm_set1_ps(0.5));
            Int32x4(cvtt_saturate(_mm_add_ps(s.0, bias)))
        }
    }

    #[inline]
    fn int32x4_truncate(s: Float32x4) -> Int32x4 {
        unsafe { Int32x4(cvtt_saturate(s.0)) }
    }

    // pinsrd is SSE4.1; two pinsrw cover one 32-bit lane

    #[inline]
    fn int32x4_set_x(a: Int32x4, x: i32) -> Int32x4 {
        unsafe { Int32x4(_mm_insert_epi16::<1>(_mm_insert_epi16::<0>(a.0, x), x >> 16)) }
    }

    #[inline]
    fn int32x4_set_y(a: Int32x4, y: i32) -> Int32x4 {
        unsafe { Int32x4(_mm_insert_epi16::<3>(_mm_insert_epi16::<2>(a.0, y), y >> 16)) }
    }

    #[inline]
    fn int32x4_set_z(a: Int32x4, z: i32) -> Int32x4 {
        unsafe { Int32x4(_mm_insert_epi16::<5>(_mm_insert_epi16::<4>(a.0, z), z >> 16)) }
    }

    #[inline]
    fn int32x4_set_w(a: Int32x4, w: i32) -> Int32x4 {
        unsafe { Int32x4(_mm_insert_epi16::<7>(_mm_insert_epi16::<6>(a.0, w), w >> 16)) }
    }

    #[inline]
    fn int32x4_get_x(a: Int32x4) -> i32 {
        unsafe { _mm_cvtsi128_si32(a.0) }
    }

    #[inline]
    fn int32x4_get_y(a: Int32x4) -> i32 {
        unsafe { _mm_cvtsi128_si32(_mm_shuffle_epi32::<0x55>(a.0)) }
    }

    #[inline]
    fn int32x4_get_z(a: Int32x4) -> i32 {
        unsafe { _mm_cvtsi128_si32(_mm_shuffle_epi32::<0xaa>(a.0)) }
    }

    #[inline]
    fn int32x4_get_w(a: Int32x4) -> i32 {
        unsafe { _mm_cvtsi128_si32(_mm_shuffle_epi32::<0xff>(a.0)) }
    }

    #[inline]
    unsafe fn int32x4_load(src: *const i32) -> Int32x4 {
        unsafe { Int32x4(_mm_load_si128(src as *const __m128i)) }
    }

    #[inline]
    fn int32x4_uload(src: &[i32]) -> Int32x4 {
        let src = &src[..4];
        unsafe { Int32x4(_mm_loadu_si128(src.as_ptr() as *const __m128i)) }
    }

    #[inline]
    unsafe fn int32x4_store(dest: *mut i32, a: Int32x4) {
        unsafe { _mm_store_si128(dest as *mut __m128i, a.0) }
    }

    #[inline]
    fn int32x4_ustore(dest: &mut [i32], a: Int32x4) {
        let dest = &mut dest[..4];
        unsafe { _mm_storeu_si128(dest.as_mut_ptr() as *mut __m128i, a.0) }
    }

    #[inline]
    fn int32x4_from_array(v: [i32; 4]) -> Int32x4 {
        unsafe { Int32x4(_mm_setr_epi32(v[0], v[1], v[2], v[3])) }
    }

    #[inline]
    fn int32x4_to_array(a: Int32x4) -> [i32; 4] {
        let mut out = [0i32; 4];
        Self::int32x4_ustore(&mut out, a);
        out
    }

    #[inline]
    fn int32x4_zero() -> Int32x4 {
        unsafe { Int32x4(_mm_setzero_si128()) }
    }

    #[inline]
    fn int32x4_set1(s: i32) -> Int32x4 {
        unsafe { Int32x4(_mm_set1_epi32(s)) }
    }

    #[inline]
    fn int32x4_set4(x: i32, y: i32, z: i32, w: i32) -> Int32x4 {
        unsafe { Int32x4(_mm_setr_epi32(x, y, z, w)) }
    }

    #[inline]
    fn int32x4_neg(a: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_sub_epi32(_mm_setzero_si128(), a.0)) }
    }

    #[inline]
    fn int32x4_add(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_add_epi32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_sub(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_sub_epi32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_mullo(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe {
            // pmuludq multiplies lanes 0 and 2; shift to reach lanes 1 and 3
            let even = _mm_mul_epu32(a.0, b.0);
            let odd = _mm_mul_epu32(_mm_srli_si128::<4>(a.0), _mm_srli_si128::<4>(b.0));
            let even = _mm_shuffle_epi32::<0b00_00_10_00>(even);
            let odd = _mm_shuffle_epi32::<0b00_00_10_00>(odd);
            Int32x4(_mm_unpacklo_epi32(even, odd))
        }
    }

    #[inline]
    fn int32x4_abs(a: Int32x4) -> Int32x4 {
        unsafe {
            let sign = _mm_srai_epi32::<31>(a.0);
            Int32x4(_mm_sub_epi32(_mm_xor_si128(a.0, sign), sign))
        }
    }

    #[inline]
    fn int32x4_min(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(blend_si128(_mm_cmpgt_epi32(a.0, b.0), b.0, a.0)) }
    }

    #[inline]
    fn int32x4_max(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(blend_si128(_mm_cmpgt_epi32(a.0, b.0), a.0, b.0)) }
    }

    #[inline]
    fn int32x4_and(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_and_si128(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_nand(a: Int32x4, b: Int32x4) -> Int32x4 {
        // pandn complements its first operand, matching the nand contract
        unsafe { Int32x4(_mm_andnot_si128(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_or(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_or_si128(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_xor(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_xor_si128(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_not(a: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_xor_si128(a.0, _mm_set1_epi32(-1))) }
    }

    #[inline]
    fn int32x4_sll<const N: i32>(a: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_slli_epi32::<N>(a.0)) }
    }

    #[inline]
    fn int32x4_srl<const N: i32>(a: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_srli_epi32::<N>(a.0)) }
    }

    #[inline]
    fn int32x4_sra<const N: i32>(a: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_srai_epi32::<N>(a.0)) }
    }

    #[inline]
    fn int32x4_sll_var(a: Int32x4, count: u32) -> Int32x4 {
        unsafe { Int32x4(_mm_sll_epi32(a.0, count_si128(count))) }
    }

    #[inline]
    fn int32x4_srl_var(a: Int32x4, count: u32) -> Int32x4 {
        unsafe { Int32x4(_mm_srl_epi32(a.0, count_si128(count))) }
    }

    #[inline]
    fn int32x4_sra_var(a: Int32x4, count: u32) -> Int32x4 {
        unsafe { Int32x4(_mm_sra_epi32(a.0, count_si128(count))) }
    }

    #[inline]
    fn int32x4_compare_eq(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_cmpeq_epi32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_compare_gt(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_cmpgt_epi32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_compare_lt(a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(_mm_cmplt_epi32(a.0, b.0)) }
    }

    #[inline]
    fn int32x4_select(mask: Int32x4, a: Int32x4, b: Int32x4) -> Int32x4 {
        unsafe { Int32x4(blend_si128(mask.0, a.0, b.0)) }
    }

    #[inline]
    fn int32x4_get_mask(a: Int32x4) -> u32 {
        unsafe {
            let masked = _mm_and_si128(a.0, _mm_setr_epi32(1, 2, 4, 8));
            let folded = _mm_or_si128(masked, _mm_shuffle_epi32::<0b01_00_11_10>(masked));
            let folded = _mm_or_si128(folded, _mm_shuffle_epi32::<0b10_11_00_01>(folded));
            _mm_cvtsi128_si32(folded) as u32
        }
    }

    #[inline]
    fn int32x4_pack(s: Int32x4) -> u32 {
        unsafe {
            // signed saturation to i16 keeps negatives negative for packuswb
            let words = _mm_packs_epi32(s.0, s.0);
            let bytes = _mm_packus_epi16(words, words);
            _mm_cvtsi128_si32(bytes) as u32
        }
    }

    #[inline]
    fn int32x4_unpack(s: u32) -> Int32x4 {
        unsafe {
            let zero = _mm_setzero_si128();
            let bytes = _mm_cvtsi32_si128(s as i32);
            let words = _mm_unpacklo_epi8(bytes, zero);
            Int32x4(_mm_unpacklo_epi16(words, zero))
        }
    }
}

// ============================================================================
// float32x4
// ============================================================================

impl Float32x4Ops for Sse2 {
    #[inline]
    fn float32x4_cast(s: Int32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_castsi128_ps(s.0)) }
    }

    #[inline]
    fn float32x4_convert(s: Int32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_cvtepi32_ps(s.0)) }
    }

    #[inline]
    fn float32x4_set_x(a: Float32x4, x: f32) -> Float32x4 {
        unsafe { Float32x4(_mm_move_ss(a.0, _mm_set_ss(x))) }
    }

    #[inline]
    fn float32x4_set_y(a: Float32x4, y: f32) -> Float32x4 {
        Self::float32x4_cast(Self::int32x4_set_y(Self::int32x4_cast(a), y.to_bits() as i32))
    }

    #[inline]
    fn float32x4_set_z(a: Float32x4, z: f32) -> Float32x4 {
        Self::float32x4_cast(Self::int32x4_set_z(Self::int32x4_cast(a), z.to_bits() as i32))
    }

    #[inline]
    fn float32x4_set_w(a: Float32x4, w: f32) -> Float32x4 {
        Self::float32x4_cast(Self::int32x4_set_w(Self::int32x4_cast(a), w.to_bits() as i32))
    }

    #[inline]
    fn float32x4_get_x(a: Float32x4) -> f32 {
        unsafe { _mm_cvtss_f32(a.0) }
    }

    #[inline]
    fn float32x4_get_y(a: Float32x4) -> f32 {
        unsafe { _mm_cvtss_f32(_mm_shuffle_ps::<0x55>(a.0, a.0)) }
    }

    #[inline]
    fn float32x4_get_z(a: Float32x4) -> f32 {
        unsafe { _mm_cvtss_f32(_mm_shuffle_ps::<0xaa>(a.0, a.0)) }
    }

    #[inline]
    fn float32x4_get_w(a: Float32x4) -> f32 {
        unsafe { _mm_cvtss_f32(_mm_shuffle_ps::<0xff>(a.0, a.0)) }
    }

    #[inline]
    unsafe fn float32x4_load(src: *const f32) -> Float32x4 {
        unsafe { Float32x4(_mm_load_ps(src)) }
    }

    #[inline]
    fn float32x4_uload(src: &[f32]) -> Float32x4 {
        let src = &src[..4];
        unsafe { Float32x4(_mm_loadu_ps(src.as_ptr())) }
    }

    #[inline]
    unsafe fn float32x4_store(dest: *mut f32, a: Float32x4) {
        unsafe { _mm_store_ps(dest, a.0) }
    }

    #[inline]
    fn float32x4_ustore(dest: &mut [f32], a: Float32x4) {
        let dest = &mut dest[..4];
        unsafe { _mm_storeu_ps(dest.as_mut_ptr(), a.0) }
    }

    #[inline]
    fn float32x4_from_array(v: [f32; 4]) -> Float32x4 {
        unsafe { Float32x4(_mm_setr_ps(v[0], v[1], v[2], v[3])) }
    }

    #[inline]
    fn float32x4_to_array(a: Float32x4) -> [f32; 4] {
        let mut out = [0f32; 4];
        Self::float32x4_ustore(&mut out, a);
        out
    }

    #[inline]
    fn float32x4_zero() -> Float32x4 {
        unsafe { Float32x4(_mm_setzero_ps()) }
    }

    #[inline]
    fn float32x4_set1(s: f32) -> Float32x4 {
        unsafe { Float32x4(_mm_set1_ps(s)) }
    }

    #[inline]
    fn float32x4_set4(x: f32, y: f32, z: f32, w: f32) -> Float32x4 {
        unsafe { Float32x4(_mm_setr_ps(x, y, z, w)) }
    }

    #[inline]
    fn float32x4_neg(a: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_xor_ps(a.0, _mm_set1_ps(-0.0))) }
    }

    #[inline]
    fn float32x4_abs(a: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_andnot_ps(_mm_set1_ps(-0.0), a.0)) }
    }

    #[inline]
    fn float32x4_add(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_add_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_sub(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_sub_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_mul(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_mul_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_div(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_div_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_sqrt(a: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_sqrt_ps(a.0)) }
    }

    #[inline]
    fn float32x4_madd(a: Float32x4, b: Float32x4, c: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_add_ps(a.0, _mm_mul_ps(b.0, c.0))) }
    }

    #[inline]
    fn float32x4_min(a: Float32x4, b: Float32x4) -> Float32x4 {
        // minps is defined as `a < b ? a : b`
        unsafe { Float32x4(_mm_min_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_max(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_max_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_and(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_and_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_nand(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_andnot_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_or(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_or_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_xor(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_xor_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_eq(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_cmpeq_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_neq(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_cmpneq_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_lt(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_cmplt_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_le(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_cmple_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_gt(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_cmpgt_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_compare_ge(a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_cmpge_ps(a.0, b.0)) }
    }

    #[inline]
    fn float32x4_select(mask: Float32x4, a: Float32x4, b: Float32x4) -> Float32x4 {
        unsafe { Float32x4(_mm_or_ps(_mm_and_ps(mask.0, a.0), _mm_andnot_ps(mask.0, b.0))) }
    }

    #[inline]
    fn float32x4_get_mask(a: Float32x4) -> u32 {
        unsafe { _mm_movemask_ps(a.0) as u32 }
    }
}

// ============================================================================
// uint8x16
// ============================================================================

impl Uint8x16Ops for Sse2 {
    #[inline]
    unsafe fn uint8x16_load(src: *const u8) -> Uint8x16 {
        unsafe { Uint8x16(_mm_load_si128(src as *const __m128i)) }
    }

    #[inline]
    fn uint8x16_uload(src: &[u8]) -> Uint8x16 {
        let src = &src[..16];
        unsafe { Uint8x16(_mm_loadu_si128(src.as_ptr() as *const __m128i)) }
    }

    #[inline]
    unsafe fn uint8x16_store(dest: *mut u8, a: Uint8x16) {
        unsafe { _mm_store_si128(dest as *mut __m128i, a.0) }
    }

    #[inline]
    fn uint8x16_ustore(dest: &mut [u8], a: Uint8x16) {
        let dest = &mut dest[..16];
        unsafe { _mm_storeu_si128(dest.as_mut_ptr() as *mut __m128i, a.0) }
    }

    #[inline]
    fn uint8x16_from_array(v: [u8; 16]) -> Uint8x16 {
        Self::uint8x16_uload(&v)
    }

    #[inline]
    fn uint8x16_to_array(a: Uint8x16) -> [u8; 16] {
        let mut out = [0u8; 16];
        Self::uint8x16_ustore(&mut out, a);
        out
    }

    #[inline]
    fn uint8x16_zero() -> Uint8x16 {
        unsafe { Uint8x16(_mm_setzero_si128()) }
    }

    #[inline]
    fn uint8x16_set1(s: u8) -> Uint8x16 {
        unsafe { Uint8x16(_mm_set1_epi8(s as i8)) }
    }

    #[inline]
    fn uint8x16_add(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_add_epi8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_sub(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_sub_epi8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_adds(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_adds_epu8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_subs(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_subs_epu8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_avg(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_avg_epu8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_min(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_min_epu8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_max(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_max_epu8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_and(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_and_si128(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_nand(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_andnot_si128(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_or(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_or_si128(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_xor(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_xor_si128(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_compare_eq(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(_mm_cmpeq_epi8(a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_compare_gt(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe {
            // no unsigned byte compare in SSE2: flip the sign bits and compare signed
            let flip = _mm_set1_epi8(i8::MIN);
            Uint8x16(_mm_cmpgt_epi8(_mm_xor_si128(a.0, flip), _mm_xor_si128(b.0, flip)))
        }
    }

    #[inline]
    fn uint8x16_select(mask: Uint8x16, a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        unsafe { Uint8x16(blend_si128(mask.0, a.0, b.0)) }
    }

    #[inline]
    fn uint8x16_get_mask(a: Uint8x16) -> u32 {
        unsafe { _mm_movemask_epi8(a.0) as u32 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_shows_lanes() {
        let v = Sse2::int32x4_set4(1, 2, 3, 4);
        assert_eq!(format!("{:?}", v), "Int32x4([1, 2, 3, 4])");
    }

    #[test]
    fn test_insert_epi16_lane_writes() {
        let v = Sse2::int32x4_set1(0);
        let v = Sse2::int32x4_set_z(v, -2);
        let v = Sse2::int32x4_set_y(v, 0x1234_5678);
        assert_eq!(Sse2::int32x4_to_array(v), [0, 0x1234_5678, -2, 0]);
    }

    #[test]
    fn test_cvtt_patch() {
        let v = Sse2::float32x4_set4(f32::NAN, 3.0e9, -3.0e9, f32::INFINITY);
        let expected = [0, i32::MAX, i32::MIN, i32::MAX];
        assert_eq!(Sse2::int32x4_to_array(Sse2::int32x4_truncate(v)), expected);
        assert_eq!(Sse2::int32x4_to_array(Sse2::int32x4_convert(v)), expected);
    }

    #[test]
    fn test_mullo_wraps() {
        let a = Sse2::int32x4_set4(3, -7, i32::MAX, 65_536);
        let b = Sse2::int32x4_set4(5, 9, 2, 65_536);
        assert_eq!(Sse2::int32x4_to_array(Sse2::int32x4_mullo(a, b)), [15, -63, -2, 0]);
    }

    #[test]
    fn test_huge_runtime_count() {
        let v = Sse2::int32x4_set4(-8, 8, i32::MIN, 1);
        assert_eq!(Sse2::int32x4_to_array(Sse2::int32x4_sra_var(v, u32::MAX)), [-1, 0, -1, 0]);
        assert_eq!(Sse2::int32x4_to_array(Sse2::int32x4_sll_var(v, u32::MAX)), [0; 4]);
    }
}
