// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Portable scalar backend.
//!
//! Vectors are plain lane arrays with 16-byte alignment; every operation is
//! a per-lane loop the compiler is free to auto-vectorize. This backend is
//! compiled on every target: it is the active backend where no native one
//! matches, and the reference the native backends are checked against.
//!
//! The lane semantics here are the definition of the API. Native backends
//! that take a shortcut (saturating conversions, bitwise select, the shift
//! count policy) have to land on exactly these results.

use super::{BackendKind, Float32x4Ops, Int32x4Ops, SimdBackend, Uint8x16Ops};

/// Scalar reference backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

/// 4 x i32 lanes.
#[derive(Debug, Clone, Copy)]
#[repr(C, align(16))]
pub struct Int32x4([i32; 4]);

/// 4 x f32 lanes.
#[derive(Debug, Clone, Copy)]
#[repr(C, align(16))]
pub struct Float32x4([f32; 4]);

/// 16 x u8 lanes.
#[derive(Debug, Clone, Copy)]
#[repr(C, align(16))]
pub struct Uint8x16([u8; 16]);

impl SimdBackend for Scalar {
    const KIND: BackendKind = BackendKind::Scalar;

    type Int32x4 = Int32x4;
    type Float32x4 = Float32x4;
    type Uint8x16 = Uint8x16;
}

#[inline(always)]
fn map1<T: Copy, U: Copy + Default, const L: usize>(a: [T; L], f: impl Fn(T) -> U) -> [U; L] {
    let mut out = [U::default(); L];
    for i in 0..L {
        out[i] = f(a[i]);
    }
    out
}

#[inline(always)]
fn map2<T: Copy, U: Copy + Default, const L: usize>(
    a: [T; L],
    b: [T; L],
    f: impl Fn(T, T) -> U,
) -> [U; L] {
    let mut out = [U::default(); L];
    for i in 0..L {
        out[i] = f(a[i], b[i]);
    }
    out
}

#[inline(always)]
fn mask32(cond: bool) -> i32 {
    if cond {
        -1
    } else {
        0
    }
}

#[inline(always)]
fn mask_f32(cond: bool) -> f32 {
    f32::from_bits(if cond { u32::MAX } else { 0 })
}

#[inline(always)]
fn bits_f32(a: [f32; 4], b: [f32; 4], f: impl Fn(u32, u32) -> u32) -> [f32; 4] {
    map2(a, b, |x, y| f32::from_bits(f(x.to_bits(), y.to_bits())))
}

/// Round half away from zero: OR the sign of `x` into 0.5, add, truncate.
#[inline(always)]
fn round_away(x: f32) -> i32 {
    let sign = x.to_bits() & 0x8000_0000;
    let bias = f32::from_bits(sign | 0.5f32.to_bits());
    (x + bias) as i32
}

impl Int32x4Ops for Scalar {
    #[inline]
    fn int32x4_cast(s: Float32x4) -> Int32x4 {
        Int32x4(map1(s.0, |x| x.to_bits() as i32))
    }

    #[inline]
    fn int32x4_convert(s: Float32x4) -> Int32x4 {
        Int32x4(map1(s.0, round_away))
    }

    #[inline]
    fn int32x4_truncate(s: Float32x4) -> Int32x4 {
        // `as` truncates toward zero, saturates and maps NaN to 0
        Int32x4(map1(s.0, |x| x as i32))
    }

    #[inline]
    fn int32x4_set_x(mut a: Int32x4, x: i32) -> Int32x4 {
        a.0[0] = x;
        a
    }

    #[inline]
    fn int32x4_set_y(mut a: Int32x4, y: i32) -> Int32x4 {
        a.0[1] = y;
        a
    }

    #[inline]
    fn int32x4_set_z(mut a: Int32x4, z: i32) -> Int32x4 {
        a.0[2] = z;
        a
    }

    #[inline]
    fn int32x4_set_w(mut a: Int32x4, w: i32) -> Int32x4 {
        a.0[3] = w;
        a
    }

    #[inline]
    fn int32x4_get_x(a: Int32x4) -> i32 {
        a.0[0]
    }

    #[inline]
    fn int32x4_get_y(a: Int32x4) -> i32 {
        a.0[1]
    }

    #[inline]
    fn int32x4_get_z(a: Int32x4) -> i32 {
        a.0[2]
    }

    #[inline]
    fn int32x4_get_w(a: Int32x4) -> i32 {
        a.0[3]
    }

    #[inline]
    unsafe fn int32x4_load(src: *const i32) -> Int32x4 {
        debug_assert_eq!(src as usize % 16, 0, "int32x4_load requires 16-byte alignment");
        // Safety: caller guarantees 16 readable, 16-byte aligned bytes
        unsafe { src.cast::<Int32x4>().read() }
    }

    #[inline]
    fn int32x4_uload(src: &[i32]) -> Int32x4 {
        Int32x4([src[0], src[1], src[2], src[3]])
    }

    #[inline]
    unsafe fn int32x4_store(dest: *mut i32, a: Int32x4) {
        debug_assert_eq!(dest as usize % 16, 0, "int32x4_store requires 16-byte alignment");
        // Safety: caller guarantees 16 writable, 16-byte aligned bytes
        unsafe { dest.cast::<Int32x4>().write(a) }
    }

    #[inline]
    fn int32x4_ustore(dest: &mut [i32], a: Int32x4) {
        dest[..4].copy_from_slice(&a.0);
    }

    #[inline]
    fn int32x4_from_array(v: [i32; 4]) -> Int32x4 {
        Int32x4(v)
    }

    #[inline]
    fn int32x4_to_array(a: Int32x4) -> [i32; 4] {
        a.0
    }

    #[inline]
    fn int32x4_zero() -> Int32x4 {
        Int32x4([0; 4])
    }

    #[inline]
    fn int32x4_set1(s: i32) -> Int32x4 {
        Int32x4([s; 4])
    }

    #[inline]
    fn int32x4_set4(x: i32, y: i32, z: i32, w: i32) -> Int32x4 {
        Int32x4([x, y, z, w])
    }

    #[inline]
    fn int32x4_neg(a: Int32x4) -> Int32x4 {
        Int32x4(map1(a.0, i32::wrapping_neg))
    }

    #[inline]
    fn int32x4_add(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, i32::wrapping_add))
    }

    #[inline]
    fn int32x4_sub(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, i32::wrapping_sub))
    }

    #[inline]
    fn int32x4_mullo(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, i32::wrapping_mul))
    }

    #[inline]
    fn int32x4_abs(a: Int32x4) -> Int32x4 {
        Int32x4(map1(a.0, i32::wrapping_abs))
    }

    #[inline]
    fn int32x4_min(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, i32::min))
    }

    #[inline]
    fn int32x4_max(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, i32::max))
    }

    #[inline]
    fn int32x4_and(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, |x, y| x & y))
    }

    #[inline]
    fn int32x4_nand(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, |x, y| y & !x))
    }

    #[inline]
    fn int32x4_or(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, |x, y| x | y))
    }

    #[inline]
    fn int32x4_xor(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, |x, y| x ^ y))
    }

    #[inline]
    fn int32x4_not(a: Int32x4) -> Int32x4 {
        Int32x4(map1(a.0, |x| !x))
    }

    #[inline]
    fn int32x4_sll<const N: i32>(a: Int32x4) -> Int32x4 {
        Self::int32x4_sll_var(a, N as u32)
    }

    #[inline]
    fn int32x4_srl<const N: i32>(a: Int32x4) -> Int32x4 {
        Self::int32x4_srl_var(a, N as u32)
    }

    #[inline]
    fn int32x4_sra<const N: i32>(a: Int32x4) -> Int32x4 {
        Self::int32x4_sra_var(a, N as u32)
    }

    #[inline]
    fn int32x4_sll_var(a: Int32x4, count: u32) -> Int32x4 {
        Int32x4(map1(a.0, |x| (x as u32).checked_shl(count).unwrap_or(0) as i32))
    }

    #[inline]
    fn int32x4_srl_var(a: Int32x4, count: u32) -> Int32x4 {
        Int32x4(map1(a.0, |x| (x as u32).checked_shr(count).unwrap_or(0) as i32))
    }

    #[inline]
    fn int32x4_sra_var(a: Int32x4, count: u32) -> Int32x4 {
        let count = count.min(31);
        Int32x4(map1(a.0, |x| x >> count))
    }

    #[inline]
    fn int32x4_compare_eq(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, |x, y| mask32(x == y)))
    }

    #[inline]
    fn int32x4_compare_gt(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, |x, y| mask32(x > y)))
    }

    #[inline]
    fn int32x4_compare_lt(a: Int32x4, b: Int32x4) -> Int32x4 {
        Int32x4(map2(a.0, b.0, |x, y| mask32(x < y)))
    }

    #[inline]
    fn int32x4_select(mask: Int32x4, a: Int32x4, b: Int32x4) -> Int32x4 {
        let mut out = [0i32; 4];
        for i in 0..4 {
            out[i] = (mask.0[i] & a.0[i]) | (!mask.0[i] & b.0[i]);
        }
        Int32x4(out)
    }

    #[inline]
    fn int32x4_get_mask(a: Int32x4) -> u32 {
        let [x, y, z, w] = a.0;
        ((x & 1) | (y & 2) | (z & 4) | (w & 8)) as u32
    }

    #[inline]
    fn int32x4_pack(s: Int32x4) -> u32 {
        let bytes = map1(s.0, |x| x.clamp(0, 255) as u8);
        u32::from_le_bytes(bytes)
    }

    #[inline]
    fn int32x4_unpack(s: u32) -> Int32x4 {
        Int32x4(map1(s.to_le_bytes(), i32::from))
    }
}

impl Float32x4Ops for Scalar {
    #[inline]
    fn float32x4_cast(s: Int32x4) -> Float32x4 {
        Float32x4(map1(s.0, |x| f32::from_bits(x as u32)))
    }

    #[inline]
    fn float32x4_convert(s: Int32x4) -> Float32x4 {
        Float32x4(map1(s.0, |x| x as f32))
    }

    #[inline]
    fn float32x4_set_x(mut a: Float32x4, x: f32) -> Float32x4 {
        a.0[0] = x;
        a
    }

    #[inline]
    fn float32x4_set_y(mut a: Float32x4, y: f32) -> Float32x4 {
        a.0[1] = y;
        a
    }

    #[inline]
    fn float32x4_set_z(mut a: Float32x4, z: f32) -> Float32x4 {
        a.0[2] = z;
        a
    }

    #[inline]
    fn float32x4_set_w(mut a: Float32x4, w: f32) -> Float32x4 {
        a.0[3] = w;
        a
    }

    #[inline]
    fn float32x4_get_x(a: Float32x4) -> f32 {
        a.0[0]
    }

    #[inline]
    fn float32x4_get_y(a: Float32x4) -> f32 {
        a.0[1]
    }

    #[inline]
    fn float32x4_get_z(a: Float32x4) -> f32 {
        a.0[2]
    }

    #[inline]
    fn float32x4_get_w(a: Float32x4) -> f32 {
        a.0[3]
    }

    #[inline]
    unsafe fn float32x4_load(src: *const f32) -> Float32x4 {
        debug_assert_eq!(src as usize % 16, 0, "float32x4_load requires 16-byte alignment");
        // Safety: caller guarantees 16 readable, 16-byte aligned bytes
        unsafe { src.cast::<Float32x4>().read() }
    }

    #[inline]
    fn float32x4_uload(src: &[f32]) -> Float32x4 {
        Float32x4([src[0], src[1], src[2], src[3]])
    }

    #[inline]
    unsafe fn float32x4_store(dest: *mut f32, a: Float32x4) {
        debug_assert_eq!(dest as usize % 16, 0, "float32x4_store requires 16-byte alignment");
        // Safety: caller guarantees 16 writable, 16-byte aligned bytes
        unsafe { dest.cast::<Float32x4>().write(a) }
    }

    #[inline]
    fn float32x4_ustore(dest: &mut [f32], a: Float32x4) {
        dest[..4].copy_from_slice(&a.0);
    }

    #[inline]
    fn float32x4_from_array(v: [f32; 4]) -> Float32x4 {
        Float32x4(v)
    }

    #[inline]
    fn float32x4_to_array(a: Float32x4) -> [f32; 4] {
        a.0
    }

    #[inline]
    fn float32x4_zero() -> Float32x4 {
        Float32x4([0.0; 4])
    }

    #[inline]
    fn float32x4_set1(s: f32) -> Float32x4 {
        Float32x4([s; 4])
    }

    #[inline]
    fn float32x4_set4(x: f32, y: f32, z: f32, w: f32) -> Float32x4 {
        Float32x4([x, y, z, w])
    }

    #[inline]
    fn float32x4_neg(a: Float32x4) -> Float32x4 {
        Float32x4(map1(a.0, |x| -x))
    }

    #[inline]
    fn float32x4_abs(a: Float32x4) -> Float32x4 {
        Float32x4(map1(a.0, f32::abs))
    }

    #[inline]
    fn float32x4_add(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| x + y))
    }

    #[inline]
    fn float32x4_sub(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| x - y))
    }

    #[inline]
    fn float32x4_mul(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| x * y))
    }

    #[inline]
    fn float32x4_div(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| x / y))
    }

    #[inline]
    fn float32x4_sqrt(a: Float32x4) -> Float32x4 {
        Float32x4(map1(a.0, f32::sqrt))
    }

    #[inline]
    fn float32x4_madd(a: Float32x4, b: Float32x4, c: Float32x4) -> Float32x4 {
        let product = Self::float32x4_mul(b, c);
        Self::float32x4_add(a, product)
    }

    #[inline]
    fn float32x4_min(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| if x < y { x } else { y }))
    }

    #[inline]
    fn float32x4_max(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| if x > y { x } else { y }))
    }

    #[inline]
    fn float32x4_and(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(bits_f32(a.0, b.0, |x, y| x & y))
    }

    #[inline]
    fn float32x4_nand(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(bits_f32(a.0, b.0, |x, y| y & !x))
    }

    #[inline]
    fn float32x4_or(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(bits_f32(a.0, b.0, |x, y| x | y))
    }

    #[inline]
    fn float32x4_xor(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(bits_f32(a.0, b.0, |x, y| x ^ y))
    }

    #[inline]
    fn float32x4_compare_eq(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| mask_f32(x == y)))
    }

    #[inline]
    fn float32x4_compare_neq(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| mask_f32(x != y)))
    }

    #[inline]
    fn float32x4_compare_lt(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| mask_f32(x < y)))
    }

    #[inline]
    fn float32x4_compare_le(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| mask_f32(x <= y)))
    }

    #[inline]
    fn float32x4_compare_gt(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| mask_f32(x > y)))
    }

    #[inline]
    fn float32x4_compare_ge(a: Float32x4, b: Float32x4) -> Float32x4 {
        Float32x4(map2(a.0, b.0, |x, y| mask_f32(x >= y)))
    }

    #[inline]
    fn float32x4_select(mask: Float32x4, a: Float32x4, b: Float32x4) -> Float32x4 {
        let mut out = [0.0f32; 4];
        for i in 0..4 {
            let m = mask.0[i].to_bits();
            out[i] = f32::from_bits((m & a.0[i].to_bits()) | (!m & b.0[i].to_bits()));
        }
        Float32x4(out)
    }

    #[inline]
    fn float32x4_get_mask(a: Float32x4) -> u32 {
        a.0.iter()
            .enumerate()
            .fold(0, |acc, (i, x)| acc | ((x.to_bits() >> 31) << i))
    }
}

impl Uint8x16Ops for Scalar {
    #[inline]
    unsafe fn uint8x16_load(src: *const u8) -> Uint8x16 {
        debug_assert_eq!(src as usize % 16, 0, "uint8x16_load requires 16-byte alignment");
        // Safety: caller guarantees 16 readable, 16-byte aligned bytes
        unsafe { src.cast::<Uint8x16>().read() }
    }

    #[inline]
    fn uint8x16_uload(src: &[u8]) -> Uint8x16 {
        let mut out = [0u8; 16];
        out.copy_from_slice(&src[..16]);
        Uint8x16(out)
    }

    #[inline]
    unsafe fn uint8x16_store(dest: *mut u8, a: Uint8x16) {
        debug_assert_eq!(dest as usize % 16, 0, "uint8x16_store requires 16-byte alignment");
        // Safety: caller guarantees 16 writable, 16-byte aligned bytes
        unsafe { dest.cast::<Uint8x16>().write(a) }
    }

    #[inline]
    fn uint8x16_ustore(dest: &mut [u8], a: Uint8x16) {
        dest[..16].copy_from_slice(&a.0);
    }

    #[inline]
    fn uint8x16_from_array(v: [u8; 16]) -> Uint8x16 {
        Uint8x16(v)
    }

    #[inline]
    fn uint8x16_to_array(a: Uint8x16) -> [u8; 16] {
        a.0
    }

    #[inline]
    fn uint8x16_zero() -> Uint8x16 {
        Uint8x16([0; 16])
    }

    #[inline]
    fn uint8x16_set1(s: u8) -> Uint8x16 {
        Uint8x16([s; 16])
    }

    #[inline]
    fn uint8x16_add(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, u8::wrapping_add))
    }

    #[inline]
    fn uint8x16_sub(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, u8::wrapping_sub))
    }

    #[inline]
    fn uint8x16_adds(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, u8::saturating_add))
    }

    #[inline]
    fn uint8x16_subs(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, u8::saturating_sub))
    }

    #[inline]
    fn uint8x16_avg(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, |x, y| ((x as u16 + y as u16 + 1) >> 1) as u8))
    }

    #[inline]
    fn uint8x16_min(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, u8::min))
    }

    #[inline]
    fn uint8x16_max(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, u8::max))
    }

    #[inline]
    fn uint8x16_and(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, |x, y| x & y))
    }

    #[inline]
    fn uint8x16_nand(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, |x, y| y & !x))
    }

    #[inline]
    fn uint8x16_or(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, |x, y| x | y))
    }

    #[inline]
    fn uint8x16_xor(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, |x, y| x ^ y))
    }

    #[inline]
    fn uint8x16_compare_eq(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, |x, y| if x == y { 0xff } else { 0 }))
    }

    #[inline]
    fn uint8x16_compare_gt(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        Uint8x16(map2(a.0, b.0, |x, y| if x > y { 0xff } else { 0 }))
    }

    #[inline]
    fn uint8x16_select(mask: Uint8x16, a: Uint8x16, b: Uint8x16) -> Uint8x16 {
        let mut out = [0u8; 16];
        for i in 0..16 {
            out[i] = (mask.0[i] & a.0[i]) | (!mask.0[i] & b.0[i]);
        }
        Uint8x16(out)
    }

    #[inline]
    fn uint8x16_get_mask(a: Uint8x16) -> u32 {
        a.0.iter()
            .enumerate()
            .fold(0, |acc, (i, &x)| acc | (((x >> 7) as u32) << i))
    }
}
