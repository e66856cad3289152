// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! 16 x u8 operations on the active backend.

use super::{Active, SimdBackend, Uint8x16Ops};

/// 16 x u8 vector of the active backend.
pub type Uint8x16 = <Active as SimdBackend>::Uint8x16;

/// # Safety
///
/// `src` must be valid for reading 16 bytes and aligned to 16 bytes.
#[inline]
pub unsafe fn uint8x16_load(src: *const u8) -> Uint8x16 {
    unsafe { Active::uint8x16_load(src) }
}

/// Load the first 16 bytes of `src`. Panics if `src.len() < 16`.
#[inline]
pub fn uint8x16_uload(src: &[u8]) -> Uint8x16 {
    Active::uint8x16_uload(src)
}

/// # Safety
///
/// `dest` must be valid for writing 16 bytes and aligned to 16 bytes.
#[inline]
pub unsafe fn uint8x16_store(dest: *mut u8, a: Uint8x16) {
    unsafe { Active::uint8x16_store(dest, a) }
}

/// Store into the first 16 bytes of `dest`. Panics if `dest.len() < 16`.
#[inline]
pub fn uint8x16_ustore(dest: &mut [u8], a: Uint8x16) {
    Active::uint8x16_ustore(dest, a)
}

#[inline]
pub fn uint8x16_from_array(v: [u8; 16]) -> Uint8x16 {
    Active::uint8x16_from_array(v)
}

#[inline]
pub fn uint8x16_to_array(a: Uint8x16) -> [u8; 16] {
    Active::uint8x16_to_array(a)
}

#[inline]
pub fn uint8x16_zero() -> Uint8x16 {
    Active::uint8x16_zero()
}

#[inline]
pub fn uint8x16_set1(s: u8) -> Uint8x16 {
    Active::uint8x16_set1(s)
}

/// Wrapping add.
#[inline]
pub fn uint8x16_add(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_add(a, b)
}

/// Wrapping subtract.
#[inline]
pub fn uint8x16_sub(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_sub(a, b)
}

/// Add, saturating at 255.
#[inline]
pub fn uint8x16_adds(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_adds(a, b)
}

/// Subtract, saturating at 0.
#[inline]
pub fn uint8x16_subs(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_subs(a, b)
}

/// Rounding average `(a + b + 1) >> 1` without intermediate overflow.
#[inline]
pub fn uint8x16_avg(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_avg(a, b)
}

#[inline]
pub fn uint8x16_min(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_min(a, b)
}

#[inline]
pub fn uint8x16_max(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_max(a, b)
}

#[inline]
pub fn uint8x16_and(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_and(a, b)
}

/// `b & !a`.
#[inline]
pub fn uint8x16_nand(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_nand(a, b)
}

#[inline]
pub fn uint8x16_or(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_or(a, b)
}

#[inline]
pub fn uint8x16_xor(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_xor(a, b)
}

#[inline]
pub fn uint8x16_compare_eq(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_compare_eq(a, b)
}

/// Unsigned `a > b`.
#[inline]
pub fn uint8x16_compare_gt(a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_compare_gt(a, b)
}

#[inline]
pub fn uint8x16_select(mask: Uint8x16, a: Uint8x16, b: Uint8x16) -> Uint8x16 {
    Active::uint8x16_select(mask, a, b)
}

/// Top bit of each byte, lane i in bit i (16 bits).
#[inline]
pub fn uint8x16_get_mask(a: Uint8x16) -> u32 {
    Active::uint8x16_get_mask(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> [u8; 16] {
        let mut v = [0u8; 16];
        for (i, b) in v.iter_mut().enumerate() {
            *b = (i as u8) * 17;
        }
        v
    }

    #[test]
    fn test_saturating_math() {
        let a = uint8x16_from_array(ramp());
        let b = uint8x16_set1(200);

        let adds = uint8x16_to_array(uint8x16_adds(a, b));
        assert_eq!(adds[0], 200);
        assert_eq!(adds[3], 251);
        assert_eq!(adds[15], 255);

        let subs = uint8x16_to_array(uint8x16_subs(a, b));
        assert_eq!(subs[0], 0);
        assert_eq!(subs[15], 55);

        let add = uint8x16_to_array(uint8x16_add(a, b));
        assert_eq!(add[15], 255u8.wrapping_add(200));
    }

    #[test]
    fn test_avg_rounds_up() {
        let a = uint8x16_set1(255);
        let b = uint8x16_set1(0);
        assert_eq!(uint8x16_to_array(uint8x16_avg(a, b)), [128; 16]);
    }

    #[test]
    fn test_unsigned_compare() {
        let a = uint8x16_from_array(ramp());
        let gt = uint8x16_compare_gt(a, uint8x16_set1(127));
        // lanes 8.. hold 136 and up
        assert_eq!(uint8x16_get_mask(gt), 0xff00);

        let eq = uint8x16_compare_eq(a, uint8x16_set1(34));
        assert_eq!(uint8x16_get_mask(eq), 0b100);
    }

    #[test]
    fn test_select_bytes() {
        let a = uint8x16_set1(0xaa);
        let b = uint8x16_set1(0x55);
        let mask = uint8x16_compare_gt(uint8x16_from_array(ramp()), uint8x16_set1(100));
        let out = uint8x16_to_array(uint8x16_select(mask, a, b));
        for (i, v) in out.iter().enumerate() {
            let expected = if (i as u8) * 17 > 100 { 0xaa } else { 0x55 };
            assert_eq!(*v, expected, "lane {}", i);
        }
    }

    #[test]
    fn test_uload_offset() {
        let bytes: Vec<u8> = (0..32).collect();
        let v = uint8x16_uload(&bytes[3..]);
        assert_eq!(uint8x16_to_array(v)[0], 3);
        assert_eq!(uint8x16_to_array(v)[15], 18);
    }
}
