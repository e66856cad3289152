// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! RGBA8 pixel kernels written once against the backend traits.
//!
//! Pixels are `u32` values holding R, G, B, A in ascending byte order
//! (R in the lowest byte), which is what `int32x4_unpack`/`int32x4_pack`
//! map to lanes x, y, z, w.
//!
//! Each kernel has a generic form (`*_with::<B>`) used by the verification
//! layer to replay it on the scalar reference, and a plain form running on
//! the active backend.

use crate::simd::{Active, FullBackend};
use crate::{Error, Result};

#[inline]
fn check_len(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(Error::LengthMismatch { expected, got });
    }
    Ok(())
}

/// Multiply every channel of `src` by the matching channel of `color`,
/// treating 255 as 1.0, and write the result to `dest`.
///
/// Rounds to nearest: `modulate(255, c) == c` and `modulate(0, c) == 0`.
pub fn modulate_rgba_with<B: FullBackend>(dest: &mut [u32], src: &[u32], color: u32) -> Result<()> {
    check_len(dest.len(), src.len())?;

    let c = B::int32x4_unpack(color);
    let bias = B::int32x4_set1(128);

    for (d, &s) in dest.iter_mut().zip(src) {
        // exact x / 255 rounding for x in 0..=65025: t = x + 128; (t + (t >> 8)) >> 8
        let t = B::int32x4_add(B::int32x4_mullo(B::int32x4_unpack(s), c), bias);
        let t = B::int32x4_srl::<8>(B::int32x4_add(t, B::int32x4_srl::<8>(t)));
        *d = B::int32x4_pack(t);
    }
    Ok(())
}

/// Per-channel linear interpolation `a + (b - a) * t`, rounded half away
/// from zero. `t` is clamped to `0.0..=1.0`; NaN is treated as 0.
pub fn lerp_rgba_with<B: FullBackend>(
    dest: &mut [u32],
    a: &[u32],
    b: &[u32],
    t: f32,
) -> Result<()> {
    check_len(dest.len(), a.len())?;
    check_len(dest.len(), b.len())?;

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let t = B::float32x4_set1(t);

    for ((d, &pa), &pb) in dest.iter_mut().zip(a).zip(b) {
        let fa = B::float32x4_convert(B::int32x4_unpack(pa));
        let fb = B::float32x4_convert(B::int32x4_unpack(pb));
        let f = B::float32x4_madd(fa, B::float32x4_sub(fb, fa), t);
        *d = B::int32x4_pack(B::int32x4_convert(f));
    }
    Ok(())
}

/// Rounding per-byte average of two images, 4 pixels per vector.
pub fn average_rgba_with<B: FullBackend>(dest: &mut [u32], a: &[u32], b: &[u32]) -> Result<()> {
    check_len(dest.len(), a.len())?;
    check_len(dest.len(), b.len())?;

    let dest: &mut [u8] = bytemuck::cast_slice_mut(dest);
    let a: &[u8] = bytemuck::cast_slice(a);
    let b: &[u8] = bytemuck::cast_slice(b);

    let split = dest.len() / 16 * 16;
    let (dest_body, dest_tail) = dest.split_at_mut(split);
    let (a_body, a_tail) = a.split_at(split);
    let (b_body, b_tail) = b.split_at(split);

    for ((d, x), y) in dest_body
        .chunks_exact_mut(16)
        .zip(a_body.chunks_exact(16))
        .zip(b_body.chunks_exact(16))
    {
        B::uint8x16_ustore(d, B::uint8x16_avg(B::uint8x16_uload(x), B::uint8x16_uload(y)));
    }

    if !dest_tail.is_empty() {
        let n = dest_tail.len();
        let mut x = [0u8; 16];
        let mut y = [0u8; 16];
        x[..n].copy_from_slice(a_tail);
        y[..n].copy_from_slice(b_tail);

        let avg = B::uint8x16_avg(B::uint8x16_from_array(x), B::uint8x16_from_array(y));
        let avg = B::uint8x16_to_array(avg);
        dest_tail.copy_from_slice(&avg[..n]);
    }
    Ok(())
}

/// [`modulate_rgba_with`] on the active backend.
pub fn modulate_rgba(dest: &mut [u32], src: &[u32], color: u32) -> Result<()> {
    modulate_rgba_with::<Active>(dest, src, color)
}

/// [`lerp_rgba_with`] on the active backend.
pub fn lerp_rgba(dest: &mut [u32], a: &[u32], b: &[u32], t: f32) -> Result<()> {
    lerp_rgba_with::<Active>(dest, a, b, t)
}

/// [`average_rgba_with`] on the active backend.
pub fn average_rgba(dest: &mut [u32], a: &[u32], b: &[u32]) -> Result<()> {
    average_rgba_with::<Active>(dest, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::Reference;

    fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        u32::from_le_bytes([r, g, b, a])
    }

    #[test]
    fn test_modulate_identity_and_zero() {
        let src = [rgba(10, 20, 30, 40), rgba(255, 0, 128, 255)];
        let mut dest = [0u32; 2];

        modulate_rgba(&mut dest, &src, rgba(255, 255, 255, 255)).unwrap();
        assert_eq!(dest, src);

        modulate_rgba(&mut dest, &src, 0).unwrap();
        assert_eq!(dest, [0, 0]);
    }

    #[test]
    fn test_modulate_rounds() {
        let mut dest = [0u32; 1];
        modulate_rgba(&mut dest, &[rgba(128, 255, 1, 200)], rgba(128, 64, 255, 100)).unwrap();
        // 128*128/255 = 64.25, 255*64/255 = 64, 1*255/255 = 1, 200*100/255 = 78.43
        assert_eq!(dest[0].to_le_bytes(), [64, 64, 1, 78]);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = [rgba(0, 100, 200, 255)];
        let b = [rgba(255, 50, 0, 0)];
        let mut dest = [0u32; 1];

        lerp_rgba(&mut dest, &a, &b, 0.0).unwrap();
        assert_eq!(dest, a);
        lerp_rgba(&mut dest, &a, &b, 1.0).unwrap();
        assert_eq!(dest, b);
        lerp_rgba(&mut dest, &a, &b, 0.5).unwrap();
        // 127.5 -> 128, 75, 100, 127.5 -> 128
        assert_eq!(dest[0].to_le_bytes(), [128, 75, 100, 128]);

        lerp_rgba(&mut dest, &a, &b, f32::NAN).unwrap();
        assert_eq!(dest, a);
        lerp_rgba(&mut dest, &a, &b, 7.0).unwrap();
        assert_eq!(dest, b);
    }

    #[test]
    fn test_average_with_tail() {
        let a: Vec<u32> = (0..7).map(|i| rgba(i, 255, 0, 1)).collect();
        let b: Vec<u32> = (0..7).map(|i| rgba(i + 1, 0, 0, 2)).collect();
        let mut dest = vec![0u32; 7];

        average_rgba(&mut dest, &a, &b).unwrap();
        for (i, px) in dest.iter().enumerate() {
            assert_eq!(px.to_le_bytes(), [i as u8 + 1, 128, 0, 2], "pixel {}", i);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let mut dest = [0u32; 3];
        let err = modulate_rgba(&mut dest, &[0; 4], 0).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 3, got: 4 }));
        assert!(lerp_rgba(&mut dest, &[0; 3], &[0; 2], 0.5).is_err());
        assert!(average_rgba(&mut dest, &[0; 2], &[0; 3]).is_err());
    }

    #[test]
    fn test_active_matches_reference() {
        let a: Vec<u32> = (0..23u32).map(|i| i.wrapping_mul(0x9e37_79b9)).collect();
        let b: Vec<u32> = (0..23u32).map(|i| i.wrapping_mul(0x85eb_ca6b) ^ 0xff00_ff00).collect();
        let mut got = vec![0u32; 23];
        let mut expected = vec![0u32; 23];

        modulate_rgba(&mut got, &a, 0x80c0_40ff).unwrap();
        modulate_rgba_with::<Reference>(&mut expected, &a, 0x80c0_40ff).unwrap();
        assert_eq!(got, expected);

        lerp_rgba(&mut got, &a, &b, 0.3).unwrap();
        lerp_rgba_with::<Reference>(&mut expected, &a, &b, 0.3).unwrap();
        assert_eq!(got, expected);

        average_rgba(&mut got, &a, &b).unwrap();
        average_rgba_with::<Reference>(&mut expected, &a, &b).unwrap();
        assert_eq!(got, expected);
    }
}
