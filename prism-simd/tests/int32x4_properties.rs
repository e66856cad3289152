// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Algebraic properties of the vector API on the active backend.

use prism_simd::prelude::*;
use proptest::prelude::*;

fn v(a: [i32; 4]) -> Int32x4 {
    int32x4_from_array(a)
}

fn lanes(a: Int32x4) -> [i32; 4] {
    int32x4_to_array(a)
}

#[test]
fn aligned_load_store_at_every_vector_offset() {
    let mut src = AlignedBuffer::<i32>::new(16).unwrap();
    for (i, x) in src.iter_mut().enumerate() {
        *x = i as i32 * 3 - 7;
    }
    let mut dst = AlignedBuffer::<i32>::new(16).unwrap();

    for offset in (0..16).step_by(4) {
        // SAFETY: offsets are multiples of 4 elements into 16-byte aligned buffers
        unsafe {
            let a = int32x4_load(src.as_ptr().add(offset));
            int32x4_store(dst.as_mut_ptr().add(offset), a);
        }
    }
    assert_eq!(src.as_slice(), dst.as_slice());
}

#[test]
fn unaligned_load_store_at_every_element_offset() {
    let src: Vec<i32> = (0..11).collect();
    for offset in 0..=7 {
        let a = int32x4_uload(&src[offset..]);
        let mut out = vec![-1i32; 11];
        int32x4_ustore(&mut out[offset..], a);
        assert_eq!(&out[offset..offset + 4], &src[offset..offset + 4]);
    }
}

#[test]
#[should_panic]
fn uload_short_slice_panics() {
    let _ = int32x4_uload(&[1, 2, 3]);
}

#[test]
fn float_aligned_round_trip() {
    let buf = AlignedBuffer::from_slice(&[1.5f32, -2.0, 0.25, 8.0]).unwrap();
    let mut out = AlignedBuffer::<f32>::new(4).unwrap();
    // SAFETY: both buffers are 16-byte aligned and hold 4 elements
    unsafe {
        float32x4_store(out.as_mut_ptr(), float32x4_load(buf.as_ptr()));
    }
    assert_eq!(out.as_slice(), buf.as_slice());
}

#[test]
fn byte_aligned_load_via_bytemuck() {
    let mut buf = AlignedBuffer::<u32>::new(4).unwrap();
    buf.copy_from_slice(&[0x0403_0201, 0x0807_0605, 0x0c0b_0a09, 0x100f_0e0d]);

    // SAFETY: the u32 buffer is 16-byte aligned and spans 16 bytes
    let bytes = unsafe { uint8x16_load(buf.as_ptr() as *const u8) };
    let words = [0x0403_0201u32, 0x0807_0605, 0x0c0b_0a09, 0x100f_0e0d];
    let expected: [u8; 16] = bytemuck::cast(words);
    assert_eq!(uint8x16_to_array(bytes), expected);
}

#[test]
fn get_mask_of_select_mask() {
    let m = int32x4_set4(-1, 0, -1, 0);
    assert_eq!(int32x4_get_mask(m), 0b0101);

    let picked = int32x4_select(m, int32x4_set1(7), int32x4_set1(9));
    assert_eq!(lanes(picked), [7, 9, 7, 9]);
}

#[test]
fn pack_saturates_both_ends() {
    assert_eq!(int32x4_pack(int32x4_set4(300, -5, 255, 0)), 0x00ff_00ff);
    assert_eq!(int32x4_pack(int32x4_set4(i32::MIN, i32::MAX, 65_536, -65_536)), 0x00ff_ff00);
}

#[test]
fn convert_rounds_ties_away_from_zero() {
    let f = float32x4_set4(2.5, -2.5, 0.5, -1.5);
    assert_eq!(lanes(int32x4_convert(f)), [3, -3, 1, -2]);
}

#[test]
fn convert_saturates() {
    let f = float32x4_set4(f32::NAN, 1.0e10, -1.0e10, f32::NEG_INFINITY);
    assert_eq!(lanes(int32x4_convert(f)), [0, i32::MAX, i32::MIN, i32::MIN]);
    assert_eq!(lanes(int32x4_truncate(f)), [0, i32::MAX, i32::MIN, i32::MIN]);
}

#[test]
fn cast_is_bit_reinterpretation() {
    let f = float32x4_set4(1.0, -0.0, f32::INFINITY, 0.5);
    assert_eq!(
        lanes(int32x4_cast(f)),
        [0x3f80_0000, i32::MIN, 0x7f80_0000, 0x3f00_0000]
    );
    let back = float32x4_to_array(float32x4_cast(int32x4_cast(f)));
    assert_eq!(back.map(f32::to_bits), [1.0f32, -0.0, f32::INFINITY, 0.5].map(f32::to_bits));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn lane_set_get_round_trip(a in any::<[i32; 4]>(), s in any::<i32>()) {
        let x = v(a);
        prop_assert_eq!(int32x4_get_x(int32x4_set_x(x, s)), s);
        prop_assert_eq!(int32x4_get_y(int32x4_set_y(x, s)), s);
        prop_assert_eq!(int32x4_get_z(int32x4_set_z(x, s)), s);
        prop_assert_eq!(int32x4_get_w(int32x4_set_w(x, s)), s);

        // other lanes untouched
        prop_assert_eq!(lanes(int32x4_set_x(x, s)), [s, a[1], a[2], a[3]]);
        prop_assert_eq!(lanes(int32x4_set_y(x, s)), [a[0], s, a[2], a[3]]);
        prop_assert_eq!(lanes(int32x4_set_z(x, s)), [a[0], a[1], s, a[3]]);
        prop_assert_eq!(lanes(int32x4_set_w(x, s)), [a[0], a[1], a[2], s]);
    }

    #[test]
    fn add_sub_inverse(a in any::<[i32; 4]>(), b in any::<[i32; 4]>()) {
        prop_assert_eq!(lanes(int32x4_sub(int32x4_add(v(a), v(b)), v(b))), a);
        let diff = lanes(int32x4_sub(v(a), v(b)));
        prop_assert_eq!(lanes(int32x4_add(v(a), int32x4_neg(v(b)))), diff);
    }

    #[test]
    fn bitwise_identities(a in any::<[i32; 4]>(), b in any::<[i32; 4]>()) {
        let (x, y) = (v(a), v(b));
        prop_assert_eq!(lanes(int32x4_xor(x, x)), [0; 4]);
        prop_assert_eq!(lanes(int32x4_and(x, x)), a);
        prop_assert_eq!(lanes(int32x4_or(x, int32x4_zero())), a);
        prop_assert_eq!(lanes(int32x4_not(int32x4_not(x))), a);
        prop_assert_eq!(lanes(int32x4_nand(x, y)), [0, 1, 2, 3].map(|i| b[i] & !a[i]));
        prop_assert_eq!(lanes(int32x4_or(int32x4_and(x, y), int32x4_nand(x, y))), b);
        prop_assert_eq!(lanes(int32x4_or(x, int32x4_and(x, y))), a);
        prop_assert_eq!(lanes(int32x4_and(x, int32x4_or(x, y))), a);
    }

    #[test]
    fn compare_masks_are_exact(a in any::<[i32; 4]>(), b in any::<[i32; 4]>()) {
        let gt = lanes(int32x4_compare_gt(v(a), v(b)));
        let eq = lanes(int32x4_compare_eq(v(a), v(b)));
        for i in 0..4 {
            prop_assert_eq!(gt[i], if a[i] > b[i] { -1 } else { 0 });
            prop_assert_eq!(eq[i], if a[i] == b[i] { -1 } else { 0 });
        }
        prop_assert_eq!(lanes(int32x4_compare_gt(v(a), v(a))), [0; 4]);
        prop_assert_eq!(int32x4_get_mask(int32x4_compare_eq(v(a), v(a))), 0b1111);
    }

    #[test]
    fn select_with_compare_is_max(a in any::<[i32; 4]>(), b in any::<[i32; 4]>()) {
        let m = int32x4_compare_gt(v(a), v(b));
        prop_assert_eq!(lanes(int32x4_select(m, v(a), v(b))), lanes(int32x4_max(v(a), v(b))));
    }

    #[test]
    fn select_with_compare_eq(
        a in any::<[i32; 4]>(),
        b in any::<[i32; 4]>(),
        x in any::<i32>(),
        y in any::<i32>(),
    ) {
        let m = int32x4_compare_eq(v(a), v(b));
        let picked = lanes(int32x4_select(m, int32x4_set1(x), int32x4_set1(y)));
        for i in 0..4 {
            prop_assert_eq!(picked[i], if a[i] == b[i] { x } else { y });
        }

        // one differing lane picks the second operand only there
        let mut c = a;
        c[3] = c[3].wrapping_add(1);
        let m = int32x4_compare_eq(v(a), v(c));
        let picked = lanes(int32x4_select(m, int32x4_set1(11), int32x4_set1(22)));
        prop_assert_eq!(picked, [11, 11, 11, 22]);
        prop_assert_eq!(lanes(int32x4_select(int32x4_compare_eq(v(a), v(a)), v(a), v(b))), a);
    }

    #[test]
    fn shifts_match_scalar_operators(a in any::<[i32; 4]>(), count in 0u32..32) {
        prop_assert_eq!(lanes(int32x4_sll_var(v(a), count)), a.map(|x| x << count));
        let logical = a.map(|x| ((x as u32) >> count) as i32);
        prop_assert_eq!(lanes(int32x4_srl_var(v(a), count)), logical);
        prop_assert_eq!(lanes(int32x4_sra_var(v(a), count)), a.map(|x| x >> count));
    }

    #[test]
    fn immediate_and_runtime_shifts_agree(a in any::<[i32; 4]>()) {
        prop_assert_eq!(lanes(int32x4_sll::<5>(v(a))), lanes(int32x4_sll_var(v(a), 5)));
        prop_assert_eq!(lanes(int32x4_srl::<17>(v(a))), lanes(int32x4_srl_var(v(a), 17)));
        prop_assert_eq!(lanes(int32x4_sra::<30>(v(a))), lanes(int32x4_sra_var(v(a), 30)));
    }

    #[test]
    fn pack_unpack_round_trip(bytes in any::<[u8; 4]>()) {
        let packed = u32::from_le_bytes(bytes);
        let unpacked = int32x4_unpack(packed);
        prop_assert_eq!(lanes(unpacked), bytes.map(i32::from));
        prop_assert_eq!(int32x4_pack(unpacked), packed);
    }

    #[test]
    fn pack_clamps(a in any::<[i32; 4]>()) {
        let expected = u32::from_le_bytes(a.map(|x| x.clamp(0, 255) as u8));
        prop_assert_eq!(int32x4_pack(v(a)), expected);
    }

    #[test]
    fn get_mask_weights(a in any::<[i32; 4]>()) {
        let expected = (a[0] & 1) | (a[1] & 2) | (a[2] & 4) | (a[3] & 8);
        prop_assert_eq!(int32x4_get_mask(v(a)), expected as u32);
    }

    #[test]
    fn truncate_matches_as_cast(f in any::<[f32; 4]>()) {
        prop_assert_eq!(lanes(int32x4_truncate(float32x4_from_array(f))), f.map(|x| x as i32));
    }
}
