// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Property-based tests for backend equivalence.
//!
//! These tests ensure that the active backend produces the same lanes as the
//! scalar reference across all inputs. On builds where the scalar backend
//! is active they still run, comparing it against itself.

use prism_simd::kernels::{lerp_rgba, lerp_rgba_with, modulate_rgba, modulate_rgba_with};
use prism_simd::simd::{scalar::Scalar, Active, Float32x4Ops, FullBackend, Int32x4Ops, Uint8x16Ops};
use proptest::prelude::*;

/// Quiet NaN every NaN lane is folded into; payloads are not compared.
const CANONICAL_NAN: u32 = 0x7fc0_0000;

fn canonical(v: [f32; 4]) -> [u32; 4] {
    v.map(|x| if x.is_nan() { CANONICAL_NAN } else { x.to_bits() })
}

fn any_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        4 => -1.0e9f32..1.0e9f32,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
        1 => Just(-0.0f32),
        1 => (-8i32..8).prop_map(|x| x as f32 + 0.5),
        1 => any::<u32>().prop_map(f32::from_bits),
    ]
}

fn f32x4() -> impl Strategy<Value = [f32; 4]> {
    [any_f32(), any_f32(), any_f32(), any_f32()]
}

// ============================================================================
// Operation shapes
// ============================================================================

fn int1<B: FullBackend>(op: fn(B::Int32x4) -> B::Int32x4, a: [i32; 4]) -> [i32; 4] {
    B::int32x4_to_array(op(B::int32x4_from_array(a)))
}

fn int2<B: FullBackend>(
    op: fn(B::Int32x4, B::Int32x4) -> B::Int32x4,
    a: [i32; 4],
    b: [i32; 4],
) -> [i32; 4] {
    B::int32x4_to_array(op(B::int32x4_from_array(a), B::int32x4_from_array(b)))
}

fn int3<B: FullBackend>(
    op: fn(B::Int32x4, B::Int32x4, B::Int32x4) -> B::Int32x4,
    a: [i32; 4],
    b: [i32; 4],
    c: [i32; 4],
) -> [i32; 4] {
    let a = B::int32x4_from_array(a);
    let b = B::int32x4_from_array(b);
    let c = B::int32x4_from_array(c);
    B::int32x4_to_array(op(a, b, c))
}

fn int_shift<B: FullBackend>(
    op: fn(B::Int32x4, u32) -> B::Int32x4,
    a: [i32; 4],
    count: u32,
) -> [i32; 4] {
    B::int32x4_to_array(op(B::int32x4_from_array(a), count))
}

fn int_lane<B: FullBackend>(
    op: fn(B::Int32x4, i32) -> B::Int32x4,
    a: [i32; 4],
    x: i32,
) -> [i32; 4] {
    B::int32x4_to_array(op(B::int32x4_from_array(a), x))
}

fn int_get<B: FullBackend>(op: fn(B::Int32x4) -> i32, a: [i32; 4]) -> i32 {
    op(B::int32x4_from_array(a))
}

fn int_reduce<B: FullBackend>(op: fn(B::Int32x4) -> u32, a: [i32; 4]) -> u32 {
    op(B::int32x4_from_array(a))
}

fn int_unpack<B: FullBackend>(op: fn(u32) -> B::Int32x4, packed: u32) -> [i32; 4] {
    B::int32x4_to_array(op(packed))
}

fn int_from_float<B: FullBackend>(op: fn(B::Float32x4) -> B::Int32x4, f: [f32; 4]) -> [i32; 4] {
    B::int32x4_to_array(op(B::float32x4_from_array(f)))
}

fn float1<B: FullBackend>(op: fn(B::Float32x4) -> B::Float32x4, a: [f32; 4]) -> [u32; 4] {
    canonical(B::float32x4_to_array(op(B::float32x4_from_array(a))))
}

fn float2<B: FullBackend>(
    op: fn(B::Float32x4, B::Float32x4) -> B::Float32x4,
    a: [f32; 4],
    b: [f32; 4],
) -> [u32; 4] {
    canonical(B::float32x4_to_array(op(B::float32x4_from_array(a), B::float32x4_from_array(b))))
}

fn float3<B: FullBackend>(
    op: fn(B::Float32x4, B::Float32x4, B::Float32x4) -> B::Float32x4,
    a: [f32; 4],
    b: [f32; 4],
    c: [f32; 4],
) -> [u32; 4] {
    let a = B::float32x4_from_array(a);
    let b = B::float32x4_from_array(b);
    let c = B::float32x4_from_array(c);
    canonical(B::float32x4_to_array(op(a, b, c)))
}

/// Raw lane bits, NaN payload and sign included.
fn float_bits1<B: FullBackend>(op: fn(B::Float32x4) -> B::Float32x4, a: [f32; 4]) -> [i32; 4] {
    B::int32x4_to_array(B::int32x4_cast(op(B::float32x4_from_array(a))))
}

/// Raw lane bits of a bitwise op or a comparison mask.
fn float_bits2<B: FullBackend>(
    op: fn(B::Float32x4, B::Float32x4) -> B::Float32x4,
    a: [f32; 4],
    b: [f32; 4],
) -> [i32; 4] {
    let r = op(B::float32x4_from_array(a), B::float32x4_from_array(b));
    B::int32x4_to_array(B::int32x4_cast(r))
}

fn float_reduce<B: FullBackend>(op: fn(B::Float32x4) -> u32, a: [f32; 4]) -> u32 {
    op(B::float32x4_from_array(a))
}

fn float_from_int<B: FullBackend>(op: fn(B::Int32x4) -> B::Float32x4, i: [i32; 4]) -> [u32; 4] {
    canonical(B::float32x4_to_array(op(B::int32x4_from_array(i))))
}

fn byte2<B: FullBackend>(
    op: fn(B::Uint8x16, B::Uint8x16) -> B::Uint8x16,
    a: [u8; 16],
    b: [u8; 16],
) -> [u8; 16] {
    B::uint8x16_to_array(op(B::uint8x16_from_array(a), B::uint8x16_from_array(b)))
}

fn byte3<B: FullBackend>(
    op: fn(B::Uint8x16, B::Uint8x16, B::Uint8x16) -> B::Uint8x16,
    a: [u8; 16],
    b: [u8; 16],
    c: [u8; 16],
) -> [u8; 16] {
    let a = B::uint8x16_from_array(a);
    let b = B::uint8x16_from_array(b);
    let c = B::uint8x16_from_array(c);
    B::uint8x16_to_array(op(a, b, c))
}

fn byte_reduce<B: FullBackend>(op: fn(B::Uint8x16) -> u32, a: [u8; 16]) -> u32 {
    op(B::uint8x16_from_array(a))
}

/// Run `op` through `shape` on the scalar reference and the active backend.
macro_rules! assert_same {
    ($shape:ident($op:ident $(, $arg:expr)* $(,)?)) => {
        prop_assert_eq!(
            $shape::<Scalar>(Scalar::$op $(, $arg)*),
            $shape::<Active>(Active::$op $(, $arg)*),
            "{}",
            stringify!($op)
        )
    };
}

// ============================================================================
// Int32x4
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn int32x4_arithmetic_equivalence(a in any::<[i32; 4]>(), b in any::<[i32; 4]>()) {
        assert_same!(int2(int32x4_add, a, b));
        assert_same!(int2(int32x4_sub, a, b));
        assert_same!(int2(int32x4_mullo, a, b));
        assert_same!(int2(int32x4_min, a, b));
        assert_same!(int2(int32x4_max, a, b));
        assert_same!(int1(int32x4_neg, a));
        assert_same!(int1(int32x4_abs, a));
    }

    #[test]
    fn int32x4_logic_and_compare_equivalence(
        a in any::<[i32; 4]>(),
        b in any::<[i32; 4]>(),
        m in any::<[i32; 4]>(),
    ) {
        assert_same!(int2(int32x4_nand, a, b));
        assert_same!(int2(int32x4_xor, a, b));
        assert_same!(int1(int32x4_not, a));
        assert_same!(int3(int32x4_select, m, a, b));

        assert_same!(int2(int32x4_compare_eq, a, b));
        assert_same!(int2(int32x4_compare_gt, a, b));
        assert_same!(int2(int32x4_compare_lt, a, b));

        // arbitrary bits, not just masks
        assert_same!(int_reduce(int32x4_get_mask, m));
        assert_same!(int_reduce(int32x4_pack, a));
    }

    #[test]
    fn int32x4_shift_equivalence(a in any::<[i32; 4]>(), count in 0u32..64) {
        assert_same!(int_shift(int32x4_sll_var, a, count));
        assert_same!(int_shift(int32x4_srl_var, a, count));
        assert_same!(int_shift(int32x4_sra_var, a, count));

        let want = int1::<Scalar>(Scalar::int32x4_sll::<13>, a);
        prop_assert_eq!(want, int1::<Active>(Active::int32x4_sll::<13>, a));
        let want = int1::<Scalar>(Scalar::int32x4_srl::<31>, a);
        prop_assert_eq!(want, int1::<Active>(Active::int32x4_srl::<31>, a));
        let want = int1::<Scalar>(Scalar::int32x4_sra::<31>, a);
        prop_assert_eq!(want, int1::<Active>(Active::int32x4_sra::<31>, a));
    }

    #[test]
    fn int32x4_conversion_equivalence(f in f32x4(), packed in any::<u32>()) {
        assert_same!(int_from_float(int32x4_convert, f));
        assert_same!(int_from_float(int32x4_truncate, f));
        assert_same!(int_from_float(int32x4_cast, f));
        assert_same!(int_unpack(int32x4_unpack, packed));
    }

    #[test]
    fn int32x4_lane_equivalence(a in any::<[i32; 4]>(), v in any::<i32>()) {
        assert_same!(int_lane(int32x4_set_x, a, v));
        assert_same!(int_lane(int32x4_set_y, a, v));
        assert_same!(int_lane(int32x4_set_z, a, v));
        assert_same!(int_lane(int32x4_set_w, a, v));
        assert_same!(int_get(int32x4_get_z, a));
        assert_same!(int_get(int32x4_get_w, a));
    }
}

// ============================================================================
// Float32x4
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn float32x4_arithmetic_equivalence(a in f32x4(), b in f32x4(), c in f32x4()) {
        assert_same!(float2(float32x4_add, a, b));
        assert_same!(float2(float32x4_sub, a, b));
        assert_same!(float2(float32x4_mul, a, b));
        assert_same!(float2(float32x4_div, a, b));
        assert_same!(float1(float32x4_sqrt, a));
        assert_same!(float3(float32x4_madd, a, b, c));
        assert_same!(float2(float32x4_min, a, b));
        assert_same!(float2(float32x4_max, a, b));
    }

    #[test]
    fn float32x4_sign_and_bits_equivalence(a in f32x4(), b in f32x4()) {
        // sign and bitwise ops are exact on the raw bits, NaN included
        assert_same!(float_bits1(float32x4_neg, a));
        assert_same!(float_bits1(float32x4_abs, a));
        assert_same!(float_bits2(float32x4_and, a, b));
        assert_same!(float_bits2(float32x4_nand, a, b));
        assert_same!(float_bits2(float32x4_or, a, b));
        assert_same!(float_bits2(float32x4_xor, a, b));
        assert_same!(float_reduce(float32x4_get_mask, a));
    }

    #[test]
    fn float32x4_compare_equivalence(a in f32x4(), b in f32x4()) {
        assert_same!(float_bits2(float32x4_compare_eq, a, b));
        assert_same!(float_bits2(float32x4_compare_neq, a, b));
        assert_same!(float_bits2(float32x4_compare_lt, a, b));
        assert_same!(float_bits2(float32x4_compare_le, a, b));
        assert_same!(float_bits2(float32x4_compare_gt, a, b));
        assert_same!(float_bits2(float32x4_compare_ge, a, b));
    }

    #[test]
    fn float32x4_convert_equivalence(i in any::<[i32; 4]>()) {
        assert_same!(float_from_int(float32x4_convert, i));
        assert_same!(float_from_int(float32x4_cast, i));
    }
}

// ============================================================================
// Uint8x16
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn uint8x16_equivalence(
        a in any::<[u8; 16]>(),
        b in any::<[u8; 16]>(),
        m in any::<[u8; 16]>(),
    ) {
        assert_same!(byte2(uint8x16_add, a, b));
        assert_same!(byte2(uint8x16_sub, a, b));
        assert_same!(byte2(uint8x16_adds, a, b));
        assert_same!(byte2(uint8x16_subs, a, b));
        assert_same!(byte2(uint8x16_avg, a, b));
        assert_same!(byte2(uint8x16_min, a, b));
        assert_same!(byte2(uint8x16_max, a, b));
        assert_same!(byte2(uint8x16_compare_eq, a, b));
        assert_same!(byte2(uint8x16_compare_gt, a, b));
        assert_same!(byte3(uint8x16_select, m, a, b));
        assert_same!(byte_reduce(uint8x16_get_mask, m));
    }

    #[test]
    fn uint8x16_uload_any_offset(
        data in proptest::collection::vec(any::<u8>(), 16..64),
        offset in 0usize..48,
    ) {
        prop_assume!(offset + 16 <= data.len());
        let v = Active::uint8x16_uload(&data[offset..]);
        prop_assert_eq!(&Active::uint8x16_to_array(v)[..], &data[offset..offset + 16]);
    }
}

// ============================================================================
// Kernels
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn kernel_equivalence(
        a in proptest::collection::vec(any::<u32>(), 0..64),
        color in any::<u32>(),
        t in 0.0f32..=1.0,
    ) {
        let b: Vec<u32> = a.iter().map(|p| p.rotate_left(8) ^ color).collect();
        let mut got = vec![0u32; a.len()];
        let mut expected = vec![0u32; a.len()];

        modulate_rgba(&mut got, &a, color).unwrap();
        modulate_rgba_with::<Scalar>(&mut expected, &a, color).unwrap();
        prop_assert_eq!(&got, &expected);

        lerp_rgba(&mut got, &a, &b, t).unwrap();
        lerp_rgba_with::<Scalar>(&mut expected, &a, &b, t).unwrap();
        prop_assert_eq!(&got, &expected);
    }
}
