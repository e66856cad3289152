// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Cross-backend verification.
//!
//! Replays the same randomly generated inputs through a backend and through
//! the scalar [`Reference`](crate::simd::Reference) and records every
//! operation whose lanes differ.
//! Float lanes compare by bit pattern, except that any two NaNs are equal
//! (payloads are not part of the contract).
//!
//! # Usage
//!
//! ```rust
//! use prism_simd::config::VerifyConfig;
//! use prism_simd::verify::verify_active;
//!
//! let config = VerifyConfig { samples: 64, ..Default::default() };
//! let report = verify_active(&config).unwrap();
//! assert!(report.passed(), "{:#?}", report.mismatches);
//! ```

use std::fmt::Debug;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;

use crate::config::VerifyConfig;
use crate::kernels::{average_rgba_with, lerp_rgba_with, modulate_rgba_with};
use crate::memory::AlignedBuffer;
use crate::simd::{
    Active, BackendKind, Float32x4Ops, FullBackend, Int32x4Ops, Reference as R, SimdBackend,
    Uint8x16Ops,
};
use crate::Result;

/// Pixels per generated kernel image; not a multiple of 4 so the tail path runs
const KERNEL_PIXELS: usize = 37;

const SPECIAL_I32: [i32; 10] = [0, 1, -1, i32::MIN, i32::MAX, 255, 256, -256, 0x7fff, -0x8000];

const SPECIAL_F32: [f32; 16] = [
    0.0,
    -0.0,
    f32::NAN,
    f32::INFINITY,
    f32::NEG_INFINITY,
    0.5,
    -0.5,
    2.5,
    -2.5,
    2_147_483_520.0,
    2_147_483_648.0,
    -2_147_483_904.0,
    f32::MIN_POSITIVE,
    f32::MAX,
    f32::MIN,
    1.0e-45,
];

/// Group of operations a check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Int32x4,
    Float32x4,
    Uint8x16,
    Kernels,
}

/// One operation whose output differed from the reference
#[derive(Debug, Clone, Serialize)]
pub struct Mismatch {
    pub family: Family,
    pub op: String,
    pub inputs: String,
    pub expected: String,
    pub got: String,
}

/// Per-family check counts
#[derive(Debug, Clone, Serialize)]
pub struct FamilyReport {
    pub family: Family,
    pub checks: usize,
    pub mismatches: usize,
    /// Stopped early after reaching `max_mismatches`
    pub truncated: bool,
}

/// Result of a verification run
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub backend: BackendKind,
    pub reference: BackendKind,
    pub samples: usize,
    pub seed: u64,
    pub families: Vec<FamilyReport>,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    /// True if no operation differed from the reference.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Total number of operations compared.
    pub fn total_checks(&self) -> usize {
        self.families.iter().map(|f| f.checks).sum()
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Lane data that can be compared against the reference
trait Lanes: Debug {
    fn same(&self, other: &Self) -> bool;
}

impl Lanes for i32 {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl Lanes for u32 {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl Lanes for u8 {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl Lanes for f32 {
    fn same(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits() || (self.is_nan() && other.is_nan())
    }
}

impl Lanes for Vec<u32> {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: Lanes, const L: usize> Lanes for [T; L] {
    fn same(&self, other: &Self) -> bool {
        self.iter().zip(other).all(|(a, b)| a.same(b))
    }
}

/// Bookkeeping for one family
struct Session<'a> {
    family: Family,
    max_mismatches: usize,
    checks: usize,
    mismatches: usize,
    out: &'a mut Vec<Mismatch>,
}

impl<'a> Session<'a> {
    fn new(family: Family, config: &VerifyConfig, out: &'a mut Vec<Mismatch>) -> Self {
        Self {
            family,
            max_mismatches: config.max_mismatches,
            checks: 0,
            mismatches: 0,
            out,
        }
    }

    fn check<T: Lanes>(&mut self, op: &str, inputs: &dyn Debug, expected: T, got: T) {
        self.checks += 1;
        if expected.same(&got) {
            return;
        }

        self.mismatches += 1;
        if self.mismatches <= 4 {
            tracing::warn!(family = ?self.family, op, ?expected, ?got, "backend mismatch");
        }
        self.out.push(Mismatch {
            family: self.family,
            op: op.to_string(),
            inputs: format!("{:?}", inputs),
            expected: format!("{:?}", expected),
            got: format!("{:?}", got),
        });
    }

    fn exhausted(&self) -> bool {
        self.max_mismatches != 0 && self.mismatches >= self.max_mismatches
    }

    fn finish(self, truncated: bool) -> FamilyReport {
        tracing::debug!(
            family = ?self.family,
            checks = self.checks,
            mismatches = self.mismatches,
            "family verified"
        );
        FamilyReport {
            family: self.family,
            checks: self.checks,
            mismatches: self.mismatches,
            truncated,
        }
    }
}

// ============================================================================
// Sample generation
// ============================================================================

struct Samples {
    rng: Xoshiro256PlusPlus,
    special: bool,
    float_range: f32,
}

impl Samples {
    fn i32(&mut self) -> i32 {
        if self.special && self.rng.gen_ratio(1, 4) {
            SPECIAL_I32[self.rng.gen_range(0..SPECIAL_I32.len())]
        } else {
            self.rng.gen()
        }
    }

    fn f32(&mut self) -> f32 {
        if self.special && self.rng.gen_ratio(1, 4) {
            SPECIAL_F32[self.rng.gen_range(0..SPECIAL_F32.len())]
        } else {
            self.rng.gen_range(-self.float_range..self.float_range)
        }
    }

    fn i32x4(&mut self) -> [i32; 4] {
        [self.i32(), self.i32(), self.i32(), self.i32()]
    }

    /// Second operand sharing some lanes with `a`, so equality paths are hit.
    fn i32x4_near(&mut self, a: &[i32; 4]) -> [i32; 4] {
        let mut b = self.i32x4();
        for (x, y) in b.iter_mut().zip(a) {
            if self.rng.gen_ratio(1, 4) {
                *x = *y;
            }
        }
        b
    }

    fn f32x4(&mut self) -> [f32; 4] {
        [self.f32(), self.f32(), self.f32(), self.f32()]
    }

    fn f32x4_near(&mut self, a: &[f32; 4]) -> [f32; 4] {
        let mut b = self.f32x4();
        for (x, y) in b.iter_mut().zip(a) {
            if self.rng.gen_ratio(1, 4) {
                *x = *y;
            }
        }
        b
    }

    fn u8x16(&mut self) -> [u8; 16] {
        let mut v = [0u8; 16];
        self.rng.fill(&mut v[..]);
        v
    }

    fn u8x16_near(&mut self, a: &[u8; 16]) -> [u8; 16] {
        let mut b = self.u8x16();
        for (x, y) in b.iter_mut().zip(a) {
            if self.rng.gen_ratio(1, 4) {
                *x = *y;
            }
        }
        b
    }

    /// Mask vector: per lane all-ones, all-zeros, or arbitrary bits.
    fn mask_bits(&mut self) -> [i32; 4] {
        let mut m = [0i32; 4];
        for x in m.iter_mut() {
            *x = match self.rng.gen_range(0..3) {
                0 => 0,
                1 => -1,
                _ => self.rng.gen(),
            };
        }
        m
    }

    fn pixels(&mut self, n: usize) -> Vec<u32> {
        (0..n).map(|_| self.rng.gen()).collect()
    }
}

// ============================================================================
// Operation tables
// ============================================================================

// Each shape runs one operation on backend `X` and returns plain lanes, so the
// reference and the backend under test go through the same call.

fn int_map<X: FullBackend>(op: fn(X::Int32x4) -> X::Int32x4, a: [i32; 4]) -> [i32; 4] {
    X::int32x4_to_array(op(X::int32x4_from_array(a)))
}

fn int_zip<X: FullBackend>(
    op: fn(X::Int32x4, X::Int32x4) -> X::Int32x4,
    a: [i32; 4],
    b: [i32; 4],
) -> [i32; 4] {
    X::int32x4_to_array(op(X::int32x4_from_array(a), X::int32x4_from_array(b)))
}

fn int_shift<X: FullBackend>(
    op: fn(X::Int32x4, u32) -> X::Int32x4,
    a: [i32; 4],
    n: u32,
) -> [i32; 4] {
    X::int32x4_to_array(op(X::int32x4_from_array(a), n))
}

fn int_lane<X: FullBackend>(
    op: fn(X::Int32x4, i32) -> X::Int32x4,
    a: [i32; 4],
    x: i32,
) -> [i32; 4] {
    X::int32x4_to_array(op(X::int32x4_from_array(a), x))
}

fn int_select<X: FullBackend>(
    op: fn(X::Int32x4, X::Int32x4, X::Int32x4) -> X::Int32x4,
    m: [i32; 4],
    a: [i32; 4],
    b: [i32; 4],
) -> [i32; 4] {
    let m = X::int32x4_from_array(m);
    let a = X::int32x4_from_array(a);
    let b = X::int32x4_from_array(b);
    X::int32x4_to_array(op(m, a, b))
}

fn int_reduce<X: FullBackend>(op: fn(X::Int32x4) -> u32, a: [i32; 4]) -> u32 {
    op(X::int32x4_from_array(a))
}

fn int_splat<X: FullBackend>(op: fn(i32) -> X::Int32x4, x: i32) -> [i32; 4] {
    X::int32x4_to_array(op(x))
}

fn int_unpack<X: FullBackend>(op: fn(u32) -> X::Int32x4, x: u32) -> [i32; 4] {
    X::int32x4_to_array(op(x))
}

fn int_from_float<X: FullBackend>(op: fn(X::Float32x4) -> X::Int32x4, f: [f32; 4]) -> [i32; 4] {
    X::int32x4_to_array(op(X::float32x4_from_array(f)))
}

fn int_set4<X: FullBackend>(a: [i32; 4]) -> [i32; 4] {
    X::int32x4_to_array(X::int32x4_set4(a[0], a[1], a[2], a[3]))
}

fn int_zero<X: FullBackend>() -> [i32; 4] {
    X::int32x4_to_array(X::int32x4_zero())
}

fn int_lanes<X: FullBackend>(a: [i32; 4]) -> [i32; 4] {
    let v = X::int32x4_from_array(a);
    [X::int32x4_get_x(v), X::int32x4_get_y(v), X::int32x4_get_z(v), X::int32x4_get_w(v)]
}

fn float_map<X: FullBackend>(op: fn(X::Float32x4) -> X::Float32x4, a: [f32; 4]) -> [f32; 4] {
    X::float32x4_to_array(op(X::float32x4_from_array(a)))
}

fn float_zip<X: FullBackend>(
    op: fn(X::Float32x4, X::Float32x4) -> X::Float32x4,
    a: [f32; 4],
    b: [f32; 4],
) -> [f32; 4] {
    X::float32x4_to_array(op(X::float32x4_from_array(a), X::float32x4_from_array(b)))
}

/// Comparison masks as raw lane bits, so NaN-vs-NaN equality can't hide a wrong lane.
fn float_mask<X: FullBackend>(
    op: fn(X::Float32x4, X::Float32x4) -> X::Float32x4,
    a: [f32; 4],
    b: [f32; 4],
) -> [i32; 4] {
    let mask = op(X::float32x4_from_array(a), X::float32x4_from_array(b));
    X::int32x4_to_array(X::int32x4_cast(mask))
}

fn float_madd<X: FullBackend>(
    op: fn(X::Float32x4, X::Float32x4, X::Float32x4) -> X::Float32x4,
    a: [f32; 4],
    b: [f32; 4],
    c: [f32; 4],
) -> [f32; 4] {
    let a = X::float32x4_from_array(a);
    let b = X::float32x4_from_array(b);
    let c = X::float32x4_from_array(c);
    X::float32x4_to_array(op(a, b, c))
}

/// Select is bitwise, so the result is compared as raw bits.
fn float_select<X: FullBackend>(
    op: fn(X::Float32x4, X::Float32x4, X::Float32x4) -> X::Float32x4,
    m: [i32; 4],
    a: [f32; 4],
    b: [f32; 4],
) -> [i32; 4] {
    let m = X::float32x4_cast(X::int32x4_from_array(m));
    let picked = op(m, X::float32x4_from_array(a), X::float32x4_from_array(b));
    X::int32x4_to_array(X::int32x4_cast(picked))
}

fn float_reduce<X: FullBackend>(op: fn(X::Float32x4) -> u32, a: [f32; 4]) -> u32 {
    op(X::float32x4_from_array(a))
}

fn float_from_int<X: FullBackend>(op: fn(X::Int32x4) -> X::Float32x4, i: [i32; 4]) -> [f32; 4] {
    X::float32x4_to_array(op(X::int32x4_from_array(i)))
}

fn float_splat<X: FullBackend>(op: fn(f32) -> X::Float32x4, x: f32) -> [f32; 4] {
    X::float32x4_to_array(op(x))
}

fn float_lane<X: FullBackend>(
    op: fn(X::Float32x4, f32) -> X::Float32x4,
    a: [f32; 4],
    x: f32,
) -> [f32; 4] {
    X::float32x4_to_array(op(X::float32x4_from_array(a), x))
}

fn float_set4<X: FullBackend>(a: [f32; 4]) -> [f32; 4] {
    X::float32x4_to_array(X::float32x4_set4(a[0], a[1], a[2], a[3]))
}

fn float_zero<X: FullBackend>() -> [f32; 4] {
    X::float32x4_to_array(X::float32x4_zero())
}

fn float_lanes<X: FullBackend>(a: [f32; 4]) -> [f32; 4] {
    let v = X::float32x4_from_array(a);
    [X::float32x4_get_x(v), X::float32x4_get_y(v), X::float32x4_get_z(v), X::float32x4_get_w(v)]
}

fn byte_zip<X: FullBackend>(
    op: fn(X::Uint8x16, X::Uint8x16) -> X::Uint8x16,
    a: [u8; 16],
    b: [u8; 16],
) -> [u8; 16] {
    X::uint8x16_to_array(op(X::uint8x16_from_array(a), X::uint8x16_from_array(b)))
}

fn byte_select<X: FullBackend>(
    op: fn(X::Uint8x16, X::Uint8x16, X::Uint8x16) -> X::Uint8x16,
    m: [u8; 16],
    a: [u8; 16],
    b: [u8; 16],
) -> [u8; 16] {
    let m = X::uint8x16_from_array(m);
    let a = X::uint8x16_from_array(a);
    let b = X::uint8x16_from_array(b);
    X::uint8x16_to_array(op(m, a, b))
}

fn byte_reduce<X: FullBackend>(op: fn(X::Uint8x16) -> u32, a: [u8; 16]) -> u32 {
    op(X::uint8x16_from_array(a))
}

fn byte_splat<X: FullBackend>(op: fn(u8) -> X::Uint8x16, x: u8) -> [u8; 16] {
    X::uint8x16_to_array(op(x))
}

fn byte_zero<X: FullBackend>() -> [u8; 16] {
    X::uint8x16_to_array(X::uint8x16_zero())
}

/// Run `op` through `shape` on the reference and on `B`, then compare.
macro_rules! pair {
    ($s:expr, $inputs:expr, $shape:ident($op:ident $(, $arg:expr)* $(,)?)) => {
        $s.check(
            stringify!($op),
            &$inputs,
            $shape::<R>(R::$op $(, $arg)*),
            $shape::<B>(B::$op $(, $arg)*),
        )
    };
}

macro_rules! int_unary {
    ($s:expr, $a:expr; $($op:ident),+ $(,)?) => {$(
        pair!($s, $a, int_map($op, $a));
    )+};
}

macro_rules! int_binary {
    ($s:expr, $a:expr, $b:expr; $($op:ident),+ $(,)?) => {$(
        pair!($s, ($a, $b), int_zip($op, $a, $b));
    )+};
}

macro_rules! int_shift_imm {
    ($s:expr, $a:expr; $($n:literal),+ $(,)?) => {$(
        $s.check(
            concat!("int32x4_sll::<", $n, ">"),
            &$a,
            int_map::<R>(R::int32x4_sll::<$n>, $a),
            int_map::<B>(B::int32x4_sll::<$n>, $a),
        );
        $s.check(
            concat!("int32x4_srl::<", $n, ">"),
            &$a,
            int_map::<R>(R::int32x4_srl::<$n>, $a),
            int_map::<B>(B::int32x4_srl::<$n>, $a),
        );
        $s.check(
            concat!("int32x4_sra::<", $n, ">"),
            &$a,
            int_map::<R>(R::int32x4_sra::<$n>, $a),
            int_map::<B>(B::int32x4_sra::<$n>, $a),
        );
    )+};
}

macro_rules! float_unary {
    ($s:expr, $a:expr; $($op:ident),+ $(,)?) => {$(
        pair!($s, $a, float_map($op, $a));
    )+};
}

macro_rules! float_binary {
    ($s:expr, $a:expr, $b:expr; $($op:ident),+ $(,)?) => {$(
        pair!($s, ($a, $b), float_zip($op, $a, $b));
    )+};
}

/// Compare ops check the full mask bits through [`float_mask`].
macro_rules! float_compare {
    ($s:expr, $a:expr, $b:expr; $($op:ident),+ $(,)?) => {$(
        pair!($s, ($a, $b), float_mask($op, $a, $b));
    )+};
}

macro_rules! byte_binary {
    ($s:expr, $a:expr, $b:expr; $($op:ident),+ $(,)?) => {$(
        pair!($s, ($a, $b), byte_zip($op, $a, $b));
    )+};
}

fn verify_int32x4<B: FullBackend>(
    samples: &mut Samples,
    config: &VerifyConfig,
    s: &mut Session<'_>,
) -> Result<bool> {
    let mut aligned_src = AlignedBuffer::<i32>::new(4)?;
    let mut aligned_dst = AlignedBuffer::<i32>::new(4)?;

    for _ in 0..config.samples {
        let a = samples.i32x4();
        let b = samples.i32x4_near(&a);
        let m = samples.mask_bits();
        let f = samples.f32x4();
        let count = samples.rng.gen_range(0..40u32);
        let scalar = samples.i32();

        int_unary!(s, a; int32x4_neg, int32x4_abs, int32x4_not);
        int_binary!(s, a, b;
            int32x4_add, int32x4_sub, int32x4_mullo, int32x4_min, int32x4_max,
            int32x4_and, int32x4_nand, int32x4_or, int32x4_xor,
            int32x4_compare_eq, int32x4_compare_gt, int32x4_compare_lt,
        );
        int_shift_imm!(s, a; 0, 1, 7, 8, 16, 31);

        pair!(s, (a, count), int_shift(int32x4_sll_var, a, count));
        pair!(s, (a, count), int_shift(int32x4_srl_var, a, count));
        pair!(s, (a, count), int_shift(int32x4_sra_var, a, count));

        pair!(s, (m, a, b), int_select(int32x4_select, m, a, b));
        pair!(s, a, int_reduce(int32x4_get_mask, a));
        pair!(s, a, int_reduce(int32x4_pack, a));
        pair!(s, a[0], int_unpack(int32x4_unpack, a[0] as u32));

        pair!(s, f, int_from_float(int32x4_cast, f));
        pair!(s, f, int_from_float(int32x4_convert, f));
        pair!(s, f, int_from_float(int32x4_truncate, f));

        // construction and lanes
        pair!(s, scalar, int_splat(int32x4_set1, scalar));
        s.check("int32x4_set4", &a, int_set4::<R>(a), int_set4::<B>(a));
        s.check("int32x4_zero", &(), int_zero::<R>(), int_zero::<B>());
        pair!(s, (a, scalar), int_lane(int32x4_set_x, a, scalar));
        pair!(s, (a, scalar), int_lane(int32x4_set_y, a, scalar));
        pair!(s, (a, scalar), int_lane(int32x4_set_z, a, scalar));
        pair!(s, (a, scalar), int_lane(int32x4_set_w, a, scalar));
        s.check("int32x4_get_lanes", &a, int_lanes::<R>(a), int_lanes::<B>(a));

        // memory
        let unaligned = [scalar, a[0], a[1], a[2], a[3]];
        let mut stored = [0i32; 5];
        B::int32x4_ustore(&mut stored[1..], B::int32x4_uload(&unaligned[1..]));
        s.check("int32x4_uload_ustore", &a, a, [stored[1], stored[2], stored[3], stored[4]]);

        aligned_src.copy_from_slice(&a);
        // SAFETY: both buffers are 16-byte aligned and hold 4 elements
        unsafe {
            let v = B::int32x4_load(aligned_src.as_ptr());
            B::int32x4_store(aligned_dst.as_mut_ptr(), v);
        }
        let mut got = [0i32; 4];
        got.copy_from_slice(&aligned_dst);
        s.check("int32x4_load_store", &a, a, got);

        if s.exhausted() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn verify_float32x4<B: FullBackend>(
    samples: &mut Samples,
    config: &VerifyConfig,
    s: &mut Session<'_>,
) -> Result<bool> {
    let mut aligned_src = AlignedBuffer::<f32>::new(4)?;
    let mut aligned_dst = AlignedBuffer::<f32>::new(4)?;

    for _ in 0..config.samples {
        let a = samples.f32x4();
        let b = samples.f32x4_near(&a);
        let c = samples.f32x4();
        let m = samples.mask_bits();
        let i = samples.i32x4();
        let scalar = samples.f32();

        float_unary!(s, a; float32x4_neg, float32x4_abs, float32x4_sqrt);
        float_binary!(s, a, b;
            float32x4_add, float32x4_sub, float32x4_mul, float32x4_div,
            float32x4_min, float32x4_max,
            float32x4_and, float32x4_nand, float32x4_or, float32x4_xor,
        );
        float_compare!(s, a, b;
            float32x4_compare_eq, float32x4_compare_neq, float32x4_compare_lt,
            float32x4_compare_le, float32x4_compare_gt, float32x4_compare_ge,
        );

        pair!(s, (a, b, c), float_madd(float32x4_madd, a, b, c));
        pair!(s, (m, a, b), float_select(float32x4_select, m, a, b));
        pair!(s, a, float_reduce(float32x4_get_mask, a));

        pair!(s, i, float_from_int(float32x4_cast, i));
        pair!(s, i, float_from_int(float32x4_convert, i));

        pair!(s, scalar, float_splat(float32x4_set1, scalar));
        s.check("float32x4_set4", &a, float_set4::<R>(a), float_set4::<B>(a));
        s.check("float32x4_zero", &(), float_zero::<R>(), float_zero::<B>());
        pair!(s, (a, scalar), float_lane(float32x4_set_x, a, scalar));
        pair!(s, (a, scalar), float_lane(float32x4_set_y, a, scalar));
        pair!(s, (a, scalar), float_lane(float32x4_set_z, a, scalar));
        pair!(s, (a, scalar), float_lane(float32x4_set_w, a, scalar));
        s.check("float32x4_get_lanes", &a, float_lanes::<R>(a), float_lanes::<B>(a));

        let unaligned = [scalar, a[0], a[1], a[2], a[3]];
        let mut stored = [0f32; 5];
        B::float32x4_ustore(&mut stored[1..], B::float32x4_uload(&unaligned[1..]));
        s.check("float32x4_uload_ustore", &a, a, [stored[1], stored[2], stored[3], stored[4]]);

        aligned_src.copy_from_slice(&a);
        // SAFETY: both buffers are 16-byte aligned and hold 4 elements
        unsafe {
            let v = B::float32x4_load(aligned_src.as_ptr());
            B::float32x4_store(aligned_dst.as_mut_ptr(), v);
        }
        let mut got = [0f32; 4];
        got.copy_from_slice(&aligned_dst);
        s.check("float32x4_load_store", &a, a, got);

        if s.exhausted() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn verify_uint8x16<B: FullBackend>(
    samples: &mut Samples,
    config: &VerifyConfig,
    s: &mut Session<'_>,
) -> Result<bool> {
    let mut aligned_src = AlignedBuffer::<u8>::new(16)?;
    let mut aligned_dst = AlignedBuffer::<u8>::new(16)?;
    let mut window = [0u8; 31];

    for _ in 0..config.samples {
        let a = samples.u8x16();
        let b = samples.u8x16_near(&a);
        let m = samples.u8x16();
        let scalar: u8 = samples.rng.gen();

        byte_binary!(s, a, b;
            uint8x16_add, uint8x16_sub, uint8x16_adds, uint8x16_subs, uint8x16_avg,
            uint8x16_min, uint8x16_max,
            uint8x16_and, uint8x16_nand, uint8x16_or, uint8x16_xor,
            uint8x16_compare_eq, uint8x16_compare_gt,
        );
        pair!(s, (m, a, b), byte_select(uint8x16_select, m, a, b));
        pair!(s, a, byte_reduce(uint8x16_get_mask, a));
        pair!(s, scalar, byte_splat(uint8x16_set1, scalar));
        s.check("uint8x16_zero", &(), byte_zero::<R>(), byte_zero::<B>());

        // every byte offset is a legal uload address
        samples.rng.fill(&mut window[..]);
        let offset = samples.rng.gen_range(0..16);
        let mut expected = [0u8; 16];
        expected.copy_from_slice(&window[offset..offset + 16]);
        let mut stored = [0u8; 31];
        B::uint8x16_ustore(&mut stored[15 - offset..], B::uint8x16_uload(&window[offset..]));
        let mut got = [0u8; 16];
        got.copy_from_slice(&stored[15 - offset..31 - offset]);
        s.check("uint8x16_uload_ustore", &(offset, expected), expected, got);

        aligned_src.copy_from_slice(&a);
        // SAFETY: both buffers are 16-byte aligned and hold 16 bytes
        unsafe {
            let v = B::uint8x16_load(aligned_src.as_ptr());
            B::uint8x16_store(aligned_dst.as_mut_ptr(), v);
        }
        let mut got = [0u8; 16];
        got.copy_from_slice(&aligned_dst);
        s.check("uint8x16_load_store", &a, a, got);

        if s.exhausted() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn verify_kernels<B: FullBackend>(
    samples: &mut Samples,
    config: &VerifyConfig,
    s: &mut Session<'_>,
) -> Result<bool> {
    let rounds = (config.samples / KERNEL_PIXELS).max(1);
    let mut expected = vec![0u32; KERNEL_PIXELS];
    let mut got = vec![0u32; KERNEL_PIXELS];

    for _ in 0..rounds {
        let a = samples.pixels(KERNEL_PIXELS);
        let b = samples.pixels(KERNEL_PIXELS);
        let color: u32 = samples.rng.gen();
        let t: f32 = samples.rng.gen_range(0.0..=1.0);

        modulate_rgba_with::<R>(&mut expected, &a, color)?;
        modulate_rgba_with::<B>(&mut got, &a, color)?;
        s.check("modulate_rgba", &color, expected.clone(), got.clone());

        lerp_rgba_with::<R>(&mut expected, &a, &b, t)?;
        lerp_rgba_with::<B>(&mut got, &a, &b, t)?;
        s.check("lerp_rgba", &t, expected.clone(), got.clone());

        average_rgba_with::<R>(&mut expected, &a, &b)?;
        average_rgba_with::<B>(&mut got, &a, &b)?;
        s.check("average_rgba", &(), expected.clone(), got.clone());

        if s.exhausted() {
            return Ok(true);
        }
    }
    Ok(false)
}

// ============================================================================
// Entry points
// ============================================================================

/// Verify backend `B` against the scalar reference.
pub fn verify_backend<B: FullBackend>(config: &VerifyConfig) -> Result<VerifyReport> {
    config.validate()?;

    tracing::info!(
        backend = B::KIND.name(),
        samples = config.samples,
        seed = config.seed,
        "verifying backend against scalar reference"
    );

    let mut samples = Samples {
        rng: Xoshiro256PlusPlus::seed_from_u64(config.seed),
        special: config.special_values,
        float_range: config.float_range,
    };

    let mut mismatches = Vec::new();
    let mut families = Vec::new();

    if config.families.int32x4 {
        let mut s = Session::new(Family::Int32x4, config, &mut mismatches);
        let truncated = verify_int32x4::<B>(&mut samples, config, &mut s)?;
        families.push(s.finish(truncated));
    }
    if config.families.float32x4 {
        let mut s = Session::new(Family::Float32x4, config, &mut mismatches);
        let truncated = verify_float32x4::<B>(&mut samples, config, &mut s)?;
        families.push(s.finish(truncated));
    }
    if config.families.uint8x16 {
        let mut s = Session::new(Family::Uint8x16, config, &mut mismatches);
        let truncated = verify_uint8x16::<B>(&mut samples, config, &mut s)?;
        families.push(s.finish(truncated));
    }
    if config.kernels {
        let mut s = Session::new(Family::Kernels, config, &mut mismatches);
        let truncated = verify_kernels::<B>(&mut samples, config, &mut s)?;
        families.push(s.finish(truncated));
    }

    let report = VerifyReport {
        backend: B::KIND,
        reference: <R as SimdBackend>::KIND,
        samples: config.samples,
        seed: config.seed,
        families,
        mismatches,
    };

    tracing::info!(
        backend = B::KIND.name(),
        checks = report.total_checks(),
        mismatches = report.mismatches.len(),
        "verification finished"
    );

    Ok(report)
}

/// Verify the active backend against the scalar reference.
pub fn verify_active(config: &VerifyConfig) -> Result<VerifyReport> {
    verify_backend::<Active>(config)
}
