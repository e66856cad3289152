// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Benchmarks for vector operations and pixel kernels.
//!
//! Run with: cargo bench --package prism-simd
//!
//! Each group runs the active backend next to the scalar reference so the
//! speedup is visible in one report.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use prism_simd::kernels::{lerp_rgba_with, modulate_rgba_with};
use prism_simd::simd::{dispatch, scalar::Scalar, Active, FullBackend};

// ============================================================================
// Vector op chains
// ============================================================================

/// a * b + c over a float array, one vector at a time.
fn madd_stream<B: FullBackend>(a: &[f32], b: &[f32], c: &[f32], out: &mut [f32]) {
    for (((o, x), y), z) in out
        .chunks_exact_mut(4)
        .zip(a.chunks_exact(4))
        .zip(b.chunks_exact(4))
        .zip(c.chunks_exact(4))
    {
        let (x, y, z) = (B::float32x4_uload(x), B::float32x4_uload(y), B::float32x4_uload(z));
        let r = B::float32x4_madd(z, x, y);
        B::float32x4_ustore(o, r);
    }
}

/// Clamp-and-convert: float pixels to packed RGBA8.
fn pack_stream<B: FullBackend>(src: &[f32], out: &mut [u32]) {
    let lo = B::float32x4_zero();
    let hi = B::float32x4_set1(255.0);
    for (o, px) in out.iter_mut().zip(src.chunks_exact(4)) {
        let v = B::float32x4_min(B::float32x4_max(B::float32x4_uload(px), lo), hi);
        *o = B::int32x4_pack(B::int32x4_convert(v));
    }
}

/// Byte-wise saturating add over a buffer.
fn adds_stream<B: FullBackend>(a: &[u8], b: &[u8], out: &mut [u8]) {
    for ((o, x), y) in out.chunks_exact_mut(16).zip(a.chunks_exact(16)).zip(b.chunks_exact(16)) {
        B::uint8x16_ustore(o, B::uint8x16_adds(B::uint8x16_uload(x), B::uint8x16_uload(y)));
    }
}

fn bench_float_madd(c: &mut Criterion) {
    let mut group = c.benchmark_group("float32x4_madd");

    for n in [1024, 16384, 262144] {
        let a: Vec<f32> = (0..n).map(|i| i as f32 * 0.5).collect();
        let b: Vec<f32> = (0..n).map(|i| (i % 97) as f32).collect();
        let cc: Vec<f32> = (0..n).map(|i| -(i as f32)).collect();
        let mut out = vec![0f32; n];

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("active", n), &n, |bench, _| {
            bench.iter(|| madd_stream::<Active>(black_box(&a), &b, &cc, black_box(&mut out)))
        });
        group.bench_with_input(BenchmarkId::new("scalar", n), &n, |bench, _| {
            bench.iter(|| madd_stream::<Scalar>(black_box(&a), &b, &cc, black_box(&mut out)))
        });
    }

    group.finish();
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("int32x4_pack");

    let pixels = 65536;
    let src: Vec<f32> = (0..pixels * 4).map(|i| (i % 300) as f32 - 20.0).collect();
    let mut out = vec![0u32; pixels];

    group.throughput(Throughput::Elements(pixels as u64));
    group.bench_function("active", |b| {
        b.iter(|| pack_stream::<Active>(black_box(&src), black_box(&mut out)))
    });
    group.bench_function("scalar", |b| {
        b.iter(|| pack_stream::<Scalar>(black_box(&src), black_box(&mut out)))
    });

    group.finish();
}

fn bench_byte_adds(c: &mut Criterion) {
    let mut group = c.benchmark_group("uint8x16_adds");

    let n = 1 << 20;
    let a: Vec<u8> = (0..n).map(|i| (i % 251) as u8).collect();
    let b: Vec<u8> = (0..n).map(|i| (i * 7 % 256) as u8).collect();
    let mut out = vec![0u8; n];

    group.throughput(Throughput::Bytes(n as u64));
    group.bench_function("active", |bench| {
        bench.iter(|| adds_stream::<Active>(black_box(&a), black_box(&b), black_box(&mut out)))
    });
    group.bench_function("scalar", |bench| {
        bench.iter(|| adds_stream::<Scalar>(black_box(&a), black_box(&b), black_box(&mut out)))
    });

    group.finish();
}

// ============================================================================
// Kernels
// ============================================================================

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgba_kernels");

    let pixels = 1920 * 1080;
    let a: Vec<u32> = (0..pixels as u32).map(|i| i.wrapping_mul(0x9e37_79b9)).collect();
    let b: Vec<u32> = (0..pixels as u32).map(|i| i.wrapping_mul(0x85eb_ca6b)).collect();
    let mut out = vec![0u32; pixels];

    group.throughput(Throughput::Elements(pixels as u64));
    group.bench_function("modulate/active", |bench| {
        bench.iter(|| modulate_rgba_with::<Active>(black_box(&mut out), black_box(&a), 0x80ff_40c0))
    });
    group.bench_function("modulate/scalar", |bench| {
        bench.iter(|| modulate_rgba_with::<Scalar>(black_box(&mut out), black_box(&a), 0x80ff_40c0))
    });
    group.bench_function("lerp/active", |bench| {
        bench.iter(|| lerp_rgba_with::<Active>(black_box(&mut out), black_box(&a), &b, 0.25))
    });
    group.bench_function("lerp/scalar", |bench| {
        bench.iter(|| lerp_rgba_with::<Scalar>(black_box(&mut out), black_box(&a), &b, 0.25))
    });

    group.finish();
}

fn bench_backend_info(c: &mut Criterion) {
    println!("\n{}", dispatch::backend_info());
    c.bench_function("active_backend", |b| b.iter(|| black_box(dispatch::active_backend())));
}

criterion_group!(
    benches,
    bench_backend_info,
    bench_float_madd,
    bench_pack,
    bench_byte_adds,
    bench_kernels,
);
criterion_main!(benches);
