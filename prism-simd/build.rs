// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Build script for Prism SIMD.
//!
//! Selects exactly one SIMD backend for the target being compiled and
//! exposes the choice to the crate as a `simd_backend` cfg value. This is
//! the only place where target detection happens; the crate itself never
//! looks at `target_arch` to pick a backend.
//!
//! # Selection
//!
//! - aarch64 with `neon`: `simd_backend = "neon"`
//! - x86_64, or x86 with `sse2`: `simd_backend = "sse2"`
//! - anything else, or the `force-scalar` feature: `simd_backend = "scalar"`

fn main() {
    let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let features = std::env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let has_feature = |name: &str| features.split(',').any(|f| f == name);
    let force_scalar = std::env::var_os("CARGO_FEATURE_FORCE_SCALAR").is_some();

    let backend = if force_scalar {
        "scalar"
    } else if arch == "aarch64" && has_feature("neon") {
        "neon"
    } else if arch == "x86_64" || (arch == "x86" && has_feature("sse2")) {
        "sse2"
    } else {
        "scalar"
    };

    println!("cargo:rustc-check-cfg=cfg(simd_backend, values(\"neon\", \"sse2\", \"scalar\"))");
    println!("cargo:rustc-cfg=simd_backend=\"{}\"", backend);

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_FORCE_SCALAR");
}
