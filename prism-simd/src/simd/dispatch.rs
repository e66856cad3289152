// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Backend identity and build-time selection report.
//!
//! The backend is fixed when the crate is compiled (see `build.rs`), so
//! everything here is a constant of the build. Nothing probes the CPU at
//! runtime.
//!
//! # Usage
//!
//! ```rust
//! use prism_simd::simd::{active_backend, BackendKind};
//!
//! match active_backend() {
//!     BackendKind::Neon => println!("Using NEON"),
//!     BackendKind::Sse2 => println!("Using SSE2"),
//!     BackendKind::Scalar => println!("Using scalar fallback"),
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{Active, SimdBackend};

/// Instruction set a backend maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum BackendKind {
    /// Portable lane arrays
    Scalar = 0,
    /// SSE2 (128-bit, x86)
    Sse2 = 1,
    /// NEON (128-bit, ARM)
    Neon = 2,
}

impl BackendKind {
    /// Register width in bits.
    pub const fn width_bits(self) -> usize {
        match self {
            BackendKind::Scalar => 128,
            BackendKind::Sse2 => 128,
            BackendKind::Neon => 128,
        }
    }

    /// Whether operations map to native vector instructions.
    pub const fn is_native(self) -> bool {
        !matches!(self, BackendKind::Scalar)
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            BackendKind::Scalar => "Scalar",
            BackendKind::Sse2 => "SSE2",
            BackendKind::Neon => "NEON",
        }
    }

    /// Value of the `simd_backend` cfg that selects this backend.
    pub const fn cfg_value(self) -> &'static str {
        match self {
            BackendKind::Scalar => "scalar",
            BackendKind::Sse2 => "sse2",
            BackendKind::Neon => "neon",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Backend compiled into this build.
#[inline]
pub const fn active_backend() -> BackendKind {
    <Active as SimdBackend>::KIND
}

/// Get a human-readable description of the compiled backend.
pub fn backend_info() -> String {
    let kind = active_backend();

    let mut info = format!("SIMD Backend: {} ({}-bit)\n", kind.name(), kind.width_bits());
    info.push_str(&format!("  cfg: simd_backend=\"{}\"\n", kind.cfg_value()));
    info.push_str(&format!("  target: {}\n", std::env::consts::ARCH));
    info.push_str(&format!("  native: {}\n", kind.is_native()));
    info.push_str(&format!("  force-scalar: {}\n", cfg!(feature = "force-scalar")));

    info
}

/// Emit the backend description at `info` level.
pub fn log_backend() {
    let kind = active_backend();
    tracing::info!(
        backend = kind.name(),
        width_bits = kind.width_bits(),
        native = kind.is_native(),
        "SIMD backend selected at build time"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_matches_cfg() {
        let kind = active_backend();
        println!("Compiled SIMD backend: {:?}", kind);

        #[cfg(simd_backend = "neon")]
        assert_eq!(kind, BackendKind::Neon);
        #[cfg(simd_backend = "sse2")]
        assert_eq!(kind, BackendKind::Sse2);
        #[cfg(simd_backend = "scalar")]
        assert_eq!(kind, BackendKind::Scalar);
    }

    #[test]
    fn test_force_scalar() {
        if cfg!(feature = "force-scalar") {
            assert_eq!(active_backend(), BackendKind::Scalar);
        }
    }

    #[test]
    fn test_backend_info() {
        let info = backend_info();
        println!("{}", info);
        assert!(info.contains(active_backend().name()));
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&BackendKind::Sse2).unwrap();
        assert_eq!(json, "\"sse2\"");
        let kind: BackendKind = serde_json::from_str("\"neon\"").unwrap();
        assert_eq!(kind, BackendKind::Neon);
    }
}
