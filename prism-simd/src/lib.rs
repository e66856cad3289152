// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! # Prism SIMD
//!
//! Portable 128-bit vector math for the Prism multimedia platform.
//!
//! One API (`Int32x4`, `Float32x4`, `Uint8x16`) over ARM NEON, x86 SSE2 and a
//! portable scalar fallback, with identical observable results on every
//! backend. The backend is chosen once per build by `build.rs`; there is no
//! runtime dispatch.
//!
//! ## Modules
//!
//! - [`simd`]: vector types, backend traits and the `<family>_<op>` functions
//! - [`memory`]: 16-byte aligned buffers for `*_load`/`*_store`
//! - [`kernels`]: RGBA8 pixel kernels built on the vector API
//! - [`verify`]: replay operations against the scalar reference
//! - [`config`]: verification settings
//!
//! ## Example
//!
//! ```rust
//! use prism_simd::prelude::*;
//!
//! let a = int32x4_set4(1, 2, 3, 4);
//! let b = int32x4_set1(10);
//! let sum = int32x4_add(a, b);
//! assert_eq!(int32x4_to_array(sum), [11, 12, 13, 14]);
//!
//! let mask = int32x4_compare_gt(sum, int32x4_set1(12));
//! assert_eq!(int32x4_get_mask(mask), 0b1100);
//! ```
//!
//! ## Cargo features
//!
//! - `force-scalar`: compile the scalar backend as the active backend on
//!   every target.

pub mod config;
pub mod error;
pub mod kernels;
pub mod memory;
pub mod simd;
pub mod verify;

pub use error::{Error, Result};

/// Common imports: vector types, all facade functions and the buffer type.
pub mod prelude {
    pub use crate::memory::AlignedBuffer;
    pub use crate::simd::*;
    pub use crate::{Error, Result};
}
