// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Error types for the buffer, kernel and verification layers.
//!
//! Vector operations themselves never fail; only the code around them
//! (allocation, configuration, kernels over caller buffers) returns errors.

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid alignment: {0} is not a power of two")]
    InvalidAlignment(usize),

    #[error("Allocation failed: {bytes} bytes aligned to {align}")]
    AllocationFailed { bytes: usize, align: usize },

    #[error("Length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
