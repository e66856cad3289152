// Copyright 2025 Prism Authors
//
// Licensed under the Apache License, Version 2.0

//! Verification configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default number of random samples per operation
pub const DEFAULT_SAMPLES: usize = 1024;

/// Default RNG seed
pub const DEFAULT_SEED: u64 = 0x5eed_cafe;

/// Largest magnitude used for random float lanes
pub const DEFAULT_FLOAT_RANGE: f32 = 1.0e6;

/// Configuration for a verification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Random samples per operation
    pub samples: usize,

    /// Seed for the sample generator
    pub seed: u64,

    /// Random float lanes are drawn from `-float_range..float_range`
    pub float_range: f32,

    /// Mix NaN, infinities, signed zeros and integer extremes into the samples
    pub special_values: bool,

    /// Operation families to check
    pub families: FamilySet,

    /// Also run the pixel kernels on random images
    pub kernels: bool,

    /// Abort a family after this many mismatches (0 = unlimited)
    pub max_mismatches: usize,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            seed: DEFAULT_SEED,
            float_range: DEFAULT_FLOAT_RANGE,
            special_values: true,
            families: FamilySet::default(),
            kernels: true,
            max_mismatches: 16,
        }
    }
}

impl VerifyConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded verify config");
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.samples == 0 {
            return Err(crate::Error::Config("samples must be > 0".into()));
        }
        if !self.float_range.is_finite() || self.float_range <= 0.0 {
            return Err(crate::Error::Config(format!(
                "float_range must be finite and > 0, got {}",
                self.float_range
            )));
        }
        if !self.families.any() && !self.kernels {
            return Err(crate::Error::Config(
                "nothing to verify: every family and kernels are disabled".into(),
            ));
        }
        Ok(())
    }
}

/// Which vector families a verification run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilySet {
    pub int32x4: bool,
    pub float32x4: bool,
    pub uint8x16: bool,
}

impl Default for FamilySet {
    fn default() -> Self {
        Self {
            int32x4: true,
            float32x4: true,
            uint8x16: true,
        }
    }
}

impl FamilySet {
    /// True if at least one family is enabled.
    pub fn any(&self) -> bool {
        self.int32x4 || self.float32x4 || self.uint8x16
    }
}
