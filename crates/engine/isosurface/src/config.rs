//! Extraction configuration
//!
//! Values come from defaults, an optional TOML file, and CLI overrides in the
//! driver binary. Everything is validated here before the engine sees it.

use crate::error::{IsoError, Result};
use crate::field::{NoiseKind, MAX_FIELD_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted world size in cubes per axis
pub const MAX_WORLD_SIZE: u32 = MAX_FIELD_SIZE - 1;

/// Configuration for a field and its extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsoConfig {
    /// Cubes per axis. Odd values are rounded up to the next even size.
    pub world_size: u32,

    /// Initial iso threshold, within [0, 1]
    pub threshold: f32,

    /// Seed for the regeneration RNG. `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Noise implementation used for generation
    pub noise: NoiseKind,

    /// Permutation seed of the noise function itself
    pub noise_seed: u32,

    /// Extract cubes on the rayon pool when available
    pub parallel: bool,
}

impl Default for IsoConfig {
    fn default() -> Self {
        Self {
            world_size: 10,
            threshold: 0.5,
            seed: None,
            noise: NoiseKind::default(),
            noise_seed: 0,
            parallel: true,
        }
    }
}

impl IsoConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// World size rounded up to an even number of cubes
    ///
    /// Saturates for sizes that [`IsoConfig::validate`] would reject anyway.
    pub fn even_world_size(&self) -> u32 {
        self.world_size
            .checked_add(self.world_size % 2)
            .unwrap_or(u32::MAX)
    }

    /// Samples per field axis: one more than the number of cubes
    pub fn samples_per_axis(&self) -> u32 {
        self.even_world_size().saturating_add(1)
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_WORLD_SIZE).contains(&self.world_size) {
            return Err(IsoError::InvalidWorldSize {
                size: self.world_size,
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(IsoError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
