//! Command line argument processing
//!
//! Flags override values loaded from `--config`, which override the defaults
//! in [`IsoConfig`].

use clap::Parser;
use isosurface::{IsoConfig, NoiseKind};
use std::path::PathBuf;

/// Extract iso-surface polygons from a random noise field
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "marching-cubes")]
#[command(about = "Generates random 3D noise fields and extracts marching-cubes polygons", long_about = None)]
pub struct Args {
    /// Cubes per axis; odd values are rounded up to the next even number
    #[arg(long, short = 'w', value_name = "SIZE")]
    pub world_size: Option<u32>,

    /// Initial iso threshold within [0, 1]
    #[arg(long, short = 't', value_name = "VALUE")]
    pub threshold: Option<f32>,

    /// Seed for the regeneration RNG (random when omitted)
    #[arg(long, short = 's', value_name = "SEED")]
    pub seed: Option<u64>,

    /// Noise implementation: simplex, perlin or value
    #[arg(long, value_name = "KIND")]
    pub noise: Option<NoiseKind>,

    /// Permutation seed of the noise function
    #[arg(long, value_name = "SEED")]
    pub noise_seed: Option<u32>,

    /// Load configuration from a TOML file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extract on the calling thread only
    #[arg(long)]
    pub serial: bool,

    /// Print a per-stage timing report after each pass
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Regenerate the field N additional times
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub regenerate: u32,

    /// Re-extract the final field at N evenly spaced thresholds
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub sweep: u32,
}

impl Args {
    /// Resolve the final configuration: defaults, then file, then flags.
    pub fn resolve(&self) -> isosurface::Result<IsoConfig> {
        let mut config = match &self.config {
            Some(path) => IsoConfig::load(path)?,
            None => IsoConfig::default(),
        };

        if let Some(world_size) = self.world_size {
            config.world_size = world_size;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(noise) = self.noise {
            config.noise = noise;
        }
        if let Some(noise_seed) = self.noise_seed {
            config.noise_seed = noise_seed;
        }
        if self.serial {
            config.parallel = false;
        }

        config.validate()?;
        config.world_size = config.even_world_size();
        Ok(config)
    }

    /// Thresholds for `--sweep`, from 0 to 1 inclusive
    pub fn sweep_thresholds(&self) -> Vec<f32> {
        match self.sweep {
            0 => Vec::new(),
            1 => vec![0.5],
            n => (0..n).map(|i| i as f32 / (n - 1) as f32).collect(),
        }
    }
}
