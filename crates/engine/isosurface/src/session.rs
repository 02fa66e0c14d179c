//! Owning driver for a field and its polygon grid
//!
//! Exposes the two re-entry points of the engine: regenerate the field, or
//! change the threshold. Both rebuild the polygon grid wholesale.

use crate::config::IsoConfig;
use crate::error::Result;
use crate::field::{NoiseSource, ScalarField};
use crate::grid::{GridExtractor, PolygonGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Threshold change per scroll step
pub const THRESHOLD_STEP: f32 = 0.01;

/// A scalar field, its noise source and the current extraction
pub struct IsoSurface<N> {
    noise: N,
    rng: StdRng,
    seed_w: f64,
    field: ScalarField,
    extractor: GridExtractor,
}

impl<N> IsoSurface<N>
where
    N: NoiseSource,
{
    /// Validate `config`, generate the first field and extract it.
    pub fn new(config: &IsoConfig, noise: N) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let seed_w = rng.random::<f64>();

        let mut field = ScalarField::new(config.samples_per_axis())?;
        field.regenerate(&noise, seed_w);
        let extractor = GridExtractor::with_mode(&field, config.threshold, config.parallel);
        let surface = Self {
            noise,
            rng,
            seed_w,
            field,
            extractor,
        };

        tracing::info!(
            samples = config.samples_per_axis(),
            threshold = config.threshold,
            polygons = surface.grid().polygon_count(),
            "Created iso-surface"
        );
        Ok(surface)
    }

    /// Draw a new seed, regenerate the field and re-extract.
    pub fn regenerate(&mut self) {
        self.seed_w = self.rng.random::<f64>();
        self.field.regenerate(&self.noise, self.seed_w);
        self.extractor.refresh(&self.field);
        tracing::info!(
            seed = self.seed_w,
            polygons = self.grid().polygon_count(),
            "Regenerated field"
        );
    }

    /// Clamp `threshold` to [0, 1] and re-extract the existing field.
    pub fn set_threshold(&mut self, threshold: f32) {
        let threshold = if threshold.is_nan() {
            self.threshold()
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self.extractor.set_threshold(&self.field, threshold);
    }

    /// Move the threshold by `steps` increments of [`THRESHOLD_STEP`].
    pub fn step_threshold(&mut self, steps: i32) {
        self.set_threshold(self.threshold() + steps as f32 * THRESHOLD_STEP);
    }

    pub fn threshold(&self) -> f32 {
        self.extractor.threshold()
    }

    /// The `w` coordinate the current field was sampled at
    pub fn seed_w(&self) -> f64 {
        self.seed_w
    }

    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    pub fn grid(&self) -> &PolygonGrid {
        self.extractor.grid()
    }
}
