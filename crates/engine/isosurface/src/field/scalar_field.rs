//! Dense cubic lattice of normalized samples

use super::noise::NoiseSource;
use crate::cube::CUBE_CORNERS;
use crate::error::{IsoError, Result};

/// Smallest lattice that still contains one cube
pub const MIN_FIELD_SIZE: u32 = 2;

/// Largest lattice accepted, 1025³ samples (about 4 GiB of `f32`)
pub const MAX_FIELD_SIZE: u32 = 1025;

/// A `size`³ lattice of scalar samples.
///
/// After [`ScalarField::normalize`] every sample lies in [0, 1], with the
/// minimum mapped to 0 and the maximum to 1 (or all zeros for a flat field).
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    size: u32,
    samples: Vec<f32>,
}

impl ScalarField {
    /// Create an all-zero field with `size` samples per axis.
    pub fn new(size: u32) -> Result<Self> {
        let count = cell_count(size)?;
        Ok(Self {
            size,
            samples: vec![0.0; count],
        })
    }

    /// Wrap an existing sample buffer laid out as `(x * size + y) * size + z`.
    pub fn from_samples(size: u32, samples: Vec<f32>) -> Result<Self> {
        let expected = cell_count(size)?;
        if samples.len() != expected {
            return Err(IsoError::DimensionMismatch {
                size,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self { size, samples })
    }

    /// Build a field by evaluating `f` at every lattice point.
    pub fn from_fn(size: u32, mut f: impl FnMut(u32, u32, u32) -> f32) -> Result<Self> {
        let mut samples = Vec::with_capacity(cell_count(size)?);
        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    samples.push(f(x, y, z));
                }
            }
        }
        Ok(Self { size, samples })
    }

    /// Samples per axis
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(
            x < self.size && y < self.size && z < self.size,
            "lattice point ({x}, {y}, {z}) outside field of size {}",
            self.size
        );
        let n = self.size as usize;
        (x as usize * n + y as usize) * n + z as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32, z: u32) -> f32 {
        self.samples[self.index(x, y, z)]
    }

    /// The 8 samples of the cube whose lowest corner is `(x, y, z)`, in
    /// canonical corner order.
    pub fn corner_values(&self, x: u32, y: u32, z: u32) -> [f32; 8] {
        CUBE_CORNERS.map(|[dx, dy, dz]| self.get(x + dx, y + dy, z + dz))
    }

    /// Smallest and largest sample
    pub fn min_max(&self) -> (f32, f32) {
        self.samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Number of samples strictly above `threshold`
    pub fn count_above(&self, threshold: f32) -> usize {
        self.samples.iter().filter(|&&v| v > threshold).count()
    }

    /// Overwrite every sample with raw noise at `(x/size, y/size, z/size, w)`.
    ///
    /// The `w` axis acts as the seed: different values give distinct but
    /// spatially coherent fields. Samples are not normalized.
    pub fn generate<N>(&mut self, noise: &N, w: f64)
    where
        N: NoiseSource + ?Sized,
    {
        let size = self.size as f64;
        let n = self.size;
        let mut samples = Vec::with_capacity(self.samples.len());
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let value =
                        noise.sample4d(x as f64 / size, y as f64 / size, z as f64 / size, w);
                    samples.push(value as f32);
                }
            }
        }
        self.samples = samples;
    }

    /// Remap every sample to `(v - min) / (max - min)`.
    ///
    /// A flat field has no surface at any threshold, so it becomes all zeros.
    pub fn normalize(&mut self) {
        let (min, max) = self.min_max();
        let range = max - min;
        if range <= 0.0 || !range.is_finite() {
            tracing::warn!(
                min,
                max,
                "Degenerate field during normalization, resetting to zeros"
            );
            self.samples.iter_mut().for_each(|v| *v = 0.0);
            return;
        }

        for v in &mut self.samples {
            *v = (*v - min) / range;
        }
    }

    /// Generate and normalize in one pass.
    pub fn regenerate<N>(&mut self, noise: &N, w: f64)
    where
        N: NoiseSource + ?Sized,
    {
        self.generate(noise, w);
        self.normalize();
        tracing::debug!(size = self.size, w, "Regenerated scalar field");
    }
}

/// Sample count of a `size`³ lattice, rejecting sizes outside the supported range.
fn cell_count(size: u32) -> Result<usize> {
    if !(MIN_FIELD_SIZE..=MAX_FIELD_SIZE).contains(&size) {
        return Err(IsoError::InvalidWorldSize { size });
    }
    let n = size as usize;
    n.checked_mul(n)
        .and_then(|square| square.checked_mul(n))
        .ok_or(IsoError::InvalidWorldSize { size })
}
