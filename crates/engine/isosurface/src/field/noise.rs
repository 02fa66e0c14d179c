//! Coherent noise sources for field generation
//!
//! The field generator only needs a 4D sampling capability: three spatial axes
//! plus a fourth "time" axis that acts as the regeneration seed. Any
//! `noise::NoiseFn<f64, 4>` can be plugged in through [`CoherentNoise`], and
//! [`ValueNoise`] provides a small deterministic fallback.

use noise::{NoiseFn, OpenSimplex, Perlin};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability to sample a coherent 4D noise function.
pub trait NoiseSource {
    /// Sample the noise at `(x, y, z, w)`. Must be total over finite inputs.
    fn sample4d(&self, x: f64, y: f64, z: f64, w: f64) -> f64;
}

impl<T> NoiseSource for Box<T>
where
    T: NoiseSource + ?Sized,
{
    fn sample4d(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        (**self).sample4d(x, y, z, w)
    }
}

/// Adapter from the `noise` crate's 4D generators.
#[derive(Debug, Clone)]
pub struct CoherentNoise<N> {
    inner: N,
}

impl<N> CoherentNoise<N>
where
    N: NoiseFn<f64, 4>,
{
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

impl CoherentNoise<OpenSimplex> {
    /// OpenSimplex noise, the closest match to classic 4D simplex noise
    pub fn simplex(seed: u32) -> Self {
        Self::new(OpenSimplex::new(seed))
    }
}

impl CoherentNoise<Perlin> {
    pub fn perlin(seed: u32) -> Self {
        Self::new(Perlin::new(seed))
    }
}

impl<N> NoiseSource for CoherentNoise<N>
where
    N: NoiseFn<f64, 4>,
{
    fn sample4d(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.inner.get([x, y, z, w])
    }
}

/// Hashed lattice value noise in four dimensions.
///
/// Returns values in the range [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueNoise {
    pub seed: u32,
}

impl ValueNoise {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }
}

/// Hash a lattice point to [0, 1]
fn lattice_hash(p: [i32; 4], seed: u32) -> f64 {
    let h = p[0]
        .wrapping_add(p[1].wrapping_mul(57))
        .wrapping_add(p[2].wrapping_mul(113))
        .wrapping_add(p[3].wrapping_mul(241))
        .wrapping_add(seed as i32);
    let h = (h as u32).wrapping_mul(0x27d4eb2d);
    let h = h ^ (h >> 15);
    let h = h.wrapping_mul(0x5BD1E995);
    let h = h ^ (h >> 13);
    (h & 0x7FFFFFFF) as f64 / 0x7FFFFFFF as f64
}

/// Fade function for smooth interpolation: 6t^5 - 15t^4 + 10t^3
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

impl NoiseSource for ValueNoise {
    fn sample4d(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let coords = [x, y, z, w];
        let base = coords.map(|c| c.floor() as i32);
        let weights: [f64; 4] = std::array::from_fn(|i| fade(coords[i] - base[i] as f64));

        // Quadrilinear blend of the 16 surrounding lattice values
        let mut result = 0.0;
        for corner in 0..16usize {
            let mut point = base;
            let mut weight = 1.0;
            for axis in 0..4 {
                if corner & (1 << axis) != 0 {
                    point[axis] = point[axis].wrapping_add(1);
                    weight *= weights[axis];
                } else {
                    weight *= 1.0 - weights[axis];
                }
            }
            result += weight * lattice_hash(point, self.seed);
        }

        result * 2.0 - 1.0
    }
}

/// Selectable noise implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    #[default]
    Simplex,
    Perlin,
    Value,
}

impl NoiseKind {
    /// Build a boxed noise source with the given permutation seed.
    pub fn build(self, seed: u32) -> Box<dyn NoiseSource + Send + Sync> {
        match self {
            NoiseKind::Simplex => Box::new(CoherentNoise::simplex(seed)),
            NoiseKind::Perlin => Box::new(CoherentNoise::perlin(seed)),
            NoiseKind::Value => Box::new(ValueNoise::new(seed)),
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoiseKind::Simplex => "simplex",
            NoiseKind::Perlin => "perlin",
            NoiseKind::Value => "value",
        };
        f.write_str(name)
    }
}

impl FromStr for NoiseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simplex" => Ok(NoiseKind::Simplex),
            "perlin" => Ok(NoiseKind::Perlin),
            "value" => Ok(NoiseKind::Value),
            other => Err(format!(
                "unknown noise kind '{other}' (expected simplex, perlin or value)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_noise_range() {
        for seed in [0, 42, 12345] {
            let noise = ValueNoise::new(seed);
            for i in 0..100 {
                let t = i as f64;
                let v = noise.sample4d(t * 0.1, t * 0.07, t * 0.13, t * 0.05);
                assert!(
                    (-1.0..=1.0).contains(&v),
                    "value noise at step {} with seed {} = {} out of range",
                    i,
                    seed,
                    v
                );
            }
        }
    }

    #[test]
    fn test_value_noise_deterministic() {
        let noise = ValueNoise::new(42);
        let v1 = noise.sample4d(1.5, 2.3, 3.7, 0.25);
        let v2 = noise.sample4d(1.5, 2.3, 3.7, 0.25);
        assert_eq!(v1, v2);
    }

    #[test]
    fn test_value_noise_w_axis_changes_field() {
        let noise = ValueNoise::new(7);
        let differs = (0..20).any(|i| {
            let x = i as f64 * 0.31;
            (noise.sample4d(x, 0.4, 0.9, 0.2) - noise.sample4d(x, 0.4, 0.9, 0.7)).abs() > 1e-6
        });
        assert!(differs, "moving along w should change the field");
    }

    #[test]
    fn test_value_noise_continuity() {
        let noise = ValueNoise::new(42);
        let mut prev = noise.sample4d(0.0, 0.0, 0.0, 0.5);
        for i in 1..100 {
            let t = i as f64 * 0.01;
            let curr = noise.sample4d(t, 0.0, 0.0, 0.5);
            assert!(
                (curr - prev).abs() < 0.5,
                "noise jump too large at t={}: {} -> {}",
                t,
                prev,
                curr
            );
            prev = curr;
        }
    }

    #[test]
    fn test_boxed_source_forwards() {
        let direct = ValueNoise::new(9);
        let boxed: Box<dyn NoiseSource + Send + Sync> = Box::new(direct);
        assert_eq!(
            boxed.sample4d(0.2, 0.4, 0.6, 0.8),
            direct.sample4d(0.2, 0.4, 0.6, 0.8)
        );
    }

    #[test]
    fn test_noise_kind_parse_and_display() {
        for kind in [NoiseKind::Simplex, NoiseKind::Perlin, NoiseKind::Value] {
            assert_eq!(kind.to_string().parse::<NoiseKind>(), Ok(kind));
        }
        assert_eq!("PERLIN".parse::<NoiseKind>(), Ok(NoiseKind::Perlin));
        assert!("worley".parse::<NoiseKind>().is_err());
    }

    #[test]
    fn test_built_sources_are_finite() {
        for kind in [NoiseKind::Simplex, NoiseKind::Perlin, NoiseKind::Value] {
            let noise = kind.build(3);
            let v = noise.sample4d(0.3, 0.6, 0.9, 0.42);
            assert!(v.is_finite(), "{} noise produced {}", kind, v);
        }
    }
}
