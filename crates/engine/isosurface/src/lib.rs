//! Iso-surface extraction from normalized 3D noise fields
//!
//! The pipeline has three stages:
//! - [`ScalarField`] samples a 4D coherent noise function over a cubic lattice
//!   and normalizes it to [0, 1].
//! - [`extract_polygon`] turns the 8 corner samples of one cube into a single
//!   polygon through the midpoints of the edges that cross the threshold.
//! - [`GridExtractor`] runs that over every cube and owns the resulting
//!   [`PolygonGrid`], rebuilding it when the threshold or the field changes.
//!
//! [`IsoSurface`] ties the three together behind the two trigger events a
//! front end needs, and [`mesh`] flattens a grid for a renderer.

pub mod config;
pub mod cube;
mod error;
pub mod field;
pub mod grid;
pub mod mesh;
pub mod session;
pub mod timer;

pub use config::{IsoConfig, MAX_WORLD_SIZE};
pub use cube::{extract_polygon, Polygon, CUBE_CORNERS, CUBE_EDGES};
pub use error::{IsoError, Result};
pub use field::{CoherentNoise, NoiseKind, NoiseSource, ScalarField, ValueNoise};
pub use grid::{extract_all, GridExtractor, PolygonGrid};
pub use mesh::SurfaceMesh;
pub use session::IsoSurface;
pub use timer::StageTimer;

#[cfg(feature = "parallel")]
pub use grid::extract_all_parallel;

// Re-export glam for convenience
pub use glam;
