//! Unit cube topology shared by the field sampler and the polygon extractor
//!
//! Corner order is a contract: [`crate::ScalarField::corner_values`] gathers
//! samples in this order and [`extract_polygon`] interprets indices with it.
//!
//! ```text
//!        7 -------- 6
//!       /|         /|
//!      4 -------- 5 |
//!      | |        | |
//!      | 3 -------|-2
//!      |/         |/
//!      0 -------- 1
//! ```
//!
//! Corners 4-7 sit directly above 0-3 along +z.

mod extract;

pub use extract::{active_edges, extract_polygon, order_polygon, Polygon};

use glam::Vec3;

/// Integer offsets of the 8 cube corners from the cube origin
pub const CUBE_CORNERS: [[u32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// The 12 cube edges as pairs of corner indices, in scan order
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (0, 3),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
    (4, 5),
    (5, 6),
    (6, 7),
    (4, 7),
];

/// Cube-local position of a corner
#[inline]
pub fn corner_position(corner: usize) -> Vec3 {
    let [x, y, z] = CUBE_CORNERS[corner];
    Vec3::new(x as f32, y as f32, z as f32)
}

/// Midpoint of an edge in cube-local coordinates
#[inline]
pub fn edge_midpoint((a, b): (usize, usize)) -> Vec3 {
    (corner_position(a) + corner_position(b)) / 2.0
}

/// A sample counts as inside only when strictly greater than the threshold.
#[inline]
pub fn is_above(value: f32, threshold: f32) -> bool {
    value > threshold
}

/// True when exactly one endpoint of `edge` is above the threshold
#[inline]
pub fn edge_is_active(values: &[f32; 8], (a, b): (usize, usize), threshold: f32) -> bool {
    is_above(values[a], threshold) != is_above(values[b], threshold)
}
