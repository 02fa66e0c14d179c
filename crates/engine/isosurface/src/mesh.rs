//! Renderer-facing geometry built from a polygon grid
//!
//! Polygons are placed in world space by translating each cube-local point by
//! its cube origin minus a centering offset, so the field is drawn around the
//! origin. Colors follow the cube position through the field.

use crate::cube::Polygon;
use crate::grid::PolygonGrid;
use glam::{UVec3, Vec3};

/// Offset that centers a field of `samples` per axis on the origin
pub fn centering_offset(samples: u32) -> f32 {
    (samples / 2) as f32
}

/// Translate a cube-local polygon into world space.
pub fn world_polygon(origin: UVec3, polygon: &Polygon, offset: f32) -> Vec<Vec3> {
    let base = origin.as_vec3() - Vec3::splat(offset);
    polygon.points().iter().map(|&p| base + p).collect()
}

/// Per-cube color, a gradient across the field
pub fn cube_color(origin: UVec3, samples: u32) -> [f32; 3] {
    let c = origin.as_vec3() / samples as f32;
    [c.x, c.y, c.z]
}

/// Flat triangle mesh of every polygon in a grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub colors: Vec<f32>,
}

impl SurfaceMesh {
    /// Triangulate each polygon as a fan around its first point.
    ///
    /// Polygons with fewer than 3 points carry no area and are skipped.
    pub fn from_grid(grid: &PolygonGrid) -> Self {
        let samples = grid.samples_per_axis();
        let offset = centering_offset(samples);
        let mut mesh = Self::default();

        for (origin, polygon) in grid.iter() {
            if polygon.len() < 3 {
                continue;
            }

            let base = (mesh.vertices.len() / 3) as u32;
            let color = cube_color(origin, samples);
            for point in world_polygon(origin, polygon, offset) {
                mesh.vertices.extend_from_slice(&point.to_array());
                mesh.colors.extend_from_slice(&color);
            }

            for i in 1..polygon.len() as u32 - 1 {
                mesh.indices.extend_from_slice(&[base, base + i, base + i + 1]);
            }
        }

        tracing::debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Built surface mesh"
        );
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Line segments for wireframe display: consecutive point pairs per polygon.
///
/// A trailing unpaired point is dropped.
pub fn wireframe_lines(grid: &PolygonGrid) -> Vec<[Vec3; 2]> {
    let offset = centering_offset(grid.samples_per_axis());
    grid.iter()
        .flat_map(|(origin, polygon)| {
            world_polygon(origin, polygon, offset)
                .chunks_exact(2)
                .map(|pair| [pair[0], pair[1]])
                .collect::<Vec<_>>()
        })
        .collect()
}
