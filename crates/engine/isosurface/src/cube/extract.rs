//! Per-cube polygon extraction
//!
//! Each active edge contributes its midpoint (not a threshold-weighted
//! interpolation), and the points are chained greedily by distance into a
//! single polygon. This is a simplified marching cubes without the 256-case
//! triangulation table; the polygon is plausible but not guaranteed simple.

use super::{edge_is_active, edge_midpoint, CUBE_EDGES};
use glam::Vec3;

/// Ordered polygon in cube-local [0, 1]³ coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon(Vec<Vec3>);

impl Polygon {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Active edges in edge-table order
pub fn active_edges(values: &[f32; 8], threshold: f32) -> Vec<(usize, usize)> {
    CUBE_EDGES
        .iter()
        .copied()
        .filter(|&edge| edge_is_active(values, edge, threshold))
        .collect()
}

/// Extract the polygon dividing a cube along `threshold`.
///
/// `values` must follow [`super::CUBE_CORNERS`] order. Returns an empty
/// polygon when the threshold does not cross the cube.
pub fn extract_polygon(values: &[f32; 8], threshold: f32) -> Polygon {
    let mut points: Vec<Vec3> = active_edges(values, threshold)
        .into_iter()
        .map(edge_midpoint)
        .collect();
    order_polygon(&mut points);
    Polygon(points)
}

/// Greedy distance chain.
///
/// For each position in turn, the remaining suffix is stably sorted by
/// distance to the point at that position. The first point stays first.
pub fn order_polygon(points: &mut [Vec3]) {
    for index in 0..points.len() {
        let (head, rest) = points.split_at_mut(index + 1);
        let current = head[index];
        rest.sort_by(|a, b| a.distance(current).total_cmp(&b.distance(current)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_below_is_empty() {
        assert!(extract_polygon(&[0.1; 8], 0.5).is_empty());
    }

    #[test]
    fn test_all_above_is_empty() {
        assert!(extract_polygon(&[0.9; 8], 0.5).is_empty());
    }

    #[test]
    fn test_uniform_at_threshold_is_empty() {
        assert!(extract_polygon(&[0.5; 8], 0.5).is_empty());
    }

    #[test]
    fn test_single_corner_gives_triangle() {
        let mut values = [0.0; 8];
        values[0] = 1.0;
        let polygon = extract_polygon(&values, 0.5);
        assert_eq!(
            polygon.points(),
            &[
                Vec3::new(0.5, 0.0, 0.0),
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(0.0, 0.0, 0.5),
            ]
        );
    }

    #[test]
    fn test_slab_gives_ordered_quad() {
        let values = [0.1, 0.9, 0.9, 0.1, 0.1, 0.9, 0.9, 0.1];
        let polygon = extract_polygon(&values, 0.5);
        assert_eq!(
            polygon.points(),
            &[
                Vec3::new(0.5, 0.0, 0.0),
                Vec3::new(0.5, 1.0, 0.0),
                Vec3::new(0.5, 1.0, 1.0),
                Vec3::new(0.5, 0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_hexagon_is_chained_by_distance() {
        // Corners 2, 5, 6 and 7 above the threshold cut six edges
        let mut values = [0.0; 8];
        for corner in [2, 5, 6, 7] {
            values[corner] = 1.0;
        }
        let polygon = extract_polygon(&values, 0.5);
        assert_eq!(
            polygon.points(),
            &[
                Vec3::new(1.0, 0.5, 0.0),
                Vec3::new(0.5, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.5),
                Vec3::new(0.0, 0.5, 1.0),
                Vec3::new(0.5, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 0.5),
            ]
        );
    }

    #[test]
    fn test_order_keeps_first_point() {
        let mut points = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.9, 0.0, 0.0),
        ];
        order_polygon(&mut points);
        assert_eq!(
            points,
            vec![
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.9, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_order_is_stable_on_ties() {
        let mut points = vec![
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        order_polygon(&mut points);
        assert_eq!(points[1], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(points[2], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_order_handles_empty_and_single() {
        let mut empty: Vec<Vec3> = Vec::new();
        order_polygon(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![Vec3::ONE];
        order_polygon(&mut single);
        assert_eq!(single, vec![Vec3::ONE]);
    }
}
