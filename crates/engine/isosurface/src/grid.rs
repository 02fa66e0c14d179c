//! Whole-field extraction into a grid of per-cube polygons

use crate::cube::{extract_polygon, Polygon};
use crate::field::ScalarField;
use glam::UVec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One polygon per cube, `(size - 1)`³ cells for a field of `size` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGrid {
    cells_per_axis: u32,
    cells: Vec<Polygon>,
}

impl PolygonGrid {
    /// Grid of empty polygons sized for `field`
    pub fn empty_for(field: &ScalarField) -> Self {
        let cells_per_axis = field.size() - 1;
        let n = cells_per_axis as usize;
        Self {
            cells_per_axis,
            cells: vec![Polygon::default(); n * n * n],
        }
    }

    pub fn cells_per_axis(&self) -> u32 {
        self.cells_per_axis
    }

    /// Samples per axis of the field this grid was extracted from
    pub fn samples_per_axis(&self) -> u32 {
        self.cells_per_axis + 1
    }

    /// Total number of cells, empty or not
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let n = self.cells_per_axis;
        debug_assert!(
            x < n && y < n && z < n,
            "cube origin ({x}, {y}, {z}) outside grid of {n} cells per axis"
        );
        let n = n as usize;
        (x as usize * n + y as usize) * n + z as usize
    }

    /// Polygon of the cube whose lowest corner is `(x, y, z)`
    pub fn get(&self, x: u32, y: u32, z: u32) -> &Polygon {
        &self.cells[self.index(x, y, z)]
    }

    #[inline]
    fn origin_of(&self, index: usize) -> UVec3 {
        let n = self.cells_per_axis as usize;
        UVec3::new((index / (n * n)) as u32, (index / n % n) as u32, (index % n) as u32)
    }

    /// Every cell with its cube origin, in x-major order
    pub fn iter(&self) -> impl Iterator<Item = (UVec3, &Polygon)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, polygon)| (self.origin_of(i), polygon))
    }

    /// Number of cubes the surface passes through
    pub fn polygon_count(&self) -> usize {
        self.cells.iter().filter(|p| !p.is_empty()).count()
    }

    /// Total polygon vertices across the grid
    pub fn vertex_count(&self) -> usize {
        self.cells.iter().map(Polygon::len).sum()
    }
}

/// Extract one polygon per cube of `field` at `threshold`.
pub fn extract_all(field: &ScalarField, threshold: f32) -> PolygonGrid {
    let mut grid = PolygonGrid::empty_for(field);
    fill_serial(&mut grid, field, threshold);
    grid
}

/// Parallel variant of [`extract_all`]; each cube writes only its own cell.
#[cfg(feature = "parallel")]
pub fn extract_all_parallel(field: &ScalarField, threshold: f32) -> PolygonGrid {
    let mut grid = PolygonGrid::empty_for(field);
    fill_parallel(&mut grid, field, threshold);
    grid
}

/// Overwrite every cell of `grid`, which must match `field`'s dimensions.
fn fill_serial(grid: &mut PolygonGrid, field: &ScalarField, threshold: f32) {
    for index in 0..grid.cells.len() {
        let origin = grid.origin_of(index);
        let values = field.corner_values(origin.x, origin.y, origin.z);
        grid.cells[index] = extract_polygon(&values, threshold);
    }
}

#[cfg(feature = "parallel")]
fn fill_parallel(grid: &mut PolygonGrid, field: &ScalarField, threshold: f32) {
    let n = grid.cells_per_axis as usize;
    grid.cells
        .par_iter_mut()
        .enumerate()
        .for_each(|(index, cell)| {
            let x = (index / (n * n)) as u32;
            let y = (index / n % n) as u32;
            let z = (index % n) as u32;
            *cell = extract_polygon(&field.corner_values(x, y, z), threshold);
        });
}

/// Owns the current polygon grid and rebuilds it on threshold or field change.
#[derive(Debug, Clone)]
pub struct GridExtractor {
    threshold: f32,
    parallel: bool,
    grid: PolygonGrid,
}

impl GridExtractor {
    /// Extract `field` at `threshold` immediately, on the calling thread.
    pub fn new(field: &ScalarField, threshold: f32) -> Self {
        Self::with_mode(field, threshold, false)
    }

    /// Like [`GridExtractor::new`], optionally on the rayon pool.
    ///
    /// `parallel` is ignored without the `parallel` feature.
    pub fn with_mode(field: &ScalarField, threshold: f32, parallel: bool) -> Self {
        let mut extractor = Self {
            threshold,
            parallel,
            grid: PolygonGrid::empty_for(field),
        };
        extractor.refresh(field);
        extractor
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn grid(&self) -> &PolygonGrid {
        &self.grid
    }

    /// Change the threshold and re-extract the unchanged field.
    pub fn set_threshold(&mut self, field: &ScalarField, threshold: f32) {
        self.threshold = threshold;
        self.refresh(field);
    }

    /// Re-extract after the field was regenerated.
    ///
    /// The cell buffer is reused unless the field changed size.
    pub fn refresh(&mut self, field: &ScalarField) {
        if self.grid.samples_per_axis() != field.size() {
            self.grid = PolygonGrid::empty_for(field);
        }
        self.run(field);
        tracing::debug!(
            threshold = self.threshold,
            polygons = self.grid.polygon_count(),
            vertices = self.grid.vertex_count(),
            "Extracted polygon grid"
        );
    }

    #[cfg(feature = "parallel")]
    fn run(&mut self, field: &ScalarField) {
        if self.parallel {
            fill_parallel(&mut self.grid, field, self.threshold);
        } else {
            fill_serial(&mut self.grid, field, self.threshold);
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&mut self, field: &ScalarField) {
        fill_serial(&mut self.grid, field, self.threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_field(size: u32) -> ScalarField {
        let max = (size - 1) as f32;
        ScalarField::from_fn(size, |x, _, _| x as f32 / max).unwrap()
    }

    #[test]
    fn test_grid_dimensions() {
        let field = ScalarField::new(5).unwrap();
        let grid = extract_all(&field, 0.5);
        assert_eq!(grid.cells_per_axis(), 4);
        assert_eq!(grid.len(), 64);
        assert_eq!(grid.polygon_count(), 0);
    }

    #[test]
    fn test_origin_round_trip() {
        let field = ScalarField::new(4).unwrap();
        let grid = extract_all(&field, 0.5);
        for (i, (origin, _)) in grid.iter().enumerate() {
            assert_eq!(grid.index(origin.x, origin.y, origin.z), i);
        }
    }

    #[test]
    fn test_ramp_crosses_one_slab() {
        // x samples 0, 0.25, 0.5, 0.75, 1.0: threshold 0.6 sits between x=2 and x=3
        let field = ramp_field(5);
        let grid = extract_all(&field, 0.6);
        for (origin, polygon) in grid.iter() {
            if origin.x == 2 {
                assert_eq!(polygon.len(), 4, "cube {:?} should hold a quad", origin);
            } else {
                assert!(polygon.is_empty(), "cube {:?} should be empty", origin);
            }
        }
        assert_eq!(grid.polygon_count(), 16);
        assert_eq!(grid.vertex_count(), 64);
    }

    #[test]
    fn test_set_threshold_re_extracts() {
        let field = ramp_field(5);
        let mut extractor = GridExtractor::new(&field, 0.6);
        assert_eq!(extractor.grid().get(2, 0, 0).len(), 4);

        extractor.set_threshold(&field, 0.1);
        assert!(extractor.grid().get(2, 0, 0).is_empty());
        assert_eq!(extractor.grid().get(0, 0, 0).len(), 4);
        assert_eq!(extractor.threshold(), 0.1);
    }

    #[test]
    fn test_re_extraction_reuses_cells() {
        let field = ramp_field(5);
        let mut extractor = GridExtractor::with_mode(&field, 0.6, true);
        let cells = extractor.grid().cells.as_ptr();

        extractor.set_threshold(&field, 0.1);
        extractor.refresh(&field);
        assert_eq!(extractor.grid().cells.as_ptr(), cells);
        assert_eq!(extractor.grid(), &extract_all(&field, 0.1));

        // A differently sized field gets a fresh grid of the right shape
        let larger = ramp_field(7);
        extractor.refresh(&larger);
        assert_eq!(extractor.grid().cells_per_axis(), 6);
        assert_eq!(extractor.grid(), &extract_all(&larger, 0.1));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let field = ScalarField::from_fn(7, |x, y, z| {
            ((x * 7 + y * 3 + z * 5) % 11) as f32 / 10.0
        })
        .unwrap();
        for threshold in [0.0, 0.3, 0.5, 0.95] {
            assert_eq!(
                extract_all(&field, threshold),
                extract_all_parallel(&field, threshold)
            );
        }
    }
}
