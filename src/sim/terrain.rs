//! Destructible block terrain
//!
//! A sparse map from integer grid cell to block material. Cells are filled
//! once by procedural generation and afterwards only removed (by explosions).
//! Grid row indices grow downward, matching world-space Y.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::noise::NoiseField;
use crate::consts::*;

/// Block material, assigned by depth below the column surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    Grass,
    Dirt,
    Stone,
}

impl Material {
    /// Material for a block `depth` rows below its column's surface
    pub fn for_depth(depth: i32) -> Self {
        match depth {
            0 => Material::Grass,
            1 | 2 => Material::Dirt,
            _ => Material::Stone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub material: Material,
}

/// Integer grid coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a world-space point
    #[inline]
    pub fn containing(point: Vec2) -> Self {
        Self {
            x: (point.x / BLOCK_SIZE).floor() as i32,
            y: (point.y / BLOCK_SIZE).floor() as i32,
        }
    }

    /// World-space top-left corner
    #[inline]
    pub fn min_corner(self) -> Vec2 {
        Vec2::new(self.x as f32 * BLOCK_SIZE, self.y as f32 * BLOCK_SIZE)
    }

    /// World-space center
    #[inline]
    pub fn center(self) -> Vec2 {
        self.min_corner() + Vec2::splat(BLOCK_SIZE * 0.5)
    }
}

/// Procedural generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Number of columns, centered on column 0
    pub columns: u32,
    /// Surface row of a column whose noise offset is zero
    pub min_ground_row: i32,
    /// Rows filled below each column's surface (surface included)
    pub depth: u32,
    /// Maximum upward surface offset, in rows
    pub amplitude: u32,
    /// Noise sampling frequency per column
    pub noise_scale: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            columns: 200,
            min_ground_row: 0,
            depth: 10,
            amplitude: 4,
            noise_scale: 0.05,
        }
    }
}

impl TerrainParams {
    /// First (leftmost) column index
    pub fn first_column(&self) -> i32 {
        -((self.columns / 2) as i32)
    }

    /// Column indices covered by generation
    pub fn column_range(&self) -> std::ops::Range<i32> {
        let start = self.first_column();
        start..start + self.columns as i32
    }
}

/// Sparse block grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainGrid {
    cells: HashMap<GridCoord, Block>,
}

impl TerrainGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from explicit cells (fixtures, flat test platforms)
    pub fn from_cells(cells: impl IntoIterator<Item = (GridCoord, Material)>) -> Self {
        Self {
            cells: cells
                .into_iter()
                .map(|(coord, material)| (coord, Block { material }))
                .collect(),
        }
    }

    /// Generate terrain columns from the noise field
    ///
    /// Idempotent: the same field and parameters always produce the same grid.
    pub fn generate(noise: &NoiseField, params: &TerrainParams) -> Self {
        let mut cells = HashMap::with_capacity((params.columns * params.depth) as usize);

        for gx in params.column_range() {
            let top = params.min_ground_row - column_height_offset(noise, params, gx);
            for depth in 0..params.depth as i32 {
                cells.insert(
                    GridCoord::new(gx, top + depth),
                    Block {
                        material: Material::for_depth(depth),
                    },
                );
            }
        }

        log::info!(
            "Generated terrain: seed={} columns={} cells={}",
            noise.seed(),
            params.columns,
            cells.len()
        );

        Self { cells }
    }

    #[inline]
    pub fn is_solid(&self, coord: GridCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<&Block> {
        self.cells.get(&coord)
    }

    /// Remove a block; returns what was there
    pub fn remove(&mut self, coord: GridCoord) -> Option<Block> {
        self.cells.remove(&coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Block)> {
        self.cells.iter().map(|(coord, block)| (*coord, block))
    }

    /// Occupied cells sorted row-major, for stable snapshots
    pub fn sorted_cells(&self) -> Vec<(GridCoord, Material)> {
        let mut cells: Vec<_> = self.iter().map(|(c, b)| (c, b.material)).collect();
        cells.sort_by_key(|(c, _)| (c.y, c.x));
        cells
    }

    /// Surface row for a spawn column
    ///
    /// Scans upward from the deepest possible terrain row toward the highest
    /// possible surface row and returns the top of the first solid run found.
    /// Falls back to `min_ground_row` when the column is empty.
    /// The top of the run is the surface block, so bodies spawn above ground
    /// rather than at the deepest occupied row.
    pub fn spawn_row(&self, column: i32, params: &TerrainParams) -> i32 {
        let bottom = params.min_ground_row + params.depth as i32;
        let top = params.min_ground_row - params.amplitude as i32;

        let mut surface = None;
        for gy in (top..=bottom).rev() {
            if self.is_solid(GridCoord::new(column, gy)) {
                surface = Some(gy);
            } else if surface.is_some() {
                break;
            }
        }

        surface.unwrap_or_else(|| {
            log::warn!(
                "No ground under spawn column {}, using row {}",
                column,
                params.min_ground_row
            );
            params.min_ground_row
        })
    }

    /// World-space Y for a body spawned above `column`
    pub fn spawn_y(&self, column: i32, params: &TerrainParams) -> f32 {
        self.spawn_row(column, params) as f32 * BLOCK_SIZE - SPAWN_CLEARANCE
    }
}

/// Rows a column's surface is raised above `min_ground_row`
fn column_height_offset(noise: &NoiseField, params: &TerrainParams, gx: i32) -> i32 {
    let n = noise.sample(gx as f32 * params.noise_scale);
    let scaled = (n + 1.0) / 2.0;
    let offset = (scaled * params.amplitude as f32).round() as i32;
    offset.clamp(0, params.amplitude as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> TerrainParams {
        TerrainParams {
            columns: 40,
            min_ground_row: 5,
            depth: 6,
            amplitude: 4,
            noise_scale: 0.05,
        }
    }

    #[test]
    fn test_generation_is_idempotent() {
        let params = TerrainParams::default();
        let a = TerrainGrid::generate(&NoiseField::generate(12345), &params);
        let b = TerrainGrid::generate(&NoiseField::generate(12345), &params);
        assert_eq!(a, b);
        assert_eq!(a.sorted_cells(), b.sorted_cells());
        assert_eq!(a.len(), (params.columns * params.depth) as usize);
    }

    #[test]
    fn test_columns_have_layered_materials() {
        let params = small_params();
        let grid = TerrainGrid::generate(&NoiseField::generate(42), &params);

        for gx in params.column_range() {
            let rows: Vec<i32> = grid
                .iter()
                .filter(|(c, _)| c.x == gx)
                .map(|(c, _)| c.y)
                .collect();
            assert_eq!(rows.len(), params.depth as usize);

            let top = *rows.iter().min().unwrap();
            assert!(top <= params.min_ground_row);
            assert!(top >= params.min_ground_row - params.amplitude as i32);

            for depth in 0..params.depth as i32 {
                let block = grid.get(GridCoord::new(gx, top + depth)).unwrap();
                assert_eq!(block.material, Material::for_depth(depth));
            }
        }
    }

    #[test]
    fn test_column_range_is_centered() {
        let params = TerrainParams::default();
        let range = params.column_range();
        assert_eq!(range.start, -100);
        assert_eq!(range.end, 100);
    }

    #[test]
    fn test_spawn_row_finds_surface() {
        let params = small_params();
        let grid = TerrainGrid::generate(&NoiseField::generate(42), &params);

        for gx in params.column_range() {
            let row = grid.spawn_row(gx, &params);
            assert!(grid.is_solid(GridCoord::new(gx, row)));
            assert!(!grid.is_solid(GridCoord::new(gx, row - 1)));
        }
    }

    #[test]
    fn test_spawn_row_falls_back_when_column_empty() {
        let params = small_params();
        let grid = TerrainGrid::new();
        assert_eq!(grid.spawn_row(3, &params), params.min_ground_row);
        assert_eq!(
            grid.spawn_y(3, &params),
            params.min_ground_row as f32 * BLOCK_SIZE - SPAWN_CLEARANCE
        );
    }

    #[test]
    fn test_remove_only_shrinks() {
        let mut grid = TerrainGrid::from_cells([
            (GridCoord::new(0, 0), Material::Stone),
            (GridCoord::new(1, 0), Material::Dirt),
        ]);
        assert!(grid.remove(GridCoord::new(0, 0)).is_some());
        assert!(grid.remove(GridCoord::new(0, 0)).is_none());
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_coord_containing_negative_points() {
        assert_eq!(GridCoord::containing(Vec2::new(-0.5, -50.0)), GridCoord::new(-1, -1));
        assert_eq!(GridCoord::containing(Vec2::new(49.9, 50.0)), GridCoord::new(0, 1));
        assert_eq!(GridCoord::new(-1, 2).center(), Vec2::new(-25.0, 125.0));
    }
}
