//! Static tile grid
//!
//! The world is a fixed rows-by-columns grid of tiles; solid tiles are the
//! only collidable geometry. The grid is immutable once built. A seeded
//! generator produces demo maps so runs are reproducible from a seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{TILE_HEIGHT, TILE_WIDTH};
use crate::sim::rect::Rect;

/// Half-extent of the spawn region kept clear of obstacles, in tiles
const SPAWN_CLEARANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Open,
    Solid,
}

/// An immutable grid of tiles in world space, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tile_size: Vec2,
    cells: Vec<TileKind>,
}

impl TileGrid {
    /// Build a grid from row-major cells. `cells.len()` must equal
    /// `rows * cols`.
    pub fn new(rows: usize, cols: usize, cells: Vec<TileKind>) -> Self {
        assert_eq!(cells.len(), rows * cols, "cell count must match grid dimensions");
        Self {
            rows,
            cols,
            tile_size: Vec2::new(TILE_WIDTH, TILE_HEIGHT),
            cells,
        }
    }

    /// An all-open grid (no collidable geometry)
    pub fn open(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, vec![TileKind::Open; rows * cols])
    }

    /// Generate a bordered demo map: solid ring around the edge, interior
    /// obstacles scattered with `obstacle_chance`, spawn region kept clear.
    /// Same seed, same grid.
    pub fn generate(seed: u64, rows: usize, cols: usize, obstacle_chance: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut cells = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let border = row == 0 || col == 0 || row == rows - 1 || col == cols - 1;
                let near_spawn = row.abs_diff(rows / 2) <= SPAWN_CLEARANCE
                    && col.abs_diff(cols / 2) <= SPAWN_CLEARANCE;

                let kind = if border {
                    TileKind::Solid
                } else if !near_spawn && rng.random_bool(obstacle_chance) {
                    TileKind::Solid
                } else {
                    TileKind::Open
                };
                cells.push(kind);
            }
        }

        let grid = Self::new(rows, cols, cells);
        log::debug!(
            "generated {}x{} map (seed {seed}, {} solid tiles)",
            rows,
            cols,
            grid.solid_rects().count()
        );
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    pub fn kind(&self, row: usize, col: usize) -> TileKind {
        self.cells[row * self.cols + col]
    }

    pub fn is_solid(&self, row: usize, col: usize) -> bool {
        self.kind(row, col) == TileKind::Solid
    }

    /// World rectangle covered by the tile at `(row, col)`
    pub fn world_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            col as f32 * self.tile_size.x,
            row as f32 * self.tile_size.y,
            self.tile_size.x,
            self.tile_size.y,
        )
    }

    /// World rectangles of every solid tile, in row-major grid order.
    /// The collision detector relies on this order for its tie-break.
    pub fn solid_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| {
                self.is_solid(row, col).then(|| self.world_rect(row, col))
            })
        })
    }

    /// World position of the center cell, where the rocket spawns
    pub fn spawn_position(&self) -> Vec2 {
        Vec2::new(
            (self.cols / 2) as f32 * self.tile_size.x,
            (self.rows / 2) as f32 * self.tile_size.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = TileGrid::generate(7, 32, 32, 0.1);
        let b = TileGrid::generate(7, 32, 32, 0.1);
        for row in 0..32 {
            for col in 0..32 {
                assert_eq!(a.kind(row, col), b.kind(row, col));
            }
        }
    }

    #[test]
    fn test_generate_border_is_solid() {
        let grid = TileGrid::generate(1, 16, 16, 0.0);
        for i in 0..16 {
            assert!(grid.is_solid(0, i));
            assert!(grid.is_solid(15, i));
            assert!(grid.is_solid(i, 0));
            assert!(grid.is_solid(i, 15));
        }
    }

    #[test]
    fn test_generate_spawn_region_clear() {
        // Even at maximum obstacle density the spawn region stays open
        let grid = TileGrid::generate(3, 32, 32, 1.0);
        let (cr, cc) = (16, 16);
        for row in cr - SPAWN_CLEARANCE..=cr + SPAWN_CLEARANCE {
            for col in cc - SPAWN_CLEARANCE..=cc + SPAWN_CLEARANCE {
                assert!(!grid.is_solid(row, col), "spawn cell ({row},{col}) is solid");
            }
        }
    }

    #[test]
    fn test_world_rect_layout() {
        let grid = TileGrid::open(4, 4);
        assert_eq!(grid.world_rect(0, 0), Rect::new(0.0, 0.0, 32.0, 32.0));
        assert_eq!(grid.world_rect(2, 1), Rect::new(32.0, 64.0, 32.0, 32.0));
    }

    #[test]
    fn test_solid_rects_row_major_order() {
        let mut cells = vec![TileKind::Open; 9];
        cells[1] = TileKind::Solid; // (0, 1)
        cells[3] = TileKind::Solid; // (1, 0)
        let grid = TileGrid::new(3, 3, cells);

        let rects: Vec<Rect> = grid.solid_rects().collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], grid.world_rect(0, 1));
        assert_eq!(rects[1], grid.world_rect(1, 0));
    }

    #[test]
    fn test_spawn_position_center_cell() {
        let grid = TileGrid::open(10, 20);
        assert_eq!(grid.spawn_position(), Vec2::new(10.0 * 32.0, 5.0 * 32.0));
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_wrong_cell_count() {
        TileGrid::new(2, 2, vec![TileKind::Open; 3]);
    }
}
