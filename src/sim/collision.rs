//! Two-phase collision detection between the rocket hull and the tile grid
//!
//! The broad phase culls tiles with a cheap rectangle test against the
//! rocket's generous bounds; the fine phase tests each hull sample point,
//! as a degenerate 1x1 region, against the surviving tiles. The first hit
//! in grid order then declaration order wins, which keeps the result
//! reproducible across runs.

use glam::Vec2;

use crate::map::TileGrid;

use super::rect::Rect;
use super::state::Rocket;

/// Find the first confirmed collision point, if any.
///
/// Read-only over both arguments. An empty grid or an empty hull means no
/// collision is possible, not an error. Broad-phase false positives are
/// expected; the fine phase never false-positives.
pub fn detect(rocket: &Rocket, grid: &TileGrid) -> Option<Vec2> {
    let coarse = rocket.coarse_bounds();

    let candidates: Vec<Rect> = grid
        .solid_rects()
        .filter(|tile| tile.intersects(&coarse))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    for tile in &candidates {
        for &point in &rocket.collision_points {
            let sample = Rect::new(point.x, point.y, 1.0, 1.0);
            if sample.intersects(tile) {
                return Some(point);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{TileGrid, TileKind};
    use crate::sim::state::test_support::rocket;

    /// Grid with a single solid tile at (row, col)
    fn one_tile_grid(row: usize, col: usize) -> TileGrid {
        let mut cells = vec![TileKind::Open; 20 * 20];
        cells[row * 20 + col] = TileKind::Solid;
        TileGrid::new(20, 20, cells)
    }

    #[test]
    fn test_no_overlap_returns_none() {
        let mut r = rocket();
        r.map_position = Vec2::new(500.0, 500.0);
        r.update(crate::consts::SIM_DT_MS, false, false);

        // Solid tile at the grid origin, far from the rocket
        let grid = one_tile_grid(0, 0);
        assert_eq!(detect(&r, &grid), None);
    }

    /// Map position whose coarse bounds cover tile (3, 3) at (96,96,32,32).
    /// The bounds carry the sprite-middle offset, hence the skewed y.
    fn near_tile_3_3() -> Vec2 {
        Vec2::new(110.0, 60.0)
    }

    #[test]
    fn test_single_sample_point_hit() {
        // Tile (96,96,32,32); exactly one hull sample at (110,110)
        let mut r = rocket();
        r.collision_points = vec![Vec2::new(110.0, 110.0)];
        r.map_position = near_tile_3_3();

        let grid = one_tile_grid(3, 3);
        assert_eq!(detect(&r, &grid), Some(Vec2::new(110.0, 110.0)));
    }

    #[test]
    fn test_broad_hit_without_fine_hit_is_none() {
        // Coarse bounds overlap the tile but no sample point lands in it
        let mut r = rocket();
        r.map_position = near_tile_3_3();
        r.collision_points = vec![Vec2::new(500.0, 500.0)];

        let grid = one_tile_grid(3, 3);
        assert!(grid
            .solid_rects()
            .any(|tile| tile.intersects(&r.coarse_bounds())));
        assert_eq!(detect(&r, &grid), None);
    }

    #[test]
    fn test_first_declared_point_wins() {
        let mut r = rocket();
        r.map_position = near_tile_3_3();
        // Both samples are inside the tile; declaration order breaks the tie
        r.collision_points = vec![Vec2::new(120.0, 120.0), Vec2::new(110.0, 110.0)];

        let grid = one_tile_grid(3, 3);
        assert_eq!(detect(&r, &grid), Some(Vec2::new(120.0, 120.0)));
    }

    #[test]
    fn test_first_tile_in_grid_order_wins() {
        // Two vertically adjacent solid tiles; one sample in each. The
        // earlier tile in row-major order decides which point is reported.
        let mut cells = vec![TileKind::Open; 20 * 20];
        cells[3 * 20 + 3] = TileKind::Solid; // (96,96)..(128,128)
        cells[4 * 20 + 3] = TileKind::Solid; // (96,128)..(128,160)
        let grid = TileGrid::new(20, 20, cells);

        let mut r = rocket();
        r.map_position = near_tile_3_3();
        r.collision_points = vec![Vec2::new(110.0, 140.0), Vec2::new(110.0, 110.0)];

        // Both tiles survive the broad phase
        let coarse = r.coarse_bounds();
        assert_eq!(grid.solid_rects().filter(|t| t.intersects(&coarse)).count(), 2);

        // The lower tile's point is declared first, but tile (3,3) comes
        // first in grid order and contains the second sample.
        assert_eq!(detect(&r, &grid), Some(Vec2::new(110.0, 110.0)));
    }

    #[test]
    fn test_empty_grid_is_no_collision() {
        let mut r = rocket();
        r.map_position = Vec2::new(110.0, 110.0);
        r.update(crate::consts::SIM_DT_MS, false, false);
        let grid = TileGrid::open(20, 20);
        assert_eq!(detect(&r, &grid), None);
    }

    #[test]
    fn test_empty_hull_is_no_collision() {
        let mut r = rocket();
        r.map_position = Vec2::new(110.0, 110.0);
        r.collision_points = Vec::new();
        let grid = one_tile_grid(3, 3);
        assert_eq!(detect(&r, &grid), None);
    }
}
