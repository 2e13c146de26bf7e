//! Camera / viewport mapping between world and screen space
//!
//! The viewport is a rocket-centered window over the map, recomputed every
//! tick. World points map to screen points only while inside it; everything
//! else is culled with an absent result, never an error.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// A world-space window that maps into the render target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    rect: Rect,
}

impl Viewport {
    /// Viewport of `size` centered on `focus`
    pub fn centered_on(focus: Vec2, size: Vec2) -> Self {
        Self {
            rect: Rect::from_corner_size(focus - size / 2.0, size),
        }
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.rect.top_left()
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Map a world point to screen space.
    ///
    /// Points outside the viewport rectangle yield `None` and are skipped
    /// at draw time. The `middle_offset` re-anchors the result so sprites
    /// drawn relative to the rocket's middle land where they should.
    pub fn world_to_screen(&self, world: Vec2, middle_offset: Vec2) -> Option<Vec2> {
        if self.rect.contains_point(world) {
            Some(world - self.top_left() - middle_offset)
        } else {
            None
        }
    }

    /// Sub-tile scroll offset for the external tile renderer
    pub fn tile_offset(&self, tile_size: Vec2) -> Vec2 {
        let tl = self.top_left();
        Vec2::new(tl.x % tile_size.x, tl.y % tile_size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::centered_on(Vec2::new(1000.0, 500.0), Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn test_centered_on_focus() {
        let vp = viewport();
        assert_eq!(vp.top_left(), Vec2::new(360.0, 140.0));
        assert_eq!(vp.rect().size(), Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn test_world_to_screen_inside() {
        let vp = viewport();
        let middle = Vec2::new(12.0, 62.0);
        let world = Vec2::new(1000.0, 500.0);
        let screen = vp.world_to_screen(world, middle).unwrap();
        assert_eq!(screen, world - vp.top_left() - middle);
    }

    #[test]
    fn test_world_to_screen_outside_is_none() {
        let vp = viewport();
        assert!(vp.world_to_screen(Vec2::new(0.0, 0.0), Vec2::ZERO).is_none());
        // Just past the right edge
        assert!(vp
            .world_to_screen(Vec2::new(360.0 + 1280.0, 500.0), Vec2::ZERO)
            .is_none());
        // On the top-left corner is inside (half-open rect)
        assert!(vp.world_to_screen(Vec2::new(360.0, 140.0), Vec2::ZERO).is_some());
    }

    #[test]
    fn test_tile_offset() {
        let vp = Viewport::centered_on(Vec2::new(650.0, 370.0), Vec2::new(1280.0, 720.0));
        // top-left = (10, 10); offset is the remainder against the tile size
        let offset = vp.tile_offset(Vec2::new(32.0, 32.0));
        assert!((offset - Vec2::new(10.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn test_tile_offset_negative_top_left() {
        let vp = Viewport::centered_on(Vec2::ZERO, Vec2::new(1280.0, 720.0));
        let offset = vp.tile_offset(Vec2::new(32.0, 32.0));
        // `%` keeps the dividend's sign; the tile renderer expects that
        assert!((offset.x - (-640.0_f32 % 32.0)).abs() < 1e-5);
        assert!((offset.y - (-360.0_f32 % 32.0)).abs() < 1e-5);
    }
}
