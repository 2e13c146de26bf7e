//! Smoke Run - a scrolling tile-map rocket arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, smoke, explosion)
//! - `sprites`: Named sprite frames and the typed sprite-sheet manifest
//! - `map`: Immutable tile grid the rocket collides with
//! - `render`: Draw-command assembly for the host renderer
//!
//! The crate never touches a GPU or a window: the host resolves sprite
//! frames through [`sprites::SpriteProvider`], drives [`sim::tick`] at a
//! fixed 60 Hz, and consumes [`render::renderables`] each frame.

pub mod map;
pub mod render;
pub mod sim;
pub mod sprites;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;

    /// Back-buffer the viewport maps world space into
    pub const RENDER_WIDTH: f32 = 1280.0;
    pub const RENDER_HEIGHT: f32 = 720.0;

    /// Tile dimensions in world pixels
    pub const TILE_WIDTH: f32 = 32.0;
    pub const TILE_HEIGHT: f32 = 32.0;

    /// Rocket tuning - velocity gains `dt / acceleration` per tick
    pub const ROCKET_ACCELERATION: f32 = 10.0;
    pub const ROCKET_MAX_VELOCITY: f32 = 10.0;
    /// Turn rate: one degree per 10 ms of held input
    pub const ROCKET_HANDLING: f32 = std::f32::consts::PI / 180.0;
    pub const ROCKET_SCALE: f32 = 0.7;

    /// Drop shadow offset under the rocket, in screen pixels
    pub const SHADOW_OFFSET: Vec2 = Vec2::new(25.0, 50.0);

    /// Smoke particle lifetime before retirement
    pub const SMOKE_LIFETIME_MS: f32 = 2000.0;
    /// Active-set cap; oldest particles are evicted first
    pub const MAX_SMOKE_PARTICLES: usize = 256;
    /// Extra shrink applied to smoke at draw time
    pub const SMOKE_DRAW_SCALE: f32 = 0.8;

    /// Explosion animation duration
    pub const EXPLOSION_DURATION_MS: f32 = 900.0;
}

/// Unit vector for a heading angle.
///
/// Heading 0 points up in screen convention; positive angles rotate
/// clockwise. Hence `(sin θ, -cos θ)`.
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Rotate `point` around `center` by `angle` radians.
#[inline]
pub fn rotate_point(point: Vec2, angle: f32, center: Vec2) -> Vec2 {
    let (sin_t, cos_t) = angle.sin_cos();
    Vec2::new(
        cos_t * (point.x - center.x) - sin_t * (point.y - center.y) + center.x,
        sin_t * (point.x - center.x) + cos_t * (point.y - center.y) + center.y,
    )
}
