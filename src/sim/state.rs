//! Rocket, explosion, and the assembled game state
//!
//! All per-run simulation state lives here. The rocket owns its kinematics
//! and oriented hull; the explosion is a one-shot state machine; `GameState`
//! wires them to the grid, emitter, and viewport for the tick pipeline.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::map::TileGrid;
use crate::sprites::{AssetError, SpriteFrame, SpriteProvider};
use crate::{heading_vector, rotate_point};

use super::camera::Viewport;
use super::rect::Rect;
use super::smoke::SmokeEmitter;

const ROCKET_FRAME: &str = "Rocket";
const SHADOW_FRAME: &str = "Rocket-Shadow";
const EXPLOSION_FRAME: &str = "Explosion";

/// Hull sample offsets in unscaled sprite-local space, traced clockwise
/// from the nose. Declaration order is the fine-phase tie-break order.
const HULL_OFFSETS: [Vec2; 8] = [
    Vec2::new(11.0, 0.0),
    Vec2::new(16.0, 22.0),
    Vec2::new(23.0, 64.0),
    Vec2::new(23.0, 120.0),
    Vec2::new(6.0, 123.0),
    Vec2::new(0.0, 116.0),
    Vec2::new(0.0, 64.0),
    Vec2::new(6.0, 21.0),
];

/// The player's rocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    pub sprite: SpriteFrame,
    pub shadow: SpriteFrame,
    /// Position on the map, world space
    pub map_position: Vec2,
    /// Fixed anchor on the render target; the world scrolls under it
    pub screen_position: Vec2,
    /// Milliseconds of throttle per unit of velocity
    pub acceleration: f32,
    pub max_velocity: f32,
    pub velocity: f32,
    /// Turn rate applied per 10 ms of held input
    pub handling: f32,
    /// Heading in radians; 0 points up, positive turns clockwise
    pub angle: f32,
    pub scale: f32,
    /// Unit heading vector, derived from `angle` each update
    pub angle_vector: Vec2,
    /// Cleared when the rocket crashes
    pub visible: bool,
    relative_collision_points: Vec<Vec2>,
    /// World-space hull samples, recomputed every update
    pub collision_points: Vec<Vec2>,
}

impl Rocket {
    /// Resolve the rocket's frames; a missing frame aborts startup.
    pub fn load(provider: &dyn SpriteProvider) -> Result<Self, AssetError> {
        let sprite = provider.require(ROCKET_FRAME)?;
        let shadow = provider.require(SHADOW_FRAME)?;
        log::debug!("rocket sprite {}x{}", sprite.size.x, sprite.size.y);
        Ok(Self::new(sprite, shadow))
    }

    pub fn new(sprite: SpriteFrame, shadow: SpriteFrame) -> Self {
        Self {
            sprite,
            shadow,
            map_position: Vec2::ZERO,
            screen_position: Vec2::ZERO,
            acceleration: ROCKET_ACCELERATION,
            max_velocity: ROCKET_MAX_VELOCITY,
            velocity: 0.0,
            handling: ROCKET_HANDLING,
            angle: 0.0,
            scale: ROCKET_SCALE,
            angle_vector: Vec2::ZERO,
            visible: true,
            relative_collision_points: HULL_OFFSETS.to_vec(),
            collision_points: Vec::new(),
        }
    }

    /// Advance kinematics one tick.
    ///
    /// Heading turns while an input is held (no auto-centering), velocity
    /// climbs to its cap and never decays, and the hull samples are
    /// recomputed after the position settles.
    pub fn update(&mut self, delta_ms: f32, turn_left: bool, turn_right: bool) {
        if turn_left {
            self.angle -= delta_ms / 10.0 * self.handling;
        }
        if turn_right {
            self.angle += delta_ms / 10.0 * self.handling;
        }

        if self.velocity < self.max_velocity {
            self.velocity = (self.velocity + delta_ms / self.acceleration).min(self.max_velocity);
        }

        self.angle_vector = heading_vector(self.angle);
        self.map_position += self.angle_vector * self.velocity;

        self.recompute_collision_points();
    }

    /// Rotate each hull offset about the sprite middle, scale, then anchor
    /// at the map position with a centering correction for the scale.
    fn recompute_collision_points(&mut self) {
        let middle = self.middle();
        let center_adjustment = (self.sprite.size - self.sprite.size * self.scale) / 2.0;
        let angle = self.angle;
        let scale = self.scale;
        let anchor = self.map_position + center_adjustment;

        self.collision_points.clear();
        self.collision_points.extend(
            self.relative_collision_points
                .iter()
                .map(|&offset| rotate_point(offset, angle, middle) * scale + anchor),
        );
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.sprite.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.sprite.size.y
    }

    #[inline]
    pub fn middle(&self) -> Vec2 {
        self.sprite.middle()
    }

    /// Generous axis-aligned bounds for the broad collision phase.
    ///
    /// A square sized to the scaled sprite height, so it covers the
    /// rotated hull at any heading. Over-approximation is fine here; the
    /// fine phase is exact.
    pub fn coarse_bounds(&self) -> Rect {
        let height = self.height() * self.scale;
        let location = Vec2::new(
            self.map_position.x - height / 2.0 + self.width() / 2.0,
            self.map_position.y - height / 2.0 + self.height() / 2.0,
        );
        Rect::from_corner_size(location, Vec2::splat(height))
    }

    /// Immutable copy of the state the emitter and camera need this tick
    pub fn snapshot(&self) -> RocketSnapshot {
        RocketSnapshot {
            map_position: self.map_position,
            angle: self.angle,
            angle_vector: self.angle_vector,
            height: self.height(),
            middle: self.middle(),
        }
    }
}

/// Per-tick copy of rocket state handed to collaborating components,
/// instead of a live back-reference.
#[derive(Debug, Clone, Copy)]
pub struct RocketSnapshot {
    pub map_position: Vec2,
    pub angle: f32,
    pub angle_vector: Vec2,
    /// Unscaled sprite height
    pub height: f32,
    pub middle: Vec2,
}

/// Explosion lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionState {
    Idle,
    Active,
    Finished,
}

/// One-shot explosion effect, triggered by a confirmed collision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub sprite: SpriteFrame,
    pub state: ExplosionState,
    /// World position of the collision point that triggered it
    pub position: Vec2,
    pub age_ms: f32,
    pub duration_ms: f32,
}

impl Explosion {
    pub fn load(provider: &dyn SpriteProvider) -> Result<Self, AssetError> {
        Ok(Self::new(provider.require(EXPLOSION_FRAME)?))
    }

    pub fn new(sprite: SpriteFrame) -> Self {
        Self {
            sprite,
            state: ExplosionState::Idle,
            position: Vec2::ZERO,
            age_ms: 0.0,
            duration_ms: EXPLOSION_DURATION_MS,
        }
    }

    /// Begin the animation at `position`. Valid from `Idle` or `Finished`;
    /// re-triggering while `Active` is ignored.
    pub fn start(&mut self, position: Vec2) {
        match self.state {
            ExplosionState::Idle | ExplosionState::Finished => {
                self.position = position;
                self.age_ms = 0.0;
                self.state = ExplosionState::Active;
                log::info!("explosion at ({:.1}, {:.1})", position.x, position.y);
            }
            ExplosionState::Active => {}
        }
    }

    pub fn update(&mut self, delta_ms: f32) {
        if self.state == ExplosionState::Active {
            self.age_ms += delta_ms;
            if self.age_ms >= self.duration_ms {
                self.state = ExplosionState::Finished;
            }
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == ExplosionState::Active
    }

    /// Animation progress in [0, 1] while active
    pub fn progress(&self) -> f32 {
        (self.age_ms / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub rocket: Rocket,
    pub emitter: SmokeEmitter,
    pub explosion: Explosion,
    pub grid: TileGrid,
    pub viewport: Viewport,
    /// Sub-tile scroll offset for the external tile renderer
    pub tile_offset: Vec2,
    /// Pause skips the whole update pipeline for the tick
    pub paused: bool,
    /// Set once a fine-phase collision confirms; never cleared
    pub crashed: bool,
    pub time_ticks: u64,
}

impl GameState {
    /// Assemble a run: resolve every sprite (fatal on a miss), spawn the
    /// rocket at the grid's center cell, and anchor it at render-center.
    pub fn new(provider: &dyn SpriteProvider, grid: TileGrid) -> Result<Self, AssetError> {
        let mut rocket = Rocket::load(provider)?;
        let emitter = SmokeEmitter::load(provider)?;
        let explosion = Explosion::load(provider)?;

        rocket.map_position = grid.spawn_position();
        rocket.screen_position = Vec2::new(
            RENDER_WIDTH / 2.0 - rocket.width() / 2.0,
            RENDER_HEIGHT / 2.0 - rocket.height() / 2.0,
        );

        let viewport =
            Viewport::centered_on(rocket.map_position, Vec2::new(RENDER_WIDTH, RENDER_HEIGHT));
        let tile_offset = viewport.tile_offset(grid.tile_size());

        log::info!(
            "simulation ready: {}x{} grid, rocket at ({:.0}, {:.0})",
            grid.rows(),
            grid.cols(),
            rocket.map_position.x,
            rocket.map_position.y,
        );

        Ok(Self {
            rocket,
            emitter,
            explosion,
            grid,
            viewport,
            tile_offset,
            paused: false,
            crashed: false,
            time_ticks: 0,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn frame(name: &str, w: f32, h: f32) -> SpriteFrame {
        SpriteFrame::new(name, Rect::new(0.0, 0.0, w, h), Vec2::new(w, h))
    }

    pub fn rocket() -> Rocket {
        Rocket::new(frame("Rocket", 24.0, 124.0), frame("Rocket-Shadow", 24.0, 124.0))
    }
}
