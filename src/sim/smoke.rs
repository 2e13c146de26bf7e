//! Smoke particle trail
//!
//! Purely cosmetic: the emitter spawns one particle per tick behind the
//! rocket's tail, ages the live set, and retires particles past their
//! lifetime. The whole update is allowed to be dropped when the frame
//! driver reports it is running slowly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SMOKE_PARTICLES, SMOKE_LIFETIME_MS};
use crate::sprites::{AssetError, SpriteFrame, SpriteProvider};

use super::state::RocketSnapshot;

const SMOKE_FRAME: &str = "Smoke";

/// A single transient smoke puff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmokeParticle {
    /// Spawn position, world space; never mutated after creation
    pub map_position: Vec2,
    /// Rotation inherited from the rocket heading at spawn
    pub angle: f32,
    pub age_ms: f32,
    pub retired: bool,
}

impl SmokeParticle {
    pub fn new(map_position: Vec2, angle: f32) -> Self {
        Self {
            map_position,
            angle,
            age_ms: 0.0,
            retired: false,
        }
    }

    pub fn update(&mut self, delta_ms: f32) {
        self.age_ms += delta_ms;
        if self.age_ms >= SMOKE_LIFETIME_MS {
            self.retired = true;
        }
    }

    /// Remaining life fraction, 1 at spawn down to 0 at retirement
    fn life(&self) -> f32 {
        1.0 - (self.age_ms / SMOKE_LIFETIME_MS).min(1.0)
    }

    /// Shrinks monotonically with age, down to 40% at retirement
    pub fn scale(&self) -> f32 {
        0.4 + 0.6 * self.life()
    }

    /// Fades monotonically to zero exactly at the retirement threshold
    pub fn alpha(&self) -> f32 {
        self.life()
    }
}

/// Owns the trail's particle set and the per-tick emission point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeEmitter {
    pub sprite: SpriteFrame,
    /// Current emission point, world space
    pub map_position: Vec2,
    particles: Vec<SmokeParticle>,
}

impl SmokeEmitter {
    pub fn load(provider: &dyn SpriteProvider) -> Result<Self, AssetError> {
        Ok(Self::new(provider.require(SMOKE_FRAME)?))
    }

    pub fn new(sprite: SpriteFrame) -> Self {
        Self {
            sprite,
            map_position: Vec2::ZERO,
            particles: Vec::new(),
        }
    }

    #[inline]
    pub fn middle(&self) -> Vec2 {
        self.sprite.middle()
    }

    /// Where the next particle spawns: behind the rocket's tail, corrected
    /// by the sprite-middle delta between smoke and rocket.
    pub fn emission_point(&self, rocket: &RocketSnapshot) -> Vec2 {
        let middle_delta = self.middle() - rocket.middle;
        let tail_delta = rocket.angle_vector * (rocket.height / 2.0);
        rocket.map_position - middle_delta - tail_delta
    }

    /// Advance the trail one tick: purge retired particles, age the
    /// survivors, then spawn one particle at the emission point while
    /// `spawn` holds (the simulation stops spawning once the rocket dies).
    pub fn update(&mut self, delta_ms: f32, rocket: &RocketSnapshot, spawn: bool) {
        self.map_position = self.emission_point(rocket);

        for particle in &mut self.particles {
            particle.update(delta_ms);
        }
        self.particles.retain(|p| !p.retired);

        if spawn {
            if self.particles.len() >= MAX_SMOKE_PARTICLES {
                // Oldest-first eviction keeps the set bounded
                self.particles.remove(0);
            }
            self.particles
                .push(SmokeParticle::new(self.map_position, rocket.angle));
        }
    }

    pub fn particles(&self) -> &[SmokeParticle] {
        &self.particles
    }
}
