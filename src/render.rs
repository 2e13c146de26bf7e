//! Draw-command assembly for the host renderer
//!
//! The simulation never draws; it produces an ordered list of textured
//! quads each tick. Hidden, inactive, or off-screen components simply
//! contribute nothing. The tile layer is the host's job, driven by the
//! viewport and tile offset on [`GameState`].

use glam::Vec2;

use crate::consts::{SHADOW_OFFSET, SMOKE_DRAW_SCALE};
use crate::sim::state::GameState;
use crate::sprites::SpriteFrame;

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// One textured quad to draw this frame
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub frame: SpriteFrame,
    /// Screen position of the sprite center (the rotation origin)
    pub position: Vec2,
    pub angle: f32,
    pub scale: f32,
    /// RGBA multiplier
    pub tint: [f32; 4],
}

/// Produce the ordered draw list for the current tick: shadow, rocket,
/// live on-screen smoke, explosion.
pub fn renderables(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    let rocket_middle = state.rocket.middle();

    if state.rocket.visible {
        // Shadow first so the rocket draws over it
        commands.push(DrawCommand {
            frame: state.rocket.shadow.clone(),
            position: state.rocket.screen_position + SHADOW_OFFSET + rocket_middle,
            angle: state.rocket.angle,
            scale: state.rocket.scale,
            tint: WHITE,
        });
        commands.push(DrawCommand {
            frame: state.rocket.sprite.clone(),
            position: state.rocket.screen_position + rocket_middle,
            angle: state.rocket.angle,
            scale: state.rocket.scale,
            tint: WHITE,
        });
    }

    let smoke_middle = state.emitter.middle();
    for particle in state.emitter.particles() {
        // Off-screen particles keep aging but are not drawn
        if let Some(screen) = state
            .viewport
            .world_to_screen(particle.map_position, rocket_middle)
        {
            commands.push(DrawCommand {
                frame: state.emitter.sprite.clone(),
                position: screen + smoke_middle,
                angle: particle.angle,
                scale: particle.scale() * SMOKE_DRAW_SCALE,
                tint: [1.0, 1.0, 1.0, particle.alpha()],
            });
        }
    }

    if state.explosion.is_active() {
        if let Some(screen) = state
            .viewport
            .world_to_screen(state.explosion.position, rocket_middle)
        {
            let progress = state.explosion.progress();
            commands.push(DrawCommand {
                frame: state.explosion.sprite.clone(),
                position: screen + state.explosion.sprite.middle(),
                angle: 0.0,
                scale: 1.0 + progress,
                tint: [1.0, 1.0, 1.0, 1.0 - progress],
            });
        }
    }

    commands
}
