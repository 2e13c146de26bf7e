//! Fixed timestep simulation tick
//!
//! One call advances the whole pipeline in strict order: input, rocket
//! kinematics, camera, collision, explosion trigger, smoke, explosion
//! aging. The host drives this at 60 Hz and consumes the returned
//! crash flag.

use glam::Vec2;

use crate::consts::{RENDER_HEIGHT, RENDER_WIDTH};

use super::camera::Viewport;
use super::collision;
use super::state::GameState;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    /// Pause toggle (one-shot; the host clears it after the tick)
    pub pause: bool,
    /// Frame driver is behind its fixed-step budget; cosmetic work
    /// (the smoke trail) is dropped for this tick
    pub running_slowly: bool,
}

/// Advance the simulation by one fixed timestep.
///
/// Returns `true` if a terminal collision occurred this tick.
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) -> bool {
    if input.pause {
        state.paused = !state.paused;
        log::debug!("pause {}", if state.paused { "on" } else { "off" });
    }
    if state.paused {
        // The whole update is skipped; the host keeps rendering stale state
        return false;
    }

    state.time_ticks += 1;

    // Kinematics are suspended once the rocket is dead
    if !state.crashed {
        state
            .rocket
            .update(delta_ms, input.turn_left, input.turn_right);
    }

    state.viewport = Viewport::centered_on(
        state.rocket.map_position,
        Vec2::new(RENDER_WIDTH, RENDER_HEIGHT),
    );
    state.tile_offset = state.viewport.tile_offset(state.grid.tile_size());

    let mut collided = false;
    if !state.crashed {
        if let Some(point) = collision::detect(&state.rocket, &state.grid) {
            collided = true;
            state.crashed = true;
            state.rocket.visible = false;
            state.explosion.start(point);
            log::info!(
                "rocket crashed at ({:.1}, {:.1}) after {} ticks",
                point.x,
                point.y,
                state.time_ticks
            );
        }
    }

    // Smoke is cosmetic and may be dropped under load; kinematics and
    // collision above never are
    if !input.running_slowly {
        let snapshot = state.rocket.snapshot();
        state.emitter.update(delta_ms, &snapshot, !state.crashed);
    }

    state.explosion.update(delta_ms);

    collided
}
