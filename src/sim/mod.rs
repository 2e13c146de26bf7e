//! Deterministic simulation module
//!
//! All gameplay logic lives here. The module is pure and deterministic:
//! - Fixed timestep only, driven by the host
//! - Strict per-tick ordering: input, kinematics, camera, collision,
//!   explosion trigger, smoke, explosion aging
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod rect;
pub mod smoke;
pub mod state;
pub mod tick;

pub use camera::Viewport;
pub use collision::detect;
pub use rect::Rect;
pub use smoke::{SmokeEmitter, SmokeParticle};
pub use state::{Explosion, ExplosionState, GameState, Rocket, RocketSnapshot};
pub use tick::{TickInput, tick};
