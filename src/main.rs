//! Smoke Run headless demo
//!
//! Runs the simulation without a renderer: loads an embedded sprite-sheet
//! manifest, generates a seeded demo map, and drives the fixed-step tick
//! loop with scripted input until the rocket crashes or time runs out.

use smoke_run::consts::SIM_DT_MS;
use smoke_run::map::TileGrid;
use smoke_run::render::renderables;
use smoke_run::sim::{GameState, TickInput, tick};
use smoke_run::sprites::SpriteSheet;

/// Sheet metadata as the texture packer emits it
const SHEET_MANIFEST: &str = r#"{
    "frames": [
        {
            "filename": "Rocket.png",
            "frame": { "x": 0, "y": 0, "w": 24, "h": 124 },
            "sourceSize": { "w": 24, "h": 124 }
        },
        {
            "filename": "Rocket-Shadow.png",
            "frame": { "x": 24, "y": 0, "w": 24, "h": 124 },
            "sourceSize": { "w": 24, "h": 124 }
        },
        {
            "filename": "Smoke.png",
            "frame": { "x": 48, "y": 0, "w": 32, "h": 32 },
            "sourceSize": { "w": 32, "h": 32 }
        },
        {
            "filename": "Explosion.png",
            "frame": { "x": 48, "y": 32, "w": 64, "h": 64 },
            "sourceSize": { "w": 64, "h": 64 }
        }
    ]
}"#;

const DEMO_SEED: u64 = 42;
const MAX_TICKS: u64 = 3600; // one minute at 60 Hz

fn main() {
    env_logger::init();
    log::info!("Smoke Run (headless) starting...");

    let sheet = match SpriteSheet::from_manifest(SHEET_MANIFEST) {
        Ok(sheet) => sheet,
        Err(err) => {
            log::error!("sprite sheet load failed: {err}");
            std::process::exit(1);
        }
    };

    let grid = TileGrid::generate(DEMO_SEED, 64, 64, 0.04);
    let mut state = match GameState::new(&sheet, grid) {
        Ok(state) => state,
        Err(err) => {
            log::error!("simulation setup failed: {err}");
            std::process::exit(1);
        }
    };

    let mut input = TickInput::default();
    for tick_index in 0..MAX_TICKS {
        // Weave: hold right for a second out of every four
        input.turn_right = tick_index % 240 < 60;

        if tick(&mut state, &input, SIM_DT_MS) {
            log::info!("terminal collision on tick {tick_index}");
            break;
        }
    }

    let commands = renderables(&state);
    log::info!(
        "done after {} ticks: {} draw commands, {} live particles, crashed={}",
        state.time_ticks,
        commands.len(),
        state.emitter.particles().len(),
        state.crashed,
    );
}
