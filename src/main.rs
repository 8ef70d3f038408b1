//! Mole Rush headless demo
//!
//! Drives one match exactly the way an interactive frontend would: a
//! fixed-timestep accumulator with clamped delta and bounded substeps,
//! plus a tiny autoplayer standing in for pointer input.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;

use mole_rush::consts::{MAX_POP_OFFSET, MAX_SUBSTEPS, SIM_DT};
use mole_rush::sim::{Engine, GameConfig, GamePhase, MoleState};
use mole_rush::storage::JsonFileStore;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("seed {seed}");

    let store = JsonFileStore::new(std::env::temp_dir().join("mole_rush_scores.json"));
    let mut engine = Engine::new(GameConfig::default(), store, seed);
    engine.start_match();

    let mut last = Instant::now();
    let mut accumulator = 0.0f32;

    while engine.state().phase != GamePhase::GameOver {
        let now = Instant::now();
        // Clamp delta so a stall can't trigger unbounded catch-up
        let dt = (now - last).as_secs_f32().min(0.1);
        last = now;
        accumulator += dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            engine.tick();
            autoplay(&mut engine);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        thread::sleep(Duration::from_millis(2));
    }

    let state = engine.state();
    log::info!(
        "final: score {}, high score {}, max combo {}, whacks {}",
        state.score,
        state.high_score,
        state.max_combo,
        state.total_whacks
    );
}

/// Whack the first fully-emerged non-penalty character, like a careful player.
fn autoplay(engine: &mut Engine<JsonFileStore>) {
    let target = engine
        .state()
        .moles
        .iter()
        .find(|m| m.state == MoleState::Threatening && m.kind.penalty().is_none())
        .map(|m| {
            let hole = engine.config().holes[m.hole_index];
            hole.mouth() - Vec2::new(0.0, MAX_POP_OFFSET * m.pop_progress)
        });
    if let Some(anchor) = target {
        engine.handle_whack(anchor.x, anchor.y);
    }
}
