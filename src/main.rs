//! Fruit Fall headless driver
//!
//! Runs the simulation under autoplay with the same accumulator loop a
//! rendering shell would use. Handy for soak-testing pacing and outcome
//! resolution without a window.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use fruit_fall::consts::{MAX_SUBSTEPS, SIM_DT};
use fruit_fall::sim::{Phase, Session, TickInput, tick};
use fruit_fall::{GameConfig, LogAudio, MemoryStore, Viewport};

/// Simulated wall-clock cap for one run
const MAX_FRAMES: u32 = 60 * 600;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5EED_F00D);
    let config = GameConfig::load(Path::new("fruit-fall.json"));

    let store = Rc::new(RefCell::new(MemoryStore::new(config.initial_lives)));
    let mut session = match Session::create(
        config,
        Viewport::new(1280.0, 800.0),
        Box::new(store.clone()),
        Box::new(LogAudio),
        seed,
    ) {
        Ok(session) => session,
        Err(err) => {
            log::error!("startup failed: {err}");
            std::process::exit(1);
        }
    };

    let input = TickInput {
        auto_play: true,
        ..Default::default()
    };
    let frame_dt = 1.0 / 60.0;
    let mut accumulator = 0.0f32;

    for frame in 0..MAX_FRAMES {
        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut session, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        if frame % (60 * 10) == 0 {
            log::info!(
                "t={}s score={} lives={} in-flight={}",
                frame / 60,
                session.bridge.score(),
                session.bridge.lives(),
                session.items.len()
            );
        }
        if session.phase == Phase::GameOver {
            break;
        }
    }

    if let Some(message) = session.game_over_message() {
        println!("{message}");
    }
    let summary = serde_json::json!({
        "seed": session.seed,
        "ticks": session.ticks,
        "score": session.bridge.score(),
        "lives": session.bridge.lives(),
    });
    println!("{summary}");

    session.teardown();
}
