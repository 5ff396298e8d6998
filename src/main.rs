//! Gap Runner entry point
//!
//! Headless demo: the autopilot plays a few runs through the same fixed-step
//! frame loop a windowed host would use, and the results are logged.
//!
//! Usage: `gap-runner [config.json]` (set `RUST_LOG=debug` to watch every point)

use std::process::ExitCode;

use gap_runner::GameConfig;
use gap_runner::platform::FrameInput;
use gap_runner::sim::{Autopilot, GamePhase, GameState, tick};
use rand::Rng;

/// Runs to play before exiting
const DEMO_RUNS: u64 = 3;
/// Hard stop so a perfect autopilot still exits (10 minutes at 60 Hz)
const MAX_DEMO_TICKS: u64 = 60 * 60 * 10;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Gap Runner (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let seed: u64 = rand::rng().random();
    let mut state = match GameState::new(config.clone(), seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    let mut frames = FrameInput::new(&config);
    let pilot = Autopilot::default();
    let frame_dt = config.tick_duration();

    let mut snapshot = state.snapshot();
    let mut ticks = 0u64;
    while ticks < MAX_DEMO_TICKS {
        if state.runs() >= DEMO_RUNS && snapshot.phase == GamePhase::Ended {
            break;
        }

        // Tap: press and release within the frame so consecutive taps both fire
        if pilot.decide(&snapshot) {
            frames.trigger.press();
        }
        let input = frames.frame(frame_dt);
        frames.trigger.release();

        ticks += u64::from(input.elapsed_ticks);
        snapshot = tick(&mut state, &input);
    }

    log::info!("Stopped after {} ticks", ticks);
    println!("{}", snapshot.status_line());
    println!(
        "Best score over {} run(s): {}",
        state.runs(),
        state.best_score()
    );
    ExitCode::SUCCESS
}
