//! Rail Surfer headless runner
//!
//! Plays one run with the autopilot at a fixed frame rate and logs the
//! result. Useful for balance checks: `rail-surfer [seed] [seconds]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rail_surfer::sim::{Autopilot, GameEvent, GamePhase, GameState, tick};

    const FRAME_DT: f32 = 1.0 / 60.0;

    rail_surfer::platform::init_logging();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let limit_secs = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(120.0);

    log::info!("Rail Surfer (headless) starting, seed {}", seed);

    let mut state = GameState::new(seed);
    let pilot = Autopilot::default();
    state.start();

    let max_frames = (limit_secs / FRAME_DT) as u64;
    let mut spawned = 0u32;
    for _ in 0..max_frames {
        pilot.drive(&mut state);
        if tick(&mut state, FRAME_DT).is_none() {
            break;
        }
        spawned += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { .. }))
            .count() as u32;
        if state.phase() == GamePhase::GameOver {
            break;
        }
    }

    let difficulty = state.difficulty();
    log::info!(
        "Finished: {:?}, score {}, {} obstacles spawned, final speed {:.0}",
        state.phase(),
        state.score(),
        spawned,
        difficulty.speed
    );
    if let Some(hit) = state.collision() {
        log::info!("Hit {:?} obstacle in lane {}", hit.kind, hit.lane.index());
    }
    println!("{}", state.score());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM hosts use platform::web::WebRun, this is just to satisfy the compiler
}
