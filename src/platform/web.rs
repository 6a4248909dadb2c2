//! wasm-bindgen handle for a JavaScript presentation shell
//!
//! The shell owns the frame loop, gestures, audio, and drawing. It forwards
//! frame time and swipes here and reads state back each frame.

use wasm_bindgen::prelude::*;

use crate::sim::{Autopilot, GamePhase, GameState, SeededRng, SwipeOutcome, swipe, tick};
use crate::tuning::Tuning;
use crate::view::{FrameView, pack_obstacles_flat};

#[wasm_bindgen]
pub struct WebRun {
    state: GameState,
    autopilot: Option<Autopilot>,
}

#[wasm_bindgen]
impl WebRun {
    /// Idle run with default tuning
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebRun {
        crate::platform::init_logging();
        log::info!("Run created with seed: {}", seed as u64);
        WebRun {
            state: GameState::new(seed as u64),
            autopilot: None,
        }
    }

    /// Idle run with tuning loaded from JSON
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: f64, tuning_json: &str) -> Result<WebRun, JsValue> {
        crate::platform::init_logging();
        let tuning = Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebRun {
            state: GameState::with_tuning(seed as u64, tuning),
            autopilot: None,
        })
    }

    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    /// Restart with a fresh seed so runs don't repeat
    pub fn restart(&mut self) -> bool {
        if self.state.phase() == GamePhase::Idle {
            return false;
        }
        let seed = js_sys::Date::now() as u64;
        self.state.set_rng(SeededRng::new(seed));
        log::info!("Restarting with seed: {}", seed);
        self.state.restart()
    }

    /// Advance one frame; `dt` in seconds. Returns false if nothing ran.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let Some(pilot) = self.autopilot {
            pilot.drive(&mut self.state);
        }
        tick(&mut self.state, dt).is_some()
    }

    /// Forward a finished pan gesture. Returns true if it changed anything.
    pub fn swipe(&mut self, dx: f32, dy: f32) -> bool {
        !matches!(swipe(&mut self.state, dx, dy), SwipeOutcome::Ignored)
    }

    /// Let the autopilot play (attract screen)
    #[wasm_bindgen(js_name = setDemo)]
    pub fn set_demo(&mut self, enabled: bool) {
        self.autopilot = enabled.then(Autopilot::default);
    }

    pub fn score(&self) -> f64 {
        self.state.score() as f64
    }

    /// "idle", "playing" or "gameover"
    pub fn phase(&self) -> String {
        match self.state.phase() {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
        }
        .to_string()
    }

    /// Full frame view as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        FrameView::capture(&self.state).to_json()
    }

    /// Pool as `[y, lane, active, kind]` per slot
    #[wasm_bindgen(js_name = obstacleBuffer)]
    pub fn obstacle_buffer(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(pack_obstacles_flat(&self.state).as_slice())
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        serde_json::to_string(&self.state.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }
}
