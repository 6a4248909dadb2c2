//! Difficulty ramp: elapsed run time to obstacle speed and spawn interval

use crate::tuning::Tuning;

/// Values derived from elapsed time each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Ramp factor in [0, 1]
    pub factor: f32,
    /// Obstacle speed (points/s)
    pub speed: f32,
    /// Minimum time between spawns (ms)
    pub spawn_interval: f64,
}

impl Difficulty {
    /// Linear ramp from base to max over `difficulty_ramp_ms`, saturating after
    pub fn at(elapsed_ms: f64, tuning: &Tuning) -> Self {
        let factor = (elapsed_ms / tuning.difficulty_ramp_ms).clamp(0.0, 1.0);
        let speed = tuning.base_speed + (tuning.max_speed - tuning.base_speed) * factor as f32;
        let spawn_interval = tuning.base_spawn_interval_ms
            - (tuning.base_spawn_interval_ms - tuning.min_spawn_interval_ms) * factor;

        Self {
            factor: factor as f32,
            speed,
            spawn_interval,
        }
    }
}
