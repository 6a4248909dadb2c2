//! Rail Surfer - simulation core for a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacles, player, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `view`: Read-only snapshots for the presentation shell
//! - `platform`: Logging setup and the web host binding

pub mod platform;
pub mod sim;
pub mod tuning;
pub mod view;

pub use sim::{GameEvent, GamePhase, GameState, Status, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Number of lanes
    pub const LANE_COUNT: u8 = 3;
    /// Lane the player starts (and restarts) in
    pub const START_LANE: u8 = 1;

    /// Reference screen size (points). Hosts override through `Tuning`.
    pub const SCREEN_WIDTH: f32 = 390.0;
    pub const SCREEN_HEIGHT: f32 = 844.0;

    /// Player square size
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Distance of the player's bottom edge from the screen bottom, as a fraction of height
    pub const PLAYER_BOTTOM_FRACTION: f32 = 0.2;
    /// Hitbox shrink on top and bottom edges, so grazes don't end the run
    pub const HITBOX_PADDING: f32 = 5.0;

    /// Obstacle square size (before per-kind height scaling)
    pub const OBSTACLE_SIZE: f32 = 50.0;
    /// Fixed number of obstacle slots
    pub const OBSTACLE_POOL_SIZE: usize = 6;

    /// Obstacle speed ramp (points/s)
    pub const BASE_SPEED: f32 = 300.0;
    pub const MAX_SPEED: f32 = 700.0;
    /// Spawn interval ramp (ms)
    pub const BASE_SPAWN_INTERVAL: f64 = 1500.0;
    pub const MIN_SPAWN_INTERVAL: f64 = 600.0;
    /// Time to reach full difficulty (ms)
    pub const DIFFICULTY_RAMP_MS: f64 = 60_000.0;

    /// Jump arc (ms, points)
    pub const JUMP_DURATION_MS: f64 = 500.0;
    pub const JUMP_HEIGHT: f32 = 100.0;
    /// Slide squash (ms, vertical scale)
    pub const SLIDE_DURATION_MS: f64 = 600.0;
    pub const SLIDE_SCALE: f32 = 0.5;

    /// Swipe thresholds (points of translation)
    pub const LANE_SWIPE_THRESHOLD: f32 = 50.0;
    pub const VERTICAL_SWIPE_THRESHOLD: f32 = 40.0;

    /// Score is one point per this many ms survived
    pub const MS_PER_POINT: f64 = 100.0;

    /// Dashed rail pattern: one dash plus one gap
    pub const RAIL_DASH_HEIGHT: f32 = 40.0;
    pub const RAIL_DASH_GAP: f32 = 30.0;
    pub const RAIL_SEGMENT_HEIGHT: f32 = RAIL_DASH_HEIGHT + RAIL_DASH_GAP;
}
