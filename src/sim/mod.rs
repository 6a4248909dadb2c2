//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick(dt)`
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod lane;
pub mod obstacle;
pub mod player;
pub mod rng;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Collision, Hitbox, detect_collision, is_immune};
pub use difficulty::Difficulty;
pub use lane::{Lane, lane_position};
pub use obstacle::{Obstacle, ObstacleKind, ObstaclePool, SpawnOutcome};
pub use player::{ActionOutcome, LaneChange, LaneDirection, Player, VerticalAction, VerticalState};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use state::{GameEvent, GamePhase, GameState, MAX_PENDING_EVENTS, Status};
pub use tick::{Gesture, SwipeOutcome, decode_swipe, swipe, tick};
