//! Game state and lifecycle
//!
//! One run at a time. The simulation step, swipes, and the lifecycle
//! commands are the only writers; hosts read through accessors and `view`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::difficulty::Difficulty;
use super::lane::Lane;
use super::obstacle::{ObstacleKind, ObstaclePool};
use super::player::Player;
use super::rng::{RandomSource, SeededRng};
use crate::consts::MS_PER_POINT;
use crate::tuning::Tuning;

/// Top-level lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start; only `start` is accepted
    #[default]
    Idle,
    /// Ticking, all input accepted
    Playing,
    /// Frozen after a collision; only `restart` is accepted
    GameOver,
}

/// Transitions the presentation layer may react to (sound, haptics, overlays)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    LaneChanged { from: Lane, to: Lane },
    Jumped,
    Slid,
    Landed,
    Spawned { slot: usize, lane: Lane, kind: ObstacleKind },
    GameOver { score: u64 },
}

/// Per-tick publication to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub score: u64,
    pub phase: GamePhase,
}

/// Oldest events are dropped past this many undrained entries
pub const MAX_PENDING_EVENTS: usize = 64;

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SeededRng> {
    pub(crate) tuning: Tuning,
    pub(crate) phase: GamePhase,
    /// Game time since (re)start, ms
    pub(crate) elapsed_ms: f64,
    /// Game time of the most recent successful spawn, ms
    pub(crate) last_spawn_ms: f64,
    /// Rail scroll position, wrapped to one dash segment
    pub(crate) rail_offset: f32,
    pub(crate) difficulty: Difficulty,
    pub(crate) player: Player,
    pub(crate) obstacles: ObstaclePool,
    pub(crate) rng: R,
    /// What ended the run, kept until restart
    pub(crate) collision: Option<Collision>,
    events: VecDeque<GameEvent>,
}

impl GameState<SeededRng> {
    /// Create an idle run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SeededRng::new(seed), Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_rng(SeededRng::new(seed), tuning)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create an idle run drawing spawns from `rng`
    pub fn with_rng(rng: R, tuning: Tuning) -> Self {
        let difficulty = Difficulty::at(0.0, &tuning);
        Self {
            tuning,
            phase: GamePhase::Idle,
            elapsed_ms: 0.0,
            last_spawn_ms: 0.0,
            rail_offset: 0.0,
            difficulty,
            player: Player::new(),
            obstacles: ObstaclePool::new(),
            rng,
            collision: None,
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
        }
    }

    /// Idle -> Playing. Ignored in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::Started);
        log::info!("Run started");
        true
    }

    /// Wipe the run and go straight to Playing. Ignored while Idle.
    ///
    /// The RNG keeps its stream, so consecutive runs differ.
    pub fn restart(&mut self) -> bool {
        if self.phase == GamePhase::Idle {
            return false;
        }
        let final_score = self.score();
        self.reset_run();
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::Restarted);
        log::info!("Run restarted (previous score {})", final_score);
        true
    }

    fn reset_run(&mut self) {
        self.elapsed_ms = 0.0;
        self.last_spawn_ms = 0.0;
        self.rail_offset = 0.0;
        self.difficulty = Difficulty::at(0.0, &self.tuning);
        self.player = Player::new();
        self.obstacles.reset();
        self.collision = None;
    }

    /// Points survived; always `floor(elapsed_ms / 100)`
    pub fn score(&self) -> u64 {
        (self.elapsed_ms / MS_PER_POINT).floor() as u64
    }

    pub fn status(&self) -> Status {
        Status {
            score: self.score(),
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    pub fn rail_offset(&self) -> f32 {
        self.rail_offset
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstaclePool {
        &self.obstacles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Replace the spawn source, e.g. to reseed between runs
    pub fn set_rng(&mut self, rng: R) {
        self.rng = rng;
    }

    /// Take all events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn pending_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

#[cfg(test)]
impl<R: RandomSource> GameState<R> {
    /// Put an obstacle on the track directly, bypassing the spawn timer
    pub(crate) fn place_obstacle(
        &mut self,
        lane: Lane,
        kind: ObstacleKind,
        y: f32,
    ) -> super::obstacle::SpawnOutcome {
        self.obstacles.spawn_at(lane, kind, y)
    }
}
