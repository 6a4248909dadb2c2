//! Per-frame simulation step and swipe handling
//!
//! The host calls `tick` once per displayed frame with the wall-clock time
//! since the previous one. Cadence is not assumed: long pauses just produce
//! one large step.

use super::collision::detect_collision;
use super::difficulty::Difficulty;
use super::obstacle::SpawnOutcome;
use super::player::{ActionOutcome, LaneChange, LaneDirection, VerticalAction};
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, GameState, Status};
use crate::consts::RAIL_SEGMENT_HEIGHT;
use crate::tuning::Tuning;

/// Advance the run by `dt` seconds.
///
/// Returns `None` without touching anything unless the run is Playing.
/// Order within a tick matters: collisions see this tick's vertical state
/// and obstacle positions.
pub fn tick<R: RandomSource>(state: &mut GameState<R>, dt: f32) -> Option<Status> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    // Time and score
    state.elapsed_ms += f64::from(dt) * 1000.0;
    let now = state.elapsed_ms;

    // Jump/slide progress
    if state.player.update(now, &state.tuning) {
        state.push_event(GameEvent::Landed);
    }

    state.difficulty = Difficulty::at(now, &state.tuning);

    // Spawn, then move everything (including the new arrival)
    if now - state.last_spawn_ms >= state.difficulty.spawn_interval {
        match state.obstacles.spawn(&mut state.rng, &state.tuning) {
            SpawnOutcome::Spawned { slot, lane, kind } => {
                state.last_spawn_ms = now;
                log::debug!("Spawned {:?} in lane {} (slot {})", kind, lane.index(), slot);
                state.push_event(GameEvent::Spawned { slot, lane, kind });
            }
            SpawnOutcome::NoFreeSlot => {
                log::debug!("Spawn skipped, all {} slots busy", state.obstacles.capacity());
            }
        }
    }

    let distance = state.difficulty.speed * dt;
    let despawn_y = state.tuning.screen_height + state.tuning.obstacle_size;
    state.obstacles.advance(distance, despawn_y);
    // f64 so a huge step cannot overflow into a NaN offset
    let scrolled =
        f64::from(state.rail_offset) + f64::from(state.difficulty.speed) * f64::from(dt);
    state.rail_offset = scrolled.rem_euclid(f64::from(RAIL_SEGMENT_HEIGHT)) as f32;

    if let Some(hit) = detect_collision(&state.obstacles, &state.player, &state.tuning) {
        state.phase = GamePhase::GameOver;
        state.collision = Some(hit);
        let score = state.score();
        state.push_event(GameEvent::GameOver { score });
        log::info!(
            "Game over: {:?} obstacle in lane {} at {:.0} ms, score {}",
            hit.kind,
            hit.lane.index(),
            now,
            score
        );
    } else {
        log::trace!("tick dt={:.4} elapsed={:.0} speed={:.1}", dt, now, state.difficulty.speed);
    }

    Some(state.status())
}

/// A recognized swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Lane(LaneDirection),
    Vertical(VerticalAction),
}

/// Decode a swipe translation. The dominant axis decides; below threshold
/// on that axis means no gesture.
///
/// Rightward drag (positive dx) steps toward lane 0, leftward toward the
/// last lane. Screen y grows downward, so an upward drag (negative dy) jumps.
pub fn decode_swipe(dx: f32, dy: f32, tuning: &Tuning) -> Option<Gesture> {
    if dx.abs() >= dy.abs() {
        if dx > tuning.lane_swipe_threshold {
            Some(Gesture::Lane(LaneDirection::Left))
        } else if dx < -tuning.lane_swipe_threshold {
            Some(Gesture::Lane(LaneDirection::Right))
        } else {
            None
        }
    } else if dy < -tuning.vertical_swipe_threshold {
        Some(Gesture::Vertical(VerticalAction::Jump))
    } else if dy > tuning.vertical_swipe_threshold {
        Some(Gesture::Vertical(VerticalAction::Slide))
    } else {
        None
    }
}

/// What a swipe did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Not Playing, or too short to count
    Ignored,
    Lane(LaneChange),
    Vertical(ActionOutcome),
}

/// Apply a swipe to the player. Only accepted while Playing.
pub fn swipe<R: RandomSource>(state: &mut GameState<R>, dx: f32, dy: f32) -> SwipeOutcome {
    if state.phase != GamePhase::Playing {
        return SwipeOutcome::Ignored;
    }
    let Some(gesture) = decode_swipe(dx, dy, &state.tuning) else {
        return SwipeOutcome::Ignored;
    };

    match gesture {
        Gesture::Lane(direction) => {
            let change = state.player.change_lane(direction);
            if let LaneChange::Moved { from, to } = change {
                log::debug!("Lane {} -> {}", from.index(), to.index());
                state.push_event(GameEvent::LaneChanged { from, to });
            }
            SwipeOutcome::Lane(change)
        }
        Gesture::Vertical(action) => {
            let outcome = state.player.begin(action, state.elapsed_ms, &state.tuning);
            if let ActionOutcome::Started(action) = outcome {
                log::debug!("{:?} at {:.0} ms", action, state.elapsed_ms);
                state.push_event(match action {
                    VerticalAction::Jump => GameEvent::Jumped,
                    VerticalAction::Slide => GameEvent::Slid,
                });
            }
            SwipeOutcome::Vertical(outcome)
        }
    }
}
