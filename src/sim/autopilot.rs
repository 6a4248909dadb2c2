//! Demo mode controller
//!
//! Plays the game through the normal swipe path so attract screens and the
//! headless runner exercise the same code as a human player.

use super::collision::Hitbox;
use super::lane::Lane;
use super::obstacle::ObstacleKind;
use super::player::{LaneDirection, VerticalAction};
use super::rng::RandomSource;
use super::state::{GamePhase, GameState};
use super::tick::{Gesture, SwipeOutcome, swipe};
use crate::tuning::Tuning;

/// Reaction windows, in seconds of obstacle travel
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Jump/slide when the threat is this close
    pub vertical_lead: f32,
    /// Start looking for another lane this early
    pub lane_lead: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            vertical_lead: 0.15,
            lane_lead: 0.45,
        }
    }
}

impl Autopilot {
    /// Pick a gesture for the current frame, if any
    pub fn decide<R: RandomSource>(&self, state: &GameState<R>) -> Option<Gesture> {
        if state.phase() != GamePhase::Playing {
            return None;
        }
        let tuning = state.tuning();
        let player = state.player();
        let hitbox = Hitbox::for_player(tuning);
        let speed = state.difficulty().speed;

        // Closest obstacle coming at us in our lane
        let (gap, kind) = nearest_threat(state, player.lane, &hitbox, speed * self.lane_lead)?;

        let vertical = match kind {
            ObstacleKind::Low => Some(VerticalAction::Jump),
            ObstacleKind::High => Some(VerticalAction::Slide),
            ObstacleKind::Normal => None,
        };
        if let Some(action) = vertical {
            if !player.is_grounded() {
                return None;
            }
            return (gap <= speed * self.vertical_lead).then_some(Gesture::Vertical(action));
        }

        // Normal obstacle: move to a clear neighbor, center-most first
        let window = speed * self.lane_lead;
        [
            (LaneDirection::Left, player.lane.left()),
            (LaneDirection::Right, player.lane.right()),
        ]
        .into_iter()
        .filter_map(|(dir, lane)| lane.map(|l| (dir, l)))
        .find(|(_, lane)| nearest_threat(state, *lane, &hitbox, window).is_none())
        .map(|(dir, _)| Gesture::Lane(dir))
    }

    /// Decide and apply in one step
    pub fn drive<R: RandomSource>(&self, state: &mut GameState<R>) -> SwipeOutcome {
        match self.decide(state) {
            Some(gesture) => {
                let (dx, dy) = swipe_vector(gesture, state.tuning());
                swipe(state, dx, dy)
            }
            None => SwipeOutcome::Ignored,
        }
    }
}

/// Translation that `decode_swipe` maps back to `gesture`
pub fn swipe_vector(gesture: Gesture, tuning: &Tuning) -> (f32, f32) {
    let lane = tuning.lane_swipe_threshold * 2.0;
    let vertical = tuning.vertical_swipe_threshold * 2.0;
    match gesture {
        Gesture::Lane(LaneDirection::Left) => (lane, 0.0),
        Gesture::Lane(LaneDirection::Right) => (-lane, 0.0),
        Gesture::Vertical(VerticalAction::Jump) => (0.0, -vertical),
        Gesture::Vertical(VerticalAction::Slide) => (0.0, vertical),
    }
}

/// Gap to the nearest active obstacle in `lane` that is within `window`
/// above the hitbox or already overlapping it
fn nearest_threat<R: RandomSource>(
    state: &GameState<R>,
    lane: Lane,
    hitbox: &Hitbox,
    window: f32,
) -> Option<(f32, ObstacleKind)> {
    let tuning = state.tuning();
    state
        .obstacles()
        .active()
        .filter(|(_, o)| o.lane == lane)
        .filter_map(|(_, o)| {
            let (top, bottom) = o.band(tuning);
            let gap = hitbox.top - bottom;
            (top < hitbox.bottom && gap <= window).then_some((gap.max(0.0), o.kind))
        })
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::decode_swipe;

    fn playing() -> GameState {
        let tuning = Tuning {
            base_spawn_interval_ms: 1.0e12,
            min_spawn_interval_ms: 1.0e12,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        state.start();
        state
    }

    #[test]
    fn test_swipe_vector_round_trips() {
        let tuning = Tuning::default();
        for gesture in [
            Gesture::Lane(LaneDirection::Left),
            Gesture::Lane(LaneDirection::Right),
            Gesture::Vertical(VerticalAction::Jump),
            Gesture::Vertical(VerticalAction::Slide),
        ] {
            let (dx, dy) = swipe_vector(gesture, &tuning);
            assert_eq!(decode_swipe(dx, dy, &tuning), Some(gesture));
        }
    }

    #[test]
    fn test_waits_then_jumps_low() {
        let mut state = playing();
        let hitbox = Hitbox::for_player(state.tuning());
        // Bottom edge 100 above the hitbox: inside the lane window, outside the jump window
        let height = state.tuning().obstacle_size * state.tuning().kind_scale.low;
        state.place_obstacle(Lane::CENTER, ObstacleKind::Low, hitbox.top - 100.0 - height);
        let pilot = Autopilot::default();
        assert_eq!(pilot.decide(&state), None);

        let mut state = playing();
        state.place_obstacle(Lane::CENTER, ObstacleKind::Low, hitbox.top - 20.0 - height);
        assert_eq!(
            pilot.decide(&state),
            Some(Gesture::Vertical(VerticalAction::Jump))
        );
    }

    #[test]
    fn test_slides_under_high() {
        let mut state = playing();
        let hitbox = Hitbox::for_player(state.tuning());
        state.place_obstacle(Lane::CENTER, ObstacleKind::High, hitbox.top - 80.0);
        assert_eq!(
            Autopilot::default().decide(&state),
            Some(Gesture::Vertical(VerticalAction::Slide))
        );
    }

    #[test]
    fn test_sidesteps_normal_into_clear_lane() {
        let mut state = playing();
        let hitbox = Hitbox::for_player(state.tuning());
        state.place_obstacle(Lane::CENTER, ObstacleKind::Normal, hitbox.top - 120.0);
        state.place_obstacle(Lane::LEFT, ObstacleKind::Normal, hitbox.top - 100.0);

        let pilot = Autopilot::default();
        assert_eq!(
            pilot.decide(&state),
            Some(Gesture::Lane(LaneDirection::Right))
        );
        pilot.drive(&mut state);
        assert_eq!(state.player().lane, Lane::RIGHT);
    }

    #[test]
    fn test_ignores_other_lanes_and_idle() {
        let mut state = playing();
        let hitbox = Hitbox::for_player(state.tuning());
        state.place_obstacle(Lane::LEFT, ObstacleKind::Normal, hitbox.top - 10.0);
        assert_eq!(Autopilot::default().decide(&state), None);

        let idle = GameState::new(1);
        assert_eq!(Autopilot::default().decide(&idle), None);
    }
}
