//! The player: lane occupancy and the grounded/jumping/sliding state machine

use serde::{Deserialize, Serialize};

use super::lane::Lane;
use crate::tuning::Tuning;

/// Vertical state. Only one action runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalState {
    #[default]
    Grounded,
    /// Clears Low obstacles
    Jumping,
    /// Clears High obstacles
    Sliding,
}

/// Vertical actions requested by swipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAction {
    Jump,
    Slide,
}

/// Result of a vertical action request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Started(VerticalAction),
    /// Another action is in flight; the request is dropped, not queued
    Busy,
}

/// Horizontal direction in lane-index space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    /// Toward lane 0
    Left,
    /// Toward the last lane
    Right,
}

/// Result of a lane change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneChange {
    Moved { from: Lane, to: Lane },
    /// Already in the outermost lane on that side
    AtBoundary,
}

/// Player state read by collision and rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Occupied lane. Authoritative for collision even while the shell
    /// is still tweening toward it.
    pub lane: Lane,
    pub vertical: VerticalState,
    /// Game time (ms) the current action began; ignored while grounded
    pub action_started_ms: f64,
    /// Upward visual offset (points), non-zero only mid-jump
    pub vertical_offset: f32,
    /// Vertical squash factor, below 1 only while sliding
    pub vertical_scale: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane: Lane::default(),
            vertical: VerticalState::Grounded,
            action_started_ms: 0.0,
            vertical_offset: 0.0,
            vertical_scale: 1.0,
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_grounded(&self) -> bool {
        self.vertical == VerticalState::Grounded
    }

    /// Step one lane over. No-op at the outer lanes.
    pub fn change_lane(&mut self, direction: LaneDirection) -> LaneChange {
        let next = match direction {
            LaneDirection::Left => self.lane.left(),
            LaneDirection::Right => self.lane.right(),
        };
        match next {
            Some(to) => {
                let from = self.lane;
                self.lane = to;
                LaneChange::Moved { from, to }
            }
            None => LaneChange::AtBoundary,
        }
    }

    /// Start a jump or slide at `now_ms`, only from the grounded state
    pub fn begin(&mut self, action: VerticalAction, now_ms: f64, tuning: &Tuning) -> ActionOutcome {
        if !self.is_grounded() {
            return ActionOutcome::Busy;
        }
        self.action_started_ms = now_ms;
        match action {
            VerticalAction::Jump => {
                self.vertical = VerticalState::Jumping;
                self.vertical_offset = 0.0;
                self.vertical_scale = 1.0;
            }
            VerticalAction::Slide => {
                self.vertical = VerticalState::Sliding;
                self.vertical_offset = 0.0;
                self.vertical_scale = tuning.slide_scale;
            }
        }
        ActionOutcome::Started(action)
    }

    /// Advance the current action to `now_ms`. Returns true on landing
    /// (any action resolving back to grounded).
    pub fn update(&mut self, now_ms: f64, tuning: &Tuning) -> bool {
        let elapsed = now_ms - self.action_started_ms;
        match self.vertical {
            VerticalState::Grounded => false,
            VerticalState::Jumping => {
                if elapsed >= tuning.jump_duration_ms {
                    self.land();
                    return true;
                }
                let t = (elapsed / tuning.jump_duration_ms).clamp(0.0, 1.0) as f32;
                self.vertical_offset = jump_arc(t, tuning.jump_height);
                false
            }
            VerticalState::Sliding => {
                if elapsed >= tuning.slide_duration_ms {
                    self.land();
                    return true;
                }
                self.vertical_scale = tuning.slide_scale;
                false
            }
        }
    }

    fn land(&mut self) {
        self.vertical = VerticalState::Grounded;
        self.vertical_offset = 0.0;
        self.vertical_scale = 1.0;
    }
}

/// Parabolic jump height for normalized time `t` in [0, 1]: zero at both
/// ends, `height` at the midpoint
#[inline]
pub fn jump_arc(t: f32, height: f32) -> f32 {
    4.0 * height * t * (1.0 - t)
}
