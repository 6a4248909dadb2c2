//! Read-only views for the presentation shell
//!
//! Built from a `GameState` every frame; nothing here writes back.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::RAIL_SEGMENT_HEIGHT;
use crate::sim::{GamePhase, GameState, Lane, ObstacleKind, RandomSource, VerticalState, lane_position};

/// One pool slot as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    /// Top-left corner in screen space
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub lane: Lane,
    pub active: bool,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub lane: Lane,
    /// Top-left corner at rest; apply `vertical_offset` upward and
    /// `vertical_scale` on top of it
    pub pos: Vec2,
    pub size: f32,
    pub vertical_state: VerticalState,
    pub vertical_offset: f32,
    pub vertical_scale: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub score: u64,
    pub phase: GamePhase,
    /// Rail dash scroll, in [0, segment height)
    pub rail_offset: f32,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
}

impl FrameView {
    pub fn capture<R: RandomSource>(state: &GameState<R>) -> Self {
        Self {
            score: state.score(),
            phase: state.phase(),
            rail_offset: state.rail_offset().rem_euclid(RAIL_SEGMENT_HEIGHT),
            player: player_view(state),
            obstacles: obstacle_views(state),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub fn player_view<R: RandomSource>(state: &GameState<R>) -> PlayerView {
    let tuning = state.tuning();
    let player = state.player();
    PlayerView {
        lane: player.lane,
        pos: Vec2::new(
            lane_position(player.lane, tuning.lane_width(), tuning.player_size),
            tuning.player_top(),
        ),
        size: tuning.player_size,
        vertical_state: player.vertical,
        vertical_offset: player.vertical_offset,
        vertical_scale: player.vertical_scale,
    }
}

/// Every slot in pool order, inactive ones included
pub fn obstacle_views<R: RandomSource>(state: &GameState<R>) -> Vec<ObstacleView> {
    let tuning = state.tuning();
    state
        .obstacles()
        .slots()
        .iter()
        .map(|o| ObstacleView {
            pos: Vec2::new(
                lane_position(o.lane, tuning.lane_width(), tuning.obstacle_size),
                o.y,
            ),
            width: tuning.obstacle_size,
            height: o.height(tuning),
            lane: o.lane,
            active: o.active,
            kind: o.kind,
        })
        .collect()
}

/// Flat per-slot record for instance buffers: `[y, lane, active, kind]`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ObstacleInstance {
    pub y: f32,
    pub lane: f32,
    /// 1.0 when active, doubles as opacity
    pub active: f32,
    pub kind: f32,
}

impl ObstacleInstance {
    pub const STRIDE: usize = 4;
}

/// Pack the whole pool, one instance per slot
pub fn pack_obstacles<R: RandomSource>(state: &GameState<R>) -> Vec<ObstacleInstance> {
    state
        .obstacles()
        .slots()
        .iter()
        .map(|o| ObstacleInstance {
            y: o.y,
            lane: o.lane.index() as f32,
            active: if o.active { 1.0 } else { 0.0 },
            kind: o.kind.code() as f32,
        })
        .collect()
}

/// Same as `pack_obstacles`, flattened to floats
pub fn pack_obstacles_flat<R: RandomSource>(state: &GameState<R>) -> Vec<f32> {
    bytemuck::cast_slice(&pack_obstacles(state)).to_vec()
}

/// Colors for game elements
pub mod colors {
    use crate::sim::{ObstacleKind, VerticalState};

    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const RAIL: [f32; 4] = [0.133, 0.133, 0.133, 1.0];
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 0.8, 1.0]; // #00ffcc
    pub const PLAYER_SLIDING: [f32; 4] = [0.0, 0.8, 1.0, 1.0]; // #00ccff
    pub const OBSTACLE_NORMAL: [f32; 4] = [1.0, 0.2, 0.4, 1.0]; // #ff3366
    pub const OBSTACLE_HIGH: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const OBSTACLE_LOW: [f32; 4] = [1.0, 0.8, 0.0, 1.0]; // #ffcc00

    pub fn obstacle(kind: ObstacleKind) -> [f32; 4] {
        match kind {
            ObstacleKind::Normal => OBSTACLE_NORMAL,
            ObstacleKind::High => OBSTACLE_HIGH,
            ObstacleKind::Low => OBSTACLE_LOW,
        }
    }

    pub fn player(state: VerticalState) -> [f32; 4] {
        match state {
            VerticalState::Sliding => PLAYER_SLIDING,
            _ => PLAYER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{VerticalAction, swipe, tick};

    #[test]
    fn test_frame_view_reflects_state() {
        let mut state = GameState::new(3);
        state.start();
        state.place_obstacle(Lane::RIGHT, ObstacleKind::High, 10.0);

        let frame = FrameView::capture(&state);
        assert_eq!(frame.phase, GamePhase::Playing);
        assert_eq!(frame.obstacles.len(), state.obstacles().capacity());

        let o = frame.obstacles[0];
        assert!(o.active);
        assert_eq!(o.pos.y, 10.0);
        assert_eq!(o.height, 75.0);
        // 2 * 130 + 65 - 25
        assert!((o.pos.x - 300.0).abs() < 1e-3);
        assert!(!frame.obstacles[1].active);

        assert_eq!(frame.player.lane, Lane::CENTER);
        assert!((frame.player.pos.x - 170.0).abs() < 1e-3);
        assert_eq!(frame.player.vertical_scale, 1.0);
    }

    #[test]
    fn test_player_view_during_slide() {
        let mut state = GameState::new(3);
        state.start();
        swipe(&mut state, 0.0, 100.0);
        tick(&mut state, 0.05);
        let view = player_view(&state);
        assert_eq!(view.vertical_state, VerticalState::Sliding);
        assert_eq!(view.vertical_scale, state.tuning().slide_scale);
        assert_eq!(colors::player(view.vertical_state), colors::PLAYER_SLIDING);
    }

    #[test]
    fn test_player_view_mid_jump_offset() {
        let mut state = GameState::new(3);
        state.start();
        assert!(matches!(
            swipe(&mut state, 0.0, -100.0),
            crate::sim::SwipeOutcome::Vertical(crate::sim::ActionOutcome::Started(VerticalAction::Jump))
        ));
        tick(&mut state, 0.25);
        let view = player_view(&state);
        assert!((view.vertical_offset - state.tuning().jump_height).abs() < 1e-3);
    }

    #[test]
    fn test_packed_layout() {
        let mut state = GameState::new(3);
        state.start();
        state.place_obstacle(Lane::LEFT, ObstacleKind::Low, 42.0);

        let flat = pack_obstacles_flat(&state);
        assert_eq!(flat.len(), state.obstacles().capacity() * ObstacleInstance::STRIDE);
        assert_eq!(&flat[..4], &[42.0, 0.0, 1.0, 2.0]);
        assert_eq!(flat[6], 0.0);
    }

    #[test]
    fn test_frame_json_has_fields() {
        let mut state = GameState::new(3);
        state.start();
        let json = FrameView::capture(&state).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Playing");
        assert_eq!(value["player"]["lane"], 1);
        assert_eq!(value["obstacles"].as_array().unwrap().len(), 6);
    }
}
