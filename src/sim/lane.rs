//! Lane model: integer lane index to horizontal screen coordinate

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;

/// One of the three fixed tracks, always in `0..LANE_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Lane(u8);

impl Lane {
    pub const LEFT: Lane = Lane(0);
    pub const CENTER: Lane = Lane(1);
    pub const RIGHT: Lane = Lane(2);

    pub const ALL: [Lane; LANE_COUNT as usize] = [Lane::LEFT, Lane::CENTER, Lane::RIGHT];

    /// Returns `None` for out-of-range indices
    pub const fn new(index: u8) -> Option<Lane> {
        if index < LANE_COUNT {
            Some(Lane(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Neighbor toward lane 0, `None` at the boundary
    pub fn left(self) -> Option<Lane> {
        self.0.checked_sub(1).map(Lane)
    }

    /// Neighbor toward the last lane, `None` at the boundary
    pub fn right(self) -> Option<Lane> {
        Lane::new(self.0 + 1)
    }
}

impl Default for Lane {
    fn default() -> Self {
        Lane::CENTER
    }
}

impl TryFrom<u8> for Lane {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Lane::new(index).ok_or_else(|| format!("lane {index} out of range"))
    }
}

impl From<Lane> for u8 {
    fn from(lane: Lane) -> u8 {
        lane.0
    }
}

/// Left edge of an entity of `entity_size` centered in `lane`.
///
/// Player and obstacles share the lane pitch and differ only in size.
#[inline]
pub fn lane_position(lane: Lane, lane_width: f32, entity_size: f32) -> f32 {
    lane.0 as f32 * lane_width + lane_width / 2.0 - entity_size / 2.0
}
