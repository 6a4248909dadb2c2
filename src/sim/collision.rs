//! Collision detection between the player and the obstacle pool
//!
//! Everything moves on one axis, so a hit is a lane match plus overlap of
//! two vertical bands. The player's vertical state then decides whether the
//! obstacle kind can be dodged.

use super::lane::Lane;
use super::obstacle::{ObstacleKind, ObstaclePool};
use super::player::{Player, VerticalState};
use crate::tuning::Tuning;

/// Player's collidable vertical band in screen space.
///
/// Fixed: jumping and sliding change what can be avoided, not where the
/// hitbox sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub top: f32,
    pub bottom: f32,
}

impl Hitbox {
    /// The player's square, shrunk by the padding on both edges
    pub fn for_player(tuning: &Tuning) -> Self {
        let top = tuning.player_top();
        Self {
            top: top + tuning.hitbox_padding,
            bottom: top + tuning.player_size - tuning.hitbox_padding,
        }
    }

    /// Strict overlap with the band `[top, bottom]`; touching edges don't count
    #[inline]
    pub fn overlaps(&self, top: f32, bottom: f32) -> bool {
        bottom > self.top && top < self.bottom
    }
}

/// Whether `state` dodges an overlapping obstacle of `kind`
#[inline]
pub fn is_immune(kind: ObstacleKind, state: VerticalState) -> bool {
    matches!(
        (kind, state),
        (ObstacleKind::Low, VerticalState::Jumping) | (ObstacleKind::High, VerticalState::Sliding)
    )
}

/// The obstacle that ended the run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub slot: usize,
    pub lane: Lane,
    pub kind: ObstacleKind,
}

/// First active obstacle in the player's lane that overlaps the hitbox
/// without an applicable immunity, scanning slots in order.
pub fn detect_collision<const N: usize>(
    pool: &ObstaclePool<N>,
    player: &Player,
    tuning: &Tuning,
) -> Option<Collision> {
    let hitbox = Hitbox::for_player(tuning);
    pool.active()
        .filter(|(_, o)| o.lane == player.lane)
        .find(|(_, o)| {
            let (top, bottom) = o.band(tuning);
            hitbox.overlaps(top, bottom) && !is_immune(o.kind, player.vertical)
        })
        .map(|(slot, o)| Collision {
            slot,
            lane: o.lane,
            kind: o.kind,
        })
}
