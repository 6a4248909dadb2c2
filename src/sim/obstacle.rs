//! Obstacle pool
//!
//! A fixed array of reusable slots. Spawning takes the first inactive slot,
//! scrolling past the bottom of the screen frees it again. Nothing is
//! allocated after the pool is built.

use serde::{Deserialize, Serialize};

use super::lane::Lane;
use super::rng::RandomSource;
use crate::consts::OBSTACLE_POOL_SIZE;
use crate::tuning::{PerKind, Tuning};

/// Obstacle types, each dodged a different way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Change lanes to avoid
    #[default]
    Normal,
    /// Slide under
    High,
    /// Jump over
    Low,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Normal, ObstacleKind::High, ObstacleKind::Low];

    /// Weighted draw using one unit sample
    pub fn pick(rng: &mut impl RandomSource, weights: &PerKind) -> Self {
        let total = weights.normal + weights.high + weights.low;
        let roll = rng.next_unit() * total;
        if roll < weights.normal {
            ObstacleKind::Normal
        } else if roll < weights.normal + weights.high {
            ObstacleKind::High
        } else {
            ObstacleKind::Low
        }
    }

    /// Small integer code used by packed render buffers
    pub fn code(self) -> u8 {
        match self {
            ObstacleKind::Normal => 0,
            ObstacleKind::High => 1,
            ObstacleKind::Low => 2,
        }
    }
}

/// One pool slot. Position and lane mean nothing while `active` is false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top edge in screen space (negative = above the screen)
    pub y: f32,
    pub lane: Lane,
    pub active: bool,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub const INACTIVE: Obstacle = Obstacle {
        y: 0.0,
        lane: Lane::CENTER,
        active: false,
        kind: ObstacleKind::Normal,
    };

    /// Rendered and collidable height for this kind
    pub fn height(&self, tuning: &Tuning) -> f32 {
        tuning.obstacle_size * tuning.kind_scale.get(self.kind)
    }

    /// Occupied vertical band `(top, bottom)`
    pub fn band(&self, tuning: &Tuning) -> (f32, f32) {
        (self.y, self.y + self.height(tuning))
    }
}

impl Default for Obstacle {
    fn default() -> Self {
        Self::INACTIVE
    }
}

/// Result of a spawn attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnOutcome {
    Spawned {
        slot: usize,
        lane: Lane,
        kind: ObstacleKind,
    },
    /// Every slot is in use; the spawn is skipped
    NoFreeSlot,
}

/// Fixed-capacity obstacle arena
#[derive(Debug, Clone)]
pub struct ObstaclePool<const N: usize = OBSTACLE_POOL_SIZE> {
    slots: [Obstacle; N],
}

impl<const N: usize> Default for ObstaclePool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ObstaclePool<N> {
    /// All slots start inactive
    pub fn new() -> Self {
        Self {
            slots: [Obstacle::INACTIVE; N],
        }
    }

    /// Deactivate every slot
    pub fn reset(&mut self) {
        self.slots = [Obstacle::INACTIVE; N];
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn slots(&self) -> &[Obstacle; N] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&Obstacle> {
        self.slots.get(slot)
    }

    /// Active obstacles with their slot index, in slot order
    pub fn active(&self) -> impl Iterator<Item = (usize, &Obstacle)> {
        self.slots.iter().enumerate().filter(|(_, o)| o.active)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|o| o.active).count()
    }

    fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|o| !o.active)
    }

    /// Activate the first free slot just above the screen with a random lane and kind.
    ///
    /// Draws from `rng` only when a slot is available.
    pub fn spawn(&mut self, rng: &mut impl RandomSource, tuning: &Tuning) -> SpawnOutcome {
        if self.first_free().is_none() {
            return SpawnOutcome::NoFreeSlot;
        }
        let lane = Lane::ALL[rng.next_index(Lane::ALL.len())];
        let kind = ObstacleKind::pick(rng, &tuning.kind_weight);
        self.spawn_at(lane, kind, -tuning.obstacle_size)
    }

    /// Activate the first free slot with explicit values
    pub fn spawn_at(&mut self, lane: Lane, kind: ObstacleKind, y: f32) -> SpawnOutcome {
        let Some(slot) = self.first_free() else {
            return SpawnOutcome::NoFreeSlot;
        };
        self.slots[slot] = Obstacle {
            y,
            lane,
            active: true,
            kind,
        };
        SpawnOutcome::Spawned { slot, lane, kind }
    }

    /// Move every active obstacle down by `distance`, freeing any that end
    /// up below `despawn_y`. Returns the number freed.
    pub fn advance(&mut self, distance: f32, despawn_y: f32) -> usize {
        let mut expired = 0;
        for obstacle in self.slots.iter_mut().filter(|o| o.active) {
            obstacle.y += distance;
            if obstacle.y > despawn_y {
                obstacle.active = false;
                expired += 1;
            }
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRng, SeededRng};

    #[test]
    fn test_new_pool_is_empty() {
        let pool: ObstaclePool = ObstaclePool::new();
        assert_eq!(pool.capacity(), OBSTACLE_POOL_SIZE);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_spawn_above_screen_first_fit() {
        let tuning = Tuning::default();
        let mut pool: ObstaclePool<3> = ObstaclePool::new();
        let mut rng = ScriptedRng::new(vec![0.1], vec![2]);

        let outcome = pool.spawn(&mut rng, &tuning);
        assert_eq!(
            outcome,
            SpawnOutcome::Spawned {
                slot: 0,
                lane: Lane::RIGHT,
                kind: ObstacleKind::Normal
            }
        );
        let o = pool.get(0).unwrap();
        assert!(o.active);
        assert_eq!(o.y, -tuning.obstacle_size);

        // Free slot 0, the next spawn reuses it before slot 1
        pool.spawn(&mut rng, &tuning);
        pool.slots[0].active = false;
        match pool.spawn(&mut rng, &tuning) {
            SpawnOutcome::Spawned { slot, .. } => assert_eq!(slot, 0),
            other => panic!("expected spawn, got {:?}", other),
        }
    }

    #[test]
    fn test_full_pool_skips_without_drawing() {
        let tuning = Tuning::default();
        let mut pool: ObstaclePool<2> = ObstaclePool::new();
        let mut rng = SeededRng::new(3);
        pool.spawn(&mut rng, &tuning);
        pool.spawn(&mut rng, &tuning);

        let before = rng.clone();
        assert_eq!(pool.spawn(&mut rng, &tuning), SpawnOutcome::NoFreeSlot);
        // RNG untouched by a skipped spawn
        let mut a = before;
        assert_eq!(a.next_index(1000), rng.next_index(1000));
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_weighted_kind_pick() {
        let weights = Tuning::default().kind_weight;
        let mut rng = ScriptedRng::new(vec![0.0, 0.49, 0.5, 0.74, 0.75, 0.99], vec![]);
        let kinds: Vec<_> = (0..6).map(|_| ObstacleKind::pick(&mut rng, &weights)).collect();
        assert_eq!(
            kinds,
            vec![
                ObstacleKind::Normal,
                ObstacleKind::Normal,
                ObstacleKind::High,
                ObstacleKind::High,
                ObstacleKind::Low,
                ObstacleKind::Low,
            ]
        );
    }

    #[test]
    fn test_weighted_kind_distribution() {
        let weights = Tuning::default().kind_weight;
        let mut rng = SeededRng::new(99);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[ObstacleKind::pick(&mut rng, &weights).code() as usize] += 1;
        }
        assert!((4500..5500).contains(&counts[0]), "{:?}", counts);
        assert!((2000..3000).contains(&counts[1]), "{:?}", counts);
        assert!((2000..3000).contains(&counts[2]), "{:?}", counts);
    }

    #[test]
    fn test_advance_and_expire() {
        let mut pool: ObstaclePool<2> = ObstaclePool::new();
        pool.spawn_at(Lane::LEFT, ObstacleKind::Normal, 0.0);
        pool.spawn_at(Lane::RIGHT, ObstacleKind::Low, 890.0);

        let expired = pool.advance(10.0, 894.0);
        assert_eq!(expired, 1);
        assert_eq!(pool.get(0).unwrap().y, 10.0);
        assert!(pool.get(0).unwrap().active);
        assert!(!pool.get(1).unwrap().active);

        // Inactive slots don't move
        let parked = pool.get(1).unwrap().y;
        pool.advance(10.0, 894.0);
        assert_eq!(pool.get(1).unwrap().y, parked);
        assert!(!pool.get(1).unwrap().active);
    }

    #[test]
    fn test_exactly_at_threshold_stays_active() {
        let mut pool: ObstaclePool<1> = ObstaclePool::new();
        pool.spawn_at(Lane::CENTER, ObstacleKind::Normal, 884.0);
        assert_eq!(pool.advance(10.0, 894.0), 0);
        assert!(pool.get(0).unwrap().active);
        assert_eq!(pool.advance(0.5, 894.0), 1);
    }

    #[test]
    fn test_band_scales_by_kind() {
        let tuning = Tuning::default();
        let mut o = Obstacle {
            y: 100.0,
            lane: Lane::CENTER,
            active: true,
            kind: ObstacleKind::High,
        };
        assert_eq!(o.band(&tuning), (100.0, 175.0));
        o.kind = ObstacleKind::Low;
        let (top, bottom) = o.band(&tuning);
        assert_eq!(top, 100.0);
        assert!((bottom - 130.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset() {
        let mut pool: ObstaclePool = ObstaclePool::new();
        for _ in 0..4 {
            pool.spawn_at(Lane::LEFT, ObstacleKind::High, 5.0);
        }
        pool.reset();
        assert_eq!(pool.active_count(), 0);
    }
}
