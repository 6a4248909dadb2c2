//! Random source for spawn decisions
//!
//! Spawning only ever asks two questions (which lane, which kind), so the
//! simulation depends on this trait instead of a concrete generator. Runs
//! use a seeded PCG; tests can script exact sequences.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random draws used by the obstacle pool
pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn next_unit(&mut self) -> f32;

    /// Uniform index in [0, n). `n` must be non-zero.
    fn next_index(&mut self, n: usize) -> usize;
}

/// Seeded PCG generator; the same seed replays the same spawn sequence
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind to the start of the sequence
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn next_index(&mut self, n: usize) -> usize {
        self.rng.random_range(0..n)
    }
}

/// Replays fixed draws in a loop. Handy for pinning spawn lane/kind in tests.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    units: Vec<f32>,
    indices: Vec<usize>,
    unit_pos: usize,
    index_pos: usize,
}

impl ScriptedRng {
    /// `units` feed `next_unit`, `indices` feed `next_index` (taken modulo `n`)
    pub fn new(units: Vec<f32>, indices: Vec<usize>) -> Self {
        Self {
            units,
            indices,
            unit_pos: 0,
            index_pos: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f32 {
        if self.units.is_empty() {
            return 0.0;
        }
        let v = self.units[self.unit_pos % self.units.len()];
        self.unit_pos += 1;
        v
    }

    fn next_index(&mut self, n: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let v = self.indices[self.index_pos % self.indices.len()];
        self.index_pos += 1;
        v % n
    }
}
