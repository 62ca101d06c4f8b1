//! Random sources for the yearly draws
//!
//! The engine never touches a global RNG. Games get a seeded ChaCha
//! stream; tests get a [`ScriptedRandom`] that replays exact draws.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draws the engine needs
pub trait RandomSource {
    /// Uniform integer in `lo..=hi`
    fn uniform_int(&mut self, lo: u64, hi: u64) -> u64;

    /// Uniform real in `[0, 1)`
    fn uniform_real01(&mut self) -> f64;
}

/// Deterministic ChaCha-backed source
#[derive(Debug, Clone)]
pub struct ChaChaRandom {
    rng: ChaCha8Rng,
}

impl ChaChaRandom {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for ChaChaRandom {
    fn uniform_int(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn uniform_real01(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed script of draws
///
/// Integer draws are clamped into the requested range so a script cannot
/// push the engine outside its own rules. An exhausted script falls back
/// to the low end of each range and to `0.99` for reals (no plague).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<u64>,
    reals: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(ints: impl IntoIterator<Item = u64>, reals: impl IntoIterator<Item = f64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            reals: reals.into_iter().collect(),
        }
    }

    /// Integer draws only; every real draw falls back to `0.99`
    pub fn ints(ints: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            reals: VecDeque::new(),
        }
    }

    /// Draws for one year in engine order: yield, rats, plague roll
    pub fn year(yield_per_acre: u64, rats_ate: u64, plague_roll: f64) -> Self {
        Self::new([yield_per_acre, rats_ate], [plague_roll])
    }

    pub fn is_exhausted(&self) -> bool {
        self.ints.is_empty() && self.reals.is_empty()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, lo: u64, hi: u64) -> u64 {
        self.ints.pop_front().unwrap_or(lo).clamp(lo, hi.max(lo))
    }

    fn uniform_real01(&mut self) -> f64 {
        self.reals.pop_front().unwrap_or(0.99)
    }
}
