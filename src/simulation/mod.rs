//! Simulation layer - random draws and the year transition

pub mod random;
pub mod turn;

pub use random::{ChaChaRandom, RandomSource, ScriptedRandom};
pub use turn::{advance_year, begin_year, TurnOutcome};
