//! City layer - the granary, the land and the people, and the ruler's
//! yearly decisions about them

pub mod decision;
pub mod scoring;
pub mod state;

pub use decision::{validate, DecisionField, DecisionValidator, TurnDecision, ValidatedDecision};
pub use scoring::{Score, Verdict};
pub use state::{whole_bushels, GamePhase, GameState, Totals, YearReport};
