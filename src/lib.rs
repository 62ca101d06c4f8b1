//! Hammurabi - ten years of ruling a city of grain, land and people
//!
//! The core is the yearly transition: validate the ruler's decision,
//! apply it, and roll harvest, rats, starvation, immigration and plague.
//! Around it sit a save file and an interactive terminal session.

pub mod city;
pub mod core;
pub mod persistence;
pub mod simulation;
pub mod ui;

pub use crate::city::{GamePhase, GameState, Score, TurnDecision, Verdict};
pub use crate::core::error::{HammurabiError, Result};
pub use crate::simulation::{advance_year, begin_year, TurnOutcome};
