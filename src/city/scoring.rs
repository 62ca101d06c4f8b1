//! End-of-reign scoring

use crate::city::state::GameState;

/// How the people judge the reign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Riots and exile
    Deposed,
    /// Ruled with an iron fist; tolerated, not wanted back
    Tyrant,
    /// Some enemies, but many would have you again
    Competent,
    /// Nobody could have done better
    Exemplary,
}

impl Verdict {
    /// First matching rule wins
    pub fn from_metrics(starvation_pct: f64, acres_per_citizen: f64) -> Self {
        if starvation_pct > 33.0 && acres_per_citizen < 7.0 {
            Self::Deposed
        } else if starvation_pct > 10.0 && acres_per_citizen < 9.0 {
            Self::Tyrant
        } else if starvation_pct > 3.0 && acres_per_citizen < 10.0 {
            Self::Competent
        } else {
            Self::Exemplary
        }
    }
}

/// Final metrics of a finished game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// P: percent of year-start population that starved, averaged over the reign
    pub starvation_pct: f64,
    /// L: acres owned per surviving citizen
    pub acres_per_citizen: f64,
    pub verdict: Verdict,
}

impl Score {
    pub fn from_state(state: &GameState) -> Self {
        let starvation_pct = starvation_percentage(
            state.totals.total_starved,
            state.totals.total_population_at_year_start,
        );
        let acres_per_citizen = acres_per_citizen(state.land, state.population);
        Self {
            starvation_pct,
            acres_per_citizen,
            verdict: Verdict::from_metrics(starvation_pct, acres_per_citizen),
        }
    }
}

pub fn starvation_percentage(total_starved: u64, total_population_at_year_start: u64) -> f64 {
    if total_population_at_year_start == 0 {
        return 0.0;
    }
    100.0 * total_starved as f64 / total_population_at_year_start as f64
}

pub fn acres_per_citizen(land: u32, population: u32) -> f64 {
    if population == 0 {
        return 0.0;
    }
    f64::from(land) / f64::from(population)
}
