//! GameState - the city's granary, land and people

use crate::core::constants::{
    FINAL_YEAR, FIRST_YEAR, INITIAL_LAND, INITIAL_POPULATION, INITIAL_STOCK, LAST_PLAYABLE_YEAR,
    WHOLE_BUSHEL_GUARD, YIELD_MAX,
};

/// What happened during the previous year
///
/// Display and persistence only; no decision rule reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearReport {
    pub starved: u32,
    pub arrived: u32,
    pub plague: bool,
    pub harvested: u64,
    /// 0 until the first harvest, then 1..=6
    pub yield_per_acre: u32,
    pub rats_ate: u64,
    /// Price drawn at the start of the current year
    pub land_price: u32,
}

/// Accumulators for the final score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_starved: u64,
    pub total_population_at_year_start: u64,
}

/// Where the reign stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Years 1-10 with people left to rule
    Playable,
    /// Year 11: ten years completed or a catastrophe ended the reign
    Finished,
    /// Nobody is left
    Extinct,
}

/// The complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub year: u32,
    pub population: u32,
    /// Bushels in the granary; fractional because seed costs half a bushel
    pub stock: f64,
    pub land: u32,
    pub report: YearReport,
    pub totals: Totals,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            year: FIRST_YEAR,
            population: INITIAL_POPULATION,
            stock: INITIAL_STOCK,
            land: INITIAL_LAND,
            report: YearReport::default(),
            totals: Totals::default(),
        }
    }
}

impl GameState {
    /// Fresh city at the start of year 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Granary contents in whole bushels
    pub fn whole_bushels(&self) -> u64 {
        whole_bushels(self.stock)
    }

    pub fn phase(&self) -> GamePhase {
        if self.population == 0 {
            GamePhase::Extinct
        } else if self.year > LAST_PLAYABLE_YEAR {
            GamePhase::Finished
        } else {
            GamePhase::Playable
        }
    }

    /// No further turns may be played
    pub fn is_terminal(&self) -> bool {
        self.phase() != GamePhase::Playable
    }

    /// Check the invariants a restored snapshot must satisfy
    pub fn check_invariants(&self) -> Result<(), String> {
        if !(FIRST_YEAR..=FINAL_YEAR).contains(&self.year) {
            return Err(format!(
                "year {} outside {}..={}",
                self.year, FIRST_YEAR, FINAL_YEAR
            ));
        }
        if !self.stock.is_finite() || self.stock < 0.0 {
            return Err(format!("stock {} is not a non-negative number", self.stock));
        }
        if self.report.yield_per_acre > YIELD_MAX {
            return Err(format!(
                "yield per acre {} above {}",
                self.report.yield_per_acre, YIELD_MAX
            ));
        }
        Ok(())
    }
}

/// Floor a granary amount, ignoring float noise just below a whole bushel
pub fn whole_bushels(stock: f64) -> u64 {
    if stock <= 0.0 {
        0
    } else {
        (stock + WHOLE_BUSHEL_GUARD).floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = GameState::new();
        assert_eq!(state.year, 1);
        assert_eq!(state.population, 100);
        assert_eq!(state.stock, 2800.0);
        assert_eq!(state.land, 1000);
        assert_eq!(state.report, YearReport::default());
        assert_eq!(state.totals, Totals::default());
        assert_eq!(state.phase(), GamePhase::Playable);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new();
        state.year = 11;
        assert_eq!(state.phase(), GamePhase::Finished);
        assert!(state.is_terminal());

        state.year = 4;
        state.population = 0;
        assert_eq!(state.phase(), GamePhase::Extinct);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_whole_bushels() {
        assert_eq!(whole_bushels(10.5), 10);
        assert_eq!(whole_bushels(9.99999), 10);
        assert_eq!(whole_bushels(0.0), 0);
        assert_eq!(whole_bushels(-3.0), 0);
    }

    #[test]
    fn test_invariant_violations() {
        let mut state = GameState::new();
        state.year = 12;
        assert!(state.check_invariants().is_err());

        let mut state = GameState::new();
        state.stock = f64::NAN;
        assert!(state.check_invariants().is_err());

        let mut state = GameState::new();
        state.report.yield_per_acre = 7;
        assert!(state.check_invariants().is_err());
    }
}
