//! Year transition
//!
//! `begin_year` draws the land price before the ruler decides anything.
//! `advance_year` applies a validated decision and runs the year's
//! outcome pipeline:
//!
//! 1. apply decision (land trade, food, seed)
//! 2. harvest
//! 3. rats
//! 4. feeding and starvation
//! 5. instant-loss check (may end the reign here)
//! 6. immigration
//! 7. plague
//! 8. totals and year advance
//! 9. game-over check
//!
//! Draw order per year is fixed: price, yield, rats, plague roll.

use crate::city::decision::ValidatedDecision;
use crate::city::state::{whole_bushels, GameState};
use crate::core::constants::{
    BUSHELS_PER_PERSON, FINAL_YEAR, IMMIGRATION_MAX, IMMIGRATION_STOCK_DIVISOR,
    IMMIGRATION_YIELD_PIVOT, INSTANT_LOSS_SHARE, LAND_PRICE_MAX, LAND_PRICE_MIN, PLAGUE_CHANCE,
    RAT_MAX_FRACTION, SEED_PER_ACRE, WHOLE_BUSHEL_GUARD, YIELD_MAX, YIELD_MIN,
};
use crate::core::error::{HammurabiError, Result};
use crate::simulation::random::RandomSource;

/// How a year ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Next year is playable
    Continued,
    /// Tenth year completed
    Completed,
    /// More than 45% starved; the reign ended before immigration and plague
    Catastrophe,
    /// Population reached zero
    Extinct,
}

impl TurnOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Continued)
    }
}

/// Draw this year's land price and record it in the report
pub fn begin_year(state: &mut GameState, rng: &mut impl RandomSource) -> u32 {
    let price = rng.uniform_int(u64::from(LAND_PRICE_MIN), u64::from(LAND_PRICE_MAX)) as u32;
    state.report.land_price = price;
    tracing::debug!(year = state.year, price, "Land price drawn");
    price
}

/// Advance `state` by one year
///
/// Fails with [`HammurabiError::GameOver`] without touching `state` if the
/// reign is already over.
pub fn advance_year(
    state: &mut GameState,
    decision: &ValidatedDecision,
    rng: &mut impl RandomSource,
) -> Result<TurnOutcome> {
    if state.is_terminal() {
        return Err(HammurabiError::GameOver {
            year: state.year,
            population: state.population,
        });
    }

    let d = decision.decision();
    let price = f64::from(decision.price());

    // 1. Apply decision
    state.stock -= f64::from(d.buy) * price;
    state.land = state.land.saturating_add(d.buy);
    state.stock += f64::from(d.sell) * price;
    state.land = state.land.saturating_sub(d.sell);
    state.stock -= f64::from(d.eat);
    state.stock -= f64::from(d.plant) * SEED_PER_ACRE;
    state.stock = state.stock.max(0.0);
    tracing::debug!(
        year = state.year,
        buy = d.buy,
        sell = d.sell,
        eat = d.eat,
        plant = d.plant,
        stock = state.stock,
        land = state.land,
        "Decision applied"
    );

    // 2. Harvest
    let yield_per_acre = rng.uniform_int(u64::from(YIELD_MIN), u64::from(YIELD_MAX)) as u32;
    let harvested = u64::from(d.plant) * u64::from(yield_per_acre);
    state.stock += harvested as f64;
    state.report.yield_per_acre = yield_per_acre;
    state.report.harvested = harvested;
    tracing::debug!(yield_per_acre, harvested, "Harvest gathered");

    // 3. Rats
    let max_rats = max_rats(whole_bushels(state.stock));
    let rats_ate = rng.uniform_int(0, max_rats);
    state.stock = (state.stock - rats_ate as f64).max(0.0);
    state.report.rats_ate = rats_ate;
    tracing::debug!(rats_ate, max_rats, stock = state.stock, "Rats fed");

    // 4. Feeding and starvation
    let fed = d.eat / BUSHELS_PER_PERSON;
    let starved = state.population.saturating_sub(fed);
    state.population -= starved;
    state.report.starved = starved;
    tracing::debug!(fed, starved, population = state.population, "People fed");

    // 5. Instant loss
    let prior_population = u64::from(state.population) + u64::from(starved);
    if prior_population > 0 {
        let died_share = if state.population == 0 && starved > 0 {
            1.0
        } else {
            f64::from(starved) / prior_population as f64
        };
        if died_share > INSTANT_LOSS_SHARE {
            state.totals.total_starved += u64::from(starved);
            state.totals.total_population_at_year_start += prior_population;
            state.report.arrived = 0;
            state.report.plague = false;
            let ended_in = state.year;
            state.year = FINAL_YEAR;
            tracing::info!(
                year = ended_in,
                starved,
                died_share,
                "Catastrophe: too many starved, the reign is over"
            );
            return Ok(TurnOutcome::Catastrophe);
        }
    }

    // 6. Immigration
    let arrived = immigrants(starved, yield_per_acre, state.stock);
    state.population += arrived;
    state.report.arrived = arrived;
    tracing::debug!(arrived, population = state.population, "Immigrants arrived");

    // 7. Plague
    let plague = rng.uniform_real01() < PLAGUE_CHANCE;
    if plague {
        state.population /= 2;
    }
    state.report.plague = plague;
    if plague {
        tracing::debug!(population = state.population, "Plague struck");
    }

    // 8. Totals and advance
    state.totals.total_starved += u64::from(starved);
    state.totals.total_population_at_year_start +=
        u64::from(state.population) + u64::from(starved);
    state.year += 1;

    // 9. Game over?
    let outcome = if state.population == 0 {
        TurnOutcome::Extinct
    } else if state.year >= FINAL_YEAR {
        TurnOutcome::Completed
    } else {
        TurnOutcome::Continued
    };

    tracing::info!(
        year = state.year - 1,
        population = state.population,
        stock = state.whole_bushels(),
        land = state.land,
        starved,
        arrived,
        plague,
        ?outcome,
        "Year complete"
    );

    Ok(outcome)
}

/// Upper bound of the rat draw for a granary of `stock` whole bushels
pub fn max_rats(stock: u64) -> u64 {
    (stock as f64 * RAT_MAX_FRACTION + WHOLE_BUSHEL_GUARD).floor() as u64
}

/// Newcomers attracted this year, 0..=50
pub fn immigrants(starved: u32, yield_per_acre: u32, stock: f64) -> u32 {
    let pull = f64::from(starved) / 2.0
        + (IMMIGRATION_YIELD_PIVOT - i64::from(yield_per_acre)) as f64 * stock
            / IMMIGRATION_STOCK_DIVISOR
        + 1.0;
    pull.floor().clamp(0.0, f64::from(IMMIGRATION_MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::decision::{validate, TurnDecision};
    use crate::simulation::random::ScriptedRandom;

    fn play(
        state: &mut GameState,
        price: u32,
        decision: TurnDecision,
        rng: &mut ScriptedRandom,
    ) -> TurnOutcome {
        let validated = validate(state, price, decision).unwrap();
        advance_year(state, &validated, rng).unwrap()
    }

    #[test]
    fn test_begin_year_records_price() {
        let mut state = GameState::new();
        let mut rng = ScriptedRandom::ints([23]);
        assert_eq!(begin_year(&mut state, &mut rng), 23);
        assert_eq!(state.report.land_price, 23);
    }

    #[test]
    fn test_begin_year_price_in_range() {
        let mut state = GameState::new();
        let mut rng = ScriptedRandom::ints([5, 40]);
        assert_eq!(begin_year(&mut state, &mut rng), LAND_PRICE_MIN);
        assert_eq!(begin_year(&mut state, &mut rng), LAND_PRICE_MAX);
    }

    #[test]
    fn test_max_rats() {
        assert_eq!(max_rats(0), 0);
        assert_eq!(max_rats(100), 7);
        assert_eq!(max_rats(3399), 237);
    }

    #[test]
    fn test_immigrants_formula() {
        // 0 starved, yield 3, 1800 stock: 0 + 2 * 3 + 1 = 7
        assert_eq!(immigrants(0, 3, 1800.0), 7);
        // Capped at 50
        assert_eq!(immigrants(0, 1, 100_000.0), 50);
        // Rich harvests discourage newcomers, floored at 0
        assert_eq!(immigrants(0, 6, 6000.0), 0);
        // Half the starved count
        assert_eq!(immigrants(9, 5, 0.0), 5);
    }

    #[test]
    fn test_immigrants_floor_whole_sum() {
        // 4.5 + 0.5 + 1: the halves add up before flooring
        assert_eq!(immigrants(9, 3, 150.0), 6);
        // 5 - 1.5 + 1 = 4.5, floored once
        assert_eq!(immigrants(10, 6, 900.0), 4);
    }

    #[test]
    fn test_fed_population_does_not_starve() {
        let mut state = GameState::new();
        let mut rng = ScriptedRandom::year(3, 0, 0.99);
        play(&mut state, 20, TurnDecision::new(0, 0, 2000, 0), &mut rng);
        assert_eq!(state.report.starved, 0);
    }

    #[test]
    fn test_eat_floors_to_whole_people() {
        let mut state = GameState::new();
        let mut rng = ScriptedRandom::year(3, 0, 0.99);
        // 1999 bushels feed 99 people
        play(&mut state, 20, TurnDecision::new(0, 0, 1999, 0), &mut rng);
        assert_eq!(state.report.starved, 1);
    }

    #[test]
    fn test_share_exactly_at_threshold_is_not_catastrophe() {
        let mut state = GameState::new();
        // 55 fed, 45 starve: share is exactly 0.45
        let mut rng = ScriptedRandom::year(3, 0, 0.99);
        let outcome = play(&mut state, 20, TurnDecision::new(0, 0, 1100, 0), &mut rng);
        assert_eq!(state.report.starved, 45);
        assert_eq!(outcome, TurnOutcome::Continued);
        assert_eq!(state.year, 2);
    }

    #[test]
    fn test_share_above_threshold_is_catastrophe() {
        let mut state = GameState::new();
        // 54 fed, 46 starve
        let mut rng = ScriptedRandom::year(3, 0, 0.01);
        let outcome = play(&mut state, 20, TurnDecision::new(0, 0, 1080, 0), &mut rng);
        assert_eq!(outcome, TurnOutcome::Catastrophe);
        assert_eq!(state.year, FINAL_YEAR);
        assert_eq!(state.population, 54);
        assert_eq!(state.report.arrived, 0);
        // Plague roll was never consumed
        assert!(!state.report.plague);
        assert_eq!(state.totals.total_starved, 46);
        assert_eq!(state.totals.total_population_at_year_start, 100);
    }

    #[test]
    fn test_plague_halves_population() {
        let mut state = GameState::new();
        let mut rng = ScriptedRandom::year(3, 0, 0.1);
        play(&mut state, 20, TurnDecision::new(0, 0, 2000, 0), &mut rng);
        // 2800 - 2000 = 800 stock; arrived = 0 + 2 * 800 / 600 + 1 = 3
        assert_eq!(state.report.arrived, 3);
        assert!(state.report.plague);
        assert_eq!(state.population, 51);
    }

    #[test]
    fn test_rats_never_drive_stock_negative() {
        let mut state = GameState::new();
        let mut rng = ScriptedRandom::year(1, u64::MAX, 0.99);
        play(&mut state, 20, TurnDecision::new(140, 0, 0, 0), &mut rng);
        assert!(state.stock >= 0.0);
        assert_eq!(state.report.rats_ate, 0);
    }

    #[test]
    fn test_completion_after_tenth_year() {
        let mut state = GameState::new();
        state.year = 10;
        let mut rng = ScriptedRandom::year(3, 0, 0.99);
        let outcome = play(&mut state, 20, TurnDecision::new(0, 0, 2000, 0), &mut rng);
        assert_eq!(outcome, TurnOutcome::Completed);
        assert!(outcome.is_terminal());
        assert_eq!(state.year, FINAL_YEAR);
    }

    #[test]
    fn test_terminal_state_rejects_turns() {
        let mut state = GameState::new();
        state.year = FINAL_YEAR;
        let validated = validate(&GameState::new(), 20, TurnDecision::default()).unwrap();
        let before = state.clone();
        let mut rng = ScriptedRandom::default();
        let err = advance_year(&mut state, &validated, &mut rng).unwrap_err();
        assert!(matches!(err, HammurabiError::GameOver { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_empty_city_rejects_turns() {
        let mut state = GameState::new();
        state.year = 3;
        state.population = 0;
        let validated = validate(&GameState::new(), 20, TurnDecision::default()).unwrap();
        let before = state.clone();
        let mut rng = ScriptedRandom::year(6, 0, 0.99);
        let err = advance_year(&mut state, &validated, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            HammurabiError::GameOver {
                year: 3,
                population: 0
            }
        ));
        assert_eq!(state, before);
        // No draws were consumed
        assert!(!rng.is_exhausted());
    }

    #[test]
    fn test_plague_rounds_population_down() {
        let mut state = GameState::new();
        state.population = 1;
        state.stock = 20.0;
        // 1 fed, yield 5 brings 1 newcomer, plague halves 2 -> 1
        let mut rng = ScriptedRandom::year(5, 0, 0.0);
        let outcome = play(&mut state, 20, TurnDecision::new(0, 0, 20, 0), &mut rng);
        assert_eq!(state.population, 1);
        assert_eq!(outcome, TurnOutcome::Continued);
    }
}
