//! Game rule constants - all tunable values in one place
//!
//! Changing any of these changes game balance. Save files do not record
//! them, so a save made under one set of rules replays under another.

// Reign length
pub const FIRST_YEAR: u32 = 1;
pub const LAST_PLAYABLE_YEAR: u32 = 10;
pub const FINAL_YEAR: u32 = LAST_PLAYABLE_YEAR + 1; // reached on completion or catastrophe

// Starting city
pub const INITIAL_POPULATION: u32 = 100;
pub const INITIAL_STOCK: f64 = 2800.0;
pub const INITIAL_LAND: u32 = 1000;

// Land market (bushels per acre, inclusive)
pub const LAND_PRICE_MIN: u32 = 17;
pub const LAND_PRICE_MAX: u32 = 26;

// Farming
pub const YIELD_MIN: u32 = 1;
pub const YIELD_MAX: u32 = 6;
pub const SEED_PER_ACRE: f64 = 0.5;
pub const ACRES_PER_WORKER: u32 = 10;

// Food
pub const BUSHELS_PER_PERSON: u32 = 20;

// Rats eat up to this fraction of the granary
pub const RAT_MAX_FRACTION: f64 = 0.07;

// More than this share starving in one year ends the reign
pub const INSTANT_LOSS_SHARE: f64 = 0.45;

// Immigration: starved/2 + (YIELD_PIVOT - yield) * stock / STOCK_DIVISOR + 1
pub const IMMIGRATION_YIELD_PIVOT: i64 = 5;
pub const IMMIGRATION_STOCK_DIVISOR: f64 = 600.0;
pub const IMMIGRATION_MAX: u32 = 50;

// Plague halves the population
pub const PLAGUE_CHANCE: f64 = 0.15;

// Tolerances
pub const STOCK_EPSILON: f64 = 1e-9; // affordability checks
pub const WHOLE_BUSHEL_GUARD: f64 = 1e-4; // float noise when flooring the granary

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_ordered() {
        assert!(LAND_PRICE_MIN <= LAND_PRICE_MAX);
        assert!(YIELD_MIN <= YIELD_MAX);
        assert!(FIRST_YEAR < FINAL_YEAR);
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        assert!((0.0..1.0).contains(&PLAGUE_CHANCE));
        assert!((0.0..1.0).contains(&RAT_MAX_FRACTION));
        assert!((0.0..1.0).contains(&INSTANT_LOSS_SHARE));
    }
}
