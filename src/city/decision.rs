//! Turn decisions and their validation
//!
//! A ruler decides four things each year, always in the same order: acres
//! to buy, acres to sell, bushels to eat, acres to plant. Each answer is
//! checked against the granary and land left over by the answers before
//! it, so buying land leaves less grain to eat and selling land leaves
//! more. This order is part of the game's balance and must not change.
//!
//! Validation works on a private running copy of stock and land. The
//! `GameState` is only touched when the turn engine applies a finished
//! [`ValidatedDecision`].

use std::fmt;

use crate::city::state::{whole_bushels, GameState};
use crate::core::constants::{ACRES_PER_WORKER, SEED_PER_ACRE, STOCK_EPSILON};
use crate::core::error::ValidationError;

/// One of the four per-year choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionField {
    Buy,
    Sell,
    Eat,
    Plant,
}

impl DecisionField {
    /// All fields in the order they must be entered
    pub const ORDER: [DecisionField; 4] = [Self::Buy, Self::Sell, Self::Eat, Self::Plant];

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Buy => Some(Self::Sell),
            Self::Sell => Some(Self::Eat),
            Self::Eat => Some(Self::Plant),
            Self::Plant => None,
        }
    }
}

impl fmt::Display for DecisionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Eat => "eat",
            Self::Plant => "plant",
        };
        f.write_str(name)
    }
}

/// The ruler's allocation for one year
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnDecision {
    /// Acres bought at this year's price
    pub buy: u32,
    /// Acres sold at this year's price
    pub sell: u32,
    /// Bushels handed out as food
    pub eat: u32,
    /// Acres sown
    pub plant: u32,
}

impl TurnDecision {
    pub fn new(buy: u32, sell: u32, eat: u32, plant: u32) -> Self {
        Self {
            buy,
            sell,
            eat,
            plant,
        }
    }
}

/// A decision that passed every check at a given land price
///
/// Only [`DecisionValidator::finish`] and [`validate`] build one, so the
/// turn engine never sees an unchecked allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedDecision {
    decision: TurnDecision,
    price: u32,
}

impl ValidatedDecision {
    pub fn decision(&self) -> TurnDecision {
        self.decision
    }

    /// Land price the decision was validated against
    pub fn price(&self) -> u32 {
        self.price
    }
}

/// Field-by-field validator for one year's decision
#[derive(Debug, Clone)]
pub struct DecisionValidator {
    price: u32,
    population: u32,
    /// Running granary after the accepted fields
    stock: f64,
    /// Running acreage after the accepted fields
    land: u32,
    next: Option<DecisionField>,
    decision: TurnDecision,
}

impl DecisionValidator {
    pub fn new(state: &GameState, price: u32) -> Self {
        Self {
            price,
            population: state.population,
            stock: state.stock,
            land: state.land,
            next: Some(DecisionField::Buy),
            decision: TurnDecision::default(),
        }
    }

    /// The field that must be entered next, `None` once all four are in
    pub fn next_field(&self) -> Option<DecisionField> {
        self.next
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    /// Granary after the fields accepted so far
    pub fn stock(&self) -> f64 {
        self.stock
    }

    /// Acreage after the fields accepted so far
    pub fn land(&self) -> u32 {
        self.land
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    /// Most acres the current population can tend
    pub fn labor_capacity(&self) -> u64 {
        u64::from(self.population) * u64::from(ACRES_PER_WORKER)
    }

    pub fn buy(&mut self, value: i64) -> Result<u32, ValidationError> {
        self.submit(DecisionField::Buy, value)
    }

    pub fn sell(&mut self, value: i64) -> Result<u32, ValidationError> {
        self.submit(DecisionField::Sell, value)
    }

    pub fn eat(&mut self, value: i64) -> Result<u32, ValidationError> {
        self.submit(DecisionField::Eat, value)
    }

    pub fn plant(&mut self, value: i64) -> Result<u32, ValidationError> {
        self.submit(DecisionField::Plant, value)
    }

    /// Check `value` for `field` and, if it passes, apply it to the running
    /// totals. On error nothing changes and the same field can be retried.
    pub fn submit(&mut self, field: DecisionField, value: i64) -> Result<u32, ValidationError> {
        match self.next {
            Some(expected) if expected == field => {}
            Some(expected) => return Err(ValidationError::OutOfOrder { expected, got: field }),
            None => {
                return Err(ValidationError::OutOfOrder {
                    expected: DecisionField::Plant,
                    got: field,
                })
            }
        }

        let amount = non_negative(field, value)?;
        match field {
            DecisionField::Buy => self.accept_buy(amount)?,
            DecisionField::Sell => self.accept_sell(amount)?,
            DecisionField::Eat => self.accept_eat(amount)?,
            DecisionField::Plant => self.accept_plant(amount)?,
        }
        self.next = field.next();
        Ok(amount)
    }

    /// Seal a fully entered decision
    pub fn finish(self) -> Result<ValidatedDecision, ValidationError> {
        if let Some(missing) = self.next {
            return Err(ValidationError::Incomplete { missing });
        }
        Ok(ValidatedDecision {
            decision: self.decision,
            price: self.price,
        })
    }

    fn accept_buy(&mut self, acres: u32) -> Result<(), ValidationError> {
        let cost = f64::from(acres) * f64::from(self.price);
        if cost > self.stock + STOCK_EPSILON {
            return Err(ValidationError::InsufficientStock {
                field: DecisionField::Buy,
                needed: cost,
                available: whole_bushels(self.stock),
            });
        }
        let land = self
            .land
            .checked_add(acres)
            .ok_or(ValidationError::OutOfRange {
                field: DecisionField::Buy,
                value: i64::from(acres),
            })?;
        self.stock -= cost;
        self.land = land;
        self.decision.buy = acres;
        Ok(())
    }

    fn accept_sell(&mut self, acres: u32) -> Result<(), ValidationError> {
        if acres > self.land {
            return Err(ValidationError::ExceedsLand {
                field: DecisionField::Sell,
                requested: acres,
                owned: self.land,
            });
        }
        self.stock += f64::from(acres) * f64::from(self.price);
        self.land -= acres;
        self.decision.sell = acres;
        Ok(())
    }

    fn accept_eat(&mut self, bushels: u32) -> Result<(), ValidationError> {
        let available = whole_bushels(self.stock);
        if u64::from(bushels) > available {
            return Err(ValidationError::InsufficientStock {
                field: DecisionField::Eat,
                needed: f64::from(bushels),
                available,
            });
        }
        self.stock -= f64::from(bushels);
        self.decision.eat = bushels;
        Ok(())
    }

    fn accept_plant(&mut self, acres: u32) -> Result<(), ValidationError> {
        if acres > self.land {
            return Err(ValidationError::ExceedsLand {
                field: DecisionField::Plant,
                requested: acres,
                owned: self.land,
            });
        }
        let capacity = self.labor_capacity();
        if u64::from(acres) > capacity {
            return Err(ValidationError::ExceedsLabor {
                requested: acres,
                population: self.population,
                capacity,
            });
        }
        let seed = f64::from(acres) * SEED_PER_ACRE;
        if seed > self.stock + STOCK_EPSILON {
            return Err(ValidationError::InsufficientSeed {
                needed: seed,
                available: whole_bushels(self.stock),
            });
        }
        self.stock -= seed;
        self.decision.plant = acres;
        Ok(())
    }
}

/// Validate a whole decision at once, in the canonical field order
pub fn validate(
    state: &GameState,
    price: u32,
    decision: TurnDecision,
) -> Result<ValidatedDecision, ValidationError> {
    let mut validator = DecisionValidator::new(state, price);
    validator.buy(i64::from(decision.buy))?;
    validator.sell(i64::from(decision.sell))?;
    validator.eat(i64::from(decision.eat))?;
    validator.plant(i64::from(decision.plant))?;
    validator.finish()
}

fn non_negative(field: DecisionField, value: i64) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value })
}
