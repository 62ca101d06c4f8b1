use std::path::PathBuf;

use thiserror::Error;

use crate::city::decision::DecisionField;

/// A proposed decision value broke a resource or capacity rule.
///
/// Validation never mutates state, so the caller can re-ask for the same
/// field after any of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: DecisionField, value: i64 },

    #[error("{field} needs {needed} bushels but the granary holds only {available}")]
    InsufficientStock {
        field: DecisionField,
        needed: f64,
        available: u64,
    },

    #[error("{field} of {requested} acres exceeds the {owned} acres owned")]
    ExceedsLand {
        field: DecisionField,
        requested: u32,
        owned: u32,
    },

    #[error("{population} people can tend at most {capacity} acres, not {requested}")]
    ExceedsLabor {
        requested: u32,
        population: u32,
        capacity: u64,
    },

    #[error("planting needs {needed} bushels of seed but the granary holds only {available}")]
    InsufficientSeed { needed: f64, available: u64 },

    #[error("value {value} for {field} is out of range")]
    OutOfRange { field: DecisionField, value: i64 },

    #[error("expected a value for {expected}, got {got}")]
    OutOfOrder {
        expected: DecisionField,
        got: DecisionField,
    },

    #[error("decision is incomplete: {missing} has not been entered")]
    Incomplete { missing: DecisionField },
}

/// Saving or restoring a snapshot failed.
///
/// None of these stop the game; the in-memory state is unaffected.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed save file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("save file violates game invariants: {0}")]
    Invalid(String),
}

/// Session configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum HammurabiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("the reign is over (year {year}, population {population}); no further turns")]
    GameOver { year: u32, population: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HammurabiError>;
