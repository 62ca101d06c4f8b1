//! Save file - one JSON record of the whole game state
//!
//! The record holds exactly thirteen scalars and nothing else. Writes go
//! to a sibling `.tmp` file that is renamed over the real one, so a crash
//! or full disk leaves the previous save intact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::city::state::{GameState, Totals, YearReport};
use crate::core::error::PersistenceError;

/// On-disk layout of a saved game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveFile {
    pub year: u32,
    pub population: u32,
    pub stock: f64,
    pub land: u32,
    pub starved: u32,
    pub arrived: u32,
    pub plague: bool,
    pub harvested: u64,
    pub yield_per_acre: u32,
    pub rats_ate: u64,
    pub land_price: u32,
    pub total_starved: u64,
    pub total_population_at_year_start: u64,
}

impl From<&GameState> for SaveFile {
    fn from(state: &GameState) -> Self {
        Self {
            year: state.year,
            population: state.population,
            stock: state.stock,
            land: state.land,
            starved: state.report.starved,
            arrived: state.report.arrived,
            plague: state.report.plague,
            harvested: state.report.harvested,
            yield_per_acre: state.report.yield_per_acre,
            rats_ate: state.report.rats_ate,
            land_price: state.report.land_price,
            total_starved: state.totals.total_starved,
            total_population_at_year_start: state.totals.total_population_at_year_start,
        }
    }
}

impl SaveFile {
    /// Rebuild the game state, rejecting records that break its invariants
    pub fn into_state(self) -> Result<GameState, PersistenceError> {
        let state = GameState {
            year: self.year,
            population: self.population,
            stock: self.stock,
            land: self.land,
            report: YearReport {
                starved: self.starved,
                arrived: self.arrived,
                plague: self.plague,
                harvested: self.harvested,
                yield_per_acre: self.yield_per_acre,
                rats_ate: self.rats_ate,
                land_price: self.land_price,
            },
            totals: Totals {
                total_starved: self.total_starved,
                total_population_at_year_start: self.total_population_at_year_start,
            },
        };
        state
            .check_invariants()
            .map_err(PersistenceError::Invalid)?;
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Write `state` to `path`, replacing any previous save atomically
pub fn save(state: &GameState, path: &Path) -> Result<(), PersistenceError> {
    let json = SaveFile::from(state).to_json()?;
    let tmp = temp_path(path);

    let write_tmp = || -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        Ok(())
    };
    if let Err(source) = write_tmp() {
        let _ = fs::remove_file(&tmp);
        return Err(PersistenceError::Io { path: tmp, source });
    }

    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::debug!(path = %path.display(), year = state.year, "Game saved");
    Ok(())
}

/// Read a saved game
///
/// `Ok(None)` when there is no save file. Any other failure is an error
/// and the caller should treat it as "no saved game".
pub fn load(path: &Path) -> Result<Option<GameState>, PersistenceError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let state = SaveFile::from_json(&content)?.into_state()?;
    tracing::debug!(path = %path.display(), year = state.year, "Game loaded");
    Ok(Some(state))
}

/// Remove the save file. A missing file is not an error.
pub fn discard(path: &Path) -> Result<(), PersistenceError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
