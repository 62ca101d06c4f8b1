//! Advisor's speeches: the yearly report and the final judgment

use std::fmt::Write as _;

use crate::city::scoring::{Score, Verdict};
use crate::city::state::GameState;
use crate::core::error::ValidationError;

/// Report read to the ruler at the start of a year
pub fn yearly_report(state: &GameState) -> String {
    let r = &state.report;
    let mut out = String::new();

    out.push_str("My lord, allow me to report\n");
    let _ = writeln!(out, "in year {} of your exalted reign:", state.year);

    let mut comings_and_goings = Vec::new();
    if r.starved > 0 {
        comings_and_goings.push(format!("{} people starved to death", r.starved));
    }
    if r.arrived > 0 {
        comings_and_goings.push(format!("{} people came to our great city", r.arrived));
    }
    if !comings_and_goings.is_empty() {
        let _ = writeln!(out, "{};", comings_and_goings.join(", and "));
    }
    if r.plague {
        out.push_str("A plague wiped out half the population;\n");
    }

    let _ = writeln!(out, "The population is now {};", state.population);
    if r.harvested > 0 {
        let _ = writeln!(
            out,
            "We harvested {} bushels of wheat, {} bushels per acre;",
            r.harvested, r.yield_per_acre
        );
    }
    if r.rats_ate > 0 {
        let _ = writeln!(
            out,
            "Rats destroyed {} bushels, leaving {} in the granary;",
            r.rats_ate,
            state.whole_bushels()
        );
    }
    let _ = writeln!(out, "The city owns {} acres of land;", state.land);
    let _ = writeln!(out, "Land costs {} bushels per acre.", r.land_price);
    out
}

/// Re-prompt message for a rejected value
pub fn rejection(err: &ValidationError) -> String {
    match err {
        ValidationError::Negative { .. } => "That cannot be negative.".to_string(),
        ValidationError::InsufficientStock { available, .. } => {
            format!("O lord, have mercy! We have only {available} bushels.")
        }
        ValidationError::ExceedsLand { owned, .. } => {
            format!("You cannot go beyond the {owned} acres you own.")
        }
        ValidationError::ExceedsLabor {
            population,
            capacity,
            ..
        } => format!("We have only {population} people; they can tend {capacity} acres."),
        ValidationError::InsufficientSeed { needed, available } => format!(
            "O lord, have mercy! That needs {} bushels of seed and we have {available}.",
            needed.ceil()
        ),
        other => format!("{other}."),
    }
}

/// The closing verdict text
pub fn verdict_text(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Deposed => {
            "Your incompetence drove the people to riot and cast you out of the city. \
             You now eke out a miserable existence in exile."
        }
        Verdict::Tyrant => {
            "You ruled with an iron fist, like Nero and Ivan the Terrible. \
             The people sighed with relief, and nobody wants you as their ruler again."
        }
        Verdict::Competent => {
            "You did quite well. You have your detractors, \
             but many would like to see you lead the city again."
        }
        Verdict::Exemplary => {
            "Fantastic! Charlemagne, Disraeli and Jefferson together could not have done better."
        }
    }
}

/// Closing speech with both metrics and the verdict
pub fn final_report(score: &Score) -> String {
    let mut out = String::new();
    out.push_str("=== THE END OF YOUR REIGN ===\n");
    let _ = writeln!(
        out,
        "Average yearly share of the people who starved: P = {:.2}%",
        score.starvation_pct
    );
    let _ = writeln!(
        out,
        "Acres of land per citizen: L = {:.2}\n",
        score.acres_per_citizen
    );
    out.push_str(verdict_text(score.verdict));
    out.push('\n');
    out
}
