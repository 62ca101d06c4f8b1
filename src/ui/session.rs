//! Interactive session - one reign played over a line-based terminal
//!
//! Generic over its input and output so the whole loop can be driven from
//! a script in tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::city::decision::{DecisionField, DecisionValidator};
use crate::city::scoring::Score;
use crate::city::state::GameState;
use crate::core::error::Result;
use crate::persistence::snapshot;
use crate::simulation::random::RandomSource;
use crate::simulation::turn::{advance_year, begin_year, TurnOutcome};
use crate::ui::report;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEnd {
    /// The reign reached a terminal state and was scored
    Finished(Score),
    /// The ruler chose to save and quit
    Saved,
    /// Input ran out; progress was saved
    Aborted,
}

pub struct Session<R, W, G> {
    input: R,
    output: W,
    rng: G,
    save_path: PathBuf,
    ignore_saved: bool,
}

impl<R: BufRead, W: Write, G: RandomSource> Session<R, W, G> {
    pub fn new(input: R, output: W, rng: G, save_path: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output,
            rng,
            save_path: save_path.into(),
            ignore_saved: false,
        }
    }

    /// Start a new game even if a save file exists
    pub fn ignore_saved_game(mut self, ignore: bool) -> Self {
        self.ignore_saved = ignore;
        self
    }

    /// Consume the session and hand back its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Play until the reign ends, the ruler quits, or input runs out
    pub fn run(&mut self) -> Result<SessionEnd> {
        let mut state = match self.restore()? {
            Some(state) => state,
            None => return Ok(SessionEnd::Aborted),
        };
        tracing::info!(year = state.year, population = state.population, "Reign begins");

        while !state.is_terminal() {
            let price = begin_year(&mut state, &mut self.rng);

            writeln!(self.output, "\n=== YEAR {} ===", state.year)?;
            write!(
                self.output,
                "Press 'q' to save and quit, or any other key to continue: "
            )?;
            self.output.flush()?;
            let Some(answer) = self.read_line()? else {
                self.autosave(&state)?;
                return Ok(SessionEnd::Aborted);
            };
            if answer.eq_ignore_ascii_case("q") {
                return self.save_and_quit(&state);
            }

            self.autosave(&state)?;
            write!(self.output, "\n{}", report::yearly_report(&state))?;

            let mut validator = DecisionValidator::new(&state, price);
            for field in DecisionField::ORDER {
                if !self.ask_field(&mut validator, field)? {
                    self.autosave(&state)?;
                    return Ok(SessionEnd::Aborted);
                }
            }
            let decision = validator.finish()?;

            let outcome = advance_year(&mut state, &decision, &mut self.rng)?;
            if outcome == TurnOutcome::Catastrophe {
                writeln!(
                    self.output,
                    "\nCatastrophe! More than 45% of the people starved this year."
                )?;
            }
            if state.population == 0 {
                writeln!(self.output, "\nEveryone has died. Your reign is over.")?;
            }
            self.autosave(&state)?;
        }

        let score = Score::from_state(&state);
        write!(self.output, "\n{}", report::final_report(&score))?;
        tracing::info!(
            starvation_pct = score.starvation_pct,
            acres_per_citizen = score.acres_per_citizen,
            verdict = ?score.verdict,
            "Reign scored"
        );

        if let Err(e) = snapshot::discard(&self.save_path) {
            tracing::warn!(error = %e, "Could not remove finished save");
            writeln!(self.output, "WARNING: could not remove the save file: {e}")?;
        }
        Ok(SessionEnd::Finished(score))
    }

    /// Load a saved game and ask whether to continue it.
    /// `None` means input ran out before the question was answered.
    fn restore(&mut self) -> Result<Option<GameState>> {
        if self.ignore_saved {
            return Ok(Some(GameState::new()));
        }
        let saved = match snapshot::load(&self.save_path) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.save_path.display(),
                    "Ignoring unreadable save"
                );
                writeln!(
                    self.output,
                    "The saved game could not be read ({e}); starting a new reign."
                )?;
                None
            }
        };
        let Some(saved) = saved else {
            return Ok(Some(GameState::new()));
        };

        writeln!(self.output, "A saved game was found.")?;
        loop {
            write!(self.output, "Continue the previous game? [y/n]: ")?;
            self.output.flush()?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            match answer.as_str() {
                "y" | "Y" => return Ok(Some(saved)),
                "n" | "N" => return Ok(Some(GameState::new())),
                _ => writeln!(self.output, "Please answer 'y' or 'n'.")?,
            }
        }
    }

    /// Prompt until `field` is accepted. `false` if input ran out.
    fn ask_field(
        &mut self,
        validator: &mut DecisionValidator,
        field: DecisionField,
    ) -> Result<bool> {
        loop {
            write!(self.output, "{}", prompt(field))?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            let value: i64 = match line.parse() {
                Ok(value) => value,
                Err(_) => {
                    writeln!(self.output, "Please enter a whole number.")?;
                    continue;
                }
            };
            match validator.submit(field, value) {
                Ok(_) => return Ok(true),
                Err(e) => {
                    tracing::debug!(%field, value, error = %e, "Decision rejected");
                    writeln!(self.output, "{}", report::rejection(&e))?;
                }
            }
        }
    }

    fn save_and_quit(&mut self, state: &GameState) -> Result<SessionEnd> {
        match snapshot::save(state, &self.save_path) {
            Ok(()) => writeln!(
                self.output,
                "Game saved to \"{}\". Farewell!",
                self.save_path.display()
            )?,
            Err(e) => {
                tracing::warn!(error = %e, "Save on quit failed");
                writeln!(self.output, "Could not save the game: {e}")?;
            }
        }
        Ok(SessionEnd::Saved)
    }

    /// Write-through save; failures are reported and play goes on
    fn autosave(&mut self, state: &GameState) -> Result<()> {
        if let Err(e) = snapshot::save(state, &self.save_path) {
            tracing::warn!(error = %e, year = state.year, "Autosave failed");
            writeln!(
                self.output,
                "WARNING: autosave failed ({e}); continuing without a saved copy."
            )?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn prompt(field: DecisionField) -> &'static str {
    match field {
        DecisionField::Buy => "How many acres of land do you wish to buy? ",
        DecisionField::Sell => "How many acres of land do you wish to sell? ",
        DecisionField::Eat => "How many bushels of wheat shall the people eat? ",
        DecisionField::Plant => "How many acres shall be sown? ",
    }
}
