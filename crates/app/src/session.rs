//! The line-based play loop: ask for a size, generate, play, offer another round.
//!
//! Input and output are plain `BufRead`/`Write` handles so a whole session can
//! be driven from a script. End of input ends the session quietly at any prompt.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use dungeon_core::mapgen::{derive_round_seed, race_generation};
use dungeon_core::{
    Dimensions, Direction, Game, GameStatus, GeneratedLevel, Generation, GenerationBudget,
    GenerationError, parse_dimension,
};
use tracing::info;

use crate::{format_fingerprint, ui_text};

/// Supplies the dungeon for each round.
pub trait LevelSource {
    fn level(
        &mut self,
        dimensions: Dimensions,
        round: u32,
    ) -> Result<GeneratedLevel, GenerationError>;
}

impl<S: LevelSource + ?Sized> LevelSource for &mut S {
    fn level(
        &mut self,
        dimensions: Dimensions,
        round: u32,
    ) -> Result<GeneratedLevel, GenerationError> {
        (**self).level(dimensions, round)
    }
}

/// Races worker threads for every round, each round on its own derived seed.
pub struct RacingSource {
    workers: usize,
    seed: u64,
    budget: GenerationBudget,
}

impl RacingSource {
    pub fn new(workers: usize, seed: u64, budget: GenerationBudget) -> Self {
        Self { workers, seed, budget }
    }
}

impl LevelSource for RacingSource {
    fn level(
        &mut self,
        dimensions: Dimensions,
        round: u32,
    ) -> Result<GeneratedLevel, GenerationError> {
        let round_seed = derive_round_seed(self.seed, round);
        let Generation { level, attempts, worker } =
            race_generation(dimensions, self.workers, round_seed, self.budget)?;
        info!(
            round,
            round_seed,
            attempts,
            worker,
            fingerprint = %format_fingerprint(level.fingerprint()),
            "dungeon ready"
        );
        Ok(level)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Rounds played to a win or a loss.
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
}

pub struct Session<R, W, S> {
    input: R,
    output: W,
    source: S,
    fixed_size: Option<Dimensions>,
}

impl<R: BufRead, W: Write, S: LevelSource> Session<R, W, S> {
    /// With `fixed_size` set, every round uses it and the size prompts are skipped.
    pub fn new(input: R, output: W, source: S, fixed_size: Option<Dimensions>) -> Self {
        Self { input, output, source, fixed_size }
    }

    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        loop {
            let Some(dimensions) = self.dimensions()? else {
                break;
            };
            writeln!(self.output, "{}", ui_text::GENERATING)?;
            let level = self
                .source
                .level(dimensions, summary.rounds)
                .with_context(|| {
                    format!(
                        "failed to generate a {}x{} dungeon",
                        dimensions.rows(),
                        dimensions.columns()
                    )
                })?;

            let Some(status) = self.play(level)? else {
                break;
            };
            summary.rounds += 1;
            match status {
                GameStatus::Won => summary.wins += 1,
                GameStatus::Lost => summary.losses += 1,
                GameStatus::Ongoing => {}
            }

            match self.prompt(ui_text::AGAIN_PROMPT)? {
                Some(answer) if !answer.trim().is_empty() => {}
                _ => break,
            }
        }
        Ok(summary)
    }

    fn dimensions(&mut self) -> Result<Option<Dimensions>> {
        if let Some(dimensions) = self.fixed_size {
            return Ok(Some(dimensions));
        }
        loop {
            let Some(columns) = self.ask_dimension(ui_text::COLUMNS_PROMPT)? else {
                return Ok(None);
            };
            let Some(rows) = self.ask_dimension(ui_text::ROWS_PROMPT)? else {
                return Ok(None);
            };
            match Dimensions::new(rows, columns) {
                Ok(dimensions) => return Ok(Some(dimensions)),
                Err(error) => writeln!(self.output, "{error}")?,
            }
        }
    }

    fn ask_dimension(&mut self, prompt: &str) -> Result<Option<usize>> {
        loop {
            let Some(answer) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match parse_dimension(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(error) => writeln!(self.output, "{error}")?,
            }
        }
    }

    /// Plays one round. `None` means input ran out before the round finished.
    fn play(&mut self, level: GeneratedLevel) -> Result<Option<GameStatus>> {
        let mut game = Game::new(level);
        writeln!(self.output, "{}", ui_text::WELCOME)?;
        let legend = format!("{}\n", ui_text::legend());
        if self.prompt(&legend)?.is_none() {
            return Ok(None);
        }
        writeln!(self.output, "{}", game.render())?;

        while game.status() == GameStatus::Ongoing {
            let Some(answer) = self.prompt(ui_text::MOVE_PROMPT)? else {
                return Ok(None);
            };
            let direction = match answer.parse::<Direction>() {
                Ok(direction) => direction,
                Err(error) => {
                    writeln!(self.output, "{error}")?;
                    continue;
                }
            };
            let turn = game.step(direction);
            if let Some(event) = turn.event {
                writeln!(self.output, "{}", ui_text::announcement(event))?;
            }
            writeln!(self.output, "{}", turn.board)?;
        }

        writeln!(self.output, "{}", ui_text::outcome_text(game.status(), game.moves()))?;
        Ok(Some(game.status()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
