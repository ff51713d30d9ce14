//! A single run through a generated level, driven one move at a time.

mod movement;
#[cfg(test)]
mod test_support;

use tracing::debug;

use crate::grid::Grid;
use crate::mapgen::GeneratedLevel;
use crate::state::PlayerState;
use crate::types::{CellKind, Direction, GameEvent, GameStatus, MoveDescriptor, Pos, Tile};

pub use movement::{MoveOutcome, apply_move};

/// Result of one requested move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// The grid rendered after the move.
    pub board: String,
    pub status: GameStatus,
    pub moved: bool,
    pub event: Option<GameEvent>,
}

#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid<Tile>,
    original: Grid<CellKind>,
    player: PlayerState,
    status: GameStatus,
    moves: u32,
}

impl Game {
    pub fn new(level: GeneratedLevel) -> Self {
        let (mut grid, original) = level.into_parts();
        grid[Pos::ORIGIN] = Tile::Marker;
        Self {
            grid,
            original,
            player: PlayerState::default(),
            status: GameStatus::Ongoing,
            moves: 0,
        }
    }

    /// Moves the player one cell. Once the run is over further moves change
    /// nothing.
    pub fn step(&mut self, direction: Direction) -> Turn {
        if self.status != GameStatus::Ongoing {
            return self.turn(MoveOutcome::default());
        }

        let descriptor = MoveDescriptor::for_grid(direction, &self.grid);
        let outcome = apply_move(&mut self.grid, &self.original, &mut self.player, descriptor);
        if outcome.moved {
            self.moves += 1;
        }
        if let Some(event) = outcome.event {
            debug!(?event, row = self.player.pos.row, col = self.player.pos.col, "cell event");
            match event {
                GameEvent::Slain => self.status = GameStatus::Lost,
                GameEvent::Escaped => self.status = GameStatus::Won,
                GameEvent::SwordObtained | GameEvent::KeyObtained | GameEvent::EnemyDefeated => {}
            }
        }
        self.turn(outcome)
    }

    pub fn render(&self) -> String {
        self.grid.to_string()
    }

    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    pub fn original(&self) -> &Grid<CellKind> {
        &self.original
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Moves that changed the player's position.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    fn turn(&self, outcome: MoveOutcome) -> Turn {
        Turn {
            board: self.render(),
            status: self.status,
            moved: outcome.moved,
            event: outcome.event,
        }
    }
}
