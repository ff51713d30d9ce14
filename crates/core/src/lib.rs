pub mod game;
pub mod grid;
pub mod input;
pub mod mapgen;
pub mod rules;
pub mod state;
pub mod types;

pub use game::{Game, Turn};
pub use grid::{DimensionError, Dimensions, Grid};
pub use input::{InputError, parse_dimension};
pub use mapgen::{GeneratedLevel, Generation, GenerationBudget, GenerationError};
pub use state::PlayerState;
pub use types::*;
