//! Parsing of the line-based player input. Each function validates a single
//! answer; re-prompting is up to the caller.

use std::str::FromStr;

use thiserror::Error;

use crate::grid::MAX_SIDE;
use crate::types::Direction;

/// Smallest side length accepted at the prompt.
pub const MIN_PROMPT_SIDE: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a move; use l, r, u or d")]
    UnknownDirection(String),
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
    #[error("{0} is too small; must be greater than {max}", max = MIN_PROMPT_SIDE - 1)]
    TooSmall(usize),
    #[error("{0} is too large; must be at most {max}", max = MAX_SIDE)]
    TooLarge(usize),
}

impl FromStr for Direction {
    type Err = InputError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Direction::Left),
            "r" | "right" => Ok(Direction::Right),
            "u" | "up" => Ok(Direction::Up),
            "d" | "down" => Ok(Direction::Down),
            other => Err(InputError::UnknownDirection(other.to_string())),
        }
    }
}

pub fn parse_dimension(raw: &str) -> Result<usize, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(InputError::NotANumber(trimmed.to_string()));
    }
    let value = trimmed.parse().map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    if value < MIN_PROMPT_SIDE {
        return Err(InputError::TooSmall(value));
    }
    if value > MAX_SIDE {
        return Err(InputError::TooLarge(value));
    }
    Ok(value)
}
