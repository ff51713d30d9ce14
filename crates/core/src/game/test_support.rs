//! Shared fixtures for the `game` test suites.

use crate::grid::Grid;
use crate::mapgen::GeneratedLevel;
use crate::state::PlayerState;
use crate::types::{CellKind, Pos, Tile};

pub(crate) const SCENARIO_LAYOUT: &str = "~ ~ ?
                                          ~ ! ~
                                          $ ~ ^";

pub(crate) fn level_from(layout: &str) -> GeneratedLevel {
    GeneratedLevel::from_layout(layout.parse().expect("fixture layout should parse"))
}

fn live_parts(layout: &str) -> (Grid<Tile>, Grid<CellKind>, PlayerState) {
    let (mut grid, original) = level_from(layout).into_parts();
    grid[Pos::ORIGIN] = Tile::Marker;
    (grid, original, PlayerState::default())
}

/// Sword (0,2), enemy (1,1), key (2,0), stairs (2,2); everything else empty.
pub(crate) fn scenario_fixture() -> (Grid<Tile>, Grid<CellKind>, PlayerState) {
    live_parts(SCENARIO_LAYOUT)
}

/// The entrance is boxed in on its open sides.
pub(crate) fn walled_fixture() -> (Grid<Tile>, Grid<CellKind>, PlayerState) {
    live_parts(
        "~ | ?
         | ! ~
         $ ~ ^",
    )
}
