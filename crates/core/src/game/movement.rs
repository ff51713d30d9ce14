//! Applies one player move to the live grid.
//! The engine only consults the cell rules and the original layout; it knows
//! nothing about how the layout was validated.

use crate::grid::Grid;
use crate::rules::{Transit, cell_effect};
use crate::state::PlayerState;
use crate::types::{CellKind, GameEvent, MoveDescriptor, Tile};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub event: Option<GameEvent>,
}

pub fn apply_move(
    grid: &mut Grid<Tile>,
    original: &Grid<CellKind>,
    player: &mut PlayerState,
    step: MoveDescriptor,
) -> MoveOutcome {
    if step.is_blocked_at(player.pos) {
        return MoveOutcome::default();
    }

    let from = player.pos;
    let to = step.destination(from);
    let entry = cell_effect(grid[to].kind(), player, Transit::Entering);
    let exit = cell_effect(original[from], player, Transit::Leaving);

    if !entry.enter_allowed {
        return MoveOutcome { moved: false, event: entry.event };
    }

    grid[to] = Tile::Marker;
    grid[from] = if exit.revert_on_exit {
        Tile::Cell(original[from])
    } else {
        Tile::Cell(CellKind::Empty)
    };
    player.pos = to;
    MoveOutcome { moved: true, event: entry.event }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;
    use crate::types::{Direction, Pos};

    fn step(direction: Direction) -> MoveDescriptor {
        MoveDescriptor::new(direction, 3, 3)
    }

    #[test]
    fn moving_into_empty_leaves_marker_and_restores_origin() {
        let (mut grid, original, mut player) = scenario_fixture();
        let outcome = apply_move(&mut grid, &original, &mut player, step(Direction::Right));

        assert_eq!(outcome, MoveOutcome { moved: true, event: None });
        assert_eq!(player.pos, Pos::new(0, 1));
        assert_eq!(grid[Pos::new(0, 1)], Tile::Marker);
        assert_eq!(grid[Pos::ORIGIN], Tile::Cell(CellKind::Empty));
    }

    #[test]
    fn walls_block_without_side_effects() {
        let (mut grid, original, mut player) = walled_fixture();
        let before = (grid.clone(), player);
        let outcome = apply_move(&mut grid, &original, &mut player, step(Direction::Down));

        assert_eq!(outcome, MoveOutcome::default());
        assert_eq!((grid, player), before);
    }

    #[test]
    fn boundary_moves_are_ignored() {
        let (mut grid, original, mut player) = scenario_fixture();
        let before = (grid.clone(), player);
        for direction in [Direction::Left, Direction::Up] {
            let outcome = apply_move(&mut grid, &original, &mut player, step(direction));
            assert_eq!(outcome, MoveOutcome::default());
        }
        assert_eq!((grid, player), before);
    }

    #[test]
    fn leaving_a_collected_item_empties_its_cell() {
        let (mut grid, original, mut player) = scenario_fixture();
        apply_move(&mut grid, &original, &mut player, step(Direction::Right));
        let pickup = apply_move(&mut grid, &original, &mut player, step(Direction::Right));
        assert_eq!(pickup.event, Some(GameEvent::SwordObtained));

        apply_move(&mut grid, &original, &mut player, step(Direction::Left));
        assert_eq!(grid[Pos::new(0, 2)], Tile::Cell(CellKind::Empty));
        assert_eq!(original[Pos::new(0, 2)], CellKind::Sword);
    }

    #[test]
    fn unarmed_player_dies_in_place() {
        let (mut grid, original, mut player) = scenario_fixture();
        apply_move(&mut grid, &original, &mut player, step(Direction::Down));
        let before = grid.clone();
        let outcome = apply_move(&mut grid, &original, &mut player, step(Direction::Right));

        assert_eq!(outcome, MoveOutcome { moved: false, event: Some(GameEvent::Slain) });
        assert!(player.done);
        assert_eq!(player.pos, Pos::new(1, 0));
        assert_eq!(grid, before);
    }
}
