//! Reachability validation for freshly generated layouts.
//!
//! A depth-first search walks a private copy of the layout from the entrance,
//! trying neighbours left, right, up, down. Gating cells impose a strict order:
//! the sword first, then the enemy, then the key and the stairs. The layout is
//! accepted as soon as all four have been reached.
//!
//! Two pieces of search state are shared by every branch rather than undone on
//! backtrack: the visited set and the prerequisite flags. A position explored
//! by one branch is never re-entered by a sibling, and an item picked up on a
//! dead end still counts later. Generated outcomes depend on this, so it is
//! kept as is.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::types::{CellKind, Direction, MoveDescriptor, Pos, Tile};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Prerequisites {
    key: bool,
    stairs: bool,
    enemy: bool,
    sword: bool,
}

impl Prerequisites {
    fn satisfy(&mut self, kind: CellKind) {
        match kind {
            CellKind::Key => self.key = true,
            CellKind::Stairs => self.stairs = true,
            CellKind::Enemy => self.enemy = true,
            CellKind::Sword => self.sword = true,
            CellKind::Empty | CellKind::Wall => {}
        }
    }

    fn armed_and_cleared(&self) -> bool {
        self.sword && self.enemy
    }

    fn all(&self) -> bool {
        self.key && self.stairs && self.enemy && self.sword
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub solvable: bool,
    /// Distinct positions the search entered, the entrance included.
    pub explored: usize,
}

/// Returns whether the layout can be completed in the required order.
pub fn validate(layout: &Grid<CellKind>) -> bool {
    inspect(layout).solvable
}

pub fn inspect(layout: &Grid<CellKind>) -> ValidationReport {
    let mut search = Search::new(layout);
    let solvable = search.run();
    ValidationReport { solvable, explored: search.visited.len() }
}

struct Frame {
    pos: Pos,
    next_direction: usize,
}

impl Frame {
    fn new(pos: Pos) -> Self {
        Self { pos, next_direction: 0 }
    }
}

struct Search {
    working: Grid<Tile>,
    visited: BTreeSet<Pos>,
    flags: Prerequisites,
}

impl Search {
    fn new(layout: &Grid<CellKind>) -> Self {
        Self {
            working: layout.map(Tile::Cell),
            visited: BTreeSet::from([Pos::ORIGIN]),
            flags: Prerequisites::default(),
        }
    }

    /// Explicit-stack depth-first search; each frame remembers which
    /// direction it tries next.
    fn run(&mut self) -> bool {
        let mut frames = vec![Frame::new(Pos::ORIGIN)];
        while let Some(frame) = frames.last_mut() {
            let Some(&direction) = Direction::SEARCH_ORDER.get(frame.next_direction) else {
                frames.pop();
                continue;
            };
            frame.next_direction += 1;
            let from = frame.pos;

            let Some(next) = self.try_step(from, direction) else {
                continue;
            };
            if !self.visited.insert(next) {
                continue;
            }
            if self.flags.all() {
                return true;
            }
            frames.push(Frame::new(next));
        }
        false
    }

    /// Checks one move against the ordering rules. An accepted move updates
    /// the flags and marks the cell being left, even if the destination turns
    /// out to be visited already.
    fn try_step(&mut self, from: Pos, direction: Direction) -> Option<Pos> {
        let step = MoveDescriptor::for_grid(direction, &self.working);
        if step.is_blocked_at(from) {
            return None;
        }
        let next = step.destination(from);
        match self.working[next].kind() {
            CellKind::Wall => return None,
            CellKind::Enemy if !self.flags.sword => return None,
            CellKind::Key | CellKind::Stairs if !self.flags.armed_and_cleared() => return None,
            kind => self.flags.satisfy(kind),
        }
        self.working[from] = Tile::Marker;
        Some(next)
    }
}
