use serde::Serialize;

use crate::grid::Grid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    /// The entrance. Every run starts here and the cell is always empty.
    pub const ORIGIN: Pos = Pos { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    fn coordinate(self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row,
            Axis::Column => self.col,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CellKind {
    Empty,
    Wall,
    Key,
    Stairs,
    Enemy,
    Sword,
}

impl CellKind {
    /// Gating cells in placement order.
    pub const GATING: [CellKind; 4] =
        [CellKind::Key, CellKind::Stairs, CellKind::Enemy, CellKind::Sword];

    pub fn is_gating(self) -> bool {
        !matches!(self, CellKind::Empty | CellKind::Wall)
    }

    pub fn symbol(self) -> char {
        match self {
            CellKind::Empty => '~',
            CellKind::Wall => '|',
            CellKind::Key => '$',
            CellKind::Stairs => '^',
            CellKind::Enemy => '!',
            CellKind::Sword => '?',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '~' => Some(CellKind::Empty),
            '|' => Some(CellKind::Wall),
            '$' => Some(CellKind::Key),
            '^' => Some(CellKind::Stairs),
            '!' => Some(CellKind::Enemy),
            '?' => Some(CellKind::Sword),
            _ => None,
        }
    }
}

/// What a cell of a live grid shows: its kind, or the marker left by the
/// player (in play) or by the reachability search (on its working copy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Cell(CellKind),
    Marker,
}

impl Tile {
    pub const MARKER_SYMBOL: char = '.';

    /// A marker behaves exactly like an empty cell.
    pub fn kind(self) -> CellKind {
        match self {
            Tile::Cell(kind) => kind,
            Tile::Marker => CellKind::Empty,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Tile::Cell(kind) => kind.symbol(),
            Tile::Marker => Self::MARKER_SYMBOL,
        }
    }
}

impl From<CellKind> for Tile {
    fn from(kind: CellKind) -> Self {
        Tile::Cell(kind)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::Row => 0,
            Axis::Column => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Order in which the reachability search tries neighbours.
    pub const SEARCH_ORDER: [Direction; 4] =
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Column,
            Direction::Up | Direction::Down => Axis::Row,
        }
    }

    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// A single step along one axis, bounded by the last reachable coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveDescriptor {
    axis: Axis,
    forward: bool,
    cap: usize,
}

impl MoveDescriptor {
    pub fn new(direction: Direction, rows: usize, columns: usize) -> Self {
        let axis = direction.axis();
        let forward = direction.is_forward();
        let cap = match (axis, forward) {
            (_, false) => 0,
            (Axis::Row, true) => rows.saturating_sub(1),
            (Axis::Column, true) => columns.saturating_sub(1),
        };
        Self { axis, forward, cap }
    }

    pub fn for_grid<T>(direction: Direction, grid: &Grid<T>) -> Self {
        Self::new(direction, grid.rows(), grid.columns())
    }

    pub fn axis(self) -> Axis {
        self.axis
    }

    pub fn delta(self) -> isize {
        if self.forward { 1 } else { -1 }
    }

    pub fn cap(self) -> usize {
        self.cap
    }

    pub fn is_blocked_at(self, pos: Pos) -> bool {
        pos.coordinate(self.axis) == self.cap
    }

    /// Destination of the step. Callers check `is_blocked_at` first.
    pub fn destination(self, pos: Pos) -> Pos {
        debug_assert!(!self.is_blocked_at(pos));
        let shift = |value: usize| if self.forward { value + 1 } else { value - 1 };
        match self.axis {
            Axis::Row => Pos { row: shift(pos.row), col: pos.col },
            Axis::Column => Pos { row: pos.row, col: shift(pos.col) },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    SwordObtained,
    KeyObtained,
    EnemyDefeated,
    Slain,
    Escaped,
}
