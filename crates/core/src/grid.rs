//! Row-major grid storage, requested dungeon dimensions, and the text form
//! used to render grids one symbol per cell.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use thiserror::Error;

use crate::types::{CellKind, Pos, Tile};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(rows: usize, columns: usize, value: T) -> Self {
        Self { rows, columns, cells: vec![value; rows * columns] }
    }

    /// Builds a grid by visiting positions in row-major order.
    pub fn from_fn(rows: usize, columns: usize, mut cell: impl FnMut(Pos) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                cells.push(cell(Pos { row, col }));
            }
        }
        Self { rows, columns, cells }
    }

    pub fn get(&self, pos: Pos) -> Option<T> {
        self.contains(pos).then(|| self.cells[self.offset(pos)])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, T)> + '_ {
        self.cells.iter().enumerate().map(|(index, &cell)| {
            (Pos { row: index / self.columns, col: index % self.columns }, cell)
        })
    }

    pub fn map<U: Copy>(&self, mut convert: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.iter().map(|&cell| convert(cell)).collect(),
        }
    }

    fn offset(&self, pos: Pos) -> usize {
        pos.row * self.columns + pos.col
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|&&cell| cell == value).count()
    }

    pub fn position_of(&self, value: T) -> Option<Pos> {
        self.iter().find(|&(_, cell)| cell == value).map(|(pos, _)| pos)
    }
}

impl<T: Copy> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        assert!(self.contains(pos), "position {pos:?} outside {}x{} grid", self.rows, self.columns);
        &self.cells[self.offset(pos)]
    }
}

impl<T: Copy> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut T {
        assert!(self.contains(pos), "position {pos:?} outside {}x{} grid", self.rows, self.columns);
        let offset = self.offset(pos);
        &mut self.cells[offset]
    }
}

trait Symbol: Copy {
    fn symbol(self) -> char;
}

impl Symbol for CellKind {
    fn symbol(self) -> char {
        CellKind::symbol(self)
    }
}

impl Symbol for Tile {
    fn symbol(self) -> char {
        Tile::symbol(self)
    }
}

fn write_symbols<T: Symbol>(grid: &Grid<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (row, line) in grid.cells.chunks(grid.columns.max(1)).enumerate() {
        if row > 0 {
            writeln!(f)?;
        }
        for (col, &cell) in line.iter().enumerate() {
            if col > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", cell.symbol())?;
        }
    }
    Ok(())
}

impl fmt::Display for Grid<CellKind> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_symbols(self, f)
    }
}

impl fmt::Display for Grid<Tile> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_symbols(self, f)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridParseError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unknown cell symbol '{symbol}' in row {row}")]
    UnknownSymbol { row: usize, symbol: char },
}

/// Parses the rendered form: one line per row, cells separated by whitespace.
impl FromStr for Grid<CellKind> {
    type Err = GridParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut columns = None;
        let mut cells = Vec::new();
        let mut rows = 0;
        for (row, line) in text.lines().map(str::trim).filter(|line| !line.is_empty()).enumerate() {
            let parsed = line
                .split_whitespace()
                .flat_map(str::chars)
                .map(|symbol| {
                    CellKind::from_symbol(symbol)
                        .ok_or(GridParseError::UnknownSymbol { row, symbol })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let expected = *columns.get_or_insert(parsed.len());
            if parsed.len() != expected {
                return Err(GridParseError::RaggedRow { row, expected, found: parsed.len() });
            }
            cells.extend(parsed);
            rows += 1;
        }
        match columns {
            Some(columns) if columns > 0 => Ok(Self { rows, columns, cells }),
            _ => Err(GridParseError::Empty),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DimensionError {
    #[error("a dungeon needs at least one row and one column")]
    Degenerate,
    #[error(
        "a {rows}x{columns} dungeon is too large; each side may be at most {max}",
        max = MAX_SIDE
    )]
    TooLarge { rows: usize, columns: usize },
    #[error(
        "a {rows}x{columns} dungeon has {candidates} cell(s) far enough from the entrance, \
         but the key, stairs, enemy and sword need four"
    )]
    NoRoomForGatingCells { rows: usize, columns: usize, candidates: usize },
}

/// Longest side a dungeon may have.
pub const MAX_SIDE: usize = 1000;

/// Size of a dungeon that is known to have room for every gating cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    rows: usize,
    columns: usize,
}

impl Dimensions {
    pub fn new(rows: usize, columns: usize) -> Result<Self, DimensionError> {
        if rows == 0 || columns == 0 {
            return Err(DimensionError::Degenerate);
        }
        if rows > MAX_SIDE || columns > MAX_SIDE {
            return Err(DimensionError::TooLarge { rows, columns });
        }
        let dimensions = Self { rows, columns };
        let candidates = dimensions.placement_candidates(CellKind::GATING.len());
        if candidates < CellKind::GATING.len() {
            return Err(DimensionError::NoRoomForGatingCells { rows, columns, candidates });
        }
        Ok(dimensions)
    }

    pub fn rows(self) -> usize {
        self.rows
    }

    pub fn columns(self) -> usize {
        self.columns
    }

    /// Minimum-distance rule: `row + col >= 0.3 * (rows + columns)`.
    pub fn is_far_enough(self, pos: Pos) -> bool {
        10 * (pos.row + pos.col) >= 3 * (self.rows + self.columns)
    }

    /// Counts cells eligible for a gating cell, stopping once `enough` are found.
    fn placement_candidates(self, enough: usize) -> usize {
        let mut found = 0;
        for row in (0..self.rows).rev() {
            for col in (0..self.columns).rev() {
                let pos = Pos { row, col };
                if pos != Pos::ORIGIN && self.is_far_enough(pos) {
                    found += 1;
                    if found == enough {
                        return found;
                    }
                }
            }
        }
        found
    }
}
