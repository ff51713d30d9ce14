//! A generated level: the live grid handed to play and the untouched layout
//! it is restored from.

use xxhash_rust::xxh3::xxh3_64;

use crate::grid::Grid;
use crate::types::{CellKind, Pos, Tile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    grid: Grid<Tile>,
    original: Grid<CellKind>,
}

impl GeneratedLevel {
    /// Wraps a finished layout. The live grid starts as an independent copy.
    pub fn from_layout(original: Grid<CellKind>) -> Self {
        Self { grid: original.map(Tile::Cell), original }
    }

    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    pub fn original(&self) -> &Grid<CellKind> {
        &self.original
    }

    pub fn into_parts(self) -> (Grid<Tile>, Grid<CellKind>) {
        (self.grid, self.original)
    }

    pub fn gating_positions(&self) -> Vec<(CellKind, Pos)> {
        self.original
            .iter()
            .filter(|(_, kind)| kind.is_gating())
            .map(|(pos, kind)| (kind, pos))
            .collect()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16 + self.original.rows() * self.original.columns());
        bytes.extend((self.original.rows() as u64).to_le_bytes());
        bytes.extend((self.original.columns() as u64).to_le_bytes());
        for (_, kind) in self.original.iter() {
            bytes.push(match kind {
                CellKind::Empty => 0,
                CellKind::Wall => 1,
                CellKind::Key => 2,
                CellKind::Stairs => 3,
                CellKind::Enemy => 4,
                CellKind::Sword => 5,
            });
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
