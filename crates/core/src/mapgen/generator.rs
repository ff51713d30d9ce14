//! Random layout generation: wall noise plus the four gating cells.

use crate::grid::{Dimensions, Grid};
use crate::types::{CellKind, Pos};

use super::model::GeneratedLevel;
use super::random::RandomSource;

pub struct MapGenerator {
    dimensions: Dimensions,
}

impl MapGenerator {
    pub fn new(dimensions: Dimensions) -> Self {
        Self { dimensions }
    }

    pub fn generate(&self, rng: &mut impl RandomSource) -> GeneratedLevel {
        let rows = self.dimensions.rows();
        let columns = self.dimensions.columns();
        let mut layout = Grid::from_fn(rows, columns, |_| {
            if rng.below(2) == 0 { CellKind::Empty } else { CellKind::Wall }
        });

        let mut placed = Vec::with_capacity(CellKind::GATING.len());
        for kind in CellKind::GATING {
            let pos = self.sample_gating_position(rng, &placed);
            layout[pos] = kind;
            placed.push(pos);
        }
        layout[Pos::ORIGIN] = CellKind::Empty;

        GeneratedLevel::from_layout(layout)
    }

    fn sample_gating_position(&self, rng: &mut impl RandomSource, placed: &[Pos]) -> Pos {
        loop {
            let candidate = Pos {
                row: rng.below(self.dimensions.rows()),
                col: rng.below(self.dimensions.columns()),
            };
            if candidate != Pos::ORIGIN
                && !placed.contains(&candidate)
                && self.dimensions.is_far_enough(candidate)
            {
                return candidate;
            }
        }
    }
}
