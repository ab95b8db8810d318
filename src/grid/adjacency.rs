use crate::models::{Cell, Direction, OccupancyGrid};

/// Which cardinal neighbours of a cell are occupied, ordered up, right, down, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Adjacency {
    mask: [bool; 4],
}

impl Adjacency {
    /// Classify `cell` against the grid. Neighbours outside the grid count as empty.
    pub fn classify(grid: &OccupancyGrid, cell: Cell) -> Self {
        let mut mask = [false; 4];
        for direction in Direction::ALL {
            mask[direction.index()] = grid
                .neighbor(cell, direction)
                .is_some_and(|n| grid.is_occupied(n));
        }
        Self { mask }
    }

    /// Build from a list of present directions
    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut mask = [false; 4];
        for d in directions {
            mask[d.index()] = true;
        }
        Self { mask }
    }

    /// Number of occupied neighbours (0-4)
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&present| present).count()
    }

    /// Present directions in mask order
    pub fn directions(&self) -> impl Iterator<Item = Direction> {
        let mask = self.mask;
        Direction::ALL.into_iter().filter(move |d| mask[d.index()])
    }
}
