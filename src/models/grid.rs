use super::{Cell, Direction};
use crate::document::NodeId;

/// Largest number of rows or columns a grid may span.
///
/// Pixels beyond it are left alone instead of growing the grid without bound.
pub const MAX_GRID_DIM: usize = 1024;

/// Dense occupancy grid mapping each cell to the pixel occupying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    slots: Vec<Option<NodeId>>,
}

impl OccupancyGrid {
    /// Create an empty grid with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slots: vec![None; width * height],
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// No rows or no columns
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `cell` lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.col < self.width && cell.row < self.height
    }

    /// Handle of the pixel at `cell`; out-of-bounds cells are empty.
    pub fn get(&self, cell: Cell) -> Option<NodeId> {
        if !self.contains(cell) {
            return None;
        }
        self.slots[cell.row * self.width + cell.col]
    }

    /// A pixel sits at `cell`
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Record `node` at `cell`, returning the handle it replaced.
    ///
    /// Writes outside the grid are ignored.
    pub fn set(&mut self, cell: Cell, node: NodeId) -> Option<NodeId> {
        if !self.contains(cell) {
            return None;
        }
        self.slots[cell.row * self.width + cell.col].replace(node)
    }

    /// In-bounds neighbour of `cell`
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.step(direction).filter(|n| self.contains(*n))
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, NodeId)> + '_ {
        let width = self.width;
        self.slots.iter().enumerate().filter_map(move |(i, slot)| {
            slot.map(|node| (Cell::new(i % width, i / width), node))
        })
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Rows of 0/1, `bitmap[row][col] == 1` where a pixel sits.
    pub fn bitmap(&self) -> Vec<Vec<u8>> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| u8::from(self.is_occupied(Cell::new(col, row))))
                    .collect()
            })
            .collect()
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
