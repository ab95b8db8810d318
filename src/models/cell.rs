use super::Point;

/// Cardinal neighbour direction, in the fixed order up, right, down, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Previous row
    Up = 0,
    /// Next column
    Right = 1,
    /// Next row
    Down = 2,
    /// Previous column
    Left = 3,
}

impl Direction {
    /// All directions in mask order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Position in the adjacency mask
    pub fn index(self) -> usize {
        self as usize
    }

    /// (row, col) step towards the neighbour
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Grid coordinate of one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    /// Row (y / side)
    pub row: usize,
    /// Column (x / side)
    pub col: usize,
}

impl Cell {
    /// Create a cell from column and row
    pub fn new(col: usize, row: usize) -> Self {
        Self { row, col }
    }

    /// Cell holding a pixel whose top-left corner is `origin`.
    ///
    /// Returns `None` for negative coordinates or a non-positive side.
    pub fn from_position(origin: Point, side: i32) -> Option<Self> {
        if side <= 0 || origin.x < 0 || origin.y < 0 {
            return None;
        }
        Some(Self::new(
            (origin.x / side) as usize,
            (origin.y / side) as usize,
        ))
    }

    /// Neighbouring cell, or `None` when it would leave the non-negative quadrant.
    pub fn step(&self, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Cell::new(col, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_order() {
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(Direction::Up.offset(), (-1, 0));
        assert_eq!(Direction::Left.offset(), (0, -1));
    }

    #[test]
    fn test_cell_from_position() {
        assert_eq!(
            Cell::from_position(Point::new(32, 16), 16),
            Some(Cell::new(2, 1))
        );
        assert_eq!(
            Cell::from_position(Point::new(40, 20), 16),
            Some(Cell::new(2, 1))
        );
        assert_eq!(Cell::from_position(Point::new(-16, 0), 16), None);
        assert_eq!(Cell::from_position(Point::new(0, 0), 0), None);
    }

    #[test]
    fn test_cell_step() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Right), Some(Cell::new(1, 0)));
        assert_eq!(origin.step(Direction::Down), Some(Cell::new(0, 1)));
    }
}
