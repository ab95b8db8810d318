/// Grid cells and neighbour directions
pub mod cell;
/// Occupancy grid of pixel cells
pub mod grid;
/// Integer points
pub mod point;
/// Shapes and their attributes
pub mod shape;

pub use cell::{Cell, Direction};
pub use grid::{MAX_GRID_DIM, OccupancyGrid};
pub use point::Point;
pub use shape::{
    Attributes, Circle, Geometry, MaskDef, Polygon, Rect, RegistrationMark, Shape, ShapeKind,
};
