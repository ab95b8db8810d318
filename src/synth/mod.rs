//! Replacement shapes for classified pixels
//!
//! Each occupied cell is rewritten according to how many of its four
//! neighbours are occupied:
//! - 0: a circle
//! - 1: a circle plus a half panel joining the neighbour
//! - 2 at a right angle: a circle plus the square with its free corner cut
//! - anything else: the square is kept

/// Corner lookup and corner-cut polygons
pub mod corner;
/// Registration (finder) mark overlays
pub mod registration;

pub use corner::{Corner, cut_corner};
pub use registration::{mark_centers, registration_mark};

use crate::config::RoundConfig;
use crate::grid::Adjacency;
use crate::models::{Attributes, Direction, Geometry, Rect, Shape};

/// What happens to one pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Leave the square as it is
    Keep,
    /// No neighbours: a lone dot
    Isolated {
        /// Circle filling the cell
        circle: Shape,
    },
    /// One neighbour: a rounded stub
    End {
        /// Circle rounding the far half
        circle: Shape,
        /// Half panel joining the neighbour
        panel: Shape,
    },
    /// Two perpendicular neighbours: a rounded corner
    Corner {
        /// Circle rounding the cut corner
        circle: Shape,
        /// Square with the opposite corner cut off
        polygon: Shape,
    },
}

impl Replacement {
    /// New shapes in paint order
    pub fn into_shapes(self) -> Vec<Shape> {
        match self {
            Replacement::Keep => Vec::new(),
            Replacement::Isolated { circle } => vec![circle],
            Replacement::End { circle, panel } => vec![circle, panel],
            Replacement::Corner { circle, polygon } => vec![circle, polygon],
        }
    }
}

/// Decide the replacement for one pixel square.
///
/// `attrs` are the square's pass-through attributes; every new shape
/// receives a copy.
pub fn synthesize(
    square: &Rect,
    attrs: &Attributes,
    adjacency: &Adjacency,
    config: &RoundConfig,
) -> Replacement {
    let radius = config.radius();
    let center = square.origin.translate(radius, radius);
    let circle = || Shape::circle(center, radius, attrs.clone());

    let directions: Vec<Direction> = adjacency.directions().collect();
    match directions.as_slice() {
        [] => Replacement::Isolated { circle: circle() },
        [direction] => Replacement::End {
            circle: circle(),
            panel: Shape::new(
                Geometry::HalfPanel(half_panel(square, *direction, config)),
                attrs.clone(),
            ),
        },
        [a, b] => match Corner::opposite_to(*a, *b) {
            Some(corner) => Replacement::Corner {
                circle: circle(),
                polygon: Shape::new(
                    Geometry::CornerPolygon(cut_corner(square, corner, radius)),
                    attrs.clone(),
                ),
            },
            None => Replacement::Keep,
        },
        _ => Replacement::Keep,
    }
}

/// The half of the square on the neighbour's side; the circle rounds the
/// other half.
fn half_panel(square: &Rect, toward: Direction, config: &RoundConfig) -> Rect {
    let side = config.side;
    let radius = config.radius();
    let Rect { origin, .. } = *square;
    match toward {
        Direction::Right => Rect::new(origin.x + radius, origin.y, radius, side),
        Direction::Left => Rect::new(origin.x, origin.y, radius, side),
        Direction::Down => Rect::new(origin.x, origin.y + radius, side, radius),
        Direction::Up => Rect::new(origin.x, origin.y, side, radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Point, ShapeKind};

    fn style() -> Attributes {
        let mut attrs = Attributes::new();
        attrs.set("style", "fill:#222");
        attrs
    }

    fn run(directions: &[Direction]) -> Replacement {
        synthesize(
            &Rect::new(16, 16, 16, 16),
            &style(),
            &Adjacency::from_directions(directions),
            &RoundConfig::default(),
        )
    }

    #[test]
    fn test_isolated_becomes_circle() {
        let shapes = run(&[]).into_shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0], Shape::circle(Point::new(24, 24), 8, style()));
    }

    #[test]
    fn test_end_panels_face_the_neighbour() {
        let cases = [
            (Direction::Right, Rect::new(24, 16, 8, 16)),
            (Direction::Left, Rect::new(16, 16, 8, 16)),
            (Direction::Down, Rect::new(16, 24, 16, 8)),
            (Direction::Up, Rect::new(16, 16, 16, 8)),
        ];
        for (direction, expected) in cases {
            let Replacement::End { circle, panel } = run(&[direction]) else {
                panic!("expected an end for {:?}", direction);
            };
            assert_eq!(circle.kind(), ShapeKind::Circle);
            assert_eq!(panel.geometry, Geometry::HalfPanel(expected), "{:?}", direction);
            assert_eq!(panel.attrs, style());
        }
    }

    #[test]
    fn test_perpendicular_pair_cuts_corner() {
        let Replacement::Corner { circle, polygon } = run(&[Direction::Down, Direction::Right])
        else {
            panic!("expected a corner");
        };
        assert_eq!(circle, Shape::circle(Point::new(24, 24), 8, style()));
        let Geometry::CornerPolygon(poly) = polygon.geometry else {
            panic!("expected a polygon");
        };
        assert_eq!(poly.points.len(), 5);
        assert_eq!(poly.points[0], Point::new(16, 24));
        assert_eq!(poly.points[1], Point::new(24, 16));
    }

    #[test]
    fn test_colinear_pair_is_kept() {
        assert_eq!(run(&[Direction::Up, Direction::Down]), Replacement::Keep);
        assert_eq!(run(&[Direction::Left, Direction::Right]), Replacement::Keep);
    }

    #[test]
    fn test_three_or_four_neighbours_are_kept() {
        assert_eq!(run(&[Direction::Up, Direction::Right, Direction::Down]), Replacement::Keep);
        assert_eq!(run(&Direction::ALL), Replacement::Keep);
    }
}
