use crate::models::{Direction, Polygon, Rect};

/// Corner of a pixel square, in winding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Minimum x, minimum y
    TopLeft = 0,
    /// Maximum x, minimum y
    TopRight = 1,
    /// Maximum x, maximum y
    BottomRight = 2,
    /// Minimum x, maximum y
    BottomLeft = 3,
}

/// Cut corner for every unordered pair of neighbour directions.
/// Colinear pairs have no corner to round.
const CORNER_TABLE: [((Direction, Direction), Option<Corner>); 6] = [
    ((Direction::Up, Direction::Right), Some(Corner::BottomLeft)),
    ((Direction::Up, Direction::Down), None),
    ((Direction::Up, Direction::Left), Some(Corner::BottomRight)),
    ((Direction::Right, Direction::Down), Some(Corner::TopLeft)),
    ((Direction::Right, Direction::Left), None),
    ((Direction::Down, Direction::Left), Some(Corner::TopRight)),
];

impl Corner {
    /// Position in [`Rect::corners`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The corner facing away from both neighbours, or `None` when the two
    /// neighbours sit on one axis (or are the same direction).
    pub fn opposite_to(a: Direction, b: Direction) -> Option<Corner> {
        let key = if a.index() <= b.index() { (a, b) } else { (b, a) };
        CORNER_TABLE
            .iter()
            .find(|(pair, _)| *pair == key)
            .and_then(|(_, corner)| *corner)
    }
}

/// The square's outline with `corner` cut along the chord between the two
/// points where a `radius` circle centred on the square touches its edges.
///
/// The cut corner is replaced in place by two points: first the one on the
/// edge arriving from the previous corner, then the one on the edge leaving
/// towards the next corner. The result always has five vertices.
pub fn cut_corner(rect: &Rect, corner: Corner, radius: i32) -> Polygon {
    let corners = rect.corners();
    let i = corner.index();
    let mut points = Vec::with_capacity(5);
    for (j, p) in corners.iter().enumerate() {
        if j == i {
            let prev = corners[(i + 3) % 4];
            let next = corners[(i + 1) % 4];
            points.push(p.toward(&prev, radius));
            points.push(p.toward(&next, radius));
        } else {
            points.push(*p);
        }
    }
    Polygon { points }
}
