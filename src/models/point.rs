/// Integer point in SVG user units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate point by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Step `distance` units from this point along the axis-aligned
    /// direction of `target`.
    pub fn toward(&self, target: &Point, distance: i32) -> Self {
        self.translate(
            (target.x - self.x).signum() * distance,
            (target.y - self.y).signum() * distance,
        )
    }
}

/// Signed polygon area via the shoelace formula.
///
/// Positive for clockwise winding in SVG's y-down coordinates.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    twice_area as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toward() {
        let corner = Point::new(16, 16);
        assert_eq!(corner.toward(&Point::new(0, 16), 8), Point::new(8, 16));
        assert_eq!(corner.toward(&Point::new(16, 0), 8), Point::new(16, 8));
    }

    #[test]
    fn test_signed_area_of_square() {
        let square = [
            Point::new(0, 0),
            Point::new(16, 0),
            Point::new(16, 16),
            Point::new(0, 16),
        ];
        assert_eq!(signed_area(&square), 256.0);
        assert_eq!(signed_area(&square[..2]), 0.0);
    }
}
