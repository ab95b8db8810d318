use super::point::{Point, signed_area};

/// Attribute keys that define a square's geometry and are never passed through.
pub const GEOMETRY_KEYS: [&str; 4] = ["x", "y", "width", "height"];

/// Ordered attribute map, preserving document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Value of `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite, keeping the original position of an existing key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Key/value pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Numeric attribute; missing or malformed values read as 0.
    pub fn get_f64(&self, key: &str) -> f64 {
        self.get(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Numeric attribute truncated toward zero.
    pub fn get_i32(&self, key: &str) -> i32 {
        self.get_f64(key) as i32
    }

    /// Copy of every attribute except the geometry keys.
    pub fn pass_through(&self) -> Attributes {
        Attributes(
            self.0
                .iter()
                .filter(|(k, _)| !GEOMETRY_KEYS.contains(&k.as_str()))
                .cloned()
                .collect(),
        )
    }
}

impl From<Vec<(String, String)>> for Attributes {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Top-left corner
    pub origin: Point,
    /// Extent along x
    pub width: i32,
    /// Extent along y
    pub height: i32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// Both sides equal `side`
    pub fn is_square_of(&self, side: i32) -> bool {
        self.width == side && self.height == side
    }

    /// Corners in winding order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let o = self.origin;
        [
            o,
            o.translate(self.width, 0),
            o.translate(self.width, self.height),
            o.translate(0, self.height),
        ]
    }
}

/// Circle given by centre and radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    /// Centre point
    pub center: Point,
    /// Radius
    pub r: i32,
}

/// Closed polygon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    /// Vertices in drawing order
    pub points: Vec<Point>,
}

impl Polygon {
    /// Unsigned area enclosed by the vertices
    pub fn area(&self) -> f64 {
        signed_area(&self.points).abs()
    }
}

/// Bullseye overlay: masked outer ring plus a solid inner disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationMark {
    /// Centre shared by every disk of the mark
    pub center: Point,
    /// Radius of the outer disk
    pub outer: i32,
    /// Radius of the hole cut by the mask
    pub hole: i32,
    /// Radius of the inner disk
    pub inner: i32,
    /// Id of the mask cutting the hole
    pub mask_id: String,
}

/// Mask definition living in the document's `<defs>`.
///
/// White background square with a black (transparent) disk in the middle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskDef {
    /// Element id referenced as `url(#id)`
    pub id: String,
    /// Centre of the mark being masked
    pub center: Point,
    /// Half the edge of the white background square
    pub half_extent: i32,
    /// Radius of the black disk
    pub hole: i32,
}

impl MaskDef {
    /// White background square covering the whole mark
    pub fn background(&self) -> Rect {
        let edge = 2 * self.half_extent;
        Rect::new(
            self.center.x - self.half_extent,
            self.center.y - self.half_extent,
            edge,
            edge,
        )
    }
}

/// Geometry of a shape, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Geometry {
    /// An original `side`x`side` pixel
    Square(Rect),
    /// A rounding circle
    Circle(Circle),
    /// Half of a pixel left opaque next to a rounding circle
    HalfPanel(Rect),
    /// A pixel with one corner cut diagonally
    CornerPolygon(Polygon),
    /// A bullseye finder mark
    RegistrationMark(RegistrationMark),
}

/// Discriminant of [`Geometry`], handy for tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// [`Geometry::Square`]
    Square,
    /// [`Geometry::Circle`]
    Circle,
    /// [`Geometry::HalfPanel`]
    HalfPanel,
    /// [`Geometry::CornerPolygon`]
    CornerPolygon,
    /// [`Geometry::RegistrationMark`]
    RegistrationMark,
}

/// Immutable shape: geometry plus pass-through attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    /// What is drawn
    pub geometry: Geometry,
    /// Presentation attributes written alongside the geometry
    pub attrs: Attributes,
}

impl Shape {
    /// Create a shape from geometry and attributes
    pub fn new(geometry: Geometry, attrs: Attributes) -> Self {
        Self { geometry, attrs }
    }

    /// Shorthand for a [`Geometry::Circle`] shape
    pub fn circle(center: Point, r: i32, attrs: Attributes) -> Self {
        Self::new(Geometry::Circle(Circle { center, r }), attrs)
    }

    /// Which variant the geometry is
    pub fn kind(&self) -> ShapeKind {
        match self.geometry {
            Geometry::Square(_) => ShapeKind::Square,
            Geometry::Circle(_) => ShapeKind::Circle,
            Geometry::HalfPanel(_) => ShapeKind::HalfPanel,
            Geometry::CornerPolygon(_) => ShapeKind::CornerPolygon,
            Geometry::RegistrationMark(_) => ShapeKind::RegistrationMark,
        }
    }

    /// The rectangle of a [`Geometry::Square`]
    pub fn as_square(&self) -> Option<&Rect> {
        match &self.geometry {
            Geometry::Square(rect) => Some(rect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        Attributes::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_tolerant_numeric_parse() {
        let a = attrs(&[("x", "16.9"), ("y", "oops"), ("width", " 16 ")]);
        assert_eq!(a.get_i32("x"), 16);
        assert_eq!(a.get_i32("y"), 0);
        assert_eq!(a.get_i32("width"), 16);
        assert_eq!(a.get_i32("height"), 0);
        assert_eq!(attrs(&[("x", "-3.7")]).get_i32("x"), -3);
        assert_eq!(attrs(&[("x", "NaN")]).get_i32("x"), 0);
    }

    #[test]
    fn test_pass_through_drops_geometry() {
        let a = attrs(&[
            ("x", "0"),
            ("style", "fill:#111"),
            ("width", "16"),
            ("class", "px"),
            ("height", "16"),
            ("y", "0"),
        ]);
        let kept = a.pass_through();
        let keys: Vec<&str> = kept.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["style", "class"]);
    }

    #[test]
    fn test_set_keeps_position() {
        let mut a = attrs(&[("fill", "red"), ("class", "px")]);
        a.set("fill", "blue");
        a.set("id", "p1");
        let pairs: Vec<(&str, &str)> = a.iter().collect();
        assert_eq!(pairs, vec![("fill", "blue"), ("class", "px"), ("id", "p1")]);
    }

    #[test]
    fn test_rect_corners_wind_clockwise() {
        let rect = Rect::new(16, 32, 16, 16);
        let corners = rect.corners();
        assert_eq!(corners[0], Point::new(16, 32));
        assert_eq!(corners[2], Point::new(32, 48));
        assert_eq!(signed_area(&corners), 256.0);
    }

    #[test]
    fn test_mask_background() {
        let mask = MaskDef {
            id: "mask_56_56".into(),
            center: Point::new(56, 56),
            half_extent: 112,
            hole: 40,
        };
        assert_eq!(mask.background(), Rect::new(-56, -56, 224, 224));
    }
}
