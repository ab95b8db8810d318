use crate::config::RoundConfig;
use crate::models::{Attributes, Geometry, MaskDef, Point, RegistrationMark, Shape};

/// Centres of the three finder marks for a grid with `grid_height` rows:
/// top-left, top-right and bottom-left.
///
/// The centres sit `size` radii in from the edges, i.e. half a mark in.
pub fn mark_centers(grid_height: usize, config: &RoundConfig) -> [Point; 3] {
    let r = config.radius();
    let near = config.registration_size * r;
    let far = (2 * grid_height as i32 - config.registration_size) * r;
    [
        Point::new(near, near),
        Point::new(far, near),
        Point::new(near, far),
    ]
}

/// Mask id derived from the mark centre
pub fn mask_id(center: Point) -> String {
    format!("mask_{}_{}", center.x, center.y)
}

/// Bullseye mark at `center` and the mask that cuts its ring.
pub fn registration_mark(center: Point, config: &RoundConfig) -> (Shape, MaskDef) {
    let r = config.radius();
    let size = config.registration_size;
    let id = mask_id(center);

    let mask = MaskDef {
        id: id.clone(),
        center,
        half_extent: size * config.side,
        hole: (size - 2) * r,
    };
    let mark = RegistrationMark {
        center,
        outer: size * r,
        hole: (size - 2) * r,
        inner: (size - 4) * r,
        mask_id: id,
    };
    (
        Shape::new(Geometry::RegistrationMark(mark), Attributes::new()),
        mask,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_centers_for_version_one() {
        // 21x21 modules
        let centers = mark_centers(21, &RoundConfig::default());
        assert_eq!(centers[0], Point::new(56, 56));
        assert_eq!(centers[1], Point::new(280, 56));
        assert_eq!(centers[2], Point::new(56, 280));
    }

    #[test]
    fn test_mark_radii() {
        let (shape, mask) = registration_mark(Point::new(56, 56), &RoundConfig::default());
        let Geometry::RegistrationMark(mark) = shape.geometry else {
            panic!("expected a registration mark");
        };
        assert_eq!(mark.outer, 56);
        assert_eq!(mark.hole, 40);
        assert_eq!(mark.inner, 24);
        assert_eq!(mark.mask_id, "mask_56_56");
        assert_eq!(mask.id, mark.mask_id);
        assert_eq!(mask.hole, 40);
        assert_eq!(mask.background().width, 224);
    }

    #[test]
    fn test_mask_ids_unique() {
        let config = RoundConfig::default();
        let ids: Vec<String> = mark_centers(25, &config)
            .iter()
            .map(|c| registration_mark(*c, &config).1.id)
            .collect();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[0], ids[2]);
        assert_ne!(ids[1], ids[2]);
    }
}
