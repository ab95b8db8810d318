use crate::config::RoundConfig;
use crate::document::{Document, Node, NodeId};
use crate::error::{Result, RoundError};
use crate::grid::{Adjacency, build_grid, extract_pixels};
use crate::models::{OccupancyGrid, Shape};
use crate::svg::{Element, XmlNode, write_svg};
use crate::synth::{Replacement, mark_centers, registration_mark, synthesize};
use log::debug;
use std::collections::HashMap;

/// Per-document tallies of what happened to each pixel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Pixels found in the source
    pub pixels: usize,
    /// Pixels shadowed by a later pixel in the same cell
    pub duplicates: usize,
    /// Isolated pixels turned into circles
    pub circles: usize,
    /// Pixels with one neighbour turned into rounded stubs
    pub ends: usize,
    /// Pixels with two perpendicular neighbours given a rounded corner
    pub corners: usize,
    /// Pixels left square
    pub kept: usize,
    /// Registration marks added
    pub marks: usize,
}

impl RoundSummary {
    /// Cells handled, which equals the number of occupied cells.
    pub fn accounted(&self) -> usize {
        self.circles + self.ends + self.corners + self.kept
    }

    /// Pixels whose square was swapped for new geometry
    pub fn replaced(&self) -> usize {
        self.circles + self.ends + self.corners
    }
}

/// A rounded document together with the grid it was derived from
#[derive(Debug, Clone)]
pub struct Rounded {
    /// The rewritten document
    pub document: Document,
    /// Occupancy of the source pixels
    pub grid: OccupancyGrid,
    /// What happened to each pixel
    pub summary: RoundSummary,
}

impl Rounded {
    /// Rows of 0/1 for diagnostics
    pub fn bitmap(&self) -> Vec<Vec<u8>> {
        self.grid.bitmap()
    }

    /// Serialized SVG of the rounded document
    pub fn to_svg(&self) -> String {
        write_svg(&self.document)
    }
}

/// Round every pixel of `document` and overlay the registration marks.
///
/// Cells are visited in row-major order. New shapes are appended on top;
/// originals are only marked for removal and dropped once every cell has
/// been handled. Squares that stay square, and pixels shadowed by a later
/// pixel in the same cell, are put back exactly as they were written.
pub fn round_document(mut document: Document, config: &RoundConfig) -> Result<Rounded> {
    config.validate()?;

    let pixels = extract_pixels(&mut document, config);
    let build = build_grid(&pixels);
    let grid = build.grid;

    let mut summary = RoundSummary {
        pixels: pixels.len(),
        duplicates: build.duplicates,
        ..Default::default()
    };
    let mut sources: HashMap<NodeId, Element> = pixels
        .into_iter()
        .map(|pixel| (pixel.node, pixel.source))
        .collect();
    let mut isolated: Vec<Shape> = Vec::new();

    for (cell, id) in grid.occupied() {
        let adjacency = Adjacency::classify(&grid, cell);
        let replacement = {
            let inconsistent = || RoundError::InconsistentGrid {
                col: cell.col,
                row: cell.row,
            };
            let square = document.shape(id).ok_or_else(inconsistent)?;
            let rect = square.as_square().ok_or_else(inconsistent)?;
            synthesize(rect, &square.attrs, &adjacency, config)
        };

        let source = sources.remove(&id);
        match replacement {
            Replacement::Keep => {
                summary.kept += 1;
                restore(&mut document, id, source);
                continue;
            }
            Replacement::Isolated { circle } => {
                summary.circles += 1;
                if config.isolated_layer {
                    isolated.push(circle);
                } else {
                    document.push_shape(circle);
                }
            }
            other => {
                if matches!(other, Replacement::End { .. }) {
                    summary.ends += 1;
                } else {
                    summary.corners += 1;
                }
                for shape in other.into_shapes() {
                    document.push_shape(shape);
                }
            }
        }
        document.remove(id);
    }

    // whatever is left was shadowed by a later pixel in the same cell
    for (id, source) in sources {
        restore(&mut document, id, Some(source));
    }

    if !grid.is_empty() {
        for center in mark_centers(grid.height(), config) {
            let (mark, mask) = registration_mark(center, config);
            document.add_mask(mask);
            document.push_shape(mark);
            summary.marks += 1;
        }
    }

    if !isolated.is_empty() {
        document.push(Node::Layer(isolated));
    }

    let removed = document.apply_removals();
    debug!(
        "Rounded {} cells: {} circles, {} ends, {} corners, {} kept, {} originals removed",
        summary.accounted(),
        summary.circles,
        summary.ends,
        summary.corners,
        summary.kept,
        removed
    );

    Ok(Rounded {
        document,
        grid,
        summary,
    })
}

fn restore(document: &mut Document, id: NodeId, source: Option<Element>) {
    if let Some(el) = source {
        document.replace(id, Node::Markup(XmlNode::Element(el)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShapeKind;

    fn round(body: &str) -> Rounded {
        let document = Document::from_svg_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg">{body}</svg>"#
        ))
        .expect("Failed to parse SVG");
        round_document(document, &RoundConfig::default()).expect("Failed to round")
    }

    #[test]
    fn test_l_shape() {
        // ##
        // #.
        let rounded = round(
            r#"<rect x="0" y="0" width="16" height="16"/>
               <rect x="16" y="0" width="16" height="16"/>
               <rect x="0" y="16" width="16" height="16"/>"#,
        );
        assert_eq!(rounded.summary.corners, 1);
        assert_eq!(rounded.summary.ends, 2);
        assert_eq!(rounded.summary.accounted(), rounded.grid.occupied_count());

        let doc = &rounded.document;
        assert_eq!(doc.count_kind(ShapeKind::Square), 0);
        assert_eq!(doc.count_kind(ShapeKind::CornerPolygon), 1);
        assert_eq!(doc.count_kind(ShapeKind::HalfPanel), 2);
        assert_eq!(doc.count_kind(ShapeKind::Circle), 3);
        assert_eq!(doc.count_kind(ShapeKind::RegistrationMark), 3);
    }

    #[test]
    fn test_plus_keeps_center() {
        let rounded = round(
            r#"<rect x="16" y="0" width="16" height="16"/>
               <rect x="0" y="16" width="16" height="16"/>
               <rect x="16" y="16" width="16" height="16" id="center"/>
               <rect x="32" y="16" width="16" height="16"/>
               <rect x="16" y="32" width="16" height="16"/>"#,
        );
        assert_eq!(rounded.summary.kept, 1);
        assert_eq!(rounded.summary.ends, 4);
        assert_eq!(rounded.document.count_kind(ShapeKind::Square), 0);
        let kept: Vec<&Element> = rounded
            .document
            .nodes()
            .filter_map(|n| n.as_markup("rect"))
            .filter(|el| el.attr("width") == Some("16"))
            .collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].attr("id"), Some("center"));
    }

    #[test]
    fn test_shadowed_duplicate_keeps_source() {
        let rounded = round(
            r#"<rect y="0" x="0.5" width="16" height="16" id="first"/>
               <rect x="0" y="0" width="16" height="16" id="second"/>"#,
        );
        assert_eq!(rounded.summary.duplicates, 1);
        assert_eq!(rounded.summary.accounted(), 1);

        let first = rounded
            .document
            .nodes()
            .find_map(|n| n.as_markup("rect"))
            .expect("shadowed rect");
        assert_eq!(first.attr("id"), Some("first"));
        assert_eq!(first.attrs[1], ("x".to_string(), "0.5".to_string()));
    }

    #[test]
    fn test_isolated_circles_layer_on_top() {
        let rounded = round(r#"<rect x="0" y="0" width="16" height="16"/>"#);
        let last = rounded.document.nodes().last().expect("a node");
        assert!(matches!(last, Node::Layer(shapes) if shapes.len() == 1));
    }

    #[test]
    fn test_isolated_circles_inline() {
        let document = Document::from_svg_str(
            r#"<svg><rect x="0" y="0" width="16" height="16"/></svg>"#,
        )
        .expect("parse");
        let config = RoundConfig::default().with_isolated_layer(false);
        let rounded = round_document(document, &config).expect("round");
        assert!(rounded.document.nodes().all(|n| !matches!(n, Node::Layer(_))));
        assert_eq!(rounded.document.count_kind(ShapeKind::Circle), 1);
    }

    #[test]
    fn test_empty_document() {
        let rounded = round(r#"<rect x="0" y="0" width="10" height="10"/>"#);
        assert!(rounded.grid.is_empty());
        assert!(rounded.bitmap().is_empty());
        assert_eq!(rounded.summary, RoundSummary::default());
        assert!(rounded.document.defs().is_empty());
        assert_eq!(rounded.document.nodes().count(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RoundConfig::default().with_side(0);
        let result = round_document(Document::new(), &config);
        assert!(matches!(result, Err(RoundError::InvalidConfig(_))));
    }
}
