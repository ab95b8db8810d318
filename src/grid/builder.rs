use crate::config::RoundConfig;
use crate::document::{Document, Node, NodeId};
use crate::models::{Attributes, Cell, Geometry, MAX_GRID_DIM, OccupancyGrid, Rect, Shape};
use crate::svg::Element;
use log::{debug, warn};

/// A pixel found in the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelEntry {
    /// Grid cell the pixel occupies
    pub cell: Cell,
    /// Handle of the pixel's square in the document
    pub node: NodeId,
    /// The `<rect>` as it was written, put back when the pixel stays square
    pub source: Element,
}

/// Occupancy grid plus bookkeeping from building it
#[derive(Debug, Clone, Default)]
pub struct GridBuild {
    /// Cell to pixel mapping
    pub grid: OccupancyGrid,
    /// Pixels whose cell was already taken by an earlier pixel
    pub duplicates: usize,
}

/// Find the pixels among the document's top-level `<rect>` elements.
///
/// With `remove_groups`, top-level `<g>` elements are stripped first. Every
/// rect measuring exactly `side`x`side` is turned into a [`Geometry::Square`]
/// in place; other rects stay untouched markup. Pixels at negative
/// coordinates, or beyond [`MAX_GRID_DIM`] cells, are skipped. Pixels are
/// returned in document order.
pub fn extract_pixels(document: &mut Document, config: &RoundConfig) -> Vec<PixelEntry> {
    if config.remove_groups {
        let stripped = document.strip_groups();
        if stripped > 0 {
            debug!("Stripped {} top-level groups", stripped);
        }
    }

    let side = config.side;
    let candidates: Vec<(NodeId, Rect, Element)> = document
        .live()
        .filter_map(|(id, node)| node.as_markup("rect").map(|el| (id, el)))
        .filter_map(|(id, el)| {
            let attrs = Attributes::from(el.attrs.clone());
            let rect = Rect::new(
                attrs.get_i32("x"),
                attrs.get_i32("y"),
                attrs.get_i32("width"),
                attrs.get_i32("height"),
            );
            rect.is_square_of(side).then(|| (id, rect, el.clone()))
        })
        .collect();

    let mut pixels = Vec::with_capacity(candidates.len());
    for (id, rect, source) in candidates {
        let Some(cell) = Cell::from_position(rect.origin, side) else {
            warn!(
                "Skipping pixel at ({}, {}): negative coordinates have no cell",
                rect.origin.x, rect.origin.y
            );
            continue;
        };
        if cell.col >= MAX_GRID_DIM || cell.row >= MAX_GRID_DIM {
            warn!(
                "Skipping pixel at ({}, {}): cell ({}, {}) is outside the {}x{} grid limit",
                rect.origin.x, rect.origin.y, cell.col, cell.row, MAX_GRID_DIM, MAX_GRID_DIM
            );
            continue;
        }
        let attrs = Attributes::from(source.attrs.clone()).pass_through();
        document.replace(id, Node::Shape(Shape::new(Geometry::Square(rect), attrs)));
        pixels.push(PixelEntry {
            cell,
            node: id,
            source,
        });
    }

    debug!("Extracted {} pixels of side {}", pixels.len(), side);
    pixels
}

/// Build the occupancy grid spanning (0, 0) to the largest occupied cell.
///
/// When two pixels share a cell the later one wins.
pub fn build_grid(pixels: &[PixelEntry]) -> GridBuild {
    if pixels.is_empty() {
        return GridBuild::default();
    }

    let width = pixels.iter().map(|p| p.cell.col).max().unwrap_or(0) + 1;
    let height = pixels.iter().map(|p| p.cell.row).max().unwrap_or(0) + 1;

    let mut grid = OccupancyGrid::new(width, height);
    let mut duplicates = 0;
    for pixel in pixels {
        if let Some(previous) = grid.set(pixel.cell, pixel.node) {
            duplicates += 1;
            warn!(
                "Cell ({}, {}) holds two pixels; node {} replaces node {}",
                pixel.cell.col,
                pixel.cell.row,
                pixel.node.index(),
                previous.index()
            );
        }
    }

    debug!("Built {}x{} occupancy grid", width, height);
    GridBuild { grid, duplicates }
}
