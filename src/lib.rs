//! qr_round - rounded pixel styling for QR-code SVGs
//!
//! Takes an SVG whose pixels are equal-sized axis-aligned squares, rebuilds
//! the occupancy grid from them and replaces each square with rounded
//! geometry based on its four neighbours. Three bullseye registration marks
//! are laid over the finder-pattern corners.
//!
//! ```no_run
//! use qr_round::{RoundConfig, round_file};
//!
//! let rounded = round_file("code.svg", "code.rounded.svg", &RoundConfig::default())?;
//! println!("{} pixels rounded", rounded.summary.replaced());
//! # Ok::<(), qr_round::RoundError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Rounding parameters (pixel side, mark size, flags)
pub mod config;
/// Document model: shapes, markup and definitions in paint order
pub mod document;
/// Error type shared by every stage
pub mod error;
/// Pixel extraction, occupancy grid and neighbour classification
pub mod grid;
/// Core data structures (Point, Cell, OccupancyGrid, Shape, etc.)
pub mod models;
/// Document assembly: classify, replace, overlay marks
pub mod pipeline;
/// SVG reading and writing
pub mod svg;
/// Replacement geometry for pixels and registration marks
pub mod synth;
/// Diagnostic bitmap rendering and file helpers
pub mod tools;

pub use config::RoundConfig;
pub use document::{Document, Node, NodeId};
pub use error::{Result, RoundError};
pub use models::{Cell, Direction, OccupancyGrid, Point, Shape, ShapeKind};
pub use pipeline::{RoundSummary, Rounded, round_document};

use std::path::Path;

/// Round an SVG given as a string.
pub fn round_svg_str(content: &str, config: &RoundConfig) -> Result<Rounded> {
    let document = Document::from_svg_str(content)?;
    round_document(document, config)
}

/// Round the SVG at `input` and write the result to `output`.
pub fn round_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &RoundConfig,
) -> Result<Rounded> {
    let document = Document::open(input)?;
    let rounded = round_document(document, config)?;
    svg::save_svg(&rounded.document, output)?;
    Ok(rounded)
}
