//! Occupancy grid construction and neighbour classification
//!
//! - Pixel extraction from the document's `<rect>` elements
//! - Dense occupancy grid keyed by cell
//! - Four-neighbour adjacency masks

/// Adjacency mask computation for occupied cells
pub mod adjacency;
/// Pixel extraction and occupancy grid building
pub mod builder;

pub use adjacency::Adjacency;
pub use builder::{GridBuild, PixelEntry, build_grid, extract_pixels};
