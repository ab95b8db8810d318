use std::io;
use thiserror::Error;

/// Errors that can occur while rounding a QR code document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RoundError {
    /// I/O error while reading or writing a document
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not well-formed XML
    #[error("XML parse error: {0}")]
    Xml(String),

    /// The input contains no root element at all
    #[error("document has no root element")]
    MissingRoot,

    /// The root element is not `<svg>`
    #[error("expected an <svg> root element, found <{0}>")]
    UnexpectedRoot(String),

    /// Configuration values outside their usable range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An occupied grid cell does not point at a pixel square
    #[error("occupancy grid is inconsistent at cell ({col}, {row})")]
    InconsistentGrid {
        /// Grid column
        col: usize,
        /// Grid row
        row: usize,
    },

    /// The occupancy grid is empty, so there is no bitmap to render
    #[error("no pixels found to render a bitmap")]
    NothingToRender,

    /// Bitmap encoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rounding operations
pub type Result<T> = std::result::Result<T, RoundError>;
