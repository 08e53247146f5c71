//! Error types for the `gridlife` crate.
//!
//! Every fallible operation returns [`LifeError`] through the [`Result`]
//! alias. Nothing in the library terminates the process; the binary decides
//! what an error means for the exit status.

/// Errors produced while building grids, seeding them, or rendering runs.
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    /// A grid was requested with a zero width or height.
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// A coordinate fell outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested x coordinate.
        x: i64,
        /// Requested y coordinate.
        y: i64,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Cell storage could not be allocated.
    #[error("unable to allocate storage for {cells} cells")]
    Allocation {
        /// Number of cells requested, saturated on overflow.
        cells: usize,
    },

    /// A seed point could not be parsed.
    #[error("invalid point {0:?}: expected X,Y")]
    InvalidPoint(String),

    /// A pattern plot could not be parsed.
    #[error("invalid pattern at line {line}: {reason}")]
    InvalidPattern {
        /// 1-based line number in the plot.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Terminal or stream I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LifeError>;
