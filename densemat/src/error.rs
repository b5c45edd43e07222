use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for matrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors raised by [`crate::DenseMatrix`] operations and the file persistence helpers
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Two operands have incompatible shapes for `op`
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    Shape {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Rows of differing lengths were supplied at construction
    #[error("ragged rows: row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A square-only operation was called on a non-square matrix
    #[error("{op} requires a square matrix, got shape {shape:?}")]
    NotSquare {
        op: &'static str,
        shape: (usize, usize),
    },

    /// The element count is not preserved by a reshape
    #[error("cannot reshape {from:?} into {to:?}")]
    Reshape {
        from: (usize, usize),
        to: (usize, usize),
    },

    #[error("index {index:?} out of bounds for shape {shape:?}")]
    OutOfBounds {
        index: (usize, usize),
        shape: (usize, usize),
    },

    /// A zero pivot in `column` with no row below it to swap in
    #[error("degenerate matrix: no nonzero pivot available in column {column}")]
    Degenerate { column: usize },

    #[error("cannot parse matrix token {token:?}: {reason}")]
    Parse { token: String, reason: String },

    /// JSON has no representation for NaN or the infinities
    #[error("cannot write non-finite value {value} at {index:?} as JSON")]
    NonFinite { index: (usize, usize), value: f64 },

    #[error("unknown matrix file format: {0}")]
    UnknownFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MatrixError {
    /// True for the structural mismatch family: shape mismatch, ragged rows, non-square input and
    /// reshape count mismatch
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            MatrixError::Shape { .. }
                | MatrixError::Ragged { .. }
                | MatrixError::NotSquare { .. }
                | MatrixError::Reshape { .. }
        )
    }
}
