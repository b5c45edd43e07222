//! `densemat` is a small Rust library for dense linear algebra over `f64`. Some features include:
//! - getting and setting individual elements, slicing out independent sub-matrices and assigning
//!   blocks back in place
//! - element-wise arithmetic, scalar and matrix products, integer powers and transposition
//! - Gaussian elimination, swapping rows past vanishing pivots, and the methods built on it
//!   (determinant, inverse, rank, echelon and reduced echelon forms)
//! - axis-wise reductions (`max`, `min`, `mean`, `var`, `std`, `sum`), reshaping, sorting,
//!   repetition and tiling
//! - a `;`/whitespace delimited text format and nested-array JSON persistence
//!
//! The main data structures provided by this crate are:
//! - [`DenseMatrix`]: a rectangular, row-major matrix of `f64` which exclusively owns its storage
//! - [`ExactDecimal`]: a signed fixed-point decimal stored as digit strings, with exact addition,
//!   subtraction and multiplication

pub mod decimal;
pub mod error;
pub mod format;
pub mod io;
pub mod matrix;

#[cfg(test)]
mod proptests;

pub use decimal::{DecimalParseError, ExactDecimal};
pub use error::{MatrixError, Result};
pub use format::PrintOptions;
pub use io::FileFormat;
pub use matrix::{Axis, DenseMatrix, Operand, Reduction, Row, RowOps};
