use super::DenseMatrix;
use crate::error::{MatrixError, Result};

/// Relative tolerance used by [`DenseMatrix::rank`]: entries at or below
/// `RANK_EPSILON * max(rows, cols) * max|a_ij|` are treated as zero
pub const RANK_EPSILON: f64 = f64::EPSILON;

/// Row operations performed during elimination, so they can be replayed on a proxy
pub trait RowOps {
    fn swap_rows(&mut self, a: usize, b: usize);

    /// Adds `factor` times row `from` to row `to`
    fn add_scaled_row(&mut self, from: usize, to: usize, factor: f64);
}

/// The outcome of [`DenseMatrix::transform`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reduction {
    /// number of row exchanges performed
    pub swaps: usize,

    /// true if some column had no usable pivot, i.e. the determinant is zero
    pub singular: bool,
}

impl Reduction {
    /// `(-1)^swaps`, the factor the row exchanges contribute to the determinant
    #[inline]
    pub fn sign(&self) -> f64 {
        if self.swaps % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

/// Pivot columns (one per pivot row, in order) and the number of row exchanges
struct Echelon {
    pivots: Vec<usize>,
    swaps: usize,
}

impl DenseMatrix {
    /// Forward pass of Gaussian elimination, mirroring each row operation on `proxy`
    ///
    /// Entries with magnitude at or below `tolerance` count as zero; `det`, `inverse` and
    /// `transform` pass 0 so that only exact zeros are rejected. A pivot is exchanged only when the
    /// diagonal candidate is zero, in which case the first row below with a nonzero entry in that
    /// column is swapped in. Columns without any candidate are skipped, so the result is in row
    /// echelon form for any shape.
    fn forward(&mut self, tolerance: f64, proxy: &mut impl RowOps) -> Echelon {
        let mut row = 0;
        let mut pcol = 0;
        let mut pivots = vec![];
        let mut swaps = 0;
        while row < self.rows() && pcol < self.cols() {
            let next_row = (row..self.rows()).find(|&i| self[(i, pcol)].abs() > tolerance);

            let Some(row1) = next_row else {
                pcol += 1;
                continue;
            };

            if row != row1 {
                self.swap_rows(row, row1);
                proxy.swap_rows(row, row1);
                swaps += 1;
            }

            let row_vec = self.row(row).to_vec();
            let pivot = row_vec[pcol];
            log::trace!("pivot {} at ({}, {})", pivot, row, pcol);

            for i in (row + 1)..self.rows() {
                let k = self[(i, pcol)] / pivot;
                if k != 0.0 {
                    self.row_mut(i).add_scaled(-k, &row_vec);
                    proxy.add_scaled_row(row, i, -k);
                }
                self[(i, pcol)] = 0.0;
            }

            pivots.push(pcol);
            row += 1;
            pcol += 1;
        }

        Echelon { pivots, swaps }
    }

    /// Backward pass: clears the entries above each pivot, bottom-up. Pivots are not normalized.
    fn backward(&mut self, pivots: &[usize], proxy: &mut impl RowOps) {
        for row in (0..pivots.len()).rev() {
            let pcol = pivots[row];
            let row_vec = self.row(row).to_vec();
            let pivot = row_vec[pcol];
            for i in 0..row {
                let k = self[(i, pcol)] / pivot;
                if k != 0.0 {
                    self.row_mut(i).add_scaled(-k, &row_vec);
                    proxy.add_scaled_row(row, i, -k);
                }
                self[(i, pcol)] = 0.0;
            }
        }
    }

    fn transform_with(&mut self, identity: bool, proxy: &mut impl RowOps) -> Result<Reduction> {
        self.require_square("transform")?;
        let n = self.rows();
        let echelon = self.forward(0.0, proxy);

        if echelon.pivots.len() < n {
            let column = echelon
                .pivots
                .iter()
                .enumerate()
                .find(|(k, &c)| *k != c)
                .map_or(echelon.pivots.len(), |(k, _)| k);
            log::debug!(
                "singular {}x{} matrix: no pivot in column {} after {} swaps",
                n,
                n,
                column,
                echelon.swaps
            );
            if identity {
                return Err(MatrixError::Degenerate { column });
            }
            return Ok(Reduction {
                swaps: echelon.swaps,
                singular: true,
            });
        }

        if echelon.swaps > 0 {
            log::debug!("{} row swaps reducing {}x{} matrix", echelon.swaps, n, n);
        }
        if identity {
            self.backward(&echelon.pivots, proxy);
        }

        Ok(Reduction {
            swaps: echelon.swaps,
            singular: false,
        })
    }

    /// Reduces a square matrix in place to upper-triangular form, or with `identity` set, further to
    /// diagonal form
    ///
    /// The caller gives up the current contents of the matrix: pass a copy if the original is still
    /// needed. A singular matrix is reported through [`Reduction::singular`]; when `identity` is
    /// requested it fails with [`MatrixError::Degenerate`] instead, leaving the matrix in echelon
    /// form.
    pub fn transform(&mut self, identity: bool) -> Result<Reduction> {
        self.transform_with(identity, &mut ())
    }

    /// Perform gaussian elimination in place
    ///
    /// If `full` is true, then perform full Gauss-Jordan to produce reduced echelon form with unit
    /// pivots, otherwise just return echelon form
    pub fn gauss(&mut self, full: bool) {
        let echelon = self.forward(0.0, &mut ());
        if full {
            self.backward(&echelon.pivots, &mut ());
            for (row, &pcol) in echelon.pivots.iter().enumerate() {
                let pivot = self[(row, pcol)];
                self.row_mut(row).scale(1.0 / pivot);
                self[(row, pcol)] = 1.0;
            }
        }
    }

    /// Returns the reduced row echelon form of the matrix, leaving `self` untouched
    pub fn reduced_echelon(&self) -> DenseMatrix {
        let mut m = self.clone();
        m.gauss(true);
        m
    }

    /// Computes the determinant of a square matrix without modifying it
    ///
    /// The empty matrix has determinant 1.
    pub fn det(&self) -> Result<f64> {
        self.require_square("det")?;
        if self.is_empty() {
            return Ok(1.0);
        }

        let mut m = self.clone();
        let reduction = m.transform(false)?;
        if reduction.singular {
            return Ok(0.0);
        }

        let diagonal: f64 = (0..m.rows()).map(|i| m[(i, i)]).product();
        Ok(diagonal * reduction.sign())
    }

    /// Computes the inverse of a square matrix
    ///
    /// Returns `Ok(None)` if the matrix is singular, i.e. its determinant is zero. The identity
    /// block of the augmented matrix `[A | I]` is carried as a proxy through full elimination,
    /// then each of its rows is divided by the matching diagonal entry.
    pub fn inverse(&self) -> Result<Option<DenseMatrix>> {
        self.require_square("inverse")?;
        let mut work = self.clone();
        let mut inv = DenseMatrix::identity(self.rows());
        match work.transform_with(true, &mut inv) {
            Ok(_) => {}
            Err(MatrixError::Degenerate { .. }) => {
                log::debug!("{}x{} matrix is singular, no inverse", self.rows(), self.cols());
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        for i in 0..inv.rows() {
            inv.row_mut(i).scale(1.0 / work[(i, i)]);
        }
        Ok(Some(inv))
    }

    /// Computes the rank of the matrix, for any shape, as the number of pivots of its echelon form
    ///
    /// The zero test is relative to the largest entry, so uniformly scaling a matrix never changes
    /// its rank.
    pub fn rank(&self) -> usize {
        let largest = (0..self.rows()).fold(0.0, |acc: f64, i| acc.max(self.row(i).max_abs()));
        let tolerance = RANK_EPSILON * self.rows().max(self.cols()) as f64 * largest;
        let mut m = self.clone();
        m.forward(tolerance, &mut ()).pivots.len()
    }
}

impl RowOps for () {
    #[inline]
    fn swap_rows(&mut self, _: usize, _: usize) {}

    #[inline]
    fn add_scaled_row(&mut self, _: usize, _: usize, _: f64) {}
}

impl RowOps for DenseMatrix {
    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols();
        for k in 0..cols {
            self.data.swap(a * cols + k, b * cols + k);
        }
    }

    fn add_scaled_row(&mut self, from: usize, to: usize, factor: f64) {
        let row_vec = self.row(from).to_vec();
        self.row_mut(to).add_scaled(factor, &row_vec);
    }
}
