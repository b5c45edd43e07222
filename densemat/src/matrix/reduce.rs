use super::DenseMatrix;
use crate::error::{MatrixError, Result};
use std::cmp::Ordering;

/// The direction of an axis-wise operation
///
/// For reductions, `Rows` reduces within each row and gives a column matrix (one entry per row),
/// while `Cols` reduces within each column and gives a row matrix (one entry per column).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Rows,
    Cols,
}

fn max_of(xs: &[f64]) -> f64 {
    xs.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(xs: &[f64]) -> f64 {
    xs.iter().copied().fold(f64::INFINITY, f64::min)
}

fn sum_of(xs: &[f64]) -> f64 {
    xs.iter().sum()
}

fn mean_of(xs: &[f64]) -> f64 {
    sum_of(xs) / xs.len() as f64
}

/// Population variance: the mean of the squared deviations from the mean
fn var_of(xs: &[f64]) -> f64 {
    let mean = mean_of(xs);
    xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / xs.len() as f64
}

fn std_of(xs: &[f64]) -> f64 {
    var_of(xs).sqrt()
}

fn sort_slice<K: PartialOrd>(xs: &mut [f64], key: &mut impl FnMut(f64) -> K, reverse: bool) {
    xs.sort_by(|a, b| {
        let ord = key(*a).partial_cmp(&key(*b)).unwrap_or(Ordering::Equal);
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    });
}

impl DenseMatrix {
    /// Applies `f` to each row (`Axis::Rows`) or each column (`Axis::Cols`)
    fn reduce_along(&self, axis: Axis, f: impl Fn(&[f64]) -> f64) -> DenseMatrix {
        match axis {
            Axis::Rows => {
                let data = (0..self.rows()).map(|i| f(&self.row(i)[..])).collect();
                DenseMatrix::from_parts(self.rows(), 1, data)
            }
            Axis::Cols => {
                let t = self.transpose();
                let data = (0..t.rows()).map(|i| f(&t.row(i)[..])).collect();
                DenseMatrix::from_parts(1, t.rows(), data)
            }
        }
    }

    fn reduce_all(&self, f: impl Fn(&[f64]) -> f64) -> Option<f64> {
        (!self.is_empty()).then(|| f(&self.data))
    }

    /// The largest element, or `None` for the empty matrix
    pub fn max(&self) -> Option<f64> {
        self.reduce_all(max_of)
    }

    pub fn max_along(&self, axis: Axis) -> DenseMatrix {
        self.reduce_along(axis, max_of)
    }

    /// The smallest element, or `None` for the empty matrix
    pub fn min(&self) -> Option<f64> {
        self.reduce_all(min_of)
    }

    pub fn min_along(&self, axis: Axis) -> DenseMatrix {
        self.reduce_along(axis, min_of)
    }

    /// The sum of all elements; 0 for the empty matrix
    pub fn sum(&self) -> f64 {
        sum_of(&self.data)
    }

    pub fn sum_along(&self, axis: Axis) -> DenseMatrix {
        self.reduce_along(axis, sum_of)
    }

    pub fn mean(&self) -> Option<f64> {
        self.reduce_all(mean_of)
    }

    pub fn mean_along(&self, axis: Axis) -> DenseMatrix {
        self.reduce_along(axis, mean_of)
    }

    /// Population variance of all elements
    pub fn var(&self) -> Option<f64> {
        self.reduce_all(var_of)
    }

    /// Population variance within each row or column, computed directly along the axis
    pub fn var_along(&self, axis: Axis) -> DenseMatrix {
        self.reduce_along(axis, var_of)
    }

    pub fn std(&self) -> Option<f64> {
        self.reduce_all(std_of)
    }

    pub fn std_along(&self, axis: Axis) -> DenseMatrix {
        self.reduce_along(axis, std_of)
    }

    /// Changes the shape in place, keeping the row-major order of the elements
    pub fn reshape(&mut self, shape: (usize, usize)) -> Result<()> {
        if shape.0 * shape.1 != self.data.len() {
            return Err(MatrixError::Reshape {
                from: self.shape(),
                to: shape,
            });
        }
        if self.is_empty() {
            return Ok(());
        }
        self.rows = shape.0;
        self.cols = shape.1;
        Ok(())
    }

    /// Sorts the elements in place by `key`
    ///
    /// With `axis` set to `None` all elements are sorted and laid back out in row-major order;
    /// `Axis::Rows` sorts within each row and `Axis::Cols` within each column. The sort is stable,
    /// also when `reverse` is set.
    pub fn sort_by_key<K: PartialOrd>(
        &mut self,
        axis: Option<Axis>,
        mut key: impl FnMut(f64) -> K,
        reverse: bool,
    ) {
        match axis {
            None => sort_slice(&mut self.data, &mut key, reverse),
            Some(Axis::Rows) => {
                for i in 0..self.rows() {
                    sort_slice(self.row_mut(i), &mut key, reverse);
                }
            }
            Some(Axis::Cols) => {
                let mut t = self.transpose();
                t.sort_by_key(Some(Axis::Rows), key, reverse);
                *self = t.transpose();
            }
        }
    }

    /// Sorts the elements in place by value; see [`DenseMatrix::sort_by_key`]
    pub fn sort(&mut self, axis: Option<Axis>, reverse: bool) {
        self.sort_by_key(axis, |x| x, reverse);
    }

    /// Builds a new matrix by repeating each row
    ///
    /// `counts` holds either one count applied to every row or one count per row. With
    /// `Axis::Rows`, row `i` is stacked `counts[i]` times vertically; with `Axis::Cols`, row `i` is
    /// concatenated with itself `counts[i]` times, which requires the counts to agree.
    pub fn repeat(&self, counts: &[usize], axis: Axis) -> Result<DenseMatrix> {
        let counts: Vec<usize> = match counts.len() {
            1 => vec![counts[0]; self.rows()],
            n if n == self.rows() => counts.to_vec(),
            n => {
                return Err(MatrixError::Shape {
                    op: "repeat",
                    left: self.shape(),
                    right: (n, 1),
                })
            }
        };

        let rows = match axis {
            Axis::Rows => (0..self.rows())
                .flat_map(|i| std::iter::repeat(self.row(i).to_vec()).take(counts[i]))
                .collect(),
            Axis::Cols => (0..self.rows())
                .map(|i| self.row(i).repeat(counts[i]))
                .collect(),
        };
        DenseMatrix::from_rows(rows)
    }

    /// Builds a new matrix from `reps.0` copies of `self` stacked vertically, each row of blocks
    /// holding `reps.1` copies side by side. A zero factor gives the empty matrix.
    pub fn tile(&self, reps: (usize, usize)) -> DenseMatrix {
        let (rows, cols) = self.shape();
        DenseMatrix::build(rows * reps.0, cols * reps.1, |i, j| {
            self.data[(i % rows) * cols + j % cols]
        })
    }
}
