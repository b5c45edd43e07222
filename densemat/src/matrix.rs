//! Dense row-major matrices of `f64`
//!
//! Every operation that produces a matrix (slicing, transposition, products, reductions) returns a
//! new, independent [`DenseMatrix`]. Methods taking `&mut self` mutate in place and say so.

mod elimination;
mod reduce;
mod row;

pub use elimination::{Reduction, RowOps, RANK_EPSILON};
pub use reduce::Axis;
pub use row::Row;

use crate::error::{MatrixError, Result};
use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, Bound, Index, IndexMut, Mul, Neg, RangeBounds, Sub};

/// A rectangular matrix of `f64`, stored in row-major order
///
/// A matrix with no rows or no columns is always normalized to the canonical empty matrix of shape
/// `(0, 0)`.
#[derive(Clone, Debug)]
pub struct DenseMatrix {
    /// the number of rows in the matrix
    rows: usize,

    /// the number of columns in the matrix
    cols: usize,

    /// the elements of the matrix, `rows * cols` of them, in row-major order
    data: Vec<f64>,
}

/// The right-hand side of a product: either another matrix or a scalar broadcast over every element
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Matrix(&'a DenseMatrix),
    Scalar(f64),
}

impl<'a> From<&'a DenseMatrix> for Operand<'a> {
    fn from(m: &'a DenseMatrix) -> Self {
        Operand::Matrix(m)
    }
}

impl From<f64> for Operand<'_> {
    fn from(k: f64) -> Self {
        Operand::Scalar(k)
    }
}

/// Resolves a range against a dimension of length `len`, returning `(start, end)`
fn resolve_range(range: &impl RangeBounds<usize>, len: usize) -> Option<(usize, usize)> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.checked_add(1)?,
    };

    let end = match range.end_bound() {
        Bound::Unbounded => len,
        Bound::Included(&e) => e.checked_add(1)?,
        Bound::Excluded(&e) => e,
    };

    (start <= end && end <= len).then_some((start, end))
}

impl DenseMatrix {
    /// Builds a matrix from its parts, collapsing any shape with a zero dimension to `(0, 0)`
    fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        if rows == 0 || cols == 0 {
            Self::empty()
        } else {
            DenseMatrix { rows, cols, data }
        }
    }

    /// The canonical empty matrix, of shape `(0, 0)`
    pub fn empty() -> Self {
        DenseMatrix {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    pub fn build(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let data = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Self::from_parts(rows, cols, data)
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_parts(rows, cols, vec![0.0; rows * cols])
    }

    pub fn identity(size: usize) -> Self {
        Self::build(size, size, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// A matrix of values drawn uniformly from `[0, 1)` using the caller's RNG
    #[inline]
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        Self::build(rows, cols, |_, _| rng.random::<f64>())
    }

    /// Creates a matrix from a vector of rows
    ///
    /// Fails with [`MatrixError::Ragged`] unless every row has the same length. An empty outer
    /// vector, or rows with no columns, give the canonical empty matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MatrixError::Ragged {
                row,
                expected: cols,
                found: r.len(),
            });
        }
        let nrows = rows.len();
        Ok(Self::from_parts(
            nrows,
            cols,
            rows.into_iter().flatten().collect(),
        ))
    }

    /// Creates a matrix of the given shape from a flat row-major vector
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        if shape.0 * shape.1 != data.len() {
            return Err(MatrixError::Reshape {
                from: (1, data.len()),
                to: shape,
            });
        }
        Ok(Self::from_parts(shape.0, shape.1, data))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub(crate) fn require_square(&self, op: &'static str) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatrixError::NotSquare {
                op,
                shape: self.shape(),
            })
        }
    }

    fn require_same_shape(&self, other: &DenseMatrix, op: &'static str) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(MatrixError::Shape {
                op,
                left: self.shape(),
                right: other.shape(),
            })
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = value;
            Ok(())
        } else {
            Err(MatrixError::OutOfBounds {
                index: (row, col),
                shape: self.shape(),
            })
        }
    }

    #[inline]
    pub fn row(&self, row: usize) -> &Row {
        Row::from_slice(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut Row {
        Row::from_mut_slice(&mut self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Iterates over the elements in row-major order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the elements as a vector of rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.data.contains(&x)
    }

    /// The `(row, col)` of the first element equal to `x`, scanning in row-major order
    pub fn position(&self, x: f64) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|&v| v == x)
            .map(|k| (k / self.cols, k % self.cols))
    }

    /// The `(row, col)` of every element equal to `x`, in row-major order
    pub fn positions(&self, x: f64) -> Vec<(usize, usize)> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == x)
            .map(|(k, _)| (k / self.cols, k % self.cols))
            .collect()
    }

    fn resolve_block(
        &self,
        rows: &impl RangeBounds<usize>,
        cols: &impl RangeBounds<usize>,
    ) -> Result<((usize, usize), (usize, usize))> {
        let r = resolve_range(rows, self.rows);
        let c = resolve_range(cols, self.cols);
        match (r, c) {
            (Some(r), Some(c)) => Ok((r, c)),
            (r, c) => Err(MatrixError::OutOfBounds {
                index: (
                    r.map_or(self.rows + 1, |r| r.1),
                    c.map_or(self.cols + 1, |c| c.1),
                ),
                shape: self.shape(),
            }),
        }
    }

    /// Returns a copy of the sub-block selected by a row range and a column range
    pub fn slice(
        &self,
        rows: impl RangeBounds<usize>,
        cols: impl RangeBounds<usize>,
    ) -> Result<DenseMatrix> {
        let ((r0, r1), (c0, c1)) = self.resolve_block(&rows, &cols)?;
        let mut data = Vec::with_capacity((r1 - r0) * (c1 - c0));
        for i in r0..r1 {
            data.extend_from_slice(&self.row(i)[c0..c1]);
        }
        Ok(Self::from_parts(r1 - r0, c1 - c0, data))
    }

    /// Returns a copy of part of a single row, as a `1 x k` matrix
    pub fn row_slice(&self, row: usize, cols: impl RangeBounds<usize>) -> Result<DenseMatrix> {
        if row >= self.rows {
            return Err(MatrixError::OutOfBounds {
                index: (row, 0),
                shape: self.shape(),
            });
        }
        self.slice(row..=row, cols)
    }

    /// Overwrites the selected block in place with the contents of `values`, leaving every other
    /// element untouched. `values` must have exactly the shape of the selection.
    pub fn assign_slice(
        &mut self,
        rows: impl RangeBounds<usize>,
        cols: impl RangeBounds<usize>,
        values: &DenseMatrix,
    ) -> Result<()> {
        let ((r0, r1), (c0, c1)) = self.resolve_block(&rows, &cols)?;
        let selected = (r1 - r0, c1 - c0);
        let normalized = if selected.0 == 0 || selected.1 == 0 {
            (0, 0)
        } else {
            selected
        };
        if values.shape() != normalized {
            return Err(MatrixError::Shape {
                op: "assign_slice",
                left: selected,
                right: values.shape(),
            });
        }
        for (k, i) in (r0..r1).enumerate() {
            self.row_mut(i)[c0..c1].copy_from_slice(values.row(k));
        }
        Ok(())
    }

    /// Returns a transposed copy of the matrix
    pub fn transpose(&self) -> DenseMatrix {
        Self::build(self.cols, self.rows, |i, j| self.data[j * self.cols + i])
    }

    /// Concatenates `other` to the right of `self`
    pub fn hstack(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.rows != other.rows {
            return Err(MatrixError::Shape {
                op: "hstack",
                left: self.shape(),
                right: other.shape(),
            });
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        for i in 0..self.rows {
            data.extend_from_slice(self.row(i));
            data.extend_from_slice(other.row(i));
        }
        Ok(Self::from_parts(self.rows, self.cols + other.cols, data))
    }

    fn zip_with(
        &self,
        other: &DenseMatrix,
        op: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<DenseMatrix> {
        self.require_same_shape(other, op)?;
        Ok(DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> DenseMatrix {
        DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn try_add(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn try_sub(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// Element-wise product of two matrices of the same shape
    pub fn hadamard(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        self.zip_with(other, "hadamard", |a, b| a * b)
    }

    pub fn abs(&self) -> DenseMatrix {
        self.map(f64::abs)
    }

    pub fn scale(&self, k: f64) -> DenseMatrix {
        self.map(|x| k * x)
    }

    /// Sets every element to `value`, in place
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Multiplies by either a matrix or a scalar
    ///
    /// For a matrix operand, `self.cols()` must equal `rhs.rows()`. Each entry is the dot product of
    /// a row of `self` with a row of the transposed right operand.
    pub fn try_mul<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<DenseMatrix> {
        let rhs = match rhs.into() {
            Operand::Scalar(k) => return Ok(self.scale(k)),
            Operand::Matrix(m) => m,
        };
        if self.cols != rhs.rows {
            return Err(MatrixError::Shape {
                op: "mul",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let rhs_t = rhs.transpose();
        Ok(Self::build(self.rows, rhs.cols, |i, j| {
            self.row(i).dot(rhs_t.row(j))
        }))
    }

    /// Raises a square matrix to a non-negative integer power by repeated multiplication, starting
    /// from the identity
    pub fn pow(&self, exponent: u32) -> Result<DenseMatrix> {
        self.require_square("pow")?;
        let mut m = Self::identity(self.rows);
        for _ in 0..exponent {
            m = m.try_mul(self)?;
        }
        Ok(m)
    }

    pub fn trace(&self) -> Result<f64> {
        self.require_square("trace")?;
        Ok((0..self.rows).map(|i| self[(i, i)]).sum())
    }
}

/// Two matrices are equal if they have the same shape and the same elements in the same positions
impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }
}

impl Default for DenseMatrix {
    fn default() -> Self {
        Self::empty()
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for shape {:?}",
            row,
            col,
            self.shape()
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for shape {:?}",
            row,
            col,
            self.shape()
        );
        &mut self.data[row * self.cols + col]
    }
}

impl Add for &DenseMatrix {
    type Output = DenseMatrix;
    fn add(self, rhs: Self) -> Self::Output {
        self.try_add(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Sub for &DenseMatrix {
    type Output = DenseMatrix;
    fn sub(self, rhs: Self) -> Self::Output {
        self.try_sub(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Neg for &DenseMatrix {
    type Output = DenseMatrix;
    fn neg(self) -> Self::Output {
        self.map(|x| -x)
    }
}

impl Neg for DenseMatrix {
    type Output = DenseMatrix;
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Mul for &DenseMatrix {
    type Output = DenseMatrix;
    fn mul(self, rhs: Self) -> Self::Output {
        self.try_mul(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Mul<f64> for &DenseMatrix {
    type Output = DenseMatrix;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<&DenseMatrix> for f64 {
    type Output = DenseMatrix;
    fn mul(self, rhs: &DenseMatrix) -> Self::Output {
        rhs.scale(self)
    }
}

/// Serialized as the nested-array (rows of columns) representation
impl Serialize for DenseMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.data.chunks(self.cols.max(1)))
    }
}

impl<'de> Deserialize<'de> for DenseMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = Vec::<Vec<f64>>::deserialize(deserializer)?;
        DenseMatrix::from_rows(rows).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn m(rows: &[&[f64]]) -> DenseMatrix {
        DenseMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.is_shape_error());
        assert!(matches!(
            err,
            MatrixError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn empty_is_canonical() {
        assert_eq!(DenseMatrix::from_rows(vec![]).unwrap().shape(), (0, 0));
        assert_eq!(DenseMatrix::from_rows(vec![vec![]]).unwrap().shape(), (0, 0));
        assert_eq!(DenseMatrix::zeros(3, 0), DenseMatrix::empty());
        assert!(DenseMatrix::default().is_empty());
    }

    #[test]
    fn identity() {
        let m = DenseMatrix::identity(20);
        for i in 0..20 {
            for j in 0..20 {
                assert_eq!(m[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn random_in_unit_interval() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m = DenseMatrix::random(&mut rng, 10, 7);
        assert_eq!(m.shape(), (10, 7));
        assert!(m.iter().all(|x| (0.0..1.0).contains(&x)));
    }

    #[test]
    fn get_and_set() {
        let mut a = m(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        assert_eq!(a.get(2, 1), Some(6.0));
        assert_eq!(a.get(3, 0), None);
        a.set(0, 0, 8.1).unwrap();
        assert_eq!(a[(0, 0)], 8.1);
        assert!(matches!(
            a.set(0, 2, 1.0),
            Err(MatrixError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn slicing_copies() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let mut s = a.slice(0..2, ..).unwrap();
        assert_eq!(s, m(&[&[1.0, 2.0], &[3.0, 4.0]]));

        s[(0, 0)] = 100.0;
        assert_eq!(a[(0, 0)], 1.0);

        assert_eq!(a.row_slice(2, 1..).unwrap(), m(&[&[6.0]]));
        assert!(a.slice(0..4, ..).is_err());
        assert!(a.row_slice(3, ..).is_err());
    }

    #[test]
    fn slicing_at_usize_limits() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert!(matches!(
            a.slice(0..=usize::MAX, ..),
            Err(MatrixError::OutOfBounds { .. })
        ));
        assert!(matches!(
            a.slice(.., (Bound::Excluded(usize::MAX), Bound::Unbounded)),
            Err(MatrixError::OutOfBounds { .. })
        ));
        assert!(a.row_slice(0, ..=usize::MAX).is_err());
        let mut b = a.clone();
        assert!(b.assign_slice(..=usize::MAX, .., &a).is_err());
        assert_eq!(b, a);
    }

    #[test]
    fn assign_slice_in_place() {
        let mut a = m(&[&[1.5, 2.0, 3.0], &[4.1, 5.0, 6.0], &[7.7, 8.0, 9.0]]);
        a.assign_slice(0..2, 0..1, &m(&[&[8.1], &[9.0]])).unwrap();
        assert_eq!(
            a,
            m(&[&[8.1, 2.0, 3.0], &[9.0, 5.0, 6.0], &[7.7, 8.0, 9.0]])
        );

        let err = a
            .assign_slice(0..2, 0..2, &m(&[&[1.0], &[2.0]]))
            .unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn search() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 2.0, 6.0]]);
        assert!(a.contains(6.0));
        assert!(!a.contains(7.0));
        assert_eq!(a.position(2.0), Some((0, 1)));
        assert_eq!(a.positions(2.0), vec![(0, 1), (1, 1)]);
        assert_eq!(a.position(9.0), None);
    }

    #[test]
    fn add_sub_neg() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[0.5, 0.5], &[0.5, 0.5]]);
        assert_eq!(&a + &b, m(&[&[1.5, 2.5], &[3.5, 4.5]]));
        assert_eq!(&a - &b, m(&[&[0.5, 1.5], &[2.5, 3.5]]));
        assert_eq!(&a + &(-&a), DenseMatrix::zeros(2, 2));

        let c = DenseMatrix::zeros(2, 3);
        assert!(a.try_add(&c).unwrap_err().is_shape_error());
        assert!(a.try_sub(&c).is_err());
    }

    #[test]
    #[should_panic(expected = "shape mismatch in add")]
    fn add_operator_panics_on_mismatch() {
        let _ = &DenseMatrix::zeros(2, 2) + &DenseMatrix::zeros(3, 2);
    }

    #[test]
    fn matrix_mult() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
        assert_eq!(&a * &b, m(&[&[19.0, 22.0], &[43.0, 50.0]]));

        let mut rng = SmallRng::seed_from_u64(1);
        let m1 = DenseMatrix::random(&mut rng, 8, 10);
        let m2 = DenseMatrix::random(&mut rng, 10, 7);
        let m3 = &m1 * &m2;
        assert_eq!(m3.shape(), (8, 7));
        for i in 0..m3.rows() {
            for j in 0..m3.cols() {
                let mut s = 0.0;
                for k in 0..m1.cols() {
                    s += m1[(i, k)] * m2[(k, j)];
                }
                assert!((m3[(i, j)] - s).abs() < 1e-12);
            }
        }

        assert!(m1.try_mul(&m1).unwrap_err().is_shape_error());
    }

    #[test]
    fn scalar_dispatch() {
        let a = m(&[&[1.0, -2.0], &[3.0, 4.0]]);
        let doubled = m(&[&[2.0, -4.0], &[6.0, 8.0]]);
        assert_eq!(a.try_mul(2.0).unwrap(), doubled);
        assert_eq!(&a * 2.0, doubled);
        assert_eq!(2.0 * &a, doubled);
        assert_eq!(a.try_mul(Operand::Matrix(&a)).unwrap(), &a * &a);
        assert_eq!(a.abs(), m(&[&[1.0, 2.0], &[3.0, 4.0]]));
    }

    #[test]
    fn hadamard() {
        let a = m(&[&[1.0, 2.0, 3.0]]);
        let b = m(&[&[4.0, 5.0, 6.0]]);
        assert_eq!(a.hadamard(&b).unwrap(), m(&[&[4.0, 10.0, 18.0]]));
        assert!(a.hadamard(&a.transpose()).is_err());
    }

    #[test]
    fn power() {
        let a = m(&[&[1.0, 1.0], &[1.0, 0.0]]);
        assert_eq!(a.pow(0).unwrap(), DenseMatrix::identity(2));
        assert_eq!(a.pow(1).unwrap(), a);
        assert_eq!(a.pow(5).unwrap(), m(&[&[8.0, 5.0], &[5.0, 3.0]]));
        assert!(DenseMatrix::zeros(2, 3).pow(2).unwrap_err().is_shape_error());
    }

    #[test]
    fn trace() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(a.trace().unwrap(), 5.0);
        assert!(DenseMatrix::zeros(1, 2).trace().is_err());
    }

    #[test]
    fn transpose() {
        let mut rng = SmallRng::seed_from_u64(1);
        let a = DenseMatrix::random(&mut rng, 10, 4);
        let t = a.transpose();
        for i in 0..a.rows() {
            for j in 0..a.cols() {
                assert_eq!(a[(i, j)], t[(j, i)]);
            }
        }
        assert_eq!(t.transpose(), a);
        assert_eq!(DenseMatrix::empty().transpose(), DenseMatrix::empty());
    }

    #[test]
    fn hstack() {
        let a = m(&[&[1.0], &[2.0]]);
        let b = m(&[&[3.0, 4.0], &[5.0, 6.0]]);
        assert_eq!(
            a.hstack(&b).unwrap(),
            m(&[&[1.0, 3.0, 4.0], &[2.0, 5.0, 6.0]])
        );
        assert!(a.hstack(&DenseMatrix::zeros(3, 1)).is_err());
    }

    #[test]
    fn equality_checks_shape() {
        let a = m(&[&[1.0, 2.0, 3.0, 4.0]]);
        let b = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_ne!(a, b);
    }

    #[test]
    fn serde_nested_arrays() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.5]]);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "[[1.0,2.0],[3.0,4.5]]");
        let back: DenseMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
        assert!(serde_json::from_str::<DenseMatrix>("[[1.0],[2.0,3.0]]").is_err());
        assert_eq!(serde_json::to_string(&DenseMatrix::empty()).unwrap(), "[]");
    }
}
