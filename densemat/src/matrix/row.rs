use ref_cast::RefCast;
use std::ops::{Deref, DerefMut};

/// A borrowed row of a [`super::DenseMatrix`], represented as a slice of `f64`
///
/// Provides the row kernels used by elimination and products. Dereferences to `[f64]`, so the
/// usual slice methods (indexing, `iter`, `to_vec`, ...) are available.
#[derive(RefCast, PartialEq, Debug)]
#[repr(transparent)]
pub struct Row([f64]);

impl Row {
    #[inline]
    pub fn from_slice(values: &[f64]) -> &Row {
        Row::ref_cast(values)
    }

    #[inline]
    pub fn from_mut_slice(values: &mut [f64]) -> &mut Row {
        Row::ref_cast_mut(values)
    }

    #[inline]
    pub fn dot(&self, other: &Row) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// The largest magnitude of any element, 0 for an empty row
    pub fn max_abs(&self) -> f64 {
        self.0.iter().fold(0.0, |acc: f64, x| acc.max(x.abs()))
    }

    /// Adds `factor * other` to this row, elementwise
    #[inline]
    pub fn add_scaled(&mut self, factor: f64, other: &[f64]) {
        self.0
            .iter_mut()
            .zip(other.iter())
            .for_each(|(a, b)| *a += factor * b);
    }

    #[inline]
    pub fn scale(&mut self, k: f64) {
        self.0.iter_mut().for_each(|a| *a *= k);
    }
}

impl Deref for Row {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
