// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense row-major matrices with runtime dimensions.
//!
//! Points are multiplied homogeneously: a 2D point `(x, y)` is the row vector
//! `[x, y, 1]` (or the matching column vector), so translations compose with
//! rotations through a single product.

use core::fmt;
use core::ops::{Index, IndexMut, Mul};

use smallvec::SmallVec;

/// Storage large enough for a 3×3 matrix without allocating.
type Cells = SmallVec<[f64; 9]>;

/// A dense, row-major matrix of `f64`.
///
/// Shapes are checked at runtime. Building a matrix from ragged rows, or
/// multiplying matrices whose inner dimensions disagree, is a caller bug and
/// panics.
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Cells,
}

impl Matrix {
    /// Builds a matrix from its rows.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty, if the first row is empty, or if the rows do
    /// not all have the same length.
    #[must_use]
    pub fn from_rows(rows: &[&[f64]]) -> Self {
        assert!(!rows.is_empty(), "a matrix needs at least one row");
        let cols = rows[0].len();
        assert!(cols > 0, "a matrix needs at least one column");
        let mut cells = Cells::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                cols,
                "row {idx} has {} columns, expected {cols}",
                row.len()
            );
            cells.extend_from_slice(row);
        }
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    /// Returns a `rows × cols` matrix filled with zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be non-zero");
        Self {
            rows,
            cols,
            cells: smallvec::smallvec![0.0; rows * cols],
        }
    }

    /// Returns the `n × n` identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Returns a `1 × n` row vector.
    #[must_use]
    pub fn row_vector(values: &[f64]) -> Self {
        Self::from_rows(&[values])
    }

    /// Returns an `n × 1` column vector.
    #[must_use]
    pub fn column_vector(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "a vector needs at least one component");
        Self {
            rows: values.len(),
            cols: 1,
            cells: Cells::from_slice(values),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `r` as a slice.
    #[must_use]
    pub fn row(&self, r: usize) -> &[f64] {
        let start = r * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Returns the transposed matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out[(c, r)] = self[(r, c)];
            }
        }
        out
    }

    /// Standard matrix product `self × rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `self.cols() != rhs.rows()`.
    #[must_use]
    pub fn multiply(&self, rhs: &Self) -> Self {
        assert_eq!(
            self.cols, rhs.rows,
            "cannot multiply a {}x{} matrix by a {}x{} matrix",
            self.rows, self.cols, rhs.rows, rhs.cols
        );
        let mut out = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut acc = 0.0;
                for k in 0..rhs.rows {
                    acc += self[(i, k)] * rhs[(k, j)];
                }
                out[(i, j)] = acc;
            }
        }
        out
    }

    /// Returns `true` if both matrices have the same shape and every pair of
    /// cells differs by at most `epsilon`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for a {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.cells[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for a {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.cells[r * self.cols + c]
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        self.multiply(rhs)
    }
}

impl Mul for Matrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for r in 0..self.rows {
            list.entry(&self.row(r));
        }
        list.finish()
    }
}

/// Builds a [`Matrix`] from bracketed rows.
///
/// ```
/// use understory_touch_math::matrix;
///
/// let m = matrix![[1.0, 2.0], [3.0, 4.0]];
/// assert_eq!(m.rows(), 2);
/// assert_eq!(m[(1, 0)], 3.0);
/// ```
#[macro_export]
macro_rules! matrix {
    ($([$($x:expr),+ $(,)?]),+ $(,)?) => {
        $crate::Matrix::from_rows(&[$(&[$($x),+][..]),+])
    };
}

#[cfg(test)]
mod tests {
    use super::Matrix;

    #[test]
    fn identity_is_neutral() {
        let m = matrix![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        assert_eq!(&m * &Matrix::identity(3), m);
        assert_eq!(&Matrix::identity(3) * &m, m);
    }

    #[test]
    fn transpose_swaps_shape() {
        let m = matrix![[1.0, 2.0, 3.0]];
        let t = m.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 1);
        assert_eq!(t, Matrix::column_vector(&[1.0, 2.0, 3.0]));
    }

    #[test]
    #[should_panic(expected = "cannot multiply a 2x2 matrix by a 3x1 matrix")]
    fn mismatched_product_panics() {
        let a = matrix![[1.0, 0.0], [0.0, 1.0]];
        let b = Matrix::column_vector(&[1.0, 2.0, 3.0]);
        let _ = &a * &b;
    }

    #[test]
    #[should_panic(expected = "row 1 has 2 columns, expected 3")]
    fn ragged_rows_panic() {
        let _ = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0]]);
    }

    #[test]
    fn approx_eq_checks_shape() {
        let row = Matrix::row_vector(&[1.0, 2.0]);
        let col = Matrix::column_vector(&[1.0, 2.0]);
        assert!(!row.approx_eq(&col, 1.0));
        assert!(row.approx_eq(&Matrix::row_vector(&[1.0005, 1.9995]), 1e-3));
    }
}
