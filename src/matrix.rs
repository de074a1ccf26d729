#![allow(dead_code)]
use crate::error::MatrixError;
use ndarray::prelude::*;

/// Dense row-major matrix of `f64` values.
///
/// A vector is a `Matrix` with one row or one column; a scalar is 1x1.
/// Every arithmetic operation returns a new instance; callers that need to
/// reuse storage copy explicitly via `clone`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(pub(crate) Array2<f64>);

impl Matrix {
    /// Create a matrix of the given shape with every element set to `value`
    pub fn fill(rows: usize, cols: usize, value: f64) -> Self {
        Matrix(Array2::from_elem((rows, cols), value))
    }

    /// Create a matrix of the given shape filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix(Array2::zeros((rows, cols)))
    }

    /// Create a matrix of the given shape filled with ones
    pub fn ones(rows: usize, cols: usize) -> Self {
        Matrix(Array2::ones((rows, cols)))
    }

    /// Create an identity matrix of the given size
    pub fn eye(size: usize) -> Self {
        Matrix(Array2::eye(size))
    }

    /// Create a matrix from nested row data
    ///
    /// Row count is the outer length, column count the first inner length.
    /// All inner rows must have equal length.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if data.iter().any(|row| row.len() != cols) {
            return Err(MatrixError::InvalidShape);
        }
        let flat: Vec<f64> = data.into_iter().flatten().collect();
        let inner =
            Array2::from_shape_vec((rows, cols), flat).map_err(|_| MatrixError::InvalidShape)?;
        Ok(Matrix(inner))
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.0.ncols()
    }

    /// Shape as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.0.dim()
    }

    /// Total element count
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the matrix has a single row or a single column
    pub fn is_vector(&self) -> bool {
        self.nrows() == 1 || self.ncols() == 1
    }

    /// Element access
    pub fn get(&self, r: usize, c: usize) -> Result<f64, MatrixError> {
        self.0
            .get((r, c))
            .copied()
            .ok_or(MatrixError::IndexOutOfRange)
    }

    /// Element assignment
    pub fn set(&mut self, r: usize, c: usize, value: f64) -> Result<(), MatrixError> {
        match self.0.get_mut((r, c)) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(MatrixError::IndexOutOfRange),
        }
    }

    /// Get row `r` as a new 1 x cols matrix
    pub fn row(&self, r: usize) -> Result<Self, MatrixError> {
        if r >= self.nrows() {
            return Err(MatrixError::IndexOutOfRange);
        }
        Ok(Matrix(self.0.row(r).to_owned().insert_axis(Axis(0))))
    }

    /// Get column `c` as a new rows x 1 matrix
    pub fn col(&self, c: usize) -> Result<Self, MatrixError> {
        if c >= self.ncols() {
            return Err(MatrixError::IndexOutOfRange);
        }
        Ok(Matrix(self.0.column(c).to_owned().insert_axis(Axis(1))))
    }

    /// Overwrite row `r` from a 1 x cols matrix
    pub fn set_row(&mut self, r: usize, row: &Self) -> Result<(), MatrixError> {
        if r >= self.nrows() {
            return Err(MatrixError::IndexOutOfRange);
        }
        if row.dim() != (1, self.ncols()) {
            return Err(MatrixError::ShapeMismatch);
        }
        self.0.row_mut(r).assign(&row.0.row(0));
        Ok(())
    }

    /// Overwrite column `c` from a rows x 1 matrix
    pub fn set_col(&mut self, c: usize, col: &Self) -> Result<(), MatrixError> {
        if c >= self.ncols() {
            return Err(MatrixError::IndexOutOfRange);
        }
        if col.dim() != (self.nrows(), 1) {
            return Err(MatrixError::ShapeMismatch);
        }
        self.0.column_mut(c).assign(&col.0.column(0));
        Ok(())
    }

    /// Transpose into a new cols x rows matrix
    pub fn transpose(&self) -> Self {
        let (rows, cols) = self.dim();
        Matrix(Array2::from_shape_fn((cols, rows), |(i, j)| self.0[(j, i)]))
    }

    fn zip_broadcast<F>(&self, other: &Self, op: F) -> Result<Self, MatrixError>
    where
        F: Fn(f64, f64) -> f64,
    {
        let (m, n) = self.dim();
        let (p, q) = other.dim();
        let mut out = self.0.clone();
        if (p, q) == (m, n) {
            for ((i, j), a) in out.indexed_iter_mut() {
                *a = op(*a, other.0[(i, j)]);
            }
        } else if p == 1 && q == n {
            // row vector broadcast across rows
            for ((_, j), a) in out.indexed_iter_mut() {
                *a = op(*a, other.0[(0, j)]);
            }
        } else if q == 1 && p == m {
            // column vector broadcast across columns
            for ((i, _), a) in out.indexed_iter_mut() {
                *a = op(*a, other.0[(i, 0)]);
            }
        } else {
            return Err(MatrixError::ShapeMismatch);
        }
        Ok(Matrix(out))
    }

    /// Elementwise addition
    ///
    /// `other` must have the same shape, or be a row vector matching the
    /// column count, or a column vector matching the row count.
    pub fn add(&self, other: &Self) -> Result<Self, MatrixError> {
        self.zip_broadcast(other, |a, b| a + b)
    }

    /// Elementwise subtraction, with the same broadcast rules as `add`
    pub fn sub(&self, other: &Self) -> Result<Self, MatrixError> {
        self.zip_broadcast(other, |a, b| a - b)
    }

    /// Add a scalar to every element
    pub fn add_scalar(&self, k: f64) -> Self {
        Matrix(&self.0 + k)
    }

    /// Subtract a scalar from every element
    pub fn sub_scalar(&self, k: f64) -> Self {
        Matrix(&self.0 - k)
    }

    /// Elementwise sign flip
    pub fn neg(&self) -> Self {
        Matrix(-&self.0)
    }

    /// Multiply every element by a scalar
    pub fn mul_scalar(&self, k: f64) -> Self {
        Matrix(&self.0 * k)
    }

    /// Divide every element by a scalar
    pub fn div_scalar(&self, k: f64) -> Self {
        Matrix(&self.0 / k)
    }

    /// Elementwise `k / a`, no zero-check; Inf/NaN propagate per IEEE-754
    pub fn recip_scale(&self, k: f64) -> Self {
        Matrix(self.0.mapv(|a| k / a))
    }

    /// Matrix product; requires `self.ncols() == other.nrows()`
    pub fn matmul(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.ncols() != other.nrows() {
            return Err(MatrixError::DimensionMismatch);
        }
        Ok(Matrix(self.0.dot(&other.0)))
    }

    /// Elementwise exponential
    pub fn exp(&self) -> Self {
        Matrix(self.0.mapv(f64::exp))
    }

    /// Elementwise natural logarithm
    pub fn ln(&self) -> Self {
        Matrix(self.0.mapv(f64::ln))
    }

    /// Elementwise power
    pub fn powf(&self, alpha: f64) -> Self {
        Matrix(self.0.mapv(|a| a.powf(alpha)))
    }

    /// Sum of all elements
    pub fn sum(&self) -> f64 {
        self.0.sum()
    }

    /// Largest element of row `r` and its column index; ties resolve to the
    /// lowest index
    pub fn row_argmax(&self, r: usize) -> Result<(f64, usize), MatrixError> {
        if r >= self.nrows() {
            return Err(MatrixError::IndexOutOfRange);
        }
        if self.ncols() == 0 {
            return Err(MatrixError::InvalidShape);
        }
        let row = self.0.row(r);
        let mut best = (row[0], 0usize);
        for (j, &v) in row.iter().enumerate().skip(1) {
            if v > best.0 {
                best = (v, j);
            }
        }
        Ok(best)
    }

    /// Elementwise logistic function `1 / (1 + exp(-a))`
    pub fn sigmoid(&self) -> Self {
        self.neg().exp().add_scalar(1.0).recip_scale(1.0)
    }

    /// Inner product of two equal-length vectors, iterating both buffers in
    /// row-major order
    pub fn dot(&self, other: &Self) -> Result<f64, MatrixError> {
        if self.len() != other.len() {
            return Err(MatrixError::DimensionMismatch);
        }
        Ok(self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| a * b)
            .sum())
    }

    /// Euclidean norm over all elements
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|&a| a * a).sum::<f64>().sqrt()
    }

    /// Access the inner ndarray
    pub fn inner(&self) -> &Array2<f64> {
        &self.0
    }

    /// Convert to the inner ndarray, consuming self
    pub fn into_inner(self) -> Array2<f64> {
        self.0
    }
}

impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.0[index]
    }
}

#[cfg(test)]
mod matrix_tests {
    use super::*;
    use float_cmp::{F64Margin, approx_eq};

    const MARGIN: F64Margin = F64Margin {
        epsilon: 1e-12,
        ulps: 4,
    };

    fn sample() -> Matrix {
        Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_fill_and_shape() {
        let m = Matrix::fill(2, 3, 7.5);
        assert_eq!(m.dim(), (2, 3));
        assert_eq!(m.len(), 6);
        assert!(m.inner().iter().all(|&x| x == 7.5));
    }

    #[test]
    fn test_zeros_ones_eye() {
        let z = Matrix::zeros(3, 2);
        assert!(z.inner().iter().all(|&x| x == 0.0));
        let o = Matrix::ones(2, 2);
        assert_eq!(o.sum(), 4.0);
        let i = Matrix::eye(3);
        assert_eq!(i[(0, 0)], 1.0);
        assert_eq!(i[(0, 1)], 0.0);
        assert_eq!(i.sum(), 3.0);
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(result.unwrap_err(), MatrixError::InvalidShape);
    }

    #[test]
    fn test_get_set() {
        let mut m = sample();
        assert_eq!(m.get(1, 2).unwrap(), 6.0);
        m.set(1, 2, -6.0).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), -6.0);
        assert_eq!(m.get(2, 0).unwrap_err(), MatrixError::IndexOutOfRange);
        assert_eq!(m.get(0, 3).unwrap_err(), MatrixError::IndexOutOfRange);
        assert_eq!(
            m.set(9, 0, 0.0).unwrap_err(),
            MatrixError::IndexOutOfRange
        );
    }

    #[test]
    fn test_row_col_access() {
        let m = sample();
        let r = m.row(1).unwrap();
        assert_eq!(r.dim(), (1, 3));
        assert_eq!(r[(0, 0)], 4.0);
        let c = m.col(2).unwrap();
        assert_eq!(c.dim(), (2, 1));
        assert_eq!(c[(1, 0)], 6.0);
        assert_eq!(m.row(2).unwrap_err(), MatrixError::IndexOutOfRange);
        assert_eq!(m.col(3).unwrap_err(), MatrixError::IndexOutOfRange);
    }

    #[test]
    fn test_set_row_set_col() {
        let mut m = sample();
        let new_row = Matrix::from_rows(vec![vec![9.0, 8.0, 7.0]]).unwrap();
        m.set_row(0, &new_row).unwrap();
        assert_eq!(m[(0, 1)], 8.0);

        let new_col = Matrix::from_rows(vec![vec![1.5], vec![2.5]]).unwrap();
        m.set_col(2, &new_col).unwrap();
        assert_eq!(m[(1, 2)], 2.5);

        let wrong = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        assert_eq!(m.set_row(0, &wrong).unwrap_err(), MatrixError::ShapeMismatch);
        assert_eq!(m.set_col(0, &wrong).unwrap_err(), MatrixError::ShapeMismatch);
        assert_eq!(
            m.set_row(5, &new_row).unwrap_err(),
            MatrixError::IndexOutOfRange
        );
    }

    #[test]
    fn test_transpose_involutive() {
        let m = sample();
        let t = m.transpose();
        assert_eq!(t.dim(), (3, 2));
        assert_eq!(t[(2, 1)], 6.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_add_sub_same_shape() {
        let a = sample();
        let b = Matrix::fill(2, 3, 0.5);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum[(0, 0)], 1.5);
        // (A + B) - B == A
        let back = sum.sub(&b).unwrap();
        for (x, y) in back.inner().iter().zip(a.inner().iter()) {
            assert!(approx_eq!(f64, *x, *y, MARGIN));
        }
    }

    #[test]
    fn test_row_vector_broadcast() {
        let m = sample();
        let r = Matrix::from_rows(vec![vec![10.0, 20.0, 30.0]]).unwrap();
        let out = m.add(&r).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(out[(i, j)], m[(i, j)] + r[(0, j)]);
            }
        }
    }

    #[test]
    fn test_col_vector_broadcast() {
        let m = sample();
        let c = Matrix::from_rows(vec![vec![100.0], vec![200.0]]).unwrap();
        let out = m.sub(&c).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(out[(i, j)], m[(i, j)] - c[(i, 0)]);
            }
        }
    }

    #[test]
    fn test_broadcast_shape_mismatch() {
        let m = sample();
        let bad = Matrix::fill(3, 3, 1.0);
        assert_eq!(m.add(&bad).unwrap_err(), MatrixError::ShapeMismatch);
        let bad_row = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        assert_eq!(m.add(&bad_row).unwrap_err(), MatrixError::ShapeMismatch);
        let bad_col = Matrix::from_rows(vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        assert_eq!(m.sub(&bad_col).unwrap_err(), MatrixError::ShapeMismatch);
    }

    #[test]
    fn test_scalar_arithmetic() {
        let m = sample();
        assert_eq!(m.add_scalar(1.0)[(0, 0)], 2.0);
        assert_eq!(m.sub_scalar(1.0)[(1, 2)], 5.0);
        assert_eq!(m.mul_scalar(2.0)[(1, 0)], 8.0);
        assert_eq!(m.div_scalar(2.0)[(0, 1)], 1.0);
        assert_eq!(m.neg()[(0, 2)], -3.0);
    }

    #[test]
    fn test_recip_scale_ieee() {
        let m = Matrix::from_rows(vec![vec![2.0, 0.0, -4.0]]).unwrap();
        let r = m.recip_scale(1.0);
        assert_eq!(r[(0, 0)], 0.5);
        assert!(r[(0, 1)].is_infinite());
        assert_eq!(r[(0, 2)], -0.25);
    }

    #[test]
    fn test_matmul_identity() {
        let m = sample();
        let left = Matrix::eye(2).matmul(&m).unwrap();
        assert_eq!(left, m);
        let right = m.matmul(&Matrix::eye(3)).unwrap();
        assert_eq!(right, m);
    }

    #[test]
    fn test_matmul_values() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
        let p = a.matmul(&b).unwrap();
        assert_eq!(p[(0, 0)], 19.0);
        assert_eq!(p[(0, 1)], 22.0);
        assert_eq!(p[(1, 0)], 43.0);
        assert_eq!(p[(1, 1)], 50.0);
    }

    #[test]
    fn test_matmul_dimension_mismatch() {
        let a = sample();
        assert_eq!(a.matmul(&a).unwrap_err(), MatrixError::DimensionMismatch);
    }

    #[test]
    fn test_elementwise_transcendental() {
        let m = Matrix::from_rows(vec![vec![0.0, 1.0]]).unwrap();
        let e = m.exp();
        assert!(approx_eq!(f64, e[(0, 0)], 1.0, MARGIN));
        assert!(approx_eq!(f64, e[(0, 1)], std::f64::consts::E, MARGIN));
        let l = e.ln();
        assert!(approx_eq!(f64, l[(0, 1)], 1.0, MARGIN));
        let p = Matrix::from_rows(vec![vec![3.0]]).unwrap().powf(2.0);
        assert!(approx_eq!(f64, p[(0, 0)], 9.0, MARGIN));
    }

    #[test]
    fn test_sum() {
        assert_eq!(sample().sum(), 21.0);
        assert_eq!(Matrix::zeros(0, 0).sum(), 0.0);
    }

    #[test]
    fn test_row_argmax_ties_to_first() {
        let m = Matrix::from_rows(vec![vec![2.0, 5.0, 5.0, 1.0]]).unwrap();
        assert_eq!(m.row_argmax(0).unwrap(), (5.0, 1));
        let m2 = Matrix::from_rows(vec![vec![1.0, 2.0], vec![7.0, -3.0]]).unwrap();
        assert_eq!(m2.row_argmax(1).unwrap(), (7.0, 0));
        assert_eq!(m2.row_argmax(2).unwrap_err(), MatrixError::IndexOutOfRange);
    }

    #[test]
    fn test_sigmoid_values() {
        let m = Matrix::from_rows(vec![vec![0.0, 40.0, -40.0]]).unwrap();
        let s = m.sigmoid();
        assert!(approx_eq!(f64, s[(0, 0)], 0.5, MARGIN));
        assert!(s[(0, 1)] > 1.0 - 1e-12);
        assert!(s[(0, 2)] < 1e-12);
    }

    #[test]
    fn test_dot_and_norm() {
        let a = Matrix::from_rows(vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![4.0, 5.0, 6.0]]).unwrap();
        // orientation does not matter for equal-length vectors
        assert_eq!(a.dot(&b).unwrap(), 32.0);
        assert!(approx_eq!(f64, a.norm(), 14.0_f64.sqrt(), MARGIN));
        let short = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        assert_eq!(a.dot(&short).unwrap_err(), MatrixError::DimensionMismatch);
    }
}
