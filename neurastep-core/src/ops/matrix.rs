// neurastep-core/src/ops/matrix.rs

use crate::error::NeuraStepError;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Dense row-major matrix of `f64`.
///
/// Serialized as a list of rows so persisted networks stay readable
/// (`[[0.1, 0.2], [0.3, 0.4]]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from row-major data, checking `data.len() == rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, NeuraStepError> {
        if data.len() != rows * cols {
            return Err(NeuraStepError::dimension(
                "matrix from_vec",
                rows * cols,
                data.len(),
            ));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from nested rows. Ragged input is rejected.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, NeuraStepError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(NeuraStepError::dimension("matrix from_rows", n_cols, row.len()));
            }
            data.extend(row);
        }
        Ok(Matrix {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        out
    }

    pub fn scale(&self, scalar: f64) -> Matrix {
        self.map(|x| scalar * x)
    }

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(
        &self,
        other: &Matrix,
        operation: &str,
        f: F,
    ) -> Result<Matrix, NeuraStepError> {
        if self.shape() != other.shape() {
            return Err(NeuraStepError::ShapeMismatch {
                operation: operation.to_string(),
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix, NeuraStepError> {
        self.zip_with(other, "matrix add", |a, b| a + b)
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix, NeuraStepError> {
        self.zip_with(other, "matrix sub", |a, b| a - b)
    }

    pub fn mul(&self, other: &Matrix) -> Result<Matrix, NeuraStepError> {
        self.zip_with(other, "matrix mul", |a, b| a * b)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        &mut self.data[row * self.cols + col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = NeuraStepError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}

/// Row-vector × matrix product: `v[1×K] · m[K×N] → [1×N]`.
///
/// Each output element is accumulated from `0.0` in row order, the same
/// order the detailed forward steps use, so both granularities agree bit for bit.
pub fn vec_mat_mul(v: &[f64], m: &Matrix) -> Result<Vec<f64>, NeuraStepError> {
    if v.len() != m.rows() {
        return Err(NeuraStepError::dimension("row-vector x matrix", m.rows(), v.len()));
    }
    let mut out = vec![0.0; m.cols()];
    for (j, slot) in out.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (i, &x) in v.iter().enumerate() {
            sum += x * m[(i, j)];
        }
        *slot = sum;
    }
    Ok(out)
}

/// Outer product `a ⊗ b`, shape `len(a) × len(b)`.
pub fn outer(a: &[f64], b: &[f64]) -> Matrix {
    let mut out = Matrix::zeros(a.len(), b.len());
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[(i, j)] = x * y;
        }
    }
    out
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod tests;
