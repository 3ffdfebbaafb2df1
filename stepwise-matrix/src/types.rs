//! Core matrix type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use stepwise_core::{format_plain, StepwiseError, Value};

/// Rectangular row-major grid of `f64`.
///
/// Every row has the same length; [`Matrix::from_rows`] rejects anything
/// else. A matrix with no rows, or with rows of length zero, is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Build from rows, checking that the grid is rectangular
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self, StepwiseError> {
        if let Some(first) = data.first() {
            let cols = first.len();
            for (i, row) in data.iter().enumerate() {
                if row.len() != cols {
                    return Err(StepwiseError::ragged_matrix(i, row.len(), cols));
                }
            }
        }
        Ok(Matrix { data })
    }

    /// Build from rows the caller already knows are rectangular
    pub(crate) fn from_rows_unchecked(data: Vec<Vec<f64>>) -> Self {
        Matrix { data }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix { data: vec![vec![0.0; cols]; rows] }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i][i] = 1.0;
        }
        m
    }

    /// N×1 column matrix holding `values`
    pub fn column(values: &[f64]) -> Self {
        Matrix { data: values.iter().map(|&v| vec![v]).collect() }
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    pub fn cols(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows() == other.rows() && self.cols() == other.cols()
    }

    /// `"2×3"`
    pub fn shape(&self) -> String {
        format!("{}×{}", self.rows(), self.cols())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    pub fn as_rows(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.data
    }

    /// Submatrix with one row and one column deleted
    pub fn minor(&self, row: usize, col: usize) -> Matrix {
        let data = self.data.iter()
            .enumerate()
            .filter(|(i, _)| *i != row)
            .map(|(_, r)| {
                r.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != col)
                    .map(|(_, &v)| v)
                    .collect()
            })
            .collect();
        Matrix { data }
    }

    /// Copy with column `col` replaced by `values`
    pub fn with_column(&self, col: usize, values: &[f64]) -> Matrix {
        let mut data = self.data.clone();
        for (row, &v) in data.iter_mut().zip(values) {
            row[col] = v;
        }
        Matrix { data }
    }

    /// Plain transpose, no narration
    pub fn transposed(&self) -> Matrix {
        let (rows, cols) = (self.rows(), self.cols());
        let mut out = Matrix::zeros(cols, rows);
        for i in 0..rows {
            for j in 0..cols {
                out.data[j][i] = self.data[i][j];
            }
        }
        out
    }

    /// Flatten an N×1 matrix into its column
    pub fn first_column(&self) -> Vec<f64> {
        self.data.iter().filter_map(|r| r.first().copied()).collect()
    }

    /// Largest absolute elementwise difference; infinite when shapes differ
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        if !self.same_shape(other) {
            return f64::INFINITY;
        }
        self.data.iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = StepwiseError;

    fn try_from(data: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(data)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.data
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m.data)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self.data.iter()
            .map(|r| {
                let cells: Vec<String> = r.iter().map(|&v| format_plain(v)).collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        write!(f, "[{}]", rows.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::codes;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_matrix_creation() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(a.rows(), 2);
        assert_eq!(a.cols(), 3);
        assert!(!a.is_square());
        assert_eq!(a.shape(), "2×3");
        assert_eq!(a.get(1, 2), Some(6.0));
        assert_eq!(a.get(2, 0), None);
        assert_eq!(a[(0, 1)], 2.0);
    }

    #[test]
    fn test_ragged_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err.code, codes::RAGGED_MATRIX);
        assert!(err.message.contains("row 2"));
    }

    #[test]
    fn test_empty_shapes() {
        assert!(Matrix::default().is_empty());
        let one_by_zero = Matrix::from_rows(vec![vec![]]).unwrap();
        assert!(one_by_zero.is_empty());
        assert_eq!(one_by_zero.rows(), 1);
        assert!(!one_by_zero.is_square());
    }

    #[test]
    fn test_minor_and_column() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        assert_eq!(a.minor(0, 1), m(&[&[4.0, 6.0], &[7.0, 9.0]]));
        assert_eq!(a.with_column(2, &[0.0, 0.0, 1.0]).row(2), &[7.0, 8.0, 1.0]);
        assert_eq!(Matrix::column(&[5.0, 6.0]).first_column(), vec![5.0, 6.0]);
    }

    #[test]
    fn test_serde_validates() {
        let ok: Matrix = serde_json::from_str("[[1, 2], [3, 4]]").unwrap();
        assert_eq!(ok.to_string(), "[[1, 2], [3, 4]]");
        assert!(serde_json::from_str::<Matrix>("[[1, 2], [3]]").is_err());
    }
}
