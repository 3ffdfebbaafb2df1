//! Helper functions for matrix operations

use crate::types::Matrix;
use stepwise_core::{format_number, DecimalPlaces, StepwiseError, Value};

/// Extract a matrix from a Value (`[]` counts as the empty matrix)
pub fn extract_matrix(value: &Value, op: &str, arg: &str) -> Result<Matrix, StepwiseError> {
    match value {
        Value::Matrix(rows) => Matrix::from_rows(rows.clone()).map_err(|e| e.in_operation(op)),
        Value::Vector(v) if v.is_empty() => Ok(Matrix::default()),
        _ => Err(StepwiseError::arg_type(op, arg, "Matrix", value.type_name())),
    }
}

/// Extract a flat vector from a Value. An N×1 column matrix is accepted too.
pub fn extract_vector(value: &Value, op: &str, arg: &str) -> Result<Vec<f64>, StepwiseError> {
    match value {
        Value::Vector(v) => Ok(v.clone()),
        Value::Matrix(rows) if rows.iter().all(|r| r.len() == 1) => {
            Ok(rows.iter().map(|r| r[0]).collect())
        }
        _ => Err(StepwiseError::arg_type(op, arg, "Vector", value.type_name())),
    }
}

/// Bracketed multi-line snapshot of a matrix for a trace
pub fn matrix_block(m: &Matrix, dp: DecimalPlaces, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let rows: Vec<String> = m.as_rows().iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|&v| format_number(v, dp)).collect();
            format!("[{}]", cells.join(", "))
        })
        .collect();
    format!("{}[{}]", pad, rows.join(&format!(",\n{} ", pad)))
}

/// `[x1, x2, …]ᵀ`, a column written on one line
pub fn column_line(values: &[f64], dp: DecimalPlaces) -> String {
    let cells: Vec<String> = values.iter().map(|&v| format_number(v, dp)).collect();
    format!("[{}]ᵀ", cells.join(", "))
}

/// `+` or `-` for the cofactor sign `(-1)^k`
pub fn sign_symbol(k: usize) -> char {
    if k % 2 == 0 { '+' } else { '-' }
}

pub fn sign_value(k: usize) -> f64 {
    if k % 2 == 0 { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::codes;

    #[test]
    fn test_extract_matrix() {
        let val = Value::Matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let m = extract_matrix(&val, "test", "a").unwrap();
        assert_eq!(m.shape(), "2×2");

        assert!(extract_matrix(&Value::Vector(vec![]), "test", "a").unwrap().is_empty());

        let err = extract_matrix(&Value::Number(1.0), "test", "a").unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);

        let err = extract_matrix(&Value::Matrix(vec![vec![1.0], vec![]]), "test", "a").unwrap_err();
        assert_eq!(err.code, codes::RAGGED_MATRIX);
        assert_eq!(err.operation.as_deref(), Some("test"));
    }

    #[test]
    fn test_extract_vector_accepts_column() {
        let col = Value::Matrix(vec![vec![5.0], vec![10.0]]);
        assert_eq!(extract_vector(&col, "test", "b").unwrap(), vec![5.0, 10.0]);
        assert!(extract_vector(&Value::Matrix(vec![vec![1.0, 2.0]]), "test", "b").is_err());
    }

    #[test]
    fn test_matrix_block() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let block = matrix_block(&m, DecimalPlaces::new(1), 2);
        assert_eq!(block, "  [[1.0, 2.0],\n   [3.0, 4.0]]");
        assert_eq!(column_line(&[1.0, 3.0], DecimalPlaces::new(0)), "[1, 3]ᵀ");
    }
}
