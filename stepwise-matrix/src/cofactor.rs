//! Cofactors and the adjoint (adjugate) matrix

use crate::determinant::determinant;
use crate::helpers::{extract_matrix, matrix_block, sign_symbol, sign_value};
use crate::types::Matrix;
use stepwise_core::{format_number, DecimalPlaces, Failure, Outcome, StepwiseError, Trace, Value};
use stepwise_plugin::{ArgMeta, EvalContext, OperationMeta, OperationPlugin, Report};
use tracing::debug;

/// `(-1)^(row+col) · det(minor(row, col))`; NaN unless `m` is square and non-empty
pub fn cofactor(m: &Matrix, row: usize, col: usize) -> f64 {
    if m.is_empty() || !m.is_square() {
        return f64::NAN;
    }
    // the empty minor of a 1×1 matrix has determinant 1 here, so Adj([[a]]) = [[1]]
    if m.rows() == 1 {
        return 1.0;
    }
    sign_value(row + col) * determinant(&m.minor(row, col))
}

/// Matrix of every cofactor of `m`
pub fn cofactor_matrix(m: &Matrix, dp: DecimalPlaces) -> Outcome<Matrix> {
    let mut trace = Trace::new();
    if m.is_empty() {
        trace.line("Error: the matrix is empty.");
        return trace.fail(Failure::shape("cofactors of an empty matrix"));
    }
    if !m.is_square() {
        trace.line(format!("Error: cofactors need a square matrix, this one is {}.", m.shape()));
        return trace.fail(Failure::shape(format!("cofactors of a {} matrix", m.shape())));
    }

    let n = m.rows();
    trace.line("Matrix of cofactors:");
    trace.line("  C[i, j] = (-1)^(i+j) × det(Submatrix(i, j))");

    let mut data = vec![vec![0.0; n]; n];
    for (i, row) in data.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let c = cofactor(m, i, j);
            *cell = c;
            trace.line(format!(
                "  C[{}, {}] = ({}1) × det(Submatrix({}, {})) = {}",
                i + 1,
                j + 1,
                sign_symbol(i + j),
                i + 1,
                j + 1,
                format_number(c, dp)
            ));
        }
    }

    let cofactors = Matrix::from_rows_unchecked(data);
    trace.line("Cofactor matrix (C):");
    trace.line(matrix_block(&cofactors, dp, 4));
    trace.ok(cofactors)
}

/// Adjoint: the transpose of the cofactor matrix
pub fn adjoint(m: &Matrix, dp: DecimalPlaces) -> Outcome<Matrix> {
    debug!(rows = m.rows(), cols = m.cols(), "adjoint");
    let mut trace = Trace::new();
    trace.line("Adjoint matrix:");
    trace.line("Original matrix (A):");
    trace.line(matrix_block(m, dp, 4));

    let Outcome { result, steps, .. } = cofactor_matrix(m, dp);
    trace.absorb(steps);
    let cofactors = match result {
        Ok(c) => c,
        Err(failure) => return trace.fail(failure),
    };

    trace.line("Adj(A) = transpose of the cofactor matrix:");
    trace.line("  Adj(A)[j, i] = C[i, j]");
    let n = cofactors.rows();
    for i in 0..n {
        for j in 0..n {
            trace.line(format!(
                "  Adj(A)[{}, {}] = C[{}, {}] = {}",
                j + 1,
                i + 1,
                i + 1,
                j + 1,
                format_number(cofactors[(i, j)], dp)
            ));
        }
    }

    let adj = cofactors.transposed();
    trace.line("Adjoint matrix (Adj(A)):");
    trace.line(matrix_block(&adj, dp, 4));
    trace.line("Done.");
    trace.ok(adj)
}

// ============================================================================
// ADJOINT
// ============================================================================

pub struct AdjointFn;

static ADJ_ARGS: [ArgMeta; 1] = [ArgMeta::required("a", "Matrix", "Square matrix")];
static ADJ_EXAMPLES: [&str; 1] = ["adjoint([[1, 2], [3, 4]]) → [[4, -2], [-3, 1]]"];
static ADJ_RELATED: [&str; 2] = ["inverse", "determinant"];

impl OperationPlugin for AdjointFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "adjoint",
            label: "Adjoint",
            description: "Adjoint (adjugate) matrix: the transpose of the cofactor matrix",
            usage: "adjoint(a)",
            args: &ADJ_ARGS,
            returns: "Matrix",
            examples: &ADJ_EXAMPLES,
            category: "matrix",
            related: &ADJ_RELATED,
            requires_two_operands: false,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 1 {
            return Err(StepwiseError::arg_count("adjoint", 1, args.len()));
        }
        let m = extract_matrix(&args[0], "adjoint", "a")?;
        Ok(adjoint(&m, ctx.precision).map(Value::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_cofactor() {
        let a = m(&[&[1.0, 2.0, 3.0], &[0.0, 4.0, 5.0], &[1.0, 0.0, 6.0]]);
        assert_eq!(cofactor(&a, 0, 0), 24.0);
        assert_eq!(cofactor(&a, 0, 1), 5.0);
        assert_eq!(cofactor(&a, 1, 0), -12.0);
        assert!(cofactor(&m(&[&[1.0, 2.0]]), 0, 0).is_nan());
        assert_eq!(cofactor(&m(&[&[5.0]]), 0, 0), 1.0);
    }

    #[test]
    fn test_adjoint_two_by_two() {
        let out = adjoint(&m(&[&[1.0, 2.0], &[3.0, 4.0]]), DecimalPlaces::default());
        assert_eq!(out.value(), Some(&m(&[&[4.0, -2.0], &[-3.0, 1.0]])));
        assert!(out.mentions("C[1, 2] = (-1) × det(Submatrix(1, 2)) = -3.00"));
        assert!(out.mentions("Adj(A)[2, 1] = C[1, 2] = -3.00"));
        assert_eq!(out.last_step(), Some("Done."));
    }

    #[test]
    fn test_adjoint_times_matrix_is_det_identity() {
        let a = m(&[&[2.0, -1.0, 0.0], &[1.0, 3.0, 2.0], &[0.0, 1.0, 4.0]]);
        let adj = adjoint(&a, DecimalPlaces::default()).into_value().unwrap();
        let det = determinant(&a);
        for i in 0..3 {
            for j in 0..3 {
                let cell: f64 = (0..3).map(|k| a[(i, k)] * adj[(k, j)]).sum();
                let expected = if i == j { det } else { 0.0 };
                assert!((cell - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_adjoint_failures_keep_header() {
        let out = adjoint(&m(&[&[1.0, 2.0, 3.0]]), DecimalPlaces::default());
        assert!(matches!(out.failure(), Some(Failure::Shape(_))));
        assert_eq!(out.steps[0], "Adjoint matrix:");
        assert!(out.last_step().unwrap().starts_with("Error: cofactors need a square matrix"));

        let out = adjoint(&Matrix::default(), DecimalPlaces::default());
        assert_eq!(out.last_step(), Some("Error: the matrix is empty."));
    }
}
