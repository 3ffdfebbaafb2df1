//! Linear systems `Ax = b`: Cramer's rule and the inverse method

use crate::determinant::determinant;
use crate::helpers::{column_line, extract_matrix, extract_vector, matrix_block};
use crate::ops::{inverse, multiply};
use crate::types::Matrix;
use crate::SINGULAR_EPSILON;
use stepwise_core::{format_number, DecimalPlaces, Failure, Outcome, StepwiseError, Trace, Value};
use stepwise_plugin::{ArgMeta, EvalContext, OperationMeta, OperationPlugin, Report};
use tracing::debug;

/// Solve `Ax = b` by Cramer's rule, `xᵢ = det(Aᵢ) / det(A)`
pub fn solve_by_cramer(a: &Matrix, b: &[f64], dp: DecimalPlaces) -> Outcome<Vec<f64>> {
    debug!(a = %a.shape(), b = b.len(), "cramer");
    let mut trace = Trace::new();
    trace.line("Solving Ax = B by Cramer's rule:");
    trace.line("Coefficient matrix (A):");
    trace.line(matrix_block(a, dp, 4));
    trace.line("Constant terms (B):");
    trace.line(format!("  {}", column_line(b, dp)));

    let n = a.rows();
    if n == 0 {
        trace.line("Error: matrix A is empty.");
        return trace.fail(Failure::shape("empty coefficient matrix"));
    }
    if !a.is_square() {
        trace.line(format!("Error: the coefficient matrix must be square, this one is {}.", a.shape()));
        return trace.fail(Failure::shape(format!("coefficient matrix is {}", a.shape())));
    }
    if b.len() != n {
        trace.line(format!(
            "Error: B has {} entries but A is {}×{}.",
            b.len(),
            n,
            n
        ));
        return trace.fail(Failure::shape(format!("B has {} entries, expected {}", b.len(), n)));
    }

    trace.line("--- Step 1: determinant of the system, det(A) ---");
    let det_a = determinant(a);
    trace.line(format!("det(A) = {}", format_number(det_a, dp)));
    if det_a.is_nan() {
        trace.line("Error while computing det(A).");
        return trace.fail(Failure::shape("det(A) is undefined"));
    }
    if det_a.abs() < SINGULAR_EPSILON {
        trace.line(format!("det(A) is {} (zero).", format_number(det_a, dp)));
        trace.line("The system has either infinitely many solutions or none; Cramer's rule does not apply.");
        return trace.fail(Failure::singular(format!("det(A) = {}", format_number(det_a, dp))));
    }
    trace.line("det(A) ≠ 0, so the system has a unique solution.");

    trace.line("--- Step 2: xᵢ = det(Aᵢ) / det(A) ---");
    let mut solution = Vec::with_capacity(n);
    for i in 0..n {
        trace.line(format!("  Variable x{}:", i + 1));
        let a_i = a.with_column(i, b);
        trace.line(format!("    A{} (column {} of A replaced by B):", i + 1, i + 1));
        trace.line(matrix_block(&a_i, dp, 6));

        let det_i = determinant(&a_i);
        let x = det_i / det_a;
        trace.line(format!("    det(A{}) = {}", i + 1, format_number(det_i, dp)));
        trace.line(format!(
            "    x{} = det(A{}) / det(A) = {} / {} = {}",
            i + 1,
            i + 1,
            format_number(det_i, dp),
            format_number(det_a, dp),
            format_number(x, dp)
        ));
        solution.push(x);
    }

    trace.line("--- Solution ---");
    trace.line(format!("  x = {}", column_line(&solution, dp)));
    trace.line("Done.");
    trace.ok(solution)
}

/// Solve `Ax = b` as `x = A⁻¹ · b`, embedding the inverse and product derivations
pub fn solve_by_inverse(a: &Matrix, b: &[f64], dp: DecimalPlaces) -> Outcome<Vec<f64>> {
    debug!(a = %a.shape(), b = b.len(), "solve by inverse");
    let mut trace = Trace::new();
    trace.line("Solving Ax = B with the inverse matrix:");
    trace.line("Formula: x = A⁻¹ × B");
    trace.line("Coefficient matrix (A):");
    trace.line(matrix_block(a, dp, 4));
    trace.line("Constant terms (B):");
    trace.line(format!("  {}", column_line(b, dp)));

    let n = a.rows();
    let problems: Vec<String> = [
        (n == 0).then(|| "  Matrix A is empty.".to_string()),
        (!a.is_square()).then(|| format!("  Matrix A is not square ({}).", a.shape())),
        (b.len() != n).then(|| format!("  B has {} entries, which does not match N = {}.", b.len(), n)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !problems.is_empty() {
        trace.line("Error: invalid dimensions. A must be N×N and B must have N entries.");
        let detail = problems.iter().map(|p| p.trim()).collect::<Vec<_>>().join(" ");
        for p in problems {
            trace.line(p);
        }
        return trace.fail(Failure::shape(detail));
    }

    trace.line("--- Step 1: inverse matrix A⁻¹ ---");
    let Outcome { result, steps, .. } = inverse(a, dp);
    trace.absorb(steps);
    let inv = match result {
        Ok(inv) => inv,
        Err(failure) => {
            trace.line("Error: A has no inverse (it may be singular), cannot continue.");
            return trace.fail(failure);
        }
    };

    trace.line("--- Step 2: x = A⁻¹ × B ---");
    let b_col = Matrix::column(b);
    trace.line("B as a column matrix:");
    trace.line(matrix_block(&b_col, dp, 4));
    trace.line("Product A⁻¹ × B:");
    let Outcome { result, steps, .. } = multiply(&inv, &b_col, dp);
    trace.absorb(steps);
    let product = match result {
        Ok(p) => p,
        Err(failure) => {
            trace.line("Error: the product A⁻¹ × B could not be formed.");
            return trace.fail(failure);
        }
    };

    let solution = product.first_column();
    trace.line("--- Solution ---");
    trace.line(format!("  x = {}", column_line(&solution, dp)));
    trace.line("Done.");
    trace.ok(solution)
}

// ============================================================================
// CRAMER
// ============================================================================

pub struct CramerFn;

static SYSTEM_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "N×N coefficient matrix"),
    ArgMeta::required("b", "Vector", "N constant terms"),
];
static CRAMER_EXAMPLES: [&str; 1] = ["cramer([[2, 1], [1, 3]], [5, 10]) → [1, 3]"];
static CRAMER_RELATED: [&str; 2] = ["solve_inverse", "determinant"];

impl OperationPlugin for CramerFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "cramer",
            label: "Cramer's rule",
            description: "Solve a square linear system Ax = b by ratios of determinants",
            usage: "cramer(a, b)",
            args: &SYSTEM_ARGS,
            returns: "Vector",
            examples: &CRAMER_EXAMPLES,
            category: "matrix",
            related: &CRAMER_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("cramer", 2, args.len()));
        }
        let a = extract_matrix(&args[0], "cramer", "a")?;
        let b = extract_vector(&args[1], "cramer", "b")?;
        Ok(solve_by_cramer(&a, &b, ctx.precision).map(Value::Vector))
    }
}

// ============================================================================
// SOLVE_INVERSE
// ============================================================================

pub struct SolveInverseFn;

static SOLVE_INVERSE_EXAMPLES: [&str; 1] = ["solve_inverse([[2, 1], [1, 3]], [5, 10]) → [1, 3]"];
static SOLVE_INVERSE_RELATED: [&str; 2] = ["cramer", "inverse"];

impl OperationPlugin for SolveInverseFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "solve_inverse",
            label: "Solve by inverse",
            description: "Solve a square linear system as x = A⁻¹ · b",
            usage: "solve_inverse(a, b)",
            args: &SYSTEM_ARGS,
            returns: "Vector",
            examples: &SOLVE_INVERSE_EXAMPLES,
            category: "matrix",
            related: &SOLVE_INVERSE_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("solve_inverse", 2, args.len()));
        }
        let a = extract_matrix(&args[0], "solve_inverse", "a")?;
        let b = extract_vector(&args[1], "solve_inverse", "b")?;
        Ok(solve_by_inverse(&a, &b, ctx.precision).map(Value::Vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_cramer() {
        let out = solve_by_cramer(&m(&[&[2.0, 1.0], &[1.0, 3.0]]), &[5.0, 10.0], DecimalPlaces::default());
        assert!(close(out.value().unwrap(), &[1.0, 3.0]));
        assert!(out.mentions("x1 = det(A1) / det(A) = 5.00 / 5.00 = 1.00"));
        assert!(out.mentions("x2 = det(A2) / det(A) = 15.00 / 5.00 = 3.00"));
    }

    #[test]
    fn test_cramer_singular() {
        let out = solve_by_cramer(&m(&[&[1.0, 2.0], &[2.0, 4.0]]), &[3.0, 6.0], DecimalPlaces::default());
        assert!(matches!(out.failure(), Some(Failure::Singular(_))));
        assert!(out.last_step().unwrap().contains("infinitely many solutions or none"));
    }

    #[test]
    fn test_cramer_shape_checks() {
        let out = solve_by_cramer(&m(&[&[1.0, 2.0]]), &[1.0], DecimalPlaces::default());
        assert!(matches!(out.failure(), Some(Failure::Shape(_))));

        let out = solve_by_cramer(&m(&[&[1.0, 0.0], &[0.0, 1.0]]), &[1.0, 2.0, 3.0], DecimalPlaces::default());
        assert_eq!(out.last_step(), Some("Error: B has 3 entries but A is 2×2."));
    }

    #[test]
    fn test_solve_by_inverse() {
        let out = solve_by_inverse(&m(&[&[2.0, 1.0], &[1.0, 3.0]]), &[5.0, 10.0], DecimalPlaces::default());
        assert!(close(out.value().unwrap(), &[1.0, 3.0]));
        assert!(out.mentions("Inverse by the adjoint method:"));
        assert!(out.mentions("Multiplying matrix A by matrix B:"));
    }

    #[test]
    fn test_solve_by_inverse_lists_every_problem() {
        let out = solve_by_inverse(&m(&[&[1.0, 2.0, 3.0]]), &[1.0, 2.0], DecimalPlaces::default());
        assert!(out.mentions("Matrix A is not square (1×3)."));
        assert!(out.mentions("B has 2 entries, which does not match N = 1."));
        assert!(!out.mentions("Matrix A is empty."));
    }

    #[test]
    fn test_solve_by_inverse_singular_keeps_inverse_trace() {
        let out = solve_by_inverse(&m(&[&[1.0, 0.0], &[0.0, 0.0]]), &[1.0, 1.0], DecimalPlaces::default());
        assert!(matches!(out.failure(), Some(Failure::Singular(_))));
        assert!(out.mentions("The matrix is singular, so it has no inverse."));
        assert!(out.last_step().unwrap().starts_with("Error: A has no inverse"));
    }
}
