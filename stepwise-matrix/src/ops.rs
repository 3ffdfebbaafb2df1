//! Basic matrix operations: transpose, sum, difference, product, inverse

use crate::cofactor::adjoint;
use crate::determinant::traced_determinant;
use crate::helpers::{extract_matrix, matrix_block};
use crate::types::Matrix;
use crate::SINGULAR_EPSILON;
use stepwise_core::{format_number, DecimalPlaces, Failure, Outcome, StepwiseError, Trace, Value};
use stepwise_plugin::{ArgMeta, EvalContext, OperationMeta, OperationPlugin, Report};
use tracing::debug;

/// `Aᵀ[j, i] = A[i, j]`
pub fn transpose(m: &Matrix, dp: DecimalPlaces) -> Outcome<Matrix> {
    debug!(rows = m.rows(), cols = m.cols(), "transpose");
    let mut trace = Trace::new();
    trace.line("Transpose:");
    trace.line("Original matrix (A):");
    trace.line(matrix_block(m, dp, 4));

    if m.is_empty() {
        trace.line("Error: the matrix is empty.");
        return trace.fail(Failure::shape("transpose of an empty matrix"));
    }

    let (rows, cols) = (m.rows(), m.cols());
    trace.line(format!("The transpose (Aᵀ) is {}×{}.", cols, rows));
    trace.line("Rows become columns: Aᵀ[j, i] = A[i, j]");
    for i in 0..rows {
        for j in 0..cols {
            trace.line(format!(
                "  Aᵀ[{}, {}] = A[{}, {}] = {}",
                j + 1,
                i + 1,
                i + 1,
                j + 1,
                format_number(m[(i, j)], dp)
            ));
        }
    }

    let t = m.transposed();
    trace.line("Transposed matrix (Aᵀ):");
    trace.line(matrix_block(&t, dp, 4));
    trace.line("Done.");
    trace.ok(t)
}

#[derive(Clone, Copy)]
enum Combine {
    Add,
    Subtract,
}

impl Combine {
    fn symbol(self) -> char {
        match self {
            Combine::Add => '+',
            Combine::Subtract => '-',
        }
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Combine::Add => a + b,
            Combine::Subtract => a - b,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Combine::Add => "Matrix sum A + B:",
            Combine::Subtract => "Matrix difference A - B:",
        }
    }
}

/// Elementwise `A + B`; both operands must have the same shape
pub fn add(a: &Matrix, b: &Matrix, dp: DecimalPlaces) -> Outcome<Matrix> {
    combine(a, b, dp, Combine::Add)
}

/// Elementwise `A - B`; both operands must have the same shape
pub fn subtract(a: &Matrix, b: &Matrix, dp: DecimalPlaces) -> Outcome<Matrix> {
    combine(a, b, dp, Combine::Subtract)
}

fn combine(a: &Matrix, b: &Matrix, dp: DecimalPlaces, how: Combine) -> Outcome<Matrix> {
    debug!(a = %a.shape(), b = %b.shape(), "elementwise {}", how.symbol());
    let mut trace = Trace::new();
    trace.line(how.title());
    trace.line("Matrix A:");
    trace.line(matrix_block(a, dp, 4));
    trace.line("Matrix B:");
    trace.line(matrix_block(b, dp, 4));

    if a.is_empty() || b.is_empty() {
        trace.line("Error: one or both matrices are empty.");
        return trace.fail(Failure::shape("empty operand"));
    }
    if !a.same_shape(b) {
        trace.line(format!(
            "Error: A is {} and B is {}; both must have the same shape.",
            a.shape(),
            b.shape()
        ));
        return trace.fail(Failure::shape(format!("{} {} {}", a.shape(), how.symbol(), b.shape())));
    }

    trace.line(format!("C[i, j] = A[i, j] {} B[i, j]", how.symbol()));
    let mut data = vec![vec![0.0; a.cols()]; a.rows()];
    for (i, row) in data.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let (x, y) = (a[(i, j)], b[(i, j)]);
            *cell = how.apply(x, y);
            trace.line(format!(
                "  C[{}, {}] = {} {} {} = {}",
                i + 1,
                j + 1,
                format_number(x, dp),
                how.symbol(),
                format_number(y, dp),
                format_number(*cell, dp)
            ));
        }
    }

    let c = Matrix::from_rows_unchecked(data);
    trace.line("Resulting matrix (C):");
    trace.line(matrix_block(&c, dp, 4));
    trace.line("Done.");
    trace.ok(c)
}

/// Row-by-column product; needs `cols(A) == rows(B)`
pub fn multiply(a: &Matrix, b: &Matrix, dp: DecimalPlaces) -> Outcome<Matrix> {
    debug!(a = %a.shape(), b = %b.shape(), "multiply");
    let mut trace = Trace::new();
    trace.line("Multiplying matrix A by matrix B:");
    trace.line("Matrix A:");
    trace.line(matrix_block(a, dp, 4));
    trace.line("Matrix B:");
    trace.line(matrix_block(b, dp, 4));

    if a.cols() == 0 || b.cols() == 0 {
        trace.line("Error: one or both matrices are empty.");
        return trace.fail(Failure::shape("empty operand"));
    }
    if a.cols() != b.rows() {
        trace.line("Error: incompatible dimensions for multiplication.");
        trace.line(format!(
            "  The number of columns of A ({}) must equal the number of rows of B ({}).",
            a.cols(),
            b.rows()
        ));
        return trace.fail(Failure::shape(format!("{} × {}", a.shape(), b.shape())));
    }

    let (rows, inner, cols) = (a.rows(), a.cols(), b.cols());
    trace.line(format!(
        "A ({}×{}) × B ({}×{}) = C ({}×{}):",
        rows, inner, b.rows(), cols, rows, cols
    ));

    let mut data = vec![vec![0.0; cols]; rows];
    for (i, row) in data.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            let mut products = Vec::with_capacity(inner);
            for k in 0..inner {
                let (x, y) = (a[(i, k)], b[(k, j)]);
                sum += x * y;
                products.push(format!("({} × {})", format_number(x, dp), format_number(y, dp)));
            }
            *cell = sum;
            trace.line(format!(
                "  C[{}, {}] = (row {} of A) · (column {} of B) = {} = {}",
                i + 1,
                j + 1,
                i + 1,
                j + 1,
                products.join(" + "),
                format_number(sum, dp)
            ));
        }
    }

    let c = Matrix::from_rows_unchecked(data);
    trace.line("Resulting matrix (C):");
    trace.line(matrix_block(&c, dp, 4));
    trace.line("Done.");
    trace.ok(c)
}

/// Inverse by the adjoint method, `A⁻¹ = (1 / det(A)) · Adj(A)`.
///
/// The determinant and adjoint derivations are embedded in the trace.
pub fn inverse(m: &Matrix, dp: DecimalPlaces) -> Outcome<Matrix> {
    debug!(rows = m.rows(), cols = m.cols(), "inverse");
    let mut trace = Trace::new();
    trace.line("Inverse by the adjoint method:");
    trace.line("Formula: A⁻¹ = (1 / det(A)) × Adj(A)");
    trace.line("Original matrix (A):");
    trace.line(matrix_block(m, dp, 4));

    if m.is_empty() {
        trace.line("Error: the matrix is empty.");
        return trace.fail(Failure::shape("inverse of an empty matrix"));
    }
    if !m.is_square() {
        trace.line(format!("Error: only square matrices have an inverse, this one is {}.", m.shape()));
        return trace.fail(Failure::shape(format!("inverse of a {} matrix", m.shape())));
    }

    trace.line("--- Step 1: determinant of A ---");
    let Outcome { result, steps, .. } = traced_determinant(m, dp);
    trace.absorb(steps);
    let det = match result {
        Ok(det) => det,
        Err(failure) => {
            trace.line("Error while computing the determinant.");
            return trace.fail(failure);
        }
    };
    trace.line(format!("det(A) = {}", format_number(det, dp)));

    trace.line("--- Step 2: check that det(A) ≠ 0 ---");
    if det.abs() < SINGULAR_EPSILON {
        trace.line(format!("The determinant is {} (treated as zero).", format_number(det, dp)));
        trace.line("The matrix is singular, so it has no inverse.");
        return trace.fail(Failure::singular(format!("det(A) = {}", format_number(det, dp))));
    }
    trace.line(format!("The determinant is {} (non-zero), so the inverse exists.", format_number(det, dp)));

    trace.line("--- Step 3: adjoint of A ---");
    let Outcome { result, steps, .. } = adjoint(m, dp);
    trace.absorb(steps);
    let adj = match result {
        Ok(adj) => adj,
        Err(failure) => {
            trace.line("Error while computing the adjoint matrix.");
            return trace.fail(failure);
        }
    };

    let n = m.rows();
    let inv_det = 1.0 / det;
    let wide = dp.plus(2);
    trace.line(format!("--- Step 4: A⁻¹ = (1 / {}) × Adj(A) ---", format_number(det, dp)));
    trace.line(format!(
        "  Multiplying every entry of Adj(A) by 1 / {} ≈ {}:",
        format_number(det, dp),
        format_number(inv_det, wide)
    ));
    let mut data = vec![vec![0.0; n]; n];
    for (i, row) in data.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = inv_det * adj[(i, j)];
            trace.line(format!(
                "  A⁻¹[{}, {}] = {} × {} = {}",
                i + 1,
                j + 1,
                format_number(inv_det, wide),
                format_number(adj[(i, j)], dp),
                format_number(*cell, dp)
            ));
        }
    }

    let inv = Matrix::from_rows_unchecked(data);
    trace.line("Inverse matrix (A⁻¹):");
    trace.line(matrix_block(&inv, dp, 4));
    trace.line("Done.");
    trace.ok(inv)
}

// ============================================================================
// TRANSPOSE
// ============================================================================

pub struct TransposeFn;

static TRANSPOSE_ARGS: [ArgMeta; 1] = [ArgMeta::required("a", "Matrix", "Any non-empty matrix")];
static TRANSPOSE_EXAMPLES: [&str; 1] = ["transpose([[1, 2, 3]]) → [[1], [2], [3]]"];
static TRANSPOSE_RELATED: [&str; 1] = ["adjoint"];

impl OperationPlugin for TransposeFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "transpose",
            label: "Transpose",
            description: "Swap rows and columns",
            usage: "transpose(a)",
            args: &TRANSPOSE_ARGS,
            returns: "Matrix",
            examples: &TRANSPOSE_EXAMPLES,
            category: "matrix",
            related: &TRANSPOSE_RELATED,
            requires_two_operands: false,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 1 {
            return Err(StepwiseError::arg_count("transpose", 1, args.len()));
        }
        let m = extract_matrix(&args[0], "transpose", "a")?;
        Ok(transpose(&m, ctx.precision).map(Value::from))
    }
}

// ============================================================================
// SUM / SUBTRACT - elementwise
// ============================================================================

pub struct SumFn;

static PAIR_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "Left operand"),
    ArgMeta::required("b", "Matrix", "Right operand, same shape as a"),
];
static SUM_EXAMPLES: [&str; 1] = ["sum([[1, 2]], [[3, 4]]) → [[4, 6]]"];
static SUM_RELATED: [&str; 1] = ["subtract"];

impl OperationPlugin for SumFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "sum",
            label: "Sum",
            description: "Elementwise sum of two matrices of the same shape",
            usage: "sum(a, b)",
            args: &PAIR_ARGS,
            returns: "Matrix",
            examples: &SUM_EXAMPLES,
            category: "matrix",
            related: &SUM_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("sum", 2, args.len()));
        }
        let a = extract_matrix(&args[0], "sum", "a")?;
        let b = extract_matrix(&args[1], "sum", "b")?;
        Ok(add(&a, &b, ctx.precision).map(Value::from))
    }
}

pub struct SubtractFn;

static SUBTRACT_EXAMPLES: [&str; 1] = ["subtract([[5, 5]], [[1, 2]]) → [[4, 3]]"];
static SUBTRACT_RELATED: [&str; 1] = ["sum"];

impl OperationPlugin for SubtractFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "subtract",
            label: "Subtract",
            description: "Elementwise difference of two matrices of the same shape",
            usage: "subtract(a, b)",
            args: &PAIR_ARGS,
            returns: "Matrix",
            examples: &SUBTRACT_EXAMPLES,
            category: "matrix",
            related: &SUBTRACT_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("subtract", 2, args.len()));
        }
        let a = extract_matrix(&args[0], "subtract", "a")?;
        let b = extract_matrix(&args[1], "subtract", "b")?;
        Ok(subtract(&a, &b, ctx.precision).map(Value::from))
    }
}

// ============================================================================
// MULTIPLY
// ============================================================================

pub struct MultiplyFn;

static MULTIPLY_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "Left operand (m×n)"),
    ArgMeta::required("b", "Matrix", "Right operand (n×p)"),
];
static MULTIPLY_EXAMPLES: [&str; 1] = ["multiply([[1, 2], [3, 4]], [[5, 6], [7, 8]]) → [[19, 22], [43, 50]]"];
static MULTIPLY_RELATED: [&str; 2] = ["solve_inverse", "transpose"];

impl OperationPlugin for MultiplyFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "multiply",
            label: "Multiply",
            description: "Matrix product, row by column",
            usage: "multiply(a, b)",
            args: &MULTIPLY_ARGS,
            returns: "Matrix",
            examples: &MULTIPLY_EXAMPLES,
            category: "matrix",
            related: &MULTIPLY_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("multiply", 2, args.len()));
        }
        let a = extract_matrix(&args[0], "multiply", "a")?;
        let b = extract_matrix(&args[1], "multiply", "b")?;
        Ok(multiply(&a, &b, ctx.precision).map(Value::from))
    }
}

// ============================================================================
// INVERSE - adjoint method
// ============================================================================

pub struct InverseFn;

static INVERSE_ARGS: [ArgMeta; 1] = [ArgMeta::required("a", "Matrix", "Non-singular square matrix")];
static INVERSE_EXAMPLES: [&str; 2] = [
    "inverse([[4, 7], [2, 6]]) → [[0.6, -0.7], [-0.2, 0.4]]",
    "inverse([[1, 0], [0, 0]]) → no result (singular)",
];
static INVERSE_RELATED: [&str; 3] = ["determinant", "adjoint", "solve_inverse"];

impl OperationPlugin for InverseFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "inverse",
            label: "Inverse",
            description: "Inverse matrix via the adjoint: A⁻¹ = (1 / det(A)) · Adj(A)",
            usage: "inverse(a)",
            args: &INVERSE_ARGS,
            returns: "Matrix",
            examples: &INVERSE_EXAMPLES,
            category: "matrix",
            related: &INVERSE_RELATED,
            requires_two_operands: false,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 1 {
            return Err(StepwiseError::arg_count("inverse", 1, args.len()));
        }
        let m = extract_matrix(&args[0], "inverse", "a")?;
        Ok(inverse(&m, ctx.precision).map(Value::from))
    }
}
