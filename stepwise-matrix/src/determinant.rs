//! Determinants: cofactor expansion and Sarrus' rule

use crate::helpers::{extract_matrix, matrix_block, sign_symbol, sign_value};
use crate::types::Matrix;
use stepwise_core::{format_number, format_plain, DecimalPlaces, Failure, Outcome, StepwiseError, Trace, Value};
use stepwise_plugin::{ArgMeta, EvalContext, OperationMeta, OperationPlugin, Report};
use tracing::debug;

/// Determinant by cofactor expansion along the first row, without narration.
///
/// 0 for the empty matrix, NaN when the matrix is not square.
pub fn determinant(m: &Matrix) -> f64 {
    if m.rows() == 0 {
        return 0.0;
    }
    if !m.is_square() {
        return f64::NAN;
    }
    expand(m)
}

fn expand(m: &Matrix) -> f64 {
    match m.rows() {
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        n => {
            let mut det = 0.0;
            for j in 0..n {
                let element = m[(0, j)];
                if element == 0.0 {
                    continue;
                }
                det += sign_value(j) * element * expand(&m.minor(0, j));
            }
            det
        }
    }
}

/// Determinant with a narrated cofactor expansion.
///
/// The outer expansion is narrated in full. For 4×4 and larger matrices the
/// expansion of each 3×3-or-larger minor is narrated one level further;
/// anything deeper is computed silently.
pub fn traced_determinant(m: &Matrix, dp: DecimalPlaces) -> Outcome<f64> {
    debug!(rows = m.rows(), cols = m.cols(), "determinant");
    let mut trace = Trace::new();

    if m.rows() == 0 {
        trace.line("The matrix is empty, its determinant is 0.");
        return trace.ok(0.0);
    }
    if !m.is_square() {
        trace.line(format!(
            "Error: the matrix is not square ({}), so its determinant is undefined.",
            m.shape()
        ));
        return trace.fail(Failure::shape(format!("determinant of a {} matrix", m.shape())));
    }

    let n = m.rows();
    trace.line(format!("Determinant of the {}×{} matrix (cofactor expansion along the first row):", n, n));
    trace.line(matrix_block(m, dp, 4));

    let det = narrate(m, dp, 0, &mut trace);
    trace.line(format!("Result: the determinant is {}.", format_number(det, dp)));
    trace.ok(det)
}

fn narrate(m: &Matrix, dp: DecimalPlaces, depth: usize, trace: &mut Trace) -> f64 {
    let n = m.rows();
    let indent = " ".repeat(depth * 4);

    if n == 1 {
        let value = m[(0, 0)];
        trace.line(format!("{}  det [[{}]] = {}", indent, format_plain(value), format_number(value, dp)));
        return value;
    }
    if n == 2 {
        let (a, b, c, d) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);
        let det = a * d - b * c;
        trace.line(format!(
            "{}  det = ({} × {}) - ({} × {}) = {}",
            indent,
            format_plain(a),
            format_plain(d),
            format_plain(b),
            format_plain(c),
            format_number(det, dp)
        ));
        return det;
    }

    trace.line(format!("{}  Expanding along the first row:", indent));
    let mut det = 0.0;
    for j in 0..n {
        let element = m[(0, j)];
        trace.line(format!(
            "{}    Element (1, {}) = {}, sign {}",
            indent,
            j + 1,
            format_number(element, dp),
            sign_symbol(j)
        ));
        if element == 0.0 {
            trace.line(format!("{}      Term {}: element is 0, so the term is 0", indent, j + 1));
            continue;
        }

        let sub = m.minor(0, j);
        trace.line(format!("{}      Submatrix for element (1, {}):", indent, j + 1));
        trace.line(matrix_block(&sub, dp, depth * 4 + 8));

        let sub_det = if depth == 0 && n >= 4 {
            narrate(&sub, dp, depth + 1, trace)
        } else {
            determinant(&sub)
        };
        let term = sign_value(j) * element * sub_det;
        trace.line(format!("{}      Minor determinant: {}", indent, format_number(sub_det, dp)));
        trace.line(format!(
            "{}      Term {}: ({}1) × {} × {} = {}",
            indent,
            j + 1,
            sign_symbol(j),
            format_number(element, dp),
            format_number(sub_det, dp),
            format_number(term, dp)
        ));
        det += term;
    }
    trace.line(format!("{}  Sum of the terms for the {}×{} matrix: {}", indent, n, n, format_number(det, dp)));
    det
}

/// 3×3 determinant by Sarrus' rule
pub fn determinant_by_sarrus(m: &Matrix, dp: DecimalPlaces) -> Outcome<f64> {
    debug!(rows = m.rows(), cols = m.cols(), "determinant by sarrus");
    let mut trace = Trace::new();
    trace.line("Determinant by Sarrus' rule:");
    trace.line(matrix_block(m, dp, 4));

    if m.rows() != 3 || m.cols() != 3 {
        trace.line(format!("Error: Sarrus' rule only applies to 3×3 matrices, this one is {}.", m.shape()));
        trace.line("Use the cofactor expansion for other sizes.");
        return trace.fail(Failure::dimension(format!("Sarrus' rule needs 3×3, got {}", m.shape())));
    }

    let num = |x: f64| format_number(x, dp);
    let (a, b, c) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
    let (d, e, f) = (m[(1, 0)], m[(1, 1)], m[(1, 2)]);
    let (g, h, i) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);

    trace.line("Add the products of the three descending diagonals, subtract the three ascending ones.");
    trace.line(format!(
        "  Extended matrix (first two columns repeated):\n    [{}, {}, {}] {}, {}\n    [{}, {}, {}] {}, {}\n    [{}, {}, {}] {}, {}",
        num(a), num(b), num(c), num(a), num(b),
        num(d), num(e), num(f), num(d), num(e),
        num(g), num(h), num(i), num(g), num(h)
    ));

    let descending = [(a, e, i), (b, f, g), (c, d, h)];
    let ascending = [(c, e, g), (a, f, h), (b, d, i)];

    trace.line("  Descending diagonals (added):");
    let mut plus = 0.0;
    for (k, &(x, y, z)) in descending.iter().enumerate() {
        let p = x * y * z;
        plus += p;
        trace.line(format!("    {}: {} × {} × {} = {}", k + 1, num(x), num(y), num(z), num(p)));
    }
    trace.line(format!("    Sum (+): {}", num(plus)));

    trace.line("  Ascending diagonals (subtracted):");
    let mut minus = 0.0;
    for (k, &(x, y, z)) in ascending.iter().enumerate() {
        let p = x * y * z;
        minus += p;
        trace.line(format!("    {}: {} × {} × {} = {}", k + 4, num(x), num(y), num(z), num(p)));
    }
    trace.line(format!("    Sum (-): {}", num(minus)));

    let det = plus - minus;
    trace.line(format!("  det = {} - {} = {}", num(plus), num(minus), num(det)));
    trace.line(format!("Result: the determinant (Sarrus) is {}.", num(det)));
    trace.ok(det)
}

// ============================================================================
// DETERMINANT - cofactor expansion
// ============================================================================

pub struct DeterminantFn;

static DET_ARGS: [ArgMeta; 1] = [ArgMeta::required("a", "Matrix", "Square matrix")];
static DET_EXAMPLES: [&str; 1] = ["determinant([[1, 2], [3, 4]]) → -2"];
static DET_RELATED: [&str; 2] = ["determinant_sarrus", "inverse"];

impl OperationPlugin for DeterminantFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "determinant",
            label: "Determinant",
            description: "Determinant by cofactor expansion along the first row",
            usage: "determinant(a)",
            args: &DET_ARGS,
            returns: "Number",
            examples: &DET_EXAMPLES,
            category: "matrix",
            related: &DET_RELATED,
            requires_two_operands: false,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 1 {
            return Err(StepwiseError::arg_count("determinant", 1, args.len()));
        }
        let m = extract_matrix(&args[0], "determinant", "a")?;
        Ok(traced_determinant(&m, ctx.precision).map(Value::Number))
    }
}

// ============================================================================
// DETERMINANT_SARRUS - 3×3 shortcut
// ============================================================================

pub struct SarrusFn;

static SARRUS_ARGS: [ArgMeta; 1] = [ArgMeta::required("a", "Matrix", "3×3 matrix")];
static SARRUS_EXAMPLES: [&str; 1] = ["determinant_sarrus([[1, 0, 2], [-1, 5, 0], [0, 3, 1]]) → -1"];
static SARRUS_RELATED: [&str; 1] = ["determinant"];

impl OperationPlugin for SarrusFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "determinant_sarrus",
            label: "Determinant (Sarrus)",
            description: "Determinant of a 3×3 matrix by Sarrus' rule of diagonals",
            usage: "determinant_sarrus(a)",
            args: &SARRUS_ARGS,
            returns: "Number",
            examples: &SARRUS_EXAMPLES,
            category: "matrix",
            related: &SARRUS_RELATED,
            requires_two_operands: false,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 1 {
            return Err(StepwiseError::arg_count("determinant_sarrus", 1, args.len()));
        }
        let m = extract_matrix(&args[0], "determinant_sarrus", "a")?;
        Ok(determinant_by_sarrus(&m, ctx.precision).map(Value::Number))
    }
}
