//! Componentwise combinations: sum, difference, scaling

use crate::helpers::{arrow, common_length, empty_operand, extract_scalar, extract_vector};
use crate::palette::PALETTE;
use stepwise_core::{
    format_list, format_number, format_plain, format_plain_list, DecimalPlaces, Failure, Outcome,
    StepwiseError, Trace, Value, VisualVector,
};
use stepwise_plugin::{ArgMeta, EvalContext, OperationMeta, OperationPlugin, Report};
use tracing::debug;

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

    fn apply(self, x: f64, y: f64) -> f64 {
        match self {
            Combine::Add => x + y,
            Combine::Subtract => x - y,
        }
    }
}

fn combine(a: &[f64], b: &[f64], op: Combine, dp: DecimalPlaces) -> Outcome<Vec<f64>> {
    let mut trace = Trace::new();
    if a.is_empty() || b.is_empty() {
        return empty_operand(trace);
    }

    let (verb, purpose) = match op {
        Combine::Add => ("Adding", "for the sum"),
        Combine::Subtract => ("Subtracting", "for the difference"),
    };
    let n = common_length(a, b, purpose, &mut trace);
    let (a_n, b_n) = (&a[..n], &b[..n]);

    trace.line(format!("{} the vectors:", verb));
    trace.line(format!("A = {}", format_plain_list(a_n)));
    trace.line(format!("B = {}", format_plain_list(b_n)));
    trace.line(match op {
        Combine::Add => "Corresponding components are added:",
        Combine::Subtract => "Components of B are subtracted from the matching components of A:",
    });

    let mut result = Vec::with_capacity(n);
    for (i, (&x, &y)) in a_n.iter().zip(b_n).enumerate() {
        let r = op.apply(x, y);
        trace.line(format!(
            "Component {}: {} {} {} = {}",
            i + 1,
            format_plain(x),
            op.symbol(),
            format_plain(y),
            format_number(r, dp)
        ));
        result.push(r);
    }
    trace.line(format!("Resulting vector = {}", format_list(&result, dp)));

    let vectors = tip_to_tail(a, b, &result, op);
    if !vectors.is_empty() {
        trace.line("In the plane:");
        trace.line("- Vector A (blue): from the origin to point A");
        trace.line("- Vector B (green): from the origin to point B");
        match op {
            Combine::Add => {
                trace.line("- Translated B (green): the same vector B, starting at the tip of A");
                trace.line("- Result (red): from the origin to the tip of the translated B");
                trace.line("Vector addition places the second vector at the tip of the first.");
            }
            Combine::Subtract => {
                trace.line("- Translated -B (green): B reversed, starting at the tip of A");
                trace.line("- Result (red): from the origin to the tip of the translated -B");
                trace.line("A - B is the sum of A and the opposite of B, A + (-B).");
            }
        }
    }

    trace.ok(result).with_vectors(vectors)
}

/// A, B, B (or -B) translated to the tip of A, and the result
fn tip_to_tail(a: &[f64], b: &[f64], result: &[f64], op: Combine) -> Vec<VisualVector> {
    let (Some(va), Some(vb), Some(vr)) = (
        arrow(a, PALETTE.vector_a, "Vector A"),
        arrow(b, PALETTE.vector_b, "Vector B"),
        arrow(result, PALETTE.result, ""),
    ) else {
        return Vec::new();
    };

    let (sign, moved_label, result_label) = match op {
        Combine::Add => (1.0, "Vector B (translated)", "A + B"),
        Combine::Subtract => (-1.0, "-B (translated)", "A - B"),
    };
    let moved = VisualVector::new(sign * vb.x, sign * vb.y)
        .starting_at(va.x, va.y)
        .colored(PALETTE.vector_b)
        .labeled(moved_label);

    vec![va, vb, moved, vr.labeled(result_label)]
}

/// `A + B` componentwise over the shared dimension
pub fn add(a: &[f64], b: &[f64], dp: DecimalPlaces) -> Outcome<Vec<f64>> {
    debug!(a = a.len(), b = b.len(), "vector add");
    combine(a, b, Combine::Add, dp)
}

/// `A - B` componentwise over the shared dimension
pub fn subtract(a: &[f64], b: &[f64], dp: DecimalPlaces) -> Outcome<Vec<f64>> {
    debug!(a = a.len(), b = b.len(), "vector subtract");
    combine(a, b, Combine::Subtract, dp)
}

/// `k · v`, with a geometric reading of what `k` does to the arrow
pub fn scalar_multiply(v: &[f64], k: f64, dp: DecimalPlaces) -> Outcome<Vec<f64>> {
    debug!(dim = v.len(), k, "scalar multiply");
    let mut trace = Trace::new();
    if v.is_empty() {
        trace.line("Error: the vector is empty.");
        return trace.fail(Failure::shape("empty vector"));
    }

    let ks = format_plain(k);
    trace.line(format!("Multiplying the vector {} by the scalar {}", format_plain_list(v), ks));
    trace.line("Every component is multiplied by the scalar.");
    trace.line(format!("{} × {}", ks, format_plain_list(v)));

    let result: Vec<f64> = v.iter().map(|c| c * k).collect();
    for (i, (c, r)) in v.iter().zip(&result).enumerate() {
        trace.line(format!("Component {}: {} × {} = {}", i + 1, ks, format_plain(*c), format_number(*r, dp)));
    }
    trace.line(format!("Resulting vector = {}", format_list(&result, dp)));

    trace.line("Geometric interpretation:");
    if k > 0.0 {
        trace.line(format!(
            "- A positive scalar ({} > 0) keeps the direction and multiplies the length by {}.",
            ks, ks
        ));
    } else if k < 0.0 {
        trace.line(format!(
            "- A negative scalar ({} < 0) reverses the direction and multiplies the length by |{}| = {}.",
            ks,
            ks,
            format_plain(k.abs())
        ));
    } else {
        trace.line("- A zero scalar collapses the vector to the null vector [0, 0, ...].");
    }

    let label = format!("{} × A", ks);
    let color = PALETTE.scaled(k);
    let mut vectors = Vec::new();
    if let (Some(original), Some(scaled)) =
        (arrow(v, PALETTE.vector_a, "Vector A"), arrow(&result, color, &label))
    {
        vectors = vec![original, scaled];
        trace.line("In the plane:");
        trace.line("- Vector A (blue): the original vector");
        trace.line(format!(
            "- Vector {} ({}): the result of multiplying by {}",
            label,
            if k < 0.0 { "red" } else { "green" },
            ks
        ));
        if k > 1.0 {
            trace.line("- The result is longer than the original (scalar > 1)");
        } else if k > 0.0 && k < 1.0 {
            trace.line("- The result is shorter than the original (0 < scalar < 1)");
        } else if k < 0.0 {
            trace.line("- The result points the opposite way (scalar < 0)");
        }
    }

    trace.ok(result).with_vectors(vectors)
}

// ============================================================================
// VECTOR_ADD
// ============================================================================

pub struct VectorAddFn;

static PAIR_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Vector", "First vector"),
    ArgMeta::required("b", "Vector", "Second vector"),
];
static ADD_EXAMPLES: [&str; 1] = ["vector_add([1, 2], [3, 4]) → [4, 6]"];
static ADD_RELATED: [&str; 2] = ["vector_subtract", "scalar_multiply"];

impl OperationPlugin for VectorAddFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "vector_add",
            label: "Vector sum",
            description: "Add two vectors component by component",
            usage: "vector_add(a, b)",
            args: &PAIR_ARGS,
            returns: "Vector",
            examples: &ADD_EXAMPLES,
            category: "vector",
            related: &ADD_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("vector_add", 2, args.len()));
        }
        let a = extract_vector(&args[0], "vector_add", "a")?;
        let b = extract_vector(&args[1], "vector_add", "b")?;
        Ok(add(&a, &b, ctx.precision).map(Value::Vector))
    }
}

// ============================================================================
// VECTOR_SUBTRACT
// ============================================================================

pub struct VectorSubtractFn;

static SUBTRACT_EXAMPLES: [&str; 1] = ["vector_subtract([5, 1], [2, 3]) → [3, -2]"];
static SUBTRACT_RELATED: [&str; 1] = ["vector_add"];

impl OperationPlugin for VectorSubtractFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "vector_subtract",
            label: "Vector difference",
            description: "Subtract the second vector from the first",
            usage: "vector_subtract(a, b)",
            args: &PAIR_ARGS,
            returns: "Vector",
            examples: &SUBTRACT_EXAMPLES,
            category: "vector",
            related: &SUBTRACT_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("vector_subtract", 2, args.len()));
        }
        let a = extract_vector(&args[0], "vector_subtract", "a")?;
        let b = extract_vector(&args[1], "vector_subtract", "b")?;
        Ok(subtract(&a, &b, ctx.precision).map(Value::Vector))
    }
}

// ============================================================================
// SCALAR_MULTIPLY
// ============================================================================

pub struct ScalarMultiplyFn;

static SCALE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("v", "Vector", "Vector to scale"),
    ArgMeta::required("scalar", "Number", "Scale factor"),
];
static SCALE_EXAMPLES: [&str; 2] = [
    "scalar_multiply([1, -2], 3) → [3, -6]",
    "scalar_multiply([2, 4], -0.5) → [-1, -2]",
];
static SCALE_RELATED: [&str; 2] = ["vector_add", "normalize"];

impl OperationPlugin for ScalarMultiplyFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "scalar_multiply",
            label: "Scalar multiple",
            description: "Multiply every component by a scalar",
            usage: "scalar_multiply(v, scalar)",
            args: &SCALE_ARGS,
            returns: "Vector",
            examples: &SCALE_EXAMPLES,
            category: "vector",
            related: &SCALE_RELATED,
            requires_two_operands: false,
            requires_scalar: true,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("scalar_multiply", 2, args.len()));
        }
        let v = extract_vector(&args[0], "scalar_multiply", "v")?;
        let k = extract_scalar(&args[1], "scalar_multiply", "scalar")?;
        Ok(scalar_multiply(&v, k, ctx.precision).map(Value::Vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dp() -> DecimalPlaces {
        DecimalPlaces::default()
    }

    #[test]
    fn test_add() {
        let out = add(&[1.0, 2.0], &[3.0, 4.0], dp());
        assert_eq!(out.value(), Some(&vec![4.0, 6.0]));
        assert!(out.mentions("Component 2: 2 + 4 = 6.00"));
        assert!(out.mentions("Resulting vector = [4.00, 6.00]"));

        let labels: Vec<_> = out.vectors.iter().filter_map(|v| v.label.as_deref()).collect();
        assert_eq!(labels, ["Vector A", "Vector B", "Vector B (translated)", "A + B"]);
        assert_eq!(out.vectors[2].tip(), (4.0, 6.0));
    }

    #[test]
    fn test_subtract_reverses_translated_b() {
        let out = subtract(&[5.0, 1.0], &[2.0, 3.0], dp());
        assert_eq!(out.value(), Some(&vec![3.0, -2.0]));
        assert!(out.mentions("Component 1: 5 - 2 = 3.00"));

        let moved = &out.vectors[2];
        assert_eq!((moved.x, moved.y), (-2.0, -3.0));
        assert_eq!((moved.start_x, moved.start_y), (5.0, 1.0));
        assert_eq!(moved.tip(), (3.0, -2.0));
        assert_eq!(out.vectors[3].label.as_deref(), Some("A - B"));
    }

    #[test]
    fn test_add_truncates_to_shorter_operand() {
        let out = add(&[1.0, 2.0, 3.0], &[10.0, 20.0], dp());
        assert_eq!(out.value(), Some(&vec![11.0, 22.0]));
        assert_eq!(out.steps[0], "Warning: the vectors have different dimensions (A: 3, B: 2).");
        assert_eq!(out.steps[1], "The smaller dimension is used for the sum.");
    }

    #[test]
    fn test_one_dimensional_sum_has_no_picture() {
        let out = add(&[1.0], &[2.0], dp());
        assert_eq!(out.value(), Some(&vec![3.0]));
        assert!(out.vectors.is_empty());
        assert!(!out.mentions("In the plane:"));
    }

    #[test]
    fn test_empty_operand() {
        let out = subtract(&[], &[1.0], dp());
        assert!(matches!(out.failure(), Some(Failure::Shape(_))));
        assert_eq!(out.last_step(), Some("Error: at least one of the vectors is empty."));
    }

    #[test]
    fn test_scalar_multiply() {
        let out = scalar_multiply(&[1.0, -2.0], 3.0, dp());
        assert_eq!(out.value(), Some(&vec![3.0, -6.0]));
        assert!(out.mentions("Component 2: 3 × -2 = -6.00"));
        assert!(out.mentions("keeps the direction"));
        assert_eq!(out.last_step(), Some("- The result is longer than the original (scalar > 1)"));
        assert_eq!(out.vectors[1].label.as_deref(), Some("3 × A"));
        assert_eq!(out.vectors[1].color.as_deref(), Some(PALETTE.vector_b));
    }

    #[test]
    fn test_scalar_multiply_negative_and_zero() {
        let out = scalar_multiply(&[2.0, 4.0], -0.5, dp());
        assert_eq!(out.value(), Some(&vec![-1.0, -2.0]));
        assert!(out.mentions("|-0.5| = 0.5"));
        assert_eq!(out.vectors[1].color.as_deref(), Some(PALETTE.result));
        assert!(out.mentions("points the opposite way"));

        let out = scalar_multiply(&[2.0, 4.0], 0.0, dp());
        assert_eq!(out.value(), Some(&vec![0.0, 0.0]));
        assert!(out.mentions("collapses the vector to the null vector"));

        let out = scalar_multiply(&[], 2.0, dp());
        assert!(matches!(out.failure(), Some(Failure::Shape(_))));
    }

    #[test]
    fn test_scalar_multiply_plugin() {
        let ctx = EvalContext::new();
        let args = [Value::Vector(vec![1.0, 2.0]), Value::Number(2.0)];
        let report = ScalarMultiplyFn.call(&args, &ctx).unwrap();
        assert_eq!(report.value(), Some(&Value::Vector(vec![2.0, 4.0])));
        assert!(ScalarMultiplyFn.meta().requires_scalar);

        let err = ScalarMultiplyFn.call(&args[..1], &ctx).unwrap_err();
        assert_eq!(err.code, stepwise_core::codes::ARG_COUNT);
    }
}
