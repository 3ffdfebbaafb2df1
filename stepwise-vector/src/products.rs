//! Dot and cross products

use crate::helpers::{
    common_length, dot, empty_operand, extract_vector, joined, norm, operand_arrows, product_terms,
    ZERO_EPSILON,
};
use stepwise_core::{
    format_list, format_number, format_plain, format_plain_list, DecimalPlaces, Failure, Outcome,
    StepwiseError, Trace, Value,
};
use stepwise_plugin::{ArgMeta, EvalContext, OperationMeta, OperationPlugin, Report};
use tracing::debug;

/// `A·B = Σ aᵢbᵢ` over the shared dimension, with its geometric reading
pub fn dot_product(a: &[f64], b: &[f64], dp: DecimalPlaces) -> Outcome<f64> {
    debug!(a = a.len(), b = b.len(), "dot product");
    let mut trace = Trace::new();
    if a.is_empty() || b.is_empty() {
        return empty_operand(trace);
    }

    let n = common_length(a, b, "for the dot product", &mut trace);
    let (a, b) = (&a[..n], &b[..n]);

    trace.line("Dot product of two vectors:");
    trace.line(format!("A = {}", format_plain_list(a)));
    trace.line(format!("B = {}", format_plain_list(b)));
    trace.line("Multiply the corresponding components and add the products:");
    trace.line("A·B = (A₁×B₁) + (A₂×B₂) + ... + (Aₙ×Bₙ)");

    let products: Vec<f64> = a.iter().zip(b).map(|(x, y)| x * y).collect();
    let value: f64 = products.iter().sum();
    trace.line(format!("A·B = {}", product_terms(a, b)));
    trace.line(format!("A·B = {}", joined(&products, " + ", dp)));
    trace.line(format!("A·B = {}", format_number(value, dp)));

    trace.line("Geometric interpretation:");
    trace.line("A·B = |A|·|B|·cos(θ), where θ is the angle between the vectors.");
    let (mag_a, mag_b) = (norm(a), norm(b));
    trace.line(format!("|A| = {}", format_number(mag_a, dp)));
    trace.line(format!("|B| = {}", format_number(mag_b, dp)));
    if mag_a > 0.0 && mag_b > 0.0 {
        let cos = value / (mag_a * mag_b);
        let theta = cos.clamp(-1.0, 1.0).acos().to_degrees();
        trace.line(format!(
            "cos(θ) = A·B / (|A|·|B|) = {} / ({} × {}) = {}",
            format_number(value, dp),
            format_number(mag_a, dp),
            format_number(mag_b, dp),
            format_number(cos, dp)
        ));
        trace.line(format!("θ = arccos({}) = {}°", format_number(cos, dp), format_number(theta, dp)));
    } else {
        trace.line("The angle is undefined because at least one of the vectors has magnitude zero.");
    }

    let vectors = operand_arrows(a, b);
    if !vectors.is_empty() {
        trace.line("In the plane:");
        trace.line("- Vector A (blue): first vector");
        trace.line("- Vector B (green): second vector");
        trace.line("The dot product is a number, not a vector, so it has no arrow.");
        trace.line("Orthogonal (perpendicular) vectors have a dot product of 0.");
        trace.line("A positive dot product means the angle is below 90°.");
        trace.line("A negative dot product means the angle is above 90°.");
    }

    trace.ok(value).with_vectors(vectors)
}

/// Append `z = 0` to an exactly-2D operand; longer operands keep their first 3 components
fn lift(v: &[f64], name: char, trace: &mut Trace) -> [f64; 3] {
    match *v {
        [x, y] => {
            trace.line(format!("Vector {} extended: {}", name, format_plain_list(&[x, y, 0.0])));
            [x, y, 0.0]
        }
        [x, y, z, ..] => [x, y, z],
        _ => [f64::NAN; 3],
    }
}

/// `A × B` in 3D. Exactly-2D operands are lifted with `z = 0`.
pub fn cross_product(a: &[f64], b: &[f64], dp: DecimalPlaces) -> Outcome<Vec<f64>> {
    debug!(a = a.len(), b = b.len(), "cross product");
    let mut trace = Trace::new();

    if a.len() < 3 || b.len() < 3 {
        if a.len() < 2 || b.len() < 2 {
            trace.line("Error: the cross product needs 3-dimensional vectors.");
            trace.line(format!(
                "Vector A has {} dimension(s) and vector B has {}.",
                a.len(),
                b.len()
            ));
            return trace.fail(Failure::dimension(format!(
                "cross product of {}D and {}D vectors",
                a.len(),
                b.len()
            )));
        }
        trace.line("Extending the 2D vectors to 3D with a zero z component.");
    }
    let [a1, a2, a3] = lift(a, 'A', &mut trace);
    let [b1, b2, b3] = lift(b, 'B', &mut trace);
    let (a3d, b3d) = ([a1, a2, a3], [b1, b2, b3]);

    trace.line("Cross product A × B:");
    trace.line(format!("A = {}", format_plain_list(&a3d)));
    trace.line(format!("B = {}", format_plain_list(&b3d)));
    trace.line("Formula: A × B = [a₂b₃ - a₃b₂, a₃b₁ - a₁b₃, a₁b₂ - a₂b₁]");

    let components = [
        ("first", "c₁", "a₂b₃ - a₃b₂", (a2, b3), (a3, b2)),
        ("second", "c₂", "a₃b₁ - a₁b₃", (a3, b1), (a1, b3)),
        ("third", "c₃", "a₁b₂ - a₂b₁", (a1, b2), (a2, b1)),
    ];
    let mut result = Vec::with_capacity(3);
    for (ordinal, symbol, formula, (p, q), (r, s)) in components {
        let (left, right) = (p * q, r * s);
        let c = left - right;
        trace.line(format!("The {} component:", ordinal));
        trace.line(format!(
            "{} = {} = ({} × {}) - ({} × {})",
            symbol,
            formula,
            format_plain(p),
            format_plain(q),
            format_plain(r),
            format_plain(s)
        ));
        trace.line(format!(
            "{} = {} - {} = {}",
            symbol,
            format_number(left, dp),
            format_number(right, dp),
            format_number(c, dp)
        ));
        result.push(c);
    }
    trace.line(format!("Resulting vector = {}", format_list(&result, dp)));

    trace.line("Geometric interpretation:");
    trace.line("1. A × B is perpendicular to both A and B.");
    trace.line("2. |A × B| is the area of the parallelogram spanned by A and B.");
    trace.line("3. Its direction follows the right-hand rule.");

    let (mag_a, mag_b, mag_c) = (norm(&a3d), norm(&b3d), norm(&result));
    trace.line("Magnitudes:");
    trace.line(format!("|A| = {}", format_number(mag_a, dp)));
    trace.line(format!("|B| = {}", format_number(mag_b, dp)));
    trace.line(format!("|A × B| = {}", format_number(mag_c, dp)));

    trace.line("Perpendicularity check:");
    trace.line(format!("(A × B) · A = {} ≈ 0", format_number(dot(&result, &a3d), dp)));
    trace.line(format!("(A × B) · B = {} ≈ 0", format_number(dot(&result, &b3d), dp)));

    let mut vectors = Vec::new();
    if result[0].abs() < ZERO_EPSILON && result[1].abs() < ZERO_EPSILON {
        vectors = operand_arrows(&a3d, &b3d);
        trace.line("In the plane:");
        trace.line("- Vector A (blue): first vector");
        trace.line("- Vector B (green): second vector");
        trace.line(format!("- A × B = {} only has a z component", format_list(&result, dp)));
        trace.line("- It is perpendicular to the xy plane, so it cannot be drawn there");
        trace.line(format!(
            "- Its magnitude ({}) is the area of the parallelogram spanned by A and B.",
            format_number(mag_c, dp)
        ));
    } else {
        trace.line("Note on the picture:");
        trace.line("- A × B cannot be drawn faithfully in a 2D plane");
        trace.line("- The result is a 3D vector that generally leaves the xy plane");
    }

    trace.ok(result).with_vectors(vectors)
}

// ============================================================================
// DOT_PRODUCT
// ============================================================================

pub struct DotProductFn;

static PAIR_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Vector", "First vector"),
    ArgMeta::required("b", "Vector", "Second vector"),
];
static DOT_EXAMPLES: [&str; 2] = [
    "dot_product([1, 2, 3], [4, 5, 6]) → 32",
    "dot_product([1, 0], [0, 1]) → 0",
];
static DOT_RELATED: [&str; 2] = ["cross_product", "angle_between"];

impl OperationPlugin for DotProductFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "dot_product",
            label: "Dot product",
            description: "Scalar (dot) product of two vectors",
            usage: "dot_product(a, b)",
            args: &PAIR_ARGS,
            returns: "Number",
            examples: &DOT_EXAMPLES,
            category: "vector",
            related: &DOT_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("dot_product", 2, args.len()));
        }
        let a = extract_vector(&args[0], "dot_product", "a")?;
        let b = extract_vector(&args[1], "dot_product", "b")?;
        Ok(dot_product(&a, &b, ctx.precision).map(Value::Number))
    }
}

// ============================================================================
// CROSS_PRODUCT
// ============================================================================

pub struct CrossProductFn;

static CROSS_EXAMPLES: [&str; 2] = [
    "cross_product([1, 0, 0], [0, 1, 0]) → [0, 0, 1]",
    "cross_product([1, 2], [3, 4]) → [0, 0, -2]",
];
static CROSS_RELATED: [&str; 1] = ["dot_product"];

impl OperationPlugin for CrossProductFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "cross_product",
            label: "Cross product",
            description: "Vector (cross) product of two 3D vectors; 2D vectors get z = 0",
            usage: "cross_product(a, b)",
            args: &PAIR_ARGS,
            returns: "Vector",
            examples: &CROSS_EXAMPLES,
            category: "vector",
            related: &CROSS_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("cross_product", 2, args.len()));
        }
        let a = extract_vector(&args[0], "cross_product", "a")?;
        let b = extract_vector(&args[1], "cross_product", "b")?;
        Ok(cross_product(&a, &b, ctx.precision).map(Value::Vector))
    }
}
