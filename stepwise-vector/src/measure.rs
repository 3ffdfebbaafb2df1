//! Single-vector measurements: magnitude, direction angle, normalization

use crate::helpers::{arrow, extract_vector, joined, norm, squared_terms};
use crate::palette::PALETTE;
use stepwise_core::{
    format_list, format_number, format_plain, format_plain_list, DecimalPlaces, Failure, Outcome,
    StepwiseError, Trace, Value,
};
use stepwise_plugin::{ArgMeta, EvalContext, OperationMeta, OperationPlugin, Report};
use tracing::debug;

/// Euclidean length `|v| = √(Σ vᵢ²)`. The empty vector has magnitude 0.
pub fn magnitude(v: &[f64], dp: DecimalPlaces) -> Outcome<f64> {
    debug!(dim = v.len(), "magnitude");
    let mut trace = Trace::new();
    if v.is_empty() {
        trace.line("The vector is empty, so its magnitude is 0.");
        return trace.ok(0.0);
    }

    trace.line(format!("Magnitude of the vector {}", format_plain_list(v)));
    trace.line("The magnitude is the square root of the sum of the squared components.");
    trace.line(format!("|v| = √({})", squared_terms(v)));

    let squares: Vec<f64> = v.iter().map(|c| c * c).collect();
    let sum: f64 = squares.iter().sum();
    trace.line(format!("|v| = √({})", joined(&squares, " + ", dp)));
    trace.line(format!("|v| = √{}", format_number(sum, dp)));

    let length = sum.sqrt();
    trace.line(format!("|v| = {}", format_number(length, dp)));

    let vectors = arrow(v, PALETTE.vector_a, "Vector A").into_iter().collect();
    trace.ok(length).with_vectors(vectors)
}

/// Direction of `(v₀, v₁)` measured from the positive x axis, in degrees within `[0, 360)`
pub fn angle(v: &[f64], dp: DecimalPlaces) -> Outcome<f64> {
    debug!(dim = v.len(), "vector angle");
    let mut trace = Trace::new();
    let (x, y) = match v {
        [x, y, ..] => (*x, *y),
        _ => {
            trace.line("Error: the vector needs at least 2 components to have an angle.");
            return trace.fail(Failure::dimension(format!("{} component(s), need 2", v.len())));
        }
    };

    trace.line(format!("Angle of the vector {} with the positive x axis.", format_plain_list(v)));
    trace.line("For a 2D vector (x, y) the angle is θ = atan2(y, x)");
    trace.line(format!("x component: {}", format_plain(x)));
    trace.line(format!("y component: {}", format_plain(y)));

    let radians = y.atan2(x);
    trace.line(format!(
        "θ = atan2({}, {}) = {} radians",
        format_plain(y),
        format_plain(x),
        format_number(radians, dp)
    ));

    let degrees = radians.to_degrees();
    trace.line(format!("In degrees: θ = {} × (180/π)", format_number(radians, dp)));
    trace.line(format!("θ = {}°", format_number(degrees, dp)));

    let positive = if degrees < 0.0 {
        let shifted = degrees + 360.0;
        trace.line(format!(
            "Shifting into 0° to 360°: {}° + 360° = {}°",
            format_number(degrees, dp),
            format_number(shifted, dp)
        ));
        shifted
    } else {
        degrees
    };

    let vectors = arrow(v, PALETTE.vector_a, "Vector A").into_iter().collect();
    trace.ok(positive).with_vectors(vectors)
}

/// Unit vector `v / |v|`. A zero vector is returned unchanged with an explanation.
pub fn normalize(v: &[f64], dp: DecimalPlaces) -> Outcome<Vec<f64>> {
    debug!(dim = v.len(), "normalize");
    let mut trace = Trace::new();
    if v.is_empty() {
        trace.line("Error: the vector is empty.");
        return trace.fail(Failure::shape("empty vector"));
    }

    let length = norm(v);
    if length == 0.0 {
        trace.line(format!("The vector {} has magnitude 0.", format_plain_list(v)));
        trace.line("A null vector has no direction, so it cannot be normalized.");
        return trace.ok(v.to_vec());
    }

    trace.line(format!("Normalizing the vector {}", format_plain_list(v)));
    trace.line("Each component is divided by the magnitude of the vector.");
    trace.line(format!("Magnitude: |v| = {}", format_number(length, dp)));
    trace.line("Formula: v_normalized = v / |v|");

    let unit: Vec<f64> = v.iter().map(|c| c / length).collect();
    for (i, (c, u)) in v.iter().zip(&unit).enumerate() {
        trace.line(format!(
            "Component {}: {} / {} = {}",
            i + 1,
            format_plain(*c),
            format_number(length, dp),
            format_number(*u, dp)
        ));
    }
    trace.line(format!("Normalized vector = {}", format_list(&unit, dp)));
    trace.line(format!("Check: |v_normalized| = {} ≈ 1", format_number(norm(&unit), dp)));

    let mut vectors = Vec::new();
    if let (Some(original), Some(normalized)) = (
        arrow(v, PALETTE.vector_a, "Vector A"),
        arrow(&unit, PALETTE.normalized, "Unit vector"),
    ) {
        vectors = vec![original, normalized];
        trace.line("In the plane:");
        trace.line("- Vector A (blue): the original vector");
        trace.line("- Unit vector (amber): the normalized vector, length 1");
        trace.line("The normalized vector keeps the direction and has length 1.");
    }

    trace.ok(unit).with_vectors(vectors)
}

// ============================================================================
// MAGNITUDE
// ============================================================================

pub struct MagnitudeFn;

static SINGLE_ARGS: [ArgMeta; 1] = [ArgMeta::required("v", "Vector", "Input vector")];
static MAGNITUDE_EXAMPLES: [&str; 2] = ["magnitude([3, 4]) → 5", "magnitude([1, 2, 2]) → 3"];
static MAGNITUDE_RELATED: [&str; 2] = ["normalize", "dot_product"];

impl OperationPlugin for MagnitudeFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "magnitude",
            label: "Magnitude",
            description: "Length (Euclidean norm) of a vector",
            usage: "magnitude(v)",
            args: &SINGLE_ARGS,
            returns: "Number",
            examples: &MAGNITUDE_EXAMPLES,
            category: "vector",
            related: &MAGNITUDE_RELATED,
            requires_two_operands: false,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 1 {
            return Err(StepwiseError::arg_count("magnitude", 1, args.len()));
        }
        let v = extract_vector(&args[0], "magnitude", "v")?;
        Ok(magnitude(&v, ctx.precision).map(Value::Number))
    }
}

// ============================================================================
// NORMALIZE
// ============================================================================

pub struct NormalizeFn;

static NORMALIZE_EXAMPLES: [&str; 1] = ["normalize([3, 4]) → [0.6, 0.8]"];
static NORMALIZE_RELATED: [&str; 1] = ["magnitude"];

impl OperationPlugin for NormalizeFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "normalize",
            label: "Normalize",
            description: "Unit vector with the same direction",
            usage: "normalize(v)",
            args: &SINGLE_ARGS,
            returns: "Vector",
            examples: &NORMALIZE_EXAMPLES,
            category: "vector",
            related: &NORMALIZE_RELATED,
            requires_two_operands: false,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 1 {
            return Err(StepwiseError::arg_count("normalize", 1, args.len()));
        }
        let v = extract_vector(&args[0], "normalize", "v")?;
        Ok(normalize(&v, ctx.precision).map(Value::Vector))
    }
}

// ============================================================================
// VECTOR_ANGLE
// ============================================================================

pub struct VectorAngleFn;

static ANGLE_EXAMPLES: [&str; 2] = ["vector_angle([1, 1]) → 45", "vector_angle([0, -1]) → 270"];
static ANGLE_RELATED: [&str; 1] = ["angle_between"];

impl OperationPlugin for VectorAngleFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "vector_angle",
            label: "Vector angle",
            description: "Angle with the positive x axis in degrees, using the first two components",
            usage: "vector_angle(v)",
            args: &SINGLE_ARGS,
            returns: "Number",
            examples: &ANGLE_EXAMPLES,
            category: "vector",
            related: &ANGLE_RELATED,
            requires_two_operands: false,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 1 {
            return Err(StepwiseError::arg_count("vector_angle", 1, args.len()));
        }
        let v = extract_vector(&args[0], "vector_angle", "v")?;
        Ok(angle(&v, ctx.precision).map(Value::Number))
    }
}
