//! Relations between two vectors: the angle they form and projection

use crate::helpers::{
    arrow, common_length, dot, empty_operand, extract_vector, norm, operand_arrows, product_terms,
    squared_terms, ZERO_EPSILON,
};
use crate::palette::PALETTE;
use stepwise_core::{
    format_list, format_number, format_plain, format_plain_list, DecimalPlaces, Failure, Outcome,
    StepwiseError, Trace, Value, VisualVector,
};
use stepwise_plugin::{ArgMeta, EvalContext, OperationMeta, OperationPlugin, Report};
use tracing::debug;

/// `θ = arccos(A·B / (|A||B|))` in degrees
pub fn angle_between(a: &[f64], b: &[f64], dp: DecimalPlaces) -> Outcome<f64> {
    debug!(a = a.len(), b = b.len(), "angle between");
    let mut trace = Trace::new();
    if a.is_empty() || b.is_empty() {
        return empty_operand(trace);
    }

    let n = common_length(a, b, "for the angle", &mut trace);
    let (a, b) = (&a[..n], &b[..n]);

    trace.line("Angle between two vectors:");
    trace.line(format!("A = {}", format_plain_list(a)));
    trace.line(format!("B = {}", format_plain_list(b)));
    trace.line("Formula: cos(θ) = (A·B) / (|A|·|B|)");

    let (value, mag_a, mag_b) = (dot(a, b), norm(a), norm(b));
    if mag_a == 0.0 || mag_b == 0.0 {
        trace.line("Error: at least one of the vectors has magnitude zero, so there is no angle.");
        return trace.fail(Failure::degenerate("zero-magnitude operand"));
    }

    let cos = value / (mag_a * mag_b);
    let theta = cos.clamp(-1.0, 1.0).acos().to_degrees();

    trace.line("First the dot product A·B:");
    trace.line(format!("A·B = {}", product_terms(a, b)));
    trace.line(format!("A·B = {}", format_number(value, dp)));

    trace.line("Then the magnitudes:");
    trace.line(format!("|A| = √({})", squared_terms(a)));
    trace.line(format!("|A| = {}", format_number(mag_a, dp)));
    trace.line(format!("|B| = √({})", squared_terms(b)));
    trace.line(format!("|B| = {}", format_number(mag_b, dp)));

    trace.line("Applying the formula:");
    trace.line(format!(
        "cos(θ) = {} / ({} × {})",
        format_number(value, dp),
        format_number(mag_a, dp),
        format_number(mag_b, dp)
    ));
    trace.line(format!("cos(θ) = {}", format_number(cos, dp)));

    if (cos - 1.0).abs() < ZERO_EPSILON {
        trace.line("cos(θ) ≈ 1, so θ = 0° (parallel, same direction)");
    } else if (cos + 1.0).abs() < ZERO_EPSILON {
        trace.line("cos(θ) ≈ -1, so θ = 180° (parallel, opposite direction)");
    } else if cos.abs() < ZERO_EPSILON {
        trace.line("cos(θ) ≈ 0, so θ = 90° (perpendicular)");
    } else {
        trace.line(format!("θ = arccos({})", format_number(cos, dp)));
        trace.line(format!("θ = {}°", format_number(theta, dp)));
    }

    let vectors = operand_arrows(a, b);
    if !vectors.is_empty() {
        trace.line("In the plane:");
        trace.line("- Vector A (blue): first vector");
        trace.line("- Vector B (green): second vector");
        trace.line(format!("- The angle between them is {}°", format_number(theta, dp)));
        trace.line(if (theta - 90.0).abs() < ZERO_EPSILON {
            "- The vectors are perpendicular (a right angle)"
        } else if theta < 90.0 {
            "- The angle is acute (< 90°): the vectors point in similar directions"
        } else {
            "- The angle is obtuse (> 90°): the vectors point in opposing directions"
        });
    }

    trace.ok(theta).with_vectors(vectors)
}

/// `proj_B(A) = (A·B / |B|²) · B`
pub fn projection(a: &[f64], b: &[f64], dp: DecimalPlaces) -> Outcome<Vec<f64>> {
    debug!(a = a.len(), b = b.len(), "projection");
    let mut trace = Trace::new();
    if a.is_empty() || b.is_empty() {
        return empty_operand(trace);
    }

    let n = common_length(a, b, "for the projection", &mut trace);
    let (a, b) = (&a[..n], &b[..n]);

    trace.line("Projection of vector A onto vector B:");
    trace.line(format!("A = {}", format_plain_list(a)));
    trace.line(format!("B = {}", format_plain_list(b)));
    trace.line("Formula: proj_B(A) = (A·B / |B|²) × B");

    let value = dot(a, b);
    let b_squared = dot(b, b);
    if b_squared < ZERO_EPSILON {
        trace.line("Error: vector B has magnitude zero, so there is nothing to project onto.");
        return trace.fail(Failure::degenerate("|B|² = 0"));
    }

    let scale = value / b_squared;
    let projected: Vec<f64> = b.iter().map(|c| scale * c).collect();

    trace.line("First the dot product A·B:");
    trace.line(format!("A·B = {}", product_terms(a, b)));
    trace.line(format!("A·B = {}", format_number(value, dp)));

    trace.line("Then |B|²:");
    trace.line(format!("|B|² = {}", squared_terms(b)));
    trace.line(format!("|B|² = {}", format_number(b_squared, dp)));

    trace.line("The scalar A·B / |B|²:");
    trace.line(format!(
        "A·B / |B|² = {} / {}",
        format_number(value, dp),
        format_number(b_squared, dp)
    ));
    trace.line(format!("A·B / |B|² = {}", format_number(scale, dp)));

    trace.line("Finally the scalar times B:");
    trace.line(format!("proj_B(A) = {} × {}", format_number(scale, dp), format_plain_list(b)));
    let products: Vec<String> = b.iter()
        .zip(&projected)
        .map(|(c, p)| {
            format!("{} × {} = {}", format_number(scale, dp), format_plain(*c), format_number(*p, dp))
        })
        .collect();
    trace.line(format!("proj_B(A) = [{}]", products.join(", ")));
    trace.line(format!("proj_B(A) = {}", format_list(&projected, dp)));

    let mut vectors = operand_arrows(a, b);
    let shadow = arrow(&projected, PALETTE.projection, "Projection of A onto B");
    if let (false, Some(shadow)) = (vectors.is_empty(), shadow) {
        let distance = VisualVector::new(shadow.x - a[0], shadow.y - a[1])
            .starting_at(a[0], a[1])
            .colored(PALETTE.connector)
            .labeled("Distance");
        vectors.push(shadow);
        vectors.push(distance);

        trace.line("In the plane:");
        trace.line("- Vector A (blue): the vector being projected");
        trace.line("- Vector B (green): the direction projected onto");
        trace.line("- Projection (purple): the component of A along B");
        trace.line("- Distance (gray): from the tip of A to its projection, perpendicular to B");
        trace.line("The projection is the shadow of A on the direction of B.");
    }

    trace.ok(projected).with_vectors(vectors)
}

// ============================================================================
// ANGLE_BETWEEN
// ============================================================================

pub struct AngleBetweenFn;

static PAIR_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Vector", "First vector"),
    ArgMeta::required("b", "Vector", "Second vector"),
];
static ANGLE_BETWEEN_EXAMPLES: [&str; 2] = [
    "angle_between([1, 0], [0, 1]) → 90",
    "angle_between([1, 0], [1, 1]) → 45",
];
static ANGLE_BETWEEN_RELATED: [&str; 2] = ["dot_product", "vector_angle"];

impl OperationPlugin for AngleBetweenFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "angle_between",
            label: "Angle between vectors",
            description: "Angle between two vectors in degrees",
            usage: "angle_between(a, b)",
            args: &PAIR_ARGS,
            returns: "Number",
            examples: &ANGLE_BETWEEN_EXAMPLES,
            category: "vector",
            related: &ANGLE_BETWEEN_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("angle_between", 2, args.len()));
        }
        let a = extract_vector(&args[0], "angle_between", "a")?;
        let b = extract_vector(&args[1], "angle_between", "b")?;
        Ok(angle_between(&a, &b, ctx.precision).map(Value::Number))
    }
}

// ============================================================================
// PROJECTION
// ============================================================================

pub struct ProjectionFn;

static PROJECTION_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Vector", "Vector to project"),
    ArgMeta::required("b", "Vector", "Direction to project onto"),
];
static PROJECTION_EXAMPLES: [&str; 1] = ["projection([3, 4], [1, 0]) → [3, 0]"];
static PROJECTION_RELATED: [&str; 2] = ["dot_product", "scalar_multiply"];

impl OperationPlugin for ProjectionFn {
    fn meta(&self) -> OperationMeta {
        OperationMeta {
            name: "projection",
            label: "Projection",
            description: "Orthogonal projection of the first vector onto the second",
            usage: "projection(a, b)",
            args: &PROJECTION_ARGS,
            returns: "Vector",
            examples: &PROJECTION_EXAMPLES,
            category: "vector",
            related: &PROJECTION_RELATED,
            requires_two_operands: true,
            requires_scalar: false,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        if args.len() != 2 {
            return Err(StepwiseError::arg_count("projection", 2, args.len()));
        }
        let a = extract_vector(&args[0], "projection", "a")?;
        let b = extract_vector(&args[1], "projection", "b")?;
        Ok(projection(&a, &b, ctx.precision).map(Value::Vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dp() -> DecimalPlaces {
        DecimalPlaces::default()
    }

    #[test]
    fn test_angle_between_perpendicular() {
        let out = angle_between(&[1.0, 0.0], &[0.0, 1.0], dp());
        assert!((out.scalar_or_nan() - 90.0).abs() < 1e-12);
        assert!(out.mentions("θ = 90° (perpendicular)"));
        assert!(out.mentions("a right angle"));
    }

    #[test]
    fn test_angle_between_parallel() {
        let out = angle_between(&[0.0, 3.0], &[0.0, 5.0], dp());
        assert_eq!(out.value(), Some(&0.0));
        assert!(out.mentions("parallel, same direction"));

        let out = angle_between(&[2.0, 0.0], &[-3.0, 0.0], dp());
        assert!((out.scalar_or_nan() - 180.0).abs() < 1e-12);
        assert!(out.mentions("parallel, opposite direction"));

        // cos(θ) lands within rounding of 1, which still reads as parallel
        let out = angle_between(&[1.0, 2.0], &[2.0, 4.0], dp());
        assert!(out.scalar_or_nan().abs() < 1e-4);
        assert!(out.mentions("parallel, same direction"));
    }

    #[test]
    fn test_angle_between_classifies() {
        let out = angle_between(&[1.0, 0.0], &[1.0, 1.0], dp());
        assert!((out.scalar_or_nan() - 45.0).abs() < 1e-9);
        assert!(out.mentions("θ = 45.00°"));
        assert!(out.last_step().unwrap().contains("acute"));

        let out = angle_between(&[1.0, 0.0], &[-1.0, 1.0], dp());
        assert!((out.scalar_or_nan() - 135.0).abs() < 1e-9);
        assert!(out.last_step().unwrap().contains("obtuse"));
        assert_eq!(out.vectors.len(), 2);
    }

    #[test]
    fn test_angle_between_zero_vector() {
        let out = angle_between(&[0.0, 0.0], &[1.0, 1.0], dp());
        assert!(matches!(out.failure(), Some(Failure::DegenerateInput(_))));
        assert!(out.last_step().unwrap().contains("magnitude zero"));

        let out = angle_between(&[], &[1.0], dp());
        assert!(matches!(out.failure(), Some(Failure::Shape(_))));
    }

    #[test]
    fn test_projection() {
        let out = projection(&[3.0, 4.0], &[1.0, 0.0], dp());
        assert_eq!(out.value(), Some(&vec![3.0, 0.0]));
        assert!(out.mentions("A·B / |B|² = 3.00 / 1.00"));
        assert!(out.mentions("proj_B(A) = [3.00, 0.00]"));

        let labels: Vec<_> = out.vectors.iter().filter_map(|v| v.label.as_deref()).collect();
        assert_eq!(labels, ["Vector A", "Vector B", "Projection of A onto B", "Distance"]);

        let distance = &out.vectors[3];
        assert_eq!((distance.start_x, distance.start_y), (3.0, 4.0));
        assert_eq!(distance.tip(), (3.0, 0.0));
        assert_eq!(distance.color.as_deref(), Some(PALETTE.connector));
    }

    #[test]
    fn test_projection_onto_zero_vector() {
        let out = projection(&[3.0, 4.0], &[0.0, 0.0], dp());
        assert!(matches!(out.failure(), Some(Failure::DegenerateInput(_))));
        assert!(out.vectors.is_empty());
    }

    #[test]
    fn test_projection_truncates() {
        let out = projection(&[2.0, 2.0, 9.0], &[0.0, 2.0], dp());
        assert_eq!(out.value(), Some(&vec![0.0, 2.0]));
        assert!(out.steps[0].starts_with("Warning:"));
    }
}
