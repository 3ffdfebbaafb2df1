//! Helper functions for vector operations

use crate::palette::PALETTE;
use stepwise_core::{
    format_number, format_plain, DecimalPlaces, Failure, Outcome, StepwiseError, Trace, Value,
    VisualVector,
};

/// Cosines and magnitudes closer to zero than this are treated as exact
pub const ZERO_EPSILON: f64 = 1e-10;

/// Extract a vector from a Value. `[[x], [y]]` columns and `[[x, y]]` rows are accepted too.
pub fn extract_vector(value: &Value, op: &str, arg: &str) -> Result<Vec<f64>, StepwiseError> {
    match value {
        Value::Vector(v) => Ok(v.clone()),
        Value::Matrix(rows) if rows.len() == 1 => Ok(rows[0].clone()),
        Value::Matrix(rows) if rows.iter().all(|r| r.len() == 1) => {
            Ok(rows.iter().map(|r| r[0]).collect())
        }
        _ => Err(StepwiseError::arg_type(op, arg, "Vector", value.type_name())),
    }
}

/// Extract a scalar from a Value
pub fn extract_scalar(value: &Value, op: &str, arg: &str) -> Result<f64, StepwiseError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Vector(v) if v.len() == 1 => Ok(v[0]),
        _ => Err(StepwiseError::arg_type(op, arg, "Number", value.type_name())),
    }
}

pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|c| c * c).sum::<f64>().sqrt()
}

/// Dot product over the common prefix of `a` and `b`
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Length both operands share. A mismatch is narrated, never rejected.
pub(crate) fn common_length(a: &[f64], b: &[f64], purpose: &str, trace: &mut Trace) -> usize {
    if a.len() != b.len() {
        trace.line(format!(
            "Warning: the vectors have different dimensions (A: {}, B: {}).",
            a.len(),
            b.len()
        ));
        trace.line(format!("The smaller dimension is used {}.", purpose));
    }
    a.len().min(b.len())
}

/// Failure for a two-operand operation that received an empty vector
pub(crate) fn empty_operand<T>(mut trace: Trace) -> Outcome<T> {
    trace.line("Error: at least one of the vectors is empty.");
    trace.fail(Failure::shape("empty operand"))
}

/// `3² + 4²`
pub(crate) fn squared_terms(v: &[f64]) -> String {
    v.iter().map(|&c| format!("{}²", format_plain(c))).collect::<Vec<_>>().join(" + ")
}

/// `(1 × 4) + (2 × 5)`
pub(crate) fn product_terms(a: &[f64], b: &[f64]) -> String {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| format!("({} × {})", format_plain(x), format_plain(y)))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Computed values joined by `sep`
pub(crate) fn joined(values: &[f64], sep: &str, dp: DecimalPlaces) -> String {
    values.iter().map(|&v| format_number(v, dp)).collect::<Vec<_>>().join(sep)
}

/// Arrow for the first two components, if there are two
pub(crate) fn arrow(v: &[f64], color: &str, label: &str) -> Option<VisualVector> {
    match v {
        [x, y, ..] => Some(VisualVector::new(*x, *y).colored(color).labeled(label)),
        _ => None,
    }
}

/// The usual "Vector A" / "Vector B" pair, when both are drawable
pub(crate) fn operand_arrows(a: &[f64], b: &[f64]) -> Vec<VisualVector> {
    match (arrow(a, PALETTE.vector_a, "Vector A"), arrow(b, PALETTE.vector_b, "Vector B")) {
        (Some(a), Some(b)) => vec![a, b],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::codes;

    #[test]
    fn test_extract_vector() {
        assert_eq!(extract_vector(&Value::Vector(vec![1.0, 2.0]), "t", "v").unwrap(), vec![1.0, 2.0]);
        assert_eq!(
            extract_vector(&Value::Matrix(vec![vec![1.0], vec![2.0]]), "t", "v").unwrap(),
            vec![1.0, 2.0]
        );
        assert_eq!(
            extract_vector(&Value::Matrix(vec![vec![1.0, 2.0, 3.0]]), "t", "v").unwrap(),
            vec![1.0, 2.0, 3.0]
        );

        let err = extract_vector(&Value::Matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]), "t", "v").unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
    }

    #[test]
    fn test_extract_scalar() {
        assert_eq!(extract_scalar(&Value::Number(-2.5), "t", "k").unwrap(), -2.5);
        assert_eq!(extract_scalar(&Value::Vector(vec![3.0]), "t", "k").unwrap(), 3.0);
        assert!(extract_scalar(&Value::Text("2".into()), "t", "k").is_err());
    }

    #[test]
    fn test_common_length_warns_on_mismatch() {
        let mut trace = Trace::new();
        assert_eq!(common_length(&[1.0, 2.0], &[3.0, 4.0], "for the sum", &mut trace), 2);
        assert!(trace.is_empty());

        assert_eq!(common_length(&[1.0, 2.0, 3.0], &[4.0], "for the sum", &mut trace), 1);
        assert_eq!(trace.steps()[0], "Warning: the vectors have different dimensions (A: 3, B: 1).");
        assert_eq!(trace.steps()[1], "The smaller dimension is used for the sum.");
    }

    #[test]
    fn test_term_rendering() {
        assert_eq!(squared_terms(&[3.0, -4.0]), "3² + -4²");
        assert_eq!(product_terms(&[1.0, 2.0], &[0.5, 3.0]), "(1 × 0.5) + (2 × 3)");
        assert_eq!(joined(&[1.0, 2.5], " + ", DecimalPlaces::default()), "1.00 + 2.50");
    }

    #[test]
    fn test_arrow_needs_two_components() {
        assert!(arrow(&[1.0], "#000000", "A").is_none());
        let a = arrow(&[1.0, 2.0, 3.0], "#000000", "A").unwrap();
        assert_eq!((a.x, a.y), (1.0, 2.0));
        assert!(operand_arrows(&[1.0, 2.0], &[3.0]).is_empty());
        assert_eq!(operand_arrows(&[1.0, 2.0], &[3.0, 4.0]).len(), 2);
    }
}
