//! Stepwise Core - Fundamental types
//!
//! This crate provides the core types used throughout Stepwise:
//! - `Value`: operands and results (scalar, vector, matrix)
//! - `Outcome`: a result or a `Failure`, plus the narrated steps
//! - `Failure`: why a computation had no result
//! - `StepwiseError`: structured errors for malformed requests
//! - trace formatting helpers and `DecimalPlaces`

mod value;
mod error;
mod failure;
mod outcome;
mod format;

pub use value::Value;
pub use error::{StepwiseError, Severity, codes};
pub use failure::Failure;
pub use outcome::{Outcome, Trace, VisualVector};
pub use format::{
    DecimalPlaces, EXPONENTIAL_ABOVE, format_list, format_number, format_plain, format_plain_list,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DecimalPlaces, Failure, Outcome, StepwiseError, Trace, Value, VisualVector};
    pub use crate::{format_number, format_plain};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod value_tests {
        use super::*;
        use serde_json::json;

        #[test]
        fn test_from_json_scalar() {
            let v = Value::from_json(&json!(2.5)).unwrap();
            assert_eq!(v.as_number(), Some(2.5));
        }

        #[test]
        fn test_from_json_vector() {
            let v = Value::from_json(&json!([3, 4])).unwrap();
            assert_eq!(v.as_vector(), Some(&[3.0, 4.0][..]));
        }

        #[test]
        fn test_from_json_matrix() {
            let v = Value::from_json(&json!([[1, 2], [3, 4]])).unwrap();
            assert_eq!(v.type_name(), "Matrix");
            assert_eq!(v.as_matrix().unwrap()[1], vec![3.0, 4.0]);
        }

        #[test]
        fn test_from_json_empty_array_is_vector() {
            let v = Value::from_json(&json!([])).unwrap();
            assert_eq!(v.as_vector(), Some(&[][..]));
        }

        #[test]
        fn test_from_json_rejects_mixed() {
            let err = Value::from_json(&json!([[1, 2], 3])).unwrap_err();
            assert_eq!(err.code, codes::PARSE_ERROR);

            let err = Value::from_json(&json!(["a", 1])).unwrap_err();
            assert!(err.message.contains("element 1"));
        }

        #[test]
        fn test_round_trip_json() {
            let v = Value::Matrix(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
            assert_eq!(Value::from_json(&v.to_json()).unwrap(), v);
        }
    }

    mod failure_tests {
        use super::*;

        #[test]
        fn test_failure_codes() {
            assert_eq!(Failure::shape("x").code(), codes::SHAPE_ERROR);
            assert_eq!(Failure::singular("x").code(), codes::SINGULAR);
            assert_eq!(Failure::dimension("x").code(), codes::DIMENSION_RESTRICTION);
            assert_eq!(Failure::degenerate("x").code(), codes::DEGENERATE_INPUT);
        }

        #[test]
        fn test_failure_into_error() {
            let err: StepwiseError = Failure::singular("det = 0").into();
            assert_eq!(err.code, codes::SINGULAR);
            assert!(err.message.contains("det = 0"));
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_arg_count_names_operation() {
            let err = StepwiseError::arg_count("multiply", 2, 1);
            assert_eq!(err.code, codes::ARG_COUNT);
            assert_eq!(err.operation.as_deref(), Some("multiply"));
        }

        #[test]
        fn test_error_display() {
            let err = StepwiseError::unknown_operation("determinnat");
            let display = format!("{}", err);
            assert!(display.contains("UNKNOWN_OPERATION"));
            assert!(display.contains("suggestion"));
        }
    }
}
