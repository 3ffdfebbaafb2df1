//! Stepwise - step-by-step matrix and vector calculator

mod request;
mod render;

pub use request::Request;
pub use render::Renderer;

pub use stepwise_core::{
    DecimalPlaces, Failure, Outcome, StepwiseError, Value, VisualVector,
};
pub use stepwise_plugin::{EvalContext, OperationRegistry, Report};

use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

/// Registry with every matrix and vector operation
pub fn standard_registry() -> OperationRegistry {
    let registry = stepwise_matrix::load_matrix_library(OperationRegistry::new());
    stepwise_vector::load_vector_library(registry)
}

/// Main Stepwise engine
pub struct Stepwise {
    registry: Arc<OperationRegistry>,
    default_precision: DecimalPlaces,
}

impl Stepwise {
    pub fn new(registry: OperationRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            default_precision: DecimalPlaces::default(),
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(standard_registry())
    }

    /// Decimal places used when a call does not ask for its own
    pub fn with_precision(mut self, precision: impl Into<DecimalPlaces>) -> Self {
        self.default_precision = precision.into();
        self
    }

    pub fn precision(&self) -> DecimalPlaces {
        self.default_precision
    }

    /// Run one operation with the default precision
    pub fn run(&self, operation: &str, args: &[Value]) -> Result<Report, StepwiseError> {
        self.run_with(operation, args, self.default_precision)
    }

    pub fn run_with(
        &self,
        operation: &str,
        args: &[Value],
        precision: DecimalPlaces,
    ) -> Result<Report, StepwiseError> {
        let ctx = EvalContext::new().with_precision(precision);
        self.registry.call(operation, args, &ctx)
    }

    /// Run a JSON request, honouring its `decimals` field
    pub fn run_request(&self, request: &Request) -> Result<Report, StepwiseError> {
        let args = request.args()?;
        let precision = request.decimals.map(DecimalPlaces::new).unwrap_or(self.default_precision);
        debug!(operation = %request.operation, args = args.len(), "request");
        self.run_with(&request.operation, &args, precision)
    }

    /// Parse and run `{ "operation": ..., "a": ..., ... }`
    pub fn run_json(&self, json: &JsonValue) -> Result<Report, StepwiseError> {
        let request: Request = serde_json::from_value(json.clone())?;
        self.run_request(&request)
    }

    /// Renderer matching a request's precision
    pub fn renderer(&self, decimals: Option<i64>) -> Renderer {
        Renderer::new(decimals.map(DecimalPlaces::new).unwrap_or(self.default_precision))
    }

    pub fn help(&self, name: Option<&str>) -> Result<JsonValue, StepwiseError> {
        self.registry.help(name)
    }

    pub fn list_operations(&self, category: Option<&str>) -> JsonValue {
        self.registry.list(category)
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }
}

impl Default for Stepwise {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stepwise_core::codes;

    fn test_stepwise() -> Stepwise {
        Stepwise::with_standard_library()
    }

    fn matrix(rows: &[&[f64]]) -> Value {
        Value::Matrix(rows.iter().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn test_standard_registry_has_both_libraries() {
        let registry = standard_registry();
        assert_eq!(registry.len(), 20);
        assert!(registry.contains("determinant_sarrus"));
        assert!(registry.contains("cross_product"));
    }

    #[test]
    fn test_two_by_two_determinant() {
        let report = test_stepwise().run("determinant", &[matrix(&[&[1.0, 2.0], &[3.0, 4.0]])]).unwrap();
        assert_eq!(report.value(), Some(&Value::Number(-2.0)));
        assert!(report.mentions("(1 × 4) - (2 × 3)"));
    }

    #[test]
    fn test_sarrus_three_by_three() {
        let a = matrix(&[&[1.0, 0.0, 2.0], &[-1.0, 5.0, 0.0], &[0.0, 3.0, 1.0]]);
        let report = test_stepwise().run("determinant_sarrus", &[a]).unwrap();
        let det = report.value().and_then(Value::as_number).unwrap();
        assert!((det - -1.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiply() {
        let a = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = matrix(&[&[5.0, 6.0], &[7.0, 8.0]]);
        let report = test_stepwise().run("multiply", &[a, b]).unwrap();
        assert_eq!(report.value(), Some(&matrix(&[&[19.0, 22.0], &[43.0, 50.0]])));
    }

    #[test]
    fn test_singular_inverse_is_a_failed_report() {
        let report = test_stepwise().run("inverse", &[matrix(&[&[1.0, 0.0], &[0.0, 0.0]])]).unwrap();
        assert!(report.value().is_none());
        assert!(matches!(report.failure(), Some(Failure::Singular(_))));
        assert!(!report.steps.is_empty());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["result"].is_null());
    }

    #[test]
    fn test_cramer_from_json() {
        let report = test_stepwise()
            .run_json(&json!({ "operation": "cramer", "a": [[2, 1], [1, 3]], "b": [5, 10] }))
            .unwrap();
        let x = report.value().and_then(Value::as_vector).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-9);
        assert!((x[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_vector_scenarios() {
        let sw = test_stepwise();
        let report = sw.run("magnitude", &[Value::Vector(vec![3.0, 4.0])]).unwrap();
        assert_eq!(report.value(), Some(&Value::Number(5.0)));

        let report = sw.run("vector_angle", &[Value::Vector(vec![1.0, 1.0])]).unwrap();
        let deg = report.value().and_then(Value::as_number).unwrap();
        assert!((deg - 45.0).abs() < 1e-12);

        let report = sw
            .run("cross_product", &[Value::Vector(vec![1.0, 0.0, 0.0]), Value::Vector(vec![0.0, 1.0, 0.0])])
            .unwrap();
        assert_eq!(report.value(), Some(&Value::Vector(vec![0.0, 0.0, 1.0])));
    }

    #[test]
    fn test_request_decimals_reach_the_steps() {
        let sw = test_stepwise();
        let req = Request::new("magnitude").with_a(json!([1, 1])).with_decimals(4);
        let report = sw.run_request(&req).unwrap();
        assert_eq!(report.last_step(), Some("|v| = 1.4142"));

        let report = sw.with_precision(0).run_request(&Request::new("magnitude").with_a(json!([1, 1]))).unwrap();
        assert_eq!(report.last_step(), Some("|v| = 1"));
    }

    #[test]
    fn test_argument_errors() {
        let sw = test_stepwise();
        let err = sw.run("determinant", &[]).unwrap_err();
        assert_eq!(err.code, codes::ARG_COUNT);

        let err = sw.run("determinant", &[Value::Number(3.0)]).unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);

        let err = sw.run("determinnt", &[]).unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_OPERATION);
        assert!(err.suggestion.unwrap().contains("determinant"));

        let err = sw.run_json(&json!({ "a": [1, 2] })).unwrap_err();
        assert_eq!(err.code, codes::PARSE_ERROR);
    }

    #[test]
    fn test_help_and_listing() {
        let sw = test_stepwise();
        let help = sw.help(Some("projection")).unwrap();
        assert_eq!(help["name"], "projection");
        assert_eq!(help["category"], "vector");

        let general = sw.help(None).unwrap();
        assert!(general["operations"]["matrix"].as_array().unwrap().len() == 10);

        let vectors = sw.list_operations(Some("vector"));
        assert_eq!(vectors.as_array().unwrap().len(), 10);
        assert_eq!(sw.list_operations(None).as_array().unwrap().len(), 20);

        assert_eq!(sw.help(Some("nope")).unwrap_err().code, codes::NOT_FOUND);
    }
}
