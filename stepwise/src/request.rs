//! A calculation request as it arrives over JSON

use serde::Deserialize;
use serde_json::Value as JsonValue;
use stepwise_core::{StepwiseError, Value};

/// `{ "operation": "...", "a": ..., "b": ..., "scalar": ..., "decimals": ... }`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Request {
    pub operation: String,
    #[serde(default)]
    pub a: Option<JsonValue>,
    #[serde(default)]
    pub b: Option<JsonValue>,
    #[serde(default)]
    pub scalar: Option<JsonValue>,
    #[serde(default)]
    pub decimals: Option<i64>,
}

impl Request {
    pub fn new(operation: impl Into<String>) -> Self {
        Self { operation: operation.into(), ..Self::default() }
    }

    pub fn with_a(mut self, a: JsonValue) -> Self {
        self.a = Some(a);
        self
    }

    pub fn with_b(mut self, b: JsonValue) -> Self {
        self.b = Some(b);
        self
    }

    pub fn with_scalar(mut self, scalar: f64) -> Self {
        self.scalar = Some(JsonValue::from(scalar));
        self
    }

    pub fn with_decimals(mut self, decimals: i64) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Positional arguments in `a, b, scalar` order, skipping absent ones
    pub fn args(&self) -> Result<Vec<Value>, StepwiseError> {
        [&self.a, &self.b, &self.scalar]
            .into_iter()
            .flatten()
            .map(|json| Value::from_json(json).map_err(|e| e.in_operation(&self.operation)))
            .collect()
    }
}
