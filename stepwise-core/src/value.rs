//! Operand and result values
//!
//! A `Value` is what callers hand to the operation registry and what comes
//! back inside an [`Outcome`](crate::Outcome): a scalar, a flat vector, or a
//! row-major grid.

use crate::StepwiseError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Number(f64),
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
    Text(String),
    Null,
}

impl Value {
    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&[Vec<f64>]> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Vector(_) => "Vector",
            Value::Matrix(_) => "Matrix",
            Value::Text(_) => "Text",
            Value::Null => "Null",
        }
    }

    // ========== JSON bridge ==========

    /// Interpret plain JSON: a number, an array of numbers, or an array of
    /// arrays of numbers. `[]` is an empty vector.
    pub fn from_json(json: &JsonValue) -> Result<Value, StepwiseError> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| StepwiseError::parse_error(format!("{} is not a finite number", n))),
            JsonValue::String(s) => Ok(Value::Text(s.clone())),
            JsonValue::Array(items) if items.iter().any(JsonValue::is_array) => {
                let mut rows = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item {
                        JsonValue::Array(cells) => rows.push(numbers(cells, &format!("row {}", i + 1))?),
                        other => {
                            return Err(StepwiseError::parse_error(format!(
                                "row {} must be an array, got {}",
                                i + 1,
                                other
                            )))
                        }
                    }
                }
                Ok(Value::Matrix(rows))
            }
            JsonValue::Array(items) => Ok(Value::Vector(numbers(items, "vector")?)),
            other => Err(StepwiseError::parse_error(format!("unsupported operand {}", other))),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Number(n) => json!(n),
            Value::Vector(v) => json!(v),
            Value::Matrix(m) => json!(m),
            Value::Text(s) => json!(s),
            Value::Null => JsonValue::Null,
        }
    }
}

fn numbers(items: &[JsonValue], what: &str) -> Result<Vec<f64>, StepwiseError> {
    items
        .iter()
        .enumerate()
        .map(|(j, item)| {
            item.as_f64().ok_or_else(|| {
                StepwiseError::parse_error(format!("{} element {} must be a number, got {}", what, j + 1, item))
            })
        })
        .collect()
}

// ========== Conversions ==========

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}

impl From<Vec<Vec<f64>>> for Value {
    fn from(m: Vec<Vec<f64>>) -> Self {
        Value::Matrix(m)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}
