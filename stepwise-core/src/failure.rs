//! Semantic failures of a computation
//!
//! A failure never aborts anything: it is carried inside an [`Outcome`]
//! together with the narration that explains it.
//!
//! [`Outcome`]: crate::Outcome

use crate::error::{codes, StepwiseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a computation produced no result
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Failure {
    /// Empty input, non-square where squareness is required, or operands of
    /// incompatible shapes
    #[error("Shape error: {0}")]
    Shape(String),

    /// Determinant within epsilon of zero where an inverse is needed
    #[error("Singular matrix: {0}")]
    Singular(String),

    /// Operation restricted to particular sizes (Sarrus, cross product, angle)
    #[error("Dimension restriction: {0}")]
    DimensionRestriction(String),

    /// Zero-magnitude operand where a direction is needed
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
}

impl Failure {
    pub fn shape(detail: impl Into<String>) -> Self {
        Failure::Shape(detail.into())
    }

    pub fn singular(detail: impl Into<String>) -> Self {
        Failure::Singular(detail.into())
    }

    pub fn dimension(detail: impl Into<String>) -> Self {
        Failure::DimensionRestriction(detail.into())
    }

    pub fn degenerate(detail: impl Into<String>) -> Self {
        Failure::DegenerateInput(detail.into())
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Failure::Shape(_) => codes::SHAPE_ERROR,
            Failure::Singular(_) => codes::SINGULAR,
            Failure::DimensionRestriction(_) => codes::DIMENSION_RESTRICTION,
            Failure::DegenerateInput(_) => codes::DEGENERATE_INPUT,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Failure::Shape(d)
            | Failure::Singular(d)
            | Failure::DimensionRestriction(d)
            | Failure::DegenerateInput(d) => d,
        }
    }
}

impl From<Failure> for StepwiseError {
    fn from(failure: Failure) -> Self {
        StepwiseError::new(failure.code(), failure.to_string())
    }
}
