//! Plugin traits

use crate::EvalContext;
use serde::Serialize;
use stepwise_core::{Outcome, StepwiseError, Value};

/// What every operation hands back: a value or a failure, with its steps
pub type Report = Outcome<Value>;

/// Metadata about an operation argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    pub typ: &'static str,
    pub description: &'static str,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl ArgMeta {
    pub const fn required(name: &'static str, typ: &'static str, description: &'static str) -> Self {
        Self { name, typ, description, optional: false, default: None }
    }

    pub const fn optional(name: &'static str, typ: &'static str, description: &'static str, default: &'static str) -> Self {
        Self { name, typ, description, optional: true, default: Some(default) }
    }
}

/// Catalog entry for an operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationMeta {
    /// Menu identifier, e.g. `determinant_sarrus`
    pub name: &'static str,
    /// Short human label, e.g. `Determinant (Sarrus)`
    pub label: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub args: &'static [ArgMeta],
    pub returns: &'static str,
    pub examples: &'static [&'static str],
    /// `matrix` or `vector`
    pub category: &'static str,
    pub related: &'static [&'static str],
    pub requires_two_operands: bool,
    pub requires_scalar: bool,
}

impl OperationMeta {
    /// Number of arguments that must be present
    pub fn required_args(&self) -> usize {
        self.args.iter().filter(|a| !a.optional).count()
    }
}

/// Pure operation plugin.
///
/// `Err` means the request itself was malformed (wrong count or type of
/// arguments). A well-formed request whose mathematics fails still returns
/// `Ok` with a failed [`Report`].
pub trait OperationPlugin: Send + Sync {
    fn meta(&self) -> OperationMeta;
    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError>;
}
