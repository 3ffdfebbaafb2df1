//! Operation Registry

use crate::{EvalContext, OperationMeta, OperationPlugin, Report};
use serde_json::{json, Value as JsonValue};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use stepwise_core::{StepwiseError, Value};
use tracing::{debug, warn};

/// Central operation registry
pub struct OperationRegistry {
    operations: HashMap<String, Arc<dyn OperationPlugin>>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self { operations: HashMap::new() }
    }

    pub fn with_operation<P: OperationPlugin + 'static>(mut self, op: P) -> Self {
        let name = op.meta().name.to_lowercase();
        self.operations.insert(name, Arc::new(op));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn OperationPlugin> {
        self.operations.get(&name.to_lowercase()).map(|op| op.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Sorted operation names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run an operation after checking how many arguments it was given
    pub fn call(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Result<Report, StepwiseError> {
        let op = match self.get(name) {
            Some(op) => op,
            None => {
                warn!(operation = name, "unknown operation requested");
                let similar = self.find_similar(name);
                let mut err = StepwiseError::unknown_operation(name);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use list_operations for the full list.",
                        suggestions.join(", ")
                    ));
                }
                return Err(err);
            }
        };

        let meta = op.meta();
        if args.len() < meta.required_args() || args.len() > meta.args.len() {
            let expected = if args.len() < meta.required_args() { meta.required_args() } else { meta.args.len() };
            return Err(StepwiseError::arg_count(meta.name, expected, args.len()));
        }

        debug!(operation = meta.name, args = args.len(), decimals = %ctx.precision, "calling operation");
        let report = op.call(args, ctx)?;
        if let Some(failure) = report.failure() {
            debug!(operation = meta.name, code = failure.code(), "operation failed");
        }
        Ok(report)
    }

    /// Operation names similar to the given name (for error suggestions)
    fn find_similar(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self.operations.keys()
            .filter_map(|op_name| {
                let score = Self::similarity_score(&name_lower, op_name);
                if score > 0 {
                    Some((op_name.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        // Highest score first, then alphabetical for stable output
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        // Shared characters
        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        score += query_chars.intersection(&candidate_chars).count() * 2;

        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }

    pub fn help(&self, name: Option<&str>) -> Result<JsonValue, StepwiseError> {
        match name {
            Some(n) => self.help_for(n),
            None => Ok(self.general_help()),
        }
    }

    fn help_for(&self, name: &str) -> Result<JsonValue, StepwiseError> {
        let op = self.get(name).ok_or_else(|| StepwiseError::not_found(name))?;
        Ok(meta_to_help(&op.meta()))
    }

    fn general_help(&self) -> JsonValue {
        let mut by_category: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
        for op in self.operations.values() {
            let meta = op.meta();
            by_category.entry(meta.category).or_default().push(meta.name);
        }
        for names in by_category.values_mut() {
            names.sort_unstable();
        }
        json!({
            "operations": by_category,
            "usage": "Call help('operation_name') for detailed help.",
        })
    }

    /// Catalog summary, optionally restricted to one category
    pub fn list(&self, category: Option<&str>) -> JsonValue {
        let mut metas: Vec<OperationMeta> = self.operations.values()
            .map(|op| op.meta())
            .filter(|meta| category.map_or(true, |c| meta.category.eq_ignore_ascii_case(c)))
            .collect();
        metas.sort_by_key(|meta| meta.name);

        JsonValue::Array(
            metas.iter()
                .map(|meta| json!({
                    "name": meta.name,
                    "label": meta.label,
                    "description": meta.description,
                    "usage": meta.usage,
                    "category": meta.category,
                    "requires_two_operands": meta.requires_two_operands,
                    "requires_scalar": meta.requires_scalar,
                }))
                .collect(),
        )
    }
}

fn meta_to_help(meta: &OperationMeta) -> JsonValue {
    let mut help = serde_json::to_value(meta).unwrap_or(JsonValue::Null);
    if let Some(obj) = help.as_object_mut() {
        obj.insert("type".to_string(), json!("operation"));
    }
    help
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
