//! Plain-text renderer
//!
//! Turns a report into the text a reader sees: the steps in order, then one
//! line with the result or the reason there is none.

use stepwise_core::{format_list, format_number, DecimalPlaces, Value};
use stepwise_plugin::Report;

/// Report renderer
pub struct Renderer {
    precision: DecimalPlaces,
}

impl Renderer {
    pub fn new(precision: DecimalPlaces) -> Self {
        Self { precision }
    }

    pub fn render(&self, report: &Report) -> String {
        let mut output = report.steps.join("\n");
        if !output.is_empty() {
            output.push_str("\n\n");
        }
        match &report.result {
            Ok(value) => output.push_str(&format!("Result: {}", self.render_value(value))),
            Err(failure) => output.push_str(&format!("No result ({}): {}", failure.code(), failure)),
        }
        output
    }

    pub fn render_value(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => format_number(*n, self.precision),
            Value::Vector(v) => format_list(v, self.precision),
            Value::Matrix(rows) => {
                let rows: Vec<String> = rows.iter().map(|r| format_list(r, self.precision)).collect();
                format!("[{}]", rows.join(", "))
            }
            Value::Text(s) => s.clone(),
            Value::Null => "null".to_string(),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DecimalPlaces::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::{Failure, Trace};

    #[test]
    fn test_render_success() {
        let mut trace = Trace::new();
        trace.line("det = (1 × 4) - (2 × 3) = -2");
        let report = trace.ok(Value::Number(-2.0));

        let text = Renderer::default().render(&report);
        assert_eq!(text, "det = (1 × 4) - (2 × 3) = -2\n\nResult: -2.00");
    }

    #[test]
    fn test_render_failure() {
        let mut trace = Trace::new();
        trace.line("The matrix is singular, so it has no inverse.");
        let report: Report = trace.fail(Failure::singular("det(A) = 0"));

        let text = Renderer::new(DecimalPlaces::new(0)).render(&report);
        assert!(text.ends_with("No result (SINGULAR): Singular matrix: det(A) = 0"));
    }

    #[test]
    fn test_render_matrix() {
        let renderer = Renderer::new(DecimalPlaces::new(1));
        let m = Value::Matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(renderer.render_value(&m), "[[1.0, 2.0], [3.0, 4.0]]");
    }
}
