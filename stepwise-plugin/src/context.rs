//! Evaluation Context

use stepwise_core::DecimalPlaces;

/// Settings passed to every plugin call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalContext {
    /// Decimals used in step narration; never affects returned values
    pub precision: DecimalPlaces,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: impl Into<DecimalPlaces>) -> Self {
        self.precision = precision.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_is_clamped() {
        assert_eq!(EvalContext::new().precision.get(), 2);
        assert_eq!(EvalContext::new().with_precision(25).precision.get(), 10);
        assert_eq!(EvalContext::new().with_precision(-1).precision.get(), 0);
    }
}
