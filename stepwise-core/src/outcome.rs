//! Narrated computation results

use crate::Failure;
use serde::{Deserialize, Serialize, Serializer};

/// An arrow for a 2D plane renderer. Purely advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualVector {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub start_x: f64,
    #[serde(default)]
    pub start_y: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl VisualVector {
    /// Arrow from the origin to `(x, y)`
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, start_x: 0.0, start_y: 0.0, color: None, label: None }
    }

    /// Builder: move the tail of the arrow
    pub fn starting_at(mut self, start_x: f64, start_y: f64) -> Self {
        self.start_x = start_x;
        self.start_y = start_y;
        self
    }

    pub fn colored(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Coordinates of the arrow head
    pub fn tip(&self) -> (f64, f64) {
        (self.start_x + self.x, self.start_y + self.y)
    }
}

/// Result of one engine call: a value or a failure, plus the steps that
/// explain either one.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub result: Result<T, Failure>,
    pub steps: Vec<String>,
    pub vectors: Vec<VisualVector>,
}

impl<T> Outcome<T> {
    pub fn ok(value: T, steps: Vec<String>) -> Self {
        Self { result: Ok(value), steps, vectors: Vec::new() }
    }

    pub fn failed(failure: Failure, steps: Vec<String>) -> Self {
        Self { result: Err(failure), steps, vectors: Vec::new() }
    }

    pub fn with_vectors(mut self, vectors: Vec<VisualVector>) -> Self {
        self.vectors = vectors;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn into_value(self) -> Option<T> {
        self.result.ok()
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.result.as_ref().err()
    }

    /// The line a caller shows as the headline explanation
    pub fn last_step(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome { result: self.result.map(f), steps: self.steps, vectors: self.vectors }
    }

    /// Does any step contain `needle`?
    pub fn mentions(&self, needle: &str) -> bool {
        self.steps.iter().any(|s| s.contains(needle))
    }
}

impl Outcome<f64> {
    /// The scalar, or NaN when the computation failed
    pub fn scalar_or_nan(&self) -> f64 {
        self.value().copied().unwrap_or(f64::NAN)
    }
}

#[derive(Serialize)]
struct WireOutcome<'a, T> {
    result: Option<&'a T>,
    steps: &'a [String],
    #[serde(skip_serializing_if = "no_vectors")]
    vectors: &'a [VisualVector],
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<&'a Failure>,
}

fn no_vectors(vectors: &&[VisualVector]) -> bool {
    vectors.is_empty()
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireOutcome {
            result: self.value(),
            steps: &self.steps,
            vectors: &self.vectors,
            failure: self.failure(),
        }
        .serialize(serializer)
    }
}

/// Ordered narration under construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    steps: Vec<String>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    /// Append the steps of a sub-computation, in order
    pub fn absorb(&mut self, steps: Vec<String>) {
        self.steps.extend(steps);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }

    pub fn ok<T>(self, value: T) -> Outcome<T> {
        Outcome::ok(value, self.steps)
    }

    pub fn fail<T>(self, failure: Failure) -> Outcome<T> {
        Outcome::failed(failure, self.steps)
    }
}
