//! Number rendering for step narration
//!
//! Everything here affects text only. Returned values always keep full
//! double precision.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Values above this magnitude are narrated in exponential notation
pub const EXPONENTIAL_ABOVE: f64 = 1e7;

/// Number of decimals used when rendering numbers inside steps (0–10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct DecimalPlaces(u8);

impl DecimalPlaces {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;

    /// Clamp into 0..=10
    pub fn new(places: i64) -> Self {
        DecimalPlaces(places.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Same setting with extra digits, still clamped
    pub fn plus(self, extra: u8) -> Self {
        Self::new(self.0 as i64 + extra as i64)
    }

    /// Smallest magnitude shown in fixed notation
    fn lower_threshold(self) -> f64 {
        10f64.powi(-(self.0 as i32))
    }
}

impl Default for DecimalPlaces {
    fn default() -> Self {
        DecimalPlaces(2)
    }
}

impl From<i64> for DecimalPlaces {
    fn from(places: i64) -> Self {
        DecimalPlaces::new(places)
    }
}

impl From<i32> for DecimalPlaces {
    fn from(places: i32) -> Self {
        DecimalPlaces::new(places as i64)
    }
}

impl From<DecimalPlaces> for u8 {
    fn from(dp: DecimalPlaces) -> u8 {
        dp.0
    }
}

impl fmt::Display for DecimalPlaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render a computed number for a trace line.
///
/// Magnitudes outside `[10^-dp, 1e7]` (zero excepted) use exponential
/// notation with an explicit exponent sign, e.g. `1.50e+8`, `2.00e-4`.
pub fn format_number(x: f64, dp: DecimalPlaces) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    let x = if x == 0.0 { 0.0 } else { x };
    let abs = x.abs();
    if abs > EXPONENTIAL_ABOVE || (abs != 0.0 && abs < dp.lower_threshold()) {
        exponential(x, dp.get())
    } else {
        format!("{:.*}", dp.get(), x)
    }
}

fn exponential(x: f64, digits: usize) -> String {
    let raw = format!("{:.*e}", digits, x);
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => raw,
    }
}

/// Render an input value the way a user typed it (`1`, `0.5`, `-3`)
pub fn format_plain(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{}", x)
}

/// `[a, b, c]` with every component through [`format_number`]
pub fn format_list(values: &[f64], dp: DecimalPlaces) -> String {
    let parts: Vec<String> = values.iter().map(|&v| format_number(v, dp)).collect();
    format!("[{}]", parts.join(", "))
}

/// `[a, b, c]` with every component through [`format_plain`]
pub fn format_plain_list(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|&v| format_plain(v)).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dp(n: i64) -> DecimalPlaces {
        DecimalPlaces::new(n)
    }

    #[test]
    fn test_fixed_notation() {
        assert_eq!(format_number(3.14159, dp(2)), "3.14");
        assert_eq!(format_number(-2.0, dp(0)), "-2");
        assert_eq!(format_number(11.0, dp(3)), "11.000");
    }

    #[test]
    fn test_negative_zero_prints_as_zero() {
        assert_eq!(format_number(-0.0, dp(2)), "0.00");
        assert_eq!(format_plain(-0.0), "0");
    }

    #[test]
    fn test_exponential_for_large_and_tiny() {
        assert_eq!(format_number(1.5e8, dp(2)), "1.50e+8");
        assert_eq!(format_number(0.0002, dp(2)), "2.00e-4");
        // 10^-dp itself stays fixed
        assert_eq!(format_number(0.01, dp(2)), "0.01");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN, dp(2)), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY, dp(2)), "-inf");
    }

    #[test]
    fn test_decimal_places_clamped() {
        assert_eq!(dp(-3).get(), 0);
        assert_eq!(dp(42).get(), 10);
        assert_eq!(dp(9).plus(2).get(), 10);
        assert_eq!(DecimalPlaces::default().get(), 2);
    }

    #[test]
    fn test_plain() {
        assert_eq!(format_plain(4.0), "4");
        assert_eq!(format_plain(0.5), "0.5");
        assert_eq!(format_plain_list(&[1.0, -2.5]), "[1, -2.5]");
    }
}
