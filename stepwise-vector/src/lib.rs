//! Stepwise Vector - narrated vector geometry
//!
//! Operations work on `&[f64]` of any dimension and, besides the steps,
//! return [`VisualVector`](stepwise_core::VisualVector) arrows for a 2D plane:
//! - Magnitude, direction angle, normalization
//! - Sum, difference, scalar multiple (tip-to-tail pictures)
//! - Dot and cross products
//! - Angle between vectors, projection
//!
//! Two-operand operations use the shorter operand's dimension and say so
//! in the first two steps.

mod palette;
mod helpers;
mod measure;
mod combine;
mod products;
mod geometry;

pub use palette::{Palette, PALETTE};
pub use helpers::{dot, extract_scalar, extract_vector, norm, ZERO_EPSILON};
pub use measure::{angle, magnitude, normalize};
pub use combine::{add, scalar_multiply, subtract};
pub use products::{cross_product, dot_product};
pub use geometry::{angle_between, projection};

use stepwise_plugin::OperationRegistry;

/// Load vector operations into registry
pub fn load_vector_library(registry: OperationRegistry) -> OperationRegistry {
    registry
        // Single vector
        .with_operation(measure::MagnitudeFn)
        .with_operation(measure::NormalizeFn)
        .with_operation(measure::VectorAngleFn)

        // Products
        .with_operation(products::DotProductFn)
        .with_operation(products::CrossProductFn)

        // Geometry
        .with_operation(geometry::AngleBetweenFn)
        .with_operation(geometry::ProjectionFn)

        // Componentwise
        .with_operation(combine::ScalarMultiplyFn)
        .with_operation(combine::VectorAddFn)
        .with_operation(combine::VectorSubtractFn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::{DecimalPlaces, Value};
    use stepwise_plugin::EvalContext;

    #[test]
    fn test_load_vector_library() {
        let registry = load_vector_library(OperationRegistry::new());

        assert_eq!(registry.len(), 10);
        for name in [
            "magnitude", "normalize", "vector_angle", "dot_product", "cross_product",
            "angle_between", "projection", "scalar_multiply", "vector_add", "vector_subtract",
        ] {
            assert!(registry.get(name).is_some(), "missing {}", name);
            assert_eq!(registry.get(name).map(|op| op.meta().category), Some("vector"));
        }
    }

    #[test]
    fn test_outcome_serializes_vectors_in_camel_case() {
        let registry = load_vector_library(OperationRegistry::new());
        let args = [Value::Vector(vec![1.0, 2.0]), Value::Vector(vec![3.0, 4.0])];
        let report = registry.call("vector_add", &args, &EvalContext::new()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"]["type"], "Vector");
        assert_eq!(json["vectors"][2]["startX"], 1.0);
        assert_eq!(json["vectors"][2]["startY"], 2.0);
        assert_eq!(json["vectors"][3]["label"], "A + B");
    }

    #[test]
    fn test_reference_scenarios() {
        let dp = DecimalPlaces::default();
        assert_eq!(magnitude(&[3.0, 4.0], dp).value(), Some(&5.0));
        assert!((angle(&[1.0, 1.0], dp).scalar_or_nan() - 45.0).abs() < 1e-12);
        assert_eq!(
            cross_product(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], dp).value(),
            Some(&vec![0.0, 0.0, 1.0])
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn vector(dim: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<f64>> {
            dim.prop_flat_map(|n| prop::collection::vec(-100.0f64..100.0, n))
        }

        fn dp() -> DecimalPlaces {
            DecimalPlaces::default()
        }

        proptest! {
            #[test]
            fn normalized_vectors_have_unit_length(v in vector(1..=5)) {
                prop_assume!(norm(&v) > 1e-6);
                let unit = normalize(&v, dp()).into_value().unwrap();
                prop_assert!((norm(&unit) - 1.0).abs() < 1e-9);
            }

            #[test]
            fn zero_vectors_normalize_to_themselves(n in 1usize..=5) {
                let zero = vec![0.0; n];
                prop_assert_eq!(normalize(&zero, dp()).into_value(), Some(zero));
            }

            #[test]
            fn self_dot_is_squared_magnitude(v in vector(1..=5)) {
                let d = dot_product(&v, &v, dp()).scalar_or_nan();
                let m = magnitude(&v, dp()).scalar_or_nan();
                prop_assert!((d - m * m).abs() <= 1e-9 * d.max(1.0));
            }

            #[test]
            fn cross_product_is_orthogonal(a in vector(3..=3), b in vector(3..=3)) {
                let c = cross_product(&a, &b, dp()).into_value().unwrap();
                let scale = norm(&a) * norm(&b) * norm(&c);
                prop_assert!(dot(&c, &a).abs() <= 1e-9 * scale.max(1.0));
                prop_assert!(dot(&c, &b).abs() <= 1e-9 * scale.max(1.0));
            }

            #[test]
            fn add_then_subtract_restores(a in vector(2..=5), b in vector(2..=5)) {
                let n = a.len().min(b.len());
                let sum = add(&a, &b, dp()).into_value().unwrap();
                let back = subtract(&sum, &b, dp()).into_value().unwrap();
                for (x, y) in back.iter().zip(&a[..n]) {
                    prop_assert!((x - y).abs() < 1e-9);
                }
            }

            #[test]
            fn angle_between_stays_in_range(a in vector(2..=4), b in vector(2..=4)) {
                prop_assume!(norm(&a) > 1e-6 && norm(&b) > 1e-6);
                let theta = angle_between(&a, &b, dp()).scalar_or_nan();
                prop_assert!((0.0..=180.0).contains(&theta));
            }
        }
    }
}
