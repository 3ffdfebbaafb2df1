//! Stepwise Matrix - narrated matrix algebra
//!
//! Every operation returns an [`Outcome`](stepwise_core::Outcome) holding the
//! result (or the reason there is none) and the steps that explain it:
//! - Determinants (cofactor expansion, Sarrus' rule)
//! - Cofactors and the adjoint matrix
//! - Inverse via the adjoint
//! - Transpose, sum, difference, product
//! - Linear systems (Cramer's rule, inverse method)
//!
//! Arithmetic is plain `f64`. Decimal places only affect the narration.

mod types;
mod helpers;
mod determinant;
mod cofactor;
mod ops;
mod solve;

pub use types::Matrix;
pub use helpers::{extract_matrix, matrix_block};
pub use determinant::{determinant, determinant_by_sarrus, traced_determinant};
pub use cofactor::{adjoint, cofactor, cofactor_matrix};
pub use ops::{add, inverse, multiply, subtract, transpose};
pub use solve::{solve_by_cramer, solve_by_inverse};

use stepwise_plugin::OperationRegistry;

/// Determinants with smaller magnitude are treated as zero
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// Load matrix operations into registry
pub fn load_matrix_library(registry: OperationRegistry) -> OperationRegistry {
    registry
        // Elementwise and products
        .with_operation(ops::SumFn)
        .with_operation(ops::SubtractFn)
        .with_operation(ops::MultiplyFn)
        .with_operation(ops::TransposeFn)

        // Determinants
        .with_operation(determinant::DeterminantFn)
        .with_operation(determinant::SarrusFn)

        // Adjoint and inverse
        .with_operation(cofactor::AdjointFn)
        .with_operation(ops::InverseFn)

        // Linear systems
        .with_operation(solve::CramerFn)
        .with_operation(solve::SolveInverseFn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::DecimalPlaces;

    #[test]
    fn test_load_matrix_library() {
        let registry = load_matrix_library(OperationRegistry::new());

        assert_eq!(registry.len(), 10);
        for name in [
            "sum", "subtract", "multiply", "determinant", "determinant_sarrus",
            "transpose", "adjoint", "inverse", "cramer", "solve_inverse",
        ] {
            assert!(registry.get(name).is_some(), "missing {}", name);
            assert_eq!(registry.get(name).map(|op| op.meta().category), Some("matrix"));
        }
    }

    mod properties {
        use super::*;
        use nalgebra::DMatrix;
        use proptest::prelude::*;

        fn square(max: usize) -> impl Strategy<Value = Matrix> {
            (1..=max).prop_flat_map(|n| {
                prop::collection::vec(prop::collection::vec(-9i32..=9, n), n).prop_map(|rows| {
                    let rows = rows.into_iter()
                        .map(|r| r.into_iter().map(f64::from).collect())
                        .collect();
                    Matrix::from_rows(rows).unwrap()
                })
            })
        }

        fn rect() -> impl Strategy<Value = Matrix> {
            (1usize..=4, 1usize..=4).prop_flat_map(|(r, c)| {
                prop::collection::vec(prop::collection::vec(-50.0f64..50.0, c), r)
                    .prop_map(|rows| Matrix::from_rows(rows).unwrap())
            })
        }

        fn oracle(m: &Matrix) -> DMatrix<f64> {
            DMatrix::from_fn(m.rows(), m.cols(), |i, j| m[(i, j)])
        }

        fn dp() -> DecimalPlaces {
            DecimalPlaces::default()
        }

        proptest! {
            #[test]
            fn cofactor_determinant_matches_reference(a in square(5)) {
                let expected = oracle(&a).determinant();
                let got = determinant(&a);
                prop_assert!((got - expected).abs() <= 1e-6 * expected.abs().max(1.0));
            }

            #[test]
            fn traced_and_silent_determinants_agree(a in square(5)) {
                prop_assert_eq!(traced_determinant(&a, dp()).scalar_or_nan(), determinant(&a));
            }

            #[test]
            fn sarrus_matches_cofactor_on_3x3(rows in prop::collection::vec(prop::collection::vec(-20.0f64..20.0, 3), 3)) {
                let a = Matrix::from_rows(rows).unwrap();
                let sarrus = determinant_by_sarrus(&a, dp()).scalar_or_nan();
                prop_assert!((sarrus - determinant(&a)).abs() < 1e-9);
            }

            #[test]
            fn transpose_keeps_determinant(a in square(4)) {
                let t = transpose(&a, dp()).into_value().unwrap();
                prop_assert!((determinant(&t) - determinant(&a)).abs() < 1e-9);
            }

            #[test]
            fn transpose_round_trips(a in rect()) {
                let once = transpose(&a, dp()).into_value().unwrap();
                prop_assert_eq!(transpose(&once, dp()).into_value().unwrap(), a);
            }

            #[test]
            fn identity_is_neutral(a in rect()) {
                let product = multiply(&a, &Matrix::identity(a.cols()), dp()).into_value().unwrap();
                prop_assert_eq!(product, a);
            }

            #[test]
            fn inverse_matches_reference(a in square(4)) {
                let det = determinant(&a);
                prop_assume!(det.abs() > 1e-3);

                let inv = inverse(&a, dp()).into_value().unwrap();
                let product = multiply(&a, &inv, dp()).into_value().unwrap();
                prop_assert!(product.max_abs_diff(&Matrix::identity(a.rows())) < 1e-9);

                let reference = oracle(&a).try_inverse().unwrap();
                let tolerance = 1e-6 * reference.amax().max(1.0);
                for i in 0..a.rows() {
                    for j in 0..a.cols() {
                        prop_assert!((inv[(i, j)] - reference[(i, j)]).abs() < tolerance);
                    }
                }
            }
        }

        #[test]
        fn inverse_of_zero_row_matrix_is_singular() {
            let a = Matrix::from_rows(vec![
                vec![1.0, 2.0, 3.0],
                vec![0.0, 0.0, 0.0],
                vec![4.0, 5.0, 6.0],
            ])
            .unwrap();
            assert!(inverse(&a, dp()).value().is_none());
        }
    }
}
