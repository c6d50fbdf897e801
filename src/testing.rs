//! Testing utilities for co2-regression.
//!
//! Assertion helpers and seeded synthetic datasets shared by unit tests,
//! integration tests and benches.
//!
//! ```
//! use co2_regression::testing::{assert_slice_approx_eq, data::line_dataset};
//!
//! let (x, y) = line_dataset();
//! assert_eq!(x.n_samples(), 4);
//! assert_slice_approx_eq(&y.to_vec(), &[1.0, 3.0, 5.0, 7.0], 0.0, "targets");
//! ```

pub mod data;

use approx::AbsDiffEq;

use crate::data::TargetVector;
use crate::repr::ModelParameters;

// =============================================================================
// Constants
// =============================================================================

/// Tolerance for closed-form solves on well-conditioned data.
pub const EXACT_TOLERANCE: f64 = 1e-9;

/// Tolerance for iterative solves and noisy recovery.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two slices are approximately equal element-wise.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    let diff = diff_slices(actual, expected, tolerance);
    assert!(diff.is_empty(), "{context}: values differ (tolerance={tolerance:.0e})\n{diff}");
}

/// Git-style listing of the positions where two slices differ.
fn diff_slices(actual: &[f64], expected: &[f64], tolerance: f64) -> String {
    let mut result = String::new();
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        if !a.abs_diff_eq(e, tolerance) {
            let delta = a - e;
            result.push_str(&format!("[{i:3}] - {e:>14.8}  (expected)\n"));
            result.push_str(&format!("      + {a:>14.8}  (actual, Δ={delta:+.2e})\n"));
        }
    }
    result
}

// =============================================================================
// Model Assertions
// =============================================================================

/// Assert that fitted parameters match an expected intercept and coefficients.
///
/// # Panics
///
/// Panics if the feature count differs or any value differs by more than tolerance.
pub fn assert_params_approx_eq(
    actual: &ModelParameters,
    expected_coefficients: &[f64],
    expected_intercept: f64,
    tolerance: f64,
) {
    assert_slice_approx_eq(
        actual.coefficients(),
        expected_coefficients,
        tolerance,
        "coefficients",
    );
    let diff = (actual.intercept() - expected_intercept).abs();
    assert!(
        diff <= tolerance,
        "intercept: {} ≠ {expected_intercept} (diff={diff}, tolerance={tolerance})",
        actual.intercept()
    );
}

/// Assert that two prediction vectors are approximately equal.
pub fn assert_predictions_eq(actual: &TargetVector, expected: &TargetVector, tolerance: f64) {
    assert_slice_approx_eq(&actual.to_vec(), &expected.to_vec(), tolerance, "predictions");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_slices_pass() {
        assert_slice_approx_eq(&[1.0, 2.0], &[1.0, 2.0 + 1e-12], 1e-9, "ctx");
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn length_mismatch_panics() {
        assert_slice_approx_eq(&[1.0], &[1.0, 2.0], 1e-9, "ctx");
    }

    #[test]
    #[should_panic(expected = "values differ")]
    fn value_mismatch_panics() {
        assert_slice_approx_eq(&[1.0, 2.5], &[1.0, 2.0], 1e-9, "ctx");
    }

    #[test]
    fn diff_lists_only_differing_rows() {
        let diff = diff_slices(&[1.0, 2.0, 3.0], &[1.0, 2.5, 3.0], 1e-9);
        assert!(diff.contains("[  1]"));
        assert!(!diff.contains("[  0]"));
        assert!(!diff.contains("[  2]"));
    }

    #[test]
    fn params_assertion() {
        let params = ModelParameters::new(vec![2.0, -1.0], 0.5);
        assert_params_approx_eq(&params, &[2.0, -1.0], 0.5, EXACT_TOLERANCE);
    }
}
