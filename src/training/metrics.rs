//! Regression metrics.
//!
//! Metrics for evaluating how well a fitted model reproduces a target vector.
//! All metrics take predictions and targets of equal length and return `0.0`
//! for empty input.

use ndarray::ArrayView1;

/// A scalar fit-quality metric.
pub trait Metric {
    /// Compute the metric.
    ///
    /// # Panics
    ///
    /// Panics if `predictions` and `targets` have different lengths.
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

fn sum_squared_error(predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
    assert_eq!(
        predictions.len(),
        targets.len(),
        "predictions and targets must have the same length"
    );
    predictions
        .iter()
        .zip(targets.iter())
        .map(|(&p, &t)| (p - t) * (p - t))
        .sum()
}

// =============================================================================
// RMSE (Root Mean Squared Error)
// =============================================================================

/// Root Mean Squared Error: sqrt(mean((pred - label)²))
///
/// Lower is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl Metric for Rmse {
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
        if targets.is_empty() {
            return 0.0;
        }
        (sum_squared_error(predictions, targets) / targets.len() as f64).sqrt()
    }

    fn name(&self) -> &'static str {
        "rmse"
    }
}

// =============================================================================
// MAE (Mean Absolute Error)
// =============================================================================

/// Mean Absolute Error: mean(|pred - label|)
///
/// Lower is better. More robust to outliers than RMSE.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mae;

impl Metric for Mae {
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "predictions and targets must have the same length"
        );
        if targets.is_empty() {
            return 0.0;
        }
        let sum: f64 = predictions
            .iter()
            .zip(targets.iter())
            .map(|(&p, &t)| (p - t).abs())
            .sum();
        sum / targets.len() as f64
    }

    fn name(&self) -> &'static str {
        "mae"
    }
}

// =============================================================================
// R² (coefficient of determination)
// =============================================================================

/// Coefficient of determination: 1 − SSE / SST.
///
/// Higher is better; 1 is a perfect fit. A constant target scores 1.0 when
/// predicted exactly and 0.0 otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RSquared;

impl Metric for RSquared {
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
        if targets.is_empty() {
            return 0.0;
        }
        let sse = sum_squared_error(predictions, targets);
        let mean = targets.sum() / targets.len() as f64;
        let sst: f64 = targets.iter().map(|&t| (t - mean) * (t - mean)).sum();

        if sst == 0.0 {
            return if sse == 0.0 { 1.0 } else { 0.0 };
        }
        1.0 - sse / sst
    }

    fn name(&self) -> &'static str {
        "r2"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn rmse_known_value() {
        let preds = array![1.0, 2.0, 3.0];
        let labels = array![1.0, 2.0, 5.0];
        // sqrt(4 / 3)
        assert_abs_diff_eq!(
            Rmse.compute(preds.view(), labels.view()),
            (4.0f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn mae_known_value() {
        let preds = array![1.0, 2.0, 3.0, 0.0];
        let labels = array![2.0, 2.0, 1.0, 0.0];
        assert_abs_diff_eq!(Mae.compute(preds.view(), labels.view()), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn r2_perfect_and_mean_predictor() {
        let labels = array![1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(RSquared.compute(labels.view(), labels.view()), 1.0);

        let mean_preds = array![2.5, 2.5, 2.5, 2.5];
        assert_abs_diff_eq!(RSquared.compute(mean_preds.view(), labels.view()), 0.0);
    }

    #[test]
    fn r2_constant_target() {
        let labels = array![3.0, 3.0];
        assert_eq!(RSquared.compute(array![3.0, 3.0].view(), labels.view()), 1.0);
        assert_eq!(RSquared.compute(array![3.0, 4.0].view(), labels.view()), 0.0);
    }

    #[test]
    fn empty_inputs() {
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(Rmse.compute(empty.view(), empty.view()), 0.0);
        assert_eq!(Mae.compute(empty.view(), empty.view()), 0.0);
        assert_eq!(RSquared.compute(empty.view(), empty.view()), 0.0);
    }

    #[test]
    fn metric_names() {
        assert_eq!(Rmse.name(), "rmse");
        assert_eq!(Mae.name(), "mae");
        assert_eq!(RSquared.name(), "r2");
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn length_mismatch_panics() {
        Rmse.compute(array![1.0].view(), array![1.0, 2.0].view());
    }
}
