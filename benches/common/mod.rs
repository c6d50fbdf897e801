//! Shared setup for co2-regression benchmarks.

#![allow(dead_code)]

use std::time::Duration;

use criterion::Criterion;

use co2_regression::testing::data::{random_dense, regression_targets_linear};
use co2_regression::{FeatureMatrix, TargetVector};

/// Dataset shapes, from the six-column vehicle table up to wide synthetic data.
pub const SHAPES: &[(usize, usize)] = &[(1_000, 6), (10_000, 6), (100_000, 6), (10_000, 50)];

/// Baseline Criterion configuration for all benchmarks.
pub fn default_criterion() -> Criterion {
	Criterion::default()
		// Allows `--bench` command-line overrides.
		.configure_from_args()
		.warm_up_time(Duration::from_secs(2))
		.measurement_time(Duration::from_secs(10))
		.sample_size(20)
}

/// Benchmark id for a dataset shape.
pub fn shape_id(rows: usize, cols: usize) -> String {
	format!("rows={rows} cols={cols}")
}

/// Random features in `[-5, 5]` with noisy linear targets.
pub fn regression_data(rows: usize, cols: usize, seed: u64) -> (FeatureMatrix, TargetVector) {
	let flat = random_dense(rows, cols, seed, -5.0, 5.0);
	let x = FeatureMatrix::from_flat(flat, rows, cols).expect("shape matches generated values");
	let (y, _, _) = regression_targets_linear(&x, seed.wrapping_add(1), 0.1);
	(x, y)
}
