use rand::prelude::*;

use crate::data::{FeatureMatrix, TargetVector};
use crate::vehicle::FuelType;

/// The four-point line `y = 2x + 1` at `x = 0, 1, 2, 3`.
pub fn line_dataset() -> (FeatureMatrix, TargetVector) {
	let x = FeatureMatrix::from_flat(vec![0.0, 1.0, 2.0, 3.0], 4, 1)
		.expect("4x1 shape matches 4 values");
	(x, TargetVector::from(vec![1.0, 3.0, 5.0, 7.0]))
}

/// Generate random dense features in row-major order.
///
/// Values are uniform in `[min, max]`.
pub fn random_dense(rows: usize, cols: usize, seed: u64, min: f64, max: f64) -> Vec<f64> {
	assert!(max >= min);
	let mut rng = StdRng::seed_from_u64(seed);
	let width = max - min;
	(0..rows * cols)
		.map(|_| min + rng.r#gen::<f64>() * width)
		.collect()
}

/// `y = 3·x1 − 2·x2 + 5 + noise` with features uniform in `[0, 10]`.
///
/// Noise is uniform in `[-noise_amplitude, noise_amplitude]`.
pub fn two_feature_dataset(rows: usize, seed: u64, noise_amplitude: f64) -> (FeatureMatrix, TargetVector) {
	let flat = random_dense(rows, 2, seed, 0.0, 10.0);
	let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));

	let targets: Vec<f64> = flat
		.chunks_exact(2)
		.map(|row| 3.0 * row[0] - 2.0 * row[1] + 5.0 + noise(&mut rng, noise_amplitude))
		.collect();

	let x = FeatureMatrix::from_flat(flat, rows, 2).expect("rows x 2 shape matches generated values");
	(x, TargetVector::from(targets))
}

/// Generate regression targets as a random linear model of features plus uniform noise.
///
/// Returns `(targets, weights, bias)`.
pub fn regression_targets_linear(
	features: &FeatureMatrix,
	seed: u64,
	noise_amplitude: f64,
) -> (TargetVector, Vec<f64>, f64) {
	let mut rng = StdRng::seed_from_u64(seed);

	let weights: Vec<f64> = (0..features.n_features())
		.map(|_| rng.r#gen::<f64>() * 2.0 - 1.0)
		.collect();
	let bias: f64 = rng.r#gen::<f64>() * 0.5 - 0.25;

	let targets: Vec<f64> = features
		.rows()
		.map(|row| {
			let dot: f64 = row.iter().zip(&weights).map(|(x, w)| x * w).sum();
			dot + bias + noise(&mut rng, noise_amplitude)
		})
		.collect();

	(TargetVector::from(targets), weights, bias)
}

/// Synthetic vehicle table in the six-column training order.
///
/// Emissions follow a fixed affine function of the columns plus uniform
/// noise, loosely in the range of the real fuel-consumption data.
pub fn vehicle_dataset(rows: usize, seed: u64, noise_amplitude: f64) -> (FeatureMatrix, TargetVector) {
	let mut rng = StdRng::seed_from_u64(seed);
	let mut flat = Vec::with_capacity(rows * 6);
	let mut targets = Vec::with_capacity(rows);

	for _ in 0..rows {
		let engine_size = 1.0 + rng.r#gen::<f64>() * 5.0;
		let cylinders = [4.0, 6.0, 8.0][rng.gen_range(0..3)];
		let fuel = FuelType::ALL[rng.gen_range(0..FuelType::ALL.len())].code();
		let city = 6.0 + rng.r#gen::<f64>() * 14.0;
		let hwy = 5.0 + rng.r#gen::<f64>() * 9.0;
		// Combined is not an exact blend of city and highway, so the columns stay independent.
		let comb = 0.55 * city + 0.45 * hwy + (rng.r#gen::<f64>() - 0.5);

		let co2 = 10.0 * engine_size + 3.0 * cylinders - 4.0 * fuel + 6.0 * city + 4.0 * hwy
			+ 9.0 * comb
			+ 20.0
			+ noise(&mut rng, noise_amplitude);

		flat.extend_from_slice(&[engine_size, cylinders, fuel, city, hwy, comb]);
		targets.push(co2);
	}

	let x = FeatureMatrix::from_flat(flat, rows, 6).expect("rows x 6 shape matches generated values");
	(x, TargetVector::from(targets))
}

fn noise(rng: &mut StdRng, amplitude: f64) -> f64 {
	if amplitude == 0.0 {
		0.0
	} else {
		(rng.r#gen::<f64>() * 2.0 - 1.0) * amplitude
	}
}
