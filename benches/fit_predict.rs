//! Fitting and prediction benchmarks.
//!
//! ```bash
//! cargo bench --bench fit_predict
//! ```

mod common;

use common::{default_criterion, regression_data, shape_id, SHAPES};

use co2_regression::{LinearTrainer, RegressionConfig, Solver};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_fit_svd(c: &mut Criterion) {
	let mut group = c.benchmark_group("fit/svd");
	let trainer = LinearTrainer::default();

	for &(rows, cols) in SHAPES {
		let (x, y) = regression_data(rows, cols, 42);
		group.throughput(Throughput::Elements(rows as u64));
		group.bench_with_input(BenchmarkId::from_parameter(shape_id(rows, cols)), &(x, y), |b, (x, y)| {
			b.iter(|| black_box(trainer.fit(black_box(x), black_box(y)).unwrap()))
		});
	}

	group.finish();
}

fn bench_fit_gradient_descent(c: &mut Criterion) {
	let mut group = c.benchmark_group("fit/gradient_descent");
	let trainer = LinearTrainer::new(
		RegressionConfig::builder()
			.solver(Solver::gradient_descent())
			.build(),
	);

	// Descent is far slower per fit; keep to the vehicle-sized shapes.
	for &(rows, cols) in SHAPES.iter().filter(|(_, cols)| *cols == 6).take(2) {
		let (x, y) = regression_data(rows, cols, 42);
		group.throughput(Throughput::Elements(rows as u64));
		group.bench_with_input(BenchmarkId::from_parameter(shape_id(rows, cols)), &(x, y), |b, (x, y)| {
			b.iter(|| black_box(trainer.fit(black_box(x), black_box(y)).unwrap()))
		});
	}

	group.finish();
}

fn bench_predict(c: &mut Criterion) {
	let mut group = c.benchmark_group("predict");

	for &(rows, cols) in SHAPES {
		let (x, y) = regression_data(rows, cols, 7);
		let params = LinearTrainer::default().fit(&x, &y).unwrap();
		group.throughput(Throughput::Elements(rows as u64));

		group.bench_with_input(BenchmarkId::new("sequential", shape_id(rows, cols)), &x, |b, x| {
			b.iter(|| black_box(params.predict(black_box(x)).unwrap()))
		});
		group.bench_with_input(BenchmarkId::new("parallel", shape_id(rows, cols)), &x, |b, x| {
			b.iter(|| black_box(params.par_predict(black_box(x)).unwrap()))
		});
	}

	group.finish();
}

criterion_group! {
	name = benches;
	config = default_criterion();
	targets = bench_fit_svd, bench_fit_gradient_descent, bench_predict
}
criterion_main!(benches);
