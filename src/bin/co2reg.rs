//! co2reg CLI
//!
//! Fit, apply and inspect CO2 regression models over numeric CSV files.
//!
//! Examples:
//! - `co2reg fit --data fuel.csv --target CO2EMISSIONS --output model.co2r`
//! - `co2reg predict --model model.co2r --data new_cars.csv --output predictions.csv`
//! - `co2reg inspect --model model.co2r`
//!
//! Logs go to stderr (`RUST_LOG` controls the level); stdout carries only
//! predictions and inspection output.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use co2_regression::io::native::MAGIC;
use co2_regression::io::{inspect, FormatFlags};
use co2_regression::training::{DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use co2_regression::vehicle::{self, FuelType};
use co2_regression::{FeatureMatrix, RegressionConfig, RegressionModel, Solver, TargetVector};

#[derive(Parser)]
#[command(name = "co2reg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Least-squares regression of vehicle CO2 emissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverKind {
    /// Closed-form SVD least squares
    Svd,
    /// Full-batch gradient descent
    Gd,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a model on a CSV table
    Fit {
        /// Training data (CSV with a header row)
        #[arg(short, long)]
        data: PathBuf,

        /// Target column name
        #[arg(short, long, default_value = vehicle::TARGET)]
        target: String,

        /// Output model file
        #[arg(short, long)]
        output: PathBuf,

        /// Solver
        #[arg(long, value_enum, default_value = "svd")]
        solver: SolverKind,

        /// Gradient descent step size
        #[arg(long)]
        learning_rate: Option<f64>,

        /// Gradient descent iteration bound
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Gradient descent convergence threshold on the gradient norm
        #[arg(long)]
        tolerance: Option<f64>,

        /// Write the JSON artifact instead of the binary one
        #[arg(long)]
        json: bool,
    },

    /// Predict with a saved model
    Predict {
        /// Model file (binary or JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Feature data (CSV with a header row)
        #[arg(short, long)]
        data: PathBuf,

        /// Output predictions file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a saved model's header and parameters
    Inspect {
        /// Model file (binary or JSON)
        #[arg(short, long)]
        model: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "co2_regression=info,co2reg=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fit {
            data,
            target,
            output,
            solver,
            learning_rate,
            max_iterations,
            tolerance,
            json,
        } => {
            let solver = build_solver(solver, learning_rate, max_iterations, tolerance)?;
            cmd_fit(&data, &target, &output, solver, json)
        }
        Commands::Predict { model, data, output } => cmd_predict(&model, &data, output.as_deref()),
        Commands::Inspect { model } => cmd_inspect(&model),
    }
}

fn build_solver(
    kind: SolverKind,
    learning_rate: Option<f64>,
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
) -> anyhow::Result<Solver> {
    match kind {
        SolverKind::Svd => {
            if learning_rate.is_some() || max_iterations.is_some() || tolerance.is_some() {
                bail!("--learning-rate, --max-iterations and --tolerance require --solver gd");
            }
            Ok(Solver::Svd)
        }
        SolverKind::Gd => Ok(Solver::GradientDescent {
            learning_rate: learning_rate.unwrap_or(DEFAULT_LEARNING_RATE),
            max_iterations: max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
            tolerance: tolerance.unwrap_or(DEFAULT_TOLERANCE),
        }),
    }
}

// =============================================================================
// Commands
// =============================================================================

fn cmd_fit(data: &Path, target: &str, output: &Path, solver: Solver, json: bool) -> anyhow::Result<()> {
    let table = read_table(data)?;
    let target_idx = table
        .columns
        .iter()
        .position(|c| c == target)
        .with_context(|| format!("target column {target:?} not found in {}", data.display()))?;

    let feature_names: Vec<String> = table
        .columns
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != target_idx)
        .map(|(_, c)| c.clone())
        .collect();
    if feature_names.is_empty() {
        bail!("{} has no feature columns besides {target:?}", data.display());
    }

    let n_features = feature_names.len();
    let mut flat = Vec::with_capacity(table.rows.len() * n_features);
    let mut targets = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        for (i, &value) in row.iter().enumerate() {
            if i == target_idx {
                targets.push(value);
            } else {
                flat.push(value);
            }
        }
    }

    let features = FeatureMatrix::from_flat(flat, table.rows.len(), n_features)?;
    let targets = TargetVector::from(targets);

    tracing::info!(
        path = %data.display(),
        n_samples = features.n_samples(),
        n_features,
        "loaded training data"
    );

    let config = RegressionConfig::builder().solver(solver).build();
    let model = RegressionModel::train(&features, &targets, config)
        .context("fitting failed")?
        .with_feature_names(feature_names)?;

    if json {
        std::fs::write(output, model.to_json()?)
            .with_context(|| format!("failed to write {}", output.display()))?;
    } else {
        model
            .save(output)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }

    if let Some(summary) = model.summary() {
        tracing::info!(
            path = %output.display(),
            rmse = summary.rmse,
            r_squared = summary.r_squared,
            "saved model"
        );
    }
    Ok(())
}

fn cmd_predict(model_path: &Path, data: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let model = load_model(model_path)?;
    let table = read_table(data)?;

    let predictions = predict_table(&model, &table)
        .with_context(|| format!("cannot apply {} to {}", model_path.display(), data.display()))?;

    tracing::info!(n_rows = predictions.len(), "predicted");

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record([vehicle::TARGET])?;
    for value in predictions.view() {
        writer.write_record([value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn cmd_inspect(model_path: &Path) -> anyhow::Result<()> {
    let bytes = read_file(model_path)?;
    let mut out = std::io::stdout().lock();

    if bytes.starts_with(MAGIC) {
        let header = inspect(&bytes)?;
        writeln!(out, "format:        native v{}.{}", header.version_major, header.version_minor)?;
        writeln!(out, "payload bytes: {}", header.payload_size)?;
        writeln!(out, "checksum:      {:#010x}", header.checksum)?;
        writeln!(out, "features:      {}", header.num_features)?;
        writeln!(
            out,
            "has names:     {}",
            header.flags.contains(FormatFlags::HAS_FEATURE_NAMES)
        )?;
    } else {
        writeln!(out, "format:        json")?;
    }

    let model = decode_model(model_path, &bytes)?;
    let params = model.params();
    writeln!(out, "intercept:     {}", params.intercept())?;
    for (i, coef) in params.coefficients().iter().enumerate() {
        let name = model
            .feature_names()
            .map(|names| names[i].clone())
            .unwrap_or_else(|| format!("x{i}"));
        writeln!(out, "  {name:<24} {coef}")?;
    }
    if let Some(summary) = model.summary() {
        writeln!(out, "solver:        {}", summary.solver.name())?;
        writeln!(out, "n_samples:     {}", summary.n_samples)?;
        writeln!(out, "train rmse:    {}", summary.rmse)?;
        writeln!(out, "train r2:      {}", summary.r_squared)?;
    }
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

#[derive(Debug)]
struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

/// Read a CSV with a header row into numbers.
///
/// A `FUELTYPE` column may hold the dataset letter instead of its code.
fn read_table(path: &Path) -> anyhow::Result<Table> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("{}: malformed record {}", path.display(), line + 1))?;
        let row = record
            .iter()
            .zip(&columns)
            .map(|(field, column)| parse_cell(field, column))
            .collect::<Option<Vec<f64>>>()
            .with_context(|| {
                format!("{}: record {} has a non-numeric value", path.display(), line + 1)
            })?;
        if row.len() != columns.len() {
            bail!(
                "{}: record {} has {} fields, header has {}",
                path.display(),
                line + 1,
                row.len(),
                columns.len()
            );
        }
        rows.push(row);
    }

    if rows.is_empty() {
        bail!("{} has no data rows", path.display());
    }
    Ok(Table { columns, rows })
}

/// Predict every row, checking the header against the model's feature names.
fn predict_table(model: &RegressionModel, table: &Table) -> anyhow::Result<TargetVector> {
    let features = FeatureMatrix::from_flat(
        table.rows.iter().flatten().copied().collect(),
        table.rows.len(),
        table.columns.len(),
    )?;
    Ok(model.predict_named(&table.columns, &features)?)
}

fn parse_cell(field: &str, column: &str) -> Option<f64> {
    let field = field.trim();
    match field.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) if column == vehicle::FUELTYPE => FuelType::parse(field).map(FuelType::code),
        Err(_) => None,
    }
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_model(path: &Path) -> anyhow::Result<RegressionModel> {
    let bytes = read_file(path)?;
    decode_model(path, &bytes)
}

fn decode_model(path: &Path, bytes: &[u8]) -> anyhow::Result<RegressionModel> {
    let model = if bytes.starts_with(MAGIC) {
        RegressionModel::from_bytes(bytes)
    } else {
        let text = std::str::from_utf8(bytes)
            .with_context(|| format!("{} is neither a binary nor a JSON model", path.display()))?;
        RegressionModel::from_json(text)
    };
    model.with_context(|| format!("failed to load model {}", path.display()))
}
