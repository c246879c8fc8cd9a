//! Command-line parsing for the gradient-descent linear fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.
//!
//! Hyperparameter flags fall back to `LINREG_*` environment variables, which
//! may also be set from a `.env` file in the working directory.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "linreg", version, about = "Linear regression by gradient descent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a linear model to a CSV and print diagnostics, optionally exporting results.
    Fit(FitArgs),
    /// Apply an exported model to a CSV and report fitted values and cost.
    Predict(PredictArgs),
    /// Write a synthetic dataset of points close to a line.
    Generate(GenerateArgs),
    /// Fit the built-in metal densities example.
    Demo(DescentArgs),
}

/// Gradient descent hyperparameters.
#[derive(Debug, Parser, Clone)]
pub struct DescentArgs {
    /// Step size.
    #[arg(long, env = "LINREG_LAMBDA", default_value_t = 0.1)]
    pub lambda: f64,

    /// Maximum number of descent passes.
    #[arg(long, env = "LINREG_MAX_ITER", default_value_t = 10_000)]
    pub max_iter: usize,

    /// Stop once the change in cost is at or below this value.
    #[arg(long, env = "LINREG_THRESHOLD", default_value_t = 0.11)]
    pub threshold: f64,

    /// Reduce cost and gradient across threads (results may differ in the last bits).
    #[arg(long)]
    pub parallel: bool,
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV: header row of feature names plus an output column.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    #[command(flatten)]
    pub descent: DescentArgs,

    /// Print the (prev_error, error) pair of every pass.
    #[arg(long)]
    pub trace: bool,

    /// Fit on rows `i % STEP == 0` and report the cost on rows `i % STEP == 1`.
    #[arg(long, value_name = "STEP")]
    pub holdout: Option<usize>,

    /// Show the N rows with the largest absolute residual.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Export the fitted model to JSON.
    #[arg(long = "export-model", value_name = "JSON")]
    pub export_model: Option<PathBuf>,

    /// Export per-row fitted values and residuals to CSV.
    #[arg(long = "export-residuals", value_name = "CSV")]
    pub export_residuals: Option<PathBuf>,
}

/// Options for applying a saved model.
#[derive(Debug, Parser)]
pub struct PredictArgs {
    /// Model JSON produced by `linreg fit --export-model`.
    #[arg(long, value_name = "JSON")]
    pub model: PathBuf,

    /// CSV to evaluate, same layout as the training data.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Export per-row fitted values and residuals to CSV.
    #[arg(long = "export-residuals", value_name = "CSV")]
    pub export_residuals: Option<PathBuf>,
}

/// Options for synthetic data generation.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub size: usize,

    /// Seed for the noise added to x.
    #[arg(long, default_value_t = 123)]
    pub seed_x: u64,

    /// Seed for the noise added to y.
    #[arg(long, default_value_t = 321)]
    pub seed_y: u64,

    /// Noise half-width as a fraction of the number of points.
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,

    /// Slope of the underlying line.
    #[arg(long, default_value_t = 1.0)]
    pub slope: f64,

    /// Output CSV (stdout when omitted).
    #[arg(short, long, value_name = "CSV")]
    pub out: Option<PathBuf>,
}
