//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - reads datasets and model files
//! - runs gradient descent
//! - prints reports
//! - writes optional exports

use std::io::Write;

use clap::Parser;
use log::{debug, warn};

use crate::cli::{Command, DescentArgs, FitArgs, GenerateArgs, PredictArgs};
use crate::data::SampleConfig;
use crate::domain::{DescentConfig, Reduction};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `linreg` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is the normal case.
    match dotenvy::dotenv() {
        Ok(path) => debug!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(AppError::new(2, format!("Failed to read .env: {e}"))),
    }

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Predict(args) => handle_predict(args),
        Command::Generate(args) => handle_generate(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = descent_config_from_args(&args.descent).with_trace(args.trace);
    let dataset = crate::io::ingest::load_dataset(&args.csv)?;

    let run = pipeline::run_fit(&dataset, &config, args.holdout, args.top)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.train, &run.outcome, &config, run.holdout.as_ref())
    );

    if args.top > 0 {
        println!("Largest residuals:");
        println!("{}", crate::report::format_residuals(&run.worst));
    }

    if args.trace {
        println!("Trace:");
        for step in &run.outcome.trace {
            println!("{:>8} {:>20} {:>20}", step.iteration, step.prev_error, step.error);
        }
    }

    // Optional exports.
    if let Some(path) = &args.export_model {
        let model = crate::io::model::model_file(&run.train, &run.outcome, &config);
        crate::io::model::write_model_json(path, &model)?;
    }
    if let Some(path) = &args.export_residuals {
        crate::io::export::write_residuals_csv(path, run.train.features(), &run.residuals)?;
    }

    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let model = crate::io::model::read_model_json(&args.model)?;
    let dataset = crate::io::ingest::load_dataset(&args.csv)?;

    if dataset.features() != model.features.as_slice() {
        warn!(
            "feature names differ from the model: {:?} vs {:?}",
            dataset.features(),
            model.features
        );
    }

    let residuals = crate::report::compute_residuals(&dataset, &model.rho)?;
    let cost = crate::fit::cost(&dataset, &model.rho);

    println!("Model: {} (fitted {})", model.rho, model.fitted_at);
    println!("Rows: {} | square error: {cost}", dataset.len());
    println!("{}", crate::report::format_residuals(&residuals));

    if let Some(path) = &args.export_residuals {
        crate::io::export::write_residuals_csv(path, dataset.features(), &residuals)?;
    }

    Ok(())
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        size: args.size,
        seed_x: args.seed_x,
        seed_y: args.seed_y,
        noise: args.noise,
        slope: args.slope,
    };
    let dataset = crate::data::generate_line(&config)?;

    match &args.out {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
            crate::io::export::write_dataset_csv(file, &dataset, "y")?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            crate::io::export::write_dataset_csv(&mut lock, &dataset, "y")?;
            lock.flush()
                .map_err(|e| AppError::new(2, format!("Failed to write to stdout: {e}")))?;
        }
    }

    Ok(())
}

fn handle_demo(args: DescentArgs) -> Result<(), AppError> {
    let config = descent_config_from_args(&args);
    let dataset = crate::data::densities()?;
    let outcome = crate::fit::fit_linear(&dataset, &config);
    print!("{}", crate::report::format_demo(&outcome));
    Ok(())
}

pub fn descent_config_from_args(args: &DescentArgs) -> DescentConfig {
    let reduction = if args.parallel {
        Reduction::Parallel
    } else {
        Reduction::Sequential
    };
    DescentConfig::default()
        .with_lambda(args.lambda)
        .with_max_iter(args.max_iter)
        .with_threshold(args.threshold)
        .with_reduction(reduction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descent_config_follows_flags() {
        let args = DescentArgs {
            lambda: 0.02,
            max_iter: 7,
            threshold: 1e-3,
            parallel: true,
        };
        let cfg = descent_config_from_args(&args);
        assert_eq!(cfg.lambda, 0.02);
        assert_eq!(cfg.max_iter, 7);
        assert_eq!(cfg.threshold, 1e-3);
        assert_eq!(cfg.reduction, Reduction::Parallel);
        assert!(!cfg.record_trace);
    }
}
