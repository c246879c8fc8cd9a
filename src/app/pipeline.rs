//! Shared "fit pipeline" logic used by the `fit` and `demo` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset -> optional holdout split -> gradient descent -> residuals -> ranking

use log::info;

use crate::domain::{Dataset, DescentConfig, FitOutcome, RowResidual};
use crate::error::AppError;
use crate::fit::{cost_with, fit_linear};
use crate::report::HoldoutReport;

/// All computed outputs of a single fit run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Rows the model was fitted on (the train split when a holdout is used).
    pub train: Dataset,
    pub outcome: FitOutcome,
    pub residuals: Vec<RowResidual>,
    pub worst: Vec<RowResidual>,
    pub holdout: Option<HoldoutReport>,
}

/// Fit `dataset` and compute everything the reports need.
pub fn run_fit(
    dataset: &Dataset,
    config: &DescentConfig,
    holdout_step: Option<usize>,
    top_n: usize,
) -> Result<RunOutput, AppError> {
    if dataset.is_empty() {
        return Err(AppError::new(3, "Dataset has no rows to fit."));
    }

    let (train, test) = match holdout_step {
        Some(step) if step >= 2 => {
            let (train, test) = dataset.partition(step);
            (train, Some((step, test)))
        }
        Some(step) => {
            return Err(AppError::new(2, format!("Holdout step must be >= 2, got {step}.")));
        }
        None => (dataset.clone(), None),
    };

    let outcome = fit_linear(&train, config);
    info!(
        "fit {} after {} iterations (error={})",
        outcome.termination.display_name(),
        outcome.iterations,
        outcome.error
    );

    let holdout = test.map(|(step, test)| HoldoutReport {
        step,
        train_rows: train.len(),
        test_rows: test.len(),
        test_cost: cost_with(&test, &outcome.rho, config.reduction),
    });

    let residuals = crate::report::compute_residuals(&train, &outcome.rho)?;
    let worst = crate::report::rank_worst(&residuals, top_n);

    Ok(RunOutput {
        train,
        outcome,
        residuals,
        worst,
        holdout,
    })
}
