//! Read/write model JSON files.
//!
//! A model file is the portable representation of a fit: feature names, the
//! fitted `rho`, the final cost and iteration count, and the hyperparameters
//! that produced them. The schema is defined by `domain::ModelFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{Dataset, DescentConfig, FitOutcome, ModelFile};
use crate::error::AppError;

pub const TOOL_NAME: &str = "linreg";

/// Package a fit outcome as a `ModelFile`, stamped with the current time.
pub fn model_file(dataset: &Dataset, outcome: &FitOutcome, config: &DescentConfig) -> ModelFile {
    ModelFile {
        tool: TOOL_NAME.to_string(),
        fitted_at: Utc::now(),
        features: dataset.features().to_vec(),
        rho: outcome.rho.clone(),
        error: outcome.error,
        iterations: outcome.iterations,
        termination: outcome.termination,
        config: config.clone(),
    }
}

pub fn write_model_json(path: &Path, model: &ModelFile) -> Result<(), AppError> {
    if !model.rho.is_finite() {
        return Err(AppError::new(
            4,
            "Refusing to export a model with non-finite coefficients.",
        ));
    }
    if !model.error.is_finite() {
        return Err(AppError::new(
            4,
            format!("Refusing to export a model with non-finite error ({}).", model.error),
        ));
    }

    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create model JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, model)
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let model: ModelFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid model JSON: {e}")))?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Experiment, Termination};
    use crate::math::Vector;

    fn outcome(rho: Vector) -> FitOutcome {
        FitOutcome {
            rho,
            error: 0.125,
            iterations: 17,
            termination: Termination::Converged,
            trace: Vec::new(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![Experiment::new(Vector::from([1.0, 2.0]), 3.0)],
        )
    }

    #[test]
    fn model_json_reloads() {
        let path = std::env::temp_dir().join(format!("linreg-model-{}.json", std::process::id()));
        let model = model_file(&dataset(), &outcome(Vector::from([1.25, -0.5])), &DescentConfig::default());

        write_model_json(&path, &model).unwrap();
        let back = read_model_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back.tool, "linreg");
        assert_eq!(back.features, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(back.rho, Vector::from([1.25, -0.5]));
        assert_eq!(back.iterations, 17);
        assert_eq!(back.termination, Termination::Converged);
        assert_eq!(back.config, DescentConfig::default());
    }

    #[test]
    fn non_finite_model_is_not_exported() {
        let path = std::env::temp_dir().join(format!("linreg-nan-{}.json", std::process::id()));
        let model = model_file(&dataset(), &outcome(Vector::from([f64::NAN, 1.0])), &DescentConfig::default());
        let err = write_model_json(&path, &model).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(!path.exists());
    }

    #[test]
    fn infinite_error_is_not_exported() {
        let path = std::env::temp_dir().join(format!("linreg-inf-{}.json", std::process::id()));
        let mut fit = outcome(Vector::from([-6.4e160]));
        fit.error = f64::INFINITY;
        fit.termination = Termination::Diverged;
        let model = model_file(&dataset(), &fit, &DescentConfig::default());
        let err = write_model_json(&path, &model).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(!path.exists());
    }

    #[test]
    fn garbage_json_is_rejected() {
        let path = std::env::temp_dir().join(format!("linreg-garbage-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_model_json(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert_eq!(err.exit_code(), 2);
    }
}
