//! Reporting utilities: residuals, rankings, and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{Dataset, RowResidual};
use crate::error::AppError;
use crate::fit::predict;
use crate::math::Vector;

/// Fitted value and residual for each experiment, in dataset order.
///
/// Rows are numbered from 1 to match the data lines of the input file.
pub fn compute_residuals(dataset: &Dataset, rho: &Vector) -> Result<Vec<RowResidual>, AppError> {
    let mut out = Vec::with_capacity(dataset.len());
    for (idx, e) in dataset.iter().enumerate() {
        let fitted = predict(rho, &e.inputs);
        if !fitted.is_finite() {
            return Err(AppError::new(4, "Non-finite model prediction during residual computation."));
        }
        out.push(RowResidual {
            row: idx + 1,
            experiment: e.clone(),
            fitted,
            residual: e.output - fitted,
        });
    }
    Ok(out)
}

/// The `top_n` rows with the largest absolute residual, largest first.
pub fn rank_worst(residuals: &[RowResidual], top_n: usize) -> Vec<RowResidual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.row.cmp(&b.row))
    });
    sorted.into_iter().take(top_n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Experiment;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["x".to_string()],
            vec![
                Experiment::new(Vector::from([1.0]), 2.0),
                Experiment::new(Vector::from([2.0]), 9.0),
                Experiment::new(Vector::from([3.0]), 3.0),
            ],
        )
    }

    #[test]
    fn compute_residuals_basic() {
        let residuals = compute_residuals(&dataset(), &Vector::from([2.0])).unwrap();
        assert_eq!(residuals.len(), 3);
        assert_eq!(residuals[0].row, 1);
        assert_eq!(residuals[0].fitted, 2.0);
        assert_eq!(residuals[0].residual, 0.0);
        assert_eq!(residuals[1].residual, 5.0);
        assert_eq!(residuals[2].residual, -3.0);
    }

    #[test]
    fn rank_worst_orders_by_magnitude() {
        let residuals = compute_residuals(&dataset(), &Vector::from([2.0])).unwrap();
        let worst = rank_worst(&residuals, 2);
        assert_eq!(worst.len(), 2);
        assert_eq!(worst[0].row, 2);
        assert_eq!(worst[1].row, 3);
    }

    #[test]
    fn non_finite_prediction_is_an_error() {
        let err = compute_residuals(&dataset(), &Vector::from([f64::INFINITY])).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
