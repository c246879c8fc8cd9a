//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{Dataset, DescentConfig, FitOutcome, RowResidual};

/// Optional held-out evaluation shown in the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldoutReport {
    pub step: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub test_cost: f64,
}

/// Format the full run summary (dataset stats + descent diagnostics + coefficients).
pub fn format_run_summary(
    dataset: &Dataset,
    outcome: &FitOutcome,
    config: &DescentConfig,
    holdout: Option<&HoldoutReport>,
) -> String {
    let mut out = String::new();

    out.push_str("=== linreg - gradient descent fit ===\n");
    match dataset.stats() {
        Some(stats) => out.push_str(&format!(
            "Data: n={} | features={} | output=[{:.4}, {:.4}]\n",
            stats.n_experiments, stats.n_features, stats.y_min, stats.y_max
        )),
        None => out.push_str(&format!(
            "Data: n={} | features={}\n",
            dataset.len(),
            dataset.feature_count()
        )),
    }
    out.push_str(&format!(
        "Descent: lambda={} max_iter={} threshold={} reduction={:?}\n",
        config.lambda, config.max_iter, config.threshold, config.reduction
    ));

    out.push_str("\nResult:\n");
    out.push_str(&format!(
        "- {} after {} iterations\n",
        outcome.termination.display_name(),
        outcome.iterations
    ));
    out.push_str(&format!("- square error: {}\n", outcome.error));
    if !outcome.error.is_finite() {
        out.push_str("- warning: cost is not finite, try a smaller --lambda\n");
    }

    if let Some(h) = holdout {
        out.push_str(&format!(
            "- holdout (step {}): train n={} | test n={} | test cost={:.6}\n",
            h.step, h.train_rows, h.test_rows, h.test_cost
        ));
    }

    out.push_str("\nCoefficients:\n");
    let width = dataset
        .features()
        .iter()
        .map(|f| f.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);
    for (idx, value) in outcome.rho.iter().enumerate() {
        let fallback = format!("rho[{idx}]");
        let name = dataset.features().get(idx).map(String::as_str).unwrap_or(fallback.as_str());
        out.push_str(&format!("  {name:<width$} {value:>14.6}\n"));
    }

    out
}

/// Format a residual table.
pub fn format_residuals(rows: &[RowResidual]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>6} {:>14} {:>14} {:>14}", "row", "output", "fitted", "residual"));
    out.push('\n');
    out.push_str(&format!("{:-<6} {:-<14} {:-<14} {:-<14}", "", "", "", ""));
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{:>6} {:>14.6} {:>14.6} {:>14.6}",
            r.row, r.experiment.output, r.fitted, r.residual
        ));
        out.push('\n');
    }
    out
}

/// The three-line report of the built-in densities example.
pub fn format_demo(outcome: &FitOutcome) -> String {
    format!(
        "Densities: {}\nNb iterations: {}\nSquare error: {}\n",
        outcome.rho, outcome.iterations, outcome.error
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Experiment, Termination};
    use crate::math::Vector;

    fn outcome() -> FitOutcome {
        FitOutcome {
            rho: Vector::from([1.5, -2.0]),
            error: 0.25,
            iterations: 12,
            termination: Termination::Converged,
            trace: Vec::new(),
        }
    }

    #[test]
    fn summary_names_each_coefficient() {
        let ds = Dataset::new(
            vec!["V_lead".to_string(), "V_iron".to_string()],
            vec![Experiment::new(Vector::from([1.0, 1.0]), 2.0)],
        );
        let text = format_run_summary(&ds, &outcome(), &DescentConfig::default(), None);
        assert!(text.contains("converged after 12 iterations"));
        assert!(text.contains("V_lead"));
        assert!(text.contains("V_iron"));
        assert!(text.contains("1.500000"));
        assert!(!text.contains("holdout"));
    }

    #[test]
    fn summary_includes_holdout_when_present() {
        let ds = Dataset::new(vec!["x".to_string()], Vec::new());
        let h = HoldoutReport {
            step: 3,
            train_rows: 4,
            test_rows: 3,
            test_cost: 0.5,
        };
        let text = format_run_summary(&ds, &outcome(), &DescentConfig::default(), Some(&h));
        assert!(text.contains("holdout (step 3)"));
        assert!(text.contains("rho[1]"));
    }

    #[test]
    fn demo_prints_vector_iterations_and_error() {
        let text = format_demo(&outcome());
        assert_eq!(text, "Densities: [1.5, -2]\nNb iterations: 12\nSquare error: 0.25\n");
    }

    #[test]
    fn residual_table_has_header_and_rows() {
        let rows = vec![RowResidual {
            row: 1,
            experiment: Experiment::new(Vector::from([1.0]), 2.0),
            fitted: 1.5,
            residual: 0.5,
        }];
        let text = format_residuals(&rows);
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(2).unwrap().contains("0.500000"));
    }
}
