//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for prediction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::math::Vector;

/// One observation: feature values and the observed output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub inputs: Vector,
    pub output: f64,
}

impl Experiment {
    pub fn new(inputs: Vector, output: f64) -> Self {
        Self { inputs, output }
    }

    /// `output - rho · inputs`, truncated to the shorter of the two vectors.
    pub fn residual(&self, rho: &Vector) -> f64 {
        self.output - rho.dot(&self.inputs)
    }
}

/// Ordered experiments plus the feature names from the header row.
///
/// Rows are not checked against the header: an experiment may carry fewer or
/// more inputs than there are feature names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    features: Vec<String>,
    experiments: Vec<Experiment>,
}

impl Dataset {
    pub fn new(features: Vec<String>, experiments: Vec<Experiment>) -> Self {
        Self {
            features,
            experiments,
        }
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn experiments(&self) -> &[Experiment] {
        &self.experiments
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Experiment> {
        self.experiments.iter()
    }

    /// Strided split into `(train, test)`.
    ///
    /// Row `i` goes to train when `i % step == 0` and to test when
    /// `i % step == 1`; other rows are left out. `step` below 2 puts every
    /// row in train.
    pub fn partition(&self, step: usize) -> (Dataset, Dataset) {
        let mut train = Vec::new();
        let mut test = Vec::new();
        for (i, e) in self.experiments.iter().enumerate() {
            if step < 2 || i % step == 0 {
                train.push(e.clone());
            } else if i % step == 1 {
                test.push(e.clone());
            }
        }
        (
            Dataset::new(self.features.clone(), train),
            Dataset::new(self.features.clone(), test),
        )
    }

    pub fn stats(&self) -> Option<DatasetStats> {
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for e in &self.experiments {
            y_min = y_min.min(e.output);
            y_max = y_max.max(e.output);
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            return None;
        }
        Some(DatasetStats {
            n_experiments: self.experiments.len(),
            n_features: self.features.len(),
            y_min,
            y_max,
        })
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Experiment;
    type IntoIter = std::slice::Iter<'a, Experiment>;

    fn into_iter(self) -> Self::IntoIter {
        self.experiments.iter()
    }
}

/// Summary stats about a loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_experiments: usize,
    pub n_features: usize,
    pub y_min: f64,
    pub y_max: f64,
}

/// How `cost` and `gradient` accumulate their per-row terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    /// Plain loop in row order. Bit-reproducible.
    #[default]
    Sequential,
    /// Row-parallel map + sum on the rayon pool. Summation order is not fixed.
    Parallel,
}

/// Hyperparameters for `fit_linear`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescentConfig {
    /// Step size.
    pub lambda: f64,
    pub max_iter: usize,
    /// Stop once `|prev_error - error|` is at or below this value.
    pub threshold: f64,
    #[serde(default)]
    pub reduction: Reduction,
    /// Keep every `(prev_error, error)` pair in the outcome.
    #[serde(default)]
    pub record_trace: bool,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            lambda: 0.1,
            max_iter: 10_000,
            threshold: 0.11,
            reduction: Reduction::Sequential,
            record_trace: false,
        }
    }
}

impl DescentConfig {
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }
}

/// Why the descent loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Termination {
    /// The error delta fell to the threshold or below.
    Converged,
    /// `max_iter` passes ran without the delta clause firing.
    Exhausted,
    /// The cost stopped being finite; the stopping rule only ends the run
    /// because comparisons against NaN are false.
    Diverged,
}

impl Termination {
    pub fn display_name(self) -> &'static str {
        match self {
            Termination::Converged => "converged",
            Termination::Exhausted => "exhausted",
            Termination::Diverged => "diverged",
        }
    }
}

/// One recorded descent pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub iteration: usize,
    pub prev_error: f64,
    pub error: f64,
}

/// Result of a gradient descent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitOutcome {
    pub rho: Vector,
    /// Cost at the final `rho`.
    pub error: f64,
    pub iterations: usize,
    pub termination: Termination,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceStep>,
}

/// Portable representation of a fitted model, written by `linreg fit
/// --export-model` and read back by `linreg predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub fitted_at: DateTime<Utc>,
    pub features: Vec<String>,
    pub rho: Vector,
    pub error: f64,
    pub iterations: usize,
    pub termination: Termination,
    pub config: DescentConfig,
}

/// Fitted value and residual for one experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResidual {
    pub row: usize,
    pub experiment: Experiment,
    pub fitted: f64,
    pub residual: f64,
}
