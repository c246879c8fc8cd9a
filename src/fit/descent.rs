//! Fixed-step gradient descent.
//!
//! The loop is a small state machine:
//!
//! - `Initializing`: `rho = [0, 1, ..., k-1]`, `prev_error = 0`,
//!   `error = cost(rho)`, no passes run yet
//! - `Iterating`: one pass is `rho <- rho - lambda * gradient(rho)` followed by
//!   `prev_error <- error`, `error <- cost(rho)`
//! - `Finished`: the stopping rule no longer holds
//!
//! Stopping rule, checked before every pass:
//!
//! ```text
//! iter_count < max_iter && (prev_error == 0 || |prev_error - error| > threshold)
//! ```
//!
//! `prev_error` starts at literal `0`, so the first pass always runs, and any
//! later pass whose previous error is exactly `0` keeps the loop going too.
//! Divergence does not stop the loop early: a step size that is too large
//! runs until `max_iter`, or until the cost overflows and the delta turns NaN.
//! Either way a non-finite final cost is reported as `Termination::Diverged`.

use log::{debug, trace, warn};

use crate::domain::{Dataset, DescentConfig, FitOutcome, Termination, TraceStep};
use crate::fit::objective::{cost_with, gradient_with};
use crate::math::Vector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescentState {
    Initializing,
    Iterating,
    Finished(Termination),
}

/// Step-by-step gradient descent over a borrowed dataset.
///
/// `fit_linear` drives this to completion; callers that want to observe each
/// pass can call `step` themselves.
#[derive(Debug, Clone)]
pub struct GradientDescent<'a> {
    dataset: &'a Dataset,
    config: DescentConfig,
    rho: Vector,
    prev_error: f64,
    error: f64,
    iter_count: usize,
    state: DescentState,
    warned_non_finite: bool,
}

impl<'a> GradientDescent<'a> {
    pub fn new(dataset: &'a Dataset, config: DescentConfig) -> Self {
        let rho = Vector::seeded(dataset.feature_count());
        let error = cost_with(dataset, &rho, config.reduction);
        Self {
            dataset,
            config,
            rho,
            prev_error: 0.0,
            error,
            iter_count: 0,
            state: DescentState::Initializing,
            warned_non_finite: false,
        }
    }

    pub fn state(&self) -> DescentState {
        self.state
    }

    pub fn rho(&self) -> &Vector {
        &self.rho
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn prev_error(&self) -> f64 {
        self.prev_error
    }

    pub fn iterations(&self) -> usize {
        self.iter_count
    }

    fn delta_keeps_going(&self) -> bool {
        self.prev_error == 0.0 || (self.prev_error - self.error).abs() > self.config.threshold
    }

    fn should_continue(&self) -> bool {
        self.iter_count < self.config.max_iter && self.delta_keeps_going()
    }

    /// Run one pass if the stopping rule allows it.
    ///
    /// Returns the recorded `(prev_error, error)` pair for the pass, or `None`
    /// once the run is finished.
    pub fn step(&mut self) -> Option<TraceStep> {
        if let DescentState::Finished(_) = self.state {
            return None;
        }

        if !self.should_continue() {
            let termination = if !self.error.is_finite() {
                Termination::Diverged
            } else if self.delta_keeps_going() {
                Termination::Exhausted
            } else {
                Termination::Converged
            };
            self.state = DescentState::Finished(termination);
            return None;
        }

        self.state = DescentState::Iterating;

        let grad = gradient_with(self.dataset, &self.rho, self.config.reduction);
        self.rho = &self.rho - &(self.config.lambda * &grad);
        self.prev_error = self.error;
        self.error = cost_with(self.dataset, &self.rho, self.config.reduction);
        self.iter_count += 1;

        if !self.error.is_finite() && !self.warned_non_finite {
            warn!(
                "cost became non-finite at iteration {} (lambda={} may be too large)",
                self.iter_count, self.config.lambda
            );
            self.warned_non_finite = true;
        }
        trace!(
            "iter={} prev_error={} error={}",
            self.iter_count, self.prev_error, self.error
        );

        Some(TraceStep {
            iteration: self.iter_count,
            prev_error: self.prev_error,
            error: self.error,
        })
    }

    /// Drive the loop to its terminal state.
    pub fn run(mut self) -> FitOutcome {
        let record = self.config.record_trace;
        let mut steps = Vec::new();
        while let Some(step) = self.step() {
            if record {
                steps.push(step);
            }
        }

        let termination = match self.state {
            DescentState::Finished(t) => t,
            // `step` only returns `None` after moving to `Finished`.
            _ => Termination::Exhausted,
        };

        FitOutcome {
            rho: self.rho,
            error: self.error,
            iterations: self.iter_count,
            termination,
            trace: steps,
        }
    }
}

/// Fit `output ≈ rho · inputs` by gradient descent.
pub fn fit_linear(dataset: &Dataset, config: &DescentConfig) -> FitOutcome {
    debug!(
        "fit_linear: {} experiments, {} features, lambda={}, max_iter={}, threshold={}, reduction={:?}",
        dataset.len(),
        dataset.feature_count(),
        config.lambda,
        config.max_iter,
        config.threshold,
        config.reduction
    );

    let outcome = GradientDescent::new(dataset, config.clone()).run();

    debug!(
        "fit_linear: {} after {} iterations, error={}",
        outcome.termination.display_name(),
        outcome.iterations,
        outcome.error
    );
    outcome
}

/// `fit_linear` with `lambda = 0.1`, `max_iter = 10000`, `threshold = 0.11`.
pub fn fit_linear_default(dataset: &Dataset) -> FitOutcome {
    fit_linear(dataset, &DescentConfig::default())
}
