//! Squared-error objective and its gradient.
//!
//! For a parameter vector `rho` over a dataset of experiments `(x_i, y_i)`:
//!
//! ```text
//! cost(rho)        = 1/2 Σ_i (y_i - rho · x_i)^2
//! gradient(rho)[j] = -Σ_i (y_i - rho · x_i) * x_i[j]      j in 0..feature_count
//! ```
//!
//! The sum is not normalized by the number of experiments. Dot products follow
//! the `Vector` truncation rule, so `rho` and the inputs may differ in length.
//! An input vector shorter than the feature count contributes `0` to the
//! components it does not have.

use rayon::prelude::*;

use crate::domain::{Dataset, Reduction};
use crate::math::Vector;

/// Halved sum of squared residuals, accumulated in row order.
pub fn cost(dataset: &Dataset, rho: &Vector) -> f64 {
    let mut error = 0.0;
    for experiment in dataset {
        let r = experiment.residual(rho);
        error += r * r;
    }
    error / 2.0
}

/// Gradient of `cost` with respect to `rho`, one component per feature.
pub fn gradient(dataset: &Dataset, rho: &Vector) -> Vector {
    let residuals: Vec<f64> = dataset.iter().map(|e| e.residual(rho)).collect();

    let mut grad = Vector::with_capacity(dataset.feature_count());
    for j in 0..dataset.feature_count() {
        let mut part_deriv = 0.0;
        for (experiment, r) in dataset.iter().zip(&residuals) {
            part_deriv += r * experiment.inputs.get(j).unwrap_or(0.0);
        }
        grad.push(-part_deriv);
    }
    grad
}

/// `cost` reduced across the rayon pool.
pub fn par_cost(dataset: &Dataset, rho: &Vector) -> f64 {
    let sum: f64 = dataset
        .experiments()
        .par_iter()
        .map(|e| {
            let r = e.residual(rho);
            r * r
        })
        .sum();
    sum / 2.0
}

/// `gradient` reduced across the rayon pool: each row maps to its own partial
/// gradient, and partials are summed componentwise.
pub fn par_gradient(dataset: &Dataset, rho: &Vector) -> Vector {
    let k = dataset.feature_count();
    let sums = dataset
        .experiments()
        .par_iter()
        .map(|e| {
            let r = e.residual(rho);
            (0..k)
                .map(|j| r * e.inputs.get(j).unwrap_or(0.0))
                .collect::<Vec<f64>>()
        })
        .reduce(
            || vec![0.0; k],
            |mut acc, row| {
                for (a, v) in acc.iter_mut().zip(row) {
                    *a += v;
                }
                acc
            },
        );
    sums.into_iter().map(|s| -s).collect()
}

/// Dispatch on the configured reduction.
pub fn cost_with(dataset: &Dataset, rho: &Vector, reduction: Reduction) -> f64 {
    match reduction {
        Reduction::Sequential => cost(dataset, rho),
        Reduction::Parallel => par_cost(dataset, rho),
    }
}

pub fn gradient_with(dataset: &Dataset, rho: &Vector, reduction: Reduction) -> Vector {
    match reduction {
        Reduction::Sequential => gradient(dataset, rho),
        Reduction::Parallel => par_gradient(dataset, rho),
    }
}

/// Model prediction for one input row.
pub fn predict(rho: &Vector, inputs: &Vector) -> f64 {
    rho.dot(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Experiment;

    fn single(inputs: &[f64], output: f64, k: usize) -> Dataset {
        let features = (0..k).map(|j| format!("x{j}")).collect();
        Dataset::new(features, vec![Experiment::new(Vector::from(inputs), output)])
    }

    fn small() -> Dataset {
        Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                Experiment::new(Vector::from([1.0, 2.0]), 3.0),
                Experiment::new(Vector::from([-1.0, 0.5]), 1.0),
                Experiment::new(Vector::from([4.0, -2.0]), 0.0),
            ],
        )
    }

    #[test]
    fn single_experiment_cost_and_gradient() {
        let ds = single(&[2.0, 3.0], 10.0, 2);
        let rho = Vector::from([1.0, 1.0]);
        let r = 10.0 - 5.0;

        assert_eq!(cost(&ds, &rho), 0.5 * r * r);
        assert_eq!(gradient(&ds, &rho), Vector::from([-r * 2.0, -r * 3.0]));
    }

    #[test]
    fn cost_is_unnormalized_sum() {
        let ds = small();
        let rho = Vector::from([0.5, -0.25]);
        let expected: f64 = ds
            .iter()
            .map(|e| {
                let r = e.output - (0.5 * e.inputs[0] - 0.25 * e.inputs[1]);
                r * r
            })
            .sum::<f64>()
            / 2.0;
        assert!((cost(&ds, &rho) - expected).abs() < 1e-12);
        assert!(cost(&ds, &rho) >= 0.0);
    }

    #[test]
    fn cost_is_zero_for_exact_fit() {
        let ds = single(&[1.0, 2.0], 5.0, 2);
        assert_eq!(cost(&ds, &Vector::from([1.0, 2.0])), 0.0);
        assert_eq!(gradient(&ds, &Vector::from([1.0, 2.0])), Vector::from([0.0, 0.0]));
    }

    #[test]
    fn gradient_length_follows_feature_count() {
        let ds = small();
        assert_eq!(gradient(&ds, &Vector::from([1.0])).len(), 2);
        assert_eq!(gradient(&ds, &Vector::from([1.0, 2.0, 3.0, 4.0])).len(), 2);
        assert_eq!(gradient(&ds, &Vector::new()).len(), 2);
    }

    #[test]
    fn gradient_matches_finite_difference() {
        let ds = small();
        let rho = Vector::from([0.3, -0.7]);
        let g = gradient(&ds, &rho);
        let h = 1e-6;
        for j in 0..2 {
            let mut up: Vec<f64> = rho.as_slice().to_vec();
            let mut down = up.clone();
            up[j] += h;
            down[j] -= h;
            let fd = (cost(&ds, &Vector::from(up)) - cost(&ds, &Vector::from(down))) / (2.0 * h);
            assert!((fd - g[j]).abs() < 1e-5, "component {j}: fd={fd}, g={}", g[j]);
        }
    }

    #[test]
    fn short_input_rows_contribute_zero_to_missing_components() {
        let ds = single(&[2.0], 4.0, 3);
        let g = gradient(&ds, &Vector::from([1.0, 1.0, 1.0]));
        assert_eq!(g, Vector::from([-4.0, 0.0, 0.0]));
    }

    #[test]
    fn empty_dataset_has_zero_cost_and_gradient() {
        let ds = Dataset::new(vec!["x".to_string()], Vec::new());
        assert_eq!(cost(&ds, &Vector::from([3.0])), 0.0);
        assert_eq!(gradient(&ds, &Vector::from([3.0])), Vector::from([0.0]));
    }

    #[test]
    fn parallel_reduction_agrees_with_sequential() {
        let experiments = (0..500)
            .map(|i| {
                let x = i as f64 * 0.01;
                Experiment::new(Vector::from([x, 1.0 - x]), 2.0 * x + 0.5)
            })
            .collect();
        let ds = Dataset::new(vec!["a".to_string(), "b".to_string()], experiments);
        let rho = Vector::from([0.1, 0.2]);

        let c_seq = cost(&ds, &rho);
        let c_par = par_cost(&ds, &rho);
        assert!((c_seq - c_par).abs() <= 1e-9 * c_seq.abs().max(1.0));

        let g_seq = gradient(&ds, &rho);
        let g_par = par_gradient(&ds, &rho);
        assert_eq!(g_par.len(), g_seq.len());
        for j in 0..g_seq.len() {
            assert!((g_seq[j] - g_par[j]).abs() <= 1e-9 * g_seq[j].abs().max(1.0));
        }
    }

    #[test]
    fn inputs_are_untouched() {
        let ds = small();
        let before = ds.clone();
        let rho = Vector::from([1.0, 1.0]);
        let _ = cost(&ds, &rho);
        let _ = gradient(&ds, &rho);
        assert_eq!(ds, before);
        assert_eq!(rho, Vector::from([1.0, 1.0]));
    }
}
