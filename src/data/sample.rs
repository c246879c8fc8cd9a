//! Synthetic "points close to a line" datasets.
//!
//! Both coordinates start on the same evenly spaced grid `0..=size` and then
//! receive independent uniform noise:
//!
//! ```text
//! x_i = t_i + U(-noise * size, noise * size)        (seeded by seed_x)
//! y_i = slope * t_i + U(-noise * size, noise * size) (seeded by seed_y)
//! ```
//!
//! Separate seeds keep the x noise stable when only the y noise is varied.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};

use crate::domain::{Dataset, Experiment};
use crate::error::AppError;
use crate::math::Vector;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub size: usize,
    pub seed_x: u64,
    pub seed_y: u64,
    /// Noise half-width as a fraction of `size`.
    pub noise: f64,
    pub slope: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            size: 50,
            seed_x: 123,
            seed_y: 321,
            noise: 0.1,
            slope: 1.0,
        }
    }
}

/// Generate a one-feature dataset (`x`, output `y`) lying close to `y = slope * x`.
pub fn generate_line(config: &SampleConfig) -> Result<Dataset, AppError> {
    if config.size == 0 {
        return Err(AppError::new(2, "Sample size must be > 0."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }
    if !config.slope.is_finite() {
        return Err(AppError::new(2, "Slope must be finite."));
    }

    let grid = linspace(0.0, config.size as f64, config.size);
    let half_width = config.noise * config.size as f64;
    // The sampled range spans twice the half-width and must stay finite.
    if !(2.0 * half_width).is_finite() {
        return Err(AppError::new(
            2,
            format!("Noise band {} x {} is too wide.", config.noise, config.size),
        ));
    }
    let x_noise = uniform_noise(config.seed_x, half_width, config.size);
    let y_noise = uniform_noise(config.seed_y, half_width, config.size);

    let experiments = grid
        .iter()
        .zip(x_noise.iter().zip(&y_noise))
        .map(|(&t, (&nx, &ny))| Experiment::new(Vector::from([t + nx]), config.slope * t + ny))
        .collect();

    Ok(Dataset::new(vec!["x".to_string()], experiments))
}

/// `n` evenly spaced points from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

fn uniform_noise(seed: u64, half_width: f64, n: usize) -> Vec<f64> {
    if half_width <= 0.0 {
        return vec![0.0; n];
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new(-half_width, half_width);
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}
