//! `linreg-gd` library crate.
//!
//! Fits `output ≈ rho · inputs` (no intercept) by fixed-step gradient descent
//! on a halved sum of squared errors.
//!
//! The binary (`linreg`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the vector/objective/descent pieces are reusable on their own

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;

pub use domain::{Dataset, DescentConfig, Experiment, FitOutcome, Termination};
pub use error::{AppError, ParseError};
pub use fit::{cost, fit_linear, fit_linear_default, gradient};
pub use io::ingest::parse_dataset;
pub use math::Vector;
