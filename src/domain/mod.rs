//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations and their container (`Experiment`, `Dataset`)
//! - descent hyperparameters (`DescentConfig`, `Reduction`)
//! - fit outputs (`FitOutcome`, `Termination`, `ModelFile`, etc.)

pub mod types;

pub use types::*;
