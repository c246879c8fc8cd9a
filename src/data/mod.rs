//! Dataset sources other than user CSVs.

pub mod example;
pub mod sample;

pub use example::*;
pub use sample::*;
