//! Numeric building blocks: the dense vector every other module works with.

pub mod vector;

pub use vector::*;
