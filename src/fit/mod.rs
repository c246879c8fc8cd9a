//! Model fitting.
//!
//! Responsibilities:
//!
//! - evaluate the squared-error objective and its gradient (`objective`)
//! - run fixed-step gradient descent to a stopping rule (`descent`)

pub mod descent;
pub mod objective;

pub use descent::*;
pub use objective::*;
