//! Core traits and types for the Radix root-finding workspace.
//!
//! This crate defines the shared abstractions that the iteration engine and
//! its observers build on:
//!
//! - [`Evaluator`]: evaluates a textual expression at a point
//! - [`Differentiator`]: produces the derivative of a textual expression
//! - [`Bindings`]: the variable values an expression is evaluated with
//! - [`Observer`]: receives solver events and optionally returns control actions
//!
//! The engine never parses expressions itself. Any math library can drive it
//! by implementing [`Evaluator`] (and [`Differentiator`] for Newton-Raphson).

mod evaluator;
mod observer;

pub use evaluator::{Bindings, Differentiator, Evaluator};
pub use observer::Observer;
