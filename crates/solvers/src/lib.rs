//! Step-resumable root finding.
//!
//! A run is prepared from a [`MethodConfig`] and then advanced one
//! [`IterationRecord`] at a time, either interactively through
//! [`RunState::advance`] or in one call with [`run_to_completion`]. Both
//! paths produce the same records, since the second is a loop over the
//! first.
//!
//! # Methods
//!
//! - Bisection and regula falsi on a sign-changing bracket
//! - Secant from two seeds
//! - Newton-Raphson from an initial guess, with a derivative that is given
//!   or derived once when the run is prepared
//! - Fixed-point iteration of `x = g(x)`, stopped as diverging when `g`
//!   leaves the magnitude ceiling
//!
//! # Terminal states
//!
//! A run ends [`Status::Converged`], [`Status::MaxIters`] (the budget ran
//! out, not an error) or [`Status::Failed`] with a [`Failure`] describing
//! why. Problems with the starting values are rejected up front as a
//! [`ValidationError`].
//!
//! # Example
//!
//! ```rust
//! use radix_expr::MathEvaluator;
//! use radix_solvers::{Method, MethodConfig, Status, run_to_completion_unobserved};
//!
//! let config = MethodConfig::new(
//!     "x^3 - 2*x - 5",
//!     Method::NewtonRaphson { initial_guess: 2.0, derivative: None },
//!     1e-4,
//!     20,
//! )?;
//! let run = run_to_completion_unobserved(config, &MathEvaluator)?;
//!
//! assert_eq!(run.status(), Status::Converged);
//! assert!((run.outcome().root.unwrap() - 2.0945515).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod evaluate;
mod method;
mod outcome;
mod record;
mod solve;
mod state;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, Limits, Method, MethodConfig, MethodKind};
pub use error::{EvalError, Failure, ValidationError};
pub use outcome::RunOutcome;
pub use record::{IterationRecord, Side, Step};
pub use solve::{Action, Event, run_to_completion, run_to_completion_unobserved};
pub use state::{OutOfRange, RunState, Status};
