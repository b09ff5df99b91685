use thiserror::Error;

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Problems that reject a run before any iteration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("bounds must be finite")]
    NonFiniteBounds,

    #[error("bounds must differ")]
    ZeroWidth,

    #[error("f(a) and f(b) must have opposite signs (f({a}) = {fa}, f({b}) = {fb})")]
    NoSignChange { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("initial values must be finite")]
    NonFiniteStart,

    #[error("secant seeds must be distinct")]
    EqualSeeds,

    #[error("f(x0) and f(x1) must differ (both are {0})")]
    FlatSeeds(f64),
}

/// Why a single evaluation was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum EvalError {
    /// The evaluator reported an error, kept as its message.
    #[error("{0}")]
    Evaluator(String),

    #[error("result is not a finite number")]
    NotFinite,
}

/// Why a run stopped without a root.
///
/// Iteration `0` refers to the preparation of the run.
#[derive(Debug, Error, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum Failure {
    #[error("evaluation failed at x = {x} (iteration {iter}): {error}")]
    Evaluation { iter: usize, x: f64, error: EvalError },

    #[error("derivative could not be computed: {reason}")]
    DerivativeUnavailable { reason: String },

    #[error("derivative near zero at iteration {iter}: f'({x}) = {derivative}")]
    DerivativeNearZero { iter: usize, x: f64, derivative: f64 },

    #[error("secant slope near zero at iteration {iter}: slope = {slope}")]
    SlopeNearZero { iter: usize, slope: f64 },

    #[error("f(a) equals f(b) at iteration {iter}, no false position on [{a}, {b}]")]
    FlatBracket { iter: usize, a: f64, b: f64 },

    #[error("iteration diverging at iteration {iter}: g({x}) = {value}")]
    Diverging { iter: usize, x: f64, value: f64 },
}

impl Failure {
    /// Returns the iteration that failed.
    #[must_use]
    pub fn iter(&self) -> usize {
        match self {
            Self::DerivativeUnavailable { .. } => 0,
            Self::Evaluation { iter, .. }
            | Self::DerivativeNearZero { iter, .. }
            | Self::SlopeNearZero { iter, .. }
            | Self::FlatBracket { iter, .. }
            | Self::Diverging { iter, .. } => *iter,
        }
    }
}
