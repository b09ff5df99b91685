//! Hand-written functions for unit tests.

use radix_core::{Bindings, Differentiator, Evaluator};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown expression '{0}'")]
pub(crate) struct Unknown(pub(crate) String);

/// Evaluates a fixed table of named functions.
///
/// Differentiation succeeds only for names listed as derivatives.
#[derive(Default)]
pub(crate) struct Table {
    functions: Vec<(&'static str, fn(f64) -> f64)>,
    derivatives: Vec<(&'static str, &'static str)>,
}

impl Table {
    pub(crate) fn with(mut self, name: &'static str, f: fn(f64) -> f64) -> Self {
        self.functions.push((name, f));
        self
    }

    pub(crate) fn with_derivative(mut self, name: &'static str, derivative: &'static str) -> Self {
        self.derivatives.push((name, derivative));
        self
    }
}

impl Evaluator for Table {
    type Error = Unknown;

    fn evaluate(&self, expression: &str, bindings: Bindings) -> Result<f64, Unknown> {
        self.functions
            .iter()
            .find(|(name, _)| *name == expression)
            .map(|(_, f)| f(bindings.x))
            .ok_or_else(|| Unknown(expression.to_string()))
    }
}

impl Differentiator for Table {
    type Error = Unknown;

    fn differentiate(&self, expression: &str, _wrt: &str) -> Result<String, Unknown> {
        self.derivatives
            .iter()
            .find(|(name, _)| *name == expression)
            .map(|(_, derivative)| (*derivative).to_string())
            .ok_or_else(|| Unknown(expression.to_string()))
    }
}
