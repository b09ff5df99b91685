use radix_core::{Bindings, Evaluator};

use crate::{EvalError, Failure};

/// An expression bound to the evaluator that computes it.
pub(crate) struct Function<'a, E> {
    evaluator: &'a E,
    expression: &'a str,
}

impl<'a, E: Evaluator> Function<'a, E> {
    pub(crate) fn new(evaluator: &'a E, expression: &'a str) -> Self {
        Self {
            evaluator,
            expression,
        }
    }

    /// Evaluates at `x` without judging the value.
    pub(crate) fn raw(&self, x: f64) -> Result<f64, EvalError> {
        self.evaluator
            .evaluate(self.expression, Bindings::at(x))
            .map_err(|error| EvalError::Evaluator(error.to_string()))
    }

    /// Evaluates at `x`, rejecting non-finite values.
    pub(crate) fn at(&self, iter: usize, x: f64) -> Result<f64, Failure> {
        let value = self
            .raw(x)
            .map_err(|error| Failure::Evaluation { iter, x, error })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Failure::Evaluation {
                iter,
                x,
                error: EvalError::NotFinite,
            })
        }
    }
}
