use radix_core::{Bindings, Differentiator, Evaluator};

use crate::{Context, Error, Expr};

/// Evaluates and differentiates expressions written in this crate's syntax.
///
/// Expressions are parsed on every call, so one evaluator can serve any
/// number of runs and expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathEvaluator;

impl Evaluator for MathEvaluator {
    type Error = Error;

    fn evaluate(&self, expression: &str, bindings: Bindings) -> Result<f64, Self::Error> {
        let mut cx = Context::new();
        cx.set_var("x", bindings.x);
        cx.set_var("e", bindings.e);
        Expr::parse(expression)?.eval(&cx)
    }
}

impl Differentiator for MathEvaluator {
    type Error = Error;

    fn differentiate(&self, expression: &str, wrt: &str) -> Result<String, Self::Error> {
        let derivative = Expr::parse(expression)?.derivative(wrt)?;
        Ok(derivative.to_string())
    }
}
