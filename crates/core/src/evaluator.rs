use std::f64::consts;

/// Variable values used when evaluating an expression.
///
/// `x` is the point being evaluated. `e` is exposed as a binding because
/// user-entered functions commonly write Euler's number as a bare `e`;
/// it defaults to [`std::f64::consts::E`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Bindings {
    pub x: f64,
    pub e: f64,
}

impl Bindings {
    /// Creates bindings for `x` with the standard value of `e`.
    #[must_use]
    pub fn at(x: f64) -> Self {
        Self { x, e: consts::E }
    }

    /// Returns a copy with `e` overridden.
    #[must_use]
    pub fn with_e(self, e: f64) -> Self {
        Self { e, ..self }
    }
}

/// Evaluates a textual expression at a point.
///
/// Implementations must report failures (parse errors, unknown names,
/// domain errors) through `Err` rather than panicking. They may return
/// non-finite values; the engine classifies those itself.
pub trait Evaluator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates `expression` with the given bindings.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression cannot be parsed or evaluated.
    fn evaluate(&self, expression: &str, bindings: Bindings) -> Result<f64, Self::Error>;
}

/// Produces the derivative of a textual expression.
///
/// The result must itself be an expression the paired [`Evaluator`] accepts.
pub trait Differentiator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Differentiates `expression` with respect to the variable `wrt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression cannot be parsed or differentiated.
    fn differentiate(&self, expression: &str, wrt: &str) -> Result<String, Self::Error>;
}

impl<T: Evaluator + ?Sized> Evaluator for &T {
    type Error = T::Error;

    fn evaluate(&self, expression: &str, bindings: Bindings) -> Result<f64, Self::Error> {
        (**self).evaluate(expression, bindings)
    }
}

impl<T: Differentiator + ?Sized> Differentiator for &T {
    type Error = T::Error;

    fn differentiate(&self, expression: &str, wrt: &str) -> Result<String, Self::Error> {
        (**self).differentiate(expression, wrt)
    }
}
