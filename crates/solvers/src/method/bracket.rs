use radix_core::Evaluator;

use crate::{Failure, IterationRecord, Side, Step, ValidationError, evaluate::Function};

use super::Context;

/// How the interior point of a bracket is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    /// `c = (a + b) / 2`
    Midpoint,

    /// `c = (a·f(b) − b·f(a)) / (f(b) − f(a))`
    FalsePosition,
}

/// A sign-changing interval with its endpoint values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bracket {
    pub(crate) a: f64,
    pub(crate) b: f64,
    pub(crate) fa: f64,
    pub(crate) fb: f64,
}

impl Bracket {
    /// Evaluates the endpoints and checks for a sign change.
    ///
    /// The outer error rejects the bounds; the inner one reports an
    /// endpoint that could not be evaluated.
    pub(crate) fn prepare<E: Evaluator>(
        bounds: [f64; 2],
        f: &Function<'_, E>,
    ) -> Result<Result<Self, Failure>, ValidationError> {
        let [a, b] = bounds;
        if !a.is_finite() || !b.is_finite() {
            return Err(ValidationError::NonFiniteBounds);
        }
        if a == b {
            return Err(ValidationError::ZeroWidth);
        }

        let fa = match f.at(0, a) {
            Ok(value) => value,
            Err(failure) => return Ok(Err(failure)),
        };
        let fb = match f.at(0, b) {
            Ok(value) => value,
            Err(failure) => return Ok(Err(failure)),
        };
        if fa * fb >= 0.0 {
            return Err(ValidationError::NoSignChange { a, b, fa, fb });
        }

        Ok(Ok(Self { a, b, fa, fb }))
    }

    pub(super) fn step<E: Evaluator>(
        self,
        rule: Rule,
        iter: usize,
        cx: &Context<'_, E>,
    ) -> Result<(IterationRecord, Self), Failure> {
        let Self { a, b, fa, fb } = self;

        let c = match rule {
            Rule::Midpoint => 0.5 * (a + b),
            Rule::FalsePosition => {
                // Endpoints keep opposite signs, so only equal values are flat.
                if fb == fa {
                    return Err(Failure::FlatBracket { iter, a, b });
                }
                (a * fb - b * fa) / (fb - fa)
            }
        };
        let fc = cx.f.at(iter, c)?;

        // An exact zero always converges since the tolerance is positive.
        let error = fc.abs();
        let converged = error < cx.tolerance || (b - a).abs() < cx.tolerance;

        let (kept, next) = if fa * fc < 0.0 {
            (Side::Left, Self { b: c, fb: fc, ..self })
        } else {
            (Side::Right, Self { a: c, fa: fc, ..self })
        };

        let record = IterationRecord {
            iter,
            step: Step::Bracket {
                a,
                b,
                fa,
                fb,
                c,
                fc,
                kept,
                width: (next.b - next.a).abs(),
            },
            error,
            converged,
        };
        Ok((record, next))
    }
}
