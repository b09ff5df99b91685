//! Single-step transitions for each method family.
//!
//! Every method advances an [`Iterate`] (the positional state between steps)
//! and produces one [`IterationRecord`]. A step either succeeds completely
//! or returns a [`Failure`] without side effects.

mod bracket;
mod fixed_point;
mod newton;
mod secant;

pub(crate) use bracket::{Bracket, Rule};
pub(crate) use secant::Window;

use radix_core::Evaluator;

use crate::{Failure, IterationRecord, Limits, evaluate::Function};

/// Everything a step needs besides its iterate.
pub(crate) struct Context<'a, E> {
    pub(crate) f: Function<'a, E>,
    pub(crate) derivative: Option<Function<'a, E>>,
    pub(crate) tolerance: f64,
    pub(crate) limits: Limits,
}

/// The positional state a step starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Iterate {
    Bracket(Bracket, Rule),
    Secant(Window),
    Newton(f64),
    FixedPoint(f64),
}

impl Iterate {
    /// Performs iteration `iter` from this iterate.
    pub(crate) fn step<E: Evaluator>(
        self,
        iter: usize,
        cx: &Context<'_, E>,
    ) -> Result<(IterationRecord, Self), Failure> {
        match self {
            Self::Bracket(bracket, rule) => {
                let (record, next) = bracket.step(rule, iter, cx)?;
                Ok((record, Self::Bracket(next, rule)))
            }
            Self::Secant(window) => {
                let (record, next) = window.step(iter, cx)?;
                Ok((record, Self::Secant(next)))
            }
            Self::Newton(x) => {
                let (record, next) = newton::step(x, iter, cx)?;
                Ok((record, Self::Newton(next)))
            }
            Self::FixedPoint(x) => {
                let (record, next) = fixed_point::step(x, iter, cx)?;
                Ok((record, Self::FixedPoint(next)))
            }
        }
    }
}
