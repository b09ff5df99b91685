use radix_core::Evaluator;

use crate::{Failure, IterationRecord, Limits, Step, ValidationError, evaluate::Function};

use super::Context;

/// Below this magnitude the relative error is reported as zero.
const RELATIVE_FLOOR: f64 = 1e-12;

/// The two most recent points of a secant run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Window {
    pub(crate) x_prev: f64,
    pub(crate) x_curr: f64,
    pub(crate) f_prev: f64,
    pub(crate) f_curr: f64,
}

impl Window {
    /// Evaluates both seeds.
    ///
    /// The outer error rejects the seeds; the inner one reports a seed that
    /// could not be evaluated.
    pub(crate) fn prepare<E: Evaluator>(
        seeds: [f64; 2],
        f: &Function<'_, E>,
        limits: &Limits,
    ) -> Result<Result<Self, Failure>, ValidationError> {
        let [x0, x1] = seeds;
        if !x0.is_finite() || !x1.is_finite() {
            return Err(ValidationError::NonFiniteStart);
        }
        if (x1 - x0).abs() < limits.seed_eps() {
            return Err(ValidationError::EqualSeeds);
        }

        let f0 = match f.at(0, x0) {
            Ok(value) => value,
            Err(failure) => return Ok(Err(failure)),
        };
        let f1 = match f.at(0, x1) {
            Ok(value) => value,
            Err(failure) => return Ok(Err(failure)),
        };
        if (f1 - f0).abs() < limits.slope_eps() {
            return Err(ValidationError::FlatSeeds(f0));
        }

        Ok(Ok(Self {
            x_prev: x0,
            x_curr: x1,
            f_prev: f0,
            f_curr: f1,
        }))
    }

    pub(super) fn step<E: Evaluator>(
        self,
        iter: usize,
        cx: &Context<'_, E>,
    ) -> Result<(IterationRecord, Self), Failure> {
        let Self {
            x_prev,
            x_curr,
            f_prev,
            f_curr,
        } = self;

        let slope = (f_curr - f_prev) / (x_curr - x_prev);
        // Written to also catch a NaN slope.
        if !(slope.abs() >= cx.limits.slope_eps()) {
            return Err(Failure::SlopeNearZero { iter, slope });
        }

        let x_next = x_curr - f_curr / slope;
        let f_next = cx.f.at(iter, x_next)?;

        let error = (x_next - x_curr).abs();
        let relative_error = if x_next.abs() > RELATIVE_FLOOR {
            error / x_next.abs() * 100.0
        } else {
            0.0
        };

        let record = IterationRecord {
            iter,
            step: Step::Secant {
                x_prev,
                x_curr,
                f_prev,
                f_curr,
                slope,
                x_next,
                f_next,
                relative_error,
            },
            error,
            converged: f_next.abs() < cx.tolerance || error < cx.tolerance,
        };
        let next = Self {
            x_prev: x_curr,
            x_curr: x_next,
            f_prev: f_curr,
            f_curr: f_next,
        };
        Ok((record, next))
    }
}
