use radix_core::Evaluator;

use crate::{Failure, IterationRecord, Step};

use super::Context;

/// Substitutes `x` into `g`.
///
/// Values that are non-finite or beyond the magnitude ceiling stop the run
/// as diverging. Evaluator errors are still reported as evaluation failures.
pub(super) fn step<E: Evaluator>(
    x: f64,
    iter: usize,
    cx: &Context<'_, E>,
) -> Result<(IterationRecord, f64), Failure> {
    let gx = cx
        .f
        .raw(x)
        .map_err(|error| Failure::Evaluation { iter, x, error })?;

    if !gx.is_finite() || gx.abs() > cx.limits.ceiling() {
        return Err(Failure::Diverging { iter, x, value: gx });
    }

    let error = (gx - x).abs();
    let record = IterationRecord {
        iter,
        step: Step::FixedPoint { x, gx },
        error,
        converged: error < cx.tolerance,
    };
    Ok((record, gx))
}
