use radix_core::Evaluator;

use crate::{Failure, IterationRecord, Step};

use super::Context;

pub(super) fn step<E: Evaluator>(
    x: f64,
    iter: usize,
    cx: &Context<'_, E>,
) -> Result<(IterationRecord, f64), Failure> {
    let derivative = cx
        .derivative
        .as_ref()
        .ok_or_else(|| Failure::DerivativeUnavailable {
            reason: "no derivative expression".to_string(),
        })?;

    let fx = cx.f.at(iter, x)?;
    let dfx = derivative.at(iter, x)?;
    if dfx.abs() < cx.limits.derivative_eps() {
        return Err(Failure::DerivativeNearZero {
            iter,
            x,
            derivative: dfx,
        });
    }

    let x_next = x - fx / dfx;
    let error = (x_next - x).abs();

    let record = IterationRecord {
        iter,
        step: Step::Newton {
            x,
            fx,
            dfx,
            x_next,
        },
        error,
        converged: error < cx.tolerance,
    };
    Ok((record, x_next))
}
