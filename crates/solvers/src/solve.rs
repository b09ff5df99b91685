use radix_core::{Differentiator, Evaluator, Observer};

use crate::{Failure, IterationRecord, MethodConfig, RunState, Status, ValidationError};

/// Events emitted while running to completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    /// A step appended a record.
    Stepped { record: &'a IterationRecord },

    /// The run reached a terminal status.
    Finished {
        status: Status,
        failure: Option<&'a Failure>,
    },
}

/// Actions an observer can take while running to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop stepping and return the run as it is, still running.
    StopEarly,
}

/// Prepares a run and advances it until it is terminal.
///
/// The observer receives [`Event::Stepped`] after each record and
/// [`Event::Finished`] once the run is terminal. Returning
/// [`Action::StopEarly`] from a `Stepped` event ends the loop without a
/// `Finished` event.
///
/// The records are exactly those produced by calling
/// [`RunState::advance`] repeatedly on a freshly prepared run.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the run cannot be prepared.
pub fn run_to_completion<E, Obs>(
    config: MethodConfig,
    evaluator: &E,
    mut observer: Obs,
) -> Result<RunState, ValidationError>
where
    E: Evaluator + Differentiator,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let mut state = RunState::prepare(config, evaluator)?;

    while !state.status().is_terminal() {
        if let Some(record) = state.advance(evaluator)
            && let Some(Action::StopEarly) = observer.observe(&Event::Stepped { record })
        {
            return Ok(state);
        }
    }

    let event = Event::Finished {
        status: state.status(),
        failure: state.failure(),
    };
    observer.observe(&event);

    Ok(state)
}

/// Prepares a run and advances it until it is terminal, without observation.
///
/// This is a convenience wrapper around [`run_to_completion`] that uses a
/// no-op observer.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the run cannot be prepared.
pub fn run_to_completion_unobserved<E>(
    config: MethodConfig,
    evaluator: &E,
) -> Result<RunState, ValidationError>
where
    E: Evaluator + Differentiator,
{
    run_to_completion(config, evaluator, ())
}
