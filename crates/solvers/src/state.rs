use radix_core::{Differentiator, Evaluator};
use thiserror::Error;

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::{
    Failure, IterationRecord, Method, MethodConfig, RunOutcome, ValidationError,
    evaluate::Function,
    method::{Bracket, Context, Iterate, Rule, Window},
};

/// The status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum Status {
    /// More steps can be taken.
    Running,

    /// The last record met the tolerance.
    Converged,

    /// The iteration budget is used up without meeting the tolerance.
    MaxIters,

    /// A step (or the preparation) failed; see [`RunState::failure`].
    Failed,
}

impl Status {
    /// Returns true for every status except [`Status::Running`].
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

/// Returned by [`RunState::jump_to`] and [`RunState::seek`] for an index past the records.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("index {index} is out of range for {len} record(s)")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// A run that can be advanced one step at a time and navigated backward.
///
/// The state keeps one [`Iterate`] per record plus the starting one, so
/// rewinding never recomputes anything. Status is derived from the records:
/// a failure overrides everything, then a converged last record, then an
/// exhausted budget.
///
/// The cursor counts the records currently shown, from `0` (none) to
/// `records().len()`. Stepping moves it to the end; [`previous`](Self::previous),
/// [`next`](Self::next) and [`seek`](Self::seek) move it without touching
/// the records.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    config: MethodConfig,
    derivative: Option<String>,
    records: Vec<IterationRecord>,
    frontier: Vec<Iterate>,
    failure: Option<Failure>,
    cursor: usize,
}

impl RunState {
    /// Prepares a run: validates the method's starting values and evaluates
    /// whatever the first step needs.
    ///
    /// Newton-Raphson runs without a derivative expression get one from the
    /// differentiator here, once. If an endpoint, seed, or the derivative
    /// cannot be computed the run is returned already [`Status::Failed`]
    /// with no records.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for non-finite or degenerate starting
    /// values, a bracket without a sign change, or seeds with equal values.
    pub fn prepare<E>(config: MethodConfig, evaluator: &E) -> Result<Self, ValidationError>
    where
        E: Evaluator + Differentiator,
    {
        let f = Function::new(evaluator, config.expression());
        let mut derivative = None;

        let start = match config.method() {
            Method::Bisection { bounds } => {
                Bracket::prepare(*bounds, &f)?.map(|b| Iterate::Bracket(b, Rule::Midpoint))
            }
            Method::RegulaFalsi { bounds } => {
                Bracket::prepare(*bounds, &f)?.map(|b| Iterate::Bracket(b, Rule::FalsePosition))
            }
            Method::Secant { seeds } => {
                Window::prepare(*seeds, &f, config.limits())?.map(Iterate::Secant)
            }
            Method::NewtonRaphson {
                initial_guess,
                derivative: given,
            } => {
                check_start(*initial_guess)?;
                let derived = match given {
                    Some(expression) => Ok(expression.clone()),
                    None => evaluator
                        .differentiate(config.expression(), "x")
                        .map_err(|error| Failure::DerivativeUnavailable {
                            reason: error.to_string(),
                        }),
                };
                derived.map(|expression| {
                    derivative = Some(expression);
                    Iterate::Newton(*initial_guess)
                })
            }
            Method::FixedPoint { initial_guess } => {
                check_start(*initial_guess)?;
                Ok(Iterate::FixedPoint(*initial_guess))
            }
        };

        let (frontier, failure) = match start {
            Ok(iterate) => (vec![iterate], None),
            Err(failure) => (Vec::new(), Some(failure)),
        };

        Ok(Self {
            config,
            derivative,
            records: Vec::new(),
            frontier,
            failure,
            cursor: 0,
        })
    }

    /// Takes one step.
    ///
    /// Returns the new record, or `None` if the run was already terminal or
    /// the step failed. A failed step appends nothing and leaves the run
    /// [`Status::Failed`].
    pub fn advance<E: Evaluator>(&mut self, evaluator: &E) -> Option<&IterationRecord> {
        if self.status().is_terminal() {
            return None;
        }
        let &from = self.frontier.last()?;

        let cx = Context {
            f: Function::new(evaluator, self.config.expression()),
            derivative: self
                .derivative
                .as_deref()
                .map(|expression| Function::new(evaluator, expression)),
            tolerance: self.config.tolerance(),
            limits: *self.config.limits(),
        };

        match from.step(self.records.len() + 1, &cx) {
            Ok((record, next)) => {
                self.records.push(record);
                self.frontier.push(next);
                self.cursor = self.records.len();
                self.records.last()
            }
            Err(failure) => {
                self.failure = Some(failure);
                self.cursor = self.records.len();
                None
            }
        }
    }

    /// Undoes the last [`advance`](Self::advance).
    ///
    /// Clears a step failure if there is one, otherwise drops the last
    /// record. With no records left this is the freshly prepared run. A run
    /// that failed during preparation has nothing to undo.
    pub fn rewind(&mut self) {
        if self.frontier.is_empty() {
            return;
        }
        if self.failure.take().is_none() && self.records.pop().is_some() {
            self.frontier.pop();
        }
        self.cursor = self.cursor.min(self.records.len());
    }

    /// Truncates the run to the records up to and including `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] and leaves the run unchanged if `index` is not
    /// the index of an existing record.
    pub fn jump_to(&mut self, index: usize) -> Result<(), OutOfRange> {
        let len = self.records.len();
        if index >= len {
            return Err(OutOfRange { index, len });
        }
        self.records.truncate(index + 1);
        self.frontier.truncate(index + 2);
        self.failure = None;
        self.cursor = self.cursor.min(self.records.len());
        Ok(())
    }

    /// Moves the cursor back one record, returning the record now current.
    pub fn previous(&mut self) -> Option<&IterationRecord> {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    /// Moves the cursor forward one computed record, returning it.
    ///
    /// Never computes a new step; returns `None` at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&IterationRecord> {
        if self.cursor == self.records.len() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    /// Places the cursor so that `count` records are shown.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `count` exceeds the number of records.
    pub fn seek(&mut self, count: usize) -> Result<(), OutOfRange> {
        let len = self.records.len();
        if count > len {
            return Err(OutOfRange { index: count, len });
        }
        self.cursor = count;
        Ok(())
    }

    /// Returns the last record shown by the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&IterationRecord> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.records.get(index))
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn status(&self) -> Status {
        if self.failure.is_some() {
            Status::Failed
        } else if self.records.last().is_some_and(|record| record.converged) {
            Status::Converged
        } else if self.records.len() >= self.config.effective_max_iters() {
            Status::MaxIters
        } else {
            Status::Running
        }
    }

    #[must_use]
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    #[must_use]
    pub fn config(&self) -> &MethodConfig {
        &self.config
    }

    /// Returns the derivative expression used by a Newton-Raphson run.
    #[must_use]
    pub fn derivative(&self) -> Option<&str> {
        self.derivative.as_deref()
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// Returns the error of every record, in order.
    #[must_use]
    pub fn errors(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.error).collect()
    }

    /// Returns the bracket width after every record, for bracketing methods.
    ///
    /// Empty for other methods.
    #[must_use]
    pub fn widths(&self) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(IterationRecord::width)
            .collect()
    }

    /// Summarizes the run as it stands.
    #[must_use]
    pub fn outcome(&self) -> RunOutcome {
        RunOutcome::new(self.status(), &self.records, self.failure.as_ref())
    }
}

fn check_start(x0: f64) -> Result<(), ValidationError> {
    if x0.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteStart)
    }
}
