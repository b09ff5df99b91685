//! Capability traits for generic observers.
//!
//! These traits abstract over event and action types so an observer can be
//! written once and reused by any driver that emits compatible events.
//!
//! # Example
//!
//! ```rust
//! use radix_core::Observer;
//! use radix_observers::traits::{CanStopEarly, HasRecord};
//!
//! /// Stops after a fixed number of records.
//! struct StopAfter(usize);
//!
//! impl<E: HasRecord, A: CanStopEarly> Observer<E, A> for StopAfter {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         let record = event.record()?;
//!         (record.iter >= self.0).then(A::stop_early)
//!     }
//! }
//! ```

use radix_solvers::{Action, Event, Failure, IterationRecord, Status};

/// An event that may carry a new iteration record.
pub trait HasRecord {
    /// Returns the record, or `None` for events without one.
    fn record(&self) -> Option<&IterationRecord>;
}

/// An event that may report a terminal status.
pub trait HasStatus {
    /// Returns the terminal status, or `None` while the run continues.
    fn status(&self) -> Option<Status>;

    /// Returns the failure behind a [`Status::Failed`] status.
    fn failure(&self) -> Option<&Failure>;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the run early.
    fn stop_early() -> Self;
}

impl HasRecord for Event<'_> {
    fn record(&self) -> Option<&IterationRecord> {
        match self {
            Event::Stepped { record } => Some(*record),
            Event::Finished { .. } => None,
        }
    }
}

impl HasStatus for Event<'_> {
    fn status(&self) -> Option<Status> {
        match self {
            Event::Stepped { .. } => None,
            Event::Finished { status, .. } => Some(*status),
        }
    }

    fn failure(&self) -> Option<&Failure> {
        match self {
            Event::Stepped { .. } => None,
            Event::Finished { failure, .. } => *failure,
        }
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
