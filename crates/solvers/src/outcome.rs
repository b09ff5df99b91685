#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::{Failure, IterationRecord, Status};

/// A summary of a run, derived from its records and status.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct RunOutcome {
    pub status: Status,

    /// The last candidate, or `None` if the run failed or has no records.
    pub root: Option<f64>,

    /// Number of records.
    pub iters: usize,

    /// Error of the last record.
    pub final_error: Option<f64>,

    /// A stable description of the status.
    pub message: String,
}

impl RunOutcome {
    pub(crate) fn new(status: Status, records: &[IterationRecord], failure: Option<&Failure>) -> Self {
        let last = records.last();
        let iters = records.len();

        let message = match (status, failure) {
            (Status::Failed, Some(failure)) => failure.to_string(),
            (Status::Failed, None) => "run failed".to_string(),
            (Status::Converged, _) => format!("converged after {iters} iteration(s)"),
            (Status::MaxIters, _) => {
                format!("reached the iteration limit ({iters}) without meeting the tolerance")
            }
            (Status::Running, _) => format!("running, {iters} iteration(s) so far"),
        };

        Self {
            status,
            root: match status {
                Status::Failed => None,
                _ => last.map(IterationRecord::candidate),
            },
            iters,
            final_error: last.map(|record| record.error),
            message,
        }
    }
}
