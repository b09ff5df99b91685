use radix_core::Observer;

use crate::traits::{CanStopEarly, HasRecord};

/// Stops a run once a record's error drops below a threshold.
///
/// Useful for a looser, display-oriented tolerance on top of the run's own
/// convergence test. `min_iters` records are always taken first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopBelow {
    threshold: f64,
    min_iters: usize,
}

impl StopBelow {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            min_iters: 0,
        }
    }

    /// Requires at least `min_iters` records before stopping.
    #[must_use]
    pub fn min_iters(self, min_iters: usize) -> Self {
        Self { min_iters, ..self }
    }
}

impl<E: HasRecord, A: CanStopEarly> Observer<E, A> for StopBelow {
    fn observe(&mut self, event: &E) -> Option<A> {
        let record = event.record()?;
        (record.iter >= self.min_iters && record.error < self.threshold).then(A::stop_early)
    }
}
