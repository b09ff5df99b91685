/// Watches the events of a run and may answer with an action.
///
/// A driver such as `run_to_completion` calls [`observe`](Self::observe)
/// after each step. Returning `None` lets the run carry on; `Some(action)`
/// asks the driver to act, for example to stop before the run is terminal.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is one
/// that never acts. Stateful observers that should outlive a run are driven
/// through a closure that borrows them.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Action {
        Stop,
    }

    fn drive<Obs: Observer<usize, Action>>(mut observer: Obs, events: usize) -> usize {
        for event in 1..=events {
            if observer.observe(&event).is_some() {
                return event;
            }
        }
        events
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 5), 5);
    }

    #[test]
    fn closure_observer_can_stop() {
        let mut seen = Vec::new();
        let stopped = drive(
            |event: &usize| {
                seen.push(*event);
                (*event == 3).then_some(Action::Stop)
            },
            10,
        );

        assert_eq!(stopped, 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
