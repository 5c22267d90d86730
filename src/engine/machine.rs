//! Shared state machine behind every driver.

use std::convert::Infallible;

use tracing::trace;

use super::{Operator, Phase, Step};

/// Result of pulling once from a source.
pub(crate) enum Pulled<T, E> {
    Item(T),
    End,
    Failed(E),
    Pending,
}

/// Result of advancing the machine.
pub(crate) enum Advance<O, E> {
    Ready(O),
    Failed(E),
    Pending,
    Done,
}

/// Lifecycle, source ownership and element counting for one traversal.
pub(crate) struct Machine<I, O: Operator> {
    phase: Phase,
    op: Option<O>,
    step: Option<O::Step>,
    source: Option<I>,
    index: usize,
    name: &'static str,
}

impl<I, O: Operator> Machine<I, O> {
    pub(crate) fn new(op: O) -> Self {
        let name = op.name();
        Self {
            phase: Phase::NotStarted,
            op: Some(op),
            step: None,
            source: None,
            index: 0,
            name,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn position(&self) -> usize {
        self.index
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn needs_len(&self) -> bool {
        self.op.as_ref().is_some_and(Operator::needs_len)
    }

    /// Take ownership of the source and create the step state.
    pub(crate) fn start(&mut self, source: I, len: Option<usize>) {
        let Some(op) = self.op.take() else {
            return;
        };
        self.step = Some(op.start(len));
        self.source = Some(source);
        self.phase = Phase::Scanning;
        trace!(operator = self.name, ?len, "source acquired");
    }

    /// Advance until an output is ready, the source fails, or the traversal ends.
    pub(crate) fn advance<E>(
        &mut self,
        mut pull: impl FnMut(&mut I) -> Pulled<O::Item, E>,
    ) -> Advance<O::Output, E> {
        loop {
            match self.phase {
                Phase::NotStarted | Phase::Exhausted => return Advance::Done,
                Phase::Scanning => {
                    let Some(step) = self.step.as_mut() else {
                        self.terminate();
                        return Advance::Done;
                    };
                    if let Some(out) = step.pending() {
                        return Advance::Ready(out);
                    }
                    if step.is_done() {
                        self.release();
                        continue;
                    }
                    let Some(source) = self.source.as_mut() else {
                        self.release();
                        continue;
                    };
                    match pull(source) {
                        Pulled::Item(item) => {
                            let index = self.index;
                            self.index += 1;
                            if let Some(out) = step.accept(index, item) {
                                return Advance::Ready(out);
                            }
                        }
                        Pulled::End => self.release(),
                        Pulled::Failed(err) => {
                            self.terminate();
                            return Advance::Failed(err);
                        }
                        Pulled::Pending => return Advance::Pending,
                    }
                }
                Phase::Draining => {
                    match self.step.as_mut().and_then(Step::finish) {
                        Some(out) => return Advance::Ready(out),
                        None => {
                            self.terminate();
                            return Advance::Done;
                        }
                    }
                }
            }
        }
    }

    /// Release the source and keep the step around for draining.
    fn release(&mut self) {
        self.source = None;
        self.phase = Phase::Draining;
        trace!(operator = self.name, examined = self.index, "source released");
    }

    /// Drop everything; safe to call repeatedly.
    pub(crate) fn terminate(&mut self) {
        if self.phase == Phase::Exhausted {
            return;
        }
        self.op = None;
        self.step = None;
        self.source = None;
        self.phase = Phase::Exhausted;
        trace!(operator = self.name, examined = self.index, "cursor exhausted");
    }
}

/// Pull from an infallible iterator.
pub(crate) fn pull_next<I: Iterator>(iter: &mut I) -> Pulled<I::Item, Infallible> {
    match iter.next() {
        Some(item) => Pulled::Item(item),
        None => Pulled::End,
    }
}

/// Run `op` over `source` to completion and collect every output.
///
/// This is the eager path: operators that need the total length get it from
/// a materialized copy of the source instead of a second enumeration.
pub fn collect<S, O>(source: S, op: O) -> Vec<O::Output>
where
    S: IntoIterator<Item = O::Item>,
    O: Operator,
{
    if op.needs_len() {
        let items: Vec<O::Item> = source.into_iter().collect();
        let len = items.len();
        run(items.into_iter(), op, Some(len))
    } else {
        run(source.into_iter(), op, None)
    }
}

fn run<I, O>(iter: I, op: O, len: Option<usize>) -> Vec<O::Output>
where
    I: Iterator<Item = O::Item>,
    O: Operator,
{
    let mut machine = Machine::new(op);
    machine.start(iter, len);
    let mut out = Vec::new();
    loop {
        match machine.advance(pull_next) {
            Advance::Ready(item) => out.push(item),
            Advance::Failed(never) => match never {},
            Advance::Pending | Advance::Done => return out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Evens;

    struct EvensStep;

    impl Step for EvensStep {
        type Item = u32;
        type Output = usize;

        fn accept(&mut self, index: usize, item: u32) -> Option<usize> {
            (item % 2 == 0).then_some(index)
        }
    }

    impl Operator for Evens {
        type Item = u32;
        type Output = usize;
        type Step = EvensStep;

        fn name(&self) -> &'static str {
            "evens"
        }

        fn start(self, _len: Option<usize>) -> EvensStep {
            EvensStep
        }
    }

    #[test]
    fn machine_counts_every_element() {
        let mut machine = Machine::new(Evens);
        machine.start(vec![1u32, 2, 3, 4].into_iter(), None);

        let mut found = Vec::new();
        while let Advance::Ready(i) = machine.advance(pull_next) {
            found.push(i);
        }

        assert_eq!(found, vec![1, 3]);
        assert_eq!(machine.position(), 4);
        assert_eq!(machine.phase(), Phase::Exhausted);
    }

    #[test]
    fn unstarted_machine_reports_done() {
        let mut machine: Machine<std::vec::IntoIter<u32>, Evens> = Machine::new(Evens);
        assert!(matches!(machine.advance(pull_next), Advance::Done));
        assert_eq!(machine.phase(), Phase::NotStarted);
    }

    #[test]
    fn failure_terminates() {
        let mut machine = Machine::new(Evens);
        machine.start(vec![2u32].into_iter(), None);
        let outcome = machine.advance(|_| Pulled::<u32, &str>::Failed("boom"));
        assert!(matches!(outcome, Advance::Failed("boom")));
        assert_eq!(machine.phase(), Phase::Exhausted);
        machine.terminate();
        assert_eq!(machine.phase(), Phase::Exhausted);
    }

    #[test]
    fn collect_runs_to_completion() {
        assert_eq!(collect(vec![2u32, 5, 8], Evens), vec![0, 2]);
    }
}
