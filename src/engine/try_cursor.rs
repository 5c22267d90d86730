//! Cursor over a fallible source.

use std::fmt;
use std::iter::FusedIterator;

use super::machine::{Advance, Machine, Pulled};
use super::{measure, ForwardCursor, Operator, Phase};

/// Cursor over a source yielding `Result<T, E>`.
///
/// Successful elements are fed to the operator; the first `Err` releases the
/// source and the operator state, is handed to the caller, and leaves the
/// cursor exhausted. Outputs are wrapped in `Ok`.
pub struct TryCursor<S, O>
where
    S: IntoIterator,
    O: Operator,
{
    source: Option<S>,
    machine: Machine<S::IntoIter, O>,
}

impl<S, O, E> TryCursor<S, O>
where
    S: IntoIterator<Item = Result<O::Item, E>> + Clone,
    O: Operator,
{
    /// Create a cursor in the [`Phase::NotStarted`] phase.
    pub fn new(source: S, op: O) -> Self {
        Self {
            source: Some(source),
            machine: Machine::new(op),
        }
    }
}

impl<S, O, E> Iterator for TryCursor<S, O>
where
    S: IntoIterator<Item = Result<O::Item, E>> + Clone,
    O: Operator,
{
    type Item = Result<O::Output, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.machine.phase() == Phase::NotStarted {
            if let Some(source) = self.source.take() {
                let len = self
                    .machine
                    .needs_len()
                    .then(|| measure(source.clone()));
                self.machine.start(source.into_iter(), len);
            }
        }
        let outcome = self.machine.advance(|iter| match iter.next() {
            Some(Ok(item)) => Pulled::Item(item),
            Some(Err(err)) => Pulled::Failed(err),
            None => Pulled::End,
        });
        match outcome {
            Advance::Ready(out) => Some(Ok(out)),
            Advance::Failed(err) => Some(Err(err)),
            Advance::Pending | Advance::Done => None,
        }
    }
}

impl<S, O, E> FusedIterator for TryCursor<S, O>
where
    S: IntoIterator<Item = Result<O::Item, E>> + Clone,
    O: Operator,
{
}

impl<S, O> ForwardCursor for TryCursor<S, O>
where
    S: IntoIterator,
    O: Operator,
{
    fn phase(&self) -> Phase {
        self.machine.phase()
    }

    fn position(&self) -> usize {
        self.machine.position()
    }

    fn dispose(&mut self) {
        self.source = None;
        self.machine.terminate();
    }
}

impl<S, O> fmt::Debug for TryCursor<S, O>
where
    S: IntoIterator,
    O: Operator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryCursor")
            .field("operator", &self.machine.name())
            .field("phase", &self.machine.phase())
            .field("position", &self.machine.position())
            .finish()
    }
}
