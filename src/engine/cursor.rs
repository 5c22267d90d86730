//! Synchronous cursor over a re-enumerable source.

use std::fmt;
use std::iter::FusedIterator;

use super::machine::{pull_next, Advance, Machine};
use super::{measure, ForwardCursor, Operator, Phase};

/// Live, single-pass traversal of an operator over a source.
///
/// The source is acquired on the first call to [`Iterator::next`] and
/// released as soon as it is exhausted, when the operator needs no more
/// elements, on [`ForwardCursor::dispose`], or when the cursor is dropped.
pub struct Cursor<S, O>
where
    S: IntoIterator,
    O: Operator<Item = S::Item>,
{
    source: Option<S>,
    machine: Machine<S::IntoIter, O>,
}

impl<S, O> Cursor<S, O>
where
    S: IntoIterator + Clone,
    O: Operator<Item = S::Item>,
{
    /// Create a cursor in the [`Phase::NotStarted`] phase.
    pub fn new(source: S, op: O) -> Self {
        Self {
            source: Some(source),
            machine: Machine::new(op),
        }
    }

    fn acquire(&mut self) {
        let Some(source) = self.source.take() else {
            return;
        };
        let len = self
            .machine
            .needs_len()
            .then(|| measure(source.clone()));
        self.machine.start(source.into_iter(), len);
    }
}

impl<S, O> Iterator for Cursor<S, O>
where
    S: IntoIterator + Clone,
    O: Operator<Item = S::Item>,
{
    type Item = O::Output;

    fn next(&mut self) -> Option<Self::Item> {
        if self.machine.phase() == Phase::NotStarted {
            self.acquire();
        }
        match self.machine.advance(pull_next) {
            Advance::Ready(out) => Some(out),
            Advance::Failed(never) => match never {},
            Advance::Pending | Advance::Done => None,
        }
    }
}

impl<S, O> FusedIterator for Cursor<S, O>
where
    S: IntoIterator + Clone,
    O: Operator<Item = S::Item>,
{
}

impl<S, O> ForwardCursor for Cursor<S, O>
where
    S: IntoIterator,
    O: Operator<Item = S::Item>,
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

impl<S, O> fmt::Debug for Cursor<S, O>
where
    S: IntoIterator,
    O: Operator<Item = S::Item>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("operator", &self.machine.name())
            .field("phase", &self.machine.phase())
            .field("position", &self.machine.position())
            .finish()
    }
}
