//! Deferred (lazy) sequences.
//!
//! A [`Deferred`] pairs a re-enumerable source with an operator and does no
//! work until it is iterated. Every iteration clones both and runs a fresh
//! [`Cursor`], so iterating twice yields the same elements as long as the
//! source itself is stable.
//!
//! ```
//! use seqops::prelude::*;
//!
//! let words = ["a", "b", "a", "c", "a"];
//! let found = words.indices_of("a");
//! assert_eq!(found.iter().collect::<Vec<_>>(), vec![0, 2, 4]);
//! assert_eq!(found.iter().count(), 3);
//! ```

mod ext;

pub use ext::DeferredExt;

use std::fmt;

use crate::engine::{Cursor, Operator, TryCursor};

/// Lazy application of an operator to a re-enumerable source.
#[derive(Clone)]
pub struct Deferred<S, O> {
    source: S,
    op: O,
}

impl<S, O> Deferred<S, O>
where
    S: IntoIterator + Clone,
    O: Operator<Item = S::Item>,
{
    /// Defer `op` over `source`.
    pub fn new(source: S, op: O) -> Self {
        Self { source, op }
    }

    /// Start a new traversal.
    pub fn iter(&self) -> Cursor<S, O>
    where
        O: Clone,
    {
        Cursor::new(self.source.clone(), self.op.clone())
    }

    /// The operator applied on each traversal.
    pub fn operator(&self) -> &O {
        &self.op
    }

    /// Split back into source and operator.
    pub fn into_parts(self) -> (S, O) {
        (self.source, self.op)
    }
}

impl<S, O> IntoIterator for Deferred<S, O>
where
    S: IntoIterator + Clone,
    O: Operator<Item = S::Item>,
{
    type Item = O::Output;
    type IntoIter = Cursor<S, O>;

    fn into_iter(self) -> Self::IntoIter {
        Cursor::new(self.source, self.op)
    }
}

impl<'a, S, O> IntoIterator for &'a Deferred<S, O>
where
    S: IntoIterator + Clone,
    O: Operator<Item = S::Item> + Clone,
{
    type Item = O::Output;
    type IntoIter = Cursor<S, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S, O: Operator> fmt::Debug for Deferred<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("operator", &self.op.name())
            .finish_non_exhaustive()
    }
}

/// Lazy application of an operator to a source yielding `Result<T, E>`.
///
/// Each traversal is a [`TryCursor`]: outputs come wrapped in `Ok`, and the
/// first source error ends the traversal.
#[derive(Clone)]
pub struct TryDeferred<S, O> {
    source: S,
    op: O,
}

impl<S, O, E> TryDeferred<S, O>
where
    S: IntoIterator<Item = Result<O::Item, E>> + Clone,
    O: Operator,
{
    /// Defer `op` over the fallible `source`.
    pub fn new(source: S, op: O) -> Self {
        Self { source, op }
    }

    /// Start a new traversal.
    pub fn iter(&self) -> TryCursor<S, O>
    where
        O: Clone,
    {
        TryCursor::new(self.source.clone(), self.op.clone())
    }

    /// Run one traversal to completion.
    ///
    /// # Errors
    ///
    /// The first error produced by the source.
    pub fn try_collect(&self) -> Result<Vec<O::Output>, E>
    where
        O: Clone,
    {
        self.iter().collect()
    }
}

impl<S, O, E> IntoIterator for TryDeferred<S, O>
where
    S: IntoIterator<Item = Result<O::Item, E>> + Clone,
    O: Operator,
{
    type Item = Result<O::Output, E>;
    type IntoIter = TryCursor<S, O>;

    fn into_iter(self) -> Self::IntoIter {
        TryCursor::new(self.source, self.op)
    }
}

impl<S, O: Operator> fmt::Debug for TryDeferred<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryDeferred")
            .field("operator", &self.op.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::engine::{ForwardCursor, Phase};
    use crate::error::SeqError;
    use crate::ops::{Chunker, Equals, IndexFinder};

    #[test]
    fn nothing_runs_until_iterated() {
        let calls = Cell::new(0);
        let counted = [1, 2, 3].iter().inspect(|_| calls.set(calls.get() + 1));
        let deferred = Deferred::new(counted, IndexFinder::new(Equals(&2)));
        assert_eq!(calls.get(), 0);
        assert_eq!(deferred.iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn every_traversal_starts_fresh() {
        let deferred = Deferred::new(vec![4, 1, 4], IndexFinder::new(Equals(4)));
        let first: Vec<usize> = deferred.iter().collect();
        let second: Vec<usize> = (&deferred).into_iter().collect();
        assert_eq!(first, vec![0, 2]);
        assert_eq!(first, second);
    }

    #[test]
    fn cursor_walks_the_lifecycle() {
        let deferred = Deferred::new(0..4, Chunker::items(2).unwrap());
        let mut cursor = deferred.iter();
        assert_eq!(cursor.phase(), Phase::NotStarted);
        assert_eq!(cursor.next(), Some(vec![0, 1]));
        assert_eq!(cursor.phase(), Phase::Scanning);
        assert_eq!(cursor.next(), Some(vec![2, 3]));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.phase(), Phase::Exhausted);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.reset(), Err(SeqError::Unsupported { operation: "reset" }));
    }

    #[test]
    fn try_deferred_stops_at_the_first_error() {
        let source = vec![Ok(1), Ok(2), Err("bad read"), Ok(2)];
        let deferred = TryDeferred::new(source, IndexFinder::new(Equals(2)));
        let mut cursor = deferred.iter();
        assert_eq!(cursor.next(), Some(Ok(1)));
        assert_eq!(cursor.next(), Some(Err("bad read")));
        assert_eq!(cursor.phase(), Phase::Exhausted);
        assert_eq!(cursor.next(), None);
        assert_eq!(deferred.try_collect(), Err("bad read"));
    }
}
