use std::hash::Hash;

use super::Deferred;
use crate::config::PartitionConfig;
use crate::engine::Operator;
use crate::error::Result;
use crate::ops::{
    Appender, Chunker, Equals, Grouper, IndexFinder, IndexRemover, Inserter, LastIndices,
    Prepender, RangeRemover, RunGrouper, Splitter, Where,
};

/// Lazy sequence operations on any re-enumerable source.
///
/// Argument validation (zero counts, out-of-range removals) happens when the
/// method is called; everything else waits until the returned [`Deferred`]
/// is iterated.
pub trait DeferredExt: IntoIterator + Clone + Sized {
    /// Positions of elements equal to `target`.
    fn indices_of<U>(self, target: U) -> Deferred<Self, IndexFinder<Self::Item, Equals<U>>>
    where
        Self::Item: PartialEq<U>,
    {
        Deferred::new(self, IndexFinder::new(Equals(target)))
    }

    /// Positions of elements accepted by `predicate`.
    fn indices_where<F>(self, predicate: F) -> Deferred<Self, IndexFinder<Self::Item, Where<F>>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        Deferred::new(self, IndexFinder::new(Where(predicate)))
    }

    /// The first `count` positions of elements equal to `target`.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`](crate::SeqError::InvalidArgument) when `count` is zero.
    fn first_n_indices_of<U>(
        self,
        target: U,
        count: usize,
    ) -> Result<Deferred<Self, IndexFinder<Self::Item, Equals<U>>>>
    where
        Self::Item: PartialEq<U>,
    {
        Ok(Deferred::new(self, IndexFinder::first(Equals(target), count)?))
    }

    /// The first `count` positions of elements accepted by `predicate`.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`](crate::SeqError::InvalidArgument) when `count` is zero.
    fn first_n_indices_where<F>(
        self,
        predicate: F,
        count: usize,
    ) -> Result<Deferred<Self, IndexFinder<Self::Item, Where<F>>>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        Ok(Deferred::new(self, IndexFinder::first(Where(predicate), count)?))
    }

    /// The last `count` positions of elements equal to `target`, ascending.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`](crate::SeqError::InvalidArgument) when `count` is zero.
    fn last_n_indices_of<U>(
        self,
        target: U,
        count: usize,
    ) -> Result<Deferred<Self, LastIndices<Self::Item, Equals<U>>>>
    where
        Self::Item: PartialEq<U>,
    {
        Ok(Deferred::new(self, LastIndices::new(Equals(target), count)?))
    }

    /// The last `count` positions of elements accepted by `predicate`, ascending.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`](crate::SeqError::InvalidArgument) when `count` is zero.
    fn last_n_indices_where<F>(
        self,
        predicate: F,
        count: usize,
    ) -> Result<Deferred<Self, LastIndices<Self::Item, Where<F>>>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        Ok(Deferred::new(self, LastIndices::new(Where(predicate), count)?))
    }

    /// Chunks separated by elements equal to `separator`.
    fn split_by<U>(self, separator: U) -> Deferred<Self, Splitter<Self::Item, Equals<U>>>
    where
        Self::Item: PartialEq<U>,
    {
        Deferred::new(self, Splitter::new(Equals(separator)))
    }

    /// Chunks separated by elements accepted by `predicate`.
    fn split_when<F>(self, predicate: F) -> Deferred<Self, Splitter<Self::Item, Where<F>>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        Deferred::new(self, Splitter::new(Where(predicate)))
    }

    /// Chunks of `maximum_item_count` elements; the last may be shorter.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`](crate::SeqError::InvalidArgument) when `maximum_item_count` is zero.
    fn chunks_of(self, maximum_item_count: usize) -> Result<Deferred<Self, Chunker<Self::Item>>> {
        Ok(Deferred::new(self, Chunker::items(maximum_item_count)?))
    }

    /// About `parts` chunks of equal size; the source is measured when the
    /// traversal starts.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`](crate::SeqError::InvalidArgument) when `parts` is zero.
    fn split_into(self, parts: usize) -> Result<Deferred<Self, Chunker<Self::Item>>> {
        Ok(Deferred::new(self, Chunker::parts(parts)?))
    }

    /// One chunk per configured partition.
    fn split_per_worker(self, config: &PartitionConfig) -> Deferred<Self, Chunker<Self::Item>> {
        Deferred::new(self, Chunker::with_size(config.chunk_size()))
    }

    /// The source with `items` inserted before position `at`; appended when
    /// `at` is past the end.
    fn insert_range<J>(self, at: usize, items: J) -> Deferred<Self, Inserter<Self::Item, J>>
    where
        J: IntoIterator<Item = Self::Item>,
    {
        Deferred::new(self, Inserter::new(at, items))
    }

    /// The source followed by `items`.
    fn append_range<J>(self, items: J) -> Deferred<Self, Appender<Self::Item, J>>
    where
        J: IntoIterator<Item = Self::Item>,
    {
        Deferred::new(self, Appender::new(items))
    }

    /// `items` followed by the source.
    fn prepend_range<J>(self, items: J) -> Deferred<Self, Prepender<Self::Item, J>>
    where
        J: IntoIterator<Item = Self::Item>,
    {
        Deferred::new(self, Prepender::new(items))
    }

    /// The source without the elements at `indices`. Positions past the end
    /// are ignored.
    fn remove_indices<R>(self, indices: R) -> Deferred<Self, IndexRemover<Self::Item>>
    where
        R: IntoIterator<Item = usize>,
    {
        Deferred::new(self, IndexRemover::new(indices))
    }

    /// The source without `count` elements starting at `start`.
    ///
    /// # Errors
    ///
    /// [`SeqError::OutOfRange`](crate::SeqError::OutOfRange) when the range reaches past the source length.
    fn remove_range(
        self,
        start: usize,
        count: usize,
    ) -> Result<Deferred<Self, RangeRemover<Self::Item>>>
    where
        Self::IntoIter: ExactSizeIterator,
    {
        let len = self.clone().into_iter().len();
        Ok(Deferred::new(self, RangeRemover::new(start, count, len)?))
    }

    /// Groups of elements sharing a key, in order of first key occurrence.
    fn group_by<K, F>(self, key: F) -> Deferred<Self, Grouper<Self::Item, F>>
    where
        F: FnMut(&Self::Item) -> K,
        K: Hash + Eq + Clone,
    {
        Deferred::new(self, Grouper::new(key))
    }

    /// Runs of consecutive elements sharing a key.
    fn group_runs_by<K, F>(self, key: F) -> Deferred<Self, RunGrouper<Self::Item, F>>
    where
        F: FnMut(&Self::Item) -> K,
        K: PartialEq,
    {
        Deferred::new(self, RunGrouper::new(key))
    }

    /// Apply any operator.
    fn apply<O>(self, op: O) -> Deferred<Self, O>
    where
        O: Operator<Item = Self::Item>,
    {
        Deferred::new(self, op)
    }
}

impl<S: IntoIterator + Clone> DeferredExt for S {}
