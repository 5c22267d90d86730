//! Immediate (eager) companions of the deferred operations.
//!
//! [`ImmediateExt`] runs the same operators as
//! [`DeferredExt`](crate::deferred::DeferredExt) to completion and returns
//! owned results. The two traits share method names, so import only one of
//! them in a given scope:
//!
//! ```
//! use seqops::immediate::ImmediateExt;
//!
//! let chunks = (1..=7).chunks_of(3).unwrap();
//! assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
//! assert_eq!(vec![3, 1, 4].first_where(|x| *x > 2), Ok(3));
//! ```

use std::hash::Hash;

use crate::config::PartitionConfig;
use crate::engine::{collect, Operator};
use crate::error::{Result, SeqError};
use crate::ops::{
    Appender, Chunker, Equals, Grouper, Grouping, IndexFinder, IndexRemover, Inserter,
    LastIndices, Prepender, RangeRemover, RunGrouper, Splitter, Where,
};

/// Eager sequence operations on any source.
pub trait ImmediateExt: IntoIterator + Sized {
    /// Positions of elements equal to `target`.
    fn indices_of<U>(self, target: U) -> Vec<usize>
    where
        Self::Item: PartialEq<U>,
    {
        collect(self, IndexFinder::new(Equals(target)))
    }

    /// Positions of elements accepted by `predicate`.
    fn indices_where<F>(self, predicate: F) -> Vec<usize>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        collect(self, IndexFinder::new(Where(predicate)))
    }

    /// The first `count` positions of elements equal to `target`.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `count` is zero.
    fn first_n_indices_of<U>(self, target: U, count: usize) -> Result<Vec<usize>>
    where
        Self::Item: PartialEq<U>,
    {
        Ok(collect(self, IndexFinder::first(Equals(target), count)?))
    }

    /// The first `count` positions of elements accepted by `predicate`.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `count` is zero.
    fn first_n_indices_where<F>(self, predicate: F, count: usize) -> Result<Vec<usize>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        Ok(collect(self, IndexFinder::first(Where(predicate), count)?))
    }

    /// The last `count` positions of elements equal to `target`, ascending.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `count` is zero.
    fn last_n_indices_of<U>(self, target: U, count: usize) -> Result<Vec<usize>>
    where
        Self::Item: PartialEq<U>,
    {
        Ok(collect(self, LastIndices::new(Equals(target), count)?))
    }

    /// The last `count` positions of elements accepted by `predicate`, ascending.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `count` is zero.
    fn last_n_indices_where<F>(self, predicate: F, count: usize) -> Result<Vec<usize>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        Ok(collect(self, LastIndices::new(Where(predicate), count)?))
    }

    /// Chunks separated by elements equal to `separator`.
    fn split_by<U>(self, separator: U) -> Vec<Vec<Self::Item>>
    where
        Self::Item: PartialEq<U>,
    {
        collect(self, Splitter::new(Equals(separator)))
    }

    /// Chunks separated by elements accepted by `predicate`.
    fn split_when<F>(self, predicate: F) -> Vec<Vec<Self::Item>>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        collect(self, Splitter::new(Where(predicate)))
    }

    /// Chunks of `maximum_item_count` elements; the last may be shorter.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `maximum_item_count` is zero.
    fn chunks_of(self, maximum_item_count: usize) -> Result<Vec<Vec<Self::Item>>> {
        Ok(collect(self, Chunker::items(maximum_item_count)?))
    }

    /// About `parts` chunks of equal size.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `parts` is zero.
    fn split_into(self, parts: usize) -> Result<Vec<Vec<Self::Item>>> {
        Ok(collect(self, Chunker::parts(parts)?))
    }

    /// One chunk per configured partition.
    fn split_per_worker(self, config: &PartitionConfig) -> Vec<Vec<Self::Item>> {
        collect(self, Chunker::with_size(config.chunk_size()))
    }

    /// The source with `items` inserted before position `at`.
    fn insert_range<J>(self, at: usize, items: J) -> Vec<Self::Item>
    where
        J: IntoIterator<Item = Self::Item>,
    {
        collect(self, Inserter::new(at, items))
    }

    /// The source followed by `items`.
    fn append_range<J>(self, items: J) -> Vec<Self::Item>
    where
        J: IntoIterator<Item = Self::Item>,
    {
        collect(self, Appender::new(items))
    }

    /// `items` followed by the source.
    fn prepend_range<J>(self, items: J) -> Vec<Self::Item>
    where
        J: IntoIterator<Item = Self::Item>,
    {
        collect(self, Prepender::new(items))
    }

    /// The source without the elements at `indices`.
    fn remove_indices<R>(self, indices: R) -> Vec<Self::Item>
    where
        R: IntoIterator<Item = usize>,
    {
        collect(self, IndexRemover::new(indices))
    }

    /// The source without `count` elements starting at `start`.
    ///
    /// # Errors
    ///
    /// [`SeqError::OutOfRange`] when the range reaches past the source length.
    fn remove_range(self, start: usize, count: usize) -> Result<Vec<Self::Item>>
    where
        Self::IntoIter: ExactSizeIterator,
    {
        let iter = self.into_iter();
        let remover = RangeRemover::new(start, count, iter.len())?;
        Ok(collect(iter, remover))
    }

    /// Groups of elements sharing a key, in order of first key occurrence.
    fn group_by<K, F>(self, key: F) -> Vec<Grouping<K, Self::Item>>
    where
        F: FnMut(&Self::Item) -> K,
        K: Hash + Eq + Clone,
    {
        collect(self, Grouper::new(key))
    }

    /// Runs of consecutive elements sharing a key.
    fn group_runs_by<K, F>(self, key: F) -> Vec<Grouping<K, Self::Item>>
    where
        F: FnMut(&Self::Item) -> K,
        K: PartialEq,
    {
        collect(self, RunGrouper::new(key))
    }

    /// Run any operator to completion.
    fn apply<O>(self, op: O) -> Vec<O::Output>
    where
        O: Operator<Item = Self::Item>,
    {
        collect(self, op)
    }

    /// First element accepted by `predicate`.
    ///
    /// # Errors
    ///
    /// [`SeqError::NotFound`] when no element matches.
    fn first_where<F>(self, predicate: F) -> Result<Self::Item>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        self.first_where_or_none(predicate).ok_or(SeqError::NotFound)
    }

    /// First element accepted by `predicate`, or the default value.
    fn first_where_or_default<F>(self, predicate: F) -> Self::Item
    where
        F: FnMut(&Self::Item) -> bool,
        Self::Item: Default,
    {
        self.first_where_or_none(predicate).unwrap_or_default()
    }

    /// First element accepted by `predicate`, if any.
    fn first_where_or_none<F>(self, predicate: F) -> Option<Self::Item>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        self.into_iter().find(predicate)
    }

    /// Position of the first element equal to `target`.
    fn index_of<U>(self, target: U) -> Option<usize>
    where
        Self::Item: PartialEq<U>,
    {
        self.into_iter().position(|item| item == target)
    }

    /// Elements in reverse order.
    fn reversed(self) -> Vec<Self::Item> {
        let mut items: Vec<Self::Item> = self.into_iter().collect();
        items.reverse();
        items
    }
}

impl<S: IntoIterator> ImmediateExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&[1, 2, 1, 3], 1 => vec![0, 2]; "repeated target")]
    #[test_case(&[1, 2, 3], 9 => Vec::<usize>::new(); "absent target")]
    #[test_case(&[], 1 => Vec::<usize>::new(); "empty source")]
    fn indices_of_values(source: &[i32], target: i32) -> Vec<usize> {
        source.iter().copied().indices_of(target)
    }

    #[test_case(10, 3 => vec![3, 3, 3, 1]; "remainder chunk")]
    #[test_case(9, 3 => vec![3, 3, 3]; "exact multiple")]
    #[test_case(2, 5 => vec![2]; "single short chunk")]
    #[test_case(0, 4 => Vec::<usize>::new(); "empty source")]
    fn chunk_sizes(len: u32, size: usize) -> Vec<usize> {
        (0..len)
            .chunks_of(size)
            .unwrap()
            .iter()
            .map(Vec::len)
            .collect()
    }

    #[test_case(10, 4 => vec![3, 3, 3, 1]; "ten into four")]
    #[test_case(10, 5 => vec![2, 2, 2, 2, 2]; "ten into five")]
    #[test_case(3, 5 => vec![1, 1, 1]; "fewer items than parts")]
    fn split_into_parts(len: u32, parts: usize) -> Vec<usize> {
        (0..len)
            .filter(|_| true)
            .split_into(parts)
            .unwrap()
            .iter()
            .map(Vec::len)
            .collect()
    }

    #[test]
    fn first_where_variants() {
        let values = vec![2, 7, 4, 9];
        assert_eq!(values.clone().first_where(|x| *x > 5), Ok(7));
        assert_eq!(values.clone().first_where(|x| *x > 50), Err(SeqError::NotFound));
        assert_eq!(values.clone().first_where_or_default(|x| *x > 50), 0);
        assert_eq!(values.first_where_or_none(|x| x % 2 == 1), Some(7));
    }

    #[test]
    fn index_of_and_reversed() {
        assert_eq!("hello".chars().index_of('l'), Some(2));
        assert_eq!("hello".chars().index_of('z'), None);
        assert_eq!(vec![1, 2, 3].reversed(), vec![3, 2, 1]);
    }

    #[test]
    fn insert_then_remove_restores_the_source() {
        let source = vec![1, 2, 3, 4];
        let grown = source.clone().insert_range(2, vec![8, 9]);
        assert_eq!(grown, vec![1, 2, 8, 9, 3, 4]);
        assert_eq!(grown.clone().remove_range(2, 2).unwrap(), source);
        assert_eq!(grown.remove_indices([2, 3]), source);
    }

    #[test]
    fn remove_range_is_validated_before_running() {
        assert_eq!(
            vec![1, 2, 3].remove_range(2, 2),
            Err(SeqError::OutOfRange { index: 4, len: 3 })
        );
    }

    #[test]
    fn grouping_by_length() {
        let words = ["ox", "cat", "by", "dog", "a"];
        let groups = words.group_by(|w| w.len());
        let keys: Vec<usize> = groups.iter().map(|g| *g.key()).collect();
        assert_eq!(keys, vec![2, 3, 1]);
        assert_eq!(groups[1].items(), &["cat", "dog"]);
    }
}
