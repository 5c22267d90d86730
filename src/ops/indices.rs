//! Index finding: positions where elements satisfy a predicate or equal a target.

use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

use crate::engine::{Operator, Step};
use crate::error::{Result, SeqError};

/// Decides whether a source element matches.
pub trait Matcher<T> {
    /// Whether `item` matches.
    fn matches(&mut self, item: &T) -> bool;
}

/// Matches elements accepted by a predicate.
#[derive(Clone, Copy)]
pub struct Where<F>(pub F);

impl<T, F> Matcher<T> for Where<F>
where
    F: FnMut(&T) -> bool,
{
    #[inline]
    fn matches(&mut self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<F> fmt::Debug for Where<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Where(..)")
    }
}

/// Matches elements equal to a target.
///
/// Equality goes through `PartialEq`, so an `Option` or enum element that
/// holds a different variant than the target simply does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equals<U>(pub U);

impl<T, U> Matcher<T> for Equals<U>
where
    T: PartialEq<U>,
{
    #[inline]
    fn matches(&mut self, item: &T) -> bool {
        *item == self.0
    }
}

/// Yields ascending positions of matching elements, optionally only the
/// first `limit` of them.
pub struct IndexFinder<T, M> {
    matcher: M,
    limit: Option<usize>,
    _item: PhantomData<fn(&T)>,
}

impl<T, M: Matcher<T>> IndexFinder<T, M> {
    /// Every matching position.
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            limit: None,
            _item: PhantomData,
        }
    }

    /// The first `count` matching positions. The source is released as soon
    /// as `count` positions were produced.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `count` is zero.
    pub fn first(matcher: M, count: usize) -> Result<Self> {
        let count = SeqError::require_positive("count", count)?;
        Ok(Self {
            matcher,
            limit: Some(count),
            _item: PhantomData,
        })
    }
}

impl<T, M: Clone> Clone for IndexFinder<T, M> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            limit: self.limit,
            _item: PhantomData,
        }
    }
}

impl<T, M> fmt::Debug for IndexFinder<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexFinder")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<T, M: Matcher<T>> Operator for IndexFinder<T, M> {
    type Item = T;
    type Output = usize;
    type Step = FinderStep<T, M>;

    fn name(&self) -> &'static str {
        "indices_of"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        FinderStep {
            matcher: self.matcher,
            remaining: self.limit,
            _item: PhantomData,
        }
    }
}

/// Traversal state of [`IndexFinder`].
pub struct FinderStep<T, M> {
    matcher: M,
    remaining: Option<usize>,
    _item: PhantomData<fn(&T)>,
}

impl<T, M: Matcher<T>> Step for FinderStep<T, M> {
    type Item = T;
    type Output = usize;

    fn accept(&mut self, index: usize, item: T) -> Option<usize> {
        if !self.matcher.matches(&item) {
            return None;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(index)
    }

    fn is_done(&self) -> bool {
        self.remaining == Some(0)
    }
}

impl<T, M> fmt::Debug for FinderStep<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinderStep")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Yields the last `count` matching positions, in ascending order.
///
/// The count from the end is unknown until the source is exhausted, so the
/// step keeps a sliding window of at most `count` positions and emits it
/// while draining.
pub struct LastIndices<T, M> {
    matcher: M,
    count: usize,
    _item: PhantomData<fn(&T)>,
}

impl<T, M: Matcher<T>> LastIndices<T, M> {
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `count` is zero.
    pub fn new(matcher: M, count: usize) -> Result<Self> {
        let count = SeqError::require_positive("count", count)?;
        Ok(Self {
            matcher,
            count,
            _item: PhantomData,
        })
    }
}

impl<T, M: Clone> Clone for LastIndices<T, M> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            count: self.count,
            _item: PhantomData,
        }
    }
}

impl<T, M> fmt::Debug for LastIndices<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LastIndices")
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl<T, M: Matcher<T>> Operator for LastIndices<T, M> {
    type Item = T;
    type Output = usize;
    type Step = LastIndicesStep<T, M>;

    fn name(&self) -> &'static str {
        "last_n_indices_of"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        LastIndicesStep {
            matcher: self.matcher,
            count: self.count,
            window: VecDeque::new(),
            _item: PhantomData,
        }
    }
}

/// Traversal state of [`LastIndices`].
pub struct LastIndicesStep<T, M> {
    matcher: M,
    count: usize,
    window: VecDeque<usize>,
    _item: PhantomData<fn(&T)>,
}

impl<T, M: Matcher<T>> Step for LastIndicesStep<T, M> {
    type Item = T;
    type Output = usize;

    fn accept(&mut self, index: usize, item: T) -> Option<usize> {
        if self.matcher.matches(&item) {
            if self.window.len() == self.count {
                self.window.pop_front();
            }
            self.window.push_back(index);
        }
        None
    }

    fn finish(&mut self) -> Option<usize> {
        self.window.pop_front()
    }
}

impl<T, M> fmt::Debug for LastIndicesStep<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LastIndicesStep")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::collect;

    #[test]
    fn finds_every_matching_position() {
        let letters = ["a", "b", "a", "c", "a"];
        let found = collect(letters, IndexFinder::new(Equals("a")));
        assert_eq!(found, vec![0, 2, 4]);
    }

    #[test]
    fn predicate_sees_every_element_once() {
        let mut seen = 0;
        let found = collect(
            1..=6,
            IndexFinder::new(Where(|x: &i32| {
                seen += 1;
                x % 3 == 0
            })),
        );
        assert_eq!(found, vec![2, 5]);
        assert_eq!(seen, 6);
    }

    #[test]
    fn none_elements_never_match_a_value() {
        let values = [None, Some(3), Some(1), None, Some(3)];
        let found = collect(values, IndexFinder::new(Equals(Some(3))));
        assert_eq!(found, vec![1, 4]);
    }

    #[test]
    fn first_stops_after_count() {
        let found = collect(0..100, IndexFinder::first(Where(|x: &i32| x % 2 == 1), 3).unwrap());
        assert_eq!(found, vec![1, 3, 5]);
    }

    #[test]
    fn last_keeps_a_window() {
        let found = collect(0..20, LastIndices::new(Where(|x: &i32| x % 3 == 0), 2).unwrap());
        assert_eq!(found, vec![15, 18]);
    }

    #[test]
    fn last_with_fewer_matches_than_count() {
        let found = collect([7, 1, 7], LastIndices::new(Equals(7), 5).unwrap());
        assert_eq!(found, vec![0, 2]);
    }

    #[test]
    fn zero_counts_are_rejected() {
        assert!(matches!(
            IndexFinder::<i32, _>::first(Equals(1), 0),
            Err(SeqError::InvalidArgument { name: "count", .. })
        ));
        assert!(LastIndices::<i32, _>::new(Equals(1), 0).is_err());
    }

    #[test]
    fn empty_source_yields_nothing() {
        let found = collect(Vec::<i32>::new(), IndexFinder::new(Equals(1)));
        assert!(found.is_empty());
    }
}
