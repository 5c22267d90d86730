//! Lazy range insertion and removal.
//!
//! Spliced ranges are pulled element by element from their own iterator,
//! which the step owns and drops as soon as it runs dry.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;
use std::sync::Arc;

use crate::engine::{Operator, Step};
use crate::error::{Result, SeqError};

/// Next element of an optional spliced iterator, dropping it once empty.
fn pull_spliced<J: Iterator>(slot: &mut Option<J>) -> Option<J::Item> {
    let next = slot.as_mut().and_then(Iterator::next);
    if next.is_none() {
        *slot = None;
    }
    next
}

/// Inserts `items` before the source element at position `at`.
///
/// When the source is shorter than `at`, the items are appended at the end.
pub struct Inserter<T, J> {
    at: usize,
    items: J,
    _item: PhantomData<fn(T)>,
}

impl<T, J> Inserter<T, J>
where
    J: IntoIterator<Item = T>,
{
    /// Insert `items` at zero-based position `at`.
    pub fn new(at: usize, items: J) -> Self {
        Self {
            at,
            items,
            _item: PhantomData,
        }
    }
}

impl<T, J: Clone> Clone for Inserter<T, J> {
    fn clone(&self) -> Self {
        Self {
            at: self.at,
            items: self.items.clone(),
            _item: PhantomData,
        }
    }
}

impl<T, J> fmt::Debug for Inserter<T, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inserter")
            .field("at", &self.at)
            .finish_non_exhaustive()
    }
}

impl<T, J> Operator for Inserter<T, J>
where
    J: IntoIterator<Item = T>,
{
    type Item = T;
    type Output = T;
    type Step = InsertStep<T, J>;

    fn name(&self) -> &'static str {
        "insert_range"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        InsertStep {
            at: self.at,
            items: Some(self.items),
            splicing: None,
            held: None,
        }
    }
}

/// Traversal state of [`Inserter`].
pub struct InsertStep<T, J: IntoIterator<Item = T>> {
    at: usize,
    items: Option<J>,
    splicing: Option<J::IntoIter>,
    held: Option<T>,
}

impl<T, J> Step for InsertStep<T, J>
where
    J: IntoIterator<Item = T>,
{
    type Item = T;
    type Output = T;

    fn pending(&mut self) -> Option<T> {
        pull_spliced(&mut self.splicing).or_else(|| self.held.take())
    }

    fn accept(&mut self, index: usize, item: T) -> Option<T> {
        if index == self.at {
            if let Some(items) = self.items.take() {
                self.splicing = Some(items.into_iter());
                self.held = Some(item);
                return self.pending();
            }
        }
        Some(item)
    }

    fn finish(&mut self) -> Option<T> {
        if let Some(items) = self.items.take() {
            self.splicing = Some(items.into_iter());
        }
        pull_spliced(&mut self.splicing)
    }
}

impl<T, J: IntoIterator<Item = T>> fmt::Debug for InsertStep<T, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertStep")
            .field("at", &self.at)
            .field("inserted", &self.items.is_none())
            .field("splicing", &self.splicing.is_some())
            .finish_non_exhaustive()
    }
}

/// Yields the source, then `items`.
pub struct Appender<T, J> {
    items: J,
    _item: PhantomData<fn(T)>,
}

impl<T, J: IntoIterator<Item = T>> Appender<T, J> {
    /// Append `items` after the last source element.
    pub fn new(items: J) -> Self {
        Self {
            items,
            _item: PhantomData,
        }
    }
}

impl<T, J: Clone> Clone for Appender<T, J> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            _item: PhantomData,
        }
    }
}

impl<T, J> fmt::Debug for Appender<T, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Appender").finish_non_exhaustive()
    }
}

impl<T, J: IntoIterator<Item = T>> Operator for Appender<T, J> {
    type Item = T;
    type Output = T;
    type Step = AppendStep<J>;

    fn name(&self) -> &'static str {
        "append_range"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        AppendStep {
            items: Some(self.items),
            tail: None,
        }
    }
}

/// Traversal state of [`Appender`].
pub struct AppendStep<J: IntoIterator> {
    items: Option<J>,
    tail: Option<J::IntoIter>,
}

impl<J: IntoIterator> Step for AppendStep<J> {
    type Item = J::Item;
    type Output = J::Item;

    fn accept(&mut self, _index: usize, item: J::Item) -> Option<J::Item> {
        Some(item)
    }

    fn finish(&mut self) -> Option<J::Item> {
        if let Some(items) = self.items.take() {
            self.tail = Some(items.into_iter());
        }
        pull_spliced(&mut self.tail)
    }
}

impl<J: IntoIterator> fmt::Debug for AppendStep<J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppendStep")
            .field("tail", &self.tail.is_some())
            .finish_non_exhaustive()
    }
}

/// Yields `items`, then the source.
pub struct Prepender<T, J> {
    items: J,
    _item: PhantomData<fn(T)>,
}

impl<T, J: IntoIterator<Item = T>> Prepender<T, J> {
    /// Prepend `items` before the first source element.
    pub fn new(items: J) -> Self {
        Self {
            items,
            _item: PhantomData,
        }
    }
}

impl<T, J: Clone> Clone for Prepender<T, J> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            _item: PhantomData,
        }
    }
}

impl<T, J> fmt::Debug for Prepender<T, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prepender").finish_non_exhaustive()
    }
}

impl<T, J: IntoIterator<Item = T>> Operator for Prepender<T, J> {
    type Item = T;
    type Output = T;
    type Step = PrependStep<J::IntoIter>;

    fn name(&self) -> &'static str {
        "prepend_range"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        PrependStep {
            head: Some(self.items.into_iter()),
        }
    }
}

/// Traversal state of [`Prepender`].
#[derive(Debug)]
pub struct PrependStep<I> {
    head: Option<I>,
}

impl<I: Iterator> Step for PrependStep<I> {
    type Item = I::Item;
    type Output = I::Item;

    fn pending(&mut self) -> Option<I::Item> {
        pull_spliced(&mut self.head)
    }

    fn accept(&mut self, _index: usize, item: I::Item) -> Option<I::Item> {
        Some(item)
    }
}

/// Skips the source elements at a set of positions.
///
/// Positions past the end of the source are ignored.
pub struct IndexRemover<T> {
    indices: Arc<[usize]>,
    _item: PhantomData<fn(T)>,
}

impl<T> IndexRemover<T> {
    /// Remove the elements at every position in `indices`.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut sorted: Vec<usize> = indices.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        Self {
            indices: sorted.into(),
            _item: PhantomData,
        }
    }

    /// Whether position `index` is removed.
    pub fn removes(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }
}

impl<T> Clone for IndexRemover<T> {
    fn clone(&self) -> Self {
        Self {
            indices: Arc::clone(&self.indices),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for IndexRemover<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexRemover")
            .field("removed", &self.indices.len())
            .finish()
    }
}

impl<T> Operator for IndexRemover<T> {
    type Item = T;
    type Output = T;
    type Step = RemoveStep<T>;

    fn name(&self) -> &'static str {
        "remove_indices"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        RemoveStep {
            indices: self.indices,
            _item: PhantomData,
        }
    }
}

/// Traversal state of [`IndexRemover`].
#[derive(Debug)]
pub struct RemoveStep<T> {
    indices: Arc<[usize]>,
    _item: PhantomData<fn(T)>,
}

impl<T> Step for RemoveStep<T> {
    type Item = T;
    type Output = T;

    fn accept(&mut self, index: usize, item: T) -> Option<T> {
        self.indices.binary_search(&index).is_err().then_some(item)
    }
}

/// Skips a contiguous range of source positions.
pub struct RangeRemover<T> {
    range: Range<usize>,
    _item: PhantomData<fn(T)>,
}

impl<T> RangeRemover<T> {
    /// Remove `count` elements starting at `start` from a source of `len`
    /// elements.
    ///
    /// # Errors
    ///
    /// [`SeqError::OutOfRange`] when the range reaches past `len`.
    pub fn new(start: usize, count: usize, len: usize) -> Result<Self> {
        let end = start
            .checked_add(count)
            .ok_or(SeqError::OutOfRange { index: start, len })?;
        if start > len {
            return Err(SeqError::OutOfRange { index: start, len });
        }
        if end > len {
            return Err(SeqError::OutOfRange { index: end, len });
        }
        Ok(Self {
            range: start..end,
            _item: PhantomData,
        })
    }

    /// Positions being removed.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

impl<T> Clone for RangeRemover<T> {
    fn clone(&self) -> Self {
        Self {
            range: self.range.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for RangeRemover<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeRemover")
            .field("range", &self.range)
            .finish()
    }
}

impl<T> Operator for RangeRemover<T> {
    type Item = T;
    type Output = T;
    type Step = RangeStep<T>;

    fn name(&self) -> &'static str {
        "remove_range"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        RangeStep {
            range: self.range,
            _item: PhantomData,
        }
    }
}

/// Traversal state of [`RangeRemover`].
#[derive(Debug)]
pub struct RangeStep<T> {
    range: Range<usize>,
    _item: PhantomData<fn(T)>,
}

impl<T> Step for RangeStep<T> {
    type Item = T;
    type Output = T;

    fn accept(&mut self, index: usize, item: T) -> Option<T> {
        (!self.range.contains(&index)).then_some(item)
    }
}
