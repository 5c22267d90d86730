//! Splitting a sequence into ordered chunks.

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::num::NonZeroUsize;

use crate::engine::{Operator, Step};
use crate::error::{Result, SeqError};
use crate::ops::Matcher;

/// Splits on elements accepted by a [`Matcher`].
///
/// The matching element is dropped and closes the current chunk, so
/// adjacent separators produce empty chunks. Whatever follows the last
/// separator is emitted as a final chunk when it is non-empty.
pub struct Splitter<T, M> {
    matcher: M,
    _item: PhantomData<fn(T)>,
}

impl<T, M> Splitter<T, M> {
    /// Split wherever `matcher` matches.
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            _item: PhantomData,
        }
    }
}

impl<T, M: Clone> Clone for Splitter<T, M> {
    fn clone(&self) -> Self {
        Self::new(self.matcher.clone())
    }
}

impl<T, M> fmt::Debug for Splitter<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Splitter").finish_non_exhaustive()
    }
}

impl<T, M: Matcher<T>> Operator for Splitter<T, M> {
    type Item = T;
    type Output = Vec<T>;
    type Step = SplitStep<T, M>;

    fn name(&self) -> &'static str {
        "split_by"
    }

    fn start(self, _len: Option<usize>) -> Self::Step {
        SplitStep {
            matcher: self.matcher,
            chunk: Vec::new(),
        }
    }
}

/// Traversal state of [`Splitter`].
pub struct SplitStep<T, M> {
    matcher: M,
    chunk: Vec<T>,
}

impl<T, M: Matcher<T>> Step for SplitStep<T, M> {
    type Item = T;
    type Output = Vec<T>;

    fn accept(&mut self, _index: usize, item: T) -> Option<Vec<T>> {
        if self.matcher.matches(&item) {
            return Some(mem::take(&mut self.chunk));
        }
        self.chunk.push(item);
        None
    }

    fn finish(&mut self) -> Option<Vec<T>> {
        (!self.chunk.is_empty()).then(|| mem::take(&mut self.chunk))
    }
}

impl<T, M> fmt::Debug for SplitStep<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitStep")
            .field("buffered", &self.chunk.len())
            .finish_non_exhaustive()
    }
}

/// How [`Chunker`] sizes its chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSize {
    /// At most this many elements per chunk.
    Items(NonZeroUsize),
    /// Aim for this many chunks: each holds `ceil(total / parts)` elements.
    Parts(NonZeroUsize),
}

impl ChunkSize {
    /// Maximum elements per chunk for a source of `len` elements.
    pub fn resolve(self, len: Option<usize>) -> usize {
        match self {
            ChunkSize::Items(max) => max.get(),
            ChunkSize::Parts(parts) => len.unwrap_or(0).div_ceil(parts.get()).max(1),
        }
    }
}

/// Splits into consecutive chunks of bounded size.
///
/// Every chunk but the last holds exactly the maximum item count; the last
/// holds the remainder.
pub struct Chunker<T> {
    size: ChunkSize,
    _item: PhantomData<fn(T)>,
}

impl<T> Chunker<T> {
    /// Chunks of at most `maximum_item_count` elements.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `maximum_item_count` is zero.
    pub fn items(maximum_item_count: usize) -> Result<Self> {
        let max = non_zero("maximum_item_count", maximum_item_count)?;
        Ok(Self::with_size(ChunkSize::Items(max)))
    }

    /// Roughly `parts` chunks of equal size. The source length is measured
    /// when the traversal starts.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `parts` is zero.
    pub fn parts(parts: usize) -> Result<Self> {
        let parts = non_zero("parts", parts)?;
        Ok(Self::with_size(ChunkSize::Parts(parts)))
    }

    /// Chunker with an already validated size policy.
    pub fn with_size(size: ChunkSize) -> Self {
        Self {
            size,
            _item: PhantomData,
        }
    }

    /// Size policy.
    pub fn size(&self) -> ChunkSize {
        self.size
    }
}

fn non_zero(name: &'static str, value: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(value).ok_or_else(|| SeqError::invalid(name, "must be greater than zero"))
}

impl<T> Clone for Chunker<T> {
    fn clone(&self) -> Self {
        Self::with_size(self.size)
    }
}

impl<T> fmt::Debug for Chunker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunker").field("size", &self.size).finish()
    }
}

impl<T> Operator for Chunker<T> {
    type Item = T;
    type Output = Vec<T>;
    type Step = ChunkStep<T>;

    fn name(&self) -> &'static str {
        "chunks_of"
    }

    fn needs_len(&self) -> bool {
        matches!(self.size, ChunkSize::Parts(_))
    }

    fn start(self, len: Option<usize>) -> Self::Step {
        ChunkStep {
            max: self.size.resolve(len),
            chunk: Vec::new(),
        }
    }
}

/// Traversal state of [`Chunker`].
#[derive(Debug)]
pub struct ChunkStep<T> {
    max: usize,
    chunk: Vec<T>,
}

impl<T> Step for ChunkStep<T> {
    type Item = T;
    type Output = Vec<T>;

    fn accept(&mut self, _index: usize, item: T) -> Option<Vec<T>> {
        self.chunk.push(item);
        (self.chunk.len() == self.max).then(|| mem::take(&mut self.chunk))
    }

    fn finish(&mut self) -> Option<Vec<T>> {
        (!self.chunk.is_empty()).then(|| mem::take(&mut self.chunk))
    }
}
