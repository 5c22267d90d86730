//! Asynchronous driver over a `futures::Stream` source.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{FusedStream, Stream};

use super::machine::{Advance, Machine, Pulled};
use super::{ForwardCursor, Operator, Phase};
use crate::error::{Result, SeqError};

/// Operator applied to an asynchronous source.
///
/// Uses the same [`Step`](super::Step) logic as [`Cursor`](super::Cursor);
/// the only await point is pulling the next source element. Dropping the
/// stream cancels the traversal and releases the source.
///
/// Streams cannot be enumerated twice, so operators that need the total
/// length up front are rejected by [`OperatorStream::new`].
pub struct OperatorStream<S, O>
where
    S: Stream,
    O: Operator<Item = S::Item>,
{
    source: Option<S>,
    machine: Machine<S, O>,
}

impl<S, O> OperatorStream<S, O>
where
    S: Stream + Unpin,
    O: Operator<Item = S::Item>,
{
    /// Wrap `source` with `op`.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when the operator needs the source
    /// length (part-count splitting).
    pub fn new(source: S, op: O) -> Result<Self> {
        if op.needs_len() {
            return Err(SeqError::invalid(
                "op",
                format!("`{}` needs a re-enumerable source", op.name()),
            ));
        }
        Ok(Self {
            source: Some(source),
            machine: Machine::new(op),
        })
    }
}

// The source is only ever pinned through `Pin::new`, which requires `S: Unpin`.
impl<S, O> Unpin for OperatorStream<S, O>
where
    S: Stream + Unpin,
    O: Operator<Item = S::Item>,
{
}

impl<S, O> Stream for OperatorStream<S, O>
where
    S: Stream + Unpin,
    O: Operator<Item = S::Item>,
{
    type Item = O::Output;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.machine.phase() == Phase::NotStarted {
            if let Some(source) = this.source.take() {
                this.machine.start(source, None);
            }
        }
        let outcome = this
            .machine
            .advance(|source| match Pin::new(source).poll_next(cx) {
                Poll::Ready(Some(item)) => Pulled::<_, std::convert::Infallible>::Item(item),
                Poll::Ready(None) => Pulled::End,
                Poll::Pending => Pulled::Pending,
            });
        match outcome {
            Advance::Ready(out) => Poll::Ready(Some(out)),
            Advance::Failed(never) => match never {},
            Advance::Pending => Poll::Pending,
            Advance::Done => Poll::Ready(None),
        }
    }
}

impl<S, O> FusedStream for OperatorStream<S, O>
where
    S: Stream + Unpin,
    O: Operator<Item = S::Item>,
{
    fn is_terminated(&self) -> bool {
        self.machine.phase().is_terminal()
    }
}

impl<S, O> ForwardCursor for OperatorStream<S, O>
where
    S: Stream,
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

impl<S, O> fmt::Debug for OperatorStream<S, O>
where
    S: Stream,
    O: Operator<Item = S::Item>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorStream")
            .field("operator", &self.machine.name())
            .field("phase", &self.machine.phase())
            .field("position", &self.machine.position())
            .finish()
    }
}

/// Apply an [`Operator`] to any unpinned stream.
pub trait StreamOpsExt: Stream + Unpin + Sized {
    /// Wrap the stream with `op`; see [`OperatorStream::new`].
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when the operator needs the source length.
    fn apply_op<O>(self, op: O) -> Result<OperatorStream<Self, O>>
    where
        O: Operator<Item = Self::Item>,
    {
        OperatorStream::new(self, op)
    }
}

impl<S: Stream + Unpin> StreamOpsExt for S {}
