//! Lazy sequence operator engine.
//!
//! Every deferred operation in the crate is an [`Operator`]: an immutable
//! bundle of parameters that, when a traversal begins, produces a [`Step`]
//! holding the per-traversal algorithm state (accumulation buffers, spliced
//! iterators, group buckets). The drivers in this module own the source
//! iterator and walk the shared lifecycle:
//!
//! ```text
//! NotStarted ──first advance──▶ Scanning ──source ends──▶ Draining ──▶ Exhausted
//!                                  │                                      ▲
//!                                  └──────── error / dispose ─────────────┘
//! ```
//!
//! - [`Cursor`] drives a plain, re-enumerable `IntoIterator` source.
//! - [`TryCursor`] drives a source of `Result<T, E>` and stops at the first
//!   error after releasing everything it owns.
//! - [`OperatorStream`] drives an asynchronous `futures::Stream` source with
//!   the same step logic, awaiting only when pulling the next element.
//!
//! Cursors are forward-only: [`ForwardCursor::reset`] always fails with
//! [`SeqError::Unsupported`](crate::SeqError::Unsupported).

mod cursor;
mod machine;
mod stream;
mod try_cursor;

pub use cursor::Cursor;
pub use machine::collect;
pub use stream::{OperatorStream, StreamOpsExt};
pub use try_cursor::TryCursor;

use crate::error::{Result, SeqError};

/// Lifecycle phase of a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No source iterator acquired yet.
    NotStarted,
    /// Pulling elements from the source.
    Scanning,
    /// Source released; emitting output buffered by the step.
    Draining,
    /// Terminal; every further advance reports no more elements.
    Exhausted,
}

impl Phase {
    /// Whether the cursor can never produce another element.
    pub fn is_terminal(self) -> bool {
        self == Phase::Exhausted
    }
}

/// Per-traversal state of an operator.
///
/// The driver calls [`Step::pending`] before every pull, hands each source
/// element to [`Step::accept`] together with its zero-based position, and
/// calls [`Step::finish`] repeatedly once the source has been released.
pub trait Step {
    /// Source element type.
    type Item;
    /// Element type produced by the operator.
    type Output;

    /// Output that is ready without consuming another source element.
    fn pending(&mut self) -> Option<Self::Output> {
        None
    }

    /// Examine the source element at `index`.
    fn accept(&mut self, index: usize, item: Self::Item) -> Option<Self::Output>;

    /// Whether the step needs no further source elements.
    fn is_done(&self) -> bool {
        false
    }

    /// Emit output buffered until the end of the source; called until `None`.
    fn finish(&mut self) -> Option<Self::Output> {
        None
    }
}

/// Immutable operator parameters.
///
/// An operator is consumed by [`Operator::start`] at the beginning of each
/// traversal; re-iterable sequences clone it once per traversal.
pub trait Operator {
    /// Source element type.
    type Item;
    /// Element type produced by the operator.
    type Output;
    /// Traversal state created by [`Operator::start`].
    type Step: Step<Item = Self::Item, Output = Self::Output>;

    /// Short operator name used in trace events.
    fn name(&self) -> &'static str;

    /// Whether [`Operator::start`] needs the total source length.
    ///
    /// Drivers satisfy this with an exact `size_hint` when available and a
    /// counting pre-pass over a clone of the source otherwise.
    fn needs_len(&self) -> bool {
        false
    }

    /// Create the traversal state.
    fn start(self, len: Option<usize>) -> Self::Step;
}

/// Operations shared by every forward-only cursor.
pub trait ForwardCursor {
    /// Current lifecycle phase.
    fn phase(&self) -> Phase;

    /// Number of source elements examined so far.
    fn position(&self) -> usize;

    /// Release the source and all buffered state; the cursor is exhausted
    /// afterwards. Calling it again has no effect.
    fn dispose(&mut self);

    /// Restarting a traversal is not supported.
    fn reset(&mut self) -> Result<()> {
        Err(SeqError::Unsupported { operation: "reset" })
    }
}

/// Length of a re-enumerable source, preferring an exact size hint over a
/// counting pass.
pub(crate) fn measure<S: IntoIterator>(source: S) -> usize {
    let iter = source.into_iter();
    match iter.size_hint() {
        (lower, Some(upper)) if lower == upper => lower,
        _ => iter.count(),
    }
}
