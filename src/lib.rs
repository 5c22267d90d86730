//! # Sequence operators over lazy, forward-only cursors
//!
//! This library adds sequence operations that the standard iterator adapters
//! do not cover, in two flavours:
//!
//! 1. **Deferred**: [`DeferredExt`] returns a [`Deferred`] sequence that does
//!    nothing until iterated and restarts from the source on every traversal
//! 2. **Immediate**: [`immediate::ImmediateExt`] runs the same operators to
//!    completion and returns owned results
//!
//! The operators themselves live in [`ops`]:
//!
//! - **Index finder**: positions matching a value or predicate, optionally
//!   only the first or last `n`
//! - **Splitter**: chunks by separator, predicate, fixed size or part count
//! - **Range inserter/remover**: splice a range in, or drop positions
//! - **Grouper**: buckets by key in order of first occurrence
//!
//! Each one runs on the [`engine`]: a single state machine shared by the
//! synchronous [`engine::Cursor`], the fallible [`engine::TryCursor`] and the
//! asynchronous [`engine::OperatorStream`].
//!
//! ## Usage Example
//!
//! ```
//! use seqops::prelude::*;
//!
//! let csv = "a,b,,c";
//! let fields: Vec<String> = csv
//!     .chars()
//!     .split_by(',')
//!     .into_iter()
//!     .map(|field| field.into_iter().collect())
//!     .collect();
//! assert_eq!(fields, vec!["a", "b", "", "c"]);
//!
//! let sizes: Vec<usize> = (0..10).chunks_of(3)?.into_iter().map(|c| c.len()).collect();
//! assert_eq!(sizes, vec![3, 3, 3, 1]);
//! # Ok::<(), seqops::SeqError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod config; // Partition configuration
pub mod deferred; // Lazy sequences and the DeferredExt trait
pub mod engine; // Cursor lifecycle shared by every operator
pub mod error; // SeqError and Result
pub mod immediate; // Eager companions
pub mod map; // Bulk map insertion
pub mod math; // Numeric helpers
pub mod ops; // Index finder, splitter, range and group operators
pub mod slice; // Slice fast paths
pub mod text; // Character operations on str

// Re-exports for convenience
pub use config::PartitionConfig;
pub use deferred::{Deferred, DeferredExt, TryDeferred};
pub use engine::{Cursor, ForwardCursor, OperatorStream, Phase, StreamOpsExt, TryCursor};
pub use error::{Result, SeqError};
pub use ops::Grouping;

/// Everything needed for deferred operations.
///
/// [`ImmediateExt`](crate::immediate::ImmediateExt) is not included; it
/// shares method names with [`DeferredExt`] and is imported on its own.
pub mod prelude {
    pub use crate::config::PartitionConfig;
    pub use crate::deferred::{Deferred, DeferredExt, TryDeferred};
    pub use crate::engine::{ForwardCursor, Phase, StreamOpsExt};
    pub use crate::error::SeqError;
    pub use crate::map::MapExt;
    pub use crate::ops::Grouping;
    pub use crate::text::TextExt;
}
