//! Operators understood by the engine.
//!
//! Each operator is a small parameter struct implementing
//! [`Operator`](crate::engine::Operator); its `Step` type holds the state of
//! one traversal. They are normally built through
//! [`DeferredExt`](crate::deferred::DeferredExt) or
//! [`ImmediateExt`](crate::immediate::ImmediateExt), but can be passed to
//! [`apply`](crate::deferred::DeferredExt::apply) directly.

pub mod group;
pub mod indices;
pub mod range;
pub mod split;

pub use group::{Grouper, Grouping, RunGrouper};
pub use indices::{Equals, IndexFinder, LastIndices, Matcher, Where};
pub use range::{Appender, IndexRemover, Inserter, Prepender, RangeRemover};
pub use split::{ChunkSize, Chunker, Splitter};
