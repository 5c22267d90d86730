//! Partitioning configuration for work-splitting operations.

use std::env;
use std::num::NonZeroUsize;
use std::thread;

use crate::error::{Result, SeqError};
use crate::ops::ChunkSize;

/// How many parts [`split_per_worker`](crate::deferred::DeferredExt::split_per_worker)
/// divides a sequence into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionConfig {
    partitions: NonZeroUsize,
}

impl PartitionConfig {
    /// Environment variable read by [`PartitionConfig::from_env`].
    pub const ENV_VAR: &'static str = "SEQOPS_PARTITIONS";

    /// One part per available hardware thread (one when unknown).
    pub fn from_parallelism() -> Self {
        Self {
            partitions: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Part count from [`Self::ENV_VAR`], falling back to
    /// [`PartitionConfig::from_parallelism`] when the variable is unset.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when the variable is not a positive integer.
    pub fn from_env() -> Result<Self> {
        match env::var(Self::ENV_VAR) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(Self::from_parallelism()),
        }
    }

    /// Parse a part count.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `raw` is not a positive integer.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: usize = raw.trim().parse().map_err(|err| {
            SeqError::invalid("partitions", format!("`{raw}` is not a count: {err}"))
        })?;
        let partitions = NonZeroUsize::new(value)
            .ok_or_else(|| SeqError::invalid("partitions", "must be greater than zero"))?;
        Ok(Self { partitions })
    }

    /// Replace the part count.
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidArgument`] when `partitions` is zero.
    pub fn with_partitions(mut self, partitions: usize) -> Result<Self> {
        self.partitions = NonZeroUsize::new(partitions)
            .ok_or_else(|| SeqError::invalid("partitions", "must be greater than zero"))?;
        Ok(self)
    }

    /// Configured number of parts.
    pub fn partitions(&self) -> usize {
        self.partitions.get()
    }

    /// Chunk policy yielding this many parts.
    pub fn chunk_size(&self) -> ChunkSize {
        ChunkSize::Parts(self.partitions)
    }
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self::from_parallelism()
    }
}
