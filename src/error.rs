//! Error taxonomy shared by every operation in the crate.

use thiserror::Error;

/// Errors raised by sequence operations.
///
/// Each category is a distinct variant so callers can branch on it, e.g.
/// treating [`SeqError::NotFound`] differently from an invalid argument.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeqError {
    /// A required parameter was rejected (zero count, zero step, duplicate key).
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Parameter name as it appears in the public API.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An index or range reaches past the end of the source.
    #[error("index {index} out of range for sequence of length {len}")]
    OutOfRange {
        /// First offending index (or range end).
        index: usize,
        /// Length of the source sequence.
        len: usize,
    },

    /// The operation is not supported by forward-only cursors.
    #[error("operation `{operation}` is not supported on a forward-only cursor")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// No element satisfied the requested condition.
    #[error("no element satisfies the condition")]
    NotFound,

    /// A collection could not grow to hold the requested elements.
    #[error("capacity overflow: {requested} additional elements requested")]
    Overflow {
        /// Number of additional elements that could not be accommodated.
        requested: usize,
    },

    /// A numeric result does not fit in its type.
    #[error("arithmetic overflow in `{operation}`")]
    ArithmeticOverflow {
        /// Operation that overflowed.
        operation: &'static str,
    },
}

impl SeqError {
    /// Helper for constructing invalid-argument errors.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SeqError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Reject a zero count for the named parameter.
    pub(crate) fn require_positive(name: &'static str, value: usize) -> Result<usize> {
        if value == 0 {
            return Err(Self::invalid(name, "must be greater than zero"));
        }
        Ok(value)
    }
}

/// Result alias used across the crate.
pub type Result<T, E = SeqError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_parameter() {
        let err = SeqError::invalid("maximum_item_count", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid argument `maximum_item_count`: must be greater than zero"
        );
    }

    #[test]
    fn require_positive_rejects_zero() {
        assert!(SeqError::require_positive("count", 0).is_err());
        assert_eq!(SeqError::require_positive("count", 3), Ok(3));
    }
}
