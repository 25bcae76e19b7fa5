//! Error types for the codec crate.

use thiserror::Error;

/// Errors that can occur while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value kind has no representation in this codec.
    #[error("unsupported type: {type_name}")]
    UnsupportedType {
        /// Name of the offending value kind.
        type_name: &'static str,
    },

    /// A number lies outside the representable range.
    #[error("value out of range: {0}")]
    RangeExceeded(String),

    /// A length or cardinality does not fit the 16-bit length field.
    #[error("{what} too long: {len} exceeds the maximum of {max}")]
    SizeLimitExceeded {
        /// What was being encoded.
        what: &'static str,
        /// The actual length.
        len: usize,
        /// The maximum length.
        max: usize,
    },

    /// The input ended before a value was complete.
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required by the read that failed.
        needed: usize,
        /// Bytes that were left.
        available: usize,
        /// Offset of the failed read.
        offset: usize,
    },

    /// A type tag is not part of the tag table.
    #[error("unknown type tag {tag:#04x} at offset {offset}")]
    UnknownTag {
        /// The tag byte.
        tag: u8,
        /// Offset of the tag byte.
        offset: usize,
    },

    /// A payload violates its format.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Bytes remain after the outermost value.
    #[error("{remaining} trailing bytes after value")]
    TrailingData {
        /// Number of unread bytes.
        remaining: usize,
    },

    /// Containers are nested deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl CodecError {
    /// Creates a truncation error for a read of `needed` bytes at `offset`.
    #[must_use]
    pub const fn truncated(needed: usize, available: usize, offset: usize) -> Self {
        Self::Truncated { needed, available, offset }
    }

    /// Creates a size limit error.
    #[must_use]
    pub const fn size_limit(what: &'static str, len: usize, max: usize) -> Self {
        Self::SizeLimitExceeded { what, len, max }
    }

    /// Creates a malformed payload error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload(reason.into())
    }

    /// Returns `true` if this error was raised while decoding.
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Truncated { .. }
                | Self::UnknownTag { .. }
                | Self::MalformedPayload(_)
                | Self::TrailingData { .. }
        )
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
