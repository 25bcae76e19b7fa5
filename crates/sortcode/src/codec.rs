//! A codec bound to a configuration.

use crate::config::CodecConfig;
use crate::encoding::index::encode_index_with;
use crate::encoding::value::{decode_with, encode_to_with, encode_with};
use crate::encoding::IndexBound;
use crate::error::CodecResult;
use crate::types::Value;

/// Encodes and decodes with a fixed [`CodecConfig`].
///
/// The free functions [`encode`](crate::encode), [`decode`](crate::decode)
/// and [`encode_index`](crate::encode_index) behave like
/// `Codec::default()`.
///
/// # Example
///
/// ```
/// use sortcode::{Codec, CodecConfig, CodecError, Value};
///
/// let codec = Codec::new(CodecConfig::default().with_max_depth(1));
/// let nested = Value::List(vec![Value::List(vec![])]);
///
/// assert_eq!(codec.encode(&nested), Err(CodecError::DepthLimitExceeded { limit: 1 }));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Creates a codec with the given configuration.
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encodes a value. See [`encode`](crate::encode).
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented.
    pub fn encode(&self, value: &Value) -> CodecResult<Vec<u8>> {
        encode_with(value, &self.config)
    }

    /// Appends the encoding of a value to `buf`, leaving `buf` unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented.
    pub fn encode_to(&self, value: &Value, buf: &mut Vec<u8>) -> CodecResult<()> {
        encode_to_with(value, &self.config, buf)
    }

    /// Decodes a complete stream. See [`decode`](crate::decode).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly one well-formed value.
    pub fn decode(&self, bytes: &[u8]) -> CodecResult<Value> {
        decode_with(bytes, &self.config)
    }

    /// Encodes an index key. See [`encode_index`](crate::encode_index).
    ///
    /// # Errors
    ///
    /// Returns an error if an element cannot be indexed.
    pub fn encode_index(&self, values: &[Value]) -> CodecResult<Vec<u8>> {
        encode_index_with(values, IndexBound::Exact, &self.config)
    }

    /// Encodes a range bound key. See [`IndexBound`].
    ///
    /// # Errors
    ///
    /// Returns an error if an element cannot be indexed.
    pub fn encode_index_bound(&self, values: &[Value], bound: IndexBound) -> CodecResult<Vec<u8>> {
        encode_index_with(values, bound, &self.config)
    }
}
