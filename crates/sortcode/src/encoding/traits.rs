//! Encoding and decoding traits for serialization.

use crate::error::CodecError;

/// A trait for types that can be encoded to bytes.
///
/// Implementations produce a single, self-delimiting byte stream.
pub trait Encoder: Sized {
    /// Encode this value to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented.
    fn encode(&self) -> Result<Vec<u8>, CodecError>;

    /// Encode this value into a pre-allocated buffer.
    ///
    /// This method appends the encoded bytes to the provided buffer,
    /// which can be more efficient when encoding multiple values.
    /// On error the buffer is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented.
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CodecError>;
}

/// A trait for types that can be decoded from bytes.
pub trait Decoder: Sized {
    /// Decode a value from bytes, consuming all of them.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is truncated, malformed, or has bytes
    /// left over.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;
}
