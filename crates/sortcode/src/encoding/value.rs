//! Serialization for [`Value`] trees.
//!
//! Each value is encoded with a 1-byte type tag followed by its payload:
//!
//! - `Null`: `0x01`; `Bool`: `0x02` (false) or `0x03` (true)
//! - `Int`: one of eight width-class tags `0x12..=0x19` + 1, 2, 4 or 8 bytes
//! - `Float`: `0x1D` + 8 bytes (IEEE 754 bits, big-endian)
//! - `Decimal`: `0x1E` + state byte + digit count, packed digits and exponent
//! - `Instant`: `0x20` + resolution byte + 8 bytes (big-endian `i64` count)
//! - `Bytes`: `0x21` + 2 bytes length + raw bytes
//! - `Text`: `0x22` + 2 bytes length + UTF-8 bytes
//! - `List`, `Tuple`, `Set`: `0x30`, `0x31`, `0x32` + 2 bytes count + elements
//! - `Mapping`: `0x33` + 2 bytes count + key, value, key, value, ...
//!
//! All lengths and counts are big-endian `u16`, so text, bytes and containers
//! hold at most 65535 bytes or elements.

use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::types::Value;

use super::container::{decode_tree, encode_tree};
use super::reader::Reader;
use super::traits::{Decoder, Encoder};

/// Encodes a value using the default configuration.
///
/// # Errors
///
/// - [`CodecError::RangeExceeded`] for integers outside `[-2^63, 2^64-1]`,
///   instants that overflow the configured resolution, and leap seconds
/// - [`CodecError::SizeLimitExceeded`] for text, bytes, coefficients or
///   containers over 65535
/// - [`CodecError::DepthLimitExceeded`] for nesting deeper than the limit
pub fn encode(value: &Value) -> CodecResult<Vec<u8>> {
    encode_with(value, &CodecConfig::default())
}

/// Decodes a complete stream using the default configuration.
///
/// # Errors
///
/// - [`CodecError::Truncated`] if the input ends early (including empty input)
/// - [`CodecError::UnknownTag`] for bytes outside the tag table
/// - [`CodecError::MalformedPayload`] for invalid payloads
/// - [`CodecError::TrailingData`] if bytes remain after the value
/// - [`CodecError::DepthLimitExceeded`] for nesting deeper than the limit
pub fn decode(bytes: &[u8]) -> CodecResult<Value> {
    decode_with(bytes, &CodecConfig::default())
}

pub(crate) fn encode_with(value: &Value, config: &CodecConfig) -> CodecResult<Vec<u8>> {
    let mut buf = Vec::new();
    encode_to_with(value, config, &mut buf)?;
    Ok(buf)
}

pub(crate) fn encode_to_with(value: &Value, config: &CodecConfig, buf: &mut Vec<u8>) -> CodecResult<()> {
    let start = buf.len();
    if let Err(e) = encode_tree(value, config, buf) {
        buf.truncate(start);
        return Err(e);
    }
    trace!(bytes = buf.len() - start, kind = value.type_name(), "encoded value");
    Ok(())
}

pub(crate) fn decode_with(bytes: &[u8], config: &CodecConfig) -> CodecResult<Value> {
    let mut reader = Reader::new(bytes);
    let value = decode_value(&mut reader, config)?;
    if !reader.is_empty() {
        let remaining = reader.remaining();
        debug!(remaining, offset = reader.position(), "trailing data after value");
        return Err(CodecError::TrailingData { remaining });
    }
    trace!(bytes = bytes.len(), kind = value.type_name(), "decoded value");
    Ok(value)
}

/// Decode one value from the front of a reader, leaving the rest unread.
///
/// This is useful for walking a stream of concatenated values.
pub(crate) fn decode_value(reader: &mut Reader<'_>, config: &CodecConfig) -> CodecResult<Value> {
    decode_tree(reader, config)
}

impl Encoder for Value {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }

    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CodecError> {
        encode_to_with(self, &CodecConfig::default(), buf)
    }
}

impl Decoder for Value {
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        decode(bytes)
    }
}
