//! Order-preserving index keys.
//!
//! [`encode_index`] turns a tuple of values into a byte string whose
//! lexicographic order matches the order of the tuples. Keys are meant for an
//! ordered key-value store and are never decoded.
//!
//! # Layout
//!
//! Each element becomes one field: its tag followed by its payload, with
//! trailing zero bytes removed and every run of zero bytes escaped. Fields are
//! joined by `0x00 0x00`; there is no separator after the last field and the
//! empty tuple encodes to the empty key.
//!
//! - `Null`, `Bool`: tag only, so `null < false < true`
//! - numbers: see [`ordered`](super::ordered)
//! - `Instant`: tag + sign-flipped `i64` count at the configured resolution
//! - `Bytes`, `Text`: tag + raw bytes
//!
//! A run of `n` zero bytes (`1 <= n <= 255`) becomes `0x00, 256 - n`; longer
//! runs are split. The escaped form never contains `0x00 0x00`, and a shorter
//! run always sorts after a longer one, as it does before escaping.
//!
//! Because trailing zeros are dropped, `"A"`, `"A\0"` and `"A\0\0"` produce the
//! same key. Numbers never collide this way.
//!
//! # Example
//!
//! ```
//! use sortcode::{encode_index, Value};
//!
//! let a = encode_index(&[Value::from("apple"), Value::from(2i32)]).unwrap();
//! let b = encode_index(&[Value::from("apple"), Value::from(10.5f64)]).unwrap();
//! let c = encode_index(&[Value::from("banana")]).unwrap();
//! assert!(a < b && b < c);
//! ```

use tracing::trace;

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::types::Value;

use super::numeric::IntClass;
use super::ordered::{encode_number, write_class_payload};
use super::scalar::{checked_len, instant_to_units};
use super::tags::Tag;

/// Separator between two fields.
const SEPARATOR: [u8; 2] = [0x00, 0x00];

/// Which key to produce for a tuple when building range bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexBound {
    /// The key of the tuple itself.
    #[default]
    Exact,
    /// A key after the tuple's key and before any key that extends the tuple
    /// with further fields.
    After,
    /// A key before the tuple's key.
    Before,
}

/// Encodes a tuple into an order-preserving key using the default configuration.
///
/// # Errors
///
/// - [`CodecError::UnsupportedType`] for containers inside the tuple
/// - [`CodecError::SizeLimitExceeded`] for text or bytes over 65535 bytes and
///   decimal coefficients over 65535 digits
/// - [`CodecError::RangeExceeded`] for integers outside `[-2^63, 2^64-1]`,
///   instants that overflow the configured resolution, and leap seconds
pub fn encode_index(values: &[Value]) -> CodecResult<Vec<u8>> {
    encode_index_with(values, IndexBound::Exact, &CodecConfig::default())
}

/// Encodes a tuple into a range bound key using the default configuration.
///
/// # Errors
///
/// Same as [`encode_index`].
pub fn encode_index_bound(values: &[Value], bound: IndexBound) -> CodecResult<Vec<u8>> {
    encode_index_with(values, bound, &CodecConfig::default())
}

pub(crate) fn encode_index_with(
    values: &[Value],
    bound: IndexBound,
    config: &CodecConfig,
) -> CodecResult<Vec<u8>> {
    let mut key = Vec::new();
    let mut field = Vec::new();

    for (i, value) in values.iter().enumerate() {
        field.clear();
        encode_field(value, config, &mut field)?;

        let end = field.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
        if i > 0 {
            key.extend_from_slice(&SEPARATOR);
        }
        escape_zero_runs(&field[..end], &mut key);
    }

    apply_bound(&mut key, bound);
    trace!(fields = values.len(), bytes = key.len(), ?bound, "encoded index key");
    Ok(key)
}

fn encode_field(value: &Value, config: &CodecConfig, field: &mut Vec<u8>) -> CodecResult<()> {
    match value {
        Value::Null => field.push(Tag::Null.byte()),
        Value::Bool(false) => field.push(Tag::False.byte()),
        Value::Bool(true) => field.push(Tag::True.byte()),
        Value::Int(_) | Value::Float(_) | Value::Decimal(_) => encode_number(value, field)?,
        Value::Instant(t) => {
            let count = instant_to_units(t, config.time_resolution)?;
            field.push(Tag::Instant.byte());
            write_class_payload(IntClass::I64, i128::from(count), field);
        }
        Value::Bytes(b) => {
            checked_len("bytes", b.len())?;
            field.push(Tag::Bytes.byte());
            field.extend_from_slice(b);
        }
        Value::Text(s) => {
            checked_len("text", s.len())?;
            field.push(Tag::Text.byte());
            field.extend_from_slice(s.as_bytes());
        }
        Value::List(_) | Value::Tuple(_) | Value::Set(_) | Value::Mapping(_) => {
            return Err(CodecError::UnsupportedType { type_name: value.type_name() });
        }
    }
    Ok(())
}

/// Appends `data` with each run of `n` zero bytes written as `0x00, 256 - n`.
fn escape_zero_runs(data: &[u8], out: &mut Vec<u8>) {
    let mut run = 0u8;
    for &byte in data {
        if byte == 0 {
            if run == u8::MAX {
                out.extend_from_slice(&[0x00, 0x01]);
                run = 0;
            }
            run += 1;
            continue;
        }
        if run > 0 {
            out.extend_from_slice(&[0x00, run.wrapping_neg()]);
            run = 0;
        }
        out.push(byte);
    }
    if run > 0 {
        out.extend_from_slice(&[0x00, run.wrapping_neg()]);
    }
}

fn apply_bound(key: &mut Vec<u8>, bound: IndexBound) {
    match bound {
        IndexBound::Exact => {}
        IndexBound::After => {
            if !key.is_empty() {
                key.push(0x00);
            }
        }
        IndexBound::Before => match key.last().copied() {
            Some(0) => {
                key.pop();
            }
            Some(last) => {
                let end = key.len() - 1;
                key[end] = last - 1;
            }
            None => {}
        },
    }
}
