//! Lists, tuples, sets and mappings.
//!
//! A container is its tag, a `u16` element count (entries for mappings) and
//! then the elements in order; a mapping writes each key followed by its value.
//!
//! Both directions walk the tree with an explicit stack, so arbitrarily deep
//! input cannot overflow the call stack. Nesting beyond
//! [`CodecConfig::max_depth`] fails with [`CodecError::DepthLimitExceeded`].

use tracing::debug;

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::types::Value;

use super::reader::Reader;
use super::scalar::{self, checked_len};
use super::tags::Tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    List,
    Tuple,
    Set,
    Mapping,
}

impl Kind {
    const fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            Tag::List => Some(Self::List),
            Tag::Tuple => Some(Self::Tuple),
            Tag::Set => Some(Self::Set),
            Tag::Mapping => Some(Self::Mapping),
            _ => None,
        }
    }

    /// Number of child values that follow a count of `count`.
    const fn slots(self, count: usize) -> usize {
        match self {
            Self::Mapping => count * 2,
            _ => count,
        }
    }

    fn finish(self, values: Vec<Value>) -> Value {
        match self {
            Self::List => Value::List(values),
            Self::Tuple => Value::Tuple(values),
            Self::Set => Value::Set(values),
            Self::Mapping => {
                let mut entries = Vec::with_capacity(values.len() / 2);
                let mut iter = values.into_iter();
                while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
                    entries.push((key, value));
                }
                Value::Mapping(entries)
            }
        }
    }
}

/// Writes a value of any variant.
pub(crate) fn encode_tree(root: &Value, config: &CodecConfig, buf: &mut Vec<u8>) -> CodecResult<()> {
    // (value, depth of its parent container)
    let mut stack: Vec<(&Value, usize)> = vec![(root, 0)];

    while let Some((value, parent_depth)) = stack.pop() {
        let (tag, what) = match value {
            Value::List(_) => (Tag::List, "list"),
            Value::Tuple(_) => (Tag::Tuple, "tuple"),
            Value::Set(_) => (Tag::Set, "set"),
            Value::Mapping(_) => (Tag::Mapping, "mapping"),
            _ => {
                scalar::encode_scalar(value, config, buf)?;
                continue;
            }
        };

        let depth = parent_depth + 1;
        if depth > config.max_depth {
            return Err(CodecError::DepthLimitExceeded { limit: config.max_depth });
        }

        match value {
            Value::Mapping(entries) => {
                let count = checked_len(what, entries.len())?;
                buf.push(tag.byte());
                buf.extend_from_slice(&count.to_be_bytes());
                for (key, val) in entries.iter().rev() {
                    stack.push((val, depth));
                    stack.push((key, depth));
                }
            }
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                let count = checked_len(what, items.len())?;
                buf.push(tag.byte());
                buf.extend_from_slice(&count.to_be_bytes());
                stack.extend(items.iter().rev().map(|item| (item, depth)));
            }
            _ => {}
        }
    }
    Ok(())
}

/// A container whose children are still being read.
struct Frame {
    kind: Kind,
    expected: usize,
    values: Vec<Value>,
}

/// Reads one complete value of any variant.
pub(crate) fn decode_tree(reader: &mut Reader<'_>, config: &CodecConfig) -> CodecResult<Value> {
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        let offset = reader.position();
        let byte = reader.read_u8()?;
        let tag = match Tag::from_byte(byte) {
            Some(tag) if !tag.is_index_only() => tag,
            _ => {
                debug!(tag = byte, offset, "unknown type tag");
                return Err(CodecError::UnknownTag { tag: byte, offset });
            }
        };

        let mut value = match Kind::from_tag(tag) {
            Some(kind) => {
                let count = usize::from(reader.read_u16()?);
                if stack.len() >= config.max_depth {
                    debug!(limit = config.max_depth, offset, "nesting depth limit exceeded");
                    return Err(CodecError::DepthLimitExceeded { limit: config.max_depth });
                }
                let expected = kind.slots(count);
                if expected > 0 {
                    // every child takes at least one byte
                    let capacity = expected.min(reader.remaining());
                    stack.push(Frame { kind, expected, values: Vec::with_capacity(capacity) });
                    continue;
                }
                kind.finish(Vec::new())
            }
            None => scalar::decode_scalar(tag, reader)?,
        };

        // Hand the finished value to its parent, closing every container it completes.
        loop {
            let Some(mut frame) = stack.pop() else {
                return Ok(value);
            };
            frame.values.push(value);
            if frame.values.len() < frame.expected {
                stack.push(frame);
                break;
            }
            value = frame.kind.finish(frame.values);
        }
    }
}
