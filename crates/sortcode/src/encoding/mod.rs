//! The value codec and the index codec.
//!
//! # Value codec
//!
//! [`encode`] and [`decode`] turn a [`Value`](crate::types::Value) into a
//! compact, self-describing byte stream and back. The layout is described in
//! [`value`]. [`Encoder`] and [`Decoder`] expose the same operations as
//! methods on `Value`.
//!
//! # Index codec
//!
//! [`encode_index`] turns a tuple of values into a key whose byte order
//! matches the order of the tuples. It shares the [`Tag`] table and the integer
//! width classes with the value codec but is one-way. See [`index`].
//!
//! # Example
//!
//! ```
//! use sortcode::encoding::{Decoder, Encoder};
//! use sortcode::Value;
//!
//! let value = Value::List(vec!["x".into(), 1i64.into(), true.into()]);
//!
//! let bytes = value.encode().unwrap();
//! assert_eq!(bytes, [0x30, 0x00, 0x03, 0x22, 0x00, 0x01, b'x', 0x15, 0x01, 0x03]);
//!
//! let decoded = Value::decode(&bytes).unwrap();
//! assert_eq!(decoded, value);
//! ```

mod container;
pub mod index;
mod numeric;
mod ordered;
mod reader;
mod scalar;
mod tags;
mod traits;
pub mod value;

#[cfg(test)]
mod proptest_tests;

pub use index::{encode_index, encode_index_bound, IndexBound};
pub use tags::Tag;
pub use traits::{Decoder, Encoder};
pub use value::{decode, encode};
