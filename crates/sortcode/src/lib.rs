//! `sortcode`
//!
//! A compact binary codec for dynamically typed values, and a one-way codec
//! that turns tuples of values into byte strings whose order matches the
//! order of the tuples.
//!
//! # Overview
//!
//! - **Values**: [`Value`] covers null, booleans, integers, floats, exact
//!   [`Decimal`]s, text, bytes, instants, and lists, tuples, sets and mappings
//! - **Value codec**: [`encode`] and [`decode`] produce and consume
//!   self-describing, self-delimiting streams
//! - **Index codec**: [`encode_index`] produces keys for ordered key-value
//!   stores; integers, floats and decimals share one numeric order
//! - **Configuration**: [`CodecConfig`] sets the nesting limit and the
//!   resolution at which instants are written; [`Codec`] carries one
//!
//! # Example
//!
//! ```
//! use sortcode::{decode, encode, encode_index, Value};
//!
//! let row = Value::Mapping(vec![
//!     ("name".into(), "Alice".into()),
//!     ("score".into(), 97.5f64.into()),
//! ]);
//! let bytes = encode(&row).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), row);
//!
//! // 2 < 2.5 < 3 across integer and float
//! let k1 = encode_index(&[Value::from(2i32)]).unwrap();
//! let k2 = encode_index(&[Value::from(2.5f64)]).unwrap();
//! let k3 = encode_index(&[Value::from(3u8)]).unwrap();
//! assert!(k1 < k2 && k2 < k3);
//! ```
//!
//! # Modules
//!
//! - [`types`] - The value model ([`Value`], [`Decimal`])
//! - [`encoding`] - The value and index codecs
//! - [`config`] - Codec configuration ([`CodecConfig`], [`TimeResolution`])
//! - [`error`] - Error types ([`CodecError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

mod codec;
pub mod config;
pub mod encoding;
pub mod error;
pub mod types;

pub use codec::Codec;
pub use config::{CodecConfig, TimeResolution};
pub use encoding::{decode, encode, encode_index, encode_index_bound, IndexBound};
pub use error::{CodecError, CodecResult};
pub use types::{Decimal, Value};
