//! Property-based tests for encoding round-trips and index ordering.

#![allow(clippy::expect_used, clippy::float_cmp)]

use std::cmp::Ordering;

use chrono::DateTime;
use proptest::prelude::*;

use crate::config::CodecConfig;
use crate::encoding::reader::Reader;
use crate::encoding::value::decode_value;
use crate::encoding::{encode_index, Decoder, Encoder, Tag};
use crate::types::{Decimal, Value};

fn arb_int() -> impl Strategy<Value = i128> {
    prop_oneof![
        any::<i64>().prop_map(i128::from),
        any::<u64>().prop_map(i128::from),
        -300i128..300,
    ]
}

fn arb_decimal() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        8 => (any::<bool>(), "[0-9]{1,40}", -50i64..50)
            .prop_map(|(neg, digits, exp)| Decimal::new(neg, &digits, exp).expect("digits are valid")),
        1 => Just(Decimal::infinity()),
        1 => Just(Decimal::neg_infinity()),
    ]
}

/// Instants with microsecond precision, so they survive the default resolution.
fn arb_instant() -> impl Strategy<Value = DateTime<chrono::Utc>> {
    (-10_000_000_000i64..10_000_000_000, 0u32..1_000_000).prop_filter_map(
        "representable instant",
        |(secs, micros)| DateTime::from_timestamp(secs, micros * 1_000),
    )
}

/// Strategy for generating arbitrary `Value` instances.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_int().prop_map(Value::Int),
        // Filter out NaN since NaN != NaN
        any::<f64>().prop_filter("not NaN", |f| !f.is_nan()).prop_map(Value::Float),
        arb_decimal().prop_map(Value::Decimal),
        ".*".prop_map(Value::Text),
        prop::collection::vec(any::<u8>(), 0..100).prop_map(Value::Bytes),
        arb_instant().prop_map(Value::Instant),
    ];

    leaf.prop_recursive(
        4,  // depth
        64, // size
        10, // items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::List),
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::Tuple),
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::Set),
                prop::collection::vec((inner.clone(), inner), 0..5).prop_map(Value::Mapping),
            ]
        },
    )
}

fn index_key(value: Value) -> Vec<u8> {
    encode_index(&[value]).expect("index encoding should succeed")
}

proptest! {
    #[test]
    fn value_roundtrip(value in arb_value()) {
        let encoded = value.encode().expect("encoding should succeed");
        let decoded = Value::decode(&encoded).expect("decoding should succeed");
        prop_assert_eq!(value, decoded);
    }

    #[test]
    fn int_value_uses_minimal_class(i in arb_int()) {
        let encoded = Value::Int(i).encode().expect("encoding should succeed");
        let width = encoded.len() - 1;
        let minimal = match i {
            -128..=255 => 1,
            -32768..=65535 => 2,
            -2_147_483_648..=4_294_967_295 => 4,
            _ => 8,
        };
        prop_assert_eq!(width, minimal);
        prop_assert_eq!(Value::decode(&encoded).expect("decoding should succeed"), Value::Int(i));
    }

    #[test]
    fn float_value_preserves_bits(f in any::<f64>()) {
        let encoded = Value::Float(f).encode().expect("encoding should succeed");
        let decoded = Value::decode(&encoded).expect("decoding should succeed");
        match decoded {
            Value::Float(decoded_f) => prop_assert_eq!(f.to_bits(), decoded_f.to_bits()),
            _ => prop_assert!(false, "expected Float variant"),
        }
    }

    /// Corrupted/arbitrary bytes should not crash, only return errors.
    #[test]
    fn arbitrary_bytes_dont_crash(bytes in prop::collection::vec(any::<u8>(), 0..1000)) {
        let _ = Value::decode(&bytes);
    }

    /// Every strict prefix of a valid encoding is truncated input.
    #[test]
    fn truncated_encoding_returns_error(value in arb_value()) {
        let encoded = value.encode().expect("encoding should succeed");
        for truncate_at in 0..encoded.len() {
            prop_assert!(Value::decode(&encoded[..truncate_at]).is_err());
        }
    }

    /// Mutated encodings should return errors or valid values, never panic.
    #[test]
    fn mutated_encoding_returns_error_or_value(
        value in arb_value(),
        mutation_idx in any::<usize>(),
        mutation_val in any::<u8>()
    ) {
        let mut encoded = value.encode().expect("encoding should succeed");
        let idx = mutation_idx % encoded.len();
        encoded[idx] = mutation_val;
        let _ = Value::decode(&encoded);
    }

    /// A value followed by more bytes decodes on its own and leaves the rest.
    #[test]
    fn decode_value_stops_at_value_end(value in arb_value(), tail in prop::collection::vec(any::<u8>(), 1..8)) {
        let mut encoded = value.encode().expect("encoding should succeed");
        let len = encoded.len();
        encoded.extend_from_slice(&tail);

        let mut reader = Reader::new(&encoded);
        let decoded = decode_value(&mut reader, &CodecConfig::default()).expect("decoding should succeed");
        prop_assert_eq!(value, decoded);
        prop_assert_eq!(reader.position(), len);
        prop_assert!(Value::decode(&encoded).is_err());
    }

    /// Large count headers shouldn't cause allocation panics.
    #[test]
    fn large_count_header_doesnt_panic(tag in 0x30u8..=0x33, count in any::<[u8; 2]>()) {
        let mut bytes = vec![tag];
        bytes.extend_from_slice(&count);
        bytes.extend_from_slice(&[Tag::Null.byte(); 16]);
        let _ = Value::decode(&bytes);
    }

    #[test]
    fn index_orders_integers(a in arb_int(), b in arb_int()) {
        let (ka, kb) = (index_key(Value::Int(a)), index_key(Value::Int(b)));
        prop_assert_eq!(a.cmp(&b), ka.cmp(&kb));
    }

    #[test]
    fn index_orders_floats(
        a in any::<f64>().prop_filter("not NaN", |f| !f.is_nan()),
        b in any::<f64>().prop_filter("not NaN", |f| !f.is_nan())
    ) {
        let expected = a.partial_cmp(&b).expect("not NaN");
        let (ka, kb) = (index_key(Value::Float(a)), index_key(Value::Float(b)));
        prop_assert_eq!(expected, ka.cmp(&kb));
    }

    #[test]
    fn index_matches_float_and_int(i in -(1i64 << 53)..(1i64 << 53)) {
        prop_assert_eq!(index_key(Value::Int(i128::from(i))), index_key(Value::Float(i as f64)));
    }

    #[test]
    fn index_orders_text_without_nul(a in "[^\\x00]{0,20}", b in "[^\\x00]{0,20}") {
        let (ka, kb) = (index_key(Value::from(a.as_str())), index_key(Value::from(b.as_str())));
        prop_assert_eq!(a.as_bytes().cmp(b.as_bytes()), ka.cmp(&kb));
    }

    #[test]
    fn index_orders_bytes_by_content(
        a in prop::collection::vec(any::<u8>(), 0..20),
        b in prop::collection::vec(any::<u8>(), 0..20)
    ) {
        // trailing zeros are not part of the key
        let trim = |v: &[u8]| v[..v.iter().rposition(|&x| x != 0).map_or(0, |p| p + 1)].to_vec();
        let (ka, kb) = (index_key(Value::Bytes(a.clone())), index_key(Value::Bytes(b.clone())));
        prop_assert_eq!(trim(&a).cmp(&trim(&b)), ka.cmp(&kb));
    }

    #[test]
    fn index_orders_tuples_field_by_field(
        a in (arb_int(), "[a-z\\x00]{0,6}"),
        b in (arb_int(), "[a-z\\x00]{0,6}")
    ) {
        let key = |(i, s): &(i128, String)| {
            encode_index(&[Value::Int(*i), Value::from(s.as_str())]).expect("index encoding should succeed")
        };
        let trim = |s: &str| s.trim_end_matches('\u{0}').to_owned();
        let expected = match a.0.cmp(&b.0) {
            Ordering::Equal => trim(&a.1).cmp(&trim(&b.1)),
            other => other,
        };
        prop_assert_eq!(expected, key(&a).cmp(&key(&b)));
    }
}
