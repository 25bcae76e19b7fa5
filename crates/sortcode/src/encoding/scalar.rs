//! Value-codec formats for the non-container variants.
//!
//! - `Null`, `Bool`: tag only (`FALSE` and `TRUE` are separate tags)
//! - `Text`, `Bytes`: tag + `u16` length + raw bytes
//! - `Instant`: tag + resolution byte + `i64` count of units since the epoch
//! - numbers: see [`numeric`](super::numeric)

use chrono::{DateTime, Utc};

use crate::config::{CodecConfig, TimeResolution};
use crate::error::{CodecError, CodecResult};
use crate::types::Value;

use super::numeric::{self, IntClass};
use super::reader::Reader;
use super::tags::Tag;

/// Largest text, bytes or container length the 16-bit length field can hold.
pub(crate) const MAX_LEN: usize = u16::MAX as usize;

/// Checks a length against the 16-bit limit.
pub(crate) fn checked_len(what: &'static str, len: usize) -> CodecResult<u16> {
    u16::try_from(len).map_err(|_| CodecError::size_limit(what, len, MAX_LEN))
}

/// Writes a non-container value.
pub(crate) fn encode_scalar(value: &Value, config: &CodecConfig, buf: &mut Vec<u8>) -> CodecResult<()> {
    match value {
        Value::Null => buf.push(Tag::Null.byte()),
        Value::Bool(false) => buf.push(Tag::False.byte()),
        Value::Bool(true) => buf.push(Tag::True.byte()),
        Value::Int(i) => numeric::encode_int(*i, buf)?,
        Value::Float(f) => numeric::encode_float(*f, buf),
        Value::Decimal(d) => numeric::encode_decimal(d, buf)?,
        Value::Text(s) => encode_len_prefixed(Tag::Text, "text", s.as_bytes(), buf)?,
        Value::Bytes(b) => encode_len_prefixed(Tag::Bytes, "bytes", b, buf)?,
        Value::Instant(t) => {
            let resolution = config.time_resolution;
            let count = instant_to_units(t, resolution)?;
            buf.push(Tag::Instant.byte());
            buf.push(resolution.to_byte());
            buf.extend_from_slice(&count.to_be_bytes());
        }
        Value::List(_) | Value::Tuple(_) | Value::Set(_) | Value::Mapping(_) => {
            return Err(CodecError::UnsupportedType { type_name: value.type_name() });
        }
    }
    Ok(())
}

fn encode_len_prefixed(tag: Tag, what: &'static str, data: &[u8], buf: &mut Vec<u8>) -> CodecResult<()> {
    let len = checked_len(what, data.len())?;
    buf.push(tag.byte());
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(data);
    Ok(())
}

/// Reads the payload of a non-container value whose tag has been consumed.
pub(crate) fn decode_scalar(tag: Tag, reader: &mut Reader<'_>) -> CodecResult<Value> {
    if let Some(class) = IntClass::from_tag(tag) {
        return class.read_payload(reader).map(Value::Int);
    }
    Ok(match tag {
        Tag::Null => Value::Null,
        Tag::False => Value::Bool(false),
        Tag::True => Value::Bool(true),
        Tag::Float => Value::Float(numeric::decode_float(reader)?),
        Tag::Decimal => Value::Decimal(numeric::decode_decimal(reader)?),
        Tag::Text => {
            let len = usize::from(reader.read_u16()?);
            let bytes = reader.read_slice(len)?;
            let s = std::str::from_utf8(bytes)
                .map_err(|e| CodecError::malformed(format!("invalid UTF-8: {e}")))?;
            Value::Text(s.to_owned())
        }
        Tag::Bytes => {
            let len = usize::from(reader.read_u16()?);
            Value::Bytes(reader.read_slice(len)?.to_vec())
        }
        Tag::Instant => {
            let byte = reader.read_u8()?;
            let resolution = TimeResolution::from_byte(byte).ok_or_else(|| {
                CodecError::malformed(format!("unknown time resolution {byte:#04x}"))
            })?;
            let count = i64::from_be_bytes(reader.read_array::<8>()?);
            Value::Instant(units_to_instant(count, resolution)?)
        }
        _ => {
            return Err(CodecError::malformed(format!("tag {tag:?} has no scalar payload")));
        }
    })
}

/// Counts `resolution` units since the Unix epoch, truncating toward the past.
///
/// A leap second (`23:59:60.x`) has no count of its own and is rejected.
pub(crate) fn instant_to_units(t: &DateTime<Utc>, resolution: TimeResolution) -> CodecResult<i64> {
    let overflow = || {
        CodecError::RangeExceeded(format!("instant {t} does not fit in i64 at {resolution:?} resolution"))
    };
    let subsec = t.timestamp_subsec_nanos();
    if subsec >= 1_000_000_000 {
        return Err(CodecError::RangeExceeded(format!("instant {t} falls in a leap second")));
    }
    let sub_units = i64::from(subsec) / resolution.nanos_per_unit();
    t.timestamp()
        .checked_mul(resolution.units_per_second())
        .and_then(|units| units.checked_add(sub_units))
        .ok_or_else(overflow)
}

pub(crate) fn units_to_instant(count: i64, resolution: TimeResolution) -> CodecResult<DateTime<Utc>> {
    let per_second = resolution.units_per_second();
    let secs = count.div_euclid(per_second);
    let nanos = u32::try_from(count.rem_euclid(per_second) * resolution.nanos_per_unit())
        .map_err(|_| CodecError::malformed("instant sub-second part out of range"))?;
    DateTime::from_timestamp(secs, nanos).ok_or_else(|| {
        CodecError::malformed(format!("instant count {count} at {resolution:?} resolution is out of range"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn encoded(value: &Value) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_scalar(value, &CodecConfig::default(), &mut buf).unwrap();
        buf
    }

    fn decoded(bytes: &[u8]) -> CodecResult<Value> {
        let mut reader = Reader::new(bytes);
        let tag = Tag::from_byte(reader.read_u8()?).unwrap();
        decode_scalar(tag, &mut reader)
    }

    #[test]
    fn tag_only_values() {
        assert_eq!(encoded(&Value::Null), vec![Tag::Null.byte()]);
        assert_eq!(encoded(&Value::Bool(false)), vec![Tag::False.byte()]);
        assert_eq!(encoded(&Value::Bool(true)), vec![Tag::True.byte()]);
        assert_eq!(decoded(&[Tag::True.byte()]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn text_layout() {
        assert_eq!(encoded(&Value::from("x")), vec![Tag::Text.byte(), 0x00, 0x01, b'x']);
        assert_eq!(decoded(&encoded(&Value::from("h\u{e9}llo"))).unwrap(), Value::from("h\u{e9}llo"));
    }

    #[test]
    fn length_limits() {
        let max = Value::Bytes(vec![7; MAX_LEN]);
        assert_eq!(encoded(&max).len(), 3 + MAX_LEN);

        let mut buf = Vec::new();
        let err = encode_scalar(&Value::Text("a".repeat(MAX_LEN + 1)), &CodecConfig::default(), &mut buf)
            .unwrap_err();
        assert_eq!(err, CodecError::size_limit("text", MAX_LEN + 1, MAX_LEN));
        assert!(buf.is_empty());
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = decoded(&[Tag::Text.byte(), 0x00, 0x02, 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload(_)));
    }

    #[test]
    fn truncated_text() {
        let err = decoded(&[Tag::Text.byte(), 0x00, 0x0A, b'a', b'b']).unwrap_err();
        assert_eq!(err, CodecError::Truncated { needed: 10, available: 2, offset: 3 });
    }

    #[test]
    fn containers_are_not_scalars() {
        let mut buf = Vec::new();
        let err = encode_scalar(&Value::List(vec![]), &CodecConfig::default(), &mut buf).unwrap_err();
        assert_eq!(err, CodecError::UnsupportedType { type_name: "list" });
    }

    #[test]
    fn instant_layout() {
        let t = Utc.timestamp_opt(1, 500_000_000).unwrap();
        let bytes = encoded(&Value::Instant(t));
        let mut expected = vec![Tag::Instant.byte(), TimeResolution::Micros.to_byte()];
        expected.extend_from_slice(&1_500_000i64.to_be_bytes());
        assert_eq!(bytes, expected);
        assert_eq!(decoded(&bytes).unwrap(), Value::Instant(t));
    }

    #[test]
    fn instants_truncate_toward_the_past() {
        let t = Utc.timestamp_opt(-2, 999_999_999).unwrap();
        assert_eq!(instant_to_units(&t, TimeResolution::Seconds).unwrap(), -2);
        assert_eq!(instant_to_units(&t, TimeResolution::Millis).unwrap(), -1_001);
        assert_eq!(units_to_instant(-1_001, TimeResolution::Millis).unwrap(), Utc.timestamp_opt(-2, 999_000_000).unwrap());
    }

    #[test]
    fn leap_seconds_are_rejected() {
        let leap = chrono::NaiveDate::from_ymd_opt(2016, 12, 31)
            .unwrap()
            .and_hms_nano_opt(23, 59, 59, 1_500_000_000)
            .unwrap()
            .and_utc();
        for resolution in [TimeResolution::Seconds, TimeResolution::Micros, TimeResolution::Nanos] {
            assert!(matches!(instant_to_units(&leap, resolution), Err(CodecError::RangeExceeded(_))));
        }

        let mut buf = Vec::new();
        let err = encode_scalar(&Value::Instant(leap), &CodecConfig::default(), &mut buf).unwrap_err();
        assert!(matches!(err, CodecError::RangeExceeded(_)));
        assert!(buf.is_empty());

        // the last microsecond before the leap second round-trips
        let before = Utc.timestamp_opt(leap.timestamp(), 999_999_000).unwrap();
        assert_eq!(decoded(&encoded(&Value::Instant(before))).unwrap(), Value::Instant(before));
    }

    #[test]
    fn nanosecond_overflow() {
        let t = Utc.with_ymd_and_hms(3000, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(instant_to_units(&t, TimeResolution::Nanos), Err(CodecError::RangeExceeded(_))));
        assert!(instant_to_units(&t, TimeResolution::Micros).is_ok());
    }

    #[test]
    fn bad_resolution_byte() {
        let mut bytes = vec![Tag::Instant.byte(), 0x09];
        bytes.extend_from_slice(&0i64.to_be_bytes());
        assert!(matches!(decoded(&bytes), Err(CodecError::MalformedPayload(_))));
    }

    #[test]
    fn out_of_range_instant_is_malformed() {
        let mut bytes = vec![Tag::Instant.byte(), TimeResolution::Seconds.to_byte()];
        bytes.extend_from_slice(&i64::MAX.to_be_bytes());
        assert!(matches!(decoded(&bytes), Err(CodecError::MalformedPayload(_))));
    }

    #[test]
    fn any_resolution_decodes() {
        let mut bytes = vec![Tag::Instant.byte(), TimeResolution::Nanos.to_byte()];
        bytes.extend_from_slice(&1_000_000_001i64.to_be_bytes());
        assert_eq!(decoded(&bytes).unwrap(), Value::Instant(Utc.timestamp_opt(1, 1).unwrap()));
    }
}
