//! Integer width classes and the value-codec number formats.
//!
//! # Integers
//!
//! Every integer in `[-2^63, 2^64-1]` belongs to exactly one of eight width
//! classes. The classes partition the number line in tag order, so the same
//! classification also orders integers in the index codec:
//!
//! | Class | Range | Payload |
//! |-------|-------|---------|
//! | `I64` | `[-2^63, -2^31-1]` | 8 bytes |
//! | `I32` | `[-2^31, -2^15-1]` | 4 bytes |
//! | `I16` | `[-2^15, -129]` | 2 bytes |
//! | `I8`  | `[-128, 127]` | 1 byte |
//! | `U8`  | `[128, 255]` | 1 byte |
//! | `U16` | `[256, 65535]` | 2 bytes |
//! | `U32` | `[65536, 2^32-1]` | 4 bytes |
//! | `U64` | `[2^32, 2^64-1]` | 8 bytes |
//!
//! The payload is the low `width` bytes of the big-endian two's complement.
//! The decoder accepts any integer tag with a payload of its width, whether or
//! not the encoder would have chosen that class.
//!
//! # Floats
//!
//! Tag + 8 bytes of raw IEEE-754 bits, big-endian.
//!
//! # Decimals
//!
//! Tag + state byte (`0` positive, `1` negative, `2` +Infinity, `3` -Infinity).
//! Finite decimals continue with a `u16` digit count, the digits packed two per
//! byte (high nibble first, an odd count padded with a zero nibble), and the
//! exponent as a nested integer (integer tag + payload).

use crate::error::{CodecError, CodecResult};
use crate::types::Decimal;

use super::reader::Reader;
use super::tags::Tag;

/// One of the eight integer width classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntClass {
    I64,
    I32,
    I16,
    I8,
    U8,
    U16,
    U32,
    U64,
}

impl IntClass {
    /// Picks the class an integer belongs to.
    pub(crate) fn of(value: i128) -> CodecResult<Self> {
        Ok(match value {
            v if v < i128::from(i64::MIN) => return Err(out_of_range(value)),
            v if v < i128::from(i32::MIN) => Self::I64,
            v if v < i128::from(i16::MIN) => Self::I32,
            v if v < i128::from(i8::MIN) => Self::I16,
            v if v <= i128::from(i8::MAX) => Self::I8,
            v if v <= i128::from(u8::MAX) => Self::U8,
            v if v <= i128::from(u16::MAX) => Self::U16,
            v if v <= i128::from(u32::MAX) => Self::U32,
            v if v <= i128::from(u64::MAX) => Self::U64,
            _ => return Err(out_of_range(value)),
        })
    }

    pub(crate) const fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            Tag::I64 => Some(Self::I64),
            Tag::I32 => Some(Self::I32),
            Tag::I16 => Some(Self::I16),
            Tag::I8 => Some(Self::I8),
            Tag::U8 => Some(Self::U8),
            Tag::U16 => Some(Self::U16),
            Tag::U32 => Some(Self::U32),
            Tag::U64 => Some(Self::U64),
            _ => None,
        }
    }

    pub(crate) const fn tag(self) -> Tag {
        match self {
            Self::I64 => Tag::I64,
            Self::I32 => Tag::I32,
            Self::I16 => Tag::I16,
            Self::I8 => Tag::I8,
            Self::U8 => Tag::U8,
            Self::U16 => Tag::U16,
            Self::U32 => Tag::U32,
            Self::U64 => Tag::U64,
        }
    }

    /// Payload width in bytes.
    pub(crate) const fn width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 => 4,
            Self::I64 | Self::U64 => 8,
        }
    }

    pub(crate) const fn is_signed(self) -> bool {
        matches!(self, Self::I64 | Self::I32 | Self::I16 | Self::I8)
    }

    /// Appends the payload of `value`, which must belong to this class.
    pub(crate) fn write_payload(self, value: i128, buf: &mut Vec<u8>) {
        let bytes = value.to_be_bytes();
        buf.extend_from_slice(&bytes[bytes.len() - self.width()..]);
    }

    /// Reads a payload of this class's width.
    pub(crate) fn read_payload(self, reader: &mut Reader<'_>) -> CodecResult<i128> {
        let payload = reader.read_slice(self.width())?;
        let negative = self.is_signed() && payload[0] & 0x80 != 0;
        let mut full = if negative { [0xFF; 16] } else { [0x00; 16] };
        full[16 - payload.len()..].copy_from_slice(payload);
        Ok(i128::from_be_bytes(full))
    }
}

fn out_of_range(value: i128) -> CodecError {
    CodecError::RangeExceeded(format!("integer {value} is outside [-2^63, 2^64-1]"))
}

/// Writes an integer as tag + minimal-class payload.
pub(crate) fn encode_int(value: i128, buf: &mut Vec<u8>) -> CodecResult<()> {
    let class = IntClass::of(value)?;
    buf.push(class.tag().byte());
    class.write_payload(value, buf);
    Ok(())
}

pub(crate) fn encode_float(value: f64, buf: &mut Vec<u8>) {
    buf.push(Tag::Float.byte());
    buf.extend_from_slice(&value.to_bits().to_be_bytes());
}

pub(crate) fn decode_float(reader: &mut Reader<'_>) -> CodecResult<f64> {
    reader.read_array::<8>().map(|bytes| f64::from_bits(u64::from_be_bytes(bytes)))
}

mod state {
    pub const POSITIVE: u8 = 0x00;
    pub const NEGATIVE: u8 = 0x01;
    pub const INFINITY: u8 = 0x02;
    pub const NEG_INFINITY: u8 = 0x03;
}

/// Checks a decimal coefficient's digit count against the 16-bit limit.
pub(crate) fn checked_digit_count(coefficient: &str) -> CodecResult<u16> {
    u16::try_from(coefficient.len()).map_err(|_| {
        CodecError::size_limit("decimal coefficient", coefficient.len(), usize::from(u16::MAX))
    })
}

pub(crate) fn encode_decimal(value: &Decimal, buf: &mut Vec<u8>) -> CodecResult<()> {
    let (Some(coefficient), Some(exponent)) = (value.coefficient(), value.exponent()) else {
        buf.push(Tag::Decimal.byte());
        buf.push(if value.is_sign_negative() { state::NEG_INFINITY } else { state::INFINITY });
        return Ok(());
    };

    let count = checked_digit_count(coefficient)?;
    let digits = coefficient.as_bytes();

    buf.push(Tag::Decimal.byte());
    buf.push(if value.is_sign_negative() { state::NEGATIVE } else { state::POSITIVE });
    buf.extend_from_slice(&count.to_be_bytes());
    for pair in digits.chunks(2) {
        let high = pair[0] - b'0';
        let low = pair.get(1).map_or(0, |d| d - b'0');
        buf.push(high << 4 | low);
    }
    encode_int(i128::from(exponent), buf)
}

pub(crate) fn decode_decimal(reader: &mut Reader<'_>) -> CodecResult<Decimal> {
    let negative = match reader.read_u8()? {
        state::POSITIVE => false,
        state::NEGATIVE => true,
        state::INFINITY => return Ok(Decimal::infinity()),
        state::NEG_INFINITY => return Ok(Decimal::neg_infinity()),
        other => return Err(CodecError::malformed(format!("unknown decimal state {other:#04x}"))),
    };

    let count = usize::from(reader.read_u16()?);
    if count == 0 {
        return Err(CodecError::malformed("decimal coefficient has no digits"));
    }
    let packed = reader.read_slice(count.div_ceil(2))?;
    let mut digits = String::with_capacity(count);
    for (i, byte) in packed.iter().enumerate() {
        for (j, nibble) in [byte >> 4, byte & 0x0F].into_iter().enumerate() {
            if 2 * i + j >= count {
                if nibble != 0 {
                    return Err(CodecError::malformed("non-zero decimal padding nibble"));
                }
            } else if nibble > 9 {
                return Err(CodecError::malformed(format!("invalid decimal digit {nibble:#x}")));
            } else {
                digits.push(char::from(b'0' + nibble));
            }
        }
    }

    let offset = reader.position();
    let tag = reader.read_u8()?;
    let class = Tag::from_byte(tag).and_then(IntClass::from_tag).ok_or_else(|| {
        CodecError::malformed(format!("decimal exponent has non-integer tag {tag:#04x} at offset {offset}"))
    })?;
    let exponent = class.read_payload(reader)?;
    let exponent = i64::try_from(exponent)
        .map_err(|_| CodecError::malformed(format!("decimal exponent {exponent} exceeds i64")))?;

    Decimal::new(negative, &digits, exponent)
}
