//! Order-preserving encoding of numbers for index keys.
//!
//! Integers, floats and decimals share one numeric space: each number is first
//! converted to an exact decimal (floats are expanded from their binary value,
//! which is always a finite decimal), and equal numbers produce identical bytes
//! regardless of the variant they came from.
//!
//! # Layout
//!
//! Let `f` be the floor of a finite number `x`:
//!
//! - if `f` fits an integer class, the field is that class's tag and sign-flipped
//!   payload. A non-integral `x` appends its fractional part `x - f`:
//!   - `x > 0`: 8 bytes of `u64::MAX - z` then the significant fraction digits
//!     as nibbles `d + 1`, where `z` counts the zeros right after the point;
//!   - `x < 0`: 8 bytes of `z` then nibbles `14 - d` of the digits of `|x| - |trunc(x)|`,
//!     closed by a `0xF` nibble, so larger magnitudes sort first;
//! - otherwise the field is `POS_BIG` (or `NEG_BIG`) followed by the decimal
//!   scale biased into 16 bytes (complemented for negatives) and the digit
//!   nibbles as above.
//!
//! Zero of any sign or variant is the integer `0`. Infinities and NaN get
//! their own tags; NaN sorts after positive infinity.

use num_bigint::BigUint;

use crate::error::{CodecError, CodecResult};
use crate::types::{Decimal, Value};

use super::numeric::{checked_digit_count, IntClass};
use super::tags::Tag;

/// Sign bit of the first payload byte of a signed class.
const SIGN_BIT: u8 = 0x80;

/// Bias that maps an `i128` scale to an order-preserving `u128`.
const SCALE_BIAS: u128 = 1 << 127;

/// Integers with more digits than this cannot fit any integer class.
const MAX_CLASS_DIGITS: i128 = 20;

/// Appends the tag and payload of a numeric value.
pub(crate) fn encode_number(value: &Value, field: &mut Vec<u8>) -> CodecResult<()> {
    let number = match value {
        Value::Int(i) => {
            IntClass::of(*i)?;
            Number::Finite(Finite::from_int(*i))
        }
        Value::Float(f) => Number::from_float(*f),
        Value::Decimal(d) => {
            if let Some(coefficient) = d.coefficient() {
                checked_digit_count(coefficient)?;
            }
            Number::from_decimal(d)
        }
        other => return Err(CodecError::UnsupportedType { type_name: other.type_name() }),
    };

    match number {
        Number::Nan => field.push(Tag::Nan.byte()),
        Number::NegInfinity => field.push(Tag::NegInfinity.byte()),
        Number::PosInfinity => field.push(Tag::PosInfinity.byte()),
        Number::Finite(finite) => finite.encode(field)?,
    }
    Ok(())
}

/// Writes an integer class payload with the sign bit flipped for signed classes.
pub(crate) fn write_class_payload(class: IntClass, value: i128, field: &mut Vec<u8>) {
    let start = field.len();
    class.write_payload(value, field);
    if class.is_signed() {
        field[start] ^= SIGN_BIT;
    }
}

enum Number {
    Nan,
    NegInfinity,
    PosInfinity,
    Finite(Finite),
}

impl Number {
    fn from_float(f: f64) -> Self {
        if f.is_nan() {
            return Self::Nan;
        }
        if f.is_infinite() {
            return if f < 0.0 { Self::NegInfinity } else { Self::PosInfinity };
        }
        Self::Finite(Finite::from_float(f))
    }

    fn from_decimal(d: &Decimal) -> Self {
        match (d.coefficient(), d.exponent()) {
            (Some(coefficient), Some(exponent)) => {
                let digits = coefficient.bytes().map(|b| b - b'0').collect();
                Self::Finite(Finite::new(d.is_sign_negative(), digits, i128::from(exponent)))
            }
            _ if d.is_sign_negative() => Self::NegInfinity,
            _ => Self::PosInfinity,
        }
    }
}

/// `(-1)^negative * digits * 10^exponent`, normalized: no leading or trailing
/// zero digits, and zero is the empty, non-negative digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Finite {
    negative: bool,
    digits: Vec<u8>,
    exponent: i128,
}

impl Finite {
    fn new(negative: bool, mut digits: Vec<u8>, mut exponent: i128) -> Self {
        let leading = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        while digits.last() == Some(&0) {
            digits.pop();
            exponent += 1;
        }
        if digits.is_empty() {
            return Self { negative: false, digits, exponent: 0 };
        }
        Self { negative, digits, exponent }
    }

    fn from_int(value: i128) -> Self {
        let digits = value.unsigned_abs().to_string().bytes().map(|b| b - b'0').collect();
        Self::new(value < 0, digits, 0)
    }

    /// Expands a finite float to its exact decimal value.
    fn from_float(f: f64) -> Self {
        let bits = f.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7FF) as i32;
        let fraction = bits & ((1 << 52) - 1);
        let (mut mantissa, mut exp2) =
            if biased == 0 { (fraction, -1074) } else { (fraction | 1 << 52, biased - 1075) };
        if mantissa == 0 {
            return Self::new(false, Vec::new(), 0);
        }
        let shift = mantissa.trailing_zeros();
        mantissa >>= shift;
        exp2 += shift as i32;

        // m * 2^e == m * 5^-e / 10^-e for negative e
        let (magnitude, exponent) = if exp2 >= 0 {
            (BigUint::from(mantissa) << exp2.unsigned_abs(), 0)
        } else {
            let k = exp2.unsigned_abs();
            (BigUint::from(mantissa) * BigUint::from(5u32).pow(k), -i128::from(k))
        };
        let digits = magnitude.to_string().bytes().map(|b| b - b'0').collect();
        Self::new(negative, digits, exponent)
    }

    fn encode(&self, field: &mut Vec<u8>) -> CodecResult<()> {
        let len = self.digits.len() as i128;
        let int_digits = len + self.exponent;
        if int_digits > MAX_CLASS_DIGITS {
            self.encode_big(int_digits, field);
            return Ok(());
        }

        // Split into integer part and fraction digits with z leading zeros.
        let (int_part, fraction, zeros) = if int_digits <= 0 {
            let zeros = u64::try_from(-int_digits)
                .map_err(|_| CodecError::RangeExceeded(format!("decimal scale {int_digits} is too small")))?;
            (0u128, &self.digits[..], zeros)
        } else {
            let split = int_digits.min(len) as usize;
            let mut int_part = self.digits[..split].iter().fold(0u128, |acc, &d| acc * 10 + u128::from(d));
            for _ in len..int_digits {
                int_part *= 10;
            }
            (int_part, &self.digits[split..], 0)
        };

        if self.negative {
            let magnitude = int_part as i128;
            let floor = if fraction.is_empty() { -magnitude } else { -magnitude - 1 };
            let Ok(class) = IntClass::of(floor) else {
                self.encode_big(int_digits, field);
                return Ok(());
            };
            field.push(class.tag().byte());
            write_class_payload(class, floor, field);
            if !fraction.is_empty() {
                field.extend_from_slice(&zeros.to_be_bytes());
                push_negative_nibbles(fraction, field);
            }
        } else {
            let Ok(class) = IntClass::of(int_part as i128) else {
                self.encode_big(int_digits, field);
                return Ok(());
            };
            field.push(class.tag().byte());
            write_class_payload(class, int_part as i128, field);
            if !fraction.is_empty() {
                field.extend_from_slice(&(u64::MAX - zeros).to_be_bytes());
                push_positive_nibbles(fraction, field);
            }
        }
        Ok(())
    }

    /// Numbers outside every integer class: biased scale, then all digits.
    fn encode_big(&self, int_digits: i128, field: &mut Vec<u8>) {
        let scale = ((int_digits - 1) as u128 ^ SCALE_BIAS).to_be_bytes();
        if self.negative {
            field.push(Tag::NegBig.byte());
            field.extend(scale.iter().map(|b| !b));
            push_negative_nibbles(&self.digits, field);
        } else {
            field.push(Tag::PosBig.byte());
            field.extend_from_slice(&scale);
            push_positive_nibbles(&self.digits, field);
        }
    }
}

/// Digits as nibbles `d + 1`, padded with a zero nibble.
fn push_positive_nibbles(digits: &[u8], field: &mut Vec<u8>) {
    for pair in digits.chunks(2) {
        let high = pair[0] + 1;
        let low = pair.get(1).map_or(0, |d| d + 1);
        field.push(high << 4 | low);
    }
}

/// Digits as nibbles `14 - d`, then a `0xF` terminator, padded with `0xF`.
fn push_negative_nibbles(digits: &[u8], field: &mut Vec<u8>) {
    let mut nibbles = digits.iter().map(|d| 14 - d).chain(std::iter::once(0xF));
    while let Some(high) = nibbles.next() {
        let low = nibbles.next().unwrap_or(0xF);
        field.push(high << 4 | low);
    }
}
