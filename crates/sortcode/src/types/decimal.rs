//! Arbitrary-precision decimal numbers.
//!
//! A [`Decimal`] is either a finite number `(-1)^sign * coefficient * 10^exponent`
//! with an unbounded digit-string coefficient and an `i64` exponent, or one of
//! the two infinities.
//!
//! Equality is structural: `1.0` (coefficient `10`, exponent `-1`) and `1`
//! (coefficient `1`, exponent `0`) are different decimals, as are `0` and `-0`.
//! The index codec is where numerically equal decimals meet.
//!
//! # Example
//!
//! ```
//! use sortcode::Decimal;
//!
//! let price: Decimal = "-1.50".parse().unwrap();
//! assert_eq!(price.coefficient(), Some("150"));
//! assert_eq!(price.exponent(), Some(-2));
//! assert!(price.is_sign_negative());
//! assert_eq!(price.to_string(), "-150e-2");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CodecError, CodecResult};

/// A decimal number with an exact digit-string coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    repr: Repr,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Finite { negative: bool, coefficient: String, exponent: i64 },
    Infinity,
    NegInfinity,
}

impl Decimal {
    /// Creates a finite decimal from a sign, ASCII digit coefficient and exponent.
    ///
    /// Leading zeros of the coefficient are removed; a lone `0` is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedPayload`] if the coefficient is empty or
    /// contains anything other than ASCII digits.
    pub fn new(negative: bool, coefficient: &str, exponent: i64) -> CodecResult<Self> {
        if coefficient.is_empty() || !coefficient.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::malformed(format!(
                "invalid decimal coefficient {coefficient:?}"
            )));
        }
        let trimmed = coefficient.trim_start_matches('0');
        let coefficient = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(Self { repr: Repr::Finite { negative, coefficient: coefficient.to_owned(), exponent } })
    }

    /// Positive infinity.
    #[must_use]
    pub const fn infinity() -> Self {
        Self { repr: Repr::Infinity }
    }

    /// Negative infinity.
    #[must_use]
    pub const fn neg_infinity() -> Self {
        Self { repr: Repr::NegInfinity }
    }

    /// Returns `true` for either infinity.
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self.repr, Repr::Infinity | Repr::NegInfinity)
    }

    /// Returns `true` if the sign is negative, including `-0` and negative infinity.
    #[must_use]
    pub const fn is_sign_negative(&self) -> bool {
        match &self.repr {
            Repr::Finite { negative, .. } => *negative,
            Repr::Infinity => false,
            Repr::NegInfinity => true,
        }
    }

    /// Returns `true` if this is a finite zero of either sign and any exponent.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(&self.repr, Repr::Finite { coefficient, .. } if coefficient == "0")
    }

    /// The coefficient digits of a finite decimal.
    #[must_use]
    pub fn coefficient(&self) -> Option<&str> {
        match &self.repr {
            Repr::Finite { coefficient, .. } => Some(coefficient),
            _ => None,
        }
    }

    /// The exponent of a finite decimal.
    #[must_use]
    pub const fn exponent(&self) -> Option<i64> {
        match &self.repr {
            Repr::Finite { exponent, .. } => Some(*exponent),
            _ => None,
        }
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self {
            repr: Repr::Finite {
                negative: value < 0,
                coefficient: value.unsigned_abs().to_string(),
                exponent: 0,
            },
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Infinity => f.write_str("Infinity"),
            Repr::NegInfinity => f.write_str("-Infinity"),
            Repr::Finite { negative, coefficient, exponent } => {
                if *negative {
                    f.write_str("-")?;
                }
                f.write_str(coefficient)?;
                if *exponent != 0 {
                    write!(f, "e{exponent}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Decimal {
    type Err = CodecError;

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]` or `[+-]inf[inity]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CodecError::malformed(format!("invalid decimal literal {s:?}"));

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
            return Ok(if negative { Self::neg_infinity() } else { Self::infinity() });
        }

        let (mantissa, exp) = match body.find(['e', 'E']) {
            Some(pos) => {
                let exp: i64 = body[pos + 1..].parse().map_err(|_| invalid())?;
                (&body[..pos], exp)
            }
            None => (body, 0),
        };

        let (int_digits, frac_digits) = match mantissa.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (mantissa, ""),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid());
        }
        if !int_digits.bytes().chain(frac_digits.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let frac_len = i64::try_from(frac_digits.len()).map_err(|_| invalid())?;
        let exponent = exp.checked_sub(frac_len).ok_or_else(invalid)?;
        Self::new(negative, &format!("{int_digits}{frac_digits}"), exponent)
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
