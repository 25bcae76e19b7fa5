//! The type-tag table shared by the value and index codecs.
//!
//! Tags are ordered so that the index codec can compare fields by their first
//! byte: null, booleans, then the numeric classes from negative infinity to
//! NaN, then instants, bytes and text. Containers and the value-codec-only
//! number encodings come after everything the index codec writes.

/// A one-byte type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Null.
    Null = 0x01,
    /// Boolean false.
    False = 0x02,
    /// Boolean true.
    True = 0x03,
    /// Negative infinity (index only).
    NegInfinity = 0x10,
    /// Numbers below `-2^63` (index only).
    NegBig = 0x11,
    /// Integer class `[-2^63, -2^31-1]`.
    I64 = 0x12,
    /// Integer class `[-2^31, -2^15-1]`.
    I32 = 0x13,
    /// Integer class `[-2^15, -129]`.
    I16 = 0x14,
    /// Integer class `[-128, 127]`.
    I8 = 0x15,
    /// Integer class `[128, 255]`.
    U8 = 0x16,
    /// Integer class `[256, 65535]`.
    U16 = 0x17,
    /// Integer class `[65536, 2^32-1]`.
    U32 = 0x18,
    /// Integer class `[2^32, 2^64-1]`.
    U64 = 0x19,
    /// Numbers of `2^64` and above (index only).
    PosBig = 0x1A,
    /// Positive infinity (index only).
    PosInfinity = 0x1B,
    /// Float NaN (index only).
    Nan = 0x1C,
    /// IEEE-754 double (value codec only).
    Float = 0x1D,
    /// Decimal (value codec only).
    Decimal = 0x1E,
    /// Instant.
    Instant = 0x20,
    /// Raw bytes.
    Bytes = 0x21,
    /// UTF-8 text.
    Text = 0x22,
    /// List.
    List = 0x30,
    /// Tuple.
    Tuple = 0x31,
    /// Set.
    Set = 0x32,
    /// Mapping.
    Mapping = 0x33,
}

impl Tag {
    /// The tag byte.
    #[inline]
    #[must_use]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Looks up a tag byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x01 => Self::Null,
            0x02 => Self::False,
            0x03 => Self::True,
            0x10 => Self::NegInfinity,
            0x11 => Self::NegBig,
            0x12 => Self::I64,
            0x13 => Self::I32,
            0x14 => Self::I16,
            0x15 => Self::I8,
            0x16 => Self::U8,
            0x17 => Self::U16,
            0x18 => Self::U32,
            0x19 => Self::U64,
            0x1A => Self::PosBig,
            0x1B => Self::PosInfinity,
            0x1C => Self::Nan,
            0x1D => Self::Float,
            0x1E => Self::Decimal,
            0x20 => Self::Instant,
            0x21 => Self::Bytes,
            0x22 => Self::Text,
            0x30 => Self::List,
            0x31 => Self::Tuple,
            0x32 => Self::Set,
            0x33 => Self::Mapping,
            _ => return None,
        })
    }

    /// Returns `true` for tags that only the index codec writes.
    ///
    /// These never appear in value streams and are rejected by the decoder.
    #[must_use]
    pub const fn is_index_only(self) -> bool {
        matches!(self, Self::NegInfinity | Self::NegBig | Self::PosBig | Self::PosInfinity | Self::Nan)
    }
}
