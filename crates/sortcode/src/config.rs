//! Codec configuration.

/// Default maximum container nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration shared by the value and index codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum container nesting depth accepted by encode and decode
    /// (default: 512). A top-level list has depth 1.
    pub max_depth: usize,

    /// Resolution used when writing instants (default: microseconds).
    pub time_resolution: TimeResolution,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, time_resolution: TimeResolution::Micros }
    }
}

impl CodecConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum container nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the resolution used when writing instants.
    #[must_use]
    pub const fn with_time_resolution(mut self, resolution: TimeResolution) -> Self {
        self.time_resolution = resolution;
        self
    }
}

/// Unit in which instants are counted since the Unix epoch.
///
/// Coarser units truncate toward the past when encoding. The unit is written
/// into every value-codec instant, so decoding never depends on configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeResolution {
    /// Whole seconds.
    Seconds,
    /// Milliseconds.
    Millis,
    /// Microseconds.
    Micros,
    /// Nanoseconds. Limits instants to roughly the years 1677 to 2262.
    Nanos,
}

impl TimeResolution {
    /// Number of units in one second.
    #[must_use]
    pub const fn units_per_second(self) -> i64 {
        match self {
            Self::Seconds => 1,
            Self::Millis => 1_000,
            Self::Micros => 1_000_000,
            Self::Nanos => 1_000_000_000,
        }
    }

    /// Nanoseconds in one unit.
    #[must_use]
    pub const fn nanos_per_unit(self) -> i64 {
        1_000_000_000 / self.units_per_second()
    }

    /// The byte identifying this resolution on the wire.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Seconds => 0,
            Self::Millis => 1,
            Self::Micros => 2,
            Self::Nanos => 3,
        }
    }

    /// Parses a wire byte back into a resolution.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Seconds),
            1 => Some(Self::Millis),
            2 => Some(Self::Micros),
            3 => Some(Self::Nanos),
            _ => None,
        }
    }
}
