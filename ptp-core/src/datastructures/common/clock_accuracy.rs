/// Estimated accuracy of a clock, IEEE 1588-2019 Table 6.
///
/// The wire values are ordered so that *lower is better*, but they also sort
/// in increasing numeric order — the comparator (`bmc::comparator`) relies on
/// comparing the raw wire values directly rather than re-deriving a semantic
/// ranking, matching `dscmp`'s plain `<`/`>` on `quality.clockAccuracy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockAccuracy(u8);

impl ClockAccuracy {
    pub const PS1: ClockAccuracy = ClockAccuracy(0x17);
    pub const PS2_5: ClockAccuracy = ClockAccuracy(0x18);
    pub const NS10: ClockAccuracy = ClockAccuracy(0x19);
    pub const NS25: ClockAccuracy = ClockAccuracy(0x1a);
    pub const NS100: ClockAccuracy = ClockAccuracy(0x1b);
    pub const NS250: ClockAccuracy = ClockAccuracy(0x1c);
    pub const US1: ClockAccuracy = ClockAccuracy(0x1d);
    pub const US2_5: ClockAccuracy = ClockAccuracy(0x1e);
    pub const US10: ClockAccuracy = ClockAccuracy(0x1f);
    pub const US25: ClockAccuracy = ClockAccuracy(0x20);
    pub const US100: ClockAccuracy = ClockAccuracy(0x21);
    pub const US250: ClockAccuracy = ClockAccuracy(0x22);
    pub const MS1: ClockAccuracy = ClockAccuracy(0x23);
    pub const MS2_5: ClockAccuracy = ClockAccuracy(0x24);
    pub const MS10: ClockAccuracy = ClockAccuracy(0x25);
    pub const MS25: ClockAccuracy = ClockAccuracy(0x26);
    pub const MS100: ClockAccuracy = ClockAccuracy(0x27);
    pub const MS250: ClockAccuracy = ClockAccuracy(0x28);
    pub const S1: ClockAccuracy = ClockAccuracy(0x29);
    pub const S10: ClockAccuracy = ClockAccuracy(0x2a);
    pub const GT10S: ClockAccuracy = ClockAccuracy(0x2b);
    pub const UNKNOWN: ClockAccuracy = ClockAccuracy(0xfe);

    pub const fn from_primitive(value: u8) -> Self {
        ClockAccuracy(value)
    }

    pub const fn to_primitive(self) -> u8 {
        self.0
    }

    /// The numeric ordering used directly by the dataset comparator. Kept as
    /// a separate method name (rather than relying only on `Ord`) to make
    /// the comparator's intent explicit at call sites.
    pub fn cmp_numeric(&self, other: &Self) -> core::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Default for ClockAccuracy {
    fn default() -> Self {
        ClockAccuracy::UNKNOWN
    }
}
