use core::time::Duration as CoreDuration;

/// A logarithmic interval, as used for `logAnnounceInterval`,
/// `logSyncInterval` and `logMinDelayReqInterval`.
///
/// The wire value is the base-2 logarithm of the interval in seconds, e.g. a
/// value of `0` means once per second, `-3` means 8 times per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval(i8);

impl Interval {
    pub const ONE_SECOND: Interval = Interval(0);
    pub const TWO_SECONDS: Interval = Interval(1);

    pub const fn from_log_2(value: i8) -> Self {
        Interval(value)
    }

    pub const fn as_log_2(self) -> i8 {
        self.0
    }

    /// The interval as a [`CoreDuration`], saturating at zero for negative
    /// exponents smaller than a nanosecond can represent.
    pub fn as_core_duration(self) -> CoreDuration {
        if self.0 >= 0 {
            CoreDuration::from_secs(1u64 << self.0.min(62))
        } else {
            let denom = 1u64 << (-self.0).min(62);
            CoreDuration::from_nanos(1_000_000_000 / denom)
        }
    }
}

impl From<i8> for Interval {
    fn from(value: i8) -> Self {
        Interval::from_log_2(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_second_is_one_second() {
        assert_eq!(Interval::ONE_SECOND.as_core_duration(), CoreDuration::from_secs(1));
    }

    #[test]
    fn negative_halves() {
        assert_eq!(
            Interval::from_log_2(-1).as_core_duration(),
            CoreDuration::from_millis(500)
        );
    }
}
