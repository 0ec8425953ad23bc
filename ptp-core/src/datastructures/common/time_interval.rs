use core::ops::{Deref, DerefMut};

use az::SaturatingAs;
use fixed::types::I48F16;

use crate::datastructures::{WireFormat, WireFormatError};
use crate::time::Duration;

/// A signed fixed-point duration in units of 2^-16 nanoseconds, as used for
/// the `correctionField` of every PTP event and general message.
///
/// This is the exact representation the transparent clock forwarder
/// accumulates residence time, peer delay and asymmetry into before writing
/// it back onto the wire — see [`crate::tc::forwarder`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeInterval(pub I48F16);

impl Deref for TimeInterval {
    type Target = I48F16;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TimeInterval {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl TimeInterval {
    pub fn to_nanos(self) -> f64 {
        self.0.to_num()
    }
}

impl From<Duration> for TimeInterval {
    fn from(duration: Duration) -> Self {
        TimeInterval(I48F16::saturating_from_num(duration.nanos()))
    }
}

impl From<TimeInterval> for Duration {
    fn from(interval: TimeInterval) -> Self {
        Duration::from_nanos(interval.0.saturating_as::<i64>())
    }
}

impl core::ops::Add for TimeInterval {
    type Output = TimeInterval;
    fn add(self, rhs: TimeInterval) -> TimeInterval {
        TimeInterval(self.0.saturating_add(rhs.0))
    }
}

impl WireFormat for TimeInterval {
    fn wire_size(&self) -> usize {
        8
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), WireFormatError> {
        if buffer.len() < 8 {
            return Err(WireFormatError::BufferTooShort);
        }
        buffer[0..8].copy_from_slice(&self.0.to_bits().to_be_bytes());
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, WireFormatError> {
        if buffer.len() < 8 {
            return Err(WireFormatError::BufferTooShort);
        }
        let bits = i64::from_be_bytes(buffer[0..8].try_into().unwrap());
        Ok(TimeInterval(I48F16::from_bits(bits)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format() {
        let interval = TimeInterval(I48F16::from_num(100));
        let mut buffer = [0; 8];
        interval.serialize(&mut buffer).unwrap();
        assert_eq!(buffer, [0, 0, 0, 0, 0, 100, 0, 0]);
        assert_eq!(TimeInterval::deserialize(&buffer).unwrap(), interval);
    }

    #[test]
    fn negative_roundtrip() {
        let interval = TimeInterval(I48F16::from_num(-50));
        let mut buffer = [0; 8];
        interval.serialize(&mut buffer).unwrap();
        assert_eq!(TimeInterval::deserialize(&buffer).unwrap(), interval);
    }

    #[test]
    fn duration_roundtrip() {
        let duration = Duration::from_nanos(12345);
        let interval: TimeInterval = duration.into();
        let back: Duration = interval.into();
        assert_eq!(back, duration);
    }
}
