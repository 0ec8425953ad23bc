use crate::datastructures::{WireFormat, WireFormatError};

/// A PTP wire timestamp: 48-bit seconds, 32-bit nanoseconds, both unsigned.
///
/// This core never needs to convert these to/from a system clock's notion of
/// time (that is an external-collaborator concern, see
/// [`crate::network::SystemClock`]); it only needs to carry them through
/// unchanged while forwarding, so no [`crate::time::Instant`] conversion is
/// provided here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WireTimestamp {
    pub seconds: u64,
    pub nanos: u32,
}

impl WireFormat for WireTimestamp {
    fn wire_size(&self) -> usize {
        10
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), WireFormatError> {
        if buffer.len() < 10 {
            return Err(WireFormatError::BufferTooShort);
        }
        buffer[0..6].copy_from_slice(&self.seconds.to_be_bytes()[2..8]);
        buffer[6..10].copy_from_slice(&self.nanos.to_be_bytes());
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, WireFormatError> {
        if buffer.len() < 10 {
            return Err(WireFormatError::BufferTooShort);
        }
        let mut seconds_bytes = [0; 8];
        seconds_bytes[2..8].copy_from_slice(&buffer[0..6]);
        Ok(WireTimestamp {
            seconds: u64::from_be_bytes(seconds_bytes),
            nanos: u32::from_be_bytes(buffer[6..10].try_into().unwrap()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let ts = WireTimestamp {
            seconds: 1_700_000_000,
            nanos: 123_456_789,
        };
        let mut buffer = [0; 10];
        ts.serialize(&mut buffer).unwrap();
        assert_eq!(WireTimestamp::deserialize(&buffer).unwrap(), ts);
    }
}
