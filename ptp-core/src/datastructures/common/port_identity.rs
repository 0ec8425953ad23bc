use core::cmp::Ordering;

use super::ClockIdentity;
use crate::datastructures::{WireFormat, WireFormatError};

/// A PTP port, identified by the identity of its parent clock plus a
/// 1-based port number local to that clock.
///
/// Ordering compares `clock_identity` first and `port_number` second,
/// matching linuxptp's `portid_cmp` (`bmc.c`) byte-for-byte: the clock
/// identity comparison is a `memcmp`, never reduced to just the identity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortIdentity {
    pub clock_identity: ClockIdentity,
    pub port_number: u16,
}

impl PartialOrd for PortIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PortIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.clock_identity
            .cmp(&other.clock_identity)
            .then_with(|| self.port_number.cmp(&other.port_number))
    }
}

/// The two bits of `portNumber` IEC 62439-3 PRP reuses to tag which LAN a
/// frame egressed on, per `tc.c`'s `tc_prp_set_port_number_bits`.
///
/// linuxptp stores `portNumber` on the wire in network byte order and masks
/// bits 13:12 of that 16-bit field (`0b11 << 12`); the mask and values below
/// are expressed in host order to match how [`PortIdentity::port_number`] is
/// stored once deserialized.
pub const PRP_LAN_BITMASK: u16 = 0b11 << 12;
pub const PRP_LAN_A_BITS: u16 = 0b10 << 12;
pub const PRP_LAN_B_BITS: u16 = 0b11 << 12;

impl WireFormat for PortIdentity {
    fn wire_size(&self) -> usize {
        10
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), WireFormatError> {
        if buffer.len() < 10 {
            return Err(WireFormatError::BufferTooShort);
        }
        self.clock_identity.serialize(&mut buffer[0..8])?;
        buffer[8..10].copy_from_slice(&self.port_number.to_be_bytes());
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, WireFormatError> {
        if buffer.len() < 10 {
            return Err(WireFormatError::BufferTooShort);
        }
        Ok(PortIdentity {
            clock_identity: ClockIdentity::deserialize(&buffer[0..8])?,
            port_number: u16::from_be_bytes(buffer[8..10].try_into().unwrap()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_identity_then_port() {
        let a = PortIdentity {
            clock_identity: ClockIdentity([0; 8]),
            port_number: 2,
        };
        let b = PortIdentity {
            clock_identity: ClockIdentity([0; 8]),
            port_number: 1,
        };
        assert!(a > b);

        let c = PortIdentity {
            clock_identity: ClockIdentity([1; 8]),
            port_number: 0,
        };
        assert!(a < c);
    }

    #[test]
    fn lan_bits_round_trip() {
        let mut port_number: u16 = 5;
        port_number = (port_number & !PRP_LAN_BITMASK) | PRP_LAN_A_BITS;
        assert_eq!(port_number & PRP_LAN_BITMASK, PRP_LAN_A_BITS);
    }
}
