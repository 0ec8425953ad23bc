use crate::datastructures::common::{PortIdentity, WireTimestamp};
use crate::datastructures::{WireFormat, WireFormatError};

/// `requesting_port_identity.port_number` carries the IEC 62439-3 PRP LAN
/// tag bits (see [`crate::datastructures::common::PRP_LAN_BITMASK`]) on
/// egress from a PRP transparent clock; see [`crate::tc::hsr_prp`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DelayRespMessage {
    pub receive_timestamp: WireTimestamp,
    pub requesting_port_identity: PortIdentity,
}

impl DelayRespMessage {
    pub(crate) fn content_size(&self) -> usize {
        20
    }

    pub(crate) fn serialize_content(&self, buffer: &mut [u8]) -> Result<(), WireFormatError> {
        self.receive_timestamp.serialize(&mut buffer[0..10])?;
        self.requesting_port_identity.serialize(&mut buffer[10..20])
    }

    pub(crate) fn deserialize_content(buffer: &[u8]) -> Result<Self, WireFormatError> {
        if buffer.len() < 20 {
            return Err(WireFormatError::BufferTooShort);
        }
        Ok(DelayRespMessage {
            receive_timestamp: WireTimestamp::deserialize(&buffer[0..10])?,
            requesting_port_identity: PortIdentity::deserialize(&buffer[10..20])?,
        })
    }
}
