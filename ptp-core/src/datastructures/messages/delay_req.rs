use crate::datastructures::common::WireTimestamp;
use crate::datastructures::{WireFormat, WireFormatError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DelayReqMessage {
    pub origin_timestamp: WireTimestamp,
}

impl DelayReqMessage {
    pub(crate) fn content_size(&self) -> usize {
        10
    }

    pub(crate) fn serialize_content(&self, buffer: &mut [u8]) -> Result<(), WireFormatError> {
        self.origin_timestamp.serialize(buffer)
    }

    pub(crate) fn deserialize_content(buffer: &[u8]) -> Result<Self, WireFormatError> {
        Ok(DelayReqMessage {
            origin_timestamp: WireTimestamp::deserialize(buffer)?,
        })
    }
}
