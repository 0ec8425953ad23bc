use crate::datastructures::common::WireTimestamp;
use crate::datastructures::{WireFormat, WireFormatError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FollowUpMessage {
    pub precise_origin_timestamp: WireTimestamp,
}

impl FollowUpMessage {
    pub(crate) fn content_size(&self) -> usize {
        10
    }

    pub(crate) fn serialize_content(&self, buffer: &mut [u8]) -> Result<(), WireFormatError> {
        self.precise_origin_timestamp.serialize(buffer)
    }

    pub(crate) fn deserialize_content(buffer: &[u8]) -> Result<Self, WireFormatError> {
        Ok(FollowUpMessage {
            precise_origin_timestamp: WireTimestamp::deserialize(buffer)?,
        })
    }
}
