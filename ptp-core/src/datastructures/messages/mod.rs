//! PTP network messages.

mod announce;
mod delay_req;
mod delay_resp;
mod follow_up;
mod header;
mod sync;

pub use announce::AnnounceMessage;
pub use delay_req::DelayReqMessage;
pub use delay_resp::DelayRespMessage;
pub use follow_up::FollowUpMessage;
pub use header::Header;
pub use sync::SyncMessage;

use arrayvec::ArrayVec;

use self::header::HeaderData;
use crate::datastructures::WireFormatError;

/// Maximum length of a single PTP datagram this core will parse or emit.
pub const MAX_DATA_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MessageType {
    Sync = 0x0,
    DelayReq = 0x1,
    PDelayReq = 0x2,
    PDelayResp = 0x3,
    FollowUp = 0x8,
    DelayResp = 0x9,
    PDelayRespFollowUp = 0xa,
    Announce = 0xb,
    Signaling = 0xc,
    Management = 0xd,
}

pub struct EnumConversionError;

impl TryFrom<u8> for MessageType {
    type Error = EnumConversionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use MessageType::*;
        match value {
            0x0 => Ok(Sync),
            0x1 => Ok(DelayReq),
            0x2 => Ok(PDelayReq),
            0x3 => Ok(PDelayResp),
            0x8 => Ok(FollowUp),
            0x9 => Ok(DelayResp),
            0xa => Ok(PDelayRespFollowUp),
            0xb => Ok(Announce),
            0xc => Ok(Signaling),
            0xd => Ok(Management),
            _ => Err(EnumConversionError),
        }
    }
}

impl MessageType {
    /// IEEE 1588 distinguishes "event" messages (which get a hardware
    /// timestamp) from "general" messages. Only event messages ever need a
    /// transparent-clock residence time computed for them.
    pub fn is_event(self) -> bool {
        matches!(
            self,
            MessageType::Sync
                | MessageType::DelayReq
                | MessageType::PDelayReq
                | MessageType::PDelayResp
        )
    }
}

/// The decoded body of a message.
///
/// `Opaque` covers message types this core forwards but does not interpret
/// (`PDelayReq`/`PDelayResp`/`PDelayRespFollowUp` — peer delay mechanism is
/// out of scope; `Signaling`/`Management` — TLV and management semantics
/// beyond forwarding are out of scope). Its bytes are carried through
/// untouched by the forwarder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Sync(SyncMessage),
    FollowUp(FollowUpMessage),
    DelayReq(DelayReqMessage),
    DelayResp(DelayRespMessage),
    Announce(AnnounceMessage),
    Opaque(ArrayVec<u8, MAX_DATA_LEN>),
}

impl MessageBody {
    fn wire_size(&self) -> usize {
        match self {
            MessageBody::Sync(m) => m.content_size(),
            MessageBody::FollowUp(m) => m.content_size(),
            MessageBody::DelayReq(m) => m.content_size(),
            MessageBody::DelayResp(m) => m.content_size(),
            MessageBody::Announce(m) => m.content_size(),
            MessageBody::Opaque(bytes) => bytes.len(),
        }
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), WireFormatError> {
        match self {
            MessageBody::Sync(m) => m.serialize_content(buffer),
            MessageBody::FollowUp(m) => m.serialize_content(buffer),
            MessageBody::DelayReq(m) => m.serialize_content(buffer),
            MessageBody::DelayResp(m) => m.serialize_content(buffer),
            MessageBody::Announce(m) => m.serialize_content(buffer),
            MessageBody::Opaque(bytes) => {
                if buffer.len() < bytes.len() {
                    return Err(WireFormatError::BufferTooShort);
                }
                buffer[..bytes.len()].copy_from_slice(bytes);
                Ok(())
            }
        }
    }

    fn deserialize(
        message_type: MessageType,
        content_length: usize,
        buffer: &[u8],
    ) -> Result<Self, WireFormatError> {
        let buffer = buffer
            .get(..content_length)
            .ok_or(WireFormatError::BufferTooShort)?;
        Ok(match message_type {
            MessageType::Sync => MessageBody::Sync(SyncMessage::deserialize_content(buffer)?),
            MessageType::FollowUp => {
                MessageBody::FollowUp(FollowUpMessage::deserialize_content(buffer)?)
            }
            MessageType::DelayReq => {
                MessageBody::DelayReq(DelayReqMessage::deserialize_content(buffer)?)
            }
            MessageType::DelayResp => {
                MessageBody::DelayResp(DelayRespMessage::deserialize_content(buffer)?)
            }
            MessageType::Announce => {
                MessageBody::Announce(AnnounceMessage::deserialize_content(buffer)?)
            }
            MessageType::PDelayReq
            | MessageType::PDelayResp
            | MessageType::PDelayRespFollowUp
            | MessageType::Signaling
            | MessageType::Management => {
                let mut bytes = ArrayVec::new();
                bytes
                    .try_extend_from_slice(buffer)
                    .map_err(|_| WireFormatError::BufferTooShort)?;
                MessageBody::Opaque(bytes)
            }
        })
    }
}

/// A complete PTP message: header plus type-specific body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub message_type: MessageType,
    pub body: MessageBody,
}

impl Message {
    pub fn is_event(&self) -> bool {
        self.message_type.is_event()
    }

    pub fn wire_size(&self) -> usize {
        self.header.wire_size() + self.body.wire_size()
    }

    pub fn serialize(&self, buffer: &mut [u8]) -> Result<usize, WireFormatError> {
        if buffer.len() < self.wire_size() {
            return Err(WireFormatError::BufferTooShort);
        }
        let (header_buf, body_buf) = buffer.split_at_mut(34);
        self.header
            .serialize_header(self.message_type, self.body.wire_size(), header_buf)?;
        self.body.serialize(body_buf)?;
        Ok(self.wire_size())
    }

    pub fn deserialize(buffer: &[u8]) -> Result<Self, WireFormatError> {
        let HeaderData {
            header,
            message_type,
            message_length,
        } = Header::deserialize_header(buffer)?;

        if (message_length as usize) < 34 {
            return Err(WireFormatError::Invalid);
        }
        let content_length = message_length as usize - 34;
        let body_buffer = buffer.get(34..).ok_or(WireFormatError::BufferTooShort)?;
        let body = MessageBody::deserialize(message_type, content_length, body_buffer)?;

        Ok(Message {
            header,
            message_type,
            body,
        })
    }
}
