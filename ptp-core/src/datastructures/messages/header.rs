use super::MessageType;
use crate::datastructures::common::{PortIdentity, TimeInterval};
use crate::datastructures::{WireFormat, WireFormatError};

/// The 34-byte PTP common header shared by every message type.
///
/// `message_type`, `message_length` and `control_field` are not stored here:
/// they are derived from the enclosing [`Message`](super::Message) at
/// serialization time, same as in the teacher implementation this is
/// modeled on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub sdo_id: u8,
    pub domain_number: u8,
    pub alternate_master_flag: bool,
    pub two_step_flag: bool,
    pub unicast_flag: bool,
    pub ptp_profile_specific_1: bool,
    pub ptp_profile_specific_2: bool,
    pub leap61: bool,
    pub leap59: bool,
    pub current_utc_offset_valid: bool,
    pub ptp_timescale: bool,
    pub time_tracable: bool,
    pub frequency_tracable: bool,
    pub synchronization_uncertain: bool,
    pub correction_field: TimeInterval,
    pub source_port_identity: PortIdentity,
    pub sequence_id: u16,
    pub log_message_interval: i8,
    pub transport_specific: u8,
}

pub(crate) struct HeaderData {
    pub(crate) header: Header,
    pub(crate) message_type: MessageType,
    pub(crate) message_length: u16,
}

fn control_field(message_type: MessageType) -> u8 {
    match message_type {
        MessageType::Sync => 0,
        MessageType::DelayReq => 1,
        MessageType::FollowUp => 2,
        MessageType::DelayResp => 3,
        MessageType::Management => 4,
        _ => 5,
    }
}

impl Header {
    pub const fn wire_size(&self) -> usize {
        34
    }

    pub(crate) fn serialize_header(
        &self,
        message_type: MessageType,
        content_length: usize,
        buffer: &mut [u8],
    ) -> Result<(), WireFormatError> {
        if buffer.len() < 34 {
            return Err(WireFormatError::BufferTooShort);
        }

        buffer[0] = (self.transport_specific << 4) | (message_type as u8 & 0x0f);
        buffer[1] = 0x02; // versionPTP: 2
        buffer[2..4].copy_from_slice(&((34 + content_length) as u16).to_be_bytes());
        buffer[4] = self.domain_number;
        buffer[5] = 0;

        let mut flags0 = 0u8;
        flags0 |= (self.alternate_master_flag as u8) << 0;
        flags0 |= (self.two_step_flag as u8) << 1;
        flags0 |= (self.unicast_flag as u8) << 2;
        flags0 |= (self.ptp_profile_specific_1 as u8) << 5;
        flags0 |= (self.ptp_profile_specific_2 as u8) << 6;
        buffer[6] = flags0;

        let mut flags1 = 0u8;
        flags1 |= (self.leap61 as u8) << 0;
        flags1 |= (self.leap59 as u8) << 1;
        flags1 |= (self.current_utc_offset_valid as u8) << 2;
        flags1 |= (self.ptp_timescale as u8) << 3;
        flags1 |= (self.time_tracable as u8) << 4;
        flags1 |= (self.frequency_tracable as u8) << 5;
        flags1 |= (self.synchronization_uncertain as u8) << 6;
        buffer[7] = flags1;

        buffer[8..16].copy_from_slice(&self.correction_field.0.to_bits().to_be_bytes());
        buffer[16..20].copy_from_slice(&(self.sdo_id as u32).to_be_bytes());
        self.source_port_identity.serialize(&mut buffer[20..30])?;
        buffer[30..32].copy_from_slice(&self.sequence_id.to_be_bytes());
        buffer[32] = control_field(message_type);
        buffer[33] = self.log_message_interval as u8;

        Ok(())
    }

    pub(crate) fn deserialize_header(buffer: &[u8]) -> Result<HeaderData, WireFormatError> {
        use fixed::types::I48F16;

        if buffer.len() < 34 {
            return Err(WireFormatError::BufferTooShort);
        }

        let message_type = MessageType::try_from(buffer[0] & 0x0f)
            .map_err(|_| WireFormatError::EnumConversionError)?;
        let transport_specific = buffer[0] >> 4;
        let message_length = u16::from_be_bytes(buffer[2..4].try_into().unwrap());
        let domain_number = buffer[4];
        let flags0 = buffer[6];
        let flags1 = buffer[7];
        let correction_bits = i64::from_be_bytes(buffer[8..16].try_into().unwrap());
        let sdo_id = u32::from_be_bytes(buffer[16..20].try_into().unwrap()) as u8;
        let source_port_identity = PortIdentity::deserialize(&buffer[20..30])?;
        let sequence_id = u16::from_be_bytes(buffer[30..32].try_into().unwrap());
        let log_message_interval = buffer[33] as i8;

        let header = Header {
            sdo_id,
            domain_number,
            alternate_master_flag: flags0 & (1 << 0) != 0,
            two_step_flag: flags0 & (1 << 1) != 0,
            unicast_flag: flags0 & (1 << 2) != 0,
            ptp_profile_specific_1: flags0 & (1 << 5) != 0,
            ptp_profile_specific_2: flags0 & (1 << 6) != 0,
            leap61: flags1 & (1 << 0) != 0,
            leap59: flags1 & (1 << 1) != 0,
            current_utc_offset_valid: flags1 & (1 << 2) != 0,
            ptp_timescale: flags1 & (1 << 3) != 0,
            time_tracable: flags1 & (1 << 4) != 0,
            frequency_tracable: flags1 & (1 << 5) != 0,
            synchronization_uncertain: flags1 & (1 << 6) != 0,
            correction_field: TimeInterval(I48F16::from_bits(correction_bits)),
            source_port_identity,
            sequence_id,
            log_message_interval,
            transport_specific,
        };

        Ok(HeaderData {
            header,
            message_type,
            message_length,
        })
    }
}
