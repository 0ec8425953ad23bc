//! On-the-wire PTP data types and messages.

pub mod common;
pub mod messages;

/// Errors that can occur while serializing or deserializing a wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum WireFormatError {
    #[cfg_attr(feature = "std", error("invalid enum value on the wire"))]
    EnumConversionError,
    #[cfg_attr(feature = "std", error("buffer too short for wire format"))]
    BufferTooShort,
    #[cfg_attr(feature = "std", error("value out of range for wire format"))]
    Invalid,
}

/// Common interface for types that have a fixed PTP wire representation.
pub trait WireFormat: Sized {
    /// Size in bytes of this value's wire representation.
    fn wire_size(&self) -> usize;

    /// Serializes `self` into the front of `buffer`.
    fn serialize(&self, buffer: &mut [u8]) -> Result<(), WireFormatError>;

    /// Deserializes a value from the front of `buffer`.
    fn deserialize(buffer: &[u8]) -> Result<Self, WireFormatError>;
}
