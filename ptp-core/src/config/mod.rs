//! Typed clock/port configuration: the subset of `defaultDS`/`portDS`/
//! `iec62439_portDS` this core reads. Socket addresses, VLAN tagging, PHC
//! selection and servo tuning are handled by a daemon crate, not here.

mod instance;
mod port;
mod redundancy;

pub use instance::InstanceConfig;
pub use port::{BmcaMode, DelayMechanism, PortConfig, TimestampingMode};
pub use redundancy::{ClockType, PortAttachment, PortIndex, RedundancyAttachment, RedundancyProfile};
