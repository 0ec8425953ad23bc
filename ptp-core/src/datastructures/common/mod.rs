mod clock_accuracy;
mod clock_identity;
mod clock_quality;
mod leap_indicator;
mod port_identity;
mod time_interval;
mod time_source;
mod timestamp;

pub use clock_accuracy::ClockAccuracy;
pub use clock_identity::ClockIdentity;
pub use clock_quality::ClockQuality;
pub use leap_indicator::LeapIndicator;
pub use port_identity::{PortIdentity, PRP_LAN_A_BITS, PRP_LAN_BITMASK, PRP_LAN_B_BITS};
pub use time_interval::TimeInterval;
pub use time_source::TimeSource;
pub use timestamp::WireTimestamp;
