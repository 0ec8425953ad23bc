//! Points in time ([`Instant`]) and durations between them ([`Duration`],
//! [`Interval`]).
//!
//! These are kept distinct from [`std::time`] because PTP's wire
//! representations (fixed-point nanoseconds, log2-seconds) don't line up
//! with it, and because the core has no opinion on wall-clock epochs.

mod duration;
mod instant;
mod interval;

pub use duration::Duration;
pub use instant::Instant;
pub use interval::Interval;
