//! The external collaborators this crate leans on: hardware/socket
//! transport and the monotonic/PHC clock. Hardware PHC access and socket I/O
//! are themselves out of scope — these traits are the seam a daemon crate
//! implements against, mirroring `statime`'s own `NetworkPort`/`Clock`
//! traits.

use crate::config::PortIndex;
use crate::datastructures::messages::Message;
use crate::error::{CoreError, Result};
use crate::time::Instant;

/// Which queue a message egresses through. PTP event messages (Sync,
/// DelayReq, PDelayReq/Resp) need a hardware transmit timestamp; general
/// messages (FollowUp, DelayResp, Announce, Management, Signaling) do not.
/// `DeferEvent` covers linuxptp's delayed-send path for one-step Syncs that
/// must wait on a prior transmission to complete before they can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Event,
    General,
    DeferEvent,
}

/// The transport seam: `send`/`recv_tx_timestamp`.
/// Implemented by a daemon crate against real sockets; the core only ever
/// calls through this trait, never touches a socket itself.
pub trait Transport {
    /// Sends `message` out `port` on the given queue, returning the number
    /// of bytes written on success.
    fn send(&mut self, port: PortIndex, kind: TransportKind, message: &Message) -> Result<usize>;

    /// Retrieves the hardware transmit timestamp for the most recent `send`
    /// of an event message on `port`. Blocking/polling semantics are the
    /// implementor's concern; the core treats this as synchronous.
    fn recv_tx_timestamp(&mut self, port: PortIndex, message: &Message) -> Result<Instant>;
}

/// The system-clock seam: `monotonic_now`/`rate_ratio`.
pub trait SystemClock {
    /// A monotonic timestamp, used for correlator staleness pruning
    /// and residence-time measurement. No defined epoch.
    fn monotonic_now(&self) -> Instant;

    /// The clock's current frequency ratio relative to its reference, folded
    /// into residence-time scaling when not `1.0`.
    fn rate_ratio(&self) -> f64;
}

/// A blanket "transport failed" helper: daemons call this to turn a raw I/O
/// failure into the typed [`CoreError::Transport`] the fault-handling policy
/// expects, bumping the affected port's error counter via
/// [`crate::port::Port::record_transport_fault`] at the call site.
pub fn transport_failure<T>() -> Result<T> {
    Err(CoreError::Transport)
}
