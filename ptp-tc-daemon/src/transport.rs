//! Stand-in `Transport`/`SystemClock` implementations.
//!
//! Real hardware timestamping and socket I/O are out of scope for this
//! crate — the engine only ever talks to the traits in
//! `ptp_core::network`. These implementations record what the core sends
//! and hand back a monotonic clock driven by `std::time::Instant`, which is
//! enough to exercise BMCA and transparent-clock forwarding end to end
//! without a real interface. A production deployment of this daemon would
//! swap this module for one backed by `AF_PACKET`/PHC ioctls; nothing else
//! in the crate would need to change.

use std::collections::VecDeque;
use std::time::Instant as StdInstant;

use ptp_core::config::PortIndex;
use ptp_core::datastructures::messages::Message;
use ptp_core::error::Result;
use ptp_core::network::{SystemClock, Transport, TransportKind};
use ptp_core::time::Instant;

/// Records every send instead of putting bytes on a wire, and answers
/// `recv_tx_timestamp` with the current wall clock — a one-step daemon
/// running against this never blocks waiting for a real transmit
/// timestamp.
pub struct LoopbackTransport {
    sent: VecDeque<(PortIndex, TransportKind, Message)>,
    epoch: StdInstant,
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        LoopbackTransport { sent: VecDeque::new(), epoch: StdInstant::now() }
    }
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (PortIndex, TransportKind, Message)> + '_ {
        self.sent.drain(..)
    }

    fn now(&self) -> Instant {
        Instant::from_nanos_since_arbitrary_epoch(self.epoch.elapsed().as_nanos() as i64)
    }
}

impl Transport for LoopbackTransport {
    fn send(&mut self, port: PortIndex, kind: TransportKind, message: &Message) -> Result<usize> {
        let size = message.wire_size();
        self.sent.push_back((port, kind, message.clone()));
        Ok(size)
    }

    fn recv_tx_timestamp(&mut self, _port: PortIndex, _message: &Message) -> Result<Instant> {
        Ok(self.now())
    }
}

/// A `SystemClock` backed by `std::time::Instant`, with no rate adjustment
/// applied — a real daemon would steer a PHC or the system clock here
/// instead of reporting a fixed ratio.
pub struct WallClock {
    epoch: StdInstant,
}

impl Default for WallClock {
    fn default() -> Self {
        WallClock { epoch: StdInstant::now() }
    }
}

impl SystemClock for WallClock {
    fn monotonic_now(&self) -> Instant {
        let elapsed = self.epoch.elapsed();
        Instant::from_nanos_since_arbitrary_epoch(elapsed.as_nanos() as i64)
    }

    fn rate_ratio(&self) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptp_core::datastructures::messages::{Header, MessageBody, MessageType, SyncMessage};

    #[test]
    fn loopback_records_and_drains_sends() {
        let mut transport = LoopbackTransport::new();
        let message = Message {
            header: Header::default(),
            message_type: MessageType::Sync,
            body: MessageBody::Sync(SyncMessage::default()),
        };
        transport.send(PortIndex(0), TransportKind::Event, &message).unwrap();
        transport.send(PortIndex(1), TransportKind::General, &message).unwrap();

        let drained: Vec<_> = transport.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(transport.drain().next().is_none());
    }

    #[test]
    fn wall_clock_rate_ratio_is_unity() {
        let clock = WallClock::default();
        assert_eq!(clock.rate_ratio(), 1.0);
    }
}
