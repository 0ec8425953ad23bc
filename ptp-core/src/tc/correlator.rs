use std::rc::Rc as StdRc;

use arrayvec::ArrayVec;

use crate::config::PortIndex;
use crate::datastructures::common::PortIdentity;
use crate::datastructures::messages::{Message, MessageBody, MessageType};
use crate::error::{CoreError, Result};
use crate::time::{Duration, Instant};

/// Bound on pending descriptors tracked per port; a small-object pool
/// rather than an unbounded queue, avoiding allocator churn.
const MAX_PENDING_PER_PORT: usize = 16;

/// A pending cross-port correlation entry (linuxptp's TxD). Message
/// ownership is `Rc`: the ingress path and the correlator's queue may both
/// hold a strong reference, and the reference count reaching zero is the
/// `put` of the C source.
#[derive(Debug, Clone)]
pub struct TxDescriptor {
    pub message: StdRc<Message>,
    pub residence: Duration,
    pub ingress_port: PortIndex,
    pub created_at: Instant,
}

fn source_port_identity(message: &Message) -> PortIdentity {
    message.header.source_port_identity
}

fn requesting_port_identity(message: &Message) -> Option<PortIdentity> {
    match &message.body {
        MessageBody::DelayResp(resp) => Some(resp.requesting_port_identity),
        _ => None,
    }
}

/// One FIFO per port. A naive reading suggests "two tables" (per-egress and
/// per-ingress pending); in the source these are in fact the same
/// `tc_transmitted` queue per port, used both to stash a just-forwarded
/// event message and to look up a previously-stashed one when its
/// counterpart arrives — see `tc::correlator` module docs.
#[derive(Debug, Clone, Default)]
pub struct Correlator {
    queues: Vec<ArrayVec<TxDescriptor, MAX_PENDING_PER_PORT>>,
}

impl Correlator {
    pub fn new(port_count: usize) -> Self {
        Correlator {
            queues: (0..port_count).map(|_| ArrayVec::new()).collect(),
        }
    }

    /// Stashes a pending descriptor under `port`'s queue (`tc_complete_*` in
    /// the source). Returns [`CoreError::AllocFailure`] if that port's pool
    /// is already full, mirroring `tc_allocate` returning `NULL`.
    pub fn stash(&mut self, port: PortIndex, txd: TxDescriptor) -> Result<()> {
        let queue = &mut self.queues[port.0];
        if queue.is_full() {
            return Err(CoreError::AllocFailure);
        }
        queue.push(txd);
        Ok(())
    }

    /// Looks for a pending Sync (if `incoming` is a FollowUp) or pending
    /// FollowUp (if `incoming` is a Sync) stashed under `port`, matching on
    /// sequence id and source port identity (`tc.c`'s `match_syfup`).
    /// Either arrival order is supported by trying both
    /// message types in the stash.
    pub fn match_syfup(&mut self, port: PortIndex, incoming: &Message) -> Option<TxDescriptor> {
        let wanted_type = match incoming.message_type {
            MessageType::Sync => MessageType::FollowUp,
            MessageType::FollowUp => MessageType::Sync,
            _ => return None,
        };
        let queue = &mut self.queues[port.0];
        let index = queue.iter().position(|txd| {
            txd.message.message_type == wanted_type
                && txd.message.header.sequence_id == incoming.header.sequence_id
                && source_port_identity(&txd.message) == source_port_identity(incoming)
        })?;
        Some(queue.remove(index))
    }

    /// Looks for a pending DelayReq stashed under `port`, matching on
    /// sequence id and `resp.requestingPortIdentity == req.sourcePortIdentity`
    /// (`tc.c`'s `match_delay`).
    pub fn match_delay(&mut self, port: PortIndex, resp: &Message) -> Option<TxDescriptor> {
        if resp.message_type != MessageType::DelayResp {
            return None;
        }
        let requesting = requesting_port_identity(resp)?;
        let queue = &mut self.queues[port.0];
        let index = queue.iter().position(|txd| {
            txd.message.message_type == MessageType::DelayReq
                && txd.message.header.sequence_id == resp.header.sequence_id
                && source_port_identity(&txd.message) == requesting
        })?;
        Some(queue.remove(index))
    }

    /// Drops every descriptor across every port whose age exceeds one
    /// second, called once per event-handling cycle.
    pub fn prune_stale(&mut self, now: Instant) {
        let staleness_limit = Duration::from_nanos(1_000_000_000);
        for (i, queue) in self.queues.iter_mut().enumerate() {
            let before = queue.len();
            queue.retain(|txd| now.duration_since(txd.created_at) < staleness_limit);
            if queue.len() != before {
                crate::observability::non_error_condition(PortIndex(i), "stale_pending");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn pending_count(&self, port: PortIndex) -> usize {
        self.queues[port.0].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastructures::common::ClockIdentity;
    use crate::datastructures::messages::{FollowUpMessage, Header, SyncMessage};

    fn source(n: u8) -> PortIdentity {
        PortIdentity {
            clock_identity: ClockIdentity([n; 8]),
            port_number: 1,
        }
    }

    fn sync_message(seq: u16, source_identity: PortIdentity) -> Message {
        Message {
            header: Header {
                source_port_identity: source_identity,
                sequence_id: seq,
                ..Default::default()
            },
            message_type: MessageType::Sync,
            body: MessageBody::Sync(SyncMessage::default()),
        }
    }

    fn fup_message(seq: u16, source_identity: PortIdentity) -> Message {
        Message {
            header: Header {
                source_port_identity: source_identity,
                sequence_id: seq,
                ..Default::default()
            },
            message_type: MessageType::FollowUp,
            body: MessageBody::FollowUp(FollowUpMessage::default()),
        }
    }

    fn port(n: usize) -> PortIndex {
        PortIndex(n)
    }

    #[test]
    fn sync_then_followup_matches() {
        let mut correlator = Correlator::new(2);
        let sync = sync_message(7, source(1));
        correlator
            .stash(
                port(0),
                TxDescriptor {
                    message: StdRc::new(sync),
                    residence: Duration::ZERO,
                    ingress_port: port(0),
                    created_at: Instant::from_nanos_since_arbitrary_epoch(0),
                },
            )
            .unwrap();

        let fup = fup_message(7, source(1));
        let matched = correlator.match_syfup(port(0), &fup).unwrap();
        assert_eq!(matched.message.message_type, MessageType::Sync);
        assert_eq!(correlator.pending_count(port(0)), 0);
    }

    #[test]
    fn followup_then_sync_matches_symmetrically() {
        let mut correlator = Correlator::new(1);
        let fup = fup_message(3, source(2));
        correlator
            .stash(
                port(0),
                TxDescriptor {
                    message: StdRc::new(fup),
                    residence: Duration::ZERO,
                    ingress_port: port(0),
                    created_at: Instant::from_nanos_since_arbitrary_epoch(0),
                },
            )
            .unwrap();

        let sync = sync_message(3, source(2));
        let matched = correlator.match_syfup(port(0), &sync).unwrap();
        assert_eq!(matched.message.message_type, MessageType::FollowUp);
    }

    #[test]
    fn prune_drops_stale_entries() {
        let mut correlator = Correlator::new(1);
        correlator
            .stash(
                port(0),
                TxDescriptor {
                    message: StdRc::new(sync_message(1, source(1))),
                    residence: Duration::ZERO,
                    ingress_port: port(0),
                    created_at: Instant::from_nanos_since_arbitrary_epoch(0),
                },
            )
            .unwrap();

        correlator.prune_stale(Instant::from_nanos_since_arbitrary_epoch(2_000_000_000));
        assert_eq!(correlator.pending_count(port(0)), 0);
    }

    #[test]
    fn pool_exhaustion_reports_alloc_failure() {
        let mut correlator = Correlator::new(1);
        for i in 0..MAX_PENDING_PER_PORT {
            correlator
                .stash(
                    port(0),
                    TxDescriptor {
                        message: StdRc::new(sync_message(i as u16, source(1))),
                        residence: Duration::ZERO,
                        ingress_port: port(0),
                        created_at: Instant::from_nanos_since_arbitrary_epoch(0),
                    },
                )
                .unwrap();
        }
        let result = correlator.stash(
            port(0),
            TxDescriptor {
                message: StdRc::new(sync_message(999, source(1))),
                residence: Duration::ZERO,
                ingress_port: port(0),
                created_at: Instant::from_nanos_since_arbitrary_epoch(0),
            },
        );
        assert_eq!(result, Err(CoreError::AllocFailure));
    }
}
