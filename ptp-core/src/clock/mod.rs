//! Owns the port arena and orchestrates both halves of the engine: BMCA
//! state selection and transparent-clock forwarding across it. Grounded on
//! linuxptp's `struct clock` (`clock.c`) for the arena/orchestration shape.

use std::rc::Rc;

use crate::bmc::{bmc_state_decision, hsr_state_decision, ComparatorProfile, Dataset, HsrVariant};
use crate::config::{ClockType, InstanceConfig, PortConfig, PortIndex, RedundancyProfile};
use crate::datastructures::common::{ClockQuality, PortIdentity};
use crate::datastructures::messages::{Message, MessageBody, MessageType};
use crate::port::Port;
use crate::tc::{self, Correlator, EgressTiming, ForwardedMessage};
use crate::time::{Duration, Instant};

/// Announces are retained for `ANNOUNCE_WINDOW` (see `bmc::foreign_master`)
/// intervals of this many seconds when no per-port `logAnnounceInterval` is
/// otherwise threaded in; callers with a real announce interval should
/// purge explicitly instead of relying on [`Clock::run_bmca`]'s default.
const DEFAULT_ANNOUNCE_INTERVAL: Duration = Duration::from_nanos(1_000_000_000);

pub struct Clock {
    pub config: InstanceConfig,
    pub clock_quality: ClockQuality,
    pub clock_type: ClockType,
    pub redundancy: RedundancyProfile,
    pub comparator: ComparatorProfile,
    pub ports: Vec<Port>,
    correlator: Correlator,
    best: Option<Dataset>,
    warned_tc_collapsed: bool,
}

impl Clock {
    pub fn new(
        config: InstanceConfig,
        clock_quality: ClockQuality,
        clock_type: ClockType,
        redundancy: RedundancyProfile,
        comparator: ComparatorProfile,
        port_configs: Vec<PortConfig>,
    ) -> Self {
        let ports: Vec<Port> = port_configs.into_iter().map(Port::new).collect();
        let correlator = Correlator::new(ports.len());
        Clock {
            config,
            clock_quality,
            clock_type,
            redundancy,
            comparator,
            ports,
            correlator,
            best: None,
            warned_tc_collapsed: false,
        }
    }

    pub fn port_identity(&self, port_number: u16) -> PortIdentity {
        PortIdentity {
            clock_identity: self.config.clock_identity,
            port_number,
        }
    }

    /// The clock's own dataset, comparable against any foreign master
    /// (`bmc.c`'s `clock_default_ds`).
    pub fn default_dataset(&self) -> Dataset {
        let identity = self.port_identity(0);
        Dataset {
            priority_1: self.config.priority_1,
            priority_2: self.config.priority_2,
            local_priority: 0,
            identity: self.config.clock_identity,
            quality: self.clock_quality,
            steps_removed: 0,
            sender: identity,
            receiver: identity,
        }
    }

    /// The port identity of the clock currently selected as grandmaster, or
    /// a zeroed identity if none has been selected yet.
    fn parent_identity(&self) -> PortIdentity {
        self.best.as_ref().map(|d| d.sender).unwrap_or_default()
    }

    fn port_candidate(&self, idx: PortIndex) -> Option<Dataset> {
        self.ports[idx.0]
            .foreign_masters
            .best_foreign(self.comparator)
            .copied()
    }

    /// Records a received Announce against its sender's foreign-master
    /// record; [`Self::run_bmca`] picks it up on its next call.
    pub fn receive_announce(&mut self, ingress: PortIndex, message: &Message, now: Instant) {
        if message.message_type != MessageType::Announce {
            return;
        }
        let MessageBody::Announce(announce) = &message.body else {
            return;
        };
        let sender = message.header.source_port_identity;
        let receiver = self.port_identity(self.ports[ingress.0].port_number());
        let local_priority = self.ports[ingress.0].config.local_priority;
        let dataset = Dataset::from_announce(announce, sender, receiver, local_priority);
        self.ports[ingress.0]
            .foreign_masters
            .register_announce(now, sender, dataset);
    }

    /// Runs BMCA across the whole port arena: purges stale foreign-master
    /// records, recomputes the clock-wide best candidate, and assigns each
    /// port its new [`crate::port::PortState`].
    pub fn run_bmca(&mut self, now: Instant) {
        for port in &mut self.ports {
            port.foreign_masters
                .purge_old_messages(now, DEFAULT_ANNOUNCE_INTERVAL);
        }

        let default_ds = self.default_dataset();
        let mut best: Option<Dataset> = None;
        let mut best_port: Option<PortIndex> = None;
        for i in 0..self.ports.len() {
            if let Some(candidate) = self.port_candidate(PortIndex(i)) {
                let is_better = match &best {
                    None => true,
                    Some(current) => self
                        .comparator
                        .compare(Some(&candidate), Some(current))
                        .a_strictly_better(),
                };
                if is_better {
                    best = Some(candidate);
                    best_port = Some(PortIndex(i));
                }
            }
        }
        self.best = best;

        if self.redundancy == RedundancyProfile::None {
            for i in 0..self.ports.len() {
                self.assign_ordinary_state(PortIndex(i), &default_ds, best_port);
            }
            return;
        }

        let variant = if self.clock_type.is_transparent() {
            if !self.warned_tc_collapsed {
                log::warn!("redundant clock running the transparent-clock-collapsed BMCA variant");
                self.warned_tc_collapsed = true;
            }
            HsrVariant::TcCollapsed
        } else {
            HsrVariant::NonTc
        };

        let mut processed = vec![false; self.ports.len()];
        for i in 0..self.ports.len() {
            if processed[i] {
                continue;
            }
            let paired = self.ports[i].config.redundancy.paired_port;
            let Some(PortIndex(j)) = paired else {
                self.assign_ordinary_state(PortIndex(i), &default_ds, best_port);
                processed[i] = true;
                continue;
            };

            let dr = self.port_candidate(PortIndex(i));
            let dq = self.port_candidate(PortIndex(j));
            let decision = hsr_state_decision(
                variant,
                self.comparator,
                self.clock_type,
                dr.as_ref(),
                dq.as_ref(),
                self.best.as_ref(),
                self.ports[i].state,
                self.ports[j].state,
            );
            crate::observability::port_state_transition(PortIndex(i), self.ports[i].state, decision.r_state);
            crate::observability::port_state_transition(PortIndex(j), self.ports[j].state, decision.q_state);
            self.ports[i].state = decision.r_state;
            self.ports[j].state = decision.q_state;
            processed[i] = true;
            processed[j] = true;
        }
    }

    fn assign_ordinary_state(&mut self, idx: PortIndex, default_ds: &Dataset, best_port: Option<PortIndex>) {
        let port_best = self.port_candidate(idx);
        let is_clock_best_port = best_port == Some(idx);
        let port = &self.ports[idx.0];
        let new_state = bmc_state_decision(
            self.comparator,
            self.clock_quality.clock_class,
            default_ds,
            self.best.as_ref(),
            port_best.as_ref(),
            is_clock_best_port,
            port.config.bmca_mode,
            port.state,
        );
        crate::observability::port_state_transition(idx, self.ports[idx.0].state, new_state);
        self.ports[idx.0].state = new_state;
    }

    fn filtering_active(&self, egress: &Port) -> bool {
        self.redundancy != RedundancyProfile::None || egress.config.tc_spanning_tree
    }

    /// Whether `message`, ingressed on `ingress`, is a Management message
    /// addressed to this clock's own UDS port rather than something to
    /// forward onward. `tc::blocked`'s `egress_port_number == 0` rule
    /// already keeps such a message off the wire (there is no port 0 in the
    /// arena to forward to); this is the hand-off point a daemon hooks a
    /// local management responder into instead (the UDS special case).
    /// Implementing the responder itself — management protocol semantics
    /// beyond forwarding — is out of scope.
    pub fn local_management_response(&self, ingress: PortIndex, message: &Message) -> bool {
        message.message_type == MessageType::Management
            && self.egress_candidates(ingress, message).is_empty()
    }

    fn egress_candidates(&self, ingress: PortIndex, message: &Message) -> Vec<PortIndex> {
        let ingress_port = &self.ports[ingress.0];
        let mut out = Vec::new();
        for i in 0..self.ports.len() {
            let egress_idx = PortIndex(i);
            if egress_idx == ingress {
                continue;
            }
            let egress_port = &self.ports[i];
            let blocked = tc::blocked(
                ingress_port.port_number(),
                ingress_port.state,
                egress_port.port_number(),
                egress_port.state,
                message.message_type,
                message.header.domain_number,
                self.config.domain_number,
                self.filtering_active(egress_port),
            );
            if blocked {
                continue;
            }
            if message.header.domain_number != self.config.domain_number {
                crate::observability::non_error_condition(egress_idx, "domain_mismatch");
            }

            if self.redundancy != RedundancyProfile::None {
                let ingress_attachment = ingress_port.config.redundancy.attachment;
                let egress_attachment = egress_port.config.redundancy.attachment;
                let egress_paired_state = egress_port
                    .config
                    .redundancy
                    .paired_port
                    .map(|p| self.ports[p.0].state);
                let allowed = if self.redundancy.is_hsr() {
                    crate::tc::hsr_prp::hsr_should_fwd(
                        ingress_attachment,
                        egress_attachment,
                        egress_paired_state,
                        message.header.source_port_identity,
                        self.parent_identity(),
                    )
                } else {
                    crate::tc::hsr_prp::prp_should_fwd(ingress_attachment, egress_attachment, egress_paired_state)
                };
                if !allowed {
                    continue;
                }
            }
            out.push(egress_idx);
        }
        out
    }

    /// Drops stale correlator entries without processing an ingress message;
    /// a daemon calls this on a timer so a link that stops carrying traffic
    /// doesn't leave its transmit-descriptor pool permanently consumed.
    pub fn prune_stale(&mut self, now: Instant) {
        self.correlator.prune_stale(now);
    }

    /// Feeds one ingressed message through the transparent-clock forwarding
    /// pipeline, returning the corrected copies ready to hand to each
    /// egress. `egress_timestamp` supplies the hardware transmit timestamp
    /// for a given port once the message has actually been handed to it — a
    /// synchronous oracle here, a blocking call onto real hardware in a
    /// daemon's `network` collaborator.
    pub fn dispatch_ingress<F: FnMut(PortIndex) -> Instant>(
        &mut self,
        ingress: PortIndex,
        message: Rc<Message>,
        ingress_ts: Instant,
        now: Instant,
        mut egress_timestamp: F,
    ) -> Vec<ForwardedMessage> {
        if self.redundancy == RedundancyProfile::None && !self.clock_type.is_transparent() {
            return Vec::new();
        }
        self.correlator.prune_stale(now);

        if message.message_type == MessageType::Management
            && self.redundancy != RedundancyProfile::None
            && self.ports[ingress.0].config.redundancy.attachment.is_paired_side()
        {
            return Vec::new();
        }

        let candidates = self.egress_candidates(ingress, &message);
        if candidates.is_empty() {
            return Vec::new();
        }

        let ingress_port = &self.ports[ingress.0];
        let peer_delay = ingress_port.peer_delay;
        let asymmetry = ingress_port.asymmetry;
        let rx_offset = ingress_port.rx_timestamp_offset;

        // `tc_fwd_sync`/`tc_fwd_folup` key the one-step/two-step decision
        // entirely on the ingress port's own timestamping mode (`q`), never
        // on the egress side (`tc.c` lines 836-842, 789-791).
        let ingress_one_step = self.ports[ingress.0].config.timestamping.is_one_step_capable();

        match message.message_type {
            MessageType::Sync => {
                // `one_step(msg)`: the Sync itself already carries its final
                // origin timestamp, i.e. no separate FollowUp is coming.
                let message_is_one_step = !message.header.two_step_flag;

                if ingress_one_step {
                    let mut outputs = Vec::new();
                    for &egress in &candidates {
                        let tx_ts = egress_timestamp(egress);
                        let residence = tx_ts.duration_since(ingress_ts);
                        if message_is_one_step {
                            // `goto onestep`: nothing to fuse, forward directly.
                            outputs.push(ForwardedMessage {
                                egress,
                                message: tc::forward_onestep_event(
                                    &message,
                                    peer_delay,
                                    asymmetry,
                                    rx_offset,
                                    residence,
                                    self.ports[egress.0].tx_timestamp_offset,
                                ),
                            });
                        } else if let tc::OneStepOutcome::Fused(fused) =
                            tc::offer_onestep_sync(&mut self.ports[egress.0].onestep_info, &message, residence)
                        {
                            outputs.push(ForwardedMessage { egress, message: fused });
                        }
                    }
                    outputs
                } else {
                    // Two-step ingress: a one-step arrival needs a FollowUp
                    // synthesized on the way out (`tc_fwd_sync` lines 851-865).
                    let mut outgoing_sync = (*message).clone();
                    let synthesized_followup = if message_is_one_step {
                        outgoing_sync.header.two_step_flag = true;
                        Some(tc::synthesize_followup(&outgoing_sync))
                    } else {
                        None
                    };

                    let egresses: Vec<EgressTiming> = candidates
                        .iter()
                        .map(|&egress| EgressTiming {
                            port: egress,
                            tx_timestamp: egress_timestamp(egress),
                            tx_timestamp_offset: self.ports[egress.0].tx_timestamp_offset,
                        })
                        .collect();

                    let mut outputs = tc::forward_sync_two_step(
                        &mut self.correlator,
                        &outgoing_sync,
                        ingress,
                        &egresses,
                        1.0,
                        peer_delay,
                        asymmetry,
                        rx_offset,
                        ingress_ts,
                        now,
                    );

                    if let Some(fup) = synthesized_followup {
                        outputs.extend(tc::forward_followup(
                            &mut self.correlator,
                            &fup,
                            &candidates,
                            peer_delay,
                            asymmetry,
                        ));
                    }
                    outputs
                }
            }
            MessageType::FollowUp => {
                if ingress_one_step {
                    let mut outputs = Vec::new();
                    for &egress in &candidates {
                        if let tc::OneStepOutcome::Fused(fused) = tc::offer_onestep_followup(
                            &mut self.ports[egress.0].onestep_info,
                            &message,
                            peer_delay + asymmetry,
                        ) {
                            outputs.push(ForwardedMessage { egress, message: fused });
                        }
                    }
                    outputs
                } else {
                    tc::forward_followup(&mut self.correlator, &message, &candidates, peer_delay, asymmetry)
                }
            }
            MessageType::DelayReq => candidates
                .into_iter()
                .map(|egress| {
                    let tx_ts = egress_timestamp(egress);
                    tc::forward_delay_req(&mut self.correlator, &message, ingress, egress, tx_ts, ingress_ts, 1.0, now)
                })
                .collect(),
            MessageType::DelayResp => tc::forward_delay_resp(&mut self.correlator, &message, ingress)
                .into_iter()
                .collect(),
            MessageType::Announce => candidates
                .into_iter()
                .map(|egress| ForwardedMessage {
                    egress,
                    message: tc::forward_announce(&message, self.ports[egress.0].config.tc_spanning_tree),
                })
                .collect(),
            _ => candidates
                .into_iter()
                .map(|egress| ForwardedMessage {
                    egress,
                    message: (*message).clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClockType as Ct, DelayMechanism, PortAttachment, RedundancyAttachment, TimestampingMode};
    use crate::datastructures::common::{ClockAccuracy, ClockIdentity};
    use crate::datastructures::messages::{FollowUpMessage, Header, SyncMessage};

    fn instance(priority_1: u8) -> InstanceConfig {
        InstanceConfig {
            clock_identity: ClockIdentity([7; 8]),
            priority_1,
            priority_2: 128,
            domain_number: 0,
            slave_only: false,
            sdo_id: 0,
        }
    }

    fn quality() -> ClockQuality {
        ClockQuality {
            clock_class: 248,
            clock_accuracy: ClockAccuracy::NS100,
            offset_scaled_log_variance: 0,
        }
    }

    fn port_config(port_number: u16) -> PortConfig {
        PortConfig {
            port_number,
            ..Default::default()
        }
    }

    fn two_port_tc() -> Clock {
        Clock::new(
            instance(128),
            quality(),
            Ct::E2eTransparent,
            RedundancyProfile::None,
            ComparatorProfile::Standard,
            vec![port_config(1), port_config(2)],
        )
    }

    fn sync_message(seq: u16) -> Message {
        Message {
            header: Header {
                source_port_identity: PortIdentity {
                    clock_identity: ClockIdentity([1; 8]),
                    port_number: 1,
                },
                sequence_id: seq,
                two_step_flag: true,
                ..Default::default()
            },
            message_type: MessageType::Sync,
            body: MessageBody::Sync(SyncMessage::default()),
        }
    }

    fn followup_message(seq: u16) -> Message {
        Message {
            header: Header {
                source_port_identity: PortIdentity {
                    clock_identity: ClockIdentity([1; 8]),
                    port_number: 1,
                },
                sequence_id: seq,
                ..Default::default()
            },
            message_type: MessageType::FollowUp,
            body: MessageBody::FollowUp(FollowUpMessage::default()),
        }
    }

    #[test]
    fn transparent_clock_forwards_sync_and_followup_with_residence() {
        let mut clock = two_port_tc();
        clock.ports[0].state = crate::port::PortState::Slave;
        clock.ports[1].state = crate::port::PortState::Master;

        let t0 = Instant::from_nanos_since_arbitrary_epoch(0);
        let t1 = Instant::from_nanos_since_arbitrary_epoch(500);

        let forwarded = clock.dispatch_ingress(PortIndex(0), Rc::new(sync_message(1)), t0, t0, |_| t1);
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].egress, PortIndex(1));

        let fup_forwarded = clock.dispatch_ingress(PortIndex(0), Rc::new(followup_message(1)), t1, t1, |_| t1);
        assert_eq!(fup_forwarded.len(), 1);
        use crate::datastructures::common::TimeInterval;
        let expected: TimeInterval = Duration::from_nanos(500).into();
        assert_eq!(fup_forwarded[0].message.header.correction_field, expected);
    }

    fn one_step_port_tc() -> Clock {
        Clock::new(
            instance(128),
            quality(),
            Ct::E2eTransparent,
            RedundancyProfile::None,
            ComparatorProfile::Standard,
            vec![
                PortConfig {
                    port_number: 1,
                    timestamping: TimestampingMode::OneStep,
                    ..Default::default()
                },
                PortConfig {
                    port_number: 2,
                    timestamping: TimestampingMode::TwoStep,
                    ..Default::default()
                },
            ],
        )
    }

    #[test]
    fn onestep_decision_follows_ingress_not_egress() {
        // Ingress one-step, egress two-step: a two-step Sync/FollowUp pair
        // must still go through fusion rather than the two-step forwarder,
        // because `tc_fwd_sync`/`tc_fwd_folup` only ever look at `q`.
        let mut clock = one_step_port_tc();
        clock.ports[0].state = crate::port::PortState::Slave;
        clock.ports[1].state = crate::port::PortState::Master;

        let t0 = Instant::from_nanos_since_arbitrary_epoch(0);
        let t1 = Instant::from_nanos_since_arbitrary_epoch(500);

        let forwarded = clock.dispatch_ingress(PortIndex(0), Rc::new(sync_message(1)), t0, t0, |_| t1);
        // The Sync half is pending fusion; nothing is emitted until the
        // matching FollowUp arrives.
        assert!(forwarded.is_empty());

        let fup_forwarded = clock.dispatch_ingress(PortIndex(0), Rc::new(followup_message(1)), t1, t1, |_| t1);
        assert_eq!(fup_forwarded.len(), 1);
        assert!(!fup_forwarded[0].message.header.two_step_flag);
        assert_eq!(fup_forwarded[0].message.message_type, MessageType::Sync);
    }

    #[test]
    fn onestep_ingress_with_already_onestep_sync_forwards_directly() {
        let mut clock = one_step_port_tc();
        clock.ports[0].state = crate::port::PortState::Slave;
        clock.ports[1].state = crate::port::PortState::Master;

        let mut sync = sync_message(1);
        sync.header.two_step_flag = false;

        let t0 = Instant::from_nanos_since_arbitrary_epoch(0);
        let t1 = Instant::from_nanos_since_arbitrary_epoch(500);
        let forwarded = clock.dispatch_ingress(PortIndex(0), Rc::new(sync), t0, t0, |_| t1);
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].message.message_type, MessageType::Sync);
        use crate::datastructures::common::TimeInterval;
        let expected: TimeInterval = Duration::from_nanos(500).into();
        assert_eq!(forwarded[0].message.header.correction_field, expected);
    }

    #[test]
    fn twostep_ingress_with_onestep_sync_synthesizes_followup() {
        // Ingress two-step, incoming Sync already one-step:
        // `tc_fwd_sync` synthesizes a FollowUp and flags the Sync two-step
        // on the way out, forwarding both.
        let mut clock = two_port_tc();
        clock.ports[0].state = crate::port::PortState::Slave;
        clock.ports[1].state = crate::port::PortState::Master;

        let mut sync = sync_message(7);
        sync.header.two_step_flag = false;

        let t0 = Instant::from_nanos_since_arbitrary_epoch(0);
        let t1 = Instant::from_nanos_since_arbitrary_epoch(300);
        let forwarded = clock.dispatch_ingress(PortIndex(0), Rc::new(sync), t0, t0, |_| t1);

        assert_eq!(forwarded.len(), 2);
        let sync_out = forwarded.iter().find(|f| f.message.message_type == MessageType::Sync).unwrap();
        let fup_out = forwarded.iter().find(|f| f.message.message_type == MessageType::FollowUp).unwrap();
        assert!(sync_out.message.header.two_step_flag);
        assert_eq!(fup_out.message.header.sequence_id, 7);
    }

    #[test]
    fn ordinary_clock_does_not_forward() {
        let mut clock = Clock::new(
            instance(128),
            quality(),
            Ct::OrdinaryOrBoundary,
            RedundancyProfile::None,
            ComparatorProfile::Standard,
            vec![port_config(1), port_config(2)],
        );
        clock.ports[0].state = crate::port::PortState::Slave;
        clock.ports[1].state = crate::port::PortState::Master;
        let t0 = Instant::from_nanos_since_arbitrary_epoch(0);
        let forwarded = clock.dispatch_ingress(PortIndex(0), Rc::new(sync_message(1)), t0, t0, |_| t0);
        assert!(forwarded.is_empty());
    }

    #[test]
    fn management_with_no_forwarding_target_is_handed_to_local_responder() {
        let spanning_tree_port = |port_number: u16| PortConfig {
            port_number,
            tc_spanning_tree: true,
            ..Default::default()
        };
        let mut clock = Clock::new(
            instance(128),
            quality(),
            Ct::OrdinaryOrBoundary,
            RedundancyProfile::None,
            ComparatorProfile::Standard,
            vec![spanning_tree_port(1), spanning_tree_port(2)],
        );
        clock.ports[0].state = crate::port::PortState::Master;
        clock.ports[1].state = crate::port::PortState::Faulty;
        let management = Message {
            header: Header::default(),
            message_type: MessageType::Management,
            body: MessageBody::Opaque(arrayvec::ArrayVec::new()),
        };
        assert!(clock.local_management_response(PortIndex(0), &management));

        clock.ports[1].state = crate::port::PortState::Master;
        assert!(!clock.local_management_response(PortIndex(0), &management));
    }

    #[test]
    fn run_bmca_elects_self_as_grandmaster_with_no_foreign_masters() {
        let mut clock = two_port_tc();
        clock.run_bmca(Instant::from_nanos_since_arbitrary_epoch(0));
        assert_eq!(clock.ports[0].state, crate::port::PortState::GrandMaster);
        assert_eq!(clock.ports[1].state, crate::port::PortState::GrandMaster);
    }

    #[test]
    fn hsr_pair_elects_one_slave_from_identical_foreign_master() {
        let mut clock = Clock::new(
            instance(128),
            quality(),
            Ct::OrdinaryOrBoundary,
            RedundancyProfile::Hsr,
            ComparatorProfile::Standard,
            vec![
                PortConfig {
                    port_number: 1,
                    delay_mechanism: DelayMechanism::E2e,
                    timestamping: TimestampingMode::TwoStep,
                    redundancy: RedundancyAttachment {
                        attachment: PortAttachment::RingPortA,
                        paired_port: Some(PortIndex(1)),
                    },
                    ..Default::default()
                },
                PortConfig {
                    port_number: 2,
                    delay_mechanism: DelayMechanism::E2e,
                    timestamping: TimestampingMode::TwoStep,
                    redundancy: RedundancyAttachment {
                        attachment: PortAttachment::RingPortB,
                        paired_port: Some(PortIndex(0)),
                    },
                    ..Default::default()
                },
            ],
        );

        let now = Instant::from_nanos_since_arbitrary_epoch(0);
        let announce = crate::datastructures::messages::AnnounceMessage {
            grandmaster_priority_1: 10,
            grandmaster_clock_quality: ClockQuality {
                clock_class: 6,
                clock_accuracy: ClockAccuracy::NS100,
                offset_scaled_log_variance: 0,
            },
            grandmaster_priority_2: 128,
            grandmaster_identity: ClockIdentity([9; 8]),
            steps_removed: 1,
            ..Default::default()
        };
        let sender = PortIdentity {
            clock_identity: ClockIdentity([9; 8]),
            port_number: 1,
        };
        let wire = Message {
            header: Header {
                source_port_identity: sender,
                ..Default::default()
            },
            message_type: MessageType::Announce,
            body: MessageBody::Announce(announce),
        };
        // Both ring ports hear the same grandmaster twice, to clear the
        // qualification threshold.
        clock.receive_announce(PortIndex(0), &wire, now);
        clock.receive_announce(PortIndex(0), &wire, now);
        clock.receive_announce(PortIndex(1), &wire, now);
        clock.receive_announce(PortIndex(1), &wire, now);

        clock.run_bmca(now);
        let one_slave = (clock.ports[0].state == crate::port::PortState::Slave)
            ^ (clock.ports[1].state == crate::port::PortState::Slave);
        assert!(one_slave);
    }
}
