//! Egress orchestration: residence-time correction, one-step/two-step
//! fusion, and the plumbing shared by every forwarded message type.

use std::rc::Rc;

use super::correlator::{Correlator, TxDescriptor};
use crate::config::PortIndex;
use crate::datastructures::common::TimeInterval;
use crate::datastructures::messages::{AnnounceMessage, FollowUpMessage, Header, Message, MessageBody, MessageType};
use crate::port::onestep::{OnestepInfo, PendingHalf};
use crate::time::{Duration, Instant};

/// A message ready to transmit out `egress`, with its `correctionField`
/// already updated for that specific port.
#[derive(Debug, Clone)]
pub struct ForwardedMessage {
    pub egress: PortIndex,
    pub message: Message,
}

/// What one egress port observed for a just-forwarded event message: its
/// hardware transmit timestamp and its configured `tx_timestamp_offset`.
#[derive(Debug, Clone, Copy)]
pub struct EgressTiming {
    pub port: PortIndex,
    pub tx_timestamp: Instant,
    pub tx_timestamp_offset: Duration,
}

/// `egress_hw_ts - ingress_hw_ts`, scaled by the clock's `rate_ratio` when
/// it is not 1.0.
fn residence(ingress_ts: Instant, egress_ts: Instant, rate_ratio: f64) -> Duration {
    let raw = egress_ts.duration_since(ingress_ts);
    if rate_ratio == 1.0 {
        raw
    } else {
        raw.scale(rate_ratio)
    }
}

/// Forwards a two-step Sync to every non-blocked egress, applying
/// `peer_delay + asymmetry + rx_timestamp_offset` once up front and then
/// each egress's own residence plus `tx_timestamp_offset` on top, restoring
/// the pre-loop baseline between egresses exactly as `tc_fwd_event` does:
/// every egress sees the same starting correction.
pub fn forward_sync_two_step(
    correlator: &mut Correlator,
    message: &Message,
    ingress: PortIndex,
    egresses: &[EgressTiming],
    rate_ratio: f64,
    peer_delay: Duration,
    asymmetry: Duration,
    rx_timestamp_offset: Duration,
    ingress_ts: Instant,
    now: Instant,
) -> Vec<ForwardedMessage> {
    let pre_adjust: TimeInterval = (peer_delay + asymmetry + rx_timestamp_offset).into();
    let base_correction = message.header.correction_field + pre_adjust;

    let mut outputs = Vec::with_capacity(egresses.len());
    for timing in egresses {
        let egress_residence = residence(ingress_ts, timing.tx_timestamp, rate_ratio);
        let egress_adjust: TimeInterval = (egress_residence + timing.tx_timestamp_offset).into();

        let mut outgoing = message.clone();
        outgoing.header.correction_field = base_correction + egress_adjust;

        let stashed = outgoing.clone();
        outputs.push(ForwardedMessage {
            egress: timing.port,
            message: outgoing,
        });

        if let Err(err) = correlator.stash(
            timing.port,
            TxDescriptor {
                message: Rc::new(stashed),
                residence: egress_residence,
                ingress_port: ingress,
                created_at: now,
            },
        ) {
            crate::observability::port_fault(timing.port, err);
        }
    }
    outputs
}

/// Matches an arriving FollowUp against the Sync stashed at each candidate
/// egress and forwards a corrected copy to each match, adding
/// `residence + peer_delay + asymmetry` to the correction carried over from
/// the stashed Sync. Tolerates arriving before its Sync has been forwarded
/// to every candidate: candidates with no stashed match yet simply produce
/// no output for this call.
pub fn forward_followup(
    correlator: &mut Correlator,
    followup: &Message,
    egress_candidates: &[PortIndex],
    peer_delay: Duration,
    asymmetry: Duration,
) -> Vec<ForwardedMessage> {
    let extra: TimeInterval = (peer_delay + asymmetry).into();
    let mut outputs = Vec::new();
    for &egress in egress_candidates {
        if let Some(txd) = correlator.match_syfup(egress, followup) {
            let residence_correction: TimeInterval = txd.residence.into();
            let mut outgoing = followup.clone();
            outgoing.header.correction_field =
                followup.header.correction_field + residence_correction + extra;
            outputs.push(ForwardedMessage { egress, message: outgoing });
        }
    }
    outputs
}

/// Stashes a DelayReq at the egress it is forwarded through, so the
/// matching DelayResp (returning on that same port) can be correlated
/// later.
pub fn forward_delay_req(
    correlator: &mut Correlator,
    message: &Message,
    ingress: PortIndex,
    egress: PortIndex,
    egress_ts: Instant,
    ingress_ts: Instant,
    rate_ratio: f64,
    now: Instant,
) -> ForwardedMessage {
    let req_residence = residence(ingress_ts, egress_ts, rate_ratio);
    let outgoing = message.clone();
    if let Err(err) = correlator.stash(
        egress,
        TxDescriptor {
            message: Rc::new(outgoing.clone()),
            residence: req_residence,
            ingress_port: ingress,
            created_at: now,
        },
    ) {
        crate::observability::port_fault(egress, err);
    }
    ForwardedMessage { egress, message: outgoing }
}

/// Matches a DelayResp arriving on `ingress` against the DelayReq
/// previously stashed there, increments its correction by the stashed
/// residence, and forwards it back toward the original requester's ingress
/// port.
pub fn forward_delay_resp(correlator: &mut Correlator, resp: &Message, ingress: PortIndex) -> Option<ForwardedMessage> {
    let txd = match correlator.match_delay(ingress, resp) {
        Some(txd) => txd,
        None => {
            crate::observability::non_error_condition(ingress, "match_miss");
            return None;
        }
    };
    let residence_correction: TimeInterval = txd.residence.into();
    let mut outgoing = resp.clone();
    outgoing.header.correction_field = resp.header.correction_field + residence_correction;
    Some(ForwardedMessage {
        egress: txd.ingress_port,
        message: outgoing,
    })
}

/// Announce forwarding: `stepsRemoved` is incremented by one when the
/// egress clock runs with spanning-tree forwarding enabled.
pub fn forward_announce(message: &Message, spanning_tree: bool) -> Message {
    let mut outgoing = message.clone();
    if spanning_tree {
        if let MessageBody::Announce(AnnounceMessage { steps_removed, .. }) = &mut outgoing.body {
            *steps_removed = steps_removed.saturating_add(1);
        }
    }
    outgoing
}

/// Forwards a Sync that already arrived one-step on a one-step-capable
/// ingress straight through: no pending-half fusion is needed since the
/// message already carries its own origin timestamp. Applies
/// `peer_delay + asymmetry + rx_timestamp_offset` plus this egress's own
/// residence and `tx_timestamp_offset`, the same adjustment `tc_fwd_event`
/// makes for a one-step ingress (`tc.c` lines 486-493, 500-502) — `goto
/// onestep` in `tc_fwd_sync` skips the fusion machinery entirely here.
pub fn forward_onestep_event(
    message: &Message,
    peer_delay: Duration,
    asymmetry: Duration,
    rx_timestamp_offset: Duration,
    residence: Duration,
    tx_timestamp_offset: Duration,
) -> Message {
    let adjust: TimeInterval =
        (peer_delay + asymmetry + rx_timestamp_offset + residence + tx_timestamp_offset).into();
    let mut outgoing = message.clone();
    outgoing.header.correction_field = outgoing.header.correction_field + adjust;
    outgoing
}

/// Synthesizes the FollowUp half of a one-step Sync arriving on a two-step
/// ingress, copying the header fields `tc_fwd_sync` copies and carrying the
/// Sync's `originTimestamp` as `preciseOriginTimestamp` (`tc.c` lines
/// 851-860). The caller is responsible for setting the outgoing Sync's own
/// two-step flag.
pub fn synthesize_followup(sync: &Message) -> Message {
    let origin_timestamp = match &sync.body {
        MessageBody::Sync(s) => s.origin_timestamp,
        _ => Default::default(),
    };
    Message {
        header: Header {
            domain_number: sync.header.domain_number,
            source_port_identity: sync.header.source_port_identity,
            sequence_id: sync.header.sequence_id,
            log_message_interval: sync.header.log_message_interval,
            ..Default::default()
        },
        message_type: MessageType::FollowUp,
        body: MessageBody::FollowUp(FollowUpMessage { precise_origin_timestamp: origin_timestamp }),
    }
}

/// Fuses a two-step Sync+FollowUp pair arriving separately into a single
/// one-step Sync, or synthesizes a FollowUp from a one-step Sync at forward
/// time, per the `onestep_info` pending-half state machine. `residence` is
/// this egress's residence time for the Sync, measured when it arrives;
/// carried in the pending half so it can be folded in once the FollowUp
/// completes the pair.
pub fn offer_onestep_sync(onestep_info: &mut OnestepInfo, message: &Message, residence: Duration) -> OneStepOutcome {
    let half = PendingHalf {
        origin_timestamp: sync_origin_timestamp(message),
        correction: message.header.correction_field,
        sequence_id: message.header.sequence_id,
        residence,
    };
    match onestep_info.offer_sync(half) {
        Some((sync_half, fup_half)) => OneStepOutcome::Fused(complete_onestep(message, sync_half, fup_half, Duration::ZERO)),
        None => OneStepOutcome::Pending,
    }
}

/// Completes one-step fusion from the FollowUp side. `extra` is
/// `peer_delay + asymmetry`, added once on top of the stashed Sync's
/// residence, mirroring [`forward_followup`]'s two-step treatment.
pub fn offer_onestep_followup(onestep_info: &mut OnestepInfo, message: &Message, extra: Duration) -> OneStepOutcome {
    let half = PendingHalf {
        origin_timestamp: followup_origin_timestamp(message),
        correction: message.header.correction_field,
        sequence_id: message.header.sequence_id,
        residence: Duration::ZERO,
    };
    match onestep_info.offer_fup(half) {
        Some((sync_half, fup_half)) => OneStepOutcome::Fused(complete_onestep(message, sync_half, fup_half, extra)),
        None => OneStepOutcome::Pending,
    }
}

fn complete_onestep(template: &Message, sync_half: PendingHalf, fup_half: PendingHalf, extra: Duration) -> Message {
    let mut outgoing = fuse(template, sync_half, fup_half);
    let extra_adjust: TimeInterval = (sync_half.residence + extra).into();
    outgoing.header.correction_field = outgoing.header.correction_field + extra_adjust;
    outgoing
}

#[derive(Debug, Clone)]
pub enum OneStepOutcome {
    /// The fused one-step Sync, combining a previously two-step pair.
    Fused(Message),
    /// Waiting on this message's other half.
    Pending,
}

fn sync_origin_timestamp(message: &Message) -> crate::datastructures::common::WireTimestamp {
    match &message.body {
        MessageBody::Sync(sync) => sync.origin_timestamp,
        _ => Default::default(),
    }
}

fn followup_origin_timestamp(message: &Message) -> crate::datastructures::common::WireTimestamp {
    match &message.body {
        MessageBody::FollowUp(fup) => fup.precise_origin_timestamp,
        _ => Default::default(),
    }
}

fn fuse(template: &Message, sync_half: PendingHalf, fup_half: PendingHalf) -> Message {
    let mut outgoing = template.clone();
    outgoing.message_type = MessageType::Sync;
    outgoing.header.two_step_flag = false;
    outgoing.header.correction_field = sync_half.correction + fup_half.correction;
    outgoing.body = MessageBody::Sync(crate::datastructures::messages::SyncMessage {
        origin_timestamp: fup_half.origin_timestamp,
    });
    outgoing
}
