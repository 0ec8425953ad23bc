//! IEC 62439-3 HSR/PRP overlay: duplicate suppression, direction rules,
//! source-identity rewriting and PRP LAN-tag bits.

use crate::config::{DelayMechanism, PortAttachment};
use crate::datastructures::common::{PortIdentity, PRP_LAN_A_BITS, PRP_LAN_B_BITS, PRP_LAN_BITMASK};
use crate::datastructures::messages::MessageType;
use crate::port::PortState;

/// Duplicate suppression on egress (`tc_hsr_prp_should_use_port`): ring-side
/// A and interlink ports always forward; ring-side B forwards only when its
/// paired A port cannot itself be relied on.
pub fn should_use_port(attachment: PortAttachment, paired_state: Option<PortState>) -> bool {
    match attachment {
        PortAttachment::RingPortA | PortAttachment::LanA => true,
        PortAttachment::RingPortB | PortAttachment::LanB => matches!(
            paired_state,
            Some(PortState::Disabled)
                | Some(PortState::Faulty)
                | Some(PortState::PassiveSlave)
                | Some(PortState::Listening)
        ),
        PortAttachment::Interlink | PortAttachment::None => true,
    }
}

/// HSR direction rule (`tc_hsr_should_fwd`). Interlink-to-ring applies
/// [`should_use_port`]; ring-to-interlink only lets through frames whose
/// source identity matches the clock's current parent, so a rogue frame
/// from another ring node cannot leak onto the interlink; ring-to-ring is
/// never re-emitted by software (hardware already duplicates A/B).
///
/// `tc.c` carries commented-out handling for Delay_Req egressing a
/// GM-attached ring port under E2E. That is left unimplemented here rather
/// than guessed at.
pub fn hsr_should_fwd(
    ingress_attachment: PortAttachment,
    egress_attachment: PortAttachment,
    egress_paired_state: Option<PortState>,
    message_source_identity: PortIdentity,
    clock_parent_identity: PortIdentity,
) -> bool {
    match (ingress_attachment.is_paired_side(), egress_attachment.is_paired_side()) {
        (false, true) => should_use_port(egress_attachment, egress_paired_state),
        (true, false) => message_source_identity == clock_parent_identity,
        (true, true) => false,
        (false, false) => true,
    }
}

/// PRP direction rule (`tc_prp_should_fwd`). Unlike HSR, there is no
/// ring(LAN)-to-interlink source-identity restriction in the source — the
/// asymmetry is intentional and preserved here rather than "fixed" into
/// false symmetry with HSR.
pub fn prp_should_fwd(
    ingress_attachment: PortAttachment,
    egress_attachment: PortAttachment,
    egress_paired_state: Option<PortState>,
) -> bool {
    match (ingress_attachment.is_paired_side(), egress_attachment.is_paired_side()) {
        (false, true) => should_use_port(egress_attachment, egress_paired_state),
        (true, true) => false,
        _ => true,
    }
}

/// DelayResp LAN routing under PRP: the response's
/// `requestingPortIdentity.portNumber` LAN-tag bits identify which LAN the
/// original request came from, so the response is forwarded on the
/// matching ring/LAN-side port only, independent of [`should_use_port`].
pub fn prp_delay_resp_should_fwd(requesting_port_number: u16, candidate: PortAttachment) -> bool {
    match requesting_port_number & PRP_LAN_BITMASK {
        PRP_LAN_A_BITS => candidate.is_a_side(),
        PRP_LAN_B_BITS => candidate.is_b_side(),
        _ => false,
    }
}

/// Sets the PRP LAN-tag bits on egress from the interlink into a LAN side,
/// gated on E2E delay mechanism per `tc_prp_set_port_number_bits`; P2P PRP
/// ports never touch the bits.
pub fn set_lan_bits(port_number: u16, attachment: PortAttachment, delay_mechanism: DelayMechanism) -> u16 {
    if delay_mechanism != DelayMechanism::E2e {
        return port_number;
    }
    let cleared = port_number & !PRP_LAN_BITMASK;
    if attachment.is_a_side() {
        cleared | PRP_LAN_A_BITS
    } else if attachment.is_b_side() {
        cleared | PRP_LAN_B_BITS
    } else {
        cleared
    }
}

/// Clears the PRP LAN-tag bits, used both when forwarding LAN-to-interlink
/// and after a DelayResp egresses (`tc_prp_clear_resp_port_number_bits`).
/// This is an unconditional clear in the source, not a true save/restore of
/// whatever bits were previously there — preserved faithfully rather than
/// "fixed" into a restore.
pub fn clear_lan_bits(port_number: u16, delay_mechanism: DelayMechanism) -> u16 {
    if delay_mechanism != DelayMechanism::E2e {
        return port_number;
    }
    port_number & !PRP_LAN_BITMASK
}

/// Source-identity rewrite for HSR ring injection (`tc_hsr_set_port_identity`).
/// Only rewrites when forwarding *into* the ring from a non-paired
/// (interlink) port, and only when the ring-side-A port being written
/// through itself resolves to a genuine paired ring (never on an isolated,
/// misconfigured single ring-side port). Returns the identity to substitute,
/// or `None` if the message's source identity should be left untouched.
pub fn rewrite_source_identity(
    ingress_attachment: PortAttachment,
    ring_side_a_identity: PortIdentity,
    ring_side_a_has_pair: bool,
) -> Option<PortIdentity> {
    if ingress_attachment.is_paired_side() {
        return None;
    }
    if !ring_side_a_has_pair {
        return None;
    }
    Some(ring_side_a_identity)
}

/// Ring-internal Management is never forwarded by software under HSR/PRP
/// (hardware already floods it); interlink Management preserves the
/// original source identity (`tc_forward`'s `MANAGEMENT` special case).
pub fn blocks_ring_internal_management(
    clock_is_hsr_or_prp: bool,
    ingress_attachment: PortAttachment,
    message_type: MessageType,
) -> bool {
    clock_is_hsr_or_prp && ingress_attachment.is_paired_side() && message_type == MessageType::Management
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastructures::common::ClockIdentity;

    fn identity(n: u8) -> PortIdentity {
        PortIdentity {
            clock_identity: ClockIdentity([n; 8]),
            port_number: 1,
        }
    }

    #[test]
    fn ring_side_a_always_forwards() {
        assert!(should_use_port(PortAttachment::RingPortA, None));
    }

    #[test]
    fn ring_side_b_forwards_only_when_a_is_down() {
        assert!(!should_use_port(PortAttachment::RingPortB, Some(PortState::Slave)));
        assert!(should_use_port(PortAttachment::RingPortB, Some(PortState::Faulty)));
    }

    #[test]
    fn hsr_ring_to_interlink_checks_parent_identity() {
        let parent = identity(1);
        assert!(hsr_should_fwd(
            PortAttachment::RingPortA,
            PortAttachment::Interlink,
            None,
            parent,
            parent
        ));
        assert!(!hsr_should_fwd(
            PortAttachment::RingPortA,
            PortAttachment::Interlink,
            None,
            identity(2),
            parent
        ));
    }

    #[test]
    fn prp_has_no_out_of_prp_restriction() {
        assert!(prp_should_fwd(PortAttachment::LanA, PortAttachment::Interlink, None));
    }

    #[test]
    fn prp_delay_resp_routes_by_lan_bits() {
        let tagged_a = PRP_LAN_A_BITS | 5;
        assert!(prp_delay_resp_should_fwd(tagged_a, PortAttachment::LanA));
        assert!(!prp_delay_resp_should_fwd(tagged_a, PortAttachment::LanB));
    }

    #[test]
    fn lan_bits_gated_on_e2e() {
        assert_eq!(
            set_lan_bits(5, PortAttachment::LanA, DelayMechanism::P2p),
            5,
            "P2P PRP ports never touch the LAN bits"
        );
        let tagged = set_lan_bits(5, PortAttachment::LanA, DelayMechanism::E2e);
        assert_eq!(tagged & PRP_LAN_BITMASK, PRP_LAN_A_BITS);
    }

    #[test]
    fn rewrite_skips_isolated_ring_port() {
        assert_eq!(
            rewrite_source_identity(PortAttachment::Interlink, identity(9), false),
            None
        );
        assert_eq!(
            rewrite_source_identity(PortAttachment::Interlink, identity(9), true),
            Some(identity(9))
        );
        assert_eq!(
            rewrite_source_identity(PortAttachment::RingPortA, identity(9), true),
            None
        );
    }
}
