use crate::datastructures::messages::MessageType;
use crate::port::PortState;

/// A message "swims against the stream" on a Master/GrandMaster ingress or a
/// Slave/Uncalibrated egress: only DelayReq and Management are allowed to
/// travel in the reverse direction.
fn swims_against_stream(message_type: MessageType) -> bool {
    matches!(message_type, MessageType::DelayReq | MessageType::Management)
}

/// Ingress half of `tc_blocked`'s state switch (`tc.c` lines 265-288).
/// Returns whether a message entering on a port in `ingress_state` is
/// blocked outright, independent of the egress side.
fn ingress_blocks(ingress_state: PortState, message_type: MessageType) -> bool {
    match ingress_state {
        PortState::Initializing
        | PortState::Faulty
        | PortState::Disabled
        | PortState::Listening
        | PortState::PreMaster
        | PortState::Passive
        | PortState::PassiveSlave => true,
        PortState::Master | PortState::GrandMaster => !swims_against_stream(message_type),
        PortState::Uncalibrated | PortState::Slave => false,
    }
}

/// Egress half of `tc_blocked`'s state switch (`tc.c` lines 293-321).
/// Returns whether a message may not leave a port in `egress_state`.
fn egress_blocks(egress_state: PortState, message_type: MessageType) -> bool {
    match egress_state {
        PortState::Initializing
        | PortState::Faulty
        | PortState::Disabled
        | PortState::Listening
        | PortState::PreMaster
        | PortState::Passive
        | PortState::PassiveSlave => true,
        PortState::Uncalibrated | PortState::Slave => !swims_against_stream(message_type),
        // No use forwarding DelayReq out the wrong port; Management and
        // everything else is free to leave a Master/GrandMaster egress.
        PortState::Master | PortState::GrandMaster => message_type == MessageType::DelayReq,
    }
}

/// `blocked(ingress, egress, message)` returns whether a
/// message arriving on `ingress_port_number`/`ingress_state` must not be
/// forwarded to `egress_port_number`/`egress_state`.
#[allow(clippy::too_many_arguments)]
pub fn blocked(
    ingress_port_number: u16,
    ingress_state: PortState,
    egress_port_number: u16,
    egress_state: PortState,
    message_type: MessageType,
    message_domain: u8,
    clock_domain: u8,
    filtering_active: bool,
) -> bool {
    if ingress_port_number == egress_port_number {
        return true;
    }
    if egress_port_number == 0 {
        return true;
    }
    if !filtering_active {
        return false;
    }
    if message_domain != clock_domain {
        return false;
    }

    // The UDS (management) pseudo-port skips the ingress switch entirely
    // whenever it is not FAULTY (`tc_blocked`'s `goto egress`), so a local
    // management message is judged solely by the egress side.
    let uds_ingress_shortcut = ingress_port_number == 0 && ingress_state != PortState::Faulty;
    if !uds_ingress_shortcut && ingress_blocks(ingress_state, message_type) {
        return true;
    }

    egress_blocks(egress_state, message_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_port_always_blocked() {
        assert!(blocked(
            1,
            PortState::Slave,
            1,
            PortState::Slave,
            MessageType::Sync,
            0,
            0,
            true
        ));
    }

    #[test]
    fn uds_egress_always_blocked() {
        assert!(blocked(
            1,
            PortState::Slave,
            0,
            PortState::Master,
            MessageType::Sync,
            0,
            0,
            true
        ));
    }

    #[test]
    fn foreign_domain_passes_through() {
        assert!(!blocked(
            1,
            PortState::Disabled,
            2,
            PortState::Disabled,
            MessageType::Sync,
            5,
            0,
            true
        ));
    }

    #[test]
    fn filtering_inactive_bypasses_state_checks() {
        assert!(!blocked(
            1,
            PortState::Faulty,
            2,
            PortState::Faulty,
            MessageType::Sync,
            0,
            0,
            false
        ));
    }

    #[test]
    fn delay_req_blocked_egressing_master() {
        assert!(blocked(
            1,
            PortState::Slave,
            2,
            PortState::Master,
            MessageType::DelayReq,
            0,
            0,
            true
        ));
    }

    #[test]
    fn sync_flows_slave_to_master() {
        // Sync ingresses on the slave-facing port and fans out downstream
        // through a Master egress — the normal direction.
        assert!(!blocked(
            1,
            PortState::Slave,
            2,
            PortState::Master,
            MessageType::Sync,
            0,
            0,
            true
        ));
    }

    #[test]
    fn sync_ingressing_on_master_is_blocked() {
        // A Master/GrandMaster ingress only lets DelayReq/Management swim
        // against the stream; Sync arriving there never makes sense and is
        // blocked outright, regardless of the egress side.
        assert!(blocked(
            1,
            PortState::Master,
            2,
            PortState::Slave,
            MessageType::Sync,
            0,
            0,
            true
        ));
    }

    #[test]
    fn management_swims_against_stream_on_master_ingress() {
        assert!(!blocked(
            1,
            PortState::Master,
            2,
            PortState::Slave,
            MessageType::Management,
            0,
            0,
            true
        ));
    }

    #[test]
    fn sync_egressing_toward_slave_is_blocked() {
        // A Sync/Announce/FollowUp/DelayResp egressing a Slave/Uncalibrated
        // port would run the wrong direction; only DelayReq/Management may.
        assert!(blocked(
            1,
            PortState::Slave,
            2,
            PortState::Uncalibrated,
            MessageType::Announce,
            0,
            0,
            true
        ));
    }

    #[test]
    fn delay_req_allowed_egressing_slave() {
        assert!(!blocked(
            1,
            PortState::Master,
            2,
            PortState::Slave,
            MessageType::DelayReq,
            0,
            0,
            true
        ));
    }

    #[test]
    fn management_allowed_egressing_master() {
        // Unlike DelayReq, Management is not blocked egressing a
        // Master/GrandMaster port.
        assert!(!blocked(
            1,
            PortState::Slave,
            2,
            PortState::Master,
            MessageType::Management,
            0,
            0,
            true
        ));
    }

    #[test]
    fn uds_ingress_forwards_unless_faulty() {
        assert!(!blocked(
            0,
            PortState::Listening,
            2,
            PortState::Master,
            MessageType::Management,
            0,
            0,
            true
        ));
        assert!(blocked(
            0,
            PortState::Faulty,
            2,
            PortState::Master,
            MessageType::Management,
            0,
            0,
            true
        ));
    }
}
