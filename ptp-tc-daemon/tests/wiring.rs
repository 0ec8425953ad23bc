//! Exercises the whole wiring path this binary is a thin carrier for: a
//! TOML config turns into a `ptp_core::clock::Clock`, a transparent-clock
//! port pair forwards a two-step Sync/FollowUp pair, and every send lands
//! in the loopback transport stand-in. Nothing here touches a socket or a
//! PHC; that is the point.

use std::rc::Rc;

use ptp_core::clock::Clock;
use ptp_core::config::PortIndex;
use ptp_core::datastructures::common::{ClockIdentity, PortIdentity};
use ptp_core::datastructures::messages::{
    FollowUpMessage, Header, Message, MessageBody, MessageType, SyncMessage,
};
use ptp_core::network::{Transport, TransportKind};
use ptp_core::port::PortState;
use ptp_core::time::Instant;
use ptp_tc_daemon::config::Config;
use ptp_tc_daemon::transport::LoopbackTransport;

const TC_CONFIG: &str = r#"
clock-identity = "0011223344556677"
clock-type = "e2e-transparent"

[[port]]
port-number = 1

[[port]]
port-number = 2
"#;

fn sync_from_port_one(seq: u16) -> Message {
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

fn followup_from_port_one(seq: u16) -> Message {
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
fn config_drives_a_transparent_clock_end_to_end() {
    let config: Config = toml::from_str(TC_CONFIG).unwrap();
    let (instance, quality, clock_type, redundancy, comparator, ports) = config.build();
    let mut clock = Clock::new(instance, quality, clock_type, redundancy, comparator, ports);

    clock.ports[0].state = PortState::Slave;
    clock.ports[1].state = PortState::Master;

    let mut transport = LoopbackTransport::new();

    let t0 = Instant::from_nanos_since_arbitrary_epoch(0);
    let t1 = Instant::from_nanos_since_arbitrary_epoch(200);

    let sync_forwards = clock.dispatch_ingress(PortIndex(0), Rc::new(sync_from_port_one(1)), t0, t0, |_| t1);
    assert_eq!(sync_forwards.len(), 1);
    assert_eq!(sync_forwards[0].egress, PortIndex(1));
    transport
        .send(sync_forwards[0].egress, TransportKind::General, &sync_forwards[0].message)
        .unwrap();

    let fup_forwards = clock.dispatch_ingress(PortIndex(0), Rc::new(followup_from_port_one(1)), t1, t1, |_| t1);
    assert_eq!(fup_forwards.len(), 1);
    transport
        .send(fup_forwards[0].egress, TransportKind::General, &fup_forwards[0].message)
        .unwrap();

    let recorded: Vec<_> = transport.drain().collect();
    assert_eq!(recorded.len(), 2);
    assert!(recorded.iter().all(|(port, kind, _)| *port == PortIndex(1) && *kind == TransportKind::General));
}

#[test]
fn config_elects_self_as_grandmaster_with_no_foreign_masters() {
    let config: Config = toml::from_str(TC_CONFIG).unwrap();
    let (instance, quality, clock_type, redundancy, comparator, ports) = config.build();
    let mut clock = Clock::new(instance, quality, clock_type, redundancy, comparator, ports);

    clock.run_bmca(Instant::from_nanos_since_arbitrary_epoch(0));
    assert_eq!(clock.ports[0].state, PortState::GrandMaster);
    assert_eq!(clock.ports[1].state, PortState::GrandMaster);
}
