use super::redundancy::RedundancyAttachment;

/// `delayMechanism`, `portDS` (`ds.h`). `Disabled` covers ports that neither
/// measure nor forward delay requests (e.g. a pure management port).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelayMechanism {
    #[default]
    E2e,
    P2p,
    Disabled,
}

/// Whether a port's BMCA runs normally or is held fixed, mirroring
/// linuxptp's `BMCA_NOOP`/`BMCA_P2P` port option (`port_bmca_mode`, bmc.c).
/// The "port's BMCA mode is NOOP" state-decision row is the only place
/// this is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmcaMode {
    #[default]
    Full,
    Noop,
}

/// Whether a port timestamps a Sync at transmit time directly (one-step) or
/// relies on a following FollowUp (two-step). `port_private.h`'s
/// `timestamping >= TS_ONESTEP` check is represented here as a plain
/// boolean-shaped enum rather than carrying the full P2P-one-step variant,
/// since the forwarder only ever asks "is this capable of one-step".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampingMode {
    #[default]
    TwoStep,
    OneStep,
}

impl TimestampingMode {
    pub fn is_one_step_capable(self) -> bool {
        matches!(self, TimestampingMode::OneStep)
    }
}

/// Per-port configuration: the subset of `portDS`/`iec62439_portDS` the core
/// reads. Socket/VLAN/PHC specifics are a daemon concern, not this crate's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig {
    pub port_number: u16,
    pub delay_mechanism: DelayMechanism,
    pub bmca_mode: BmcaMode,
    pub timestamping: TimestampingMode,
    pub transport_specific: u8,
    pub match_transport_specific: bool,
    /// `tc_spanning_tree` — whether Announce forwarding increments
    /// `stepsRemoved`, and whether the block filter applies at all for a
    /// non-HSR clock (neither HSR nor TC-with-spanning-tree means
    /// unblocked).
    pub tc_spanning_tree: bool,
    /// Telecom-profile tiebreak, `ds.h`'s `localPriority`; unused by the
    /// default comparator (see `bmc::comparator::TelecomComparator`).
    pub local_priority: u8,
    pub redundancy: RedundancyAttachment,
}

impl Default for PortConfig {
    fn default() -> Self {
        PortConfig {
            port_number: 1,
            delay_mechanism: DelayMechanism::default(),
            bmca_mode: BmcaMode::default(),
            timestamping: TimestampingMode::default(),
            transport_specific: 0,
            match_transport_specific: true,
            tc_spanning_tree: false,
            local_priority: 0,
            redundancy: RedundancyAttachment::NONE,
        }
    }
}
