/// Index of a port within a [`crate::clock::Clock`]'s port arena.
///
/// Kept as a plain index rather than a reference so that paired-port and
/// best-port relationships can be stored without the ports owning each
/// other (see the arena + index ownership design discussed for
/// `Clock`/`Port`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortIndex(pub usize);

/// What kind of clock this is, for the purposes of BMCA and forwarding.
///
/// linuxptp calls this `clock_type()`; `E2eTransparent`/`P2pTransparent`
/// select the TC-collapsed variant of `hsr_state_decision` (see
/// `bmc::state_decision`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockType {
    #[default]
    OrdinaryOrBoundary,
    E2eTransparent,
    P2pTransparent,
}

impl ClockType {
    pub fn is_transparent(self) -> bool {
        matches!(self, ClockType::E2eTransparent | ClockType::P2pTransparent)
    }
}

/// Which redundancy overlay, if any, this clock instance runs. A clock is
/// never both: `ds.h`'s `iec62439_portDS` is a single attachment field, never
/// two simultaneously active protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedundancyProfile {
    #[default]
    None,
    Hsr,
    Prp,
}

impl RedundancyProfile {
    pub fn is_hsr(self) -> bool {
        matches!(self, RedundancyProfile::Hsr)
    }

    pub fn is_prp(self) -> bool {
        matches!(self, RedundancyProfile::Prp)
    }
}

/// Which side of a redundant pair a port sits on, mirroring linuxptp's
/// `portAttachmentType` (`ds.h`): `NONE`, `RING_PORT_A`/`B`, `LAN_A`/`B`, or
/// `INTERLINK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortAttachment {
    #[default]
    None,
    RingPortA,
    RingPortB,
    LanA,
    LanB,
    Interlink,
}

impl PortAttachment {
    pub fn is_a_side(self) -> bool {
        matches!(self, PortAttachment::RingPortA | PortAttachment::LanA)
    }

    pub fn is_b_side(self) -> bool {
        matches!(self, PortAttachment::RingPortB | PortAttachment::LanB)
    }

    /// True for any ring-side (HSR) or LAN-side (PRP) attachment, as opposed
    /// to `None` (an ordinary port) or `Interlink` (connects the ring/PRP
    /// network to the rest of the PTP domain).
    pub fn is_paired_side(self) -> bool {
        self.is_a_side() || self.is_b_side()
    }
}

/// Per-port redundancy configuration: which side of the pair this port is
/// on, and (for A/B-side ports) the index of its twin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedundancyAttachment {
    pub attachment: PortAttachment,
    pub paired_port: Option<PortIndex>,
}

impl RedundancyAttachment {
    pub const NONE: RedundancyAttachment = RedundancyAttachment {
        attachment: PortAttachment::None,
        paired_port: None,
    };
}
