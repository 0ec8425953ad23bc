use crate::datastructures::common::{ClockIdentity, ClockQuality, PortIdentity};
use crate::datastructures::messages::AnnounceMessage;

/// The comparable unit the BMCA operates on: the identity and quality of a
/// grandmaster as advertised by one Announce, plus enough provenance
/// (`sender`/`receiver`) to break ties topologically.
///
/// Grounded on `ds.h`'s `struct dataset`; immutable once built, per
/// `spec.md` §3's invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dataset {
    pub priority_1: u8,
    pub priority_2: u8,
    /// Telecom-profile tiebreak (`ds.h`'s `localPriority`); read only by
    /// [`crate::bmc::comparator::TelecomComparator`].
    pub local_priority: u8,
    pub identity: ClockIdentity,
    pub quality: ClockQuality,
    pub steps_removed: u16,
    pub sender: PortIdentity,
    pub receiver: PortIdentity,
}

impl Dataset {
    /// Builds a Dataset from a received Announce, the port it arrived on,
    /// and the local port that received it. `local_priority` is not carried
    /// on the wire (it is a local per-port configuration value), so it is
    /// threaded in separately.
    pub fn from_announce(
        announce: &AnnounceMessage,
        sender: PortIdentity,
        receiver: PortIdentity,
        local_priority: u8,
    ) -> Self {
        Dataset {
            priority_1: announce.grandmaster_priority_1,
            priority_2: announce.grandmaster_priority_2,
            local_priority,
            identity: announce.grandmaster_identity,
            quality: announce.grandmaster_clock_quality,
            steps_removed: announce.steps_removed,
            sender,
            receiver,
        }
    }
}
