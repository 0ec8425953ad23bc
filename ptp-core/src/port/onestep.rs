use crate::datastructures::common::{TimeInterval, WireTimestamp};
use crate::time::Duration;

/// A cached half of a Sync/FollowUp pair awaiting fusion into a single
/// one-step Sync, or awaiting the two-step emission of a matching pair.
/// `residence` is only meaningful on the Sync half: the egress residence
/// measured when the Sync was offered, carried across to fusion time since
/// the FollowUp itself never touches this egress's hardware timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHalf {
    pub origin_timestamp: WireTimestamp,
    pub correction: TimeInterval,
    pub sequence_id: u16,
    pub residence: Duration,
}

/// Per-port "pending-half" slot for one-step/two-step Sync+FollowUp fusion
/// (linuxptp's `onestep_info`). A sum type with three states rather than a
/// scratch buffer plus a valid flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnestepInfo {
    #[default]
    Empty,
    HaveSync(PendingHalf),
    HaveFup(PendingHalf),
}

impl OnestepInfo {
    /// A Sync arrived. If a FollowUp for the same sequence is already
    /// pending, returns the fused pair and clears the slot; otherwise stores
    /// this Sync and waits for its FollowUp.
    pub fn offer_sync(&mut self, half: PendingHalf) -> Option<(PendingHalf, PendingHalf)> {
        match *self {
            OnestepInfo::HaveFup(fup) if fup.sequence_id == half.sequence_id => {
                *self = OnestepInfo::Empty;
                Some((half, fup))
            }
            _ => {
                *self = OnestepInfo::HaveSync(half);
                None
            }
        }
    }

    /// A FollowUp arrived. Symmetric to [`Self::offer_sync`].
    pub fn offer_fup(&mut self, half: PendingHalf) -> Option<(PendingHalf, PendingHalf)> {
        match *self {
            OnestepInfo::HaveSync(sync) if sync.sequence_id == half.sequence_id => {
                *self = OnestepInfo::Empty;
                Some((sync, half))
            }
            _ => {
                *self = OnestepInfo::HaveFup(half);
                None
            }
        }
    }

    pub fn clear(&mut self) {
        *self = OnestepInfo::Empty;
    }
}
