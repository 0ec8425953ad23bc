use arrayvec::ArrayVec;

use super::comparator::ComparatorProfile;
use super::dataset::Dataset;
use crate::datastructures::common::PortIdentity;
use crate::time::{Duration, Instant};

/// How many of the most recent expected Announces are retained per foreign
/// master, and how many of them must be present for the record to be
/// "qualified". Grounded on `statime`'s
/// `FOREIGN_MASTER_TIME_WINDOW`/`FOREIGN_MASTER_THRESHOLD`, adjusted to the
/// IEEE 1588 default window ("at least 2 of the last 4").
const ANNOUNCE_WINDOW: usize = 4;
const QUALIFY_THRESHOLD: usize = 2;
/// Upper bound on distinct senders a single port tracks at once.
const MAX_FOREIGN_MASTERS: usize = 8;

/// Announces heard from one sender PortIdentity, newest last.
#[derive(Debug, Clone)]
struct ForeignMasterRecord {
    sender: PortIdentity,
    received: ArrayVec<(Instant, Dataset), ANNOUNCE_WINDOW>,
}

impl ForeignMasterRecord {
    fn new(sender: PortIdentity) -> Self {
        ForeignMasterRecord {
            sender,
            received: ArrayVec::new(),
        }
    }

    fn purge_older_than(&mut self, now: Instant, cutoff: Duration) {
        self.received
            .retain(|(seen_at, _)| now.duration_since(*seen_at) < cutoff);
    }

    fn register(&mut self, now: Instant, dataset: Dataset) {
        if self.received.is_full() {
            self.received.remove(0);
        }
        self.received.push((now, dataset));
    }

    fn is_qualified(&self) -> bool {
        self.received.len() >= QUALIFY_THRESHOLD
    }

    fn latest(&self) -> Option<&Dataset> {
        self.received.last().map(|(_, dataset)| dataset)
    }
}

/// Per-port collection of recently heard Announces, grouped by sender. The
/// qualified record with the best Dataset is the port's `best_foreign`.
#[derive(Debug, Clone, Default)]
pub struct ForeignMasterSet {
    records: ArrayVec<ForeignMasterRecord, MAX_FOREIGN_MASTERS>,
}

impl ForeignMasterSet {
    pub fn new() -> Self {
        ForeignMasterSet {
            records: ArrayVec::new(),
        }
    }

    /// Registers a newly received Announce-derived Dataset from `sender`.
    /// Evicts the oldest tracked sender if the set is already full and
    /// `sender` is not already tracked.
    pub fn register_announce(&mut self, now: Instant, sender: PortIdentity, dataset: Dataset) {
        if let Some(record) = self.records.iter_mut().find(|r| r.sender == sender) {
            record.register(now, dataset);
            return;
        }
        if self.records.is_full() {
            self.records.remove(0);
        }
        let mut record = ForeignMasterRecord::new(sender);
        record.register(now, dataset);
        self.records.push(record);
    }

    /// Drops announces older than `announce_interval * ANNOUNCE_WINDOW` from
    /// every tracked sender, then drops senders left with no announces at
    /// all.
    pub fn purge_old_messages(&mut self, now: Instant, announce_interval: Duration) {
        let cutoff = announce_interval.scale(ANNOUNCE_WINDOW as f64);
        for record in &mut self.records {
            record.purge_older_than(now, cutoff);
        }
        self.records.retain(|r| !r.received.is_empty());
    }

    /// Drops every tracked sender, e.g. on ANNOUNCE_RECEIPT_TIMEOUT
    /// (`spec.md` §5).
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// The best qualified Dataset currently tracked, or `None` if no sender
    /// has yet reached [`QUALIFY_THRESHOLD`].
    pub fn best_foreign(&self, profile: ComparatorProfile) -> Option<&Dataset> {
        self.records
            .iter()
            .filter(|r| r.is_qualified())
            .filter_map(|r| r.latest())
            .fold(None, |best, candidate| match best {
                None => Some(candidate),
                Some(current_best) => {
                    if profile.compare(Some(candidate), Some(current_best)).a_strictly_better() {
                        Some(candidate)
                    } else {
                        Some(current_best)
                    }
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastructures::common::{ClockAccuracy, ClockIdentity, ClockQuality};

    fn dataset(priority_1: u8) -> Dataset {
        Dataset {
            priority_1,
            priority_2: 128,
            local_priority: 0,
            identity: ClockIdentity([1; 8]),
            quality: ClockQuality {
                clock_class: 6,
                clock_accuracy: ClockAccuracy::NS100,
                offset_scaled_log_variance: 0,
            },
            steps_removed: 1,
            sender: PortIdentity {
                clock_identity: ClockIdentity([1; 8]),
                port_number: 1,
            },
            receiver: PortIdentity {
                clock_identity: ClockIdentity([2; 8]),
                port_number: 1,
            },
        }
    }

    fn sender(n: u8) -> PortIdentity {
        PortIdentity {
            clock_identity: ClockIdentity([n; 8]),
            port_number: 1,
        }
    }

    #[test]
    fn unqualified_until_threshold() {
        let mut set = ForeignMasterSet::new();
        let now = Instant::from_nanos_since_arbitrary_epoch(0);
        set.register_announce(now, sender(1), dataset(128));
        assert!(set.best_foreign(ComparatorProfile::Standard).is_none());
        set.register_announce(now, sender(1), dataset(128));
        assert!(set.best_foreign(ComparatorProfile::Standard).is_some());
    }

    #[test]
    fn purge_drops_stale_senders() {
        let mut set = ForeignMasterSet::new();
        let t0 = Instant::from_nanos_since_arbitrary_epoch(0);
        set.register_announce(t0, sender(1), dataset(128));
        set.register_announce(t0, sender(1), dataset(128));
        assert!(set.best_foreign(ComparatorProfile::Standard).is_some());

        let much_later = Instant::from_nanos_since_arbitrary_epoch(10_000_000_000);
        set.purge_old_messages(much_later, Duration::from_nanos(1_000_000_000));
        assert!(set.best_foreign(ComparatorProfile::Standard).is_none());
    }
}
