use core::cmp::Ordering;

use super::dataset::Dataset;

/// Result of comparing two [`Dataset`]s, IEEE 1588 §9.3.4 plus the HSR/PRP
/// topological refinement from `dscmp2` (`bmc.c`).
///
/// `ABetterTopo`/`BBetterTopo` mean "same grandmaster, reached by a better
/// path" — weaker than a genuinely better clock. The state decision (see
/// `bmc::state_decision`) treats the two differently, so this is kept as a
/// 5-valued enum rather than collapsed to `Ordering`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetComparison {
    ABetter,
    ABetterTopo,
    BBetterTopo,
    BBetter,
    Equal,
}

impl DatasetComparison {
    /// Whether `a` is at least as good as `b` under this result — used by
    /// the `cmp(...) > EQUAL` tests in `spec.md` §4.2's tables.
    pub fn a_at_least_as_good(self) -> bool {
        !matches!(self, DatasetComparison::BBetter | DatasetComparison::BBetterTopo)
    }

    pub fn a_strictly_better(self) -> bool {
        matches!(self, DatasetComparison::ABetter | DatasetComparison::ABetterTopo)
    }

    pub fn mirror(self) -> Self {
        match self {
            DatasetComparison::ABetter => DatasetComparison::BBetter,
            DatasetComparison::ABetterTopo => DatasetComparison::BBetterTopo,
            DatasetComparison::BBetterTopo => DatasetComparison::ABetterTopo,
            DatasetComparison::BBetter => DatasetComparison::ABetter,
            DatasetComparison::Equal => DatasetComparison::Equal,
        }
    }
}

/// `dscmp2` — same-grandmaster comparison, driven by `stepsRemoved` with a
/// one-hop slack and a topological tiebreak within that slack.
fn dscmp2(a: &Dataset, b: &Dataset) -> DatasetComparison {
    let (steps_a, steps_b) = (a.steps_removed, b.steps_removed);

    if steps_a.saturating_add(1) < steps_b {
        return DatasetComparison::ABetter;
    }
    if steps_b.saturating_add(1) < steps_a {
        return DatasetComparison::BBetter;
    }

    if steps_a < steps_b {
        return match b.receiver.cmp(&b.sender) {
            Ordering::Less => DatasetComparison::ABetter,
            Ordering::Greater => DatasetComparison::ABetterTopo,
            Ordering::Equal => DatasetComparison::Equal,
        };
    }
    if steps_b < steps_a {
        return match a.receiver.cmp(&a.sender) {
            Ordering::Less => DatasetComparison::BBetter,
            Ordering::Greater => DatasetComparison::BBetterTopo,
            Ordering::Equal => DatasetComparison::Equal,
        };
    }

    // steps_a == steps_b: compare by sender, then break remaining ties by
    // the receiving port number (bmc.c's final "error-2" fallback).
    match a.sender.cmp(&b.sender) {
        Ordering::Less => DatasetComparison::ABetterTopo,
        Ordering::Greater => DatasetComparison::BBetterTopo,
        Ordering::Equal => match a.receiver.port_number.cmp(&b.receiver.port_number) {
            Ordering::Less => DatasetComparison::ABetterTopo,
            Ordering::Greater => DatasetComparison::BBetterTopo,
            Ordering::Equal => DatasetComparison::Equal,
        },
    }
}

/// The lexicographic quality ordering shared by `dscmp` and the telecom
/// variant: `priority1 -> clockClass -> clockAccuracy ->
/// offsetScaledLogVariance -> priority2`.
fn cmp_quality(a: &Dataset, b: &Dataset) -> Ordering {
    a.priority_1
        .cmp(&b.priority_1)
        .then_with(|| a.quality.clock_class.cmp(&b.quality.clock_class))
        .then_with(|| a.quality.clock_accuracy.cmp_numeric(&b.quality.clock_accuracy))
        .then_with(|| {
            a.quality
                .offset_scaled_log_variance
                .cmp(&b.quality.offset_scaled_log_variance)
        })
        .then_with(|| a.priority_2.cmp(&b.priority_2))
}

fn ordering_to_comparison(order: Ordering) -> DatasetComparison {
    match order {
        Ordering::Less => DatasetComparison::ABetter,
        Ordering::Greater => DatasetComparison::BBetter,
        Ordering::Equal => DatasetComparison::Equal,
    }
}

/// `dscmp` — the top-level comparator. A missing (`None`) dataset always
/// loses to a present one; two missing datasets compare equal.
pub fn cmp(a: Option<&Dataset>, b: Option<&Dataset>) -> DatasetComparison {
    match (a, b) {
        (None, None) => DatasetComparison::Equal,
        (Some(_), None) => DatasetComparison::ABetter,
        (None, Some(_)) => DatasetComparison::BBetter,
        (Some(a), Some(b)) => {
            if a.identity == b.identity {
                return dscmp2(a, b);
            }
            let order = cmp_quality(a, b).then_with(|| a.identity.cmp(&b.identity));
            ordering_to_comparison(order)
        }
    }
}

/// Telecom-profile comparator: identical to [`cmp`] except for inserting
/// `local_priority` between `priority2` and the final identity tiebreak,
/// per `spec.md` §9's "function-pointer comparator" design note.
pub fn cmp_telecom(a: Option<&Dataset>, b: Option<&Dataset>) -> DatasetComparison {
    match (a, b) {
        (None, None) => DatasetComparison::Equal,
        (Some(_), None) => DatasetComparison::ABetter,
        (None, Some(_)) => DatasetComparison::BBetter,
        (Some(a), Some(b)) => {
            if a.identity == b.identity {
                return dscmp2(a, b);
            }
            let order = cmp_quality(a, b)
                .then_with(|| a.local_priority.cmp(&b.local_priority))
                .then_with(|| a.identity.cmp(&b.identity));
            ordering_to_comparison(order)
        }
    }
}

/// A strategy value selecting which comparator a clock runs, per `spec.md`
/// §9's "function-pointer comparator" note (`compare` passed into the state
/// decision as a callable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparatorProfile {
    #[default]
    Standard,
    Telecom,
}

impl ComparatorProfile {
    pub fn compare(self, a: Option<&Dataset>, b: Option<&Dataset>) -> DatasetComparison {
        match self {
            ComparatorProfile::Standard => cmp(a, b),
            ComparatorProfile::Telecom => cmp_telecom(a, b),
        }
    }
}
