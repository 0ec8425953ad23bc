use super::comparator::{ComparatorProfile, DatasetComparison};
use super::dataset::Dataset;
use crate::config::{BmcaMode, ClockType};
use crate::port::state::PortState;

/// Which of the two `hsr_state_decision` routines found in the duplicated
/// `bmc.c` sources to run (`spec.md` §9, open question 1). `NonTc` is the
/// documented/default variant; `Clock::run_bmca` selects `TcCollapsed` when
/// the clock's `ClockType` is transparent, matching the C source's own
/// `clock_type(c) == CLOCK_TYPE_E2E || CLOCK_TYPE_P2P` guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsrVariant {
    NonTc,
    TcCollapsed,
}

/// `bmc_state_decision` — the non-redundant per-port state table,
/// `spec.md` §4.2. Labels in comments (M1/P1/M2/S1/P2/M3) match `bmc.c`'s
/// own comments at each branch.
#[allow(clippy::too_many_arguments)]
pub fn bmc_state_decision(
    profile: ComparatorProfile,
    clock_class: u8,
    default_ds: &Dataset,
    best: Option<&Dataset>,
    port_best: Option<&Dataset>,
    is_clock_best_port: bool,
    bmca_mode: BmcaMode,
    current_state: PortState,
) -> PortState {
    if port_best.is_none() {
        if bmca_mode == BmcaMode::Noop {
            return current_state;
        }
        if current_state == PortState::Listening {
            return current_state;
        }
    }

    if clock_class <= 127 {
        if profile
            .compare(Some(default_ds), port_best)
            .a_strictly_better()
        {
            return PortState::GrandMaster; // M1
        }
        return PortState::Passive; // P1
    }

    if profile.compare(Some(default_ds), best).a_strictly_better() {
        return PortState::GrandMaster; // M2
    }

    if is_clock_best_port {
        return PortState::Slave; // S1
    }

    if profile.compare(best, port_best) == DatasetComparison::ABetterTopo {
        return PortState::Passive; // P2
    }

    PortState::Master // M3
}

/// The joint outcome of [`hsr_state_decision`] for a paired port r and its
/// twin q. The routine is symmetric in r/q, so it is run once per pair
/// rather than once per port (see `Clock::run_bmca`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairDecision {
    pub r_state: PortState,
    pub q_state: PortState,
}

/// One side of the "SLAVE pair election" rule (`spec.md` §4.2 rule 1),
/// applied once per side with its arguments swapped for the other.
fn slave_pair_state(is_active_side: bool, other_current: PortState, self_current: PortState) -> PortState {
    if is_active_side {
        if other_current == PortState::Uncalibrated {
            PortState::PassiveSlave
        } else {
            PortState::Slave
        }
    } else if other_current == PortState::PassiveSlave && self_current != PortState::Master {
        PortState::Slave
    } else {
        PortState::PassiveSlave
    }
}

/// `hsr_state_decision` — the redundant (HSR/PRP paired-port) state
/// decision, `spec.md` §4.2. Applies when the clock is HSR or PRP and port
/// r has a configured paired port q.
#[allow(clippy::too_many_arguments)]
pub fn hsr_state_decision(
    variant: HsrVariant,
    profile: ComparatorProfile,
    clock_type: ClockType,
    dr: Option<&Dataset>,
    dq: Option<&Dataset>,
    dbest: Option<&Dataset>,
    r_current: PortState,
    q_current: PortState,
) -> PairDecision {
    // Rule 1: SLAVE pair election.
    let r_sees_gm = profile.compare(dr, dbest) == DatasetComparison::Equal;
    let q_sees_gm = profile.compare(dq, dbest) == DatasetComparison::Equal;
    if r_sees_gm || q_sees_gm {
        let cmp_rq = profile.compare(dr, dq);
        let r_state = slave_pair_state(cmp_rq.a_strictly_better(), q_current, r_current);
        let q_state = slave_pair_state(cmp_rq.mirror().a_strictly_better(), r_current, q_current);
        return PairDecision { r_state, q_state };
    }

    // Rule 2 (NonTc only): both empty.
    if variant == HsrVariant::NonTc && dr.is_none() && dq.is_none() {
        return PairDecision {
            r_state: PortState::Master,
            q_state: PortState::Master,
        };
    }

    // Rule 3: master-side.
    let res1 = profile.compare(dbest, dr);
    let res2 = profile.compare(dbest, dq);
    if res1.a_strictly_better() && res2.a_strictly_better() {
        let both_strict = res1 == DatasetComparison::ABetter && res2 == DatasetComparison::ABetter;
        let collapse_to_master = match variant {
            HsrVariant::TcCollapsed => true,
            HsrVariant::NonTc => both_strict,
        };
        if collapse_to_master {
            return PairDecision {
                r_state: PortState::Master,
                q_state: PortState::Master,
            };
        }
        if variant == HsrVariant::NonTc && !clock_type.is_transparent() {
            return PairDecision {
                r_state: PortState::Passive,
                q_state: PortState::Passive,
            };
        }
        return PairDecision {
            r_state: PortState::Faulty,
            q_state: PortState::Faulty,
        };
    }

    // Rule 4 (NonTc only): residual TC-style standby.
    if variant == HsrVariant::NonTc
        && !clock_type.is_transparent()
        && profile.compare(dr, dq) != DatasetComparison::Equal
    {
        return PairDecision {
            r_state: PortState::Passive,
            q_state: PortState::Passive,
        };
    }

    // Rule 5: unreachable by spec.
    PairDecision {
        r_state: PortState::Faulty,
        q_state: PortState::Faulty,
    }
}
