//! `tracing`-backed span/event helpers for port state transitions and
//! forwarding faults.
//!
//! linuxptp reports both through ad-hoc `pr_notice`/`pr_err` call sites
//! scattered across `bmc.c`/`tc.c` (the `pr_err("CASAN ...")` lines visible
//! in the state decision routines are exactly this). This module gives those
//! call sites a single, structured home so a daemon's `tracing-subscriber`
//! layer sees consistent fields (`port`, `from`, `to`, `error`) rather than
//! free-form strings, without adding any decision-making of its own — it is
//! purely an observation seam.

use crate::config::PortIndex;
use crate::error::CoreError;
use crate::port::PortState;

/// Emits a `tracing::info!` event for a port's state transition, skipping
/// the no-op case. Call at the single point `Clock::run_bmca` assigns
/// `Port::state` (see `clock::Clock::assign_ordinary_state` and the HSR pair
/// branch) so every transition — ordinary or redundant — is observed
/// uniformly.
pub fn port_state_transition(port: PortIndex, from: PortState, to: PortState) {
    if from == to {
        return;
    }
    tracing::info!(port = port.0, from = ?from, to = ?to, "port state transition");
}

/// Emits a `tracing::warn!` event for a fault the forwarder or correlator
/// recorded against a port — the per-egress "best effort" faults:
/// `Transport`, `AllocFailure`. `BmcaUnreachable` is logged at `error`
/// level since it should not occur under conforming inputs.
pub fn port_fault(port: PortIndex, error: CoreError) {
    match error {
        CoreError::BmcaUnreachable => {
            tracing::error!(port = port.0, error = ?error, "BMCA state decision fell through all cases");
        }
        CoreError::Transport | CoreError::AllocFailure => {
            tracing::warn!(port = port.0, error = ?error, "transparent clock forwarding fault");
        }
    }
}

/// Emits a `tracing::trace!` event for a condition that is explicitly not
/// an error (`MatchMiss`, `StalePending`, `DomainMismatch`): visible to
/// anyone watching at trace level, never surfaced as a `Result`.
pub fn non_error_condition(port: PortIndex, what: &str) {
    tracing::trace!(port = port.0, condition = what, "non-error condition");
}

/// One call per BMCA run, bracketing every per-port decision it makes in a
/// single span so a `tracing-subscriber` layer can group them — mirroring
/// the way `bmc.c`'s `pr_err` calls are all reachable from one
/// `bmc_state_decision`/`hsr_state_decision` invocation per port per tick.
pub fn bmca_run_span() -> tracing::Span {
    tracing::debug_span!("bmca_run")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_state_transition_is_a_no_op() {
        // Exercised for its absence of panics; tracing events themselves are
        // not asserted on without a subscriber installed.
        port_state_transition(PortIndex(0), PortState::Slave, PortState::Slave);
        port_state_transition(PortIndex(0), PortState::Slave, PortState::Master);
    }

    #[test]
    fn fault_and_non_error_paths_do_not_panic() {
        port_fault(PortIndex(1), CoreError::Transport);
        port_fault(PortIndex(1), CoreError::AllocFailure);
        port_fault(PortIndex(1), CoreError::BmcaUnreachable);
        non_error_condition(PortIndex(1), "match_miss");
        let _span = bmca_run_span();
    }
}
