//! Error and fault types.
//!
//! linuxptp's `tc.c` reports faults by bumping `p->errorCounter` and raising
//! `EV_FAULT_DETECTED` on the affected port; there is no return-value error
//! path for most forwarding failures, since a single failed egress must never
//! stop the others. We keep that best-effort-per-egress policy (see
//! [`crate::clock::Clock::dispatch_ingress`]) but give the handful of truly
//! exceptional conditions a typed `Result` home instead of a bumped counter.

/// Conditions that abort the operation in progress, as opposed to the
/// per-egress faults which are recorded and skipped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum CoreError {
    /// A transport-level send failed outright (the egress-loop case where
    /// linuxptp does `p->errorCounter++` is represented separately, see
    /// [`crate::port::Port::record_transport_fault`]).
    #[cfg_attr(feature = "std", error("transport send failed"))]
    Transport,
    /// BMCA was run on a port with no reachable foreign master and no
    /// fallback recommendation could be produced.
    #[cfg_attr(feature = "std", error("no reachable grandmaster candidate"))]
    BmcaUnreachable,
    /// The transmit-descriptor pool is exhausted; equivalent to linuxptp's
    /// `tc_allocate` returning `NULL`.
    #[cfg_attr(feature = "std", error("transmit descriptor pool exhausted"))]
    AllocFailure,
}

pub type Result<T> = core::result::Result<T, CoreError>;
