//! Best Master Clock Algorithm: dataset comparison and per-port state
//! selection, including the HSR/PRP redundancy-aware variant.

pub mod comparator;
pub mod dataset;
pub mod foreign_master;
pub mod state_decision;

pub use comparator::{cmp, cmp_telecom, ComparatorProfile, DatasetComparison};
pub use dataset::Dataset;
pub use foreign_master::ForeignMasterSet;
pub use state_decision::{bmc_state_decision, hsr_state_decision, HsrVariant, PairDecision};
