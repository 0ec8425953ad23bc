use crate::datastructures::common::ClockIdentity;

/// The subset of `defaultDS` that is configured rather than computed, per
/// linuxptp's `struct defaultDS` (`ds.h`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceConfig {
    pub clock_identity: ClockIdentity,
    pub priority_1: u8,
    pub priority_2: u8,
    pub domain_number: u8,
    pub slave_only: bool,
    pub sdo_id: u8,
}
