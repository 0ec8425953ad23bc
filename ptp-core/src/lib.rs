//! IEEE 1588 best master clock algorithm and transparent clock forwarding
//! core, with IEC 62439-3 (HSR/PRP) redundancy awareness.
//!
//! This crate implements the decision and forwarding logic only: hardware
//! clock access, socket I/O, the servo and configuration parsing are
//! external collaborators (see [`network`]) that a daemon binary wires in.
#![cfg_attr(not(feature = "std"), no_std)]

// `bmc`/`tc`/`port`/`clock` use `Rc`, `Vec` and `VecDeque` for the
// arena-and-index ownership and TC bookkeeping; unlike `datastructures`,
// they are not meant to run without `alloc`.
#[cfg(feature = "std")]
pub mod bmc;
#[cfg(feature = "std")]
pub mod clock;
pub mod config;
pub mod datastructures;
pub mod error;
#[cfg(feature = "std")]
pub mod network;
#[cfg(feature = "std")]
pub mod observability;
#[cfg(feature = "std")]
pub mod port;
#[cfg(feature = "std")]
pub mod tc;
pub mod time;
