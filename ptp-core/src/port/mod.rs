//! Per-port runtime state: BMCA inputs, TC bookkeeping, redundancy pairing.
//! Grounded on linuxptp's `struct port` (`port_private.h`).

pub mod onestep;
pub mod state;

use onestep::OnestepInfo;
pub use state::PortState;

use crate::bmc::ForeignMasterSet;
use crate::config::PortConfig;
use crate::time::Duration;

/// Everything a port carries beyond its static [`PortConfig`]: BMCA
/// tracking state, the one-step/two-step fusion slot, and the correction
/// offsets `tc.c` folds into every forwarded event message.
#[derive(Debug, Clone)]
pub struct Port {
    pub config: PortConfig,
    pub state: PortState,
    pub foreign_masters: ForeignMasterSet,
    pub onestep_info: OnestepInfo,

    /// Bumped on transport failure; a non-zero value is purely observable,
    /// never consulted by the core's own decisions.
    pub error_counter: u32,
    /// Asymmetry correction (signed); folded into Sync/FollowUp residence
    /// the same way `peer_delay` is (`port_private.h`).
    pub asymmetry: Duration,
    pub peer_delay: Duration,
    pub tx_timestamp_offset: Duration,
    pub rx_timestamp_offset: Duration,
}

impl Port {
    pub fn new(config: PortConfig) -> Self {
        Port {
            config,
            state: PortState::Initializing,
            foreign_masters: ForeignMasterSet::new(),
            onestep_info: OnestepInfo::default(),
            error_counter: 0,
            asymmetry: Duration::ZERO,
            peer_delay: Duration::ZERO,
            tx_timestamp_offset: Duration::ZERO,
            rx_timestamp_offset: Duration::ZERO,
        }
    }

    pub fn port_number(&self) -> u16 {
        self.config.port_number
    }

    pub fn record_transport_fault(&mut self) {
        self.error_counter = self.error_counter.saturating_add(1);
    }
}
