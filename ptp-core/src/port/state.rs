/// A port's PTP state, a closed 11-variant set. `PASSIVE_SLAVE`
/// is HSR/PRP-specific: the standby half of a redundant slave pair.
///
/// Kept as a flat sum type rather than carrying servo/filter state the way
/// `statime`'s generic `PortState<F>` does — the servo itself is out of
/// scope here, so there is nothing for a `Slave` variant to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortState {
    #[default]
    Initializing,
    Faulty,
    Disabled,
    Listening,
    PreMaster,
    Master,
    Passive,
    Uncalibrated,
    Slave,
    GrandMaster,
    PassiveSlave,
}

impl PortState {
    pub fn is_forwarding(self) -> bool {
        matches!(
            self,
            PortState::Master
                | PortState::GrandMaster
                | PortState::Slave
                | PortState::Uncalibrated
                | PortState::PreMaster
        )
    }
}
