//! TOML configuration, mirroring `ds.h`'s `defaultDS`/`portDS`/
//! `iec62439_portDS` fields that [`ptp_core::config`] actually consumes.
//! Socket addresses, VLAN tagging, PHC selection and servo tuning are out
//! of scope and have no place here.

use std::path::Path;

use ptp_core::bmc::ComparatorProfile;
use ptp_core::config::{
    BmcaMode, ClockType, DelayMechanism, InstanceConfig, PortAttachment, PortConfig, PortIndex,
    RedundancyAttachment, RedundancyProfile, TimestampingMode,
};
use ptp_core::datastructures::common::{ClockAccuracy, ClockIdentity, ClockQuality};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_clock_identity")]
    pub clock_identity: ClockIdentity,
    #[serde(default = "default_priority")]
    pub priority_1: u8,
    #[serde(default = "default_priority")]
    pub priority_2: u8,
    #[serde(default)]
    pub domain_number: u8,
    #[serde(default)]
    pub slave_only: bool,
    #[serde(default)]
    pub sdo_id: u8,
    #[serde(default)]
    pub clock_class: u8,
    #[serde(default)]
    pub clock_accuracy: ClockAccuracyConfig,
    #[serde(default)]
    pub offset_scaled_log_variance: u16,
    #[serde(default)]
    pub clock_type: ClockTypeConfig,
    #[serde(default)]
    pub redundancy: RedundancyProfileConfig,
    #[serde(default)]
    pub comparator: ComparatorConfig,
    #[serde(rename = "port")]
    pub ports: Vec<PortEntry>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PortEntry {
    pub port_number: u16,
    #[serde(default)]
    pub delay_mechanism: DelayMechanismConfig,
    #[serde(default)]
    pub bmca_mode: BmcaModeConfig,
    #[serde(default)]
    pub timestamping: TimestampingModeConfig,
    #[serde(default)]
    pub transport_specific: u8,
    #[serde(default = "default_true")]
    pub match_transport_specific: bool,
    #[serde(default)]
    pub tc_spanning_tree: bool,
    #[serde(default)]
    pub local_priority: u8,
    #[serde(default)]
    pub attachment: PortAttachmentConfig,
    /// Index, into the `port` array above, of this port's redundant twin.
    /// Required whenever `attachment` is a ring/LAN side, unused otherwise.
    #[serde(default)]
    pub paired_port: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DelayMechanismConfig {
    #[default]
    E2e,
    P2p,
    Disabled,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BmcaModeConfig {
    #[default]
    Full,
    Noop,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampingModeConfig {
    #[default]
    TwoStep,
    OneStep,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PortAttachmentConfig {
    #[default]
    None,
    RingPortA,
    RingPortB,
    LanA,
    LanB,
    Interlink,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ClockTypeConfig {
    #[default]
    OrdinaryOrBoundary,
    E2eTransparent,
    P2pTransparent,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RedundancyProfileConfig {
    #[default]
    None,
    Hsr,
    Prp,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ComparatorConfig {
    #[default]
    Standard,
    Telecom,
}

/// `ClockAccuracy` isn't a plain integer on the wire to a human reading a
/// config file; named Table 6 values read better than raw hex, with an
/// escape hatch for anything this doesn't name.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ClockAccuracyConfig {
    Ns100,
    Ns250,
    Us1,
    Us25,
    Unknown,
    Raw(u8),
}

impl Default for ClockAccuracyConfig {
    fn default() -> Self {
        ClockAccuracyConfig::Unknown
    }
}

impl From<ClockAccuracyConfig> for ClockAccuracy {
    fn from(value: ClockAccuracyConfig) -> Self {
        match value {
            ClockAccuracyConfig::Ns100 => ClockAccuracy::NS100,
            ClockAccuracyConfig::Ns250 => ClockAccuracy::NS250,
            ClockAccuracyConfig::Us1 => ClockAccuracy::US1,
            ClockAccuracyConfig::Us25 => ClockAccuracy::US25,
            ClockAccuracyConfig::Unknown => ClockAccuracy::UNKNOWN,
            ClockAccuracyConfig::Raw(value) => ClockAccuracy::from_primitive(value),
        }
    }
}

fn deserialize_clock_identity<'de, D>(deserializer: D) -> Result<ClockIdentity, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw: String = Deserialize::deserialize(deserializer)?;
    let bytes = hex::decode(&raw).map_err(|e| D::Error::custom(format!("invalid clock identity: {e}")))?;
    let array: [u8; 8] = bytes
        .try_into()
        .map_err(|_| D::Error::custom("clock identity must be exactly 8 bytes of hex"))?;
    Ok(ClockIdentity(array))
}

fn default_priority() -> u8 {
    128
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let meta = std::fs::metadata(path).map_err(ConfigError::Io)?;
        if meta.permissions().mode_allows_other_write() {
            log::warn!("unrestricted config file permissions: others can write {path:?}");
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Config = toml::de::from_str(&contents).map_err(ConfigError::Toml)?;
        config.warn_when_unreasonable();
        Ok(config)
    }

    pub fn warn_when_unreasonable(&self) {
        if self.ports.is_empty() {
            log::warn!("no ports configured");
        }
        for port in &self.ports {
            if port.attachment != PortAttachmentConfig::None && port.paired_port.is_none() {
                log::warn!(
                    "port {} has a redundancy attachment but no paired-port index",
                    port.port_number
                );
            }
        }
    }

    /// Builds the core's [`InstanceConfig`], clock quality, clock type,
    /// redundancy profile, comparator profile and per-port [`PortConfig`]s
    /// out of the parsed TOML, ready to hand to `ptp_core::clock::Clock::new`.
    pub fn build(&self) -> (InstanceConfig, ClockQuality, ClockType, RedundancyProfile, ComparatorProfile, Vec<PortConfig>) {
        let instance = InstanceConfig {
            clock_identity: self.clock_identity,
            priority_1: self.priority_1,
            priority_2: self.priority_2,
            domain_number: self.domain_number,
            slave_only: self.slave_only,
            sdo_id: self.sdo_id,
        };

        let quality = ClockQuality {
            clock_class: self.clock_class,
            clock_accuracy: self.clock_accuracy.into(),
            offset_scaled_log_variance: self.offset_scaled_log_variance,
        };

        let clock_type = match self.clock_type {
            ClockTypeConfig::OrdinaryOrBoundary => ClockType::OrdinaryOrBoundary,
            ClockTypeConfig::E2eTransparent => ClockType::E2eTransparent,
            ClockTypeConfig::P2pTransparent => ClockType::P2pTransparent,
        };

        let redundancy = match self.redundancy {
            RedundancyProfileConfig::None => RedundancyProfile::None,
            RedundancyProfileConfig::Hsr => RedundancyProfile::Hsr,
            RedundancyProfileConfig::Prp => RedundancyProfile::Prp,
        };

        let comparator = match self.comparator {
            ComparatorConfig::Standard => ComparatorProfile::Standard,
            ComparatorConfig::Telecom => ComparatorProfile::Telecom,
        };

        let ports = self.ports.iter().map(PortEntry::build).collect();

        (instance, quality, clock_type, redundancy, comparator, ports)
    }
}

impl PortEntry {
    fn build(&self) -> PortConfig {
        let attachment = match self.attachment {
            PortAttachmentConfig::None => PortAttachment::None,
            PortAttachmentConfig::RingPortA => PortAttachment::RingPortA,
            PortAttachmentConfig::RingPortB => PortAttachment::RingPortB,
            PortAttachmentConfig::LanA => PortAttachment::LanA,
            PortAttachmentConfig::LanB => PortAttachment::LanB,
            PortAttachmentConfig::Interlink => PortAttachment::Interlink,
        };

        PortConfig {
            port_number: self.port_number,
            delay_mechanism: match self.delay_mechanism {
                DelayMechanismConfig::E2e => DelayMechanism::E2e,
                DelayMechanismConfig::P2p => DelayMechanism::P2p,
                DelayMechanismConfig::Disabled => DelayMechanism::Disabled,
            },
            bmca_mode: match self.bmca_mode {
                BmcaModeConfig::Full => BmcaMode::Full,
                BmcaModeConfig::Noop => BmcaMode::Noop,
            },
            timestamping: match self.timestamping {
                TimestampingModeConfig::TwoStep => TimestampingMode::TwoStep,
                TimestampingModeConfig::OneStep => TimestampingMode::OneStep,
            },
            transport_specific: self.transport_specific,
            match_transport_specific: self.match_transport_specific,
            tc_spanning_tree: self.tc_spanning_tree,
            local_priority: self.local_priority,
            redundancy: RedundancyAttachment {
                attachment,
                paired_port: self.paired_port.map(PortIndex),
            },
        }
    }
}

trait PermissionsExt {
    fn mode_allows_other_write(&self) -> bool;
}

impl PermissionsExt for std::fs::Permissions {
    #[cfg(unix)]
    fn mode_allows_other_write(&self) -> bool {
        use std::os::unix::fs::PermissionsExt;
        self.mode() & 0o002 != 0
    }

    #[cfg(not(unix))]
    fn mode_allows_other_write(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "io error while reading config: {e}"),
            ConfigError::Toml(e) => write!(f, "config toml parsing error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_defaults() {
        const MINIMAL: &str = r#"
clock-identity = "0011223344556677"

[[port]]
port-number = 1
"#;
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.priority_1, 128);
        assert_eq!(config.priority_2, 128);
        assert_eq!(config.domain_number, 0);
        assert_eq!(config.ports.len(), 1);
        assert_eq!(config.ports[0].match_transport_specific, true);

        let (instance, _, clock_type, redundancy, comparator, ports) = config.build();
        assert_eq!(instance.clock_identity, ClockIdentity([0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77]));
        assert_eq!(clock_type, ClockType::OrdinaryOrBoundary);
        assert_eq!(redundancy, RedundancyProfile::None);
        assert_eq!(comparator, ComparatorProfile::Standard);
        assert_eq!(ports[0].port_number, 1);
    }

    #[test]
    fn hsr_ring_pair_config() {
        const HSR: &str = r#"
clock-identity = "aabbccddeeff0011"
redundancy = "hsr"

[[port]]
port-number = 1
attachment = "ring-port-a"
paired-port = 1

[[port]]
port-number = 2
attachment = "ring-port-b"
paired-port = 0
"#;
        let config: Config = toml::from_str(HSR).unwrap();
        let (_, _, _, redundancy, _, ports) = config.build();
        assert_eq!(redundancy, RedundancyProfile::Hsr);
        assert_eq!(ports[0].redundancy.attachment, PortAttachment::RingPortA);
        assert_eq!(ports[0].redundancy.paired_port, Some(PortIndex(1)));
        assert_eq!(ports[1].redundancy.paired_port, Some(PortIndex(0)));
    }

    #[test]
    fn unreasonable_attachment_without_pair_warns_but_still_builds() {
        const UNPAIRED: &str = r#"
clock-identity = "0011223344556677"

[[port]]
port-number = 1
attachment = "ring-port-a"
"#;
        let config: Config = toml::from_str(UNPAIRED).unwrap();
        config.warn_when_unreasonable();
        let (_, _, _, _, _, ports) = config.build();
        assert_eq!(ports[0].redundancy.paired_port, None);
    }
}
