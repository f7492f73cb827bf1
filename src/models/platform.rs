//! Vendor configuration dialects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vendor platform that produced a capture.
///
/// The string forms match the platform identifiers the template grammars are keyed by.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    CheckpointGaia,
    JuniperJunos,
    HpComware,
    CiscoIos,
    #[default]
    Unknown,
}

/// How a dialect writes interface addresses in its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceGrammar {
    /// `ipv4-address A.B.C.D mask-length N`
    MaskLength,
    /// `inet address A.B.C.D/N`
    SlashPrefix,
    /// `ip address A.B.C.D M.M.M.M`
    DottedNetmask,
}

/// Keys a dialect's routing-table template uses for the canonical route fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteFieldNames {
    pub protocol: &'static str,
    pub network: &'static str,
    pub mask: &'static str,
    pub nexthop_ip: &'static str,
}

impl Platform {
    /// Detection priority, highest first.
    pub const DETECTION_ORDER: [Platform; 4] = [
        Platform::CheckpointGaia,
        Platform::JuniperJunos,
        Platform::HpComware,
        Platform::CiscoIos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::CheckpointGaia => "checkpoint_gaia",
            Platform::JuniperJunos => "juniper_junos",
            Platform::HpComware => "hp_comware",
            Platform::CiscoIos => "cisco_ios",
            Platform::Unknown => "unknown",
        }
    }

    /// Regex for the hostname directive of this dialect, capture group 1 is the name.
    pub fn hostname_directive(&self) -> Option<&'static str> {
        match self {
            Platform::CheckpointGaia => Some(r"set hostname ([\w-]+)"),
            Platform::JuniperJunos => Some(r"system host-name ([\w-]+)"),
            Platform::HpComware => Some(r"sysname ([\w-]+)"),
            Platform::CiscoIos => Some(r"hostname ([\w-]+)"),
            Platform::Unknown => None,
        }
    }

    pub fn interface_grammar(&self) -> InterfaceGrammar {
        match self {
            Platform::CheckpointGaia => InterfaceGrammar::MaskLength,
            Platform::JuniperJunos => InterfaceGrammar::SlashPrefix,
            Platform::HpComware | Platform::CiscoIos | Platform::Unknown => {
                InterfaceGrammar::DottedNetmask
            }
        }
    }

    /// `None` for dialects whose routing tables are not normalized.
    pub fn route_field_names(&self) -> Option<RouteFieldNames> {
        match self {
            Platform::CiscoIos => Some(RouteFieldNames {
                protocol: "protocol",
                network: "network",
                mask: "mask",
                nexthop_ip: "nexthop_ip",
            }),
            // "protocal" is how the comware template spells it
            Platform::HpComware => Some(RouteFieldNames {
                protocol: "protocal",
                network: "network",
                mask: "mask",
                nexthop_ip: "nexthop_ip",
            }),
            Platform::CheckpointGaia => Some(RouteFieldNames {
                protocol: "protocol",
                network: "network",
                mask: "mask",
                nexthop_ip: "nexthopip",
            }),
            Platform::JuniperJunos | Platform::Unknown => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_names() {
        assert_eq!(Platform::CheckpointGaia.to_string(), "checkpoint_gaia");
        assert_eq!(Platform::Unknown.to_string(), "unknown");
        assert_eq!(
            serde_json::to_string(&Platform::HpComware).unwrap(),
            "\"hp_comware\""
        );
    }

    #[test]
    fn test_interface_grammar_dispatch() {
        assert_eq!(
            Platform::CheckpointGaia.interface_grammar(),
            InterfaceGrammar::MaskLength
        );
        assert_eq!(
            Platform::JuniperJunos.interface_grammar(),
            InterfaceGrammar::SlashPrefix
        );
        assert_eq!(
            Platform::Unknown.interface_grammar(),
            InterfaceGrammar::DottedNetmask
        );
    }

    #[test]
    fn test_route_field_names() {
        assert_eq!(
            Platform::CheckpointGaia.route_field_names().unwrap().nexthop_ip,
            "nexthopip"
        );
        assert_eq!(
            Platform::HpComware.route_field_names().unwrap().protocol,
            "protocal"
        );
        assert!(Platform::JuniperJunos.route_field_names().is_none());
    }
}
