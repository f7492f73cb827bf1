//! Interface address extraction, one grammar per dialect.

use crate::models::{netmask_to_prefix, InterfaceGrammar, Ipv4, Platform, MAX_LENGTH};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::net::Ipv4Addr;

const OCTET: &str = r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
const MASK_OCTET: &str = r"(0|128|192|224|240|248|252|254|255)";

fn dotted(octet: &str) -> String {
    format!(r"{octet}\.{octet}\.{octet}\.{octet}")
}

lazy_static! {
    static ref MASK_LENGTH_RE: Regex =
        Regex::new(&format!(r"ipv4-address {} mask-length (\d+)\b", dotted(OCTET)))
            .expect("Invalid mask-length regex");
    static ref SLASH_PREFIX_RE: Regex =
        Regex::new(&format!(r"inet address {}/(\d+)\b", dotted(OCTET)))
            .expect("Invalid inet address regex");
    static ref DOTTED_NETMASK_RE: Regex = Regex::new(&format!(
        r"ip address {} {}\b",
        dotted(OCTET),
        dotted(MASK_OCTET)
    ))
    .expect("Invalid ip address regex");
}

/// Interface addresses configured in `text`, in configuration order.
///
/// Malformed addresses, prefix lengths over 32 and non-contiguous netmasks are skipped.
pub fn extract_interfaces(text: &str, platform: Platform) -> Vec<Ipv4> {
    let grammar = platform.interface_grammar();
    let re: &Regex = match grammar {
        InterfaceGrammar::MaskLength => &*MASK_LENGTH_RE,
        InterfaceGrammar::SlashPrefix => &*SLASH_PREFIX_RE,
        InterfaceGrammar::DottedNetmask => &*DOTTED_NETMASK_RE,
    };

    re.captures_iter(text)
        .filter_map(|caps| match interface_from_captures(&caps, grammar) {
            Ok(interface) => Some(interface),
            Err(e) => {
                log::warn!("Skipping interface address {:?}: {e}", &caps[0]);
                None
            }
        })
        .collect()
}

fn octet_at(caps: &Captures, i: usize) -> Result<u8, String> {
    caps[i]
        .parse::<u8>()
        .map_err(|_| format!("invalid octet {}", &caps[i]))
}

fn interface_from_captures(caps: &Captures, grammar: InterfaceGrammar) -> Result<Ipv4, String> {
    let addr = Ipv4Addr::new(
        octet_at(caps, 1)?,
        octet_at(caps, 2)?,
        octet_at(caps, 3)?,
        octet_at(caps, 4)?,
    );
    let mask = match grammar {
        InterfaceGrammar::MaskLength | InterfaceGrammar::SlashPrefix => {
            let len: u8 = caps[5]
                .parse()
                .map_err(|_| format!("invalid prefix length {}", &caps[5]))?;
            if len > MAX_LENGTH {
                return Err(format!("prefix length {len} is too long"));
            }
            len
        }
        InterfaceGrammar::DottedNetmask => {
            let netmask = Ipv4Addr::new(
                octet_at(caps, 5)?,
                octet_at(caps, 6)?,
                octet_at(caps, 7)?,
                octet_at(caps, 8)?,
            );
            netmask_to_prefix(netmask).map_err(|e| e.to_string())?
        }
    };
    Ok(Ipv4 { addr, mask })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidrs(text: &str, platform: Platform) -> Vec<String> {
        extract_interfaces(text, platform)
            .iter()
            .map(|i| i.to_string())
            .collect()
    }

    #[test]
    fn test_checkpoint_mask_length() {
        let text = "set interface eth1 ipv4-address 10.10.1.1 mask-length 24\n\
                    set interface eth2 ipv4-address 192.0.2.1 mask-length 30\n";
        assert_eq!(
            cidrs(text, Platform::CheckpointGaia),
            vec!["10.10.1.1/24", "192.0.2.1/30"]
        );
    }

    #[test]
    fn test_junos_slash_prefix() {
        let text = "set interfaces ge-0/0/0 unit 0 family inet address 172.16.0.1/24\n";
        assert_eq!(cidrs(text, Platform::JuniperJunos), vec!["172.16.0.1/24"]);
    }

    #[test]
    fn test_dotted_netmask_platforms() {
        let text = "interface Gi0/1\n ip address 192.168.1.1 255.255.255.0\n ip address 10.0.0.1 255.255.255.252 secondary\n";
        for platform in [Platform::CiscoIos, Platform::HpComware, Platform::Unknown] {
            assert_eq!(cidrs(text, platform), vec!["192.168.1.1/24", "10.0.0.1/30"]);
        }
    }

    #[test]
    fn test_grammar_follows_platform() {
        let text = "ip address 192.168.1.1 255.255.255.0\ninet address 172.16.0.1/24\n";
        assert_eq!(cidrs(text, Platform::JuniperJunos), vec!["172.16.0.1/24"]);
        assert_eq!(cidrs(text, Platform::CheckpointGaia), Vec::<String>::new());
    }

    #[test]
    fn test_rejects_bad_octets() {
        let bad = [
            ("ip address 256.1.1.1 255.255.255.0", Platform::CiscoIos),
            ("ip address x10.1.1.1 255.255.255.0", Platform::CiscoIos),
            ("ip address 10.1.1.1 255.255.255.2550", Platform::CiscoIos),
            ("ip address 10.1.1.1 255.255.100.0", Platform::CiscoIos),
            ("inet address 300.1.1.1/24", Platform::JuniperJunos),
            ("inet address -10.1.1.1/24", Platform::JuniperJunos),
            ("ipv4-address 10.1.1.999 mask-length 24", Platform::CheckpointGaia),
            ("ipv4-address a1.1.1.1 mask-length 24", Platform::CheckpointGaia),
        ];
        for (text, platform) in bad {
            assert!(cidrs(text, platform).is_empty(), "{text} should not match");
        }
    }

    #[test]
    fn test_skips_invalid_masks() {
        let bad = [
            ("ip address 10.1.1.1 255.0.255.0", Platform::CiscoIos),
            ("inet address 10.1.1.1/33", Platform::JuniperJunos),
            ("ipv4-address 10.1.1.1 mask-length 40", Platform::CheckpointGaia),
        ];
        for (text, platform) in bad {
            assert!(cidrs(text, platform).is_empty(), "{text} should be skipped");
        }
    }

    #[test]
    fn test_all_canonical_netmasks() {
        for len in 0..=MAX_LENGTH {
            let netmask = crate::models::prefix_to_netmask(len).unwrap();
            let text = format!("ip address 10.0.0.1 {netmask}\n");
            let found = extract_interfaces(&text, Platform::CiscoIos);
            assert_eq!(found.len(), 1, "netmask {netmask}");
            assert_eq!(found[0].mask, len);
        }
    }
}
