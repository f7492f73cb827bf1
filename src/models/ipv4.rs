//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing IPv4 addresses with a prefix length,
//! along with the netmask conversions used when reading device configurations.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Octet values allowed in a dotted-quad netmask.
pub const NETMASK_OCTETS: [u8; 9] = [0, 128, 192, 224, 240, 248, 252, 254, 255];

/// IANA special-purpose blocks treated as private address space.
const PRIVATE_BLOCKS: [(Ipv4Addr, u8); 14] = [
    (Ipv4Addr::new(0, 0, 0, 0), 8),
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(127, 0, 0, 0), 8),
    (Ipv4Addr::new(169, 254, 0, 0), 16),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 0, 0, 0), 29),
    (Ipv4Addr::new(192, 0, 0, 170), 31),
    (Ipv4Addr::new(192, 0, 2, 0), 24),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
    (Ipv4Addr::new(198, 18, 0, 0), 15),
    (Ipv4Addr::new(198, 51, 100, 0), 24),
    (Ipv4Addr::new(203, 0, 113, 0), 24),
    (Ipv4Addr::new(240, 0, 0, 0), 4),
    (Ipv4Addr::new(255, 255, 255, 255), 32),
];

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use config_ipam_report::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Convert a prefix length to its dotted-quad netmask.
pub fn prefix_to_netmask(len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    Ok(Ipv4Addr::from(get_cidr_mask(len)?))
}

/// Convert a dotted-quad netmask to a prefix length.
///
/// Every octet must come from [`NETMASK_OCTETS`] and the one bits must be contiguous,
/// so `255.0.255.0` is rejected.
pub fn netmask_to_prefix(mask: Ipv4Addr) -> Result<u8, Box<dyn Error>> {
    if let Some(octet) = mask.octets().iter().find(|o| !NETMASK_OCTETS.contains(o)) {
        return Err(format!("Invalid netmask octet {octet} in {mask}").into());
    }
    let bits = u32::from(mask);
    let len = bits.leading_ones() as u8;
    if get_cidr_mask(len)? != bits {
        return Err(format!("Netmask {mask} is not contiguous").into());
    }
    Ok(len)
}

/// Parse a mask written either as a prefix length ("24") or a netmask ("255.255.255.0").
pub fn parse_mask(mask: &str) -> Result<u8, Box<dyn Error>> {
    let mask = mask.trim();
    if mask.contains('.') {
        let netmask: Ipv4Addr = mask.parse().map_err(|_| format!("Invalid netmask {mask}"))?;
        netmask_to_prefix(netmask)
    } else {
        let len: u8 = mask
            .parse()
            .map_err(|_| format!("Invalid prefix length {mask:?}"))?;
        if len > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(len)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let bits = u32::from(addr) as u64;
        let new_bits = (bits >> right_len) << right_len;

        Ok(Ipv4Addr::from(new_bits as u32))
    }
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let mask = get_cidr_mask(len)?;
        let addr_bits = u32::from(addr);
        let network_bits = addr_bits & mask;
        let broadcast_bits = network_bits | (!mask);
        Ok(Ipv4Addr::from(broadcast_bits))
    }
}

fn in_block(addr: Ipv4Addr, block: Ipv4Addr, len: u8) -> bool {
    match (cut_addr(addr, len), cut_addr(block, len)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// IPv4 address with CIDR notation support.
///
/// Used both for interface addresses (host bits kept) and networks (host bits zero).
/// Ordering is by address first, then prefix length.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.mask);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl FromStr for Ipv4 {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err("Invalid address/mask".into());
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| format!("Invalid address {}", parts[0]))?;
        let mask: u8 = parts[1].parse()?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Build a network from an address and a mask (prefix length or netmask).
    ///
    /// Strict: an address with host bits set for the mask is an error.
    pub fn network_from_parts(network: &str, mask: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr: Ipv4Addr = network
            .trim()
            .parse()
            .map_err(|_| format!("Invalid address {network:?}"))?;
        let mask = parse_mask(mask)?;
        if cut_addr(addr, mask)? != addr {
            return Err(format!("{addr}/{mask} has host bits set").into());
        }
        Ok(Ipv4 { addr, mask })
    }

    /// The network this address belongs to.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Dotted-quad netmask for the prefix length.
    pub fn netmask(&self) -> Ipv4Addr {
        prefix_to_netmask(self.mask).unwrap_or(Ipv4Addr::BROADCAST)
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.mask).unwrap_or(self.addr)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        cut_addr(self.addr, self.mask).unwrap_or(self.addr)
    }

    /// True if `other` lies entirely within this network.
    pub fn contains(&self, other: &Ipv4) -> bool {
        self.mask <= other.mask && self.lo() <= other.lo() && other.hi() <= self.hi()
    }

    /// `0.0.0.0/0`
    pub fn is_default_route(&self) -> bool {
        self.mask == 0
    }

    pub fn is_private(&self) -> bool {
        let (lo, hi) = (self.lo(), self.hi());
        let private = |a: Ipv4Addr| PRIVATE_BLOCKS.iter().any(|(b, l)| in_block(a, *b, *l));
        private(lo) && private(hi)
    }

    pub fn is_loopback(&self) -> bool {
        self.lo().is_loopback() && self.hi().is_loopback()
    }

    /// Inside 240.0.0.0/4.
    pub fn is_reserved(&self) -> bool {
        let reserved = Ipv4Addr::new(240, 0, 0, 0);
        in_block(self.lo(), reserved, 4) && in_block(self.hi(), reserved, 4)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 8).unwrap(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(cut_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 16).unwrap(),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 0)
        );
    }

    #[test]
    fn test_netmask_prefix_round_trip() {
        for len in 0..=MAX_LENGTH {
            let netmask = prefix_to_netmask(len).unwrap();
            assert!(netmask.octets().iter().all(|o| NETMASK_OCTETS.contains(o)));
            assert_eq!(netmask_to_prefix(netmask).unwrap(), len, "mask {netmask}");
        }
    }

    #[test]
    fn test_netmask_to_prefix_rejects_bad_masks() {
        assert!(netmask_to_prefix(Ipv4Addr::new(255, 255, 255, 1)).is_err());
        assert!(netmask_to_prefix(Ipv4Addr::new(255, 0, 255, 0)).is_err());
        assert!(netmask_to_prefix(Ipv4Addr::new(255, 255, 100, 0)).is_err());
        assert_eq!(
            netmask_to_prefix(Ipv4Addr::new(255, 255, 252, 0)).unwrap(),
            22
        );
    }

    #[test]
    fn test_parse_mask() {
        assert_eq!(parse_mask("24").unwrap(), 24);
        assert_eq!(parse_mask("255.255.255.0").unwrap(), 24);
        assert_eq!(parse_mask(" 0 ").unwrap(), 0);
        assert!(parse_mask("33").is_err());
        assert!(parse_mask("").is_err());
        assert!(parse_mask("x.x.x.x").is_err());
    }

    #[test]
    fn test_network_from_parts() {
        assert_eq!(
            Ipv4::network_from_parts("10.0.0.0", "255.255.255.0").unwrap(),
            Ipv4::new("10.0.0.0/24").unwrap()
        );
        assert_eq!(
            Ipv4::network_from_parts("172.16.0.0", "12").unwrap(),
            Ipv4::new("172.16.0.0/12").unwrap()
        );
        assert!(Ipv4::network_from_parts("10.0.0.1", "24").is_err());
        assert!(Ipv4::network_from_parts("<removed>", "24").is_err());
    }

    #[test]
    fn test_network_and_netmask() {
        let ip = Ipv4::new("192.168.1.1/24").unwrap();
        assert_eq!(ip.network(), Ipv4::new("192.168.1.0/24").unwrap());
        assert_eq!(ip.netmask(), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(ip.to_string(), "192.168.1.1/24");
    }

    #[test]
    fn test_contains() {
        let agg = Ipv4::new("10.0.0.0/8").unwrap();
        let net = Ipv4::new("10.1.2.0/24").unwrap();
        let summary = Ipv4::new("8.0.0.0/6").unwrap();
        assert!(agg.contains(&net));
        assert!(!net.contains(&agg));
        assert!(agg.contains(&agg));
        assert!(!agg.contains(&summary));
        assert!(summary.contains(&agg));
        assert!(!Ipv4::new("11.0.0.0/8").unwrap().contains(&net));
    }

    #[test]
    fn test_address_classes() {
        assert!(Ipv4::new("192.168.1.0/24").unwrap().is_private());
        assert!(!Ipv4::new("100.64.0.0/10").unwrap().is_private());
        assert!(!Ipv4::new("8.8.8.0/24").unwrap().is_private());
        assert!(Ipv4::new("127.0.0.1/32").unwrap().is_loopback());
        assert!(Ipv4::new("240.1.0.0/16").unwrap().is_reserved());
        assert!(!Ipv4::new("10.0.0.0/8").unwrap().is_reserved());
        assert!(Ipv4::new("0.0.0.0/0").unwrap().is_default_route());
    }

    #[test]
    fn test_ip4_cmp() {
        let ip1 = Ipv4::new("10.0.0.1/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.2/24").unwrap();
        let ip3 = Ipv4::new("10.0.0.1/24").unwrap();

        assert!(ip1 < ip2);
        assert!(ip1 == ip3);
        assert!(ip2 > ip1);
        assert!(Ipv4::new("9.255.0.0/16").unwrap() < ip1);
    }

    #[test]
    fn test_serde_cidr() {
        let ip = Ipv4::new("10.9.8.0/23").unwrap();
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, "\"10.9.8.0/23\"");
        let back: Ipv4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ip);
        assert!(serde_json::from_str::<Ipv4>("\"10.0.0.0\"").is_err());
    }
}
