//! Presence checks for DHCP server and NAT configuration.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DHCP_SERVER_RE: Regex =
        Regex::new(r"(?i)dhcp pool|dhcp server ip-pool").expect("Invalid DHCP regex");
    static ref NAT_RE: Regex = Regex::new(
        r"nat static|nat outbound|ip nat inside|ip nat outside|set nat-pool|set source pool|set destination pool|set static rule-set"
    )
    .expect("Invalid NAT regex");
}

/// True if the capture defines a DHCP pool (`ip dhcp pool`, `dhcp server ip-pool`).
pub fn has_dhcp_server(text: &str) -> bool {
    DHCP_SERVER_RE.is_match(text)
}

/// True if the capture has static, outbound, inside/outside or pool based NAT.
pub fn has_nat(text: &str) -> bool {
    NAT_RE.is_match(text)
}
