//! Captures and the devices detected in them.

use super::{Ipv4, Platform, Record};
use crate::processing::{materialize_routes, RouteFailure};
use serde::{Deserialize, Serialize};

/// One raw text blob read from a capture source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// File name, or `<archive>/<entry>` for archive members.
    pub source_id: String,
    /// Site derived from the source file name, if any.
    pub site: Option<String>,
    pub text: String,
}

impl Capture {
    pub fn new(source_id: &str, site: Option<&str>, text: &str) -> Capture {
        Capture {
            source_id: source_id.to_string(),
            site: site.map(|s| s.to_string()),
            text: text.to_string(),
        }
    }
}

/// A template parse that failed for one command of one device.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub device: String,
    pub command: String,
    pub source_id: String,
    pub reason: String,
}

/// Facts extracted from one capture.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Device {
    pub name: String,
    pub platform: Platform,
    /// Empty when no site could be derived.
    pub site: String,
    pub source_id: String,
    pub missing_hostname: bool,
    pub missing_networks: bool,
    pub dhcp_server: bool,
    pub nat: bool,
    /// Interface addresses in configuration order.
    pub interfaces: Vec<Ipv4>,
    pub routes: Vec<Record>,
    pub arp: Vec<Record>,
    pub macs: Vec<Record>,
    pub parse_failures: Vec<ParseFailure>,
}

impl Device {
    /// Interface addresses ordered by address value.
    pub fn sorted_interfaces(&self) -> Vec<Ipv4> {
        let mut interfaces = self.interfaces.clone();
        interfaces.sort();
        interfaces
    }

    /// Networks from the routing table, sorted, plus the records that do not form a network.
    pub fn route_networks(&self) -> (Vec<Ipv4>, Vec<RouteFailure>) {
        materialize_routes(&self.routes)
    }
}
