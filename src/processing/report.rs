//! Report rows aggregated across all devices.

use super::overlap::AggregateTable;
use super::routes::normalize_route;
use crate::capture::CaptureFailure;
use crate::models::{record_str, Device, Ipv4, Record};
use crate::processing::Inventory;
use serde::Serialize;
use serde_json::Value;
use std::net::Ipv4Addr;

/// `device_details`: one row per device with a hostname and interface addressing.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DeviceRow {
    pub device: String,
    pub platform: String,
    pub routing_table: bool,
    pub arp_table: bool,
    pub mac_table: bool,
    pub dhcp_server: bool,
    pub nat: bool,
    pub site: String,
    pub file: String,
}

/// `networks_from_int`: one row per interface address.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InterfaceNetworkRow {
    #[serde(rename = "Header-Network")]
    pub header: String,
    pub address: String,
    pub netmask: String,
    pub description: String,
    pub device: String,
    pub interface_ip: String,
    pub platform: String,
    pub site: String,
    pub public_overlap: String,
    pub public_overlap_cidr: String,
    pub is_private: bool,
    pub is_loopback: bool,
    pub is_reserved: bool,
    pub file: String,
}

/// `networks_combined`: interface networks and routing table networks.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkRow {
    #[serde(rename = "Header-Network")]
    pub header: String,
    pub address: String,
    pub netmask: String,
    pub description: String,
    pub device: String,
    pub source: String,
    pub platform: String,
    pub site: String,
    pub public_overlap: String,
    pub public_overlap_cidr: String,
    pub is_private: bool,
    pub is_loopback: bool,
    pub is_reserved: bool,
    pub file: String,
}

/// `route_details`: routing table entries in the canonical field layout.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteDetailRow {
    pub protocol: Option<String>,
    pub network: Option<String>,
    pub mask: Option<String>,
    pub nexthop_ip: Option<String>,
    pub device: String,
    pub platform: String,
    pub source: String,
    pub site: String,
    pub file: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MissingInterfacesRow {
    #[serde(rename = "Device Name")]
    pub device: String,
    #[serde(rename = "File Name")]
    pub file: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MissingFileRow {
    #[serde(rename = "File Name")]
    pub file: String,
}

/// `parse_errors`: template and route materialization failures.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorRow {
    pub device: String,
    pub command: String,
    pub file: String,
    pub error: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CaptureErrorRow {
    pub file: String,
    pub error: String,
}

/// All row collections of one run.
#[derive(Debug, Default, Clone)]
pub struct Report {
    pub devices: Vec<DeviceRow>,
    pub interface_networks: Vec<InterfaceNetworkRow>,
    pub networks: Vec<NetworkRow>,
    pub route_details: Vec<RouteDetailRow>,
    pub arp: Vec<Record>,
    pub macs: Vec<Record>,
    pub missing_interfaces: Vec<MissingInterfacesRow>,
    pub missing_hostname: Vec<MissingFileRow>,
    pub missing_site: Vec<MissingFileRow>,
    pub parse_errors: Vec<ParseErrorRow>,
    pub capture_errors: Vec<CaptureErrorRow>,
}

/// Interface or route network with the device it came from.
struct NetworkFact<'d> {
    network: Ipv4,
    interface: Option<Ipv4>,
    device: &'d Device,
}

impl NetworkFact<'_> {
    fn source(&self) -> &'static str {
        match self.interface {
            Some(_) => "interface",
            None => "routing_table",
        }
    }

    fn network_row(&self, aggregates: &AggregateTable) -> NetworkRow {
        let overlap = aggregates.classify(&self.network);
        NetworkRow {
            header: "Network".to_string(),
            address: self.network.lo().to_string(),
            netmask: self.network.netmask().to_string(),
            description: String::new(),
            device: self.device.name.clone(),
            source: self.source().to_string(),
            platform: self.device.platform.to_string(),
            site: self.device.site.clone(),
            public_overlap: overlap.category,
            public_overlap_cidr: overlap.cidr,
            is_private: self.network.is_private(),
            is_loopback: self.network.is_loopback(),
            is_reserved: self.network.is_reserved(),
            file: self.device.source_id.clone(),
        }
    }

    fn interface_row(&self, interface: Ipv4, aggregates: &AggregateTable) -> InterfaceNetworkRow {
        let row = self.network_row(aggregates);
        InterfaceNetworkRow {
            header: row.header,
            address: row.address,
            netmask: row.netmask,
            description: row.description,
            device: row.device,
            interface_ip: interface.to_string(),
            platform: row.platform,
            site: row.site,
            public_overlap: row.public_overlap,
            public_overlap_cidr: row.public_overlap_cidr,
            is_private: row.is_private,
            is_loopback: row.is_loopback,
            is_reserved: row.is_reserved,
            file: row.file,
        }
    }
}

/// Copy of `record` followed by the device metadata columns.
fn enrich(record: &Record, device: &Device, source: &str) -> Record {
    let mut row = record.clone();
    for (key, value) in [
        ("device", device.name.as_str()),
        ("platform", device.platform.as_str()),
        ("source", source),
        ("site", device.site.as_str()),
        ("file", device.source_id.as_str()),
    ] {
        row.insert(key.to_string(), Value::String(value.to_string()));
    }
    row
}

/// IP address of an ARP row, whichever field name the template used.
fn arp_address(record: &Record) -> Option<Ipv4Addr> {
    ["ip_address", "ipaddress", "address"]
        .iter()
        .filter_map(|key| record_str(record, key))
        .find_map(|value| value.trim().parse().ok())
}

/// Rows without a parseable address sort after every address.
fn arp_sort_key(record: &Record) -> (bool, Ipv4Addr) {
    match arp_address(record) {
        Some(addr) => (false, addr),
        None => (true, Ipv4Addr::UNSPECIFIED),
    }
}

/// Aggregate every device of the inventory into report rows.
///
/// # Arguments
/// * `inventory` - Devices and diagnostics from the ingest pass
/// * `aggregates` - Public aggregate table for the overlap columns
///
/// # Returns
/// All report collections, sorted and ready for export
pub fn build_report(inventory: &Inventory, aggregates: &AggregateTable) -> Report {
    let mut report = Report::default();
    let mut interface_facts: Vec<NetworkFact> = Vec::new();
    let mut route_facts: Vec<NetworkFact> = Vec::new();

    for device in &inventory.devices {
        if device.missing_hostname {
            report.missing_hostname.push(MissingFileRow {
                file: device.source_id.clone(),
            });
        }
        if device.missing_networks {
            report.missing_interfaces.push(MissingInterfacesRow {
                device: device.name.clone(),
                file: device.source_id.clone(),
            });
        }
        if !device.missing_hostname && !device.missing_networks {
            report.devices.push(DeviceRow {
                device: device.name.clone(),
                platform: device.platform.to_string(),
                routing_table: !device.routes.is_empty(),
                arp_table: !device.arp.is_empty(),
                mac_table: !device.macs.is_empty(),
                dhcp_server: device.dhcp_server,
                nat: device.nat,
                site: device.site.clone(),
                file: device.source_id.clone(),
            });
        }

        for interface in device.sorted_interfaces() {
            interface_facts.push(NetworkFact {
                network: interface.network(),
                interface: Some(interface),
                device,
            });
        }

        let (networks, failures) = device.route_networks();
        for failure in failures {
            log::warn!(
                "Unable to add network from {} (likely incomplete data): {}",
                device.source_id,
                failure.reason
            );
            report.parse_errors.push(ParseErrorRow {
                device: device.name.clone(),
                command: "route".to_string(),
                file: device.source_id.clone(),
                error: failure.reason,
            });
        }
        for network in networks {
            route_facts.push(NetworkFact {
                network,
                interface: None,
                device,
            });
        }

        for route in &device.routes {
            let detail = normalize_route(route, device.platform);
            report.route_details.push(RouteDetailRow {
                protocol: detail.protocol,
                network: detail.network,
                mask: detail.mask,
                nexthop_ip: detail.nexthop_ip,
                device: device.name.clone(),
                platform: device.platform.to_string(),
                source: "routing_table".to_string(),
                site: device.site.clone(),
                file: device.source_id.clone(),
            });
        }
        report
            .arp
            .extend(device.arp.iter().map(|r| enrich(r, device, "arp_table")));
        report
            .macs
            .extend(device.macs.iter().map(|r| enrich(r, device, "mac_table")));

        report
            .parse_errors
            .extend(device.parse_failures.iter().map(|f| ParseErrorRow {
                device: f.device.clone(),
                command: f.command.clone(),
                file: f.source_id.clone(),
                error: f.reason.clone(),
            }));
    }

    interface_facts.sort_by_key(|f| f.interface);
    report.interface_networks = interface_facts
        .iter()
        .filter_map(|f| f.interface.map(|i| f.interface_row(i, aggregates)))
        .collect();

    let mut combined: Vec<&NetworkFact> =
        interface_facts.iter().chain(route_facts.iter()).collect();
    combined.sort_by_key(|f| f.network);
    report.networks = combined.iter().map(|f| f.network_row(aggregates)).collect();

    report.arp.sort_by_key(arp_sort_key);

    report.missing_site = inventory
        .files_missing_site
        .iter()
        .map(|file| MissingFileRow { file: file.clone() })
        .collect();
    report.capture_errors = inventory
        .capture_failures
        .iter()
        .map(|f: &CaptureFailure| CaptureErrorRow {
            file: f.source_id.clone(),
            error: f.reason.clone(),
        })
        .collect();

    log::info!(
        "Report: {} devices, {} networks, {} routes, {} arp, {} mac",
        report.devices.len(),
        report.networks.len(),
        report.route_details.len(),
        report.arp.len(),
        report.macs.len()
    );
    report
}
