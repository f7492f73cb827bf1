//! Routing table records: network materialization and field normalization.

use crate::errors::InventoryError;
use crate::models::{record_str, Ipv4, Platform, Record, RouteDetail};
use serde::Serialize;

/// A route record that could not be turned into a network.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteFailure {
    pub network: Option<String>,
    pub mask: Option<String>,
    pub reason: String,
}

/// Build the network of one route record from its `network` and `mask` fields.
pub fn materialize_route(record: &Record) -> Result<Ipv4, InventoryError> {
    let network = record_str(record, "network");
    let mask = record_str(record, "mask");
    let reject = |reason: String| InventoryError::RouteMaterialize {
        network: network.clone(),
        mask: mask.clone(),
        reason,
    };

    let (net, len) = match (&network, &mask) {
        (Some(net), Some(len)) => (net, len),
        (None, _) => return Err(reject("missing network field".to_string())),
        (_, None) => return Err(reject("missing mask field".to_string())),
    };
    Ipv4::network_from_parts(net, len)
        .map_err(|e| reject(e.to_string()))
}

/// Networks of all route records, sorted ascending.
///
/// # Arguments
/// * `records` - Route records holding `network` and `mask` fields
///
/// # Returns
/// The sorted networks, plus one failure per record that was skipped
pub fn materialize_routes(records: &[Record]) -> (Vec<Ipv4>, Vec<RouteFailure>) {
    let mut networks = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for record in records {
        match materialize_route(record) {
            Ok(network) => networks.push(network),
            Err(InventoryError::RouteMaterialize {
                network,
                mask,
                reason,
            }) => failures.push(RouteFailure {
                network,
                mask,
                reason,
            }),
            Err(e) => failures.push(RouteFailure {
                network: None,
                mask: None,
                reason: e.to_string(),
            }),
        }
    }

    networks.sort();
    (networks, failures)
}

/// Map a dialect route record onto the canonical fields.
///
/// Dialects without a route field mapping give an empty [`RouteDetail`].
pub fn normalize_route(record: &Record, platform: Platform) -> RouteDetail {
    match platform.route_field_names() {
        Some(names) => RouteDetail {
            protocol: record_str(record, names.protocol),
            network: record_str(record, names.network),
            mask: record_str(record, names.mask),
            nexthop_ip: record_str(record, names.nexthop_ip),
        },
        None => RouteDetail::default(),
    }
}
