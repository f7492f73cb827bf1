//! Semi-structured records returned by the template parser.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row produced by a command template. Field order follows the template.
pub type Record = serde_json::Map<String, Value>;

/// Read a record field as text.
///
/// Lists (e.g. multiple next hops) are joined with `,`; null and missing fields give `None`.
pub fn record_str(record: &Record, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<String>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

/// Routing table entry in the canonical field layout.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDetail {
    pub protocol: Option<String>,
    pub network: Option<String>,
    pub mask: Option<String>,
    pub nexthop_ip: Option<String>,
}
