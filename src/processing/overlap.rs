//! Public aggregate overlap classification.
//!
//! Every extracted network is labelled with the first reference aggregate that
//! contains it. Categories are checked in the order they appear in the aggregate
//! file and the first hit wins.

use crate::config::NO_ISSUE;
use crate::errors::InventoryError;
use crate::models::Ipv4;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Result of [`AggregateTable::classify`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    /// Category label, or "No Issue".
    pub category: String,
    /// Matching aggregate CIDR, empty when there is none.
    pub cidr: String,
}

impl Overlap {
    fn none() -> Overlap {
        Overlap {
            category: NO_ISSUE.to_string(),
            cidr: String::new(),
        }
    }
}

/// Reference aggregates, category label to CIDR blocks, in file order.
#[derive(Debug, Clone, Default)]
pub struct AggregateTable {
    pub categories: Vec<(String, Vec<(String, Ipv4)>)>,
}

impl AggregateTable {
    /// Parse a JSON object of `category -> [cidr, ...]`.
    ///
    /// Entries that are not valid CIDR strings are skipped with a warning.
    pub fn from_json_str(json: &str) -> Result<AggregateTable, InventoryError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let raw: Map<String, Value> = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| InventoryError::AggregateLoad {
                path: e.path().to_string(),
                reason: e.to_string(),
            })?;

        let mut categories = Vec::with_capacity(raw.len());
        for (category, blocks) in raw {
            let Value::Array(blocks) = blocks else {
                log::warn!("Aggregate category {category:?} is not a list, skipping");
                continue;
            };
            let mut cidrs = Vec::with_capacity(blocks.len());
            for block in blocks {
                let Some(text) = block.as_str() else {
                    log::warn!("Aggregate {category:?}: {block} is not a string, skipping");
                    continue;
                };
                match Ipv4::new(text) {
                    Ok(ip) => cidrs.push((text.trim().to_string(), ip.network())),
                    Err(e) => log::warn!("Aggregate {category:?}: invalid CIDR {text:?}: {e}"),
                }
            }
            categories.push((category, cidrs));
        }
        Ok(AggregateTable { categories })
    }

    /// Read the aggregate file.
    pub fn load(path: &Path) -> Result<AggregateTable, InventoryError> {
        let json = std::fs::read_to_string(path).map_err(|e| InventoryError::AggregateLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        AggregateTable::from_json_str(&json).map_err(|e| match e {
            InventoryError::AggregateLoad { path: at, reason } => InventoryError::AggregateLoad {
                path: format!("{} at {at}", path.display()),
                reason,
            },
            other => other,
        })
    }

    /// Like [`AggregateTable::load`], but a failure gives an empty table so every
    /// network classifies as "No Issue".
    pub fn load_or_empty(path: &Path) -> AggregateTable {
        match AggregateTable::load(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} aggregate categories from {}",
                    table.categories.len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                log::warn!("{e}, public overlap checks disabled");
                AggregateTable::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|(_, cidrs)| cidrs.is_empty())
    }

    /// First aggregate containing `network`, in category then list order.
    ///
    /// # Arguments
    /// * `network` - The interface or route network to check
    ///
    /// # Returns
    /// The category and CIDR of the first containing aggregate, or "No Issue" with
    /// an empty CIDR. The default route is never classified.
    pub fn classify(&self, network: &Ipv4) -> Overlap {
        if network.is_default_route() {
            return Overlap::none();
        }
        let target = network.network();
        self.categories
            .iter()
            .flat_map(|(category, cidrs)| cidrs.iter().map(move |c| (category, c)))
            .find(|(_, (_, aggregate))| aggregate.contains(&target))
            .map(|(category, (cidr, _))| Overlap {
                category: category.clone(),
                cidr: cidr.clone(),
            })
            .unwrap_or_else(Overlap::none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Ipv4 {
        Ipv4::new(s).unwrap()
    }

    #[test]
    fn test_classify_first_category() {
        let json = r#"{"RFC1918": ["10.0.0.0/8"], "CGN": ["100.64.0.0/10"]}"#;
        let table = AggregateTable::from_json_str(json).unwrap();
        let overlap = table.classify(&net("10.1.2.0/24"));
        assert_eq!(overlap.category, "RFC1918");
        assert_eq!(overlap.cidr, "10.0.0.0/8");

        let overlap = table.classify(&net("100.64.1.0/24"));
        assert_eq!(overlap.category, "CGN");

        let overlap = table.classify(&net("8.8.8.0/24"));
        assert_eq!(overlap, Overlap::none());
    }

    #[test]
    fn test_default_route_is_never_classified() {
        let table = AggregateTable::from_json_str(r#"{"ALL": ["0.0.0.0/0"]}"#).unwrap();
        assert_eq!(table.classify(&net("0.0.0.0/0")).category, "No Issue");
        assert_eq!(table.classify(&net("0.0.0.0/0")).cidr, "");
        assert_eq!(table.classify(&net("10.0.0.0/8")).category, "ALL");
    }

    #[test]
    fn test_earlier_category_is_not_overridden() {
        let json = r#"{
            "Public A": ["203.0.113.0/24"],
            "Public B": ["203.0.0.0/8"],
            "Public C": ["203.0.113.0/25"]
        }"#;
        let table = AggregateTable::from_json_str(json).unwrap();
        let overlap = table.classify(&net("203.0.113.0/26"));
        assert_eq!(overlap.category, "Public A");
        assert_eq!(overlap.cidr, "203.0.113.0/24");
    }

    #[test]
    fn test_containment_not_partial_overlap() {
        let table = AggregateTable::from_json_str(r#"{"Small": ["10.1.0.0/16"]}"#).unwrap();
        assert_eq!(table.classify(&net("10.0.0.0/8")).category, "No Issue");
        // host bits on the interface address do not matter
        assert_eq!(table.classify(&net("10.1.5.9/24")).category, "Small");
    }

    #[test]
    fn test_invalid_entries_skipped() {
        let json = r#"{"Mixed": ["not-a-cidr", 42, "192.0.2.0/24"], "Broken": "10.0.0.0/8"}"#;
        let table = AggregateTable::from_json_str(json).unwrap();
        assert_eq!(table.categories.len(), 1);
        assert_eq!(table.categories[0].1.len(), 1);
        assert_eq!(table.classify(&net("192.0.2.128/25")).category, "Mixed");
    }

    #[test]
    fn test_load_failures() {
        assert!(AggregateTable::from_json_str("[1, 2]").is_err());
        let missing = Path::new("does/not/exist.json");
        assert!(AggregateTable::load(missing).is_err());
        let table = AggregateTable::load_or_empty(missing);
        assert!(table.is_empty());
        assert_eq!(table.classify(&net("10.0.0.0/8")).category, "No Issue");
    }
}
