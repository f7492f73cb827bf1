//! Line-oriented regex templates for common show commands.
//!
//! Each template is a single regex applied to every line of the output; every
//! matching line becomes one record keyed by the named capture groups.

use super::TemplateParser;
use crate::errors::InventoryError;
use crate::models::{Platform, Record};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

const IP: &str = r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}";
const MAC_DOTTED: &str = r"[0-9a-fA-F]{4}\.[0-9a-fA-F]{4}\.[0-9a-fA-F]{4}";
const MAC_DASHED: &str = r"[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}";
const MAC_COLON: &str = r"(?:[0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}";

struct Template {
    platform: Platform,
    command: &'static str,
    line: Regex,
}

fn template(platform: Platform, command: &'static str, line: &str) -> Template {
    let line = line
        .replace("{IP}", IP)
        .replace("{MAC_DOTTED}", MAC_DOTTED)
        .replace("{MAC_DASHED}", MAC_DASHED)
        .replace("{MAC_COLON}", MAC_COLON);
    Template {
        platform,
        command,
        line: Regex::new(&line).expect("Invalid template regex"),
    }
}

lazy_static! {
    static ref TEMPLATES: Vec<Template> = vec![
        template(
            Platform::CiscoIos,
            "show ip arp",
            r"^(?P<protocol>Internet)\s+(?P<ip_address>{IP})\s+(?P<age>\S+)\s+(?P<mac_address>{MAC_DOTTED}|Incomplete)\s+(?P<type>\S+)(?:\s+(?P<interface>\S+))?\s*$",
        ),
        template(
            Platform::CiscoIos,
            "show ip route",
            r"^(?P<protocol>[A-Za-z]{1,2})(?P<type>\*|\s(?:E1|E2|IA|N1|N2|L1|L2|ia|su))?\s+(?P<network>{IP})/(?P<mask>\d{1,2})(?:\s+\[(?P<distance>\d+)/(?P<metric>\d+)\])?\s+(?:via\s+(?P<nexthop_ip>{IP})|is directly connected)(?:,\s+(?P<uptime>\d[\w:]*))?(?:,\s+(?P<nexthop_if>\S+))?",
        ),
        template(
            Platform::CiscoIos,
            "show mac address-table",
            r"^\s*(?P<vlan_id>\d+|All)\s+(?P<destination_address>{MAC_DOTTED})\s+(?P<type>\S+)\s+(?P<destination_port>\S+)\s*$",
        ),
        template(
            Platform::HpComware,
            "display arp",
            r"^\s*(?P<ip_address>{IP})\s+(?P<mac_address>{MAC_DASHED})\s+(?P<vlan_id>\S+)\s+(?P<interface>\S+)\s+(?P<aging>\S+)\s+(?P<type>\S+)\s*$",
        ),
        template(
            Platform::HpComware,
            "display ip routing-table",
            r"^\s*(?P<network>{IP})/(?P<mask>\d{1,2})\s+(?P<protocal>[A-Za-z_-]+)\s+(?P<preference>\d+)\s+(?P<cost>\d+)\s+(?P<nexthop_ip>{IP})\s+(?P<interface>\S+)\s*$",
        ),
        template(
            Platform::HpComware,
            "display mac-address",
            r"^\s*(?P<mac_address>{MAC_DASHED})\s+(?P<vlan_id>\d+)\s+(?P<state>\S+)\s+(?P<interface>\S+)\s+(?P<aging>\S+)\s*$",
        ),
        template(
            Platform::JuniperJunos,
            "show arp",
            r"^\s*(?P<mac_address>{MAC_COLON})\s+(?P<ip_address>{IP})\s+(?P<name>\S+)\s+(?P<interface>\S+)\s+(?P<flags>\S+)\s*$",
        ),
        template(
            Platform::CheckpointGaia,
            "show route",
            r"^(?P<protocol>[A-Z]{1,2})\s+(?P<network>{IP})/(?P<mask>\d{1,2})\s+(?:via\s+(?P<nexthopip>{IP}),\s*|is directly connected,\s*)(?P<interface>[^,\s]+)(?:,\s*cost\s+(?P<cost>\d+))?(?:,\s*age\s+(?P<age>\d+))?",
        ),
        template(
            Platform::CheckpointGaia,
            "show arp",
            r"^\s*(?P<ip_address>{IP})\s+(?P<mac_address>{MAC_COLON})\s+(?P<interface>\S+)\s*$",
        ),
    ];
}

/// Built-in templates keyed by platform and full command name.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> BuiltinTemplates {
        BuiltinTemplates
    }
}

fn find_template(platform: Platform, command: &str) -> Option<&'static Template> {
    let command = command.split_whitespace().collect::<Vec<&str>>().join(" ");
    TEMPLATES
        .iter()
        .find(|t| t.platform == platform && t.command == command)
}

impl TemplateParser for BuiltinTemplates {
    fn parse(
        &self,
        platform: Platform,
        command: &str,
        data: &str,
    ) -> Result<Vec<Record>, InventoryError> {
        let Some(template) = find_template(platform, command) else {
            return Err(InventoryError::NoTemplate {
                platform: platform.to_string(),
                command: command.to_string(),
            });
        };

        let names: Vec<&str> = template.line.capture_names().flatten().collect();
        let records: Vec<Record> = data
            .lines()
            .filter_map(|line| template.line.captures(line))
            .map(|caps| {
                names
                    .iter()
                    .map(|name| {
                        let value = caps.name(name).map(|m| m.as_str().trim()).unwrap_or("");
                        (name.to_string(), Value::String(value.to_string()))
                    })
                    .collect::<Record>()
            })
            .collect();

        if records.is_empty() {
            return Err(InventoryError::NoRecords {
                platform: platform.to_string(),
                command: command.to_string(),
            });
        }
        log::trace!("{platform} {command:?}: {} records", records.len());
        Ok(records)
    }
}
