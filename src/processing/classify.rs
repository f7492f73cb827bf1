//! Structured record classification.
//!
//! Sends each sliced command section through the template parser and files the
//! resulting records as route, ARP or MAC entries by the command name.

use crate::extract::SlicedCapture;
use crate::models::{ParseFailure, Platform, Record};
use crate::templates::TemplateParser;
use colored::Colorize;

/// Lines containing this marker (any case) are redaction artifacts.
const REDACTION_MARKER: &str = "proprietary";

/// Records sorted into their tables, plus the commands that failed to parse.
#[derive(Debug, Default, Clone)]
pub struct ClassifiedRecords {
    pub routes: Vec<Record>,
    pub arp: Vec<Record>,
    pub macs: Vec<Record>,
    pub failures: Vec<ParseFailure>,
}

/// Drop redaction lines and rejoin the rest.
pub fn strip_redacted(section: &str) -> String {
    section
        .lines()
        .filter(|line| !line.to_lowercase().contains(REDACTION_MARKER))
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parse every section and bucket the records.
///
/// A command may land in more than one bucket (`arp`, `rout` and `mac` are checked
/// independently). Each bucket holds the records of the last command that filled
/// it. A parse failure only drops that command's records.
pub fn classify_sections(
    device: &str,
    source_id: &str,
    platform: Platform,
    sliced: &SlicedCapture,
    parser: &dyn TemplateParser,
) -> ClassifiedRecords {
    let mut classified = ClassifiedRecords::default();

    if !sliced.is_empty() {
        let commands: Vec<&str> = sliced.sections.iter().map(|s| s.command.as_str()).collect();
        log::info!("Found the following commands to parse for {device}: {commands:?}");
    }

    for section in &sliced.sections {
        let command = section.command.as_str();
        let data = strip_redacted(&section.text);

        let records = match parser.parse(platform, command, &data) {
            Ok(records) => records,
            Err(e) => {
                log::warn!(
                    "{} {command} from {source_id} ({device}): {e}",
                    "Template could not parse".yellow()
                );
                classified.failures.push(ParseFailure {
                    device: device.to_string(),
                    command: command.to_string(),
                    source_id: source_id.to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        log::info!(
            "\"{command}\" {} for {device}: {} records",
            "successfully parsed".green(),
            records.len()
        );
        if command.contains("arp") {
            classified.arp = records.clone();
        }
        if command.contains("rout") {
            classified.routes = records.clone();
        }
        if command.contains("mac") {
            classified.macs = records;
        }
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InventoryError;
    use crate::extract::CommandSection;
    use serde_json::json;
    use std::cell::RefCell;

    /// Returns one record per non-empty line and remembers what it was given.
    #[derive(Default)]
    struct RecordingParser {
        seen: RefCell<Vec<(Platform, String, String)>>,
    }

    impl TemplateParser for RecordingParser {
        fn parse(
            &self,
            platform: Platform,
            command: &str,
            data: &str,
        ) -> Result<Vec<Record>, InventoryError> {
            self.seen
                .borrow_mut()
                .push((platform, command.to_string(), data.to_string()));
            if command.starts_with("show broken") {
                return Err(InventoryError::NoTemplate {
                    platform: platform.to_string(),
                    command: command.to_string(),
                });
            }
            Ok(data
                .lines()
                .filter(|l| !l.is_empty())
                .map(|l| json!({ "line": l }).as_object().cloned().unwrap())
                .collect())
        }
    }

    fn sliced(sections: &[(&str, &str)]) -> SlicedCapture {
        SlicedCapture {
            hostname: Some("R1".to_string()),
            sections: sections
                .iter()
                .map(|(c, t)| CommandSection {
                    command: c.to_string(),
                    text: t.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_strip_redacted() {
        let text = "line one\nPROPRIETARY data removed\nline two\n<Proprietary>";
        assert_eq!(strip_redacted(text), "line one\nline two");
        assert_eq!(strip_redacted(""), "");
    }

    #[test]
    fn test_classify_buckets() {
        let parser = RecordingParser::default();
        let sliced = sliced(&[
            ("show ip arp", "a1\na2"),
            ("show ip route", "r1"),
            ("show mac address-table", "m1\nm2\nm3"),
        ]);
        let classified = classify_sections("R1", "r1.txt", Platform::CiscoIos, &sliced, &parser);
        assert_eq!(classified.arp.len(), 2);
        assert_eq!(classified.routes.len(), 1);
        assert_eq!(classified.macs.len(), 3);
        assert!(classified.failures.is_empty());
    }

    #[test]
    fn test_classify_command_in_two_buckets() {
        let parser = RecordingParser::default();
        let sliced = sliced(&[("show arp mac-routes", "x")]);
        let classified = classify_sections("R1", "r1.txt", Platform::CiscoIos, &sliced, &parser);
        assert_eq!(classified.arp.len(), 1);
        assert_eq!(classified.routes.len(), 1);
        assert_eq!(classified.macs.len(), 1);
    }

    #[test]
    fn test_classify_strips_redaction_before_parsing() {
        let parser = RecordingParser::default();
        let sliced = sliced(&[("show ip arp", "keep\nproprietary secret\nkeep too")]);
        classify_sections("R1", "r1.txt", Platform::HpComware, &sliced, &parser);
        let seen = parser.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, Platform::HpComware);
        assert_eq!(seen[0].2, "keep\nkeep too");
        assert!(!seen[0].2.to_lowercase().contains("proprietary"));
    }

    #[test]
    fn test_classify_failure_is_attributed() {
        let parser = RecordingParser::default();
        let sliced = sliced(&[("show broken", "x"), ("show route", "r1\nr2")]);
        let classified = classify_sections(
            "R1",
            "site/r1.txt",
            Platform::CheckpointGaia,
            &sliced,
            &parser,
        );
        assert_eq!(classified.routes.len(), 2);
        assert_eq!(classified.failures.len(), 1);
        let failure = &classified.failures[0];
        assert_eq!(failure.device, "R1");
        assert_eq!(failure.command, "show broken");
        assert_eq!(failure.source_id, "site/r1.txt");
    }

    #[test]
    fn test_later_command_replaces_bucket() {
        let parser = RecordingParser::default();
        let sliced = sliced(&[
            ("show ip arp", "Internet 10.0.0.1\nInternet 10.0.0.2"),
            ("show arp", "Internet 10.0.0.1"),
        ]);
        let classified = classify_sections("R1", "r1.txt", Platform::CiscoIos, &sliced, &parser);
        assert_eq!(classified.arp.len(), 1);
        assert_eq!(classified.arp[0]["line"], "Internet 10.0.0.1");
    }

    #[test]
    fn test_failed_command_keeps_earlier_bucket() {
        let parser = RecordingParser::default();
        let sliced = sliced(&[("show route", "r1\nr2"), ("show broken route", "x")]);
        let classified = classify_sections(
            "R1",
            "r1.txt",
            Platform::CheckpointGaia,
            &sliced,
            &parser,
        );
        assert_eq!(classified.routes.len(), 2);
        assert_eq!(classified.failures.len(), 1);
    }
}
