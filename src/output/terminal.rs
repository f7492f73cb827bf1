//! Terminal output utilities.
//!
//! Provides formatting helpers and the end-of-run summary.

use crate::processing::Report;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Device count per platform, by platform name.
pub fn platform_counts(report: &Report) -> Vec<(String, usize)> {
    report
        .devices
        .iter()
        .map(|d| d.platform.clone())
        .counts()
        .into_iter()
        .sorted()
        .collect()
}

/// Summary lines for the console, without colors.
pub fn summary_lines(report: &Report) -> Vec<String> {
    let mut lines = vec![
        format!("devices:            {}", report.devices.len()),
        format!("interface networks: {}", report.interface_networks.len()),
        format!("networks combined:  {}", report.networks.len()),
        format!("routes:             {}", report.route_details.len()),
        format!("arp entries:        {}", report.arp.len()),
        format!("mac entries:        {}", report.macs.len()),
        format!("parse errors:       {}", report.parse_errors.len()),
        format!("capture errors:     {}", report.capture_errors.len()),
    ];
    for (platform, count) in platform_counts(report) {
        lines.push(format!("  {platform}: {count}"));
    }
    lines
}

fn print_file_list(title: &str, files: &[String]) {
    if files.is_empty() {
        return;
    }
    println!("\n{}\n", title.red().bold());
    for file in files {
        println!("{file}");
    }
}

/// Print the device table, the counts and the unresolved files.
pub fn print_summary(report: &Report) {
    if !report.devices.is_empty() {
        println!("\n{}\n", "Device Details:".red().bold());
        println!(
            "{},{},{},{},{},{},{}",
            format_field("device", 24),
            format_field("platform", 18),
            format_field("routes", 8),
            format_field("arp", 7),
            format_field("mac", 7),
            format_field("site", 20),
            format_field("file", 30)
        );
        for d in &report.devices {
            println!(
                "{},{},{},{},{},{},{}",
                format_field(&d.device, 24),
                format_field(&d.platform, 18),
                format_field(d.routing_table, 8),
                format_field(d.arp_table, 7),
                format_field(d.mac_table, 7),
                format_field(&d.site, 20),
                format_field(&d.file, 30)
            );
        }
    }

    println!(
        "\n{} {}",
        "Summary".green().bold(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    for line in summary_lines(report) {
        println!("{line}");
    }

    let missing_site: Vec<String> = report
        .missing_site
        .iter()
        .map(|r| r.file.clone())
        .collect();
    print_file_list(
        "No site names were found for the following files:",
        &missing_site,
    );
    let missing_hostname: Vec<String> = report
        .missing_hostname
        .iter()
        .map(|r| r.file.clone())
        .collect();
    print_file_list(
        "No hostname could be identified for the following files:",
        &missing_hostname,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::report::DeviceRow;

    fn row(device: &str, platform: &str) -> DeviceRow {
        DeviceRow {
            device: device.to_string(),
            platform: platform.to_string(),
            routing_table: false,
            arp_table: false,
            mac_table: false,
            dhcp_server: false,
            nat: false,
            site: String::new(),
            file: format!("{device}.txt"),
        }
    }

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_platform_counts() {
        let report = Report {
            devices: vec![
                row("R1", "cisco_ios"),
                row("J1", "juniper_junos"),
                row("R2", "cisco_ios"),
            ],
            ..Default::default()
        };
        let counts = platform_counts(&report);
        assert_eq!(counts[0], ("cisco_ios".to_string(), 2));
        assert_eq!(counts[1], ("juniper_junos".to_string(), 1));
        assert_eq!(counts.len(), 2);
        let lines = summary_lines(&report);
        assert_eq!(lines[0], "devices:            3");
        assert!(lines.contains(&"  cisco_ios: 2".to_string()));
    }
}
