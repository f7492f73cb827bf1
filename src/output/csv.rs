//! CSV report files.

use crate::errors::InventoryError;
use crate::processing::Report;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Quote a field if it holds a comma, a double quote or a line break.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') || input.contains('\n') {
        // excel does not like spaces after comma between fields
        let escaped = input.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        input.to_string()
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| cell(Some(v)))
            .collect::<Vec<String>>()
            .join(","),
        Some(other) => other.to_string(),
    }
}

/// Render rows as CSV text.
///
/// The header is the union of all field names in first-seen order, so rows from
/// different templates line up in one table. Missing fields are left empty.
pub fn rows_to_csv<T: Serialize>(rows: &[T]) -> Result<String, serde_json::Error> {
    let mut objects = Vec::with_capacity(rows.len());
    let mut header: Vec<String> = Vec::new();
    for row in rows {
        let object = match serde_json::to_value(row)? {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        for key in object.keys() {
            if !header.contains(key) {
                header.push(key.clone());
            }
        }
        objects.push(object);
    }

    let mut out = String::new();
    out.push_str(
        &header
            .iter()
            .map(|h| escape_csv_field(h))
            .collect::<Vec<String>>()
            .join(","),
    );
    out.push('\n');
    for object in &objects {
        let line = header
            .iter()
            .map(|key| escape_csv_field(&cell(object.get(key))))
            .collect::<Vec<String>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Write `rows` to `<dir>/<name>.csv`.
///
/// # Arguments
/// * `dir` - Output directory
/// * `name` - File name without the `.csv` extension
/// * `rows` - The rows to write
/// * `description` - What the rows are, for the console notice
///
/// # Returns
/// The path written, or `None` for an empty collection
pub fn write_rows<T: Serialize>(
    dir: &Path,
    name: &str,
    rows: &[T],
    description: &str,
) -> Result<Option<PathBuf>, InventoryError> {
    if rows.is_empty() {
        println!("{}", format!("No {description} found!").red());
        return Ok(None);
    }
    let path = dir.join(format!("{name}.csv"));
    let report_error = |reason: String| InventoryError::ReportWrite {
        path: path.display().to_string(),
        reason,
    };

    let csv = rows_to_csv(rows).map_err(|e| report_error(e.to_string()))?;
    let mut file = std::fs::File::create(&path)
        .map_err(|e| report_error(e.to_string()))?;
    file.write_all(csv.as_bytes())
        .map_err(|e| report_error(e.to_string()))?;

    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    let created = format!("File \"{}\" has been successfully created", path.display());
    println!("{}", created.green());
    Ok(Some(path))
}

/// Write every non-empty collection of the report into `dir`.
pub fn write_report(report: &Report, dir: &Path) -> Result<Vec<PathBuf>, InventoryError> {
    std::fs::create_dir_all(dir).map_err(|e| InventoryError::ReportWrite {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let written = [
        write_rows(
            dir,
            "networks_from_int",
            &report.interface_networks,
            "Networks Found",
        )?,
        write_rows(dir, "networks_combined", &report.networks, "Networks Found")?,
        write_rows(dir, "route_details", &report.route_details, "Route Details")?,
        write_rows(dir, "arp_details", &report.arp, "ARP Addresses")?,
        write_rows(dir, "mac_details", &report.macs, "MAC Addresses")?,
        write_rows(dir, "device_details", &report.devices, "Device Details")?,
        write_rows(
            dir,
            "files_missing_network_interface_addresses",
            &report.missing_interfaces,
            "files missing interface addressing",
        )?,
        write_rows(
            dir,
            "files_missing_hostname",
            &report.missing_hostname,
            "files missing a hostname",
        )?,
        write_rows(
            dir,
            "files_missing_site_name",
            &report.missing_site,
            "files missing a site name",
        )?,
        write_rows(dir, "parse_errors", &report.parse_errors, "parse errors")?,
        write_rows(
            dir,
            "capture_errors",
            &report.capture_errors,
            "capture errors",
        )?,
    ];
    Ok(written.into_iter().flatten().collect())
}
