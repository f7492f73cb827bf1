//! Network configuration capture inventory and IPAM report.
//!
//! Reads raw device captures (configuration plus show-command output), works out
//! which device and vendor produced each one, extracts addressing and table data
//! and aggregates it into report rows.
//!
//! - [`capture`] - Capture file discovery and loading
//! - [`extract`] - Prompt, slicing, detection and address extraction over raw text
//! - [`templates`] - Command output parsing into records
//! - [`processing`] - Devices, overlap classification and report rows
//! - [`output`] - CSV files and terminal summary

pub mod capture;
pub mod config;
pub mod errors;
pub mod extract;
pub mod models;
pub mod output;
pub mod processing;
pub mod templates;

use capture::{discover_sources, load_source, CaptureFailure, CaptureSource};
use config::RunConfig;
use processing::{build_report, AggregateTable, Inventory, InventoryBuilder, Report};
use std::error::Error;
use templates::TemplateParser;

/// Ingest every capture source of the input directory.
///
/// Only an input directory without capture files is an error. A file that cannot be
/// opened is kept as a capture failure.
pub fn build_inventory(
    config: &RunConfig,
    parser: &dyn TemplateParser,
) -> Result<Inventory, Box<dyn Error>> {
    let paths = discover_sources(&config.input_dir)?;
    let mut builder = InventoryBuilder::new(&config.commands, parser)?;

    for path in paths {
        let source = match load_source(&path) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                CaptureSource {
                    file_name: file_name.clone(),
                    site: capture::site_name_from_path(&path),
                    captures: vec![],
                    failures: vec![CaptureFailure {
                        source_id: file_name,
                        reason: e.to_string(),
                    }],
                }
            }
        };
        builder.add_source(source);
    }
    Ok(builder.finish())
}

/// Run the whole pipeline and return the report rows.
pub fn run(config: &RunConfig, parser: &dyn TemplateParser) -> Result<Report, Box<dyn Error>> {
    log::info!("#Start run() input={}", config.input_dir.display());
    let aggregates = AggregateTable::load_or_empty(&config.aggregates_file);
    let inventory = build_inventory(config, parser)?;
    Ok(build_report(&inventory, &aggregates))
}
