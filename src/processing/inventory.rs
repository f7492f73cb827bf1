//! Device construction and the cross-capture inventory.
//!
//! Every capture becomes one [`Device`]. Command sections are sliced out of all
//! captures of a source first and indexed by the hostname on their prompt, so the
//! show-command output for a device can live in a different file than its
//! configuration.

use super::classify::classify_sections;
use crate::capture::{CaptureFailure, CaptureSource};
use crate::extract::{
    detect_device, extract_interfaces, has_dhcp_server, has_nat, CommandSlicer, SlicedCapture,
};
use crate::models::{Capture, Device};
use crate::templates::TemplateParser;
use std::collections::HashMap;

/// Build the device for one capture.
///
/// Structured records come from the entry of `sections` under the detected hostname.
pub fn build_device(
    capture: &Capture,
    sections: &HashMap<String, SlicedCapture>,
    parser: &dyn TemplateParser,
) -> Device {
    let detection = detect_device(&capture.text);
    let sliced = if detection.missing_hostname {
        None
    } else {
        sections.get(&detection.hostname)
    };
    let interfaces = extract_interfaces(&capture.text, detection.platform);

    let mut device = Device {
        name: detection.hostname,
        platform: detection.platform,
        site: capture.site.clone().unwrap_or_default(),
        source_id: capture.source_id.clone(),
        missing_hostname: detection.missing_hostname,
        missing_networks: interfaces.is_empty(),
        dhcp_server: has_dhcp_server(&capture.text),
        nat: has_nat(&capture.text),
        interfaces,
        ..Default::default()
    };

    if let Some(sliced) = sliced {
        let classified = classify_sections(
            &device.name,
            &device.source_id,
            device.platform,
            sliced,
            parser,
        );
        device.routes = classified.routes;
        device.arp = classified.arp;
        device.macs = classified.macs;
        device.parse_failures = classified.failures;
    }

    log::debug!(
        "{} ({}) from {}: {} interfaces, {} routes, {} arp, {} mac",
        device.name,
        device.platform,
        device.source_id,
        device.interfaces.len(),
        device.routes.len(),
        device.arp.len(),
        device.macs.len()
    );
    device
}

/// Everything collected from the capture sources.
#[derive(Debug, Default)]
pub struct Inventory {
    pub devices: Vec<Device>,
    pub capture_failures: Vec<CaptureFailure>,
    /// Source files whose name carries no site.
    pub files_missing_site: Vec<String>,
}

/// Accumulates devices source by source.
pub struct InventoryBuilder<'a> {
    slicer: CommandSlicer,
    parser: &'a dyn TemplateParser,
    sections: HashMap<String, SlicedCapture>,
    inventory: Inventory,
}

impl<'a> InventoryBuilder<'a> {
    pub fn new<S: AsRef<str>>(
        commands: &[S],
        parser: &'a dyn TemplateParser,
    ) -> Result<InventoryBuilder<'a>, regex::Error> {
        Ok(InventoryBuilder {
            slicer: CommandSlicer::new(commands)?,
            parser,
            sections: HashMap::new(),
            inventory: Inventory::default(),
        })
    }

    /// Slice and then build every capture of one source.
    pub fn add_source(&mut self, source: CaptureSource) {
        if source.site.is_none() {
            self.inventory
                .files_missing_site
                .push(source.file_name.clone());
        }
        self.inventory.capture_failures.extend(source.failures);

        for capture in &source.captures {
            let sliced = self.slicer.slice(&capture.text);
            if let Some(hostname) = sliced.hostname.clone() {
                if self.sections.insert(hostname.clone(), sliced).is_some() {
                    log::debug!(
                        "Command sections for {hostname} replaced by {}",
                        capture.source_id
                    );
                }
            }
        }

        for capture in &source.captures {
            let device = build_device(capture, &self.sections, self.parser);
            self.inventory.devices.push(device);
        }
    }

    pub fn finish(self) -> Inventory {
        log::info!(
            "Built {} devices, {} capture failures",
            self.inventory.devices.len(),
            self.inventory.capture_failures.len()
        );
        self.inventory
    }
}
