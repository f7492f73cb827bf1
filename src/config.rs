//! Static configuration and the per-run settings passed into the pipeline.

use std::path::PathBuf;

/// Capture file extensions picked up from the input directory.
pub const FILE_EXTENSIONS: [&str; 5] = ["txt", "log", "cfg", "conf", "zip"];

/// Commands whose output is sliced out of captures and sent to the template parser.
pub const COMMAND_LIST: [&str; 8] = [
    "show ip arp",
    "show ip route",
    "show mac address-table",
    "show arp",
    "show route",
    "display arp",
    "display ip routing-table",
    "display mac-address",
];

pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_AGGREGATES_FILE: &str = "vars/public_aggregates.json";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Hostname recorded when nothing in a capture identifies the device.
pub const HOSTNAME_NOT_DETECTED: &str = "No hostname was detected";

/// Overlap category for networks outside every aggregate.
pub const NO_ISSUE: &str = "No Issue";

/// Settings for one report run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub aggregates_file: PathBuf,
    pub output_dir: PathBuf,
    pub commands: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            aggregates_file: PathBuf::from(DEFAULT_AGGREGATES_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            commands: COMMAND_LIST.iter().map(|c| c.to_string()).collect(),
        }
    }
}
