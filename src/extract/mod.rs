//! Text extraction from raw device captures.
//!
//! - [`prompt`] - CLI prompt recognition shared by detection and slicing
//! - [`slicer`] - Cutting per-command output sections out of a capture
//! - [`detect`] - Hostname and vendor platform detection
//! - [`interfaces`] - Interface address extraction per dialect
//! - [`features`] - DHCP server and NAT presence checks

pub mod detect;
pub mod features;
pub mod interfaces;
pub mod prompt;
pub mod slicer;

pub use detect::{detect_device, Detection};
pub use features::{has_dhcp_server, has_nat};
pub use interfaces::extract_interfaces;
pub use prompt::{first_prompt_hostname, is_prompt_line, prompt_hostname, PROMPT_PATTERN};
pub use slicer::{command_pattern, CommandSection, CommandSlicer, SlicedCapture};
