//! Domain models for the configuration inventory.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`Platform`] - Vendor configuration dialect
//! - [`Capture`] and [`Device`] - Raw input text and the facts read from it
//! - [`Record`] and [`RouteDetail`] - Template records and normalized routes

mod device;
mod ipv4;
mod platform;
mod record;

// Re-export public types
pub use device::{Capture, Device, ParseFailure};
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, netmask_to_prefix, parse_mask, prefix_to_netmask,
    Ipv4, MAX_LENGTH, NETMASK_OCTETS,
};
pub use platform::{InterfaceGrammar, Platform, RouteFieldNames};
pub use record::{record_str, Record, RouteDetail};
