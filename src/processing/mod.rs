//! Device and report processing logic.
//!
//! This module turns captures into devices and devices into report rows:
//! - [`classify`] - Template parsing of command sections into route/ARP/MAC records
//! - [`routes`] - Route network materialization and field normalization
//! - [`overlap`] - Public aggregate overlap classification
//! - [`inventory`] - Device construction across captures
//! - [`report`] - Report row aggregation

pub mod classify;
pub mod inventory;
pub mod overlap;
pub mod report;
pub mod routes;

// Re-export public functions
pub use classify::{classify_sections, strip_redacted, ClassifiedRecords};
pub use inventory::{build_device, Inventory, InventoryBuilder};
pub use overlap::{AggregateTable, Overlap};
pub use report::{build_report, Report};
pub use routes::{materialize_route, materialize_routes, normalize_route, RouteFailure};
