//! Capture sources.
//!
//! - [`loader`] - Discovery of capture files and reading of plain files and zip archives

mod loader;

pub use loader::{discover_sources, load_source, site_name_from_path, CaptureFailure, CaptureSource};
