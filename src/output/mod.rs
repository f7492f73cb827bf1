//! Output of report data.
//!
//! This module handles writing and displaying the report:
//! - [`csv`] - CSV report files
//! - [`terminal`] - Terminal summary with colors

mod csv;
mod terminal;

pub use csv::{escape_csv_field, rows_to_csv, write_report, write_rows};
pub use terminal::{format_field, platform_counts, print_summary, summary_lines};
