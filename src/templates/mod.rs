//! Command output templates.
//!
//! The [`TemplateParser`] trait is the seam to whatever turns command output into
//! records. [`BuiltinTemplates`] covers the commands in the default command list.

mod builtin;

use crate::errors::InventoryError;
use crate::models::{Platform, Record};

pub use builtin::BuiltinTemplates;

/// Parses the output of one command into records.
pub trait TemplateParser {
    /// Parse `data`, the cleaned output of `command` on a `platform` device.
    ///
    /// Fails when there is no template for the platform/command pair or the
    /// data does not fit it.
    fn parse(
        &self,
        platform: Platform,
        command: &str,
        data: &str,
    ) -> Result<Vec<Record>, InventoryError>;
}
