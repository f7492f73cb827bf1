use thiserror::Error;

/// Error types for capture ingestion, extraction and reporting
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Unable to read capture {source_id}: {reason}")]
    CaptureRead { source_id: String, reason: String },

    #[error("No capture files found in {0}")]
    NoCaptureSources(String),

    #[error("No template for {platform} command {command:?}")]
    NoTemplate { platform: String, command: String },

    #[error("Template for {platform} command {command:?} matched no records")]
    NoRecords { platform: String, command: String },

    #[error("Route network {network:?}/{mask:?} rejected: {reason}")]
    RouteMaterialize {
        network: Option<String>,
        mask: Option<String>,
        reason: String,
    },

    #[error("Aggregate table {path}: {reason}")]
    AggregateLoad { path: String, reason: String },

    #[error("Unable to write report {path}: {reason}")]
    ReportWrite { path: String, reason: String },

    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Zip Error: {0}")]
    ZipError(#[from] zip::result::ZipError),
}
