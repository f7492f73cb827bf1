//! Capture file discovery and loading.

use crate::config::FILE_EXTENSIONS;
use crate::errors::InventoryError;
use crate::models::Capture;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A capture that could not be read or decoded.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CaptureFailure {
    pub source_id: String,
    pub reason: String,
}

impl From<InventoryError> for CaptureFailure {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::CaptureRead { source_id, reason } => {
                CaptureFailure { source_id, reason }
            }
            other => CaptureFailure {
                source_id: String::new(),
                reason: other.to_string(),
            },
        }
    }
}

/// One input file and the captures read from it.
#[derive(Debug, Clone, Default)]
pub struct CaptureSource {
    /// File name relative to the input directory.
    pub file_name: String,
    pub site: Option<String>,
    pub captures: Vec<Capture>,
    pub failures: Vec<CaptureFailure>,
}

/// Site name from a capture file name: everything before the last `" -"`.
///
/// `Branch 12 - configs.zip` gives `Branch 12`.
pub fn site_name_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let (site, _) = name.rsplit_once(" -")?;
    let site = site.trim();
    if site.is_empty() {
        None
    } else {
        Some(site.to_string())
    }
}

fn has_capture_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FILE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Capture files in `input_dir` (not recursive), sorted by name.
pub fn discover_sources(input_dir: &Path) -> Result<Vec<PathBuf>, InventoryError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(input_dir)
        .map_err(|e| {
            log::error!(
                "Unable to read input directory {}: {e}",
                input_dir.display()
            );
            InventoryError::NoCaptureSources(input_dir.display().to_string())
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_capture_extension(path))
        .collect();

    if paths.is_empty() {
        return Err(InventoryError::NoCaptureSources(format!(
            "{} ({})",
            input_dir.display(),
            FILE_EXTENSIONS.join(", ")
        )));
    }
    paths.sort();
    log::info!(
        "Found {} capture files in {}",
        paths.len(),
        input_dir.display()
    );
    Ok(paths)
}

fn decode(source_id: &str, bytes: Vec<u8>) -> Result<String, InventoryError> {
    String::from_utf8(bytes).map_err(|e| InventoryError::CaptureRead {
        source_id: source_id.to_string(),
        reason: e.to_string(),
    })
}

/// Read every capture of one file. Zip archives give one capture per file entry.
///
/// Unreadable or non UTF-8 entries end up in [`CaptureSource::failures`]; only a
/// file that cannot be opened at all is an error.
pub fn load_source(path: &Path) -> Result<CaptureSource, InventoryError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let site = site_name_from_path(path);
    log::info!("Loading {file_name}...");

    let mut source = CaptureSource {
        file_name: file_name.clone(),
        site: site.clone(),
        ..Default::default()
    };

    let is_zip = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false);

    if !is_zip {
        let bytes = std::fs::read(path).map_err(|e| InventoryError::CaptureRead {
            source_id: file_name.clone(),
            reason: e.to_string(),
        })?;
        match decode(&file_name, bytes) {
            Ok(text) => source
                .captures
                .push(Capture::new(&file_name, site.as_deref(), &text)),
            Err(e) => {
                log::warn!("{e}");
                source.failures.push(e.into());
            }
        }
        return Ok(source);
    }

    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Unable to read entry {i} of {file_name}: {e}");
                source.failures.push(CaptureFailure {
                    source_id: format!("{file_name}/#{i}"),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }
        let source_id = format!("{file_name}/{}", entry.name());
        let mut bytes = Vec::new();
        let text = entry
            .read_to_end(&mut bytes)
            .map_err(|e| InventoryError::CaptureRead {
                source_id: source_id.clone(),
                reason: e.to_string(),
            })
            .and_then(|_| decode(&source_id, bytes));
        match text {
            Ok(text) => source
                .captures
                .push(Capture::new(&source_id, site.as_deref(), &text)),
            Err(e) => {
                log::warn!("{e}");
                source.failures.push(e.into());
            }
        }
    }
    log::debug!("{file_name}: {} captures", source.captures.len());
    Ok(source)
}
