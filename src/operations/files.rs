//! Transcript discovery listing.

use std::path::Path;

use serde::Serialize;

use crate::config::ScanSettings;
use crate::error::Result;
use crate::ingest::scanner::{DiscoveredFile, Scanner};

/// Result of listing files.
#[derive(Debug, Clone, Serialize)]
pub struct FilesResult {
    pub files: Vec<DiscoveredFile>,
    pub summary: FilesSummary,
}

/// Summary of file listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilesSummary {
    pub total: usize,
    /// Files that `extract` would process.
    pub supported: usize,
    pub skipped: usize,
}

/// Filter options for listing files.
#[derive(Debug, Clone, Default)]
pub struct FilesFilter {
    /// Only include skipped files.
    pub skipped_only: bool,
    /// Only include transcript candidates.
    pub supported_only: bool,
}

/// List every file under `root`, marking transcript candidates.
pub fn list_files(
    root: &Path,
    settings: &ScanSettings,
    filter: &FilesFilter,
) -> Result<FilesResult> {
    let mut files = Scanner::new(root, settings).scan_all()?;

    if filter.skipped_only {
        files.retain(|f| !f.supported);
    }
    if filter.supported_only {
        files.retain(|f| f.supported);
    }

    let supported = files.iter().filter(|f| f.supported).count();
    let summary = FilesSummary {
        total: files.len(),
        supported,
        skipped: files.len() - supported,
    };

    Ok(FilesResult { files, summary })
}
