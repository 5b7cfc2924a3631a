//! RAW file scanner
//!
//! Walks a source folder and collects files whose extension is a known RAW
//! container format. Extension matching is case-insensitive; file contents are
//! never read here (ExifTool decides later whether a file is usable).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// RAW container extensions (lowercase)
pub const RAW_EXTENSIONS: &[&str] = &[
    "3fr", "ari", "arw", "bay", "cap", "cr2", "cr3", "crw", "data", "dcr", "dcs", "dng", "drf",
    "eip", "erf", "fff", "gpr", "iiq", "k25", "kdc", "mdc", "mef", "mos", "mrw", "nef", "nrw",
    "obm", "orf", "pef", "ptx", "pxn", "r3d", "raf", "raw", "rw2", "rwl", "rwz", "sr2", "srf",
    "srw", "tif", "x3f",
];

/// File scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Scan result with per-format counts
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// RAW file paths found, sorted
    pub files: Vec<PathBuf>,
    /// Count of files by extension (lowercase)
    pub by_format: BTreeMap<String, usize>,
    /// Entries that could not be read during traversal
    pub errors: Vec<String>,
}

/// RAW file scanner
pub struct FileScanner {
    ignore_patterns: Vec<String>,
    recursive: bool,
}

impl FileScanner {
    /// Create new recursive scanner with default ignore patterns
    ///
    /// Ignores system entries like .DS_Store, Thumbs.db and .git.
    pub fn new() -> Self {
        Self {
            ignore_patterns: vec![
                ".DS_Store".to_string(),
                "Thumbs.db".to_string(),
                ".git".to_string(),
            ],
            recursive: true,
        }
    }

    /// Descend into subdirectories (default) or only look at direct children
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Scan directory for RAW files
    pub fn scan(&self, root_path: &Path) -> Result<Vec<PathBuf>, ScanError> {
        Ok(self.scan_with_stats(root_path)?.files)
    }

    /// Scan directory for RAW files, keeping per-format counts and traversal errors
    pub fn scan_with_stats(&self, root_path: &Path) -> Result<ScanResult, ScanError> {
        if !root_path.exists() {
            return Err(ScanError::PathNotFound(root_path.to_path_buf()));
        }

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory(root_path.to_path_buf()));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .min_depth(1)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e));

        let mut result = ScanResult::default();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if let Some(ext) = raw_extension(entry.path()) {
                        *result.by_format.entry(ext).or_insert(0) += 1;
                        result.files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    // Unreadable subfolders are skipped, not fatal
                    tracing::warn!("Error accessing entry: {}", e);
                    result.errors.push(e.to_string());
                }
            }
        }

        result.files.sort();
        result.files.dedup();

        tracing::debug!(
            root = %root_path.display(),
            recursive = self.recursive,
            files = result.files.len(),
            by_format = ?result.by_format,
            "Scan complete"
        );

        Ok(result)
    }

    /// Check if entry should be processed
    fn should_process_entry(&self, entry: &DirEntry) -> bool {
        let file_name = entry.file_name().to_string_lossy();
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| file_name == pattern.as_str())
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase extension of `path` if it is a RAW format
fn raw_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    is_raw_extension(&ext).then_some(ext)
}

/// Check if a lowercase extension is a RAW format
pub fn is_raw_extension(ext: &str) -> bool {
    RAW_EXTENSIONS.contains(&ext)
}
