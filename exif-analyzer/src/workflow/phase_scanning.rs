//! Phase 1: SCANNING
//!
//! Discovers RAW files under the source folder. No file is opened here.

use super::{AnalysisWorkflow, Discovery};
use crate::error::Result;

impl AnalysisWorkflow {
    /// Phase 1: SCANNING - find RAW files under the configured source
    ///
    /// Fails only when the source is missing or not a directory. Unreadable
    /// subfolders are logged and skipped.
    pub fn phase_scanning(&self) -> Result<Discovery> {
        let root = self.config.source.clone();

        tracing::info!(
            root = %root.display(),
            recursive = self.config.recursive,
            "Phase 1: SCANNING"
        );

        let scan_result = self.scanner.scan_with_stats(&root)?;

        for error in &scan_result.errors {
            tracing::warn!(root = %root.display(), error = %error, "Skipped unreadable entry");
        }

        tracing::info!(
            files_found = scan_result.files.len(),
            formats = ?scan_result.by_format,
            "Scan complete"
        );

        Ok(Discovery {
            root,
            files: scan_result.files,
            by_format: scan_result.by_format,
        })
    }
}
