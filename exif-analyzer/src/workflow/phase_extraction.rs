//! Phase 2: EXTRACTING
//!
//! Reads metadata from every discovered file with at most `workers` ExifTool
//! processes alive at once, then computes statistics.
//!
//! Workers share nothing. Each one yields its file's result and the results
//! are reduced here, single-threaded, once the stream is drained.

use std::path::Path;
use std::time::Instant;

use futures::stream::{self, StreamExt};

use super::{AnalysisOutcome, AnalysisWorkflow, Discovery};
use crate::error::{AnalyzerError, Result};
use crate::models::{ExtractionFailure, FileRecord};
use crate::services::{ExifToolError, PhotoStatistics};

impl AnalysisWorkflow {
    /// Phase 2: EXTRACTING - extract every file in `discovery` and aggregate
    ///
    /// ExifTool is checked once up front so a missing install is reported as
    /// a single fatal error instead of one failure per file. After that, a
    /// file that fails is recorded in `failures` and the run continues.
    pub async fn phase_extraction(&self, discovery: &Discovery) -> Result<AnalysisOutcome> {
        let start_time = Instant::now();

        self.ensure_tool_available().await?;

        let workers = self.workers_for(discovery.len());
        let total_files = discovery.len();

        tracing::info!(
            files = total_files,
            workers = workers,
            timeout = ?self.config.timeout,
            "Phase 2: EXTRACTING"
        );

        let extractor = &self.extractor;
        let root = discovery.root.as_path();

        let results: Vec<(String, std::result::Result<FileRecord, ExifToolError>)> =
            stream::iter(discovery.files.iter())
                .map(|file| {
                    let display = display_path(root, file);
                    async move {
                        let result = extractor.extract(file, display.clone()).await;
                        (display, result)
                    }
                })
                .buffer_unordered(workers)
                .collect()
                .await;

        let mut records = Vec::with_capacity(results.len());
        let mut failures = Vec::new();

        for (path, result) in results {
            match result {
                Ok(record) => records.push(record),
                Err(ExifToolError::BinaryNotFound(tool)) => {
                    // Tool vanished after the version check
                    return Err(AnalyzerError::ToolNotAvailable { tool });
                }
                Err(e) => {
                    tracing::warn!(file = %path, error = %e, "Metadata extraction failed");
                    failures.push(ExtractionFailure {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        records.sort_by(|a, b| a.path.cmp(&b.path));
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        let stats = PhotoStatistics::from_records(&records);
        let elapsed = start_time.elapsed();

        tracing::info!(
            processed = records.len(),
            failed = failures.len(),
            elapsed = ?elapsed,
            "Extraction complete"
        );

        Ok(AnalysisOutcome {
            source: discovery.root.clone(),
            discovered: total_files,
            records,
            failures,
            workers,
            elapsed,
            stats,
        })
    }

    /// Run `exiftool -ver` once, mapping failure to a fatal error
    async fn ensure_tool_available(&self) -> Result<()> {
        let client = self.extractor.client();
        let tool = client.binary().display().to_string();

        match client.verify().await {
            Ok(version) => {
                tracing::info!(tool = %tool, version = %version, "ExifTool found");
                Ok(())
            }
            Err(ExifToolError::BinaryNotFound(_)) => Err(AnalyzerError::ToolNotAvailable { tool }),
            Err(e) => Err(AnalyzerError::ToolFailed {
                tool,
                reason: e.to_string(),
            }),
        }
    }
}

/// `file` relative to `root` for display, or the full path if outside it
fn display_path(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .display()
        .to_string()
}
