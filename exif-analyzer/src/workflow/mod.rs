//! Analysis workflow
//!
//! Drives one run from folder to statistics:
//!
//! 1. SCANNING (`phase_scanning`): discover RAW files under the source folder
//! 2. EXTRACTING (`phase_extraction`): read metadata from every file with a
//!    bounded pool of concurrent ExifTool processes, then compute statistics
//!
//! The phases are public so the binary can report progress between them;
//! [`AnalysisWorkflow::run`] chains both.

mod phase_extraction;
mod phase_scanning;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::models::{ExtractionFailure, FileRecord};
use crate::services::{ExifToolClient, FileScanner, MetadataExtractor, PhotoStatistics};

/// Result of the SCANNING phase
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Scanned root folder
    pub root: PathBuf,
    /// RAW files found, sorted
    pub files: Vec<PathBuf>,
    /// Files per extension (lowercase)
    pub by_format: BTreeMap<String, usize>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub source: PathBuf,
    /// Files discovered by the scan
    pub discovered: usize,
    /// Successfully extracted records, sorted by path
    pub records: Vec<FileRecord>,
    /// Files that could not be processed, sorted by path
    pub failures: Vec<ExtractionFailure>,
    /// Concurrent ExifTool processes actually used
    pub workers: usize,
    /// Wall-clock time of the extraction phase
    pub elapsed: Duration,
    pub stats: PhotoStatistics,
}

impl AnalysisOutcome {
    /// Outcome of a run that found nothing to process
    pub fn empty(source: PathBuf) -> Self {
        Self {
            source,
            discovered: 0,
            records: Vec::new(),
            failures: Vec::new(),
            workers: 0,
            elapsed: Duration::ZERO,
            stats: PhotoStatistics::default(),
        }
    }

    pub fn processed(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Scan + extract + aggregate for one source folder
pub struct AnalysisWorkflow {
    config: AnalyzerConfig,
    scanner: FileScanner,
    extractor: MetadataExtractor,
}

impl AnalysisWorkflow {
    pub fn new(config: AnalyzerConfig) -> Self {
        let scanner = FileScanner::new().recursive(config.recursive);
        let client = ExifToolClient::new(config.exiftool.clone(), config.timeout);

        Self {
            config,
            scanner,
            extractor: MetadataExtractor::new(client),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Worker count for `file_count` files: the configured jobs, never more
    /// than there are files and never less than one
    pub fn workers_for(&self, file_count: usize) -> usize {
        self.config.jobs.clamp(1, file_count.max(1))
    }

    /// Run both phases
    ///
    /// An empty folder is not an error: the outcome has `discovered == 0` and
    /// ExifTool is never invoked.
    pub async fn run(&self) -> Result<AnalysisOutcome> {
        let discovery = self.phase_scanning()?;

        if discovery.is_empty() {
            return Ok(AnalysisOutcome::empty(discovery.root));
        }

        self.phase_extraction(&discovery).await
    }
}
