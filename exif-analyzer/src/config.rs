//! Configuration resolution for exif-analyzer
//!
//! Settings come from the command line, with environment variables as
//! fallback (clap handles both), then compiled defaults. There is no config
//! file. This module turns the raw values into an [`AnalyzerConfig`],
//! filling in auto-detected defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::services::exiftool_client::DEFAULT_BINARY;

/// Default per-file ExifTool timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Folder to scan
    pub source: PathBuf,
    /// Descend into subfolders
    pub recursive: bool,
    /// Concurrent ExifTool invocations (upper bound; never more than the file count)
    pub jobs: usize,
    /// Per-file ExifTool timeout
    pub timeout: Duration,
    /// ExifTool binary (name looked up in PATH, or explicit path)
    pub exiftool: PathBuf,
    /// Print every record
    pub show_details: bool,
    /// Print statistics tables
    pub show_stats: bool,
    /// Write a JSON report here
    pub export: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Defaults for scanning `source`: recursive, one job per CPU, 30 s timeout,
    /// `exiftool` from PATH, statistics only
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            recursive: true,
            jobs: resolve_jobs(None),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            exiftool: PathBuf::from(DEFAULT_BINARY),
            show_details: false,
            show_stats: true,
            export: None,
        }
    }
}

/// Resolve the worker count
///
/// **Priority:** explicit value → CPU core count. Zero counts as unset.
pub fn resolve_jobs(requested: Option<usize>) -> usize {
    match requested {
        Some(0) => {
            warn!("--jobs 0 is not valid, using CPU core count");
            resolve_jobs(None)
        }
        Some(jobs) => jobs,
        None => {
            let cpu_count = num_cpus::get().max(1);
            info!("Worker count not set, auto-detected: {} (CPU cores)", cpu_count);
            cpu_count
        }
    }
}

/// Resolve the per-file timeout, at least one second
pub fn resolve_timeout(seconds: u64) -> Duration {
    if seconds == 0 {
        warn!("Timeout of 0s is not valid, using 1s");
        return Duration::from_secs(1);
    }
    Duration::from_secs(seconds)
}

/// Resolve the folder to scan
///
/// **Priority:** command-line argument → folder containing the executable →
/// current directory. Relative paths are made absolute against the current
/// directory so log lines and messages show where the scan really happened.
pub fn resolve_source(cli_arg: Option<&Path>) -> PathBuf {
    let source = match cli_arg {
        Some(path) => path.to_path_buf(),
        None => default_source_dir(),
    };

    if source.is_absolute() {
        return source;
    }

    match std::env::current_dir() {
        Ok(cwd) => cwd.join(source),
        Err(e) => {
            warn!("Could not determine current directory: {}", e);
            source
        }
    }
}

/// Folder holding the running executable, or "." if unknown
fn default_source_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
