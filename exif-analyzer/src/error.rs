//! Error types for exif-analyzer
//!
//! Only the fatal conditions live here. A file whose extraction fails is not an
//! error at this level: it becomes an [`ExtractionFailure`](crate::models::ExtractionFailure)
//! and the run continues.

use std::path::PathBuf;
use thiserror::Error;

use crate::services::file_scanner::ScanError;

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Fatal analyzer errors
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Source directory does not exist
    #[error("Directory not found: {0}")]
    SourceNotFound(PathBuf),

    /// Source path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Metadata tool missing from PATH (or from the configured location)
    #[error("{tool} not found. Please install ExifTool (https://exiftool.org, or `brew install exiftool` / `apt install libimage-exiftool-perl`) or pass --exiftool <PATH>.")]
    ToolNotAvailable { tool: String },

    /// Metadata tool present but could not be executed at all
    #[error("Failed to run {tool}: {reason}")]
    ToolFailed { tool: String, reason: String },

    /// JSON export could not be written
    #[error("Failed to export report to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalyzerError {
    /// Process exit code for this error
    ///
    /// Missing-tool errors get their own code so wrapper scripts can tell
    /// "install ExifTool" apart from "wrong folder".
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalyzerError::ToolNotAvailable { .. } | AnalyzerError::ToolFailed { .. } => 2,
            _ => 1,
        }
    }
}

impl From<ScanError> for AnalyzerError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::PathNotFound(path) => AnalyzerError::SourceNotFound(path),
            ScanError::NotADirectory(path) => AnalyzerError::NotADirectory(path),
        }
    }
}
