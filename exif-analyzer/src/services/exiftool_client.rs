//! ExifTool command-line client
//!
//! Runs `exiftool <file>` as a child process and returns its text output
//! (`Tag Name : value` lines). Parsing lives in
//! [`metadata_extractor`](super::metadata_extractor).
//!
//! One child per call, single attempt, bounded by a timeout. A child that
//! outlives the timeout is killed when its future is dropped.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Default binary name, resolved through PATH
pub const DEFAULT_BINARY: &str = "exiftool";

/// ExifTool client errors
#[derive(Debug, Error)]
pub enum ExifToolError {
    /// ExifTool binary not found
    #[error("ExifTool binary not found: {0}")]
    BinaryNotFound(String),

    /// Failed to spawn or wait for the child process
    #[error("Failed to execute ExifTool: {0}")]
    ExecutionError(String),

    /// ExifTool ran but reported an error for this file
    #[error("ExifTool failed: {0}")]
    AnalysisFailed(String),

    /// ExifTool output contained no tag lines
    #[error("Failed to parse ExifTool output: {0}")]
    ParseError(String),

    /// ExifTool did not finish in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Input file not found at path
    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// ExifTool client
#[derive(Debug, Clone)]
pub struct ExifToolClient {
    binary_path: PathBuf,
    timeout: Duration,
}

impl ExifToolClient {
    /// Create new client for `binary_path` with a per-invocation timeout
    pub fn new(binary_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary_path: binary_path.into(),
            timeout,
        }
    }

    /// Binary this client runs
    pub fn binary(&self) -> &Path {
        &self.binary_path
    }

    /// Check the binary is installed by asking for its version
    ///
    /// Returns the version string (e.g. "12.76").
    pub async fn verify(&self) -> Result<String, ExifToolError> {
        let mut command = Command::new(&self.binary_path);
        command.arg("-ver");

        let output = self.run(command).await?;
        if !output.status.success() {
            return Err(ExifToolError::ExecutionError(format!(
                "`{} -ver` exited with {:?}",
                self.binary_path.display(),
                output.status.code()
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!(binary = %self.binary_path.display(), version = %version, "ExifTool available");
        Ok(version)
    }

    /// Read all tags of `file` as ExifTool's human-readable text output
    pub async fn read_tags(&self, file: &Path) -> Result<String, ExifToolError> {
        if !file.exists() {
            return Err(ExifToolError::FileNotFound(file.display().to_string()));
        }

        let mut command = Command::new(&self.binary_path);
        command.arg(file);

        tracing::trace!(file = %file.display(), "Running ExifTool");

        let output = self.run(command).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExifToolError::AnalysisFailed(format!(
                "exit code {:?}: {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Spawn `command`, capture its output, enforce the timeout
    async fn run(&self, mut command: Command) -> Result<std::process::Output, ExifToolError> {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => Err(ExifToolError::BinaryNotFound(
                self.binary_path.display().to_string(),
            )),
            Ok(Err(e)) => Err(ExifToolError::ExecutionError(e.to_string())),
            Err(_) => Err(ExifToolError::Timeout(self.timeout)),
        }
    }
}

impl Default for ExifToolClient {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY, Duration::from_secs(30))
    }
}
