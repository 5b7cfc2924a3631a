//! exif-analyzer library interface
//!
//! Scans a folder for camera RAW files, extracts shooting metadata with
//! ExifTool and summarizes equipment and exposure usage. The binary in
//! `main.rs` is a thin CLI over [`workflow::AnalysisWorkflow`] and
//! [`report`].

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod services;
pub mod workflow;

pub use crate::config::AnalyzerConfig;
pub use crate::error::{AnalyzerError, Result};
pub use crate::report::{AnalysisReport, ReportFormatter};
pub use crate::workflow::{AnalysisOutcome, AnalysisWorkflow, Discovery};
