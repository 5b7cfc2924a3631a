//! Data models for exif-analyzer
//!
//! - `FileRecord`: attributes extracted from one RAW file
//! - `ExtractionFailure`: a discovered file that could not be processed
//! - typed exposure values used as statistics categories

pub mod exif_values;
pub mod file_record;

pub use exif_values::{Aperture, FocalLength, Iso, ShutterSpeed};
pub use file_record::{ExtractionFailure, FileRecord};
