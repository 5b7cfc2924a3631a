//! Per-file metadata record and per-file failure marker

use serde::Serialize;

use super::exif_values::{Aperture, FocalLength, Iso, ShutterSpeed};

/// Metadata extracted from one RAW file
///
/// Every attribute is optional: a file that lacks a tag simply has `None`
/// there and is left out of that attribute's statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    /// Path relative to the scanned root
    pub path: String,

    /// Camera model name
    pub camera: Option<String>,

    /// Lens name as reported by the camera (not normalized)
    pub lens: Option<String>,

    /// ISO sensitivity
    pub iso: Option<Iso>,

    /// Shutter speed / exposure time
    pub shutter_speed: Option<ShutterSpeed>,

    /// Aperture (f-number)
    pub aperture: Option<Aperture>,

    /// Focal length in millimetres
    pub focal_length: Option<FocalLength>,
}

impl FileRecord {
    /// Empty record for `path`, every attribute absent
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            camera: None,
            lens: None,
            iso: None,
            shutter_speed: None,
            aperture: None,
            focal_length: None,
        }
    }

    /// True when no recognized attribute was found
    pub fn is_empty(&self) -> bool {
        self.camera.is_none()
            && self.lens.is_none()
            && self.iso.is_none()
            && self.shutter_speed.is_none()
            && self.aperture.is_none()
            && self.focal_length.is_none()
    }
}

/// A file that was discovered but could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionFailure {
    /// Path relative to the scanned root
    pub path: String,
    /// Human-readable reason (exit status, timeout, ...)
    pub reason: String,
}
