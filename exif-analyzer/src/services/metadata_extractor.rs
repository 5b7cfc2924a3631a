//! RAW metadata extraction service
//!
//! Turns ExifTool's text output into a [`FileRecord`].
//!
//! ExifTool prints one `Tag Name : value` line per tag. Only the tags listed
//! in [`ExifTag`] are used; everything else is ignored, and a missing or
//! unparseable value leaves the attribute absent.
//!
//! Several tags can carry the same attribute (Canon reports the lens as
//! "RF Lens Type", most other makers as "Lens ID" or "Lens Model"). Lens tags
//! are ranked and the most specific one wins wherever it appears in the
//! output; for the other attributes the first usable tag wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::exiftool_client::{ExifToolClient, ExifToolError};
use crate::models::{Aperture, FileRecord, FocalLength, Iso, ShutterSpeed};

static FIRST_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());
static FIRST_DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?|\.\d+)").unwrap());
static MILLIMETRES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*mm").unwrap());

/// ExifTool tag names the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExifTag {
    CameraModelName,
    CameraType2,
    RfLensType,
    LensId,
    LensType,
    LensModel,
    LensInfo,
    Iso,
    CameraIso,
    ShutterSpeed,
    ExposureTime,
    ShutterSpeedValue,
    Aperture,
    FNumber,
    ApertureValue,
    FocalLength,
    /// Any other tag; ignored
    Unrecognized,
}

impl ExifTag {
    /// Map an ExifTool tag name (as printed, e.g. "Lens ID") to a tag
    pub fn from_name(name: &str) -> Self {
        match name {
            "Camera Model Name" => ExifTag::CameraModelName,
            "Camera Type 2" => ExifTag::CameraType2,
            "RF Lens Type" => ExifTag::RfLensType,
            "Lens ID" => ExifTag::LensId,
            "Lens Type" => ExifTag::LensType,
            "Lens Model" => ExifTag::LensModel,
            "Lens Info" => ExifTag::LensInfo,
            "ISO" => ExifTag::Iso,
            "Camera ISO" => ExifTag::CameraIso,
            "Shutter Speed" => ExifTag::ShutterSpeed,
            "Exposure Time" => ExifTag::ExposureTime,
            "Shutter Speed Value" => ExifTag::ShutterSpeedValue,
            "Aperture" => ExifTag::Aperture,
            "F Number" => ExifTag::FNumber,
            "Aperture Value" => ExifTag::ApertureValue,
            "Focal Length" => ExifTag::FocalLength,
            _ => ExifTag::Unrecognized,
        }
    }

    /// Rank among lens tags, higher is more specific
    fn lens_priority(self) -> Option<u8> {
        match self {
            ExifTag::RfLensType => Some(5),
            ExifTag::LensId => Some(4),
            ExifTag::LensType => Some(3),
            ExifTag::LensModel => Some(2),
            ExifTag::LensInfo => Some(1),
            _ => None,
        }
    }
}

/// Split one output line into `(tag name, value)`
///
/// Only the first colon separates: values like "2024:05:01 10:00:00" keep theirs.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_integer(value: &str) -> Option<u32> {
    FIRST_INTEGER
        .captures(value)
        .and_then(|c| c[1].parse().ok())
}

/// ISO 0 is what some bodies write when the value is unknown
fn parse_iso(value: &str) -> Option<Iso> {
    parse_integer(value).filter(|&n| n > 0).map(Iso)
}

fn parse_decimal(value: &str) -> Option<f64> {
    FIRST_DECIMAL
        .captures(value)
        .and_then(|c| c[1].parse().ok())
}

fn parse_millimetres(value: &str) -> Option<f64> {
    MILLIMETRES
        .captures(value)
        .and_then(|c| c[1].parse().ok())
}

/// Parse ExifTool text output into a record for `path`
///
/// Returns a record even if nothing was recognized; callers decide whether an
/// empty record is acceptable.
pub fn parse_exif_output(output: &str, path: impl Into<String>) -> FileRecord {
    let mut record = FileRecord::new(path);
    let mut lens_priority = 0u8;

    for (name, value) in output.lines().filter_map(split_line) {
        if value.is_empty() {
            continue;
        }

        let tag = ExifTag::from_name(name);

        if let Some(priority) = tag.lens_priority() {
            if priority > lens_priority {
                record.lens = Some(value.to_string());
                lens_priority = priority;
            }
            continue;
        }

        match tag {
            ExifTag::CameraModelName | ExifTag::CameraType2 => {
                if record.camera.is_none() {
                    record.camera = Some(value.to_string());
                }
            }
            ExifTag::Iso => {
                if record.iso.is_none() {
                    record.iso = parse_iso(value);
                }
            }
            ExifTag::CameraIso => {
                // Olympus reports "Auto" here when the real value is elsewhere
                if record.iso.is_none() && !value.contains("Auto") {
                    record.iso = parse_iso(value);
                }
            }
            ExifTag::ShutterSpeed | ExifTag::ExposureTime | ExifTag::ShutterSpeedValue => {
                if record.shutter_speed.is_none() {
                    record.shutter_speed = ShutterSpeed::parse(value);
                }
            }
            ExifTag::Aperture | ExifTag::FNumber | ExifTag::ApertureValue => {
                if record.aperture.is_none() {
                    record.aperture = parse_decimal(value).and_then(Aperture::new);
                }
            }
            ExifTag::FocalLength => {
                if record.focal_length.is_none() {
                    record.focal_length = parse_millimetres(value).and_then(FocalLength::new);
                }
            }
            _ => {}
        }
    }

    record
}

/// Metadata extractor service
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    client: ExifToolClient,
}

impl MetadataExtractor {
    /// Create new metadata extractor backed by `client`
    pub fn new(client: ExifToolClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ExifToolClient {
        &self.client
    }

    /// Extract metadata from one RAW file
    ///
    /// `display_path` is what the record carries (normally the path relative
    /// to the scanned root).
    pub async fn extract(
        &self,
        file_path: &Path,
        display_path: String,
    ) -> Result<FileRecord, ExifToolError> {
        let output = self.client.read_tags(file_path).await?;

        if output.lines().filter_map(split_line).next().is_none() {
            return Err(ExifToolError::ParseError("no tag lines in output".to_string()));
        }

        let record = parse_exif_output(&output, display_path);

        tracing::debug!(
            file = %file_path.display(),
            camera = ?record.camera,
            lens = ?record.lens,
            iso = ?record.iso,
            aperture = ?record.aperture,
            "Extracted metadata"
        );

        Ok(record)
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new(ExifToolClient::default())
    }
}
