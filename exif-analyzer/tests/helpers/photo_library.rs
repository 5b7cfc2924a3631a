//! Fixture RAW files
//!
//! The fake ExifTool prints a file's contents as its tag output, so each
//! fixture file simply holds the `Tag Name : value` lines for that photo.

use std::fs;
use std::path::{Path, PathBuf};

/// Metadata of one fixture photo; `None` fields are left out of the output
#[derive(Debug, Clone, Default)]
pub struct PhotoSpec {
    pub camera: Option<&'static str>,
    pub lens: Option<&'static str>,
    pub iso: Option<u32>,
    pub shutter: Option<&'static str>,
    pub aperture: Option<f64>,
    pub focal_length: Option<f64>,
}

impl PhotoSpec {
    pub fn new(camera: &'static str, lens: &'static str, aperture: f64) -> Self {
        Self {
            camera: Some(camera),
            lens: Some(lens),
            iso: Some(400),
            shutter: Some("1/250"),
            aperture: Some(aperture),
            focal_length: Some(50.0),
        }
    }

    /// Tag lines as ExifTool prints them
    pub fn exif_text(&self) -> String {
        let mut lines = vec![
            "ExifTool Version Number         : 12.76".to_string(),
            "File Type                       : RAW".to_string(),
        ];
        if let Some(camera) = self.camera {
            lines.push(format!("Camera Model Name               : {}", camera));
        }
        if let Some(lens) = self.lens {
            lines.push(format!("Lens Model                      : {}", lens));
        }
        if let Some(iso) = self.iso {
            lines.push(format!("ISO                             : {}", iso));
        }
        if let Some(shutter) = self.shutter {
            lines.push(format!("Shutter Speed                   : {}", shutter));
        }
        if let Some(aperture) = self.aperture {
            lines.push(format!("F Number                        : {:.1}", aperture));
        }
        if let Some(focal_length) = self.focal_length {
            lines.push(format!("Focal Length                    : {:.1} mm", focal_length));
        }
        lines.join("\n") + "\n"
    }
}

/// Write a fixture photo at `dir/name`, creating parent folders
pub fn write_photo(dir: &Path, name: &str, spec: &PhotoSpec) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, spec.exif_text()).unwrap();
    path
}
