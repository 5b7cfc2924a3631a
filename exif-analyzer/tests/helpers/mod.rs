//! Test Helper Utilities
//!
//! Shared utilities for testing exif-analyzer

#![allow(dead_code)]

#[cfg(unix)]
pub mod fake_exiftool;
pub mod photo_library;

#[cfg(unix)]
pub use fake_exiftool::{install_failing_exiftool, install_fake_exiftool, install_vanishing_exiftool};
pub use photo_library::{write_photo, PhotoSpec};
