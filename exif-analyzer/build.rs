//! Build script for exif-analyzer
//!
//! Sets the values shown on the report banner's version line:
//! `GIT_HASH`, `BUILD_PROFILE` and `BUILD_TIMESTAMP`.

use std::process::Command;

/// Trimmed stdout of `git <args>`, if git ran and succeeded
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    let git_hash = git(&["rev-parse", "--short=8", "HEAD"]).unwrap_or_else(|| "unknown".into());
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".into());
    let built_at = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();

    for (key, value) in [
        ("GIT_HASH", git_hash),
        ("BUILD_PROFILE", profile),
        ("BUILD_TIMESTAMP", built_at),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }

    // No rerun-if-changed: rerun on every build so hash and time stay current
}
