//! Report generation and formatting
//!
//! Text output for the terminal ([`ReportFormatter`]) and the JSON export
//! ([`AnalysisReport`]). Everything here is pure formatting: functions return
//! `String`s and `main` decides where they go.

use std::collections::BTreeMap;
use std::fmt::{Display, Write as _};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{AnalyzerError, Result};
use crate::models::{ExtractionFailure, FileRecord};
use crate::services::statistics::{FrequencyTable, GroupedFrequencyTable, PhotoStatistics, TOP_N};
use crate::workflow::{AnalysisOutcome, Discovery};

pub const TOOL_NAME: &str = "EXIF Analyzer";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = "Javi Aparicio";
pub const COPYRIGHT: &str = "(c) 2025 Javi Aparicio - javiapariciofoto.ch";

/// Width of section separators
const RULE_WIDTH: usize = 80;
/// Width of names (camera, lens) in simple tables
const NAME_WIDTH: usize = 50;
/// Width of exposure values (aperture, speed, ...) in tables
const VALUE_WIDTH: usize = 15;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// CLI formatter for analysis results
pub struct ReportFormatter;

impl ReportFormatter {
    /// Tool identification block printed at startup
    pub fn format_banner() -> String {
        format!(
            "{rule}\n{TOOL_NAME}\nVersion {VERSION} (build {} {}, {})\nAuthor: {AUTHOR}\nCopyright: {COPYRIGHT}\n{rule}\n",
            env!("GIT_HASH"),
            env!("BUILD_PROFILE"),
            env!("BUILD_TIMESTAMP"),
            rule = rule(),
        )
    }

    /// Example: `Found 12 RAW file(s) in /photos`
    pub fn format_discovery(discovery: &Discovery) -> String {
        let mut line = format!(
            "Found {} RAW file(s) in {}",
            discovery.len(),
            discovery.root.display()
        );
        if discovery.by_format.len() > 1 {
            let formats: Vec<String> = discovery
                .by_format
                .iter()
                .map(|(ext, count)| format!("{}: {}", ext.to_uppercase(), count))
                .collect();
            let _ = write!(line, " ({})", formats.join(", "));
        }
        line
    }

    pub fn format_processing_start(workers: usize) -> String {
        format!("Processing files with {} worker(s)...", workers)
    }

    /// Processed/failed counts and elapsed time
    pub fn format_summary(outcome: &AnalysisOutcome) -> String {
        let mut out = format!(
            "Successfully processed {} file(s) with EXIF data in {:.1} seconds",
            outcome.processed(),
            outcome.elapsed.as_secs_f64()
        );
        if outcome.failed() > 0 {
            let _ = write!(
                out,
                "\n{} of {} file(s) could not be processed",
                outcome.failed(),
                outcome.discovered
            );
        }
        out
    }

    /// One line per failed file; empty string when nothing failed
    pub fn format_failures(failures: &[ExtractionFailure]) -> String {
        if failures.is_empty() {
            return String::new();
        }

        let mut out = format!("\n{}\nFAILED FILES\n{}\n", rule(), rule());
        for failure in failures {
            let _ = writeln!(out, "  {}: {}", failure.path, failure.reason);
        }
        out
    }

    /// Every record's attributes, `N/A` where absent
    pub fn format_details(records: &[FileRecord]) -> String {
        let mut out = format!("\n{}\nEXIF DATA ANALYSIS\n{}\n\n", rule(), rule());

        for (index, record) in records.iter().enumerate() {
            let _ = writeln!(out, "File {}: {}", index + 1, record.path);
            let _ = writeln!(out, "  Camera:       {}", or_na(record.camera.as_ref()));
            let _ = writeln!(out, "  Lens:         {}", or_na(record.lens.as_ref()));
            let _ = writeln!(out, "  ISO:          {}", or_na(record.iso.as_ref()));
            let _ = writeln!(out, "  Speed:        {}", or_na(record.shutter_speed.as_ref()));
            let _ = writeln!(out, "  Aperture:     {}", or_na(record.aperture.as_ref()));
            let _ = writeln!(out, "  Focal Length: {}", or_na(record.focal_length.as_ref()));
            out.push('\n');
        }

        out
    }

    /// Every statistics section; empty tables are left out
    pub fn format_statistics(stats: &PhotoStatistics) -> String {
        let mut out = format!("\n{}\nPHOTOGRAPHY STATISTICS\n{}\n\n", rule(), rule());
        let _ = writeln!(out, "Total Photos Analyzed: {}\n", stats.total_photos);

        section(&mut out, "CAMERA USAGE (Top 10)", &stats.cameras, NAME_WIDTH, "photos");
        section(&mut out, "LENS USAGE (Top 10)", &stats.lenses, NAME_WIDTH, "photos");
        grouped_section(
            &mut out,
            "APERTURE USAGE BY LENS (Top 10 per lens)",
            &stats.apertures_by_lens,
        );
        grouped_section(
            &mut out,
            "FOCAL LENGTH USAGE BY LENS (Top 10 per lens)",
            &stats.focal_lengths_by_lens,
        );
        section(&mut out, "ISO SENSITIVITY USAGE (Top 10)", &stats.iso_values, VALUE_WIDTH, "photos");
        section(&mut out, "SHUTTER SPEED USAGE (Top 10)", &stats.shutter_speeds, VALUE_WIDTH, "photos");
        section(&mut out, "OVERALL APERTURE USAGE (Top 10)", &stats.apertures, VALUE_WIDTH, "photos");
        section(
            &mut out,
            "OVERALL FOCAL LENGTH USAGE (Top 10)",
            &stats.focal_lengths,
            VALUE_WIDTH,
            "photos",
        );

        out
    }
}

fn or_na<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "N/A".to_string(), ToString::to_string)
}

/// `  rank. label  count unit (pct%)`
fn table_rows<K: Ord + Display>(
    out: &mut String,
    table: &FrequencyTable<K>,
    indent: &str,
    width: usize,
    unit: &str,
) {
    for entry in table.top(TOP_N) {
        let _ = writeln!(
            out,
            "{indent}{:>2}. {:<width$} {:>4} {unit} ({:5.1}%)",
            entry.rank,
            entry.value.to_string(),
            entry.count,
            entry.percentage,
        );
    }
}

fn section<K: Ord + Display>(
    out: &mut String,
    title: &str,
    table: &FrequencyTable<K>,
    width: usize,
    unit: &str,
) {
    if table.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}\n{}\n{}", rule(), title, rule());
    table_rows(out, table, "  ", width, unit);
    out.push('\n');
}

fn grouped_section<K: Ord + Display>(out: &mut String, title: &str, grouped: &GroupedFrequencyTable<K>) {
    if grouped.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}\n{}\n{}", rule(), title, rule());
    for (lens, table) in grouped.groups() {
        let _ = writeln!(out, "\n  {}\n  {}", lens, "-".repeat(RULE_WIDTH - 4));
        table_rows(out, table, "    ", VALUE_WIDTH, "times");
    }
    out.push('\n');
}

/// Complete analysis report for JSON export
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub session: SessionInfo,
    pub summary: RunSummary,
    pub failures: Vec<ExtractionFailure>,
    pub records: Vec<FileRecord>,
    pub statistics: StatisticsReport,
}

/// Run metadata
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    /// Report creation timestamp (RFC 3339)
    pub timestamp: String,
    /// Analyzer version
    pub version: String,
    /// Scanned folder
    pub source: String,
    /// Extraction phase duration in seconds
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub discovered: usize,
    pub processed: usize,
    pub failed: usize,
    pub workers: usize,
}

/// One ranked table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Full rankings (not truncated to the top 10)
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub total_photos: usize,
    pub cameras: Vec<RankedRow>,
    pub lenses: Vec<RankedRow>,
    pub iso: Vec<RankedRow>,
    pub shutter_speeds: Vec<RankedRow>,
    pub apertures: Vec<RankedRow>,
    pub focal_lengths: Vec<RankedRow>,
    pub apertures_by_lens: BTreeMap<String, Vec<RankedRow>>,
    pub focal_lengths_by_lens: BTreeMap<String, Vec<RankedRow>>,
}

fn ranked_rows<K: Ord + Display>(table: &FrequencyTable<K>) -> Vec<RankedRow> {
    table
        .ranked()
        .into_iter()
        .map(|entry| RankedRow {
            rank: entry.rank,
            value: entry.value.to_string(),
            count: entry.count,
            percentage: entry.percentage,
        })
        .collect()
}

fn grouped_rows<K: Ord + Display>(grouped: &GroupedFrequencyTable<K>) -> BTreeMap<String, Vec<RankedRow>> {
    grouped
        .groups()
        .map(|(lens, table)| (lens.to_string(), ranked_rows(table)))
        .collect()
}

impl From<&PhotoStatistics> for StatisticsReport {
    fn from(stats: &PhotoStatistics) -> Self {
        Self {
            total_photos: stats.total_photos,
            cameras: ranked_rows(&stats.cameras),
            lenses: ranked_rows(&stats.lenses),
            iso: ranked_rows(&stats.iso_values),
            shutter_speeds: ranked_rows(&stats.shutter_speeds),
            apertures: ranked_rows(&stats.apertures),
            focal_lengths: ranked_rows(&stats.focal_lengths),
            apertures_by_lens: grouped_rows(&stats.apertures_by_lens),
            focal_lengths_by_lens: grouped_rows(&stats.focal_lengths_by_lens),
        }
    }
}

impl AnalysisReport {
    /// Create a report from a finished run, timestamped now
    pub fn new(outcome: &AnalysisOutcome) -> Self {
        Self {
            session: SessionInfo {
                timestamp: chrono::Utc::now().to_rfc3339(),
                version: VERSION.to_string(),
                source: outcome.source.display().to_string(),
                duration_seconds: outcome.elapsed.as_secs_f64(),
            },
            summary: RunSummary {
                discovered: outcome.discovered,
                processed: outcome.processed(),
                failed: outcome.failed(),
                workers: outcome.workers,
            },
            failures: outcome.failures.clone(),
            records: outcome.records.clone(),
            statistics: StatisticsReport::from(&outcome.stats),
        }
    }

    /// Export report to a pretty-printed JSON file
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.write_json(path).map_err(|source| AnalyzerError::Export {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Report exported");
        Ok(())
    }

    fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
