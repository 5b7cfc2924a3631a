//! EXIF Analyzer - Main entry point
//!
//! Scans a folder of RAW photos and prints camera, lens and exposure usage
//! statistics. Logs go to stderr; the report goes to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_analyzer::config::{self, AnalyzerConfig, DEFAULT_TIMEOUT_SECS};
use exif_analyzer::{
    AnalysisOutcome, AnalysisReport, AnalysisWorkflow, AnalyzerError, ReportFormatter,
};

/// Command-line arguments for exif-analyzer
#[derive(Parser, Debug)]
#[command(name = "exif-analyzer")]
#[command(about = "Analyze EXIF data of RAW photos and summarize camera, lens and exposure usage")]
#[command(version)]
struct Args {
    /// Folder to scan (default: the folder containing this executable)
    source: Option<PathBuf>,

    /// Show EXIF data of every file
    #[arg(short, long)]
    details: bool,

    /// Do not print statistics
    #[arg(long)]
    no_stats: bool,

    /// Only scan the top-level folder
    #[arg(long)]
    no_recursive: bool,

    /// Concurrent ExifTool processes (default: CPU core count)
    #[arg(short, long, env = "EXIF_ANALYZER_JOBS")]
    jobs: Option<usize>,

    /// Per-file ExifTool timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS, env = "EXIF_ANALYZER_TIMEOUT")]
    timeout: u64,

    /// ExifTool binary to run
    #[arg(long, value_name = "PATH", default_value = "exiftool", env = "EXIF_ANALYZER_EXIFTOOL")]
    exiftool: PathBuf,

    /// Export results to JSON file
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> AnalyzerConfig {
        AnalyzerConfig {
            source: config::resolve_source(self.source.as_deref()),
            recursive: !self.no_recursive,
            jobs: config::resolve_jobs(self.jobs),
            timeout: config::resolve_timeout(self.timeout),
            exiftool: self.exiftool,
            show_details: self.details,
            show_stats: !self.no_stats,
            export: self.export,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing on stderr so the report on stdout stays clean
    let default_filter = if args.verbose {
        "exif_analyzer=debug"
    } else {
        "exif_analyzer=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args.into_config())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = e
                .downcast_ref::<AnalyzerError>()
                .map_or(1, AnalyzerError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(config: AnalyzerConfig) -> Result<()> {
    println!("{}", ReportFormatter::format_banner());

    info!(
        source = %config.source.display(),
        jobs = config.jobs,
        timeout = ?config.timeout,
        exiftool = %config.exiftool.display(),
        "Starting analysis"
    );

    let workflow = AnalysisWorkflow::new(config);
    let config = workflow.config();

    let discovery = workflow.phase_scanning()?;
    println!("{}", ReportFormatter::format_discovery(&discovery));

    if discovery.is_empty() {
        return Ok(());
    }

    println!(
        "{}",
        ReportFormatter::format_processing_start(workflow.workers_for(discovery.len()))
    );

    let outcome = workflow.phase_extraction(&discovery).await?;
    print_report(config, &outcome);

    if let Some(path) = &config.export {
        AnalysisReport::new(&outcome).export_json(path)?;
        println!("Results exported to: {}", path.display());
    }

    Ok(())
}

fn print_report(config: &AnalyzerConfig, outcome: &AnalysisOutcome) {
    println!("\n{}\n", ReportFormatter::format_summary(outcome));
    print!("{}", ReportFormatter::format_failures(&outcome.failures));

    if outcome.records.is_empty() {
        println!(
            "No RAW image files with EXIF data found in {}",
            outcome.source.display()
        );
        return;
    }

    if config.show_details {
        print!("{}", ReportFormatter::format_details(&outcome.records));
    }

    if config.show_stats {
        print!("{}", ReportFormatter::format_statistics(&outcome.stats));
    }
}
