//! Command-line interface for smellcheck.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::detect::{scan_project, SmellThresholds};
use crate::parser;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_SMELLY: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Structural code smell detector for Python projects.
///
/// Smellcheck parses every Python source file under a path, walks the
/// syntax tree, and flags structural patterns associated with poor
/// maintainability: oversized classes, overlong methods and parameter
/// lists, deep attribute chains, wide inheritance lists, and bloated
/// lambdas and ternaries.
#[derive(Parser)]
#[command(name = "smellcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a file or directory for code smells
    #[command(visible_alias = "check")]
    Scan(ScanArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Path to scan (file or directory)
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Exit non-zero when any smell is found
    #[arg(long)]
    pub fail_on_smell: bool,
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    parser::init();

    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let thresholds = SmellThresholds::default();
    let result = match scan_project(&args.path, &thresholds) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&result)?,
        _ => report::write_pretty(&path_str, &result),
    }

    if args.fail_on_smell && result.total_smells > 0 {
        Ok(EXIT_SMELLY)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
