//! Output formatting for smellcheck results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use std::collections::BTreeMap;

use colored::*;
use serde::{Deserialize, Serialize};

use crate::detect::{ProjectReport, SmellEvidence, SmellType};

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub total_smells: usize,
    pub smell_breakdown: BTreeMap<String, Vec<SmellRecord>>,
}

/// One (file, smell type) record in the breakdown.
#[derive(Serialize, Deserialize)]
pub struct SmellRecord {
    pub file: String,
    pub lines: Vec<usize>,
    /// Full original source lines of the file.
    pub file_content: Vec<String>,
    /// Snippet lines of the offending construct; empty when the smell
    /// type carries no snippet.
    pub full_code: Vec<String>,
    pub range: RangeField,
}

/// Snippet range; both bounds are null when no snippet was extracted.
#[derive(Serialize, Deserialize)]
pub struct RangeField {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// Build the wire-shaped report from the internal project report.
pub fn build_json(report: &ProjectReport) -> JsonReport {
    let mut breakdown: BTreeMap<String, Vec<SmellRecord>> = BTreeMap::new();

    for (file, smells) in &report.files {
        for (smell, evidence) in smells {
            breakdown
                .entry(smell.as_str().to_string())
                .or_default()
                .push(evidence_to_record(file, evidence));
        }
    }

    JsonReport {
        total_smells: report.total_smells,
        smell_breakdown: breakdown,
    }
}

fn evidence_to_record(file: &str, evidence: &SmellEvidence) -> SmellRecord {
    SmellRecord {
        file: file.to_string(),
        lines: evidence.lines.clone(),
        file_content: evidence.source_lines.clone(),
        full_code: evidence.snippet_lines.clone(),
        range: match evidence.range {
            Some(range) => RangeField {
                start: Some(range.start),
                end: Some(range.end),
            },
            None => RangeField {
                start: None,
                end: None,
            },
        },
    }
}

/// Write results in JSON format to stdout.
pub fn write_json(report: &ProjectReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&build_json(report))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, report: &ProjectReport) {
    // Header
    println!();
    print!("  ");
    print!("{}", "smellcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    println!();

    if report.total_smells == 0 {
        println!("  {}", "✓ no code smells detected".green());
        println!();
        return;
    }

    let file_count = report.files.len();
    println!(
        "  {} {} across {} file{}",
        "✗".red(),
        format!(
            "{} smell{}",
            report.total_smells,
            plural(report.total_smells)
        )
        .red()
        .bold(),
        file_count,
        plural(file_count),
    );
    println!();

    for (smell, occurrences) in group_by_type(report) {
        let matches: usize = occurrences.iter().map(|(_, e)| e.lines.len()).sum();
        println!("  {} ({}):", smell.as_str().bold(), matches);

        for (file, evidence) in occurrences {
            print!("    {}", file.blue());
            println!("{}", format!(":{}", join_lines(&evidence.lines)).dimmed());
            if let Some(range) = evidence.range {
                println!(
                    "      {}",
                    format!("snippet: lines {}-{}", range.start, range.end).dimmed()
                );
            }
        }
        println!();
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Regroup the per-file report by smell type for display.
fn group_by_type(report: &ProjectReport) -> BTreeMap<SmellType, Vec<(&String, &SmellEvidence)>> {
    let mut grouped: BTreeMap<SmellType, Vec<(&String, &SmellEvidence)>> = BTreeMap::new();
    for (file, smells) in &report.files {
        for (smell, evidence) in smells {
            grouped.entry(*smell).or_default().push((file, evidence));
        }
    }
    grouped
}
