//! Smellcheck - structural code smell detection for Python projects.
//!
//! Smellcheck parses each source file into a structural tree, walks every
//! node, applies a battery of independent structural predicates, and
//! aggregates matches into a per-smell-type report with offending line
//! numbers and, where applicable, the exact source text of the offending
//! construct.
//!
//! # Architecture
//!
//! - `ast`: the closed syntax-node union and line-indexed source text
//! - `parser`: tree-sitter front end lowering Python source into `ast`
//! - `detect`: detectors, tree walker, snippet extraction, and the
//!   per-file/per-project aggregation
//! - `report`: output formatting (pretty, JSON)
//!
//! The engine is a pure library: no server state, no configuration files,
//! no environment variables. Detector thresholds are compiled-in constants
//! exposed as named fields of [`detect::SmellThresholds`].

pub mod ast;
pub mod cli;
pub mod detect;
pub mod parser;
pub mod report;

pub use ast::{structural_size, NodeKind, SourceText, SyntaxNode};
pub use detect::{
    analyze_file, analyze_source, scan_project, FileSmells, ProjectReport, ScanError,
    SmellEvidence, SmellFinding, SmellThresholds, SmellType,
};
pub use parser::{init as init_parser, parse_module};

/// Initialize all subsystems.
///
/// Call this once at startup.
pub fn init() {
    init_parser();
}
