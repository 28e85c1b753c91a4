//! Core types for smell detection results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The catalogue of structural smells the engine reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SmellType {
    #[serde(rename = "Large Class")]
    LargeClass,
    #[serde(rename = "Long Parameter List")]
    LongParameterList,
    #[serde(rename = "Long Method")]
    LongMethod,
    #[serde(rename = "Long Message Chain")]
    LongMessageChain,
    #[serde(rename = "Long Base Class List")]
    LongBaseClassList,
    #[serde(rename = "Long Lambda Function")]
    LongLambdaFunction,
    #[serde(rename = "Long Element Chain")]
    LongElementChain,
    #[serde(rename = "Long Ternary Conditional Expression")]
    LongTernaryConditionalExpression,
}

impl SmellType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmellType::LargeClass => "Large Class",
            SmellType::LongParameterList => "Long Parameter List",
            SmellType::LongMethod => "Long Method",
            SmellType::LongMessageChain => "Long Message Chain",
            SmellType::LongBaseClassList => "Long Base Class List",
            SmellType::LongLambdaFunction => "Long Lambda Function",
            SmellType::LongElementChain => "Long Element Chain",
            SmellType::LongTernaryConditionalExpression => "Long Ternary Conditional Expression",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Large Class" => Some(SmellType::LargeClass),
            "Long Parameter List" => Some(SmellType::LongParameterList),
            "Long Method" => Some(SmellType::LongMethod),
            "Long Message Chain" => Some(SmellType::LongMessageChain),
            "Long Base Class List" => Some(SmellType::LongBaseClassList),
            "Long Lambda Function" => Some(SmellType::LongLambdaFunction),
            "Long Element Chain" => Some(SmellType::LongElementChain),
            "Long Ternary Conditional Expression" => {
                Some(SmellType::LongTernaryConditionalExpression)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for SmellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive 1-based line range of a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

/// The exact source text of the construct that triggered a finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub lines: Vec<String>,
    pub range: LineRange,
}

/// One detector match on one node.
#[derive(Debug, Clone)]
pub struct SmellFinding {
    pub smell: SmellType,
    /// Start line of the triggering node.
    pub line: usize,
    /// Present only for smell types that support snippet extraction.
    pub snippet: Option<Snippet>,
}

/// Aggregated record for one (file, smell type) pair.
///
/// Created on the first finding of a type in a file, updated by every
/// later finding of the same type, frozen when the file's traversal ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmellEvidence {
    /// Triggering start lines in traversal order; duplicates allowed.
    pub lines: Vec<usize>,
    /// Source lines of the latest snippet-bearing match; empty for smell
    /// types without snippets.
    pub snippet_lines: Vec<String>,
    /// Line range of that snippet.
    pub range: Option<LineRange>,
    /// The full file's lines, retained for context rendering.
    pub source_lines: Vec<String>,
}

impl SmellEvidence {
    pub fn new(source_lines: Vec<String>) -> Self {
        Self {
            lines: Vec::new(),
            snippet_lines: Vec::new(),
            range: None,
            source_lines,
        }
    }

    /// Fold one finding into the evidence. Snippet fields are
    /// last-write-wins across findings of the same type.
    pub fn record(&mut self, finding: SmellFinding) {
        self.lines.push(finding.line);
        if let Some(snippet) = finding.snippet {
            self.snippet_lines = snippet.lines;
            self.range = Some(snippet.range);
        }
    }
}

/// Per-file mapping from smell type to accumulated evidence.
pub type FileSmells = BTreeMap<SmellType, SmellEvidence>;

/// Project-wide results: per-file smell maps plus the total match count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectReport {
    pub files: BTreeMap<String, FileSmells>,
    /// Total number of detector matches across all files and types.
    pub total_smells: usize,
}

impl ProjectReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
