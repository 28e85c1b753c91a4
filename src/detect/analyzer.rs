//! Per-file analysis: parse, walk, and accumulate evidence.

use std::path::Path;

use crate::ast::SourceText;
use crate::parser;

use super::smells::SmellThresholds;
use super::types::{FileSmells, SmellEvidence};
use super::walker::walk_tree;

/// Analyze one file and return its smell map.
///
/// Failure is absorbed locally: a file that cannot be read, is not valid
/// UTF-8, or does not parse contributes an empty map and never aborts a
/// project scan.
pub fn analyze_file(path: &Path, thresholds: &SmellThresholds) -> FileSmells {
    let Ok(bytes) = std::fs::read(path) else {
        return FileSmells::new();
    };
    let Ok(content) = String::from_utf8(bytes) else {
        return FileSmells::new();
    };
    analyze_source(&content, thresholds)
}

/// Analyze already-loaded source text.
pub fn analyze_source(content: &str, thresholds: &SmellThresholds) -> FileSmells {
    let Ok(tree) = parser::parse_module(content) else {
        return FileSmells::new();
    };
    let source = SourceText::new(content);

    let mut smells = FileSmells::new();
    for finding in walk_tree(&tree, &source, thresholds) {
        smells
            .entry(finding.smell)
            .or_insert_with(|| SmellEvidence::new(source.lines().to_vec()))
            .record(finding);
    }
    smells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::types::{LineRange, SmellType};
    use std::io::Write;
    use tempfile::TempDir;

    fn thresholds() -> SmellThresholds {
        SmellThresholds::default()
    }

    #[test]
    fn test_analyze_source_collects_evidence() {
        let source = "\
def wide(a, b, c, d, e):
    pass

def wider(a, b, c, d, e, f):
    pass
";
        let smells = analyze_source(source, &thresholds());
        assert_eq!(smells.len(), 1);

        let evidence = &smells[&SmellType::LongParameterList];
        assert_eq!(evidence.lines, vec![1, 4]);
        assert_eq!(evidence.source_lines.len(), 5);
        assert!(evidence.range.is_none());
    }

    #[test]
    fn test_snippet_updates_to_latest_match() {
        let mut source = String::new();
        for c in ["First", "Second"] {
            source.push_str(&format!("class {}(A, B, C):\n    pass\n\n", c));
        }
        let smells = analyze_source(&source, &thresholds());

        let evidence = &smells[&SmellType::LongBaseClassList];
        assert_eq!(evidence.lines, vec![1, 4]);
        // Last-write-wins: the snippet belongs to the second class.
        assert_eq!(evidence.range, Some(LineRange { start: 4, end: 5 }));
        assert!(evidence.snippet_lines[0].contains("Second"));
    }

    #[test]
    fn test_syntax_error_yields_empty_map() {
        let smells = analyze_source("def broken(:\n    pass\n", &thresholds());
        assert!(smells.is_empty());
    }

    #[test]
    fn test_unreadable_file_yields_empty_map() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.py");
        assert!(analyze_file(&missing, &thresholds()).is_empty());
    }

    #[test]
    fn test_invalid_utf8_yields_empty_map() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("binary.py");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x80, 0x9f]).unwrap();

        assert!(analyze_file(&path, &thresholds()).is_empty());
    }

    #[test]
    fn test_analyze_file_matches_analyze_source() {
        let source = "def wide(a, b, c, d, e):\n    pass\n";
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wide.py");
        std::fs::write(&path, source).unwrap();

        assert_eq!(
            analyze_file(&path, &thresholds()),
            analyze_source(source, &thresholds())
        );
    }
}
