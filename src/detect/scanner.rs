//! Project-wide scanning: discover source files and fan out per-file
//! analysis.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::parser;

use super::analyzer::analyze_file;
use super::smells::SmellThresholds;
use super::types::{FileSmells, ProjectReport};

/// Fatal scan failures.
///
/// Per-file problems (unreadable, undecodable, unparsable) are absorbed by
/// the analyzer; the only structural failure is a root that is not there.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root {0:?} does not exist")]
    RootNotFound(PathBuf),
}

/// Collect every recognized source file reachable from the root, sorted
/// for deterministic scan and display order.
pub fn collect_source_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(parser::handles_extension)
        })
        .collect();
    files.sort();
    files
}

/// Scan a directory (or single file) and assemble the project report.
///
/// Files are mutually independent, so per-file analysis runs in parallel;
/// the order-preserving collect keeps the report deterministic. A root
/// with no eligible files yields an empty report, not an error.
pub fn scan_project(root: &Path, thresholds: &SmellThresholds) -> Result<ProjectReport, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let files = collect_source_files(root);
    let analyzed: Vec<(String, FileSmells)> = files
        .par_iter()
        .map(|path| {
            (
                path.to_string_lossy().to_string(),
                analyze_file(path, thresholds),
            )
        })
        .collect();

    let mut report = ProjectReport::new();
    for (path, smells) in analyzed {
        if smells.is_empty() {
            continue;
        }
        report.total_smells += smells.values().map(|e| e.lines.len()).sum::<usize>();
        report.files.insert(path, smells);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::types::SmellType;
    use std::io::Write;
    use tempfile::TempDir;

    const SMELLY: &str = "def wide(a, b, c, d, e, f):\n    pass\n";
    const CLEAN: &str = "def add(x, y):\n    return x + y\n";

    fn thresholds() -> SmellThresholds {
        SmellThresholds::default()
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nowhere");
        assert!(matches!(
            scan_project(&missing, &thresholds()),
            Err(ScanError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_empty_root_yields_empty_report() {
        let temp = TempDir::new().unwrap();
        let report = scan_project(temp.path(), &thresholds()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.total_smells, 0);
    }

    #[test]
    fn test_collect_recurses_and_filters_by_extension() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("pkg/sub")).unwrap();
        std::fs::write(temp.path().join("a.py"), CLEAN).unwrap();
        std::fs::write(temp.path().join("pkg/b.py"), CLEAN).unwrap();
        std::fs::write(temp.path().join("pkg/sub/c.py"), CLEAN).unwrap();
        std::fs::write(temp.path().join("pkg/readme.txt"), "not code").unwrap();
        std::fs::write(temp.path().join("pkg/lib.rs"), "fn main() {}").unwrap();

        let files = collect_source_files(temp.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.py", "b.py", "c.py"]);
    }

    #[test]
    fn test_clean_files_contribute_nothing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("clean.py"), CLEAN).unwrap();
        std::fs::write(temp.path().join("smelly.py"), SMELLY).unwrap();

        let report = scan_project(temp.path(), &thresholds()).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.total_smells, 1);

        let (path, smells) = report.files.iter().next().unwrap();
        assert!(path.ends_with("smelly.py"));
        assert!(smells.contains_key(&SmellType::LongParameterList));
    }

    #[test]
    fn test_broken_sibling_does_not_abort_scan() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("broken.py"), "def broken(:\n").unwrap();
        let mut binary = std::fs::File::create(temp.path().join("binary.py")).unwrap();
        binary.write_all(&[0xc0, 0xaf, 0xfe]).unwrap();
        std::fs::write(temp.path().join("smelly.py"), SMELLY).unwrap();

        let report = scan_project(temp.path(), &thresholds()).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.total_smells, 1);
    }

    #[test]
    fn test_total_counts_matches_not_types() {
        let temp = TempDir::new().unwrap();
        // Two long-parameter functions and one three-base class: three
        // matches over two smell types.
        let source = "\
def first(a, b, c, d, e):
    pass

def second(a, b, c, d, e):
    pass

class Wide(A, B, C):
    pass
";
        std::fs::write(temp.path().join("mixed.py"), source).unwrap();

        let report = scan_project(temp.path(), &thresholds()).unwrap();
        assert_eq!(report.total_smells, 3);

        let derived: usize = report
            .files
            .values()
            .flat_map(|smells| smells.values())
            .map(|evidence| evidence.lines.len())
            .sum();
        assert_eq!(report.total_smells, derived);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("nested")).unwrap();
        std::fs::write(temp.path().join("one.py"), SMELLY).unwrap();
        std::fs::write(temp.path().join("nested/two.py"), SMELLY).unwrap();
        std::fs::write(temp.path().join("clean.py"), CLEAN).unwrap();

        let first = scan_project(temp.path(), &thresholds()).unwrap();
        let second = scan_project(temp.path(), &thresholds()).unwrap();
        assert_eq!(first, second);
    }
}
