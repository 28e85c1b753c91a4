//! Detection engine: detectors, walker, snippet extraction, and
//! per-file/per-project aggregation.

mod analyzer;
mod scanner;
mod smells;
mod snippet;
mod types;
mod walker;

pub use analyzer::{analyze_file, analyze_source};
pub use scanner::{collect_source_files, scan_project, ScanError};
pub use smells::{
    detect_large_class, detect_long_base_class_list, detect_long_element_chain,
    detect_long_lambda_function, detect_long_message_chain, detect_long_method,
    detect_long_parameter_list, detect_long_ternary_conditional, Detector, SmellThresholds,
    DETECTORS,
};
pub use snippet::extract_snippet;
pub use types::{
    FileSmells, LineRange, ProjectReport, SmellEvidence, SmellFinding, SmellType, Snippet,
};
pub use walker::walk_tree;
