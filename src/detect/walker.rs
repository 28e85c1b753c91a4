//! Full-tree traversal applying the detector catalogue at every node.

use crate::ast::{SourceText, SyntaxNode};

use super::smells::{SmellThresholds, DETECTORS};
use super::types::SmellFinding;

/// Walk the whole tree in pre-order, visiting each node exactly once and
/// applying every detector at each node.
///
/// Because the tree is produced in source order, pre-order traversal keeps
/// the findings for any one smell type in non-decreasing line order.
pub fn walk_tree(
    root: &SyntaxNode,
    source: &SourceText,
    thresholds: &SmellThresholds,
) -> Vec<SmellFinding> {
    let mut findings = Vec::new();
    visit(root, source, thresholds, &mut findings);
    findings
}

fn visit(
    node: &SyntaxNode,
    source: &SourceText,
    thresholds: &SmellThresholds,
    findings: &mut Vec<SmellFinding>,
) {
    for detector in DETECTORS {
        if let Some(finding) = detector(node, source, thresholds) {
            findings.push(finding);
        }
    }
    for child in node.children() {
        visit(child, source, thresholds, findings);
    }
}
