//! The structural smell detectors.
//!
//! Each detector is a pure function over one node: it inspects the node's
//! shape against a threshold and either produces a finding or nothing.
//! Detectors share no state and never look at each other's results, so
//! the walker can apply them in any order.

use crate::ast::{structural_size, NodeKind, SourceText, SyntaxNode};

use super::snippet::extract_snippet;
use super::types::{SmellFinding, SmellType};

/// Tunable thresholds for the detector catalogue.
///
/// These are compiled-in constants of the product; the struct exists so
/// tests can probe boundaries without editing source.
#[derive(Debug, Clone)]
pub struct SmellThresholds {
    /// Class body member count at which a class is large (default: 200)
    pub large_class_members: usize,
    /// Attribute + method count above which a class is large, strictly
    /// greater-than (default: 40)
    pub large_class_attr_methods: usize,
    /// Declared parameter count at which a signature is long (default: 5)
    pub long_parameter_count: usize,
    /// Body statement count at which a method is long (default: 100)
    pub long_method_statements: usize,
    /// Attribute-access run length at which an expression statement is a
    /// long message chain (default: 4)
    pub message_chain_length: usize,
    /// Base class count at which an inheritance list is long (default: 3)
    pub base_class_count: usize,
    /// Structural size at which a lambda is long (default: 80)
    pub lambda_size: usize,
    /// Attribute-access run length in a callee at which a call is a long
    /// element chain (default: 3)
    pub element_chain_length: usize,
    /// Structural size at which a ternary is long (default: 40)
    pub ternary_size: usize,
}

impl Default for SmellThresholds {
    fn default() -> Self {
        Self {
            large_class_members: 200,
            large_class_attr_methods: 40,
            long_parameter_count: 5,
            long_method_statements: 100,
            message_chain_length: 4,
            base_class_count: 3,
            lambda_size: 80,
            element_chain_length: 3,
            ternary_size: 40,
        }
    }
}

/// A single smell detector: total, side-effect free, applicable-kind
/// checked inside.
pub type Detector = fn(&SyntaxNode, &SourceText, &SmellThresholds) -> Option<SmellFinding>;

/// The full detector catalogue, applied at every node in this order.
pub const DETECTORS: &[Detector] = &[
    detect_large_class,
    detect_long_parameter_list,
    detect_long_method,
    detect_long_message_chain,
    detect_long_base_class_list,
    detect_long_lambda_function,
    detect_long_element_chain,
    detect_long_ternary_conditional,
];

fn finding(smell: SmellType, node: &SyntaxNode) -> SmellFinding {
    SmellFinding {
        smell,
        line: node.start_line,
        snippet: None,
    }
}

fn finding_with_snippet(smell: SmellType, node: &SyntaxNode, source: &SourceText) -> SmellFinding {
    SmellFinding {
        smell,
        line: node.start_line,
        snippet: Some(extract_snippet(node, source)),
    }
}

/// Length of the leading run of attribute accesses, walking from the
/// value downward until a non-attribute node is reached.
///
/// The walk deliberately stops at the first interposed call, so
/// `a.b().c.d` counts 2, not 3. The maximal-chain alternative is a
/// different product behavior, not a fix.
fn attribute_chain_length(start: &SyntaxNode) -> usize {
    let mut length = 0;
    let mut current = start;
    while let NodeKind::Attribute { value, .. } = &current.kind {
        length += 1;
        current = value;
    }
    length
}

/// Large Class: too many body members, or too many attributes + methods.
pub fn detect_large_class(
    node: &SyntaxNode,
    source: &SourceText,
    thresholds: &SmellThresholds,
) -> Option<SmellFinding> {
    let NodeKind::ClassDef { body, .. } = &node.kind else {
        return None;
    };

    let members = body.len();
    let attributes = body
        .iter()
        .filter(|n| matches!(n.kind, NodeKind::Assign { .. }))
        .count();
    let methods = body
        .iter()
        .filter(|n| matches!(n.kind, NodeKind::FunctionDef { .. }))
        .count();

    if members >= thresholds.large_class_members
        || attributes + methods > thresholds.large_class_attr_methods
    {
        return Some(finding_with_snippet(SmellType::LargeClass, node, source));
    }
    None
}

/// Long Parameter List: too many declared parameters.
pub fn detect_long_parameter_list(
    node: &SyntaxNode,
    _source: &SourceText,
    thresholds: &SmellThresholds,
) -> Option<SmellFinding> {
    let NodeKind::FunctionDef { params, .. } = &node.kind else {
        return None;
    };
    if params.len() >= thresholds.long_parameter_count {
        return Some(finding(SmellType::LongParameterList, node));
    }
    None
}

/// Long Method: too many immediate body statements.
///
/// Immediate statements only; nested blocks are not flattened.
pub fn detect_long_method(
    node: &SyntaxNode,
    source: &SourceText,
    thresholds: &SmellThresholds,
) -> Option<SmellFinding> {
    let NodeKind::FunctionDef { body, .. } = &node.kind else {
        return None;
    };
    if body.len() >= thresholds.long_method_statements {
        return Some(finding_with_snippet(SmellType::LongMethod, node, source));
    }
    None
}

/// Long Message Chain: a deep attribute run in a bare expression statement.
pub fn detect_long_message_chain(
    node: &SyntaxNode,
    _source: &SourceText,
    thresholds: &SmellThresholds,
) -> Option<SmellFinding> {
    let NodeKind::ExprStmt { value } = &node.kind else {
        return None;
    };
    if attribute_chain_length(value) >= thresholds.message_chain_length {
        return Some(finding(SmellType::LongMessageChain, node));
    }
    None
}

/// Long Base Class List: too many declared base types.
pub fn detect_long_base_class_list(
    node: &SyntaxNode,
    source: &SourceText,
    thresholds: &SmellThresholds,
) -> Option<SmellFinding> {
    let NodeKind::ClassDef { bases, .. } = &node.kind else {
        return None;
    };
    if bases.len() >= thresholds.base_class_count {
        return Some(finding_with_snippet(
            SmellType::LongBaseClassList,
            node,
            source,
        ));
    }
    None
}

/// Long Lambda Function: a lambda whose structural size is excessive.
pub fn detect_long_lambda_function(
    node: &SyntaxNode,
    _source: &SourceText,
    thresholds: &SmellThresholds,
) -> Option<SmellFinding> {
    if !matches!(node.kind, NodeKind::Lambda { .. }) {
        return None;
    }
    if structural_size(node) >= thresholds.lambda_size {
        return Some(finding(SmellType::LongLambdaFunction, node));
    }
    None
}

/// Long Element Chain: a deep attribute run in a call's callee.
pub fn detect_long_element_chain(
    node: &SyntaxNode,
    _source: &SourceText,
    thresholds: &SmellThresholds,
) -> Option<SmellFinding> {
    let NodeKind::Call { callee, .. } = &node.kind else {
        return None;
    };
    if attribute_chain_length(callee) >= thresholds.element_chain_length {
        return Some(finding(SmellType::LongElementChain, node));
    }
    None
}

/// Long Ternary Conditional Expression: a ternary whose structural size
/// is excessive.
pub fn detect_long_ternary_conditional(
    node: &SyntaxNode,
    _source: &SourceText,
    thresholds: &SmellThresholds,
) -> Option<SmellFinding> {
    if !matches!(node.kind, NodeKind::Conditional { .. }) {
        return None;
    }
    if structural_size(node) >= thresholds.ternary_size {
        return Some(finding(SmellType::LongTernaryConditionalExpression, node));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, SourceText, SyntaxNode};

    fn empty_source() -> SourceText {
        SourceText::new("")
    }

    fn node(kind: NodeKind) -> SyntaxNode {
        SyntaxNode::new(kind, 1, Some(1))
    }

    fn name(id: &str) -> SyntaxNode {
        node(NodeKind::Name(id.into()))
    }

    fn assign() -> SyntaxNode {
        node(NodeKind::Assign {
            targets: vec![name("x")],
            value: Box::new(node(NodeKind::Literal("0".into()))),
        })
    }

    fn function(param_count: usize, statement_count: usize) -> SyntaxNode {
        node(NodeKind::FunctionDef {
            name: "f".into(),
            params: (0..param_count).map(|i| format!("p{}", i)).collect(),
            body: (0..statement_count).map(|_| name("stmt")).collect(),
        })
    }

    fn class(bases: usize, body: Vec<SyntaxNode>) -> SyntaxNode {
        node(NodeKind::ClassDef {
            name: "C".into(),
            bases: (0..bases).map(|i| name(&format!("B{}", i))).collect(),
            body,
        })
    }

    /// Build an attribute chain of the given length ending in a name.
    fn chain(length: usize) -> SyntaxNode {
        let mut current = name("root");
        for i in 0..length {
            current = node(NodeKind::Attribute {
                value: Box::new(current),
                attr: format!("a{}", i),
            });
        }
        current
    }

    #[test]
    fn test_long_parameter_list_boundary() {
        let thresholds = SmellThresholds::default();
        let source = empty_source();

        assert!(detect_long_parameter_list(&function(4, 0), &source, &thresholds).is_none());
        let hit = detect_long_parameter_list(&function(5, 0), &source, &thresholds)
            .expect("five parameters should fire");
        assert_eq!(hit.smell, SmellType::LongParameterList);
        assert!(hit.snippet.is_none());
    }

    #[test]
    fn test_long_method_boundary() {
        let thresholds = SmellThresholds::default();
        let source = empty_source();

        assert!(detect_long_method(&function(0, 99), &source, &thresholds).is_none());
        let hit = detect_long_method(&function(0, 100), &source, &thresholds)
            .expect("hundred statements should fire");
        assert_eq!(hit.smell, SmellType::LongMethod);
        assert!(hit.snippet.is_some());
    }

    #[test]
    fn test_large_class_member_count_boundary() {
        let thresholds = SmellThresholds::default();
        let source = empty_source();

        // Bare-name statements keep the attribute/method rule out of play.
        let body_199: Vec<SyntaxNode> = (0..199).map(|_| name("member")).collect();
        let body_200: Vec<SyntaxNode> = (0..200).map(|_| name("member")).collect();

        assert!(detect_large_class(&class(0, body_199), &source, &thresholds).is_none());
        let hit = detect_large_class(&class(0, body_200), &source, &thresholds)
            .expect("two hundred members should fire");
        assert_eq!(hit.smell, SmellType::LargeClass);
    }

    #[test]
    fn test_large_class_attr_method_boundary() {
        let thresholds = SmellThresholds::default();
        let source = empty_source();

        // The attribute + method rule is strictly greater-than.
        let body_40: Vec<SyntaxNode> = (0..40).map(|_| assign()).collect();
        let body_41: Vec<SyntaxNode> = (0..41).map(|_| assign()).collect();

        assert!(detect_large_class(&class(0, body_40), &source, &thresholds).is_none());
        assert!(detect_large_class(&class(0, body_41), &source, &thresholds).is_some());
    }

    #[test]
    fn test_large_class_counts_methods_and_attributes_together() {
        let thresholds = SmellThresholds::default();
        let source = empty_source();

        let mut body: Vec<SyntaxNode> = (0..21).map(|_| assign()).collect();
        body.extend((0..20).map(|_| function(0, 1)));
        assert!(detect_large_class(&class(0, body), &source, &thresholds).is_some());
    }

    #[test]
    fn test_message_chain_monotonic() {
        let thresholds = SmellThresholds::default();
        let source = empty_source();

        for n in 0..=10 {
            let stmt = node(NodeKind::ExprStmt {
                value: Box::new(chain(n)),
            });
            let fired = detect_long_message_chain(&stmt, &source, &thresholds).is_some();
            assert_eq!(fired, n >= 4, "chain of length {} misclassified", n);
        }
    }

    #[test]
    fn test_element_chain_boundary() {
        let thresholds = SmellThresholds::default();
        let source = empty_source();

        for n in 0..=6 {
            let call = node(NodeKind::Call {
                callee: Box::new(chain(n)),
                args: vec![],
            });
            let fired = detect_long_element_chain(&call, &source, &thresholds).is_some();
            assert_eq!(fired, n >= 3, "callee chain of length {} misclassified", n);
        }
    }

    #[test]
    fn test_chain_walk_stops_at_interposed_call() {
        // a.b().c.d -- the run from the top counts c and d, then hits the
        // call and stops.
        let inner_call = node(NodeKind::Call {
            callee: Box::new(chain(1)),
            args: vec![],
        });
        let mut chained = inner_call;
        for attr in ["c", "d"] {
            chained = node(NodeKind::Attribute {
                value: Box::new(chained),
                attr: attr.into(),
            });
        }
        assert_eq!(attribute_chain_length(&chained), 2);
    }

    #[test]
    fn test_long_base_class_list_boundary() {
        let thresholds = SmellThresholds::default();
        let source = empty_source();

        assert!(detect_long_base_class_list(&class(2, vec![]), &source, &thresholds).is_none());
        let hit = detect_long_base_class_list(&class(3, vec![]), &source, &thresholds)
            .expect("three bases should fire");
        assert!(hit.snippet.is_some());
    }

    #[test]
    fn test_lambda_size_threshold() {
        let source = empty_source();

        let tiny = node(NodeKind::Lambda {
            params: vec!["x".into()],
            body: Box::new(name("x")),
        });
        let big = node(NodeKind::Lambda {
            params: vec!["x".into(), "y".into(), "z".into()],
            body: Box::new(chain(8)),
        });

        let thresholds = SmellThresholds::default();
        assert!(detect_long_lambda_function(&tiny, &source, &thresholds).is_none());
        assert!(detect_long_lambda_function(&big, &source, &thresholds).is_some());

        // The metric itself, not the dump format, is the contract.
        assert!(structural_size(&tiny) < thresholds.lambda_size);
        assert!(structural_size(&big) >= thresholds.lambda_size);
    }

    #[test]
    fn test_ternary_size_threshold() {
        let source = empty_source();
        let ternary = node(NodeKind::Conditional {
            test: Box::new(name("flag")),
            then: Box::new(name("a")),
            orelse: Box::new(name("b")),
        });

        let thresholds = SmellThresholds::default();
        assert_eq!(
            detect_long_ternary_conditional(&ternary, &source, &thresholds).is_some(),
            structural_size(&ternary) >= thresholds.ternary_size
        );

        let relaxed = SmellThresholds {
            ternary_size: 10_000,
            ..Default::default()
        };
        assert!(detect_long_ternary_conditional(&ternary, &source, &relaxed).is_none());
    }

    #[test]
    fn test_detectors_ignore_foreign_kinds() {
        let thresholds = SmellThresholds::default();
        let source = empty_source();
        let stray = name("x");

        for detector in DETECTORS {
            assert!(detector(&stray, &source, &thresholds).is_none());
        }
    }
}
