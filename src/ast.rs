//! Syntax tree types shared by the parser and the detection engine.
//!
//! The front end lowers the concrete syntax tree into the closed
//! [`NodeKind`] union defined here, so detectors match exhaustively on the
//! discriminant instead of doing runtime kind checks. The tree is immutable
//! once produced and owned by the analysis of a single file.

use std::fmt;

/// A node in the parsed structural tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Start line, 1-indexed.
    pub start_line: usize,
    /// End line, 1-indexed, inclusive. `None` when the front end cannot
    /// supply one; consumers fall back to a start-line heuristic.
    pub end_line: Option<usize>,
}

/// The closed set of structural shapes the detectors inspect.
///
/// Constructs with no detector-relevant structure lower to [`NodeKind::Other`],
/// which keeps its children so a traversal still reaches every node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Whole-file module body.
    Module { body: Vec<SyntaxNode> },
    /// `class X(Base, ...): ...`
    ClassDef {
        name: String,
        bases: Vec<SyntaxNode>,
        body: Vec<SyntaxNode>,
    },
    /// `def f(a, b): ...`
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<SyntaxNode>,
    },
    /// `lambda a, b: expr`
    Lambda {
        params: Vec<String>,
        body: Box<SyntaxNode>,
    },
    /// `a if cond else b`
    Conditional {
        test: Box<SyntaxNode>,
        then: Box<SyntaxNode>,
        orelse: Box<SyntaxNode>,
    },
    /// `value.attr`
    Attribute {
        value: Box<SyntaxNode>,
        attr: String,
    },
    /// `callee(args...)`
    Call {
        callee: Box<SyntaxNode>,
        args: Vec<SyntaxNode>,
    },
    /// A statement consisting of a bare expression.
    ExprStmt { value: Box<SyntaxNode> },
    /// Plain (unannotated) assignment statement.
    Assign {
        targets: Vec<SyntaxNode>,
        value: Box<SyntaxNode>,
    },
    /// Identifier reference.
    Name(String),
    /// Literal token (string, number, bool, None).
    Literal(String),
    /// Any other construct; children are kept for traversal.
    Other { children: Vec<SyntaxNode> },
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, start_line: usize, end_line: Option<usize>) -> Self {
        Self {
            kind,
            start_line,
            end_line,
        }
    }

    /// The node's immediate children, in source order.
    pub fn children(&self) -> Vec<&SyntaxNode> {
        match &self.kind {
            NodeKind::Module { body } => body.iter().collect(),
            NodeKind::ClassDef { bases, body, .. } => bases.iter().chain(body.iter()).collect(),
            NodeKind::FunctionDef { body, .. } => body.iter().collect(),
            NodeKind::Lambda { body, .. } => vec![body],
            NodeKind::Conditional { test, then, orelse } => vec![test, then, orelse],
            NodeKind::Attribute { value, .. } => vec![value],
            NodeKind::Call { callee, args } => {
                std::iter::once(&**callee).chain(args.iter()).collect()
            }
            NodeKind::ExprStmt { value } => vec![value],
            NodeKind::Assign { targets, value } => {
                targets.iter().chain(std::iter::once(&**value)).collect()
            }
            NodeKind::Name(_) | NodeKind::Literal(_) => Vec::new(),
            NodeKind::Other { children } => children.iter().collect(),
        }
    }

    /// Canonical textual rendering of the subtree.
    ///
    /// The exact format is not a contract; it only has to be deterministic
    /// and grow with subtree size so [`structural_size`] can compare against
    /// thresholds.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

struct DumpList<'a>(&'a [SyntaxNode]);

impl fmt::Display for DumpList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Module { body } => write!(f, "Module(body={})", DumpList(body)),
            NodeKind::ClassDef { name, bases, body } => write!(
                f,
                "ClassDef(name={:?}, bases={}, body={})",
                name,
                DumpList(bases),
                DumpList(body)
            ),
            NodeKind::FunctionDef { name, params, body } => write!(
                f,
                "FunctionDef(name={:?}, params={:?}, body={})",
                name,
                params,
                DumpList(body)
            ),
            NodeKind::Lambda { params, body } => {
                write!(f, "Lambda(params={:?}, body={})", params, body)
            }
            NodeKind::Conditional { test, then, orelse } => write!(
                f,
                "Conditional(test={}, then={}, orelse={})",
                test, then, orelse
            ),
            NodeKind::Attribute { value, attr } => {
                write!(f, "Attribute(value={}, attr={:?})", value, attr)
            }
            NodeKind::Call { callee, args } => {
                write!(f, "Call(callee={}, args={})", callee, DumpList(args))
            }
            NodeKind::ExprStmt { value } => write!(f, "Expr(value={})", value),
            NodeKind::Assign { targets, value } => {
                write!(f, "Assign(targets={}, value={})", DumpList(targets), value)
            }
            NodeKind::Name(id) => write!(f, "Name({:?})", id),
            NodeKind::Literal(text) => write!(f, "Literal({:?})", text),
            NodeKind::Other { children } => write!(f, "Node({})", DumpList(children)),
        }
    }
}

/// Structural-complexity proxy: the byte length of the node's canonical
/// dump. Deterministic and monotonic in subtree size, which is all the
/// threshold comparisons require.
pub fn structural_size(node: &SyntaxNode) -> usize {
    node.dump().len()
}

/// The original file content as an ordered sequence of lines.
///
/// Line indexing is 1-based everywhere in the engine. Shared read-only by
/// the walker and the snippet extractor during one file's analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    pub fn new(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Slice of lines covering the inclusive 1-based range, clamped to the
    /// file's bounds.
    pub fn slice(&self, start: usize, end: usize) -> &[String] {
        let lo = start.saturating_sub(1).min(self.lines.len());
        let hi = end.clamp(lo, self.lines.len());
        &self.lines[lo..hi]
    }
}
