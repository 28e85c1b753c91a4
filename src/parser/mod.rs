//! Python front end: parses source text and lowers the tree-sitter CST
//! into the closed [`SyntaxNode`] union.
//!
//! This is the engine's only parsing boundary. The lowering mirrors the
//! shape of Python's own syntax tree where the detectors depend on it:
//! decorated definitions unwrap to the definition itself, annotated and
//! augmented assignments are not plain assignments, and parameter counting
//! covers the plain positional parameter list only.

use once_cell::sync::OnceCell;
use tree_sitter::{Language, Node, Parser};

use crate::ast::{NodeKind, SourceText, SyntaxNode};

/// File extensions the front end recognizes as source files.
pub const SOURCE_EXTENSIONS: &[&str] = &["py"];

pub struct PythonParser {
    language: Language,
}

static PYTHON_PARSER: OnceCell<PythonParser> = OnceCell::new();

/// Initialize the front end.
///
/// Idempotent; call once at startup.
pub fn init() {
    PYTHON_PARSER.get_or_init(PythonParser::new);
}

fn get() -> &'static PythonParser {
    PYTHON_PARSER.get_or_init(PythonParser::new)
}

/// Parse a whole module into a structural tree.
///
/// Sources that do not parse cleanly are reported as errors; callers
/// absorb those per their own policy.
pub fn parse_module(source: &str) -> anyhow::Result<SyntaxNode> {
    get().parse_module(source)
}

/// Check whether the front end handles the given extension (without dot).
pub fn handles_extension(ext: &str) -> bool {
    SOURCE_EXTENSIONS.contains(&ext)
}

impl PythonParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    pub fn parse_module(&self, source: &str) -> anyhow::Result<SyntaxNode> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source.as_bytes(), None)
            .ok_or_else(|| anyhow::anyhow!("parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            anyhow::bail!("syntax error in source");
        }

        Ok(lower(root, source.as_bytes()))
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

fn node_text(node: Node, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or("").to_string()
}

fn field_text(node: Node, field: &str, src: &[u8]) -> String {
    node.child_by_field_name(field)
        .map(|n| node_text(n, src))
        .unwrap_or_default()
}

/// Lower every named child (comments excluded) in source order.
fn lower_children(node: Node, src: &[u8]) -> Vec<SyntaxNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .map(|c| lower(c, src))
        .collect()
}

/// Lower a `block` node into a statement sequence.
///
/// Comments are not statements; filtering them keeps body counts equal to
/// the number of actual statements.
fn lower_block(node: Node, src: &[u8]) -> Vec<SyntaxNode> {
    lower_children(node, src)
}

fn lower(node: Node, src: &[u8]) -> SyntaxNode {
    let start_line = node.start_position().row + 1;
    let end_line = Some(node.end_position().row + 1);

    let kind = match node.kind() {
        "module" => NodeKind::Module {
            body: lower_children(node, src),
        },
        "class_definition" => lower_class(node, src),
        "function_definition" => lower_function(node, src),
        "decorated_definition" => {
            // A decorated def is still a class/function definition, and the
            // definition's own line is the reported line.
            match node.child_by_field_name("definition") {
                Some(def) => return lower(def, src),
                None => NodeKind::Other {
                    children: lower_children(node, src),
                },
            }
        }
        "expression_statement" => lower_expression_statement(node, src),
        "lambda" => NodeKind::Lambda {
            params: node
                .child_by_field_name("parameters")
                .map(|p| lower_params(p, src))
                .unwrap_or_default(),
            body: Box::new(lower_field_or_empty(node, "body", src)),
        },
        "conditional_expression" => lower_conditional(node, src),
        "attribute" => NodeKind::Attribute {
            value: Box::new(lower_field_or_empty(node, "object", src)),
            attr: field_text(node, "attribute", src),
        },
        "call" => NodeKind::Call {
            callee: Box::new(lower_field_or_empty(node, "function", src)),
            args: node
                .child_by_field_name("arguments")
                .map(|a| match a.kind() {
                    "argument_list" => lower_children(a, src),
                    _ => vec![lower(a, src)],
                })
                .unwrap_or_default(),
        },
        "identifier" => NodeKind::Name(node_text(node, src)),
        "string" | "integer" | "float" | "true" | "false" | "none" => {
            NodeKind::Literal(node_text(node, src))
        }
        _ => NodeKind::Other {
            children: lower_children(node, src),
        },
    };

    SyntaxNode::new(kind, start_line, end_line)
}

fn lower_field_or_empty(node: Node, field: &str, src: &[u8]) -> SyntaxNode {
    match node.child_by_field_name(field) {
        Some(child) => lower(child, src),
        None => SyntaxNode::new(
            NodeKind::Other { children: vec![] },
            node.start_position().row + 1,
            Some(node.end_position().row + 1),
        ),
    }
}

fn lower_class(node: Node, src: &[u8]) -> NodeKind {
    let name = field_text(node, "name", src);
    // Keyword arguments in the superclass list (metaclass=...) are not
    // base types.
    let bases = node
        .child_by_field_name("superclasses")
        .map(|args| {
            let mut cursor = args.walk();
            args.named_children(&mut cursor)
                .filter(|c| !matches!(c.kind(), "comment" | "keyword_argument"))
                .map(|c| lower(c, src))
                .collect()
        })
        .unwrap_or_default();
    let body = node
        .child_by_field_name("body")
        .map(|b| lower_block(b, src))
        .unwrap_or_default();
    NodeKind::ClassDef { name, bases, body }
}

fn lower_function(node: Node, src: &[u8]) -> NodeKind {
    let name = field_text(node, "name", src);
    let params = node
        .child_by_field_name("parameters")
        .map(|p| lower_params(p, src))
        .unwrap_or_default();
    let body = node
        .child_by_field_name("body")
        .map(|b| lower_block(b, src))
        .unwrap_or_default();
    NodeKind::FunctionDef { name, params, body }
}

/// Collect the plain positional parameter names.
///
/// Counts what the declared-parameter threshold counts: plain, typed, and
/// defaulted positional parameters. `*args`, `**kwargs`, and everything
/// after a bare `*` are excluded; parameters before a `/` are
/// positional-only and excluded as well.
fn lower_params(params_node: Node, src: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = params_node.walk();

    for child in params_node.children(&mut cursor) {
        match child.kind() {
            "identifier" => names.push(node_text(child, src)),
            "typed_parameter" => match child.named_child(0) {
                Some(inner) if inner.kind() == "identifier" => {
                    names.push(node_text(inner, src));
                }
                Some(inner)
                    if matches!(
                        inner.kind(),
                        "list_splat_pattern" | "dictionary_splat_pattern"
                    ) =>
                {
                    break;
                }
                _ => {}
            },
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = child.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        names.push(node_text(name, src));
                    }
                }
            }
            "positional_separator" | "/" => names.clear(),
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" | "*" => {
                break;
            }
            _ => {}
        }
    }

    names
}

fn lower_expression_statement(node: Node, src: &[u8]) -> NodeKind {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment");

    let Some(first) = first else {
        return NodeKind::Other { children: vec![] };
    };

    match first.kind() {
        "assignment" => {
            // `x: T = v` is an annotated assignment, a different statement
            // shape from a plain one.
            if first.child_by_field_name("type").is_some() {
                return NodeKind::Other {
                    children: lower_children(first, src),
                };
            }
            let targets = first
                .child_by_field_name("left")
                .map(|t| vec![lower(t, src)])
                .unwrap_or_default();
            let value = Box::new(lower_field_or_empty(first, "right", src));
            NodeKind::Assign { targets, value }
        }
        "augmented_assignment" => NodeKind::Other {
            children: lower_children(first, src),
        },
        _ => NodeKind::ExprStmt {
            value: Box::new(lower(first, src)),
        },
    }
}

fn lower_conditional(node: Node, src: &[u8]) -> NodeKind {
    // Named children of `a if cond else b` are consequence, condition,
    // alternative in that order.
    let mut cursor = node.walk();
    let parts: Vec<Node> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect();

    if parts.len() == 3 {
        NodeKind::Conditional {
            then: Box::new(lower(parts[0], src)),
            test: Box::new(lower(parts[1], src)),
            orelse: Box::new(lower(parts[2], src)),
        }
    } else {
        NodeKind::Other {
            children: parts.into_iter().map(|c| lower(c, src)).collect(),
        }
    }
}

/// Parse and return the tree together with the line-indexed source.
pub fn parse_with_source(content: &str) -> anyhow::Result<(SyntaxNode, SourceText)> {
    let tree = parse_module(content)?;
    Ok((tree, SourceText::new(content)))
}
