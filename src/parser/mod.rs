use crate::define_parser;
use crate::model::{Position, Span};
use std::path::Path;
use thiserror::Error;
use tree_sitter::{Node, Tree};

define_parser!(TS_PARSER, tree_sitter_typescript::LANGUAGE_TYPESCRIPT);
define_parser!(TSX_PARSER, tree_sitter_typescript::LANGUAGE_TSX);

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{message} at ({position})")]
    Syntax { message: String, position: Position },
    #[error("Parser produced no tree")]
    NoTree,
}

/// Which grammar to parse with. JSX syntax needs the TSX grammar; plain
/// TypeScript is a superset of JavaScript so everything else goes through it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    #[default]
    TypeScript,
    Tsx,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx") | Some("jsx") => Dialect::Tsx,
            _ => Dialect::TypeScript,
        }
    }
}

/// One submission's source text, with the line split kept around so the
/// reporter can quote the offending lines. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    text: String,
    lines: Vec<String>,
}

impl SourceUnit {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        Self { text, lines }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Fetch a source line by 1-based number.
    pub fn line(&self, number: usize) -> Option<&str> {
        self.lines.get(number.checked_sub(1)?).map(String::as_str)
    }
}

/// Parse a source unit, surfacing tree-sitter's error recovery as a hard
/// failure: submissions that do not parse cleanly are never rule-checked.
pub fn parse(source: &SourceUnit, dialect: Dialect) -> Result<Tree, ParseError> {
    let tree = match dialect {
        Dialect::TypeScript => TS_PARSER.with(|p| p.borrow_mut().parse(source.text(), None)),
        Dialect::Tsx => TSX_PARSER.with(|p| p.borrow_mut().parse(source.text(), None)),
    }
    .ok_or(ParseError::NoTree)?;

    let root = tree.root_node();
    if root.has_error() {
        let (message, position) = describe_first_error(root, source);
        return Err(ParseError::Syntax { message, position });
    }

    Ok(tree)
}

/// Convert a node's tree-sitter points (0-based rows) into a report span
/// (1-based lines, 0-based end-exclusive columns).
pub fn node_span(node: &Node) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span {
        start: Position {
            line: start.row + 1,
            column: start.column,
        },
        end: Position {
            line: end.row + 1,
            column: end.column,
        },
    }
}

fn describe_first_error(root: Node, source: &SourceUnit) -> (String, Position) {
    let node = first_error_node(root).unwrap_or(root);
    let position = node_span(&node).start;

    let message = if node.is_missing() {
        format!("Missing '{}'", node.kind())
    } else {
        let text: String = node
            .utf8_text(source.as_bytes())
            .unwrap_or("")
            .chars()
            .take_while(|c| *c != '\n')
            .take(24)
            .collect();
        if text.is_empty() {
            "Unexpected token".to_string()
        } else {
            format!("Unexpected token '{}'", text)
        }
    };

    (message, position)
}

fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    None
}

/// Macro to define a thread-local parser with a given language.
/// Usage: `define_parser!(PARSER_NAME, language_fn)`
#[macro_export]
macro_rules! define_parser {
    ($name:ident, $language:expr) => {
        thread_local! {
            static $name: std::cell::RefCell<tree_sitter::Parser> = std::cell::RefCell::new({
                let mut parser = tree_sitter::Parser::new();
                parser.set_language(&$language.into()).expect(concat!("Failed to set ", stringify!($name), " language"));
                parser
            });
        }
    };
}
