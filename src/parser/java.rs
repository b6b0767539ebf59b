//! Java parsing via tree-sitter.
//!
//! A thin wrapper over `tree_sitter` with the Java grammar installed, plus
//! the lightweight package-declaration extraction used by the prefix pass.
//! Tree-sitter is error-tolerant, so "parse failure" here means either the
//! parser produced no tree at all or the tree contains syntax errors; files
//! in that state are skipped by callers rather than half-analyzed.

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

/// Errors that can occur while parsing a Java source file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("parser produced no syntax tree")]
    NoTree,

    #[error("syntax error at line {line}")]
    Syntax { line: usize },

    #[error("tree-sitter language initialization failed")]
    LanguageInit,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parser for Java source files.
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    /// Create a new JavaParser with the Java grammar installed.
    pub fn new() -> ParseResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|_| ParseError::LanguageInit)?;

        Ok(Self { parser })
    }

    /// Parse source text into a syntax tree.
    ///
    /// A tree containing syntax errors counts as a failed parse: callers
    /// either warn (usage pass) or skip silently (prefix pass).
    pub fn parse(&mut self, source: &str) -> ParseResult<Tree> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;

        if tree.root_node().has_error() {
            let line = first_error_line(&tree).unwrap_or(1);
            return Err(ParseError::Syntax { line });
        }

        Ok(tree)
    }
}

/// Extract the declared package name from a parsed file, if any.
///
/// Only inspects top-level children of the compilation unit; nothing else
/// in the tree is touched, which keeps the prefix pass resolution-free.
pub fn declared_package(tree: &Tree, source: &str) -> Option<String> {
    let root = tree.root_node();
    let mut cursor = root.walk();

    for child in root.named_children(&mut cursor) {
        if child.kind() != "package_declaration" {
            continue;
        }

        let mut inner = child.walk();
        for part in child.named_children(&mut inner) {
            if matches!(part.kind(), "identifier" | "scoped_identifier") {
                return node_text(&part, source).map(|s| s.to_string());
            }
        }
    }

    None
}

/// Extract the text content of a node.
pub fn node_text<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    source.get(node.start_byte()..node.end_byte())
}

/// Find the 1-indexed line of the first syntax error in a tree.
fn first_error_line(tree: &Tree) -> Option<usize> {
    let mut cursor = tree.root_node().walk();

    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row + 1);
        }

        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
