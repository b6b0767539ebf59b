//! Parser module for javascope.
//!
//! Wraps tree-sitter parsing of Java sources. Everything downstream works
//! on the produced syntax tree; no symbol resolution happens here.

pub mod java;

// Re-export commonly used types for convenience
pub use java::{declared_package, node_text, JavaParser, ParseError, ParseResult};
