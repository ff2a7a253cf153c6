//! Tagmark Parser
//!
//! Finds JSX-like tags embedded in arbitrary text and returns a flat,
//! position-annotated sequence of nodes: opening, closing and self-closing
//! tags (with their props) and the text runs between them.
//!
//! No tree is built and tags are not matched against each other. Anything
//! that does not parse as a tag is kept as text, so parsing never fails.
//!
//! # Example
//!
//! ```
//! use tagmark_parser::{parse, Node};
//!
//! let nodes = parse("some <Component text={true}>");
//! assert_eq!(nodes.len(), 2);
//! assert!(matches!(&nodes[0], Node::Text(text) if text.value == "some "));
//! assert!(nodes[1].is_opening_tag());
//! ```

pub mod cursor;
pub mod node;
pub mod parser;

pub use node::{Node, NodeKind, Position, Prop, Span, Tag, Text};
pub use parser::Parser;
pub use tagmark_literal::Value;

/// Parse a document into its top-level nodes.
pub fn parse(source: &str) -> Vec<Node> {
    Parser::parse(source)
}

/// Parser error with position information.
///
/// Raised while recognizing a tag. The recognizer rolls back on these, so
/// they only surface through logs and the lower-level [`Parser`] methods.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
