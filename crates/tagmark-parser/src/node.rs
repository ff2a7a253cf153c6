//! Nodes produced by the parser.
//!
//! Top-level nodes are [`Node`] values. Props are only reachable through
//! [`Tag::props`], never at the top level.

use tagmark_literal::Value;

/// A point in the source text.
///
/// `line` starts at 1, `column` starts at 0 and resets after every newline,
/// `offset` is the absolute character index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Source range covered by a node, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// A top-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A run of text that did not form a tag.
    Text(Text),

    /// `<Name props...>`
    OpeningTag(Tag),

    /// `</Name props...>`. Props are kept even though they are unusual here.
    ClosingTag(Tag),

    /// `<Name props... />`
    SelfClosingTag(Tag),
}

/// Node discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    OpeningTag,
    ClosingTag,
    SelfClosingTag,
}

/// Text content, verbatim from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
    pub span: Span,
}

/// The shared payload of the three tag kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Component name, possibly dotted (`Foo.Bar`).
    pub component: String,
    /// Props in source order. Names are not deduplicated.
    pub props: Vec<Prop>,
    pub span: Span,
}

/// A `name=value` prop.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub name: String,
    /// `None` when the value started with neither `"` nor `{`.
    pub value: Option<Value>,
    /// Includes whitespace trailing the value.
    pub span: Span,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text(_) => NodeKind::Text,
            Node::OpeningTag(_) => NodeKind::OpeningTag,
            Node::ClosingTag(_) => NodeKind::ClosingTag,
            Node::SelfClosingTag(_) => NodeKind::SelfClosingTag,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Text(text) => text.span,
            Node::OpeningTag(tag) | Node::ClosingTag(tag) | Node::SelfClosingTag(tag) => tag.span,
        }
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Node::Text(_) => None,
            Node::OpeningTag(tag) | Node::ClosingTag(tag) | Node::SelfClosingTag(tag) => Some(tag),
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn is_opening_tag(&self) -> bool {
        matches!(self, Node::OpeningTag(_))
    }

    pub fn is_closing_tag(&self) -> bool {
        matches!(self, Node::ClosingTag(_))
    }

    pub fn is_self_closing_tag(&self) -> bool {
        matches!(self, Node::SelfClosingTag(_))
    }
}

impl Tag {
    /// First prop with the given name.
    pub fn prop(&self, name: &str) -> Option<&Prop> {
        self.props.iter().find(|p| p.name == name)
    }
}
