//! Tag recognizer and text merger.
//!
//! Each step first tries to read a tag at the cursor. The attempt runs on a
//! checkpoint and rolls back on any error, so a `<` that does not open a
//! valid tag is simply text. Text runs continue across failed tag attempts
//! and stop right before the next tag that does parse; that tag is held in
//! a one-node lookahead buffer and emitted next.

use tagmark_literal::Value;
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::node::{Node, Prop, Span, Tag, Text};
use crate::ParseError;

/// Streaming tagmark parser. Iterating yields top-level nodes in order.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    lookahead: Option<Node>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            lookahead: None,
        }
    }

    /// Parse a whole document.
    pub fn parse(source: &str) -> Vec<Node> {
        debug!(bytes = source.len(), "parsing document");
        let nodes: Vec<Node> = Parser::new(source).collect();
        debug!(nodes = nodes.len(), "parsed document");
        nodes
    }

    /// Try to read one tag at the cursor. On failure the cursor is left
    /// where it was and `None` is returned.
    pub fn try_tag(&mut self) -> Option<Node> {
        let checkpoint = self.cursor.checkpoint();
        match self.parse_tag() {
            Ok(node) => Some(node),
            Err(error) => {
                self.cursor.restore(checkpoint);
                trace!(offset = self.cursor.position().offset, %error, "tag attempt rolled back");
                None
            }
        }
    }

    /// Read one tag at the cursor. Unlike [`Parser::try_tag`] this leaves the
    /// cursor wherever the error occurred.
    pub fn parse_tag(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.position();
        self.expect('<')?;
        let is_closing = self.cursor.eat('/');
        let component = self.parse_component_name()?;
        let props = self.parse_props()?;
        self.skip_whitespace();
        let is_self_closing = !is_closing && self.cursor.eat('/');
        self.expect('>')?;

        let tag = Tag {
            component,
            props,
            span: Span::new(start, self.cursor.position()),
        };
        Ok(if is_self_closing {
            Node::SelfClosingTag(tag)
        } else if is_closing {
            Node::ClosingTag(tag)
        } else {
            Node::OpeningTag(tag)
        })
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Read text up to the next tag that parses, or to the end of input.
    /// Called after a tag attempt at the cursor has failed.
    fn parse_text(&mut self) -> (Text, Option<Node>) {
        let start = self.cursor.position();
        let mut value = String::new();

        loop {
            if self.cursor.eat('<') {
                value.push('<');
            }
            while let Some(ch) = self.cursor.peek().filter(|&c| c != '<') {
                value.push(ch);
                self.cursor.advance();
            }

            let end = self.cursor.position();
            if self.cursor.is_at_end() {
                return (Text { value, span: Span::new(start, end) }, None);
            }
            if let Some(tag) = self.try_tag() {
                trace!(offset = end.offset, "text run ends at tag");
                return (Text { value, span: Span::new(start, end) }, Some(tag));
            }
            trace!(offset = end.offset, "failed tag attempt merged into text");
        }
    }

    // =========================================================================
    // Tags and props
    // =========================================================================

    /// A letter followed by letters, digits, `.` or `_`.
    fn parse_component_name(&mut self) -> Result<String, ParseError> {
        match self.cursor.peek() {
            Some(c) if c.is_ascii_alphabetic() => Ok(self.read_while(is_name_char)),
            other => Err(self.cursor.fail(format!("Unexpected {}", describe(other)))),
        }
    }

    fn parse_props(&mut self) -> Result<Vec<Prop>, ParseError> {
        self.skip_whitespace();
        let mut props = Vec::new();
        while self.cursor.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            props.push(self.parse_prop()?);
            self.skip_whitespace();
        }
        Ok(props)
    }

    fn parse_prop(&mut self) -> Result<Prop, ParseError> {
        self.skip_whitespace();
        let start = self.cursor.position();
        let name = self.read_while(is_prop_name_char);
        self.expect('=')?;
        let value = self.parse_prop_value()?;
        self.skip_whitespace();
        Ok(Prop {
            name,
            value,
            span: Span::new(start, self.cursor.position()),
        })
    }

    /// The first character of the value is always consumed. Anything other
    /// than `"` or `{` leaves the prop without a value.
    fn parse_prop_value(&mut self) -> Result<Option<Value>, ParseError> {
        match self.cursor.advance() {
            Some('"') => Ok(Some(Value::String(self.read_quoted_string()))),
            Some('{') => {
                let parsed = tagmark_literal::parse_one(self.cursor.rest())
                    .map_err(|error| self.cursor.fail(error.to_string()))?;
                self.cursor.advance_by(parsed.length);
                self.expect('}')?;
                Ok(Some(parsed.value))
            }
            _ => Ok(None),
        }
    }

    /// Body of a `"` string. `\` passes the next character through as is.
    /// An unterminated string runs to the end of input.
    fn read_quoted_string(&mut self) -> String {
        let mut value = String::new();
        let mut escaped = false;
        while let Some(ch) = self.cursor.advance() {
            if escaped {
                value.push(ch);
                escaped = false;
            } else if ch == '"' {
                break;
            } else if ch == '\\' {
                escaped = true;
            } else {
                value.push(ch);
            }
        }
        value
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    fn read_while(&mut self, predicate: fn(char) -> bool) -> String {
        let mut value = String::new();
        while let Some(ch) = self.cursor.peek().filter(|&c| predicate(c)) {
            value.push(ch);
            self.cursor.advance();
        }
        value
    }

    fn skip_whitespace(&mut self) {
        while self.cursor.peek().is_some_and(is_whitespace) {
            self.cursor.advance();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        if self.cursor.eat(expected) {
            Ok(())
        } else {
            Err(self.cursor.fail(format!(
                "Expected '{expected}', got {}",
                describe(self.cursor.peek())
            )))
        }
    }
}

impl Iterator for Parser<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        if let Some(node) = self.lookahead.take() {
            return Some(node);
        }
        if self.cursor.is_at_end() {
            return None;
        }
        if let Some(tag) = self.try_tag() {
            return Some(tag);
        }
        let (text, tag) = self.parse_text();
        self.lookahead = tag;
        Some(Node::Text(text))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_'
}

fn is_prop_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

fn describe(ch: Option<char>) -> String {
    match ch {
        Some(c) => format!("'{c}'"),
        None => "end of input".to_string(),
    }
}
