use crate::node::Position;
use crate::ParseError;

/// Saved cursor state, restored when a speculative parse fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    offset: usize,
    byte: usize,
    line: usize,
    column: usize,
}

/// Character cursor over the source text.
///
/// Offsets and columns count characters. The byte index is tracked
/// alongside so the remaining input can be handed out as a `&str`.
pub struct Cursor<'a> {
    source: &'a str,
    chars: Vec<char>,
    offset: usize,
    byte: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            offset: 0,
            byte: 0,
            line: 1,
            column: 0,
        }
    }

    /// Consume and return the next character, or `None` at end of input.
    pub fn advance(&mut self) -> Option<char> {
        let ch = *self.chars.get(self.offset)?;
        self.offset += 1;
        self.byte += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume up to `count` characters.
    pub fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Consume the next character if it is `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.chars.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    /// The unconsumed part of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.byte..]
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset,
            byte: self.byte,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.offset;
        self.byte = checkpoint.byte;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    /// Build an error at the current position.
    pub fn fail(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            line: self.line,
            column: self.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.position(), Position::new(1, 0, 0));
    }

    #[test]
    fn test_newline_resets_column() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance_by(2);
        assert_eq!(cursor.position(), Position::new(1, 2, 2));
        assert_eq!(cursor.advance(), Some('\n'));
        assert_eq!(cursor.position(), Position::new(2, 0, 3));
        cursor.advance();
        assert_eq!(cursor.position(), Position::new(2, 1, 4));
    }

    #[test]
    fn test_advance_past_end_does_not_move() {
        let mut cursor = Cursor::new("x");
        cursor.advance_by(5);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), Position::new(1, 1, 1));
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut cursor = Cursor::new("a\nbc");
        cursor.advance();
        let checkpoint = cursor.checkpoint();
        cursor.advance_by(3);
        assert!(cursor.is_at_end());
        cursor.restore(checkpoint);
        assert_eq!(cursor.position(), Position::new(1, 1, 1));
        assert_eq!(cursor.rest(), "\nbc");
    }

    #[test]
    fn test_rest_after_multibyte() {
        let mut cursor = Cursor::new("é{1}");
        cursor.advance_by(2);
        assert_eq!(cursor.position().offset, 2);
        assert_eq!(cursor.rest(), "1}");
    }

    #[test]
    fn test_eat() {
        let mut cursor = Cursor::new("</");
        assert!(!cursor.eat('/'));
        assert!(cursor.eat('<'));
        assert!(cursor.eat('/'));
        assert!(!cursor.eat('/'));
    }

    #[test]
    fn test_fail_reports_line_and_column() {
        let mut cursor = Cursor::new("a\nbc");
        cursor.advance_by(3);
        let err = cursor.fail("Unexpected 'c'");
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 1);
        assert_eq!(err.to_string(), "Parse error at line 2, column 1: Unexpected 'c'");
    }
}
