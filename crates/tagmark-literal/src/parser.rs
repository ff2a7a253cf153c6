//! Literal parser.
//!
//! Recursive descent over tokens pulled lazily from [`LiteralLexer`].
//! [`parse_one`] reads a single literal from the front of its input and
//! reports how many characters it consumed; [`parse`] additionally
//! requires the input to hold nothing else.

use indexmap::IndexMap;

use crate::lexer::{LiteralLexer, Token, TokenKind};
use crate::{LiteralError, Value};

/// Nesting limit for arrays and objects.
const MAX_DEPTH: usize = 256;

/// A literal read from the front of some text.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub value: Value,
    /// Characters consumed, including whitespace around the literal.
    pub length: usize,
}

/// Parse one literal at the start of `source`, ignoring whatever follows it.
pub fn parse_one(source: &str) -> Result<Parsed, LiteralError> {
    LiteralParser::new(source).parse_one()
}

/// Parse `source` as exactly one literal.
pub fn parse(source: &str) -> Result<Value, LiteralError> {
    let mut parser = LiteralParser::new(source);
    let parsed = parser.parse_one()?;
    let token = parser.advance()?;
    if token.kind != TokenKind::Eof {
        return Err(unexpected(&token));
    }
    Ok(parsed.value)
}

/// Literal parser with one token of lookahead.
pub struct LiteralParser {
    lexer: LiteralLexer,
    peeked: Option<Token>,
    /// End offset of the last consumed token.
    consumed: usize,
    depth: usize,
}

impl LiteralParser {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: LiteralLexer::new(source),
            peeked: None,
            consumed: 0,
            depth: 0,
        }
    }

    /// Parse one value and measure it along with the whitespace around it.
    pub fn parse_one(&mut self) -> Result<Parsed, LiteralError> {
        let value = self.parse_value()?;

        self.peeked = None;
        self.lexer.reset(self.consumed);
        self.lexer.skip_whitespace();
        let length = self.lexer.position();
        self.consumed = length;

        Ok(Parsed { value, length })
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::String(s) => Ok(Value::String(s)),
            TokenKind::Number(n) => Ok(Value::Number(n)),
            TokenKind::Boolean(b) => Ok(Value::Boolean(b)),
            TokenKind::Null => Ok(Value::Null),
            TokenKind::LBracket => self.nested(token.span.start, Self::parse_array),
            TokenKind::LBrace => self.nested(token.span.start, Self::parse_object),
            _ => Err(unexpected(&token)),
        }
    }

    fn nested(
        &mut self,
        offset: usize,
        parse: fn(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError {
                message: format!("Literal nested deeper than {MAX_DEPTH} levels"),
                offset,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Array body after `[`. Trailing commas are allowed.
    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        let mut items = Vec::new();

        loop {
            if self.peek()?.kind == TokenKind::RBracket {
                self.advance()?;
                break;
            }
            items.push(self.parse_value()?);

            let token = self.advance()?;
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::RBracket => break,
                _ => return Err(unexpected(&token)),
            }
        }

        Ok(Value::Array(items))
    }

    /// Object body after `{`. Keys may be identifiers, strings, numbers or
    /// keywords; trailing commas are allowed.
    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        let mut map = IndexMap::new();

        loop {
            let token = self.advance()?;
            let key = match token.kind {
                TokenKind::RBrace => break,
                TokenKind::Identifier(name) => name,
                TokenKind::String(s) => s,
                TokenKind::Number(n) => n.to_string(),
                TokenKind::Boolean(b) => b.to_string(),
                TokenKind::Null => "null".to_string(),
                _ => return Err(unexpected(&token)),
            };

            let colon = self.advance()?;
            if colon.kind != TokenKind::Colon {
                return Err(unexpected(&colon));
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            let token = self.advance()?;
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::RBrace => break,
                _ => return Err(unexpected(&token)),
            }
        }

        Ok(Value::Object(map))
    }

    // --- Token navigation ---

    fn peek(&mut self) -> Result<&Token, LiteralError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        let token: &Token = self.peeked.insert(token);
        Ok(token)
    }

    fn advance(&mut self) -> Result<Token, LiteralError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        self.consumed = token.span.end;
        Ok(token)
    }
}

fn unexpected(token: &Token) -> LiteralError {
    LiteralError {
        message: format!("Unexpected {}", token.kind),
        offset: token.span.start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn object(entries: &[(&str, Value)]) -> Value {
        entries.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    #[test]
    fn test_scalars() {
        assert_eq!(parse("true").unwrap(), Value::Boolean(true));
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("-3.5").unwrap(), Value::Number(-3.5));
        assert_eq!(parse("'hi'").unwrap(), Value::from("hi"));
    }

    #[test]
    fn test_bare_identifier_is_rejected() {
        let err = parse("oops").unwrap_err();
        assert_eq!(err.message, "Unexpected identifier 'oops'");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = parse("   ").unwrap_err();
        assert_eq!(err.message, "Unexpected end of input");
        assert_eq!(err.offset, 3);
    }

    // =========================================================================
    // Containers
    // =========================================================================

    #[test]
    fn test_object() {
        assert_eq!(
            parse(r#"{ foo: "bar", hey: 45 }"#).unwrap(),
            object(&[("foo", Value::from("bar")), ("hey", Value::from(45))])
        );
    }

    #[test]
    fn test_object_key_forms() {
        let value = parse(r#"{ "a b": 1, 'c': 2, 3: 4, null: 5, $d_e: 6, }"#).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["a b", "c", "3", "null", "$d_e"]);
    }

    #[test]
    fn test_duplicate_key_keeps_position_takes_last_value() {
        let value = parse("{ a: 1, b: 2, a: 3 }").unwrap();
        let entries: Vec<(&str, f64)> = value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_f64().unwrap()))
            .collect();
        assert_eq!(entries, vec![("a", 3.0), ("b", 2.0)]);
    }

    #[test]
    fn test_nested_containers() {
        assert_eq!(
            parse("[1, [true, null], { x: [] }, {},]").unwrap(),
            Value::Array(vec![
                Value::from(1),
                Value::Array(vec![Value::Boolean(true), Value::Null]),
                object(&[("x", Value::Array(vec![]))]),
                object(&[]),
            ])
        );
    }

    #[test]
    fn test_missing_colon() {
        let err = parse("{ a 1 }").unwrap_err();
        assert_eq!(err.message, "Unexpected number 1");
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_unclosed_array() {
        assert!(parse("[1, 2").is_err());
    }

    #[test]
    fn test_depth_limit() {
        let deep = "[".repeat(MAX_DEPTH + 1);
        let err = parse(&deep).unwrap_err();
        assert!(err.message.contains("nested deeper"));
    }

    // =========================================================================
    // parse_one: consumed length
    // =========================================================================

    #[test]
    fn test_parse_one_object_stops_at_closing_brace() {
        let parsed = parse_one(r#"{ foo: "bar", hey: 45 }}>"#).unwrap();
        assert_eq!(parsed.length, 23);
        assert_eq!(parsed.value.get("hey"), Some(&Value::from(45)));
    }

    #[test]
    fn test_parse_one_counts_surrounding_whitespace() {
        let parsed = parse_one("  true \n}> <Foo").unwrap();
        assert_eq!(parsed.value, Value::Boolean(true));
        assert_eq!(parsed.length, 8);
    }

    #[test]
    fn test_parse_one_counts_characters_not_bytes() {
        let parsed = parse_one("'héllo'}").unwrap();
        assert_eq!(parsed.length, 7);
    }

    #[test]
    fn test_parse_one_ignores_unlexable_tail() {
        let parsed = parse_one("1}<<<@#").unwrap();
        assert_eq!(parsed.value, Value::from(1));
        assert_eq!(parsed.length, 1);
    }

    #[test]
    fn test_parse_rejects_trailing_input() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(err.offset, 2);
    }
}
