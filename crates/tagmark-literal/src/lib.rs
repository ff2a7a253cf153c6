//! Tagmark Literals
//!
//! Parses the literal expressions found inside `{...}` prop values
//! (strings, numbers, booleans, `null`, arrays and objects) and renders
//! values back to source text that parses to the same value.
//!
//! The tag parser hands this crate everything after an opening `{` and
//! advances its own cursor by the reported [`Parsed::length`], so only the
//! characters of the literal itself are ever lexed.
//!
//! # Example
//!
//! ```
//! use tagmark_literal::{parse_one, Value};
//!
//! let parsed = parse_one("42 }>rest of the document").unwrap();
//! assert_eq!(parsed.value, Value::Number(42.0));
//! assert_eq!(parsed.length, 3);
//! ```

pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod value;

pub use parser::{parse, parse_one, LiteralParser, Parsed};
pub use serializer::serialize;
pub use value::Value;

/// Literal error with the character offset it was raised at.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Literal error at offset {offset}: {message}")]
pub struct LiteralError {
    pub message: String,
    pub offset: usize,
}
