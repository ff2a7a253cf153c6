//! Tagmark Serializer
//!
//! Renders parsed nodes back to markup. Text is written verbatim; tags are
//! written in a canonical layout with one space before each prop:
//!
//! ```text
//! <Foo a="x" b={1}>    </Foo>    <Foo.Bar />
//! ```
//!
//! Whatever this produces parses back to nodes with the same components,
//! prop names and values.

use tagmark_literal::Value;
use tagmark_parser::{Node, Prop, Tag};

/// Render a single node.
pub fn serialize(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Render a sequence of nodes back to back.
pub fn serialize_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

/// Render a single prop: `name="value"` for strings, `name={literal}`
/// otherwise.
pub fn serialize_prop(prop: &Prop) -> String {
    let mut out = String::new();
    write_prop(prop, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        Node::OpeningTag(tag) => write_tag(tag, "<", ">", out),
        Node::ClosingTag(tag) => write_tag(tag, "</", ">", out),
        Node::SelfClosingTag(tag) => write_tag(tag, "<", " />", out),
    }
}

fn write_tag(tag: &Tag, open: &str, close: &str, out: &mut String) {
    out.push_str(open);
    out.push_str(&tag.component);
    for prop in &tag.props {
        out.push(' ');
        write_prop(prop, out);
    }
    out.push_str(close);
}

fn write_prop(prop: &Prop, out: &mut String) {
    out.push_str(&prop.name);
    out.push('=');
    match &prop.value {
        Some(Value::String(s)) => {
            out.push('"');
            for ch in s.chars() {
                if ch == '"' || ch == '\\' {
                    out.push('\\');
                }
                out.push(ch);
            }
            out.push('"');
        }
        Some(value) => {
            out.push('{');
            out.push_str(&tagmark_literal::serialize(value));
            out.push('}');
        }
        // The parser always consumes one character as the value start; a
        // space reads back as an absent value again.
        None => out.push(' '),
    }
}
