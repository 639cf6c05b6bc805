//! Rust code rendering.
//!
//! Renderers produce declarations at column zero; the generator indents
//! them into the per-service module.

pub mod enums;
pub mod service;
pub mod types;

pub use enums::EnumRenderer;
pub use service::ServiceRenderer;
pub use types::RecordRenderer;

/// Column limit for generated doc comments.
pub const DOC_WIDTH: usize = 78;

/// Indentation of one nesting level.
pub const INDENT: &str = "    ";

/// Names the generated code refers to unqualified. Schema types must not
/// shadow them.
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "bool",
    "i8",
    "i16",
    "i32",
    "i64",
    "u8",
    "u16",
    "u32",
    "u64",
    "f32",
    "f64",
    "str",
    "String",
    "Option",
    "Box",
    "Vec",
    "Default",
    "chrono",
    "rust_decimal",
];

/// Greedily wraps `text` into lines of at most `width` columns. Words
/// longer than `width` get a line of their own.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Appends `text` as a wrapped `///` doc comment prefixed with `indent`.
///
/// The width accounts for the enclosing module level.
pub fn push_doc(output: &mut String, indent: &str, text: &str) {
    let width = DOC_WIDTH.saturating_sub(INDENT.len() + indent.len() + 4).max(1);
    for line in wrap_text(text, width) {
        output.push_str(&format!("{indent}/// {line}\n"));
    }
}

/// Appends an empty `///` line.
pub fn push_doc_break(output: &mut String, indent: &str) {
    output.push_str(&format!("{indent}///\n"));
}

/// Indents every non-empty line of `text` by `prefix`.
#[must_use]
pub fn indent_block(text: &str, prefix: &str) -> String {
    let mut output = String::with_capacity(text.len() + text.len() / 8);
    for line in text.lines() {
        if !line.is_empty() {
            output.push_str(prefix);
            output.push_str(line);
        }
        output.push('\n');
    }
    output
}

/// Renders a string as a Rust string literal.
#[must_use]
pub fn string_literal(value: &str) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_short() {
        assert_eq!(wrap_text("one two", 20), vec!["one two"]);
        assert!(wrap_text("", 20).is_empty());
    }

    #[test]
    fn test_wrap_text_breaks_on_width() {
        let lines = wrap_text("aaa bbb ccc ddd", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_wrap_text_long_word() {
        let lines = wrap_text("x {http://example.com/very/long}Name y", 10);
        assert_eq!(lines, vec!["x", "{http://example.com/very/long}Name", "y"]);
    }

    #[test]
    fn test_push_doc_respects_width() {
        let text = "word ".repeat(40);
        let mut output = String::new();
        push_doc(&mut output, "", &text);
        for line in output.lines() {
            assert!(line.starts_with("/// "));
            assert!(line.len() + INDENT.len() <= DOC_WIDTH);
        }
        assert!(output.lines().count() > 1);
    }

    #[test]
    fn test_indent_block_keeps_blank_lines() {
        assert_eq!(indent_block("a\n\nb\n", "  "), "  a\n\n  b\n");
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("a\"b"), "\"a\\\"b\"");
        assert_eq!(string_literal("plain"), "\"plain\"");
    }
}
