//! Markup Escaping
//!
//! Literal-markup reconstruction re-escapes decoded text. Attribute values
//! and character data use different quote handling:
//! - attributes: `& < > "` (single quotes left alone)
//! - character data: `& < > " '` with `'` written as `&#039;`

use std::borrow::Cow;

/// Escape character data for literal markup
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input, true)
}

/// Escape a double-quoted attribute value
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape(input, false)
}

fn escape(input: &str, single_quotes: bool) -> Cow<'_, str> {
    let needs_escape = |b: u8| match b {
        b'<' | b'>' | b'&' | b'"' => true,
        b'\'' => single_quotes,
        _ => false,
    };

    // Fast path: nothing to escape
    let Some(first) = input.bytes().position(needs_escape) else {
        return Cow::Borrowed(input);
    };

    let mut result = String::with_capacity(input.len() + 16);
    result.push_str(&input[..first]);
    for c in input[first..].chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' if single_quotes => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
